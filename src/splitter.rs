//! Splits raw log content into record blocks.

/// Line separating two records in a speed-test log: exactly 26 dashes.
pub const RECORD_DELIMITER: &str = "--------------------------";

/// Split `content` on `delimiter` and return every block that is not blank.
///
/// Blankness is judged on the trimmed text only; surviving blocks are
/// returned untouched and in file order.
pub fn split_blocks<'a>(content: &'a str, delimiter: &str) -> Vec<&'a str> {
    // ---
    content
        .split(delimiter)
        .filter(|block| !block.trim().is_empty())
        .collect()
}
