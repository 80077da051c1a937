//! Plain-text rendering of a [`SpeedLog`] as bordered ASCII tables.

use std::collections::BTreeMap;

use speedlog_report::{GroupStats, SpeedLog};

const STATS_HEADERS: [&str; 7] = [
    "Number of measurements",
    "Average speed down",
    "Average speed up",
    "Speed down min",
    "Speed down max",
    "Speed up min",
    "Speed up max",
];

const UNKNOWN_SERVER: &str = "(unknown)";

// ---

/// Column-aligned table with a header row.
#[derive(Debug)]
pub(crate) struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    // ---
    pub(crate) fn new<S: AsRef<str>>(headers: &[S]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.as_ref().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub(crate) fn add_row(&mut self, row: Vec<String>) -> &mut Self {
        self.rows.push(row);
        self
    }

    pub(crate) fn render(&self) -> String {
        // ---
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }

        let border = widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+");
        let border = format!("+{}+\n", border);

        let mut output = String::new();
        output.push_str(&border);
        output.push_str(&render_line(&self.headers, &widths));
        output.push_str(&border);
        for row in &self.rows {
            output.push_str(&render_line(row, &widths));
        }
        if !self.rows.is_empty() {
            output.push_str(&border);
        }
        output
    }
}

fn render_line(cells: &[String], widths: &[usize]) -> String {
    // ---
    let padded = widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            format!(" {:<width$} ", cell, width = width)
        })
        .collect::<Vec<_>>()
        .join("|");
    format!("|{}|\n", padded)
}

// ---

/// English name for an ISO weekday key (`"1"` is Monday).
pub(crate) fn weekday_name(key: &str) -> String {
    // ---
    let name = match key.parse::<u8>() {
        Ok(1) => "Monday",
        Ok(2) => "Tuesday",
        Ok(3) => "Wednesday",
        Ok(4) => "Thursday",
        Ok(5) => "Friday",
        Ok(6) => "Saturday",
        Ok(7) => "Sunday",
        _ => return key.to_string(),
    };
    name.to_string()
}

/// Render the full report: summary, servers, hour and weekday tables, and
/// every measurement.
pub(crate) fn format_report(log: &SpeedLog) -> String {
    // ---
    let mut output = String::new();

    output.push_str("===== Average speed measurement calculation =====\n");
    match (
        log.first_record_date(),
        log.latest_record_date(),
        log.overall_average(),
    ) {
        (Some(first), Some(latest), Some(average)) => {
            output.push_str(&format!("First data recorded: {}\n", first));
            output.push_str(&format!("Latest data recorded: {}\n", latest));
            output.push_str(&format!(
                "Average speed (down / up): {} Mbps / {} Mbps\n",
                average.down, average.up
            ));
        }
        _ => output.push_str("No valid measurements found\n"),
    }

    output.push_str("\n===== Servers used =====\n");
    let mut servers = Table::new(&["Server name"]);
    for server in log.servers() {
        servers.add_row(vec![server.clone()]);
    }
    output.push_str(&servers.render());

    output.push_str("\n===== Average speed grouped by hour =====\n");
    output.push_str(&stats_table("Hour", &log.by_hour(), |key| key.to_string()).render());

    output.push_str("\n===== Average speed grouped by weekday =====\n");
    output.push_str(&stats_table("Weekday", &log.by_weekday(), weekday_name).render());

    output.push_str("\n===== All measurements =====\n");
    let mut measurements = Table::new(&["Datetime", "Speed down (Mbps)", "Speed up (Mbps)", "Server"]);
    for record in log.records() {
        measurements.add_row(vec![
            record.display_datetime.clone(),
            record.download_speed.to_string(),
            record.upload_speed.to_string(),
            record.server.as_deref().unwrap_or(UNKNOWN_SERVER).to_string(),
        ]);
    }
    output.push_str(&measurements.render());

    output
}

fn stats_table(
    first_column: &str,
    groups: &BTreeMap<String, GroupStats>,
    label: impl Fn(&str) -> String,
) -> Table {
    // ---
    let mut headers = vec![first_column];
    headers.extend(STATS_HEADERS);
    let mut table = Table::new(&headers);

    for (key, stats) in groups {
        table.add_row(vec![
            label(key),
            stats.count.to_string(),
            stats.average.down.clone(),
            stats.average.up.clone(),
            stats.min_max.down.min.to_string(),
            stats.min_max.down.max.to_string(),
            stats.min_max.up.min.to_string(),
            stats.min_max.up.max.to_string(),
        ]);
    }
    table
}
