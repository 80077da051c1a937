use std::{fs, path::PathBuf};

use anyhow::Result;
use speedlog_report::{SpeedLog, SpeedLogError, RECORD_DELIMITER};

/// Write `content` to a per-test file under the system temp directory.
fn write_fixture(name: &str, content: &str) -> Result<PathBuf> {
    // ---
    let dir = std::env::temp_dir().join(format!("speedlog-report-{}", std::process::id()));
    fs::create_dir_all(&dir)?;
    let path = dir.join(name);
    fs::write(&path, content)?;
    Ok(path)
}

fn block(start: &str, server: Option<&str>, down: &str, up: &str) -> String {
    // ---
    let mut text = String::from("Retrieving speedtest.net configuration...\n");
    text.push_str(&format!("Speed test start: {}\n", start));
    text.push_str("Testing from Example ISP (192.0.2.10)...\n");
    if let Some(server) = server {
        text.push_str(&format!("Hosted by / Server: {} - Oslo [2.31 km]: 4.2 ms\n", server));
    }
    text.push_str("Testing download speed....\n");
    text.push_str(&format!("Download: {} Mbps\n", down));
    text.push_str("Testing upload speed....\n");
    text.push_str(&format!("Upload: {} Mbps\n", up));
    text.push_str(RECORD_DELIMITER);
    text.push('\n');
    text
}

#[test]
fn single_record_scenario() -> Result<()> {
    // ---
    let path = write_fixture(
        "single.log",
        &block("2023-01-01 10:00:00", Some("testserver"), "50.5", "10.25"),
    )?;
    let log = SpeedLog::open(&path)?;

    assert_eq!(log.len(), 1);
    assert_eq!(log.servers(), ["testserver"]);

    let by_hour = log.by_hour();
    assert_eq!(by_hour.len(), 1);
    assert_eq!(by_hour["10"].count, 1);
    assert_eq!(by_hour["10"].average.down, "50.500");
    assert_eq!(by_hour["10"].average.up, "10.250");

    Ok(())
}

#[test]
fn zero_speed_record_is_filtered() -> Result<()> {
    // ---
    let content = [
        block("2023-01-01 10:00:00", Some("broken"), "0", "10.0"),
        block("2023-01-01 11:00:00", Some("working"), "80.1", "20.2"),
    ]
    .concat();
    let log = SpeedLog::open(write_fixture("filtered.log", &content)?)?;

    assert_eq!(log.len(), 1);
    assert_eq!(log.servers(), ["working"]);
    assert_eq!(log.by_hour().keys().collect::<Vec<_>>(), ["11"]);
    assert_eq!(log.by_weekday().values().map(|s| s.count).sum::<usize>(), 1);

    Ok(())
}

#[test]
fn empty_file_is_not_an_error() -> Result<()> {
    // ---
    let log = SpeedLog::open(write_fixture("empty.log", "")?)?;

    assert!(log.is_empty());
    assert!(log.servers().is_empty());
    assert!(log.by_hour().is_empty());
    assert!(log.by_weekday().is_empty());
    assert!(log.overall_average().is_none());

    Ok(())
}

#[test]
fn record_without_server_line() -> Result<()> {
    // ---
    let content = [
        block("2023-01-01 10:00:00", None, "12", "3"),
        block("2023-01-01 12:00:00", Some("srv"), "14", "5"),
    ]
    .concat();
    let log = SpeedLog::open(write_fixture("no-server.log", &content)?)?;

    assert_eq!(log.len(), 2);
    assert_eq!(log.servers(), ["srv"]);
    assert!(log.records()[0].server.is_none());

    Ok(())
}

#[test]
fn missing_file_is_reported() {
    // ---
    let path = std::env::temp_dir().join("speedlog-report-does-not-exist.log");
    match SpeedLog::open(&path) {
        Err(SpeedLogError::FileUnreadable { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected FileUnreadable, got {:?}", other.map(|log| log.len())),
    }
}

#[test]
fn week_of_measurements_invariants() -> Result<()> {
    // ---
    let mut content = String::new();
    let servers = ["alpha", "beta", "alpha", "gamma"];
    for day in 2..=8 {
        for (i, hour) in [0, 6, 12, 18].iter().enumerate() {
            let down = format!("{}.{}", 20 + day * 3 + hour, i);
            let up = format!("{}.5", 2 + i);
            let start = format!("2023-01-{:02} {:02}:15:00", day, hour);
            content.push_str(&block(&start, Some(servers[i]), &down, &up));
        }
    }
    // One bad block in the middle of the file
    content.push_str("Speed test start: ???\nDownload: 1 Mbps\nUpload: 1 Mbps\n");
    content.push_str(RECORD_DELIMITER);
    content.push('\n');
    content.push_str(&block("2023-01-09 06:15:00", Some("delta"), "-5", "1"));

    let log = SpeedLog::open(write_fixture("week.log", &content)?)?;

    assert_eq!(log.len(), 28);
    assert_eq!(log.malformed().len(), 1);
    assert_eq!(log.dropped_invalid(), 1);
    assert_eq!(log.servers(), ["alpha", "beta", "gamma"]);

    // Every kept record is valid
    assert!(log
        .records()
        .iter()
        .all(|r| r.download_speed > 0.0 && r.upload_speed > 0.0));

    // Hour buckets: keys sorted, counts add up, min/max bound the bucket
    let by_hour = log.by_hour();
    let keys: Vec<_> = by_hour.keys().cloned().collect();
    assert_eq!(keys, ["00", "06", "12", "18"]);
    for (key, stats) in &by_hour {
        assert_eq!(stats.count, 7);
        let hour: u32 = key.parse()?;
        let downs: Vec<f64> = log
            .records()
            .iter()
            .filter(|r| r.display_datetime[11..13].parse::<u32>().ok() == Some(hour))
            .map(|r| r.download_speed)
            .collect();
        let mean = downs.iter().sum::<f64>() / downs.len() as f64;
        assert!((stats.average.down.parse::<f64>()? - mean).abs() < 0.0005 + 1e-9);
        for d in downs {
            assert!(stats.min_max.down.min <= d && d <= stats.min_max.down.max);
        }
    }

    // Weekday buckets: Monday 2nd through Sunday 8th
    let by_weekday = log.by_weekday();
    assert_eq!(
        by_weekday.keys().collect::<Vec<_>>(),
        ["1", "2", "3", "4", "5", "6", "7"]
    );
    assert!(by_weekday.values().all(|s| s.count == 4));

    // Queries are repeatable
    assert_eq!(log.by_hour(), by_hour);
    assert_eq!(log.by_weekday(), by_weekday);

    assert_eq!(log.first_record_date(), Some("2023-01-02 00:15:00 (CET)"));
    assert_eq!(log.latest_record_date(), Some("2023-01-08 18:15:00 (CET)"));

    Ok(())
}

#[test]
fn latin1_server_name_does_not_reject_file() -> Result<()> {
    // ---
    let mut bytes = block("2023-01-01 10:00:00", None, "50.5", "10.25").into_bytes();
    bytes.extend_from_slice(b"Speed test start: 2023-01-01 11:00:00\n");
    bytes.extend_from_slice(b"Server: Troms\xF8 - Norway [1.20 km]: 6.1 ms\n");
    bytes.extend_from_slice(b"Download: 30 Mbps\nUpload: 5 Mbps\n");

    let dir = std::env::temp_dir().join(format!("speedlog-report-{}", std::process::id()));
    fs::create_dir_all(&dir)?;
    let path = dir.join("latin1.log");
    fs::write(&path, &bytes)?;

    let log = SpeedLog::open(&path)?;

    assert_eq!(log.len(), 2, "both records should survive a stray Latin-1 byte");
    assert_eq!(log.servers().len(), 1);
    assert!(log.servers()[0].starts_with("Troms"));
    assert_eq!(log.by_hour()["11"].average.down, "30.000");

    Ok(())
}
