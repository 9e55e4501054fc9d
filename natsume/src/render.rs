//! Text rendering of status snapshots for the terminal

use std::fmt::Write;

use chrono::{DateTime, Local, Utc};

use natsume_types::{DeviceInfo, StatusSnapshot, SyncState};

const HEADERS: [&str; 7] = ["ID", "MAC", "IP", "LAST SEEN", "USERNAME", "PASSWORD", "SYNCED"];

/// One-line summary of the counters
pub fn summary(status: &StatusSnapshot) -> String {
    format!(
        "bound: {}  infos: {}  synced: {}  not synced: {}",
        status.bind_count, status.info_count, status.sync_count, status.not_sync_count
    )
}

/// Summary followed by an aligned table of devices
pub fn status_table(status: &StatusSnapshot, only_unsynced: bool) -> String {
    let rows: Vec<[String; 7]> = status
        .infos
        .iter()
        .filter(|info| !only_unsynced || info.sync_state() == SyncState::NotSynced)
        .map(row)
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = summary(status);
    out.push('\n');

    if rows.is_empty() {
        out.push_str("(no devices)\n");
        return out;
    }

    push_line(&mut out, &HEADERS.map(str::to_string), &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }

    out
}

fn row(info: &DeviceInfo) -> [String; 7] {
    let or_dash = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    [
        info.id.clone(),
        or_dash(&info.mac),
        or_dash(&info.ip),
        last_seen(info),
        or_dash(&info.username),
        or_dash(&info.password),
        match info.sync_state() {
            SyncState::Synced => "yes",
            SyncState::NotSynced => "no",
            SyncState::Unknown => "?",
        }
        .to_string(),
    ]
}

fn last_seen(info: &DeviceInfo) -> String {
    match (info.last_seen_at(), info.last_seen.as_deref()) {
        (Some(at), _) => format_time(at),
        (None, Some(raw)) => raw.to_string(),
        (None, None) => "-".to_string(),
    }
}

fn format_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

fn push_line(out: &mut String, cells: &[String; 7], widths: &[usize; 7]) {
    let mut line = String::new();
    for (cell, width) in cells.iter().zip(widths) {
        let _ = write!(line, "{:<width$}  ", cell, width = *width);
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> StatusSnapshot {
        let mut first = DeviceInfo::new("dev1");
        first.mac = Some("AA:BB:CC:DD:EE:FF".into());
        first.synced = Some(true);
        first.last_seen = Some("not a time".into());

        let mut second = DeviceInfo::new("dev2");
        second.synced = Some(false);

        StatusSnapshot {
            bind_count: 1,
            info_count: 2,
            sync_count: 1,
            not_sync_count: 1,
            infos: vec![first, second],
        }
    }

    #[test]
    fn test_summary() {
        assert_eq!(
            summary(&snapshot()),
            "bound: 1  infos: 2  synced: 1  not synced: 1"
        );
    }

    #[test]
    fn test_table_lists_every_device() {
        let table = status_table(&snapshot(), false);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("ID"));
        assert!(lines[2].contains("AA:BB:CC:DD:EE:FF"));
        assert!(lines[2].contains("not a time"));
        assert!(lines[2].ends_with("yes"));
        assert!(lines[3].starts_with("dev2"));
        assert!(lines[3].ends_with("no"));
    }

    #[test]
    fn test_table_only_unsynced() {
        let table = status_table(&snapshot(), true);
        assert!(!table.contains("dev1"));
        assert!(table.contains("dev2"));
    }

    #[test]
    fn test_empty_table() {
        let mut status = snapshot();
        status.infos.clear();
        assert!(status_table(&status, false).ends_with("(no devices)\n"));
    }
}
