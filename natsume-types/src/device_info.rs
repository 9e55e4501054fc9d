//! Device information structures

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sync flag of a device, with the unknown case made explicit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Synced,
    NotSynced,
    Unknown,
}

/// Observed state of one bound device
///
/// Every field other than `id` is independently nullable; the
/// presence of one says nothing about the others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Hardware address, unresolved for some entries
    pub mac: Option<String>,

    /// Stable identifier
    pub id: String,

    /// Last known IP address
    pub ip: Option<String>,

    /// Raw timestamp as reported by the service
    pub last_seen: Option<String>,

    pub username: Option<String>,

    pub password: Option<String>,

    /// Tri-state sync flag
    pub synced: Option<bool>,
}

impl DeviceInfo {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            mac: None,
            id: id.into(),
            ip: None,
            last_seen: None,
            username: None,
            password: None,
            synced: None,
        }
    }

    pub fn sync_state(&self) -> SyncState {
        match self.synced {
            Some(true) => SyncState::Synced,
            Some(false) => SyncState::NotSynced,
            None => SyncState::Unknown,
        }
    }

    /// Interpret `last_seen` as a point in time.
    ///
    /// The service records Unix seconds as a decimal string; RFC 3339
    /// is accepted as well. Anything else yields `None` and the raw
    /// string stays available in `last_seen`.
    pub fn last_seen_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.last_seen.as_deref()?.trim();

        if let Ok(secs) = raw.parse::<i64>() {
            return DateTime::from_timestamp(secs, 0);
        }

        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }

    /// Case-insensitive MAC comparison
    pub fn has_mac(&self, mac: &str) -> bool {
        self.mac
            .as_deref()
            .is_some_and(|own| own.eq_ignore_ascii_case(mac.trim()))
    }
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Device[ID: {}, MAC: {}, IP: {}]",
            self.id,
            self.mac.as_deref().unwrap_or("-"),
            self.ip.as_deref().unwrap_or("-")
        )
    }
}
