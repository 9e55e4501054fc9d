//! Status query results

use serde::{Deserialize, Serialize};

use crate::device_info::DeviceInfo;

/// Aggregate returned by `GET /status`
///
/// The counters are reported independently by the service. No
/// relationship between them (e.g. `sync_count + not_sync_count ==
/// info_count`) is assumed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub bind_count: u64,
    pub info_count: u64,
    pub sync_count: u64,
    #[serde(rename = "notsync_count")]
    pub not_sync_count: u64,
    /// Entries in server order
    pub infos: Vec<DeviceInfo>,
}

impl StatusSnapshot {
    pub fn find_by_mac(&self, mac: &str) -> Option<&DeviceInfo> {
        self.infos.iter().find(|info| info.has_mac(mac))
    }

    /// Entries whose sync flag is explicitly false
    pub fn unsynced(&self) -> impl Iterator<Item = &DeviceInfo> {
        self.infos.iter().filter(|info| info.synced == Some(false))
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }
}

/// Error body returned instead of data when an operation fails
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    pub msg: String,
}
