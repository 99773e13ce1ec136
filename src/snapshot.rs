use serde::{Deserialize, Serialize};

use crate::error::{Result, TaprError};

pub const SNAPSHOT_VERSION: u32 = 1;

fn current_version() -> u32 {
    SNAPSHOT_VERSION
}

/// Serialized session counters, used to carry a session across screen
/// re-creation. Absent fields stay `None` and are defaulted on restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default = "current_version")]
    pub version: u32,
    /// Number of taps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Start of the most recent running interval, epoch milliseconds
    #[serde(rename = "initTime", default, skip_serializing_if = "Option::is_none")]
    pub init_time: Option<i64>,
    /// Last displayed elapsed time, seconds
    #[serde(rename = "currTime", default, skip_serializing_if = "Option::is_none")]
    pub curr_time: Option<f64>,
    /// Running time accrued before the current interval, milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            count: None,
            init_time: None,
            curr_time: None,
            offset: None,
        }
    }
}

impl SessionSnapshot {
    pub fn count_or_default(&self) -> u32 {
        self.count.unwrap_or(0)
    }

    pub fn init_time_or(&self, now_ms: i64) -> i64 {
        self.init_time.unwrap_or(now_ms)
    }

    pub fn curr_time_or_default(&self) -> f64 {
        self.curr_time.unwrap_or(0.0)
    }

    pub fn offset_or_default(&self) -> i64 {
        self.offset.unwrap_or(0)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(TaprError::Snapshot)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(data).map_err(TaprError::Snapshot)?;
        if snapshot.version > SNAPSHOT_VERSION {
            return Err(TaprError::UnsupportedSnapshot {
                found: snapshot.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(snapshot)
    }
}
