//! Sync Job Models
//!
//! Transient view of an asynchronous background job tracked by id. Nothing
//! here is persisted by this crate; the poller only needs the status and the
//! last error.

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Job execution state as seen by the poller
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Not finished yet. Remote `queued`/`running` and anything
    /// unrecognized land here so polling keeps going.
    #[default]
    Pending,
    /// Finished successfully; terminal
    Done,
    /// Finished with an error; terminal
    Failed,
}

impl JobStatus {
    /// Get the string form
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    /// Lenient parse: legacy queue vocabularies and unknown strings map to
    /// `Pending`
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "done" => Self::Done,
            "failed" => Self::Failed,
            _ => Self::Pending,
        }
    }

    /// Whether polling should stop
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl<'de> Deserialize<'de> for JobStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(value.as_str().map(Self::from_str).unwrap_or_default())
    }
}

/// One background job as reported by the job endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Job {
    pub id: i64,
    /// Job kind tag (e.g. "sync_shop"); informational only
    #[serde(rename = "type", default)]
    pub job_type: String,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub last_error: Option<String>,
}
