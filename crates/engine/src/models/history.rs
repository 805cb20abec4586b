use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Stage;

/// Append-only audit record, one per successful transition. Reverts append a
/// new entry flagged `reverted` rather than rewriting the log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageHistoryEntry {
    pub stage: Stage,
    pub recorded_at: NaiveDateTime,
    pub reverted: bool,
    /// Snapshot of the operation payload that drove the transition.
    pub input: serde_json::Value,
}
