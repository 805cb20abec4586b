use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{
    Announcement, AttendanceStatus, CallRoomRow, EventSheet, HeatGroup, RankedResult, Stage,
};

/// One participant (or relay team) entering the call room at stage 2.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct EntrantEntry {
    #[validate(range(min = 1, message = "Bib number must be >= 1"))]
    pub bib: u32,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(length(
        min = 1,
        max = 64,
        message = "Affiliation must be between 1 and 64 characters"
    ))]
    pub affiliation: String,

    /// Runner names for relay teams; must be empty for individual events.
    #[serde(default)]
    pub members: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttendanceMark {
    pub bib: u32,
    pub status: AttendanceStatus,
}

/// Raw performance input for one entrant: a single clock string for
/// track/relay, up to six attempt marks for jump/throw, a single integer
/// points total for combined.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PerformanceRow {
    pub bib: u32,
    pub marks: Vec<String>,
}

/// A per-row rejection reported back to the caller; the remaining rows of the
/// batch are still applied.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RowRejection {
    pub bib: u32,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct NameCorrection {
    pub bib: u32,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Corrected name must be between 1 and 255 characters"
    ))]
    pub name: String,
}

/// Committee sign-off payload for stage 13.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct VerificationRequest {
    #[validate(length(min = 1, message = "Verifier is required"))]
    pub verified_by: String,

    #[serde(default)]
    pub remarks: Option<String>,
}

/// One stage operation, tagged the way the external caller submits it.
/// Each variant drives exactly one stage transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StageOperation {
    GenerateCallRoom { participants: Vec<EntrantEntry> },
    CompleteCallRoom { marks: Vec<AttendanceMark> },
    GenerateSheets,
    ScoreRound1 { rows: Vec<PerformanceRow> },
    SelectTop { count: Option<usize> },
    GenerateHeats,
    ScoreHeats { rows: Vec<PerformanceRow> },
    BuildPreFinal,
    ScoreFinal { rows: Vec<PerformanceRow> },
    Announce,
    CorrectNames { corrections: Vec<NameCorrection> },
    VerifyAndLock { verification: VerificationRequest },
}

impl StageOperation {
    /// The stage this operation transitions the event into.
    pub fn stage(&self) -> Stage {
        match self {
            Self::GenerateCallRoom { .. } => Stage::CallRoomGeneration,
            Self::CompleteCallRoom { .. } => Stage::CallRoomCompletion,
            Self::GenerateSheets => Stage::SheetGeneration,
            Self::ScoreRound1 { .. } => Stage::Round1Scoring,
            Self::SelectTop { .. } => Stage::TopSelection,
            Self::GenerateHeats => Stage::HeatsGeneration,
            Self::ScoreHeats { .. } => Stage::HeatsScoring,
            Self::BuildPreFinal => Stage::PreFinalSheet,
            Self::ScoreFinal { .. } => Stage::FinalScoring,
            Self::Announce => Stage::FinalAnnouncement,
            Self::CorrectNames { .. } => Stage::NameCorrection,
            Self::VerifyAndLock { .. } => Stage::VerifyAndLock,
        }
    }
}

/// Stage-specific payload of a successful transition, serialized flat into
/// the caller's response envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum StageOutcome {
    CallRoom {
        call_room: Vec<CallRoomRow>,
    },
    Attendance {
        call_room: Vec<CallRoomRow>,
        marked: usize,
    },
    Sheets {
        sheets: Vec<EventSheet>,
    },
    Scores {
        results: Vec<RankedResult>,
        rejected: Vec<RowRejection>,
    },
    Selection {
        selected: Vec<RankedResult>,
    },
    Heats {
        heats: Vec<HeatGroup>,
    },
    PreFinal {
        start_list: HeatGroup,
    },
    Announced {
        announcement: Announcement,
    },
    Corrected {
        corrected: usize,
    },
    Locked {
        locked_at: chrono::NaiveDateTime,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_payload_round_trips_through_json() {
        let op = StageOperation::ScoreRound1 {
            rows: vec![PerformanceRow {
                bib: 12,
                marks: vec!["00:00:10:50".to_string()],
            }],
        };
        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(value["op"], "score_round1");
        let back: StageOperation = serde_json::from_value(value).unwrap();
        assert_eq!(back.stage(), Stage::Round1Scoring);
    }

    #[test]
    fn test_each_operation_targets_its_stage_number() {
        assert_eq!(StageOperation::GenerateSheets.stage().number(), 4);
        assert_eq!(StageOperation::Announce.stage().number(), 11);
        let lock = StageOperation::VerifyAndLock {
            verification: VerificationRequest {
                verified_by: "Committee".to_string(),
                remarks: None,
            },
        };
        assert_eq!(lock.stage().number(), 13);
    }
}
