use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Track,
    Relay,
    Jump,
    Throw,
    Combined,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Track => "track",
            Self::Relay => "relay",
            Self::Jump => "jump",
            Self::Throw => "throw",
            Self::Combined => "combined",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

/// The 13 ordered stages of an event's lifecycle. A locked event has passed
/// `VerifyAndLock` and accepts no further transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    EventCreation,
    CallRoomGeneration,
    CallRoomCompletion,
    SheetGeneration,
    Round1Scoring,
    TopSelection,
    HeatsGeneration,
    HeatsScoring,
    PreFinalSheet,
    FinalScoring,
    FinalAnnouncement,
    NameCorrection,
    VerifyAndLock,
}

impl Stage {
    pub fn number(&self) -> u8 {
        match self {
            Self::EventCreation => 1,
            Self::CallRoomGeneration => 2,
            Self::CallRoomCompletion => 3,
            Self::SheetGeneration => 4,
            Self::Round1Scoring => 5,
            Self::TopSelection => 6,
            Self::HeatsGeneration => 7,
            Self::HeatsScoring => 8,
            Self::PreFinalSheet => 9,
            Self::FinalScoring => 10,
            Self::FinalAnnouncement => 11,
            Self::NameCorrection => 12,
            Self::VerifyAndLock => 13,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::EventCreation => "Event Creation",
            Self::CallRoomGeneration => "Call Room Generation",
            Self::CallRoomCompletion => "Call Room Completion",
            Self::SheetGeneration => "Generate Event Sheets",
            Self::Round1Scoring => "Round 1 Scoring",
            Self::TopSelection => "Top Selection",
            Self::HeatsGeneration => "Heats Generation",
            Self::HeatsScoring => "Heats Scoring",
            Self::PreFinalSheet => "Pre-Final Sheet",
            Self::FinalScoring => "Final Scoring",
            Self::FinalAnnouncement => "Final Announcement",
            Self::NameCorrection => "Name Correction",
            Self::VerifyAndLock => "Verify & Lock",
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::EventCreation),
            2 => Some(Self::CallRoomGeneration),
            3 => Some(Self::CallRoomCompletion),
            4 => Some(Self::SheetGeneration),
            5 => Some(Self::Round1Scoring),
            6 => Some(Self::TopSelection),
            7 => Some(Self::HeatsGeneration),
            8 => Some(Self::HeatsScoring),
            9 => Some(Self::PreFinalSheet),
            10 => Some(Self::FinalScoring),
            11 => Some(Self::FinalAnnouncement),
            12 => Some(Self::NameCorrection),
            13 => Some(Self::VerifyAndLock),
            _ => None,
        }
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn prev(&self) -> Option<Self> {
        Self::from_number(self.number().checked_sub(1)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Event {
    pub event_id: Uuid,
    pub name: String,
    pub category: EventCategory,
    pub gender: Gender,
    pub date: NaiveDate,
    pub venue: String,
    pub stage: Stage,
    pub locked: bool,
    /// Whether this event's award points count toward championship standings.
    pub points_eligible: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
