use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Disqualified,
}

impl AttendanceStatus {
    /// Result-sheet label for an entrant who never produced a mark.
    pub fn no_mark_label(&self) -> &'static str {
        match self {
            Self::Present => "DNS",
            Self::Absent => "DNS",
            Self::Disqualified => "DQ",
        }
    }
}

/// One competing unit: an individual athlete, or for relay events a team of
/// exactly four runners sharing one bib, one affiliation and one time.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Entrant {
    pub bib: u32,
    pub name: String,
    pub affiliation: String,
    #[serde(default)]
    pub members: Vec<String>,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CallRoomRow {
    pub sl: u32,
    pub entrant: Entrant,
}
