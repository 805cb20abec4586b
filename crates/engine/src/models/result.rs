use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One ranked line of a scored round. `value` is `None` when the entrant has
/// no comparable performance (absent, disqualified, or all attempts fouled);
/// such lines always rank below every valid mark and never score points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RankedResult {
    pub bib: u32,
    pub name: String,
    pub affiliation: String,
    pub value: Option<Decimal>,
    pub display: String,
    pub rank: u32,
    pub points: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Announcement {
    pub announced_at: NaiveDateTime,
    pub results: Vec<RankedResult>,
    /// Point-scoring lines (ranks 1-3), in rank order.
    pub podium: Vec<RankedResult>,
}
