use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChampionshipStandingRow {
    pub affiliation: String,
    pub total_points: u32,
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    pub rank: u32,
}
