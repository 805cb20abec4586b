use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HeatSlot {
    pub lane: u32,
    /// 1-based seed position within the heat, the input to lane mapping.
    pub seed: u32,
    pub bib: u32,
    pub name: String,
    pub affiliation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HeatGroup {
    pub heat_no: u32,
    pub slots: Vec<HeatSlot>,
}
