use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SheetRow {
    pub sl: u32,
    pub bib: u32,
    pub name: String,
    pub affiliation: String,
    /// One cell per mark column, blank until officials fill them in.
    pub cells: Vec<String>,
}

/// A printable scoring sheet. Combined events produce one sheet per day with
/// that day's sub-event columns; every other category produces a single sheet.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventSheet {
    pub title: String,
    pub day: Option<u8>,
    pub columns: Vec<String>,
    pub rows: Vec<SheetRow>,
}
