use rust_decimal::Decimal;

use crate::dto::stage::{EntrantEntry, PerformanceRow};
use crate::error::Result;
use crate::models::{CallRoomRow, EventCategory, EventSheet, Gender, SheetRow};

use super::ranking::ScoreOrder;

mod combined;
mod jump;
mod relay;
mod throw;
mod track;

pub use combined::CombinedStrategy;
pub use jump::JumpStrategy;
pub use relay::RelayStrategy;
pub use throw::ThrowStrategy;
pub use track::TrackStrategy;

/// Category-specific behavior, dispatched once at event creation and held
/// for the event's lifetime. The lifecycle controller drives every stage
/// through this seam instead of branching on the category name.
pub trait CategoryStrategy: Send + Sync {
    fn category(&self) -> EventCategory;

    fn score_order(&self) -> ScoreOrder;

    /// Target units per heat: 8 individuals, 2 relay teams (8 lanes over
    /// 4-runner teams).
    fn heat_size(&self) -> usize;

    /// How many ranked units advance past round 1 when the caller does not
    /// say; `None` means everyone advances (combined events).
    fn default_advance_count(&self) -> Option<usize>;

    /// Label for a round entry that produced no comparable value.
    fn no_mark_label(&self) -> &'static str;

    /// Entry-shape rules for the call room (relay teams carry exactly four
    /// runners, individuals carry none).
    fn validate_entry(&self, entry: &EntrantEntry) -> Result<()>;

    /// Parses one performance row into a comparable value; `None` is a
    /// valid "no mark" outcome (all attempts fouled), an `Err` rejects the
    /// row.
    fn parse_row(&self, row: &PerformanceRow) -> Result<Option<Decimal>>;

    /// Canonical display string for a comparable value.
    fn format_value(&self, value: Decimal) -> String;

    /// Stage-4 scoring sheets for the present roster.
    fn sheets(&self, event_name: &str, roster: &[CallRoomRow], gender: Gender) -> Vec<EventSheet>;
}

pub fn strategy_for(category: EventCategory) -> &'static dyn CategoryStrategy {
    match category {
        EventCategory::Track => &TrackStrategy,
        EventCategory::Relay => &RelayStrategy,
        EventCategory::Jump => &JumpStrategy,
        EventCategory::Throw => &ThrowStrategy,
        EventCategory::Combined => &CombinedStrategy,
    }
}

/// Present entrants as sheet rows with `blank_cells` empty mark cells each.
pub(crate) fn present_rows(roster: &[CallRoomRow], blank_cells: usize) -> Vec<SheetRow> {
    roster
        .iter()
        .filter(|row| row.entrant.status == crate::models::AttendanceStatus::Present)
        .map(|row| SheetRow {
            sl: row.sl,
            bib: row.entrant.bib,
            name: row.entrant.name.clone(),
            affiliation: row.entrant.affiliation.clone(),
            cells: vec![String::new(); blank_cells],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_resolves_a_strategy() {
        for category in [
            EventCategory::Track,
            EventCategory::Relay,
            EventCategory::Jump,
            EventCategory::Throw,
            EventCategory::Combined,
        ] {
            assert_eq!(strategy_for(category).category(), category);
        }
    }

    #[test]
    fn test_heat_sizes_per_category() {
        assert_eq!(strategy_for(EventCategory::Track).heat_size(), 8);
        assert_eq!(strategy_for(EventCategory::Relay).heat_size(), 2);
        assert_eq!(strategy_for(EventCategory::Jump).heat_size(), 8);
    }

    #[test]
    fn test_advance_defaults() {
        assert_eq!(
            strategy_for(EventCategory::Throw).default_advance_count(),
            Some(8)
        );
        assert_eq!(
            strategy_for(EventCategory::Combined).default_advance_count(),
            None
        );
    }
}
