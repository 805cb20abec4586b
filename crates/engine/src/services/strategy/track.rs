use rust_decimal::Decimal;

use crate::dto::stage::{EntrantEntry, PerformanceRow};
use crate::error::{EngineError, Result};
use crate::models::{CallRoomRow, EventCategory, EventSheet, Gender};
use crate::services::performance;
use crate::services::ranking::ScoreOrder;

use super::{CategoryStrategy, present_rows};

pub struct TrackStrategy;

impl CategoryStrategy for TrackStrategy {
    fn category(&self) -> EventCategory {
        EventCategory::Track
    }

    fn score_order(&self) -> ScoreOrder {
        ScoreOrder::LowerWins
    }

    fn heat_size(&self) -> usize {
        8
    }

    fn default_advance_count(&self) -> Option<usize> {
        Some(8)
    }

    fn no_mark_label(&self) -> &'static str {
        "DNF"
    }

    fn validate_entry(&self, entry: &EntrantEntry) -> Result<()> {
        if !entry.members.is_empty() {
            return Err(EngineError::Validation(format!(
                "Track entries are individual; bib {} carries {} team members",
                entry.bib,
                entry.members.len()
            )));
        }
        Ok(())
    }

    fn parse_row(&self, row: &PerformanceRow) -> Result<Option<Decimal>> {
        let [mark] = row.marks.as_slice() else {
            return Err(EngineError::Validation(format!(
                "Track rows take exactly one clock value, bib {} sent {}",
                row.bib,
                row.marks.len()
            )));
        };
        performance::parse_clock(mark).map(Some)
    }

    fn format_value(&self, value: Decimal) -> String {
        performance::format_clock(value)
    }

    fn sheets(&self, event_name: &str, roster: &[CallRoomRow], _gender: Gender) -> Vec<EventSheet> {
        vec![EventSheet {
            title: event_name.to_string(),
            day: None,
            columns: vec![
                "SL".to_string(),
                "Bib".to_string(),
                "Name".to_string(),
                "College".to_string(),
                "Time".to_string(),
            ],
            rows: present_rows(roster, 1),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_row_takes_exactly_one_clock_value() {
        let strategy = TrackStrategy;
        let row = PerformanceRow {
            bib: 7,
            marks: vec!["00:00:10:50".to_string()],
        };
        assert_eq!(
            strategy.parse_row(&row).unwrap(),
            Some(Decimal::new(1050, 2))
        );

        let empty = PerformanceRow {
            bib: 7,
            marks: vec![],
        };
        assert!(strategy.parse_row(&empty).is_err());
    }

    #[test]
    fn test_track_entry_must_be_individual() {
        let strategy = TrackStrategy;
        let entry = EntrantEntry {
            bib: 1,
            name: "Runner".to_string(),
            affiliation: "COL".to_string(),
            members: vec!["Extra".to_string()],
        };
        assert!(strategy.validate_entry(&entry).is_err());
    }
}
