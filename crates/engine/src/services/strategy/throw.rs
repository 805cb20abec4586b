use rust_decimal::Decimal;

use crate::dto::stage::{EntrantEntry, PerformanceRow};
use crate::error::{EngineError, Result};
use crate::models::{CallRoomRow, EventCategory, EventSheet, Gender};
use crate::services::performance;
use crate::services::ranking::ScoreOrder;

use super::{CategoryStrategy, present_rows};

pub struct ThrowStrategy;

impl CategoryStrategy for ThrowStrategy {
    fn category(&self) -> EventCategory {
        EventCategory::Throw
    }

    fn score_order(&self) -> ScoreOrder {
        ScoreOrder::HigherWins
    }

    fn heat_size(&self) -> usize {
        8
    }

    fn default_advance_count(&self) -> Option<usize> {
        Some(8)
    }

    fn no_mark_label(&self) -> &'static str {
        "NM"
    }

    fn validate_entry(&self, entry: &EntrantEntry) -> Result<()> {
        if !entry.members.is_empty() {
            return Err(EngineError::Validation(format!(
                "Throw entries are individual; bib {} carries {} team members",
                entry.bib,
                entry.members.len()
            )));
        }
        Ok(())
    }

    fn parse_row(&self, row: &PerformanceRow) -> Result<Option<Decimal>> {
        performance::best_attempt(&row.marks)
    }

    fn format_value(&self, value: Decimal) -> String {
        performance::format_distance(value)
    }

    fn sheets(&self, event_name: &str, roster: &[CallRoomRow], _gender: Gender) -> Vec<EventSheet> {
        let mut columns = vec![
            "SL".to_string(),
            "Bib".to_string(),
            "Name".to_string(),
            "College".to_string(),
        ];
        for attempt in 1..=performance::MAX_ATTEMPTS {
            columns.push(format!("A{}", attempt));
        }
        columns.push("Best".to_string());
        vec![EventSheet {
            title: event_name.to_string(),
            day: None,
            columns,
            rows: present_rows(roster, performance::MAX_ATTEMPTS + 1),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throw_higher_distance_wins() {
        assert_eq!(ThrowStrategy.score_order(), ScoreOrder::HigherWins);
    }

    #[test]
    fn test_throw_foul_series_has_no_mark() {
        let row = PerformanceRow {
            bib: 2,
            marks: vec!["X".into(), "x".into(), "F".into()],
        };
        assert_eq!(ThrowStrategy.parse_row(&row).unwrap(), None);
    }
}
