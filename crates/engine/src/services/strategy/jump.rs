use rust_decimal::Decimal;

use crate::dto::stage::{EntrantEntry, PerformanceRow};
use crate::error::{EngineError, Result};
use crate::models::{CallRoomRow, EventCategory, EventSheet, Gender};
use crate::services::performance;
use crate::services::ranking::ScoreOrder;

use super::{CategoryStrategy, present_rows};

pub struct JumpStrategy;

impl CategoryStrategy for JumpStrategy {
    fn category(&self) -> EventCategory {
        EventCategory::Jump
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
                "Jump entries are individual; bib {} carries {} team members",
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
    fn test_jump_takes_best_of_attempts() {
        let strategy = JumpStrategy;
        let row = PerformanceRow {
            bib: 9,
            marks: vec!["6.90".into(), "F".into(), "7.45".into()],
        };
        assert_eq!(strategy.parse_row(&row).unwrap(), Some(Decimal::new(745, 2)));
    }

    #[test]
    fn test_jump_six_fouls_is_no_mark_not_zero() {
        let strategy = JumpStrategy;
        let row = PerformanceRow {
            bib: 9,
            marks: vec!["F".to_string(); 6],
        };
        assert_eq!(strategy.parse_row(&row).unwrap(), None);
    }

    #[test]
    fn test_jump_sheet_has_six_attempt_columns() {
        let sheets = JumpStrategy.sheets("Long Jump", &[], Gender::Male);
        let attempt_cols = sheets[0].columns.iter().filter(|c| c.starts_with('A')).count();
        assert_eq!(attempt_cols, 6);
    }
}
