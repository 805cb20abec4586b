use rust_decimal::Decimal;

use crate::dto::stage::{EntrantEntry, PerformanceRow};
use crate::error::{EngineError, Result};
use crate::models::{CallRoomRow, EventCategory, EventSheet, Gender};
use crate::services::performance;
use crate::services::ranking::ScoreOrder;

use super::{CategoryStrategy, present_rows};

/// Decathlon: 10 sub-events over 2 days of 5.
const DECATHLON_DAY1: [&str; 5] = ["100m", "Long Jump", "Shot Put", "High Jump", "400m"];
const DECATHLON_DAY2: [&str; 5] = [
    "110m Hurdles",
    "Discus Throw",
    "Pole Vault",
    "Javelin Throw",
    "1500m",
];

/// Heptathlon: 7 sub-events over 2 days of 4 + 3.
const HEPTATHLON_DAY1: [&str; 4] = ["100m Hurdles", "High Jump", "Shot Put", "200m"];
const HEPTATHLON_DAY2: [&str; 3] = ["Long Jump", "Javelin Throw", "800m"];

pub struct CombinedStrategy;

impl CombinedStrategy {
    fn day_events(gender: Gender, day: u8) -> &'static [&'static str] {
        match (gender, day) {
            (Gender::Male, 1) => &DECATHLON_DAY1,
            (Gender::Male, _) => &DECATHLON_DAY2,
            (Gender::Female, 1) => &HEPTATHLON_DAY1,
            (Gender::Female, _) => &HEPTATHLON_DAY2,
        }
    }

    fn discipline_name(gender: Gender) -> &'static str {
        match gender {
            Gender::Male => "Decathlon",
            Gender::Female => "Heptathlon",
        }
    }
}

impl CategoryStrategy for CombinedStrategy {
    fn category(&self) -> EventCategory {
        EventCategory::Combined
    }

    fn score_order(&self) -> ScoreOrder {
        ScoreOrder::HigherWins
    }

    fn heat_size(&self) -> usize {
        8
    }

    /// Combined events carry everyone through to the final tally.
    fn default_advance_count(&self) -> Option<usize> {
        None
    }

    fn no_mark_label(&self) -> &'static str {
        "DNF"
    }

    fn validate_entry(&self, entry: &EntrantEntry) -> Result<()> {
        if !entry.members.is_empty() {
            return Err(EngineError::Validation(format!(
                "Combined entries are individual; bib {} carries {} team members",
                entry.bib,
                entry.members.len()
            )));
        }
        Ok(())
    }

    fn parse_row(&self, row: &PerformanceRow) -> Result<Option<Decimal>> {
        let [mark] = row.marks.as_slice() else {
            return Err(EngineError::Validation(format!(
                "Combined rows take exactly one points total, bib {} sent {}",
                row.bib,
                row.marks.len()
            )));
        };
        performance::parse_points(mark).map(Some)
    }

    fn format_value(&self, value: Decimal) -> String {
        performance::format_points(value)
    }

    fn sheets(&self, event_name: &str, roster: &[CallRoomRow], gender: Gender) -> Vec<EventSheet> {
        [1u8, 2]
            .into_iter()
            .map(|day| {
                let events = Self::day_events(gender, day);
                let mut columns = vec![
                    "SL".to_string(),
                    "Bib".to_string(),
                    "Name".to_string(),
                    "College".to_string(),
                ];
                columns.extend(events.iter().map(|e| e.to_string()));
                columns.push("Day Total".to_string());
                EventSheet {
                    title: format!(
                        "{} ({}) - Day {}",
                        event_name,
                        Self::discipline_name(gender),
                        day
                    ),
                    day: Some(day),
                    columns,
                    rows: present_rows(roster, events.len() + 1),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decathlon_splits_ten_events_five_per_day() {
        let sheets = CombinedStrategy.sheets("Men's Combined", &[], Gender::Male);
        assert_eq!(sheets.len(), 2);
        // 4 identity columns + sub-events + day total.
        assert_eq!(sheets[0].columns.len(), 4 + 5 + 1);
        assert_eq!(sheets[1].columns.len(), 4 + 5 + 1);
        assert!(sheets[0].title.contains("Decathlon"));
    }

    #[test]
    fn test_heptathlon_splits_seven_events_four_plus_three() {
        let sheets = CombinedStrategy.sheets("Women's Combined", &[], Gender::Female);
        assert_eq!(sheets[0].columns.len(), 4 + 4 + 1);
        assert_eq!(sheets[1].columns.len(), 4 + 3 + 1);
        assert_eq!(sheets[0].day, Some(1));
        assert_eq!(sheets[1].day, Some(2));
    }

    #[test]
    fn test_combined_scores_are_integer_points() {
        let row = PerformanceRow {
            bib: 1,
            marks: vec!["7450".to_string()],
        };
        assert_eq!(
            CombinedStrategy.parse_row(&row).unwrap(),
            Some(Decimal::from(7450u32))
        );
        let bad = PerformanceRow {
            bib: 1,
            marks: vec!["10.5".to_string()],
        };
        assert!(CombinedStrategy.parse_row(&bad).is_err());
    }
}
