use rust_decimal::Decimal;

use crate::dto::stage::{EntrantEntry, PerformanceRow};
use crate::error::{EngineError, Result};
use crate::models::{AttendanceStatus, CallRoomRow, EventCategory, EventSheet, Gender, SheetRow};
use crate::services::performance;
use crate::services::ranking::ScoreOrder;

use super::CategoryStrategy;

/// Runners per relay team; with 8 lanes this derives the 2-teams-per-heat
/// grouping.
pub const TEAM_SIZE: usize = 4;

pub struct RelayStrategy;

impl CategoryStrategy for RelayStrategy {
    fn category(&self) -> EventCategory {
        EventCategory::Relay
    }

    fn score_order(&self) -> ScoreOrder {
        ScoreOrder::LowerWins
    }

    fn heat_size(&self) -> usize {
        8 / TEAM_SIZE
    }

    fn default_advance_count(&self) -> Option<usize> {
        Some(8)
    }

    fn no_mark_label(&self) -> &'static str {
        "DNF"
    }

    fn validate_entry(&self, entry: &EntrantEntry) -> Result<()> {
        if entry.members.len() != TEAM_SIZE {
            return Err(EngineError::Validation(format!(
                "Relay team {} must have exactly {} runners, got {}",
                entry.bib,
                TEAM_SIZE,
                entry.members.len()
            )));
        }
        Ok(())
    }

    fn parse_row(&self, row: &PerformanceRow) -> Result<Option<Decimal>> {
        let [mark] = row.marks.as_slice() else {
            return Err(EngineError::Validation(format!(
                "Relay rows take exactly one team clock value, bib {} sent {}",
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
        let rows = roster
            .iter()
            .filter(|row| row.entrant.status == AttendanceStatus::Present)
            .map(|row| SheetRow {
                sl: row.sl,
                bib: row.entrant.bib,
                name: row.entrant.name.clone(),
                affiliation: row.entrant.affiliation.clone(),
                cells: vec![row.entrant.members.join(", "), String::new()],
            })
            .collect();
        vec![EventSheet {
            title: event_name.to_string(),
            day: None,
            columns: vec![
                "SL".to_string(),
                "Bib".to_string(),
                "Team".to_string(),
                "College".to_string(),
                "Runners".to_string(),
                "Time".to_string(),
            ],
            rows,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(members: usize) -> EntrantEntry {
        EntrantEntry {
            bib: 4,
            name: "Team A".to_string(),
            affiliation: "COL".to_string(),
            members: (0..members).map(|i| format!("Runner {}", i + 1)).collect(),
        }
    }

    #[test]
    fn test_relay_team_requires_four_runners() {
        let strategy = RelayStrategy;
        assert!(strategy.validate_entry(&team(4)).is_ok());
        assert!(strategy.validate_entry(&team(3)).is_err());
        assert!(strategy.validate_entry(&team(5)).is_err());
    }

    #[test]
    fn test_two_teams_per_heat() {
        assert_eq!(RelayStrategy.heat_size(), 2);
    }

    #[test]
    fn test_relay_sheet_lists_runners() {
        let roster = vec![CallRoomRow {
            sl: 1,
            entrant: crate::models::Entrant {
                bib: 4,
                name: "Team A".to_string(),
                affiliation: "COL".to_string(),
                members: vec!["P1".into(), "P2".into(), "P3".into(), "P4".into()],
                status: AttendanceStatus::Present,
            },
        }];
        let sheets = RelayStrategy.sheets("4x100m Relay", &roster, Gender::Female);
        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].rows[0].cells[0], "P1, P2, P3, P4");
    }
}
