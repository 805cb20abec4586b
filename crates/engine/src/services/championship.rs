use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{ChampionshipStandingRow, Gender, RankedResult};

/// Aggregation policy: event names listed here are stamped
/// `points_eligible = false` at creation time, so aggregation itself never
/// matches on names. Configurable by the caller (e.g. mixed relay and the
/// half-marathon variant score no championship points).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChampionshipPolicy {
    #[serde(default)]
    pub excluded_events: Vec<String>,
}

impl Default for ChampionshipPolicy {
    fn default() -> Self {
        Self {
            excluded_events: vec!["Mixed Relay".to_string(), "Half Marathon".to_string()],
        }
    }
}

impl ChampionshipPolicy {
    pub fn is_eligible(&self, event_name: &str) -> bool {
        !self
            .excluded_events
            .iter()
            .any(|excluded| excluded.eq_ignore_ascii_case(event_name.trim()))
    }
}

/// A locked event's contribution to the standings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalizedEvent {
    pub event_id: Uuid,
    pub name: String,
    pub gender: Gender,
    pub points_eligible: bool,
    pub results: Vec<RankedResult>,
}

#[derive(Default)]
struct Tally {
    points: u32,
    gold: u32,
    silver: u32,
    bronze: u32,
}

/// Rebuilds the full standings table from the finalized results. Total
/// recomputation every call, never an incremental patch, so repeated runs
/// over the same inputs cannot drift. Sort: points desc, then gold, silver,
/// bronze counts desc, then affiliation name asc as the final deterministic
/// tie-break.
pub fn compute_standings(events: &[FinalizedEvent]) -> Vec<ChampionshipStandingRow> {
    let mut tallies: BTreeMap<String, Tally> = BTreeMap::new();

    for event in events.iter().filter(|e| e.points_eligible) {
        for result in &event.results {
            let tally = tallies.entry(result.affiliation.clone()).or_default();
            tally.points += result.points;
            if result.points > 0 {
                match result.rank {
                    1 => tally.gold += 1,
                    2 => tally.silver += 1,
                    3 => tally.bronze += 1,
                    _ => {}
                }
            }
        }
    }

    let mut standings: Vec<ChampionshipStandingRow> = tallies
        .into_iter()
        .map(|(affiliation, tally)| ChampionshipStandingRow {
            affiliation,
            total_points: tally.points,
            gold: tally.gold,
            silver: tally.silver,
            bronze: tally.bronze,
            rank: 0,
        })
        .collect();

    standings.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then(b.gold.cmp(&a.gold))
            .then(b.silver.cmp(&a.silver))
            .then(b.bronze.cmp(&a.bronze))
            .then(a.affiliation.cmp(&b.affiliation))
    });
    for (position, row) in standings.iter_mut().enumerate() {
        row.rank = position as u32 + 1;
    }

    standings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(affiliation: &str, rank: u32, points: u32) -> RankedResult {
        RankedResult {
            bib: rank,
            name: format!("{} athlete", affiliation),
            affiliation: affiliation.to_string(),
            value: None,
            display: String::new(),
            rank,
            points,
        }
    }

    fn event(name: &str, eligible: bool, results: Vec<RankedResult>) -> FinalizedEvent {
        FinalizedEvent {
            event_id: Uuid::new_v4(),
            name: name.to_string(),
            gender: Gender::Male,
            points_eligible: eligible,
            results,
        }
    }

    #[test]
    fn test_points_accumulate_per_affiliation() {
        let events = vec![
            event(
                "100m",
                true,
                vec![result("AAA", 1, 5), result("BBB", 2, 3), result("CCC", 3, 1)],
            ),
            event(
                "200m",
                true,
                vec![result("BBB", 1, 5), result("AAA", 2, 3), result("CCC", 3, 1)],
            ),
        ];
        let standings = compute_standings(&events);
        assert_eq!(standings[0].affiliation, "AAA");
        assert_eq!(standings[0].total_points, 8);
        assert_eq!(standings[1].affiliation, "BBB");
        assert_eq!(standings[1].total_points, 8);
        assert_eq!(standings[2].total_points, 2);
    }

    #[test]
    fn test_tiebreak_gold_then_silver_then_bronze_then_name() {
        // AAA and BBB both on 8 points with one gold and one silver each;
        // the name decides. CCC has equal points but fewer golds.
        let events = vec![
            event("E1", true, vec![result("BBB", 1, 5), result("AAA", 2, 3)]),
            event("E2", true, vec![result("AAA", 1, 5), result("BBB", 2, 3)]),
            event("E3", true, vec![result("CCC", 1, 5)]),
            event("E4", true, vec![result("CCC", 2, 3)]),
        ];
        let standings = compute_standings(&events);
        assert_eq!(standings[0].affiliation, "AAA");
        assert_eq!(standings[1].affiliation, "BBB");
        assert_eq!(standings[2].affiliation, "CCC");
        assert_eq!(standings[2].gold, 1);
    }

    #[test]
    fn test_ineligible_events_score_nothing() {
        let events = vec![
            event("100m", true, vec![result("AAA", 1, 5)]),
            event("Mixed Relay", false, vec![result("BBB", 1, 5)]),
        ];
        let standings = compute_standings(&events);
        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].affiliation, "AAA");
    }

    #[test]
    fn test_recomputation_is_idempotent() {
        let events = vec![event(
            "100m",
            true,
            vec![result("AAA", 1, 5), result("BBB", 2, 3)],
        )];
        assert_eq!(compute_standings(&events), compute_standings(&events));
    }

    #[test]
    fn test_policy_marks_named_events_ineligible() {
        let policy = ChampionshipPolicy::default();
        assert!(!policy.is_eligible("Mixed Relay"));
        assert!(!policy.is_eligible("half marathon"));
        assert!(policy.is_eligible("100m Sprint"));
    }

    #[test]
    fn test_tied_golds_both_count() {
        let events = vec![event(
            "Long Jump",
            true,
            vec![result("AAA", 1, 5), result("BBB", 1, 5), result("CCC", 3, 1)],
        )];
        let standings = compute_standings(&events);
        assert_eq!(standings[0].gold, 1);
        assert_eq!(standings[1].gold, 1);
        assert_eq!(standings[2].bronze, 1);
    }
}
