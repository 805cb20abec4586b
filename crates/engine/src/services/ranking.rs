use rust_decimal::Decimal;

use crate::models::RankedResult;

/// Category comparison rule: clock events want the lowest value, field and
/// combined events want the highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreOrder {
    LowerWins,
    HigherWins,
}

/// Input line for the ranking engine, in registration (or seed) order.
#[derive(Debug, Clone)]
pub struct ScoredEntrant {
    pub bib: u32,
    pub name: String,
    pub affiliation: String,
    pub value: Option<Decimal>,
    pub display: String,
}

pub const fn award_points(rank: u32) -> u32 {
    match rank {
        1 => 5,
        2 => 3,
        3 => 1,
        _ => 0,
    }
}

/// Orders entrants by the category rule and assigns standard competition
/// ranks: exact ties share a rank, the next distinct value takes its
/// positional rank (two tied for 2nd -> 2, 2, 4). Entrants without a valid
/// value keep their input order below every valid mark and never score.
pub fn rank_entries(entries: Vec<ScoredEntrant>, order: ScoreOrder) -> Vec<RankedResult> {
    let mut valid: Vec<ScoredEntrant> = Vec::new();
    let mut no_mark: Vec<ScoredEntrant> = Vec::new();
    for entry in entries {
        if entry.value.is_some() {
            valid.push(entry);
        } else {
            no_mark.push(entry);
        }
    }

    // Stable sort keeps input order among exact ties.
    valid.sort_by(|a, b| match order {
        ScoreOrder::LowerWins => a.value.cmp(&b.value),
        ScoreOrder::HigherWins => b.value.cmp(&a.value),
    });

    let mut results = Vec::with_capacity(valid.len() + no_mark.len());
    let mut prev_value: Option<Decimal> = None;
    let mut prev_rank = 0u32;
    for (position, entry) in valid.into_iter().enumerate() {
        let rank = if entry.value == prev_value {
            prev_rank
        } else {
            (position + 1) as u32
        };
        prev_value = entry.value;
        prev_rank = rank;
        results.push(RankedResult {
            bib: entry.bib,
            name: entry.name,
            affiliation: entry.affiliation,
            value: entry.value,
            display: entry.display,
            rank,
            points: award_points(rank),
        });
    }

    let offset = results.len();
    for (position, entry) in no_mark.into_iter().enumerate() {
        results.push(RankedResult {
            bib: entry.bib,
            name: entry.name,
            affiliation: entry.affiliation,
            value: None,
            display: entry.display,
            rank: (offset + position + 1) as u32,
            points: 0,
        });
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entrant(bib: u32, value: Option<Decimal>) -> ScoredEntrant {
        ScoredEntrant {
            bib,
            name: format!("Athlete {}", bib),
            affiliation: "COL".to_string(),
            value,
            display: value.map(|v| v.to_string()).unwrap_or_else(|| "NM".to_string()),
        }
    }

    #[test]
    fn test_track_lower_value_wins() {
        let results = rank_entries(
            vec![
                entrant(1, Some(Decimal::new(1080, 2))),
                entrant(2, Some(Decimal::new(1050, 2))),
            ],
            ScoreOrder::LowerWins,
        );
        assert_eq!(results[0].bib, 2);
        assert_eq!(results[0].rank, 1);
        assert_eq!(results[1].bib, 1);
        assert_eq!(results[1].rank, 2);
    }

    #[test]
    fn test_field_higher_value_wins() {
        let results = rank_entries(
            vec![
                entrant(1, Some(Decimal::new(710, 2))),
                entrant(2, Some(Decimal::new(745, 2))),
            ],
            ScoreOrder::HigherWins,
        );
        assert_eq!(results[0].bib, 2);
        assert_eq!(results[0].rank, 1);
    }

    #[test]
    fn test_standard_competition_ranking_on_ties() {
        let results = rank_entries(
            vec![
                entrant(1, Some(Decimal::new(1050, 2))),
                entrant(2, Some(Decimal::new(1080, 2))),
                entrant(3, Some(Decimal::new(1080, 2))),
                entrant(4, Some(Decimal::new(1100, 2))),
            ],
            ScoreOrder::LowerWins,
        );
        let ranks: Vec<u32> = results.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 2, 4]);
        // Tied entrants keep input order.
        assert_eq!(results[1].bib, 2);
        assert_eq!(results[2].bib, 3);
    }

    #[test]
    fn test_exact_tie_at_the_top_awards_gold_to_each() {
        let results = rank_entries(
            vec![
                entrant(1, Some(Decimal::new(1050, 2))),
                entrant(2, Some(Decimal::new(1050, 2))),
                entrant(3, Some(Decimal::new(1100, 2))),
            ],
            ScoreOrder::LowerWins,
        );
        assert_eq!(results[0].points, 5);
        assert_eq!(results[1].points, 5);
        assert_eq!(results[2].rank, 3);
        assert_eq!(results[2].points, 1);
    }

    #[test]
    fn test_no_mark_ranks_below_valid_in_input_order() {
        let results = rank_entries(
            vec![
                entrant(1, None),
                entrant(2, Some(Decimal::new(650, 2))),
                entrant(3, None),
            ],
            ScoreOrder::HigherWins,
        );
        assert_eq!(results[0].bib, 2);
        assert_eq!(results[1].bib, 1);
        assert_eq!(results[1].rank, 2);
        assert_eq!(results[1].points, 0);
        assert_eq!(results[2].bib, 3);
        assert_eq!(results[2].rank, 3);
        assert_eq!(results[2].points, 0);
    }

    #[test]
    fn test_award_points_table() {
        assert_eq!(award_points(1), 5);
        assert_eq!(award_points(2), 3);
        assert_eq!(award_points(3), 1);
        assert_eq!(award_points(4), 0);
    }
}
