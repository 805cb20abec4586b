use std::collections::VecDeque;

use tracing::debug;

use crate::models::{HeatGroup, HeatSlot};

/// The canonical IAAF 8-lane draw: seed position (1-based) to lane number.
/// Shared verbatim with the external reporting layer; a bijection over 1..=8.
pub const LANE_ORDER: [u32; 8] = [3, 4, 2, 5, 6, 1, 7, 8];

/// One unit entering the draw, in seed order (rank order after a scored
/// round, registration order before one).
#[derive(Debug, Clone)]
pub struct SeedEntry {
    pub bib: u32,
    pub name: String,
    pub affiliation: String,
}

pub fn lane_for_seat(seat: usize) -> u32 {
    LANE_ORDER.get(seat).copied().unwrap_or(seat as u32 + 1)
}

/// Splits `total` units into group sizes. Full groups of `target`, except
/// that a small tail (remainder below half the target) merges with the last
/// full group and splits into two balanced groups instead of leaving one
/// nearly-empty heat.
pub fn plan_group_sizes(total: usize, target: usize) -> Vec<usize> {
    if total == 0 || target == 0 {
        return Vec::new();
    }

    let full = total / target;
    let remainder = total % target;

    if remainder == 0 {
        return vec![target; full];
    }
    if full == 0 {
        return vec![remainder];
    }

    if remainder < target / 2 {
        let tail = target + remainder;
        let mut sizes = vec![target; full - 1];
        sizes.push(tail - tail / 2);
        sizes.push(tail / 2);
        sizes
    } else {
        let mut sizes = vec![target; full];
        sizes.push(remainder);
        sizes
    }
}

/// Draws entries into heats of at most `target`, avoiding same-affiliation
/// clustering where any alternative placement exists. Entirely
/// deterministic: affiliation buckets are ordered by remaining size (largest
/// first) with first appearance in the input breaking ties, and a bucket is
/// skipped while its next member would collide with the group's existing
/// affiliations, until only colliding buckets remain. Within a heat, seats
/// follow the incoming seed order and lanes come from [`LANE_ORDER`].
pub fn build_heats(entries: &[SeedEntry], target: usize) -> Vec<HeatGroup> {
    let sizes = plan_group_sizes(entries.len(), target);

    let mut buckets: Vec<(String, VecDeque<usize>)> = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        match buckets
            .iter_mut()
            .find(|(affiliation, _)| affiliation == &entry.affiliation)
        {
            Some((_, queue)) => queue.push_back(index),
            None => buckets.push((entry.affiliation.clone(), VecDeque::from([index]))),
        }
    }
    debug!(
        entries = entries.len(),
        affiliations = buckets.len(),
        heats = sizes.len(),
        "drawing heats"
    );

    let mut heats = Vec::with_capacity(sizes.len());
    for (heat_index, size) in sizes.into_iter().enumerate() {
        let mut picked: Vec<usize> = Vec::with_capacity(size);
        let mut taken: Vec<String> = Vec::with_capacity(size);
        for _ in 0..size {
            let Some(bucket) = next_bucket(&buckets, &taken) else {
                break;
            };
            if let Some(index) = buckets[bucket].1.pop_front() {
                taken.push(buckets[bucket].0.clone());
                picked.push(index);
            }
        }

        // Seat order within the heat is the incoming seed order.
        picked.sort_unstable();
        let slots = picked
            .iter()
            .enumerate()
            .map(|(seat, &index)| {
                let entry = &entries[index];
                HeatSlot {
                    lane: lane_for_seat(seat),
                    seed: seat as u32 + 1,
                    bib: entry.bib,
                    name: entry.name.clone(),
                    affiliation: entry.affiliation.clone(),
                }
            })
            .collect();
        heats.push(HeatGroup {
            heat_no: heat_index as u32 + 1,
            slots,
        });
    }

    heats
}

/// Picks the next bucket to draw from: the largest non-empty bucket whose
/// affiliation is not yet in the group, falling back to the largest
/// non-empty bucket when a collision is forced. Ties keep the earlier
/// bucket, so the draw is a total order.
fn next_bucket(buckets: &[(String, VecDeque<usize>)], taken: &[String]) -> Option<usize> {
    let mut fallback: Option<usize> = None;
    let mut collision_free: Option<usize> = None;

    for (i, (affiliation, queue)) in buckets.iter().enumerate() {
        if queue.is_empty() {
            continue;
        }
        if fallback.is_none_or(|f| buckets[f].1.len() < queue.len()) {
            fallback = Some(i);
        }
        if taken.iter().any(|t| t == affiliation) {
            continue;
        }
        if collision_free.is_none_or(|c| buckets[c].1.len() < queue.len()) {
            collision_free = Some(i);
        }
    }

    collision_free.or(fallback)
}
