//! Deterministic ordering and diversity selection.

use std::cmp::Ordering;
use std::collections::HashSet;

use fairweather_core::{RankedVenue, ScoredVenue};

/// Order two scored venues best first.
///
/// Higher totals come first; ties fall to higher rating, then more reviews,
/// then the lexicographically smaller id. A missing rating or review count
/// sorts below any present value.
#[must_use]
pub fn compare(lhs: &ScoredVenue, rhs: &ScoredVenue) -> Ordering {
    rhs.total_score()
        .total_cmp(&lhs.total_score())
        .then_with(|| {
            descending_option(
                lhs.venue.valid_rating(),
                rhs.venue.valid_rating(),
                f64::total_cmp,
            )
        })
        .then_with(|| {
            descending_option(lhs.venue.review_count, rhs.venue.review_count, u32::cmp)
        })
        .then_with(|| lhs.id().cmp(rhs.id()))
}

fn descending_option<T: Copy>(
    lhs: Option<T>,
    rhs: Option<T>,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> Ordering {
    match (lhs, rhs) {
        (Some(a), Some(b)) => cmp(&b, &a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort scored venues and number them from 1.
///
/// # Examples
/// ```
/// use fairweather_core::{ScoreBreakdown, ScoredVenue, Venue};
/// use fairweather_rank::rank;
///
/// let scored = |id: &str, total: f64| {
///     ScoredVenue::new(Venue::new(id, id), 0.0, ScoreBreakdown::new(Vec::new(), total, 1.0))
/// };
/// let ranked = rank(vec![scored("b", 40.0), scored("a", 40.0), scored("c", 90.0)]);
/// let order: Vec<_> = ranked.iter().map(|r| (r.rank, r.id().as_str())).collect();
/// assert_eq!(order, vec![(1, "c"), (2, "a"), (3, "b")]);
/// ```
#[must_use]
pub fn rank(mut scored: Vec<ScoredVenue>) -> Vec<RankedVenue> {
    scored.sort_by(compare);
    number(scored.into_iter())
}

fn number(venues: impl Iterator<Item = ScoredVenue>) -> Vec<RankedVenue> {
    venues
        .enumerate()
        .map(|(index, scored)| RankedVenue {
            rank: index + 1,
            scored,
        })
        .collect()
}

/// Pick up to `limit` venues, spreading the top half across primary types.
///
/// The first `ceil(limit / 2)` slots only admit a venue whose primary type
/// has not been used yet; venues without types never conflict. Remaining
/// slots are filled from the ranked order regardless of repeats. The
/// selection is renumbered from 1.
#[must_use]
pub fn select_diverse(ranked: Vec<RankedVenue>, limit: usize) -> Vec<RankedVenue> {
    let distinct_slots = limit.div_ceil(2);
    let mut used_types: HashSet<String> = HashSet::new();
    let mut picked: Vec<ScoredVenue> = Vec::with_capacity(limit.min(ranked.len()));
    let mut rest: Vec<ScoredVenue> = Vec::new();

    for venue in ranked.into_iter().map(|r| r.scored) {
        if picked.len() >= distinct_slots {
            rest.push(venue);
            continue;
        }
        match venue.venue.primary_type().map(str::to_owned) {
            Some(kind) if used_types.contains(&kind) => rest.push(venue),
            Some(kind) => {
                used_types.insert(kind);
                picked.push(venue);
            }
            None => picked.push(venue),
        }
    }

    let remaining = limit.saturating_sub(picked.len());
    picked.extend(rest.into_iter().take(remaining));
    number(picked.into_iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairweather_core::{ScoreBreakdown, Venue};
    use rstest::rstest;

    fn scored(id: &str, total: f64, kind: &str) -> ScoredVenue {
        let venue = Venue::new(id, id).with_types([kind]);
        ScoredVenue::new(venue, 0.0, ScoreBreakdown::new(Vec::new(), total, 1.0))
    }

    fn ids(ranked: &[RankedVenue]) -> Vec<&str> {
        ranked.iter().map(|r| r.id().as_str()).collect()
    }

    #[rstest]
    fn ties_break_on_rating_then_reviews_then_id() {
        let mut rated = scored("rated", 50.0, "cafe");
        rated.venue.rating = Some(4.0);
        let mut reviewed = scored("reviewed", 50.0, "cafe");
        reviewed.venue.rating = Some(4.0);
        reviewed.venue.review_count = Some(10);
        let unrated = scored("a-unrated", 50.0, "cafe");
        let also_unrated = scored("b-unrated", 50.0, "cafe");
        let ranked = rank(vec![also_unrated, unrated, rated, reviewed]);
        assert_eq!(ids(&ranked), vec!["reviewed", "rated", "a-unrated", "b-unrated"]);
        let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
    }

    #[rstest]
    fn diversity_spreads_the_top_half() {
        let ranked = rank(vec![
            scored("cafe-1", 90.0, "cafe"),
            scored("cafe-2", 85.0, "cafe"),
            scored("cafe-3", 80.0, "cafe"),
            scored("park-1", 70.0, "park"),
            scored("museum-1", 60.0, "museum"),
        ]);
        let selected = select_diverse(ranked, 4);
        assert_eq!(ids(&selected), vec!["cafe-1", "park-1", "cafe-2", "cafe-3"]);
        let ranks: Vec<usize> = selected.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
    }

    #[rstest]
    fn untyped_venues_never_conflict() {
        let untyped = |id: &str, total: f64| {
            ScoredVenue::new(Venue::new(id, id), 0.0, ScoreBreakdown::new(Vec::new(), total, 1.0))
        };
        let ranked = rank(vec![untyped("x", 90.0), untyped("y", 80.0), scored("z", 70.0, "bar")]);
        assert_eq!(ids(&select_diverse(ranked, 3)), vec!["x", "y", "z"]);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(2, 2)]
    #[case(10, 3)]
    fn selection_is_capped(#[case] limit: usize, #[case] expected: usize) {
        let ranked = rank(vec![
            scored("a", 3.0, "cafe"),
            scored("b", 2.0, "cafe"),
            scored("c", 1.0, "cafe"),
        ]);
        assert_eq!(select_diverse(ranked, limit).len(), expected);
    }
}
