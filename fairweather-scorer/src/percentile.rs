//! Percentile ranks within a scored batch.

use fairweather_core::ScoredVenue;

/// Set each venue's `percentile_rank` to the share of the batch scoring
/// strictly below it, on a `0..=100` scale.
///
/// With `n` venues the rank is `100 * below / (n - 1)`; a lone venue ranks
/// 100. Tied venues share a rank.
///
/// # Examples
/// ```
/// use fairweather_core::{ScoreBreakdown, ScoredVenue, Venue};
/// use fairweather_scorer::assign_percentiles;
///
/// let mut batch: Vec<ScoredVenue> = [10.0, 30.0, 20.0]
///     .into_iter()
///     .map(|total| {
///         ScoredVenue::new(Venue::new("v", "V"), 0.0, ScoreBreakdown::new(Vec::new(), total, 1.0))
///     })
///     .collect();
/// assign_percentiles(&mut batch);
/// let ranks: Vec<_> = batch.iter().filter_map(|v| v.breakdown.percentile_rank).collect();
/// assert_eq!(ranks, vec![0.0, 100.0, 50.0]);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "percentile is a ratio of counts scaled to 100"
)]
#[expect(
    clippy::cast_precision_loss,
    reason = "batch sizes are far below 2^52"
)]
pub fn assign_percentiles(venues: &mut [ScoredVenue]) {
    let mut totals: Vec<f64> = venues.iter().map(ScoredVenue::total_score).collect();
    totals.sort_by(f64::total_cmp);
    let denominator = venues.len().saturating_sub(1);
    for venue in venues.iter_mut() {
        let rank = if denominator == 0 {
            100.0
        } else {
            let total = venue.total_score();
            let below = totals.partition_point(|t| *t < total);
            100.0 * below as f64 / denominator as f64
        };
        venue.breakdown.percentile_rank = Some(rank);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairweather_core::{ScoreBreakdown, Venue};
    use rstest::rstest;

    fn batch(totals: &[f64]) -> Vec<ScoredVenue> {
        totals
            .iter()
            .map(|&t| ScoredVenue::new(Venue::default(), 0.0, ScoreBreakdown::new(Vec::new(), t, 1.0)))
            .collect()
    }

    fn ranks(venues: &[ScoredVenue]) -> Vec<f64> {
        venues
            .iter()
            .map(|v| v.breakdown.percentile_rank.unwrap_or(f64::NAN))
            .collect()
    }

    #[rstest]
    fn single_venue_ranks_top() {
        let mut venues = batch(&[12.0]);
        assign_percentiles(&mut venues);
        assert_eq!(ranks(&venues), vec![100.0]);
    }

    #[rstest]
    fn ties_share_a_rank() {
        let mut venues = batch(&[50.0, 50.0, 10.0, 90.0, 50.0]);
        assign_percentiles(&mut venues);
        assert_eq!(ranks(&venues), vec![25.0, 25.0, 0.0, 100.0, 25.0]);
    }

    #[rstest]
    fn empty_batch_is_a_no_op() {
        let mut venues = batch(&[]);
        assign_percentiles(&mut venues);
        assert!(venues.is_empty());
    }
}
