//! Venues carrying the results of scoring, ranking and reranking.

use serde::Serialize;

use crate::{ScoreBreakdown, SemanticTag, Venue, VenueId};

/// A venue paired with its distance and score breakdown.
///
/// The wrapped [`Venue`] is a copy of the input; scoring never edits the
/// caller's records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredVenue {
    /// Venue as supplied.
    pub venue: Venue,
    /// Great-circle distance from the user, in metres.
    pub distance_meters: f64,
    /// How the total score was reached.
    pub breakdown: ScoreBreakdown,
}

impl ScoredVenue {
    /// Pair a venue with its scoring results.
    #[must_use]
    pub const fn new(venue: Venue, distance_meters: f64, breakdown: ScoreBreakdown) -> Self {
        Self {
            venue,
            distance_meters,
            breakdown,
        }
    }

    /// Identifier of the wrapped venue.
    #[must_use]
    pub const fn id(&self) -> &VenueId {
        &self.venue.id
    }

    /// Aggregate score in `0.0..=100.0`.
    #[must_use]
    pub const fn total_score(&self) -> f64 {
        self.breakdown.total_score
    }
}

/// A scored venue at a 1-based position in the deterministic ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedVenue {
    /// 1-based position.
    pub rank: usize,
    /// Scored venue at that position.
    pub scored: ScoredVenue,
}

impl RankedVenue {
    /// Identifier of the ranked venue.
    #[must_use]
    pub const fn id(&self) -> &VenueId {
        self.scored.id()
    }
}

/// A venue as returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalVenue {
    /// Venue fields as supplied.
    #[serde(flatten)]
    pub venue: Venue,
    /// Great-circle distance from the user, in metres.
    pub distance_meters: f64,
    /// Aggregate score in `0.0..=100.0`.
    pub score: f64,
    /// How the score was reached.
    pub breakdown: ScoreBreakdown,
    /// Derived labels.
    pub semantic_tags: Vec<SemanticTag>,
    /// 1-based position in the final list.
    pub rank: usize,
    /// 1-based position before reranking.
    pub deterministic_rank: usize,
}

impl FinalVenue {
    /// Place a ranked venue at a final 1-based position.
    #[must_use]
    pub fn from_ranked(ranked: RankedVenue, rank: usize) -> Self {
        let RankedVenue {
            rank: deterministic_rank,
            scored,
        } = ranked;
        let semantic_tags = scored.venue.semantic_tags();
        Self {
            score: scored.breakdown.total_score,
            distance_meters: scored.distance_meters,
            breakdown: scored.breakdown,
            venue: scored.venue,
            semantic_tags,
            rank,
            deterministic_rank,
        }
    }

    /// Identifier of the venue.
    #[must_use]
    pub const fn id(&self) -> &VenueId {
        &self.venue.id
    }
}
