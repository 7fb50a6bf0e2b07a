//! Wraps an external reranker with validation and a deterministic fallback.
//!
//! The orchestrator never fails: any problem with the reranking call leaves
//! the deterministic order in place and is recorded on the outcome.

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use fairweather_core::{
    FinalVenue, RankedVenue, RerankCandidate, RerankError, RerankProvider, RerankRequest,
    RerankResult, VenueId,
};

/// Default number of top venues sent to the reranker.
pub const DEFAULT_TOP_K: usize = 10;
/// Largest number of venues ever sent to the reranker.
pub const MAX_TOP_K: usize = 15;
/// Default time allowed for one reranking call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Lifecycle of one orchestration call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RerankState {
    /// Nothing has happened yet.
    Idle,
    /// The reranker has been called.
    Requesting,
    /// The reranker answered with a usable order.
    Succeeded,
    /// The call failed or the answer was unusable.
    Failed,
    /// The final list has been produced.
    Finalized,
}

impl RerankState {
    /// Lowercase state name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Requesting => "requesting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Finalized => "finalized",
        }
    }
}

impl fmt::Display for RerankState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings for [`RerankOrchestrator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RerankConfig {
    top_k: usize,
    timeout: Duration,
}

impl Default for RerankConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RerankConfig {
    /// Send the top `top_k` venues, limited to `1..=15`.
    ///
    /// # Examples
    /// ```
    /// use fairweather_rank::RerankConfig;
    ///
    /// assert_eq!(RerankConfig::default().with_top_k(40).top_k(), 15);
    /// assert_eq!(RerankConfig::default().with_top_k(0).top_k(), 1);
    /// ```
    #[must_use]
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.clamp(1, MAX_TOP_K);
        self
    }

    /// Allow each call `timeout` before falling back.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Number of venues sent to the reranker.
    #[must_use]
    pub const fn top_k(&self) -> usize {
        self.top_k
    }

    /// Time allowed for one call.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Result of one orchestration call.
#[derive(Debug, Clone, PartialEq)]
pub struct RerankOutcome {
    /// Venues in final order with final ranks.
    pub venues: Vec<FinalVenue>,
    /// Whether the reranked order was applied.
    pub ai_applied: bool,
    /// What the reranker returned.
    pub result: RerankResult,
    /// States visited, in order.
    pub transitions: Vec<RerankState>,
}

/// Calls a [`RerankProvider`] on the top of a ranking and applies its order
/// when it is valid.
///
/// # Examples
/// ```
/// use fairweather_core::{DisabledReranker, RankedVenue, ScoreBreakdown, ScoredVenue, Venue};
/// use fairweather_rank::{RerankOrchestrator, RerankState};
///
/// let ranked = vec![RankedVenue {
///     rank: 1,
///     scored: ScoredVenue::new(Venue::new("a", "A"), 0.0, ScoreBreakdown::new(Vec::new(), 50.0, 1.0)),
/// }];
/// let outcome = RerankOrchestrator::new(DisabledReranker).rerank(ranked, "clear", None);
/// assert!(!outcome.ai_applied);
/// assert_eq!(outcome.transitions.last(), Some(&RerankState::Finalized));
/// assert_eq!(outcome.venues.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RerankOrchestrator<R> {
    provider: R,
    config: RerankConfig,
}

impl<R: RerankProvider> RerankOrchestrator<R> {
    /// Orchestrate `provider` with the default configuration.
    pub fn new(provider: R) -> Self {
        Self::with_config(provider, RerankConfig::default())
    }

    /// Orchestrate `provider` with explicit configuration.
    pub const fn with_config(provider: R, config: RerankConfig) -> Self {
        Self { provider, config }
    }

    /// Configuration in use.
    pub const fn config(&self) -> &RerankConfig {
        &self.config
    }

    /// Wrapped reranking service.
    pub const fn provider(&self) -> &R {
        &self.provider
    }

    /// Rerank a deterministic ranking.
    ///
    /// On success the validated order comes first, then any top venues the
    /// service omitted, then the venues beyond the top `k` unchanged. On
    /// failure the ranking is returned as is.
    pub fn rerank(
        &self,
        ranked: Vec<RankedVenue>,
        weather_summary: &str,
        user_context: Option<&str>,
    ) -> RerankOutcome {
        let mut transitions = vec![RerankState::Idle];
        if ranked.is_empty() {
            transitions.push(RerankState::Finalized);
            return RerankOutcome {
                venues: Vec::new(),
                ai_applied: false,
                result: RerankResult::failed(&RerankError::EmptyInput),
                transitions,
            };
        }

        let split = self.config.top_k.min(ranked.len());
        let request = RerankRequest {
            venues: ranked.iter().take(split).map(RerankCandidate::from).collect(),
            weather_summary: weather_summary.to_owned(),
            user_context: user_context.map(str::to_owned),
        };

        transitions.push(RerankState::Requesting);
        let answer = self
            .provider
            .rerank(&request, self.config.timeout)
            .and_then(|ids| validate_ids(ids, &request.venues));

        match answer {
            Ok(order) => {
                transitions.extend([RerankState::Succeeded, RerankState::Finalized]);
                log::debug!("applied reranked order of {} venues", order.len());
                RerankOutcome {
                    venues: apply_order(ranked, split, &order),
                    ai_applied: true,
                    result: RerankResult::succeeded(order),
                    transitions,
                }
            }
            Err(err) => {
                transitions.extend([RerankState::Failed, RerankState::Finalized]);
                if err == RerankError::Disabled {
                    log::debug!("reranking disabled; keeping deterministic order");
                } else {
                    log::warn!("reranking failed, keeping deterministic order: {err}");
                }
                RerankOutcome {
                    venues: finalise(ranked),
                    ai_applied: false,
                    result: RerankResult::failed(&err),
                    transitions,
                }
            }
        }
    }
}

/// Keep the first occurrence of each identifier that was sent.
///
/// # Errors
/// Returns [`RerankError::NoValidIds`] when nothing survives.
fn validate_ids(
    ids: Vec<VenueId>,
    sent: &[RerankCandidate],
) -> Result<Vec<VenueId>, RerankError> {
    let known: HashSet<&VenueId> = sent.iter().map(|c| &c.id).collect();
    let mut seen: HashSet<VenueId> = HashSet::new();
    let mut unknown = 0_usize;
    let valid: Vec<VenueId> = ids
        .into_iter()
        .filter(|id| {
            if !known.contains(&id) {
                unknown += 1;
                return false;
            }
            seen.insert(id.clone())
        })
        .collect();
    if unknown > 0 {
        log::debug!("dropped {unknown} unknown venue ids from reranker response");
    }
    if valid.is_empty() {
        return Err(RerankError::NoValidIds);
    }
    Ok(valid)
}

fn apply_order(ranked: Vec<RankedVenue>, split: usize, order: &[VenueId]) -> Vec<FinalVenue> {
    let mut top: Vec<Option<RankedVenue>> = Vec::with_capacity(split);
    let mut beyond: Vec<RankedVenue> = Vec::new();
    for (index, venue) in ranked.into_iter().enumerate() {
        if index < split {
            top.push(Some(venue));
        } else {
            beyond.push(venue);
        }
    }

    let mut reordered: Vec<RankedVenue> = Vec::with_capacity(top.len() + beyond.len());
    for id in order {
        if let Some(venue) = top
            .iter_mut()
            .find(|slot| slot.as_ref().is_some_and(|v| v.id() == id))
            .and_then(Option::take)
        {
            reordered.push(venue);
        }
    }
    reordered.extend(top.into_iter().flatten());
    reordered.extend(beyond);
    finalise(reordered)
}

fn finalise(venues: Vec<RankedVenue>) -> Vec<FinalVenue> {
    venues
        .into_iter()
        .enumerate()
        .map(|(index, ranked)| FinalVenue::from_ranked(ranked, index + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairweather_core::test_support::StubReranker;
    use fairweather_core::{ScoreBreakdown, ScoredVenue, Venue};
    use rstest::{fixture, rstest};

    #[fixture]
    fn ranked() -> Vec<RankedVenue> {
        [("a", 90.0), ("b", 80.0), ("c", 70.0), ("d", 60.0)]
            .into_iter()
            .enumerate()
            .map(|(index, (id, total))| RankedVenue {
                rank: index + 1,
                scored: ScoredVenue::new(
                    Venue::new(id, id),
                    100.0,
                    ScoreBreakdown::new(Vec::new(), total, 1.0),
                ),
            })
            .collect()
    }

    fn ids(outcome: &RerankOutcome) -> Vec<&str> {
        outcome.venues.iter().map(|v| v.id().as_str()).collect()
    }

    fn orchestrator(stub: StubReranker, top_k: usize) -> RerankOrchestrator<StubReranker> {
        RerankOrchestrator::with_config(stub, RerankConfig::default().with_top_k(top_k))
    }

    #[rstest]
    fn valid_order_is_applied_within_top_k(ranked: Vec<RankedVenue>) {
        let outcome =
            orchestrator(StubReranker::with_ids(["c", "a"]), 3).rerank(ranked, "clear", None);
        assert!(outcome.ai_applied);
        assert_eq!(ids(&outcome), vec!["c", "a", "b", "d"]);
        let deterministic: Vec<usize> =
            outcome.venues.iter().map(|v| v.deterministic_rank).collect();
        assert_eq!(deterministic, vec![3, 1, 2, 4]);
        let ranks: Vec<usize> = outcome.venues.iter().map(|v| v.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
        assert_eq!(
            outcome.transitions,
            vec![
                RerankState::Idle,
                RerankState::Requesting,
                RerankState::Succeeded,
                RerankState::Finalized
            ]
        );
    }

    #[rstest]
    fn unknown_and_duplicate_ids_are_dropped(ranked: Vec<RankedVenue>) {
        let stub = StubReranker::with_ids(["zz", "b", "b", "d", "a"]);
        let outcome = orchestrator(stub, 3).rerank(ranked, "clear", None);
        assert_eq!(ids(&outcome), vec!["b", "a", "c", "d"]);
        assert_eq!(
            outcome.result.venue_ids,
            Some(vec![VenueId::from("b"), VenueId::from("a")])
        );
    }

    #[rstest]
    #[case(StubReranker::timing_out())]
    #[case(StubReranker::malformed())]
    #[case(StubReranker::with_ids(["nope"]))]
    #[case(StubReranker::with_ids(Vec::<VenueId>::new()))]
    fn failures_keep_deterministic_order(ranked: Vec<RankedVenue>, #[case] stub: StubReranker) {
        let outcome = orchestrator(stub, 10).rerank(ranked, "clear", None);
        assert!(!outcome.ai_applied);
        assert!(!outcome.result.success);
        assert!(outcome.result.error.is_some());
        assert_eq!(ids(&outcome), vec!["a", "b", "c", "d"]);
        assert_eq!(outcome.transitions.get(2), Some(&RerankState::Failed));
    }

    #[rstest]
    fn empty_input_skips_the_call() {
        let orchestrator = RerankOrchestrator::new(StubReranker::reversing());
        let outcome = orchestrator.rerank(Vec::new(), "clear", None);
        assert!(outcome.venues.is_empty());
        assert!(!outcome.ai_applied);
        assert_eq!(outcome.transitions, vec![RerankState::Idle, RerankState::Finalized]);
        assert_eq!(orchestrator.provider.calls(), 0);
    }

    #[rstest]
    fn request_carries_top_k_and_context(ranked: Vec<RankedVenue>) {
        let orchestrator = orchestrator(StubReranker::reversing(), 2);
        let outcome = orchestrator.rerank(ranked, "rain, 9.0°C", Some("relaxed"));
        let request = orchestrator
            .provider
            .last_request()
            .expect("reranker was called");
        let sent: Vec<&str> = request.venues.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(sent, vec!["a", "b"]);
        assert_eq!(request.weather_summary, "rain, 9.0°C");
        assert_eq!(request.user_context.as_deref(), Some("relaxed"));
        assert_eq!(ids(&outcome), vec!["b", "a", "c", "d"]);
    }

    #[rstest]
    fn top_k_is_capped() {
        assert_eq!(RerankConfig::default().top_k(), 10);
        assert_eq!(RerankConfig::default().with_top_k(99).top_k(), MAX_TOP_K);
        assert_eq!(RerankConfig::default().timeout(), Duration::from_secs(8));
    }
}
