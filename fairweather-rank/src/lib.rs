//! Ranking, diversity selection and reranking for scored venues.
//!
//! This crate turns scored venues into the final list returned to a user.
//! [`rank`] orders them deterministically, [`select_diverse`] optionally
//! spreads the top of the list across venue types, and
//! [`RerankOrchestrator`] hands the top `k` to an external
//! [`RerankProvider`](fairweather_core::RerankProvider), applying its order
//! only when it validates. [`RecommendationEngine`] wires the whole flow for
//! one [`RankRequest`](fairweather_core::RankRequest).
//!
//! A failed reranking call is never an error: the deterministic order is
//! kept and the failure is logged and recorded on the [`RerankOutcome`].

#![forbid(unsafe_code)]

mod engine;
mod error;
mod orchestrator;
mod ranker;

pub use engine::{DEFAULT_MAX_RESULTS, EngineConfig, RecommendationEngine};
pub use error::RankError;
pub use orchestrator::{
    DEFAULT_TIMEOUT, DEFAULT_TOP_K, MAX_TOP_K, RerankConfig, RerankOrchestrator, RerankOutcome,
    RerankState,
};
pub use ranker::{compare, rank, select_diverse};
