//! External data plumbing for the Fairweather engine.
//!
//! Two adapters live here, both kept out of the core crates so scoring and
//! ranking stay free of network dependencies:
//!
//! - [`rerank`] provides [`HttpRerankProvider`], a blocking
//!   [`RerankProvider`](fairweather_core::RerankProvider) backed by an HTTP
//!   reranking service.
//! - [`gather`] fans a venue search out across categories through an
//!   injectable asynchronous [`VenueSource`], isolating per-category
//!   failures.

#![forbid(unsafe_code)]

pub mod gather;
pub mod rerank;

#[doc(hidden)]
pub mod test_support;

pub use gather::{
    CategoryFailure, GatherError, GatherOutcome, GatherQuery, HttpVenueSource, MIXED_CATEGORIES,
    VenueSource, categories_for, gather_venues,
};
pub use rerank::{
    DEFAULT_USER_AGENT, HttpRerankProvider, HttpRerankProviderConfig, ProviderBuildError,
};
