//! HTTP client for external reranking services.
//!
//! [`HttpRerankProvider`] POSTs a [`RerankRequest`](fairweather_core::RerankRequest)
//! as JSON to `{base_url}/rerank` and reads back the service's preferred
//! order. The synchronous [`RerankProvider`](fairweather_core::RerankProvider)
//! trait is implemented by blocking on the async request internally, so the
//! engine can call it from plain synchronous code.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use fairweather_core::{RerankProvider, RerankRequest};
//! use fairweather_data::rerank::{HttpRerankProvider, HttpRerankProviderConfig};
//!
//! let config = HttpRerankProviderConfig::new("http://localhost:8080")
//!     .with_api_key("secret")
//!     .with_user_agent("my-app/1.0");
//! let provider = HttpRerankProvider::with_config(config)?;
//!
//! let request = RerankRequest {
//!     venues: Vec::new(),
//!     weather_summary: "light rain, 9°C".into(),
//!     user_context: Some("cosy".into()),
//! };
//! let ids = provider.rerank(&request, Duration::from_secs(8));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod provider;
mod wire;

pub use provider::{
    DEFAULT_USER_AGENT, HttpRerankProvider, HttpRerankProviderConfig, ProviderBuildError,
};
