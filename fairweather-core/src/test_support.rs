//! Deterministic `RerankProvider` doubles used by unit and behaviour tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::{RerankError, RerankProvider, RerankRequest, VenueId};

#[derive(Debug, Clone)]
enum StubResponse {
    Ids(Vec<VenueId>),
    Reverse,
    Error(RerankError),
}

/// Stub reranker returning a pre-configured answer.
///
/// Every call is counted and the last request is kept so tests can assert
/// on what the orchestrator sent.
#[derive(Debug)]
pub struct StubReranker {
    response: StubResponse,
    calls: AtomicUsize,
    last_request: Mutex<Option<RerankRequest>>,
}

impl StubReranker {
    fn from_response(response: StubResponse) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Answer every call with `ids`, whatever the request contains.
    #[must_use]
    pub fn with_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<VenueId>,
    {
        Self::from_response(StubResponse::Ids(ids.into_iter().map(Into::into).collect()))
    }

    /// Answer with the request's candidates in reverse order.
    #[must_use]
    pub fn reversing() -> Self {
        Self::from_response(StubResponse::Reverse)
    }

    /// Fail every call with `error`.
    #[must_use]
    pub fn with_error(error: RerankError) -> Self {
        Self::from_response(StubResponse::Error(error))
    }

    /// Fail every call as if the timeout elapsed.
    #[must_use]
    pub fn timing_out() -> Self {
        Self::with_error(RerankError::Timeout {
            url: "stub://rerank".to_owned(),
            timeout_ms: 0,
        })
    }

    /// Fail every call as if the body could not be decoded.
    #[must_use]
    pub fn malformed() -> Self {
        Self::with_error(RerankError::Parse {
            message: "expected an array of venue ids".to_owned(),
        })
    }

    /// Number of calls received.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Copy of the most recent request, if any.
    #[must_use]
    pub fn last_request(&self) -> Option<RerankRequest> {
        self.last_request
            .lock()
            .map_or(None, |guard| guard.clone())
    }
}

impl RerankProvider for StubReranker {
    fn rerank(
        &self,
        request: &RerankRequest,
        timeout: Duration,
    ) -> Result<Vec<VenueId>, RerankError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.last_request.lock() {
            *guard = Some(request.clone());
        }
        match &self.response {
            StubResponse::Ids(ids) => Ok(ids.clone()),
            StubResponse::Reverse => Ok(request.venues.iter().rev().map(|v| v.id.clone()).collect()),
            StubResponse::Error(RerankError::Timeout { url, .. }) => Err(RerankError::Timeout {
                url: url.clone(),
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            }),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn request(ids: &[&str]) -> RerankRequest {
        RerankRequest {
            venues: ids
                .iter()
                .map(|id| crate::RerankCandidate {
                    id: (*id).into(),
                    name: (*id).to_owned(),
                    types: Vec::new(),
                    rating: None,
                    review_count: None,
                    distance_meters: 0.0,
                    score: 0.0,
                })
                .collect(),
            weather_summary: "clear".into(),
            user_context: None,
        }
    }

    #[rstest]
    fn timing_out_reports_caller_timeout() {
        let stub = StubReranker::timing_out();
        let result = stub.rerank(&request(&["a"]), Duration::from_millis(50));
        assert!(matches!(
            result,
            Err(RerankError::Timeout { timeout_ms: 50, .. })
        ));
        assert_eq!(stub.calls(), 1);
    }

    #[rstest]
    fn reversing_echoes_candidates_backwards() {
        let stub = StubReranker::reversing();
        let ids = stub
            .rerank(&request(&["a", "b", "c"]), Duration::from_secs(1))
            .expect("reverse succeeds");
        assert_eq!(ids, vec!["c".into(), "b".into(), "a".into()]);
        let sent = stub.last_request().expect("request recorded");
        assert_eq!(sent.venues.len(), 3);
    }
}
