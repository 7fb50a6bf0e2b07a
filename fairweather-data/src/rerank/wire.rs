//! Response bodies accepted from reranking services.

use fairweather_core::{RerankError, VenueId};
use serde::Deserialize;

/// Body of a reranking response.
///
/// Services may answer with a bare array of identifiers or with an envelope
/// carrying `success`, `venueIds` and `error`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum RerankResponse {
    Ids(Vec<VenueId>),
    Envelope(RerankEnvelope),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RerankEnvelope {
    success: Option<bool>,
    #[serde(alias = "rankedIds", alias = "ids")]
    venue_ids: Option<Vec<VenueId>>,
    error: Option<String>,
}

impl RerankResponse {
    /// Extract the identifiers or the failure the service reported.
    pub(super) fn into_ids(self) -> Result<Vec<VenueId>, RerankError> {
        match self {
            Self::Ids(ids) => Ok(ids),
            Self::Envelope(envelope) => envelope.into_ids(),
        }
    }
}

impl RerankEnvelope {
    fn into_ids(self) -> Result<Vec<VenueId>, RerankError> {
        if let Some(message) = self.error {
            return Err(RerankError::Service { message });
        }
        if self.success == Some(false) {
            return Err(RerankError::Service {
                message: "service reported failure without a reason".to_owned(),
            });
        }
        self.venue_ids.ok_or_else(|| RerankError::Parse {
            message: "response carried no venue ids".to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(json: &str) -> Result<Vec<VenueId>, RerankError> {
        serde_json::from_str::<RerankResponse>(json)
            .expect("body should deserialise")
            .into_ids()
    }

    #[rstest]
    #[case(r#"["b", "a"]"#)]
    #[case(r#"{"venueIds": ["b", "a"]}"#)]
    #[case(r#"{"success": true, "rankedIds": ["b", "a"]}"#)]
    fn accepts_arrays_and_envelopes(#[case] json: &str) {
        assert_eq!(parse(json), Ok(vec![VenueId::new("b"), VenueId::new("a")]));
    }

    #[rstest]
    fn reported_error_becomes_service_error() {
        assert_eq!(
            parse(r#"{"success": false, "error": "quota exceeded"}"#),
            Err(RerankError::Service {
                message: "quota exceeded".into()
            })
        );
    }

    #[rstest]
    fn bare_failure_flag_is_a_service_error() {
        assert!(matches!(
            parse(r#"{"success": false, "venueIds": ["a"]}"#),
            Err(RerankError::Service { .. })
        ));
    }

    #[rstest]
    fn empty_envelope_is_a_parse_error() {
        assert!(matches!(parse("{}"), Err(RerankError::Parse { .. })));
    }
}
