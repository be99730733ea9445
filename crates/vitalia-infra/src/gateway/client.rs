//! EdgeGateway -- concrete [`AssistantGateway`] implementation for the
//! hosted edge functions.
//!
//! Sends `POST {base_url}/{endpoint}` with a bearer publishable key and
//! a JSON [`AssistantRequest`] body, then adapts the SSE response body
//! into [`StreamEvent`]s through [`DeltaDecoder`].
//!
//! The publishable key is wrapped in [`secrecy::SecretString`] and is
//! only exposed while building the Authorization header. No request
//! timeout is enforced; cancellation is tied to the consumer dropping
//! the returned stream, which releases the connection.

use futures_util::StreamExt;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use vitalia_core::gateway::{AssistantGateway, EventStream};
use vitalia_types::assistant::{AssistantError, AssistantRequest, StreamEvent};
use vitalia_types::config::GatewayConfig;

use super::sse::DeltaDecoder;
use super::types::GatewayErrorBody;

/// Client for the assistant edge functions.
pub struct EdgeGateway {
    client: reqwest::Client,
    base_url: String,
    publishable_key: SecretString,
}

impl EdgeGateway {
    /// Create a gateway from injected configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            publishable_key: config.publishable_key,
        }
    }

    /// Full URL for an edge function.
    fn url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url)
    }
}

/// Map a non-OK initial response to the exchange error taxonomy.
///
/// The message is taken from the JSON body's `error` field when present,
/// otherwise the raw body is surfaced.
fn classify_status(status: u16, body: &str) -> AssistantError {
    match status {
        429 => AssistantError::RateLimited,
        402 => AssistantError::QuotaExceeded,
        _ => {
            let message = serde_json::from_str::<GatewayErrorBody>(body)
                .map(|b| b.error)
                .unwrap_or_else(|_| body.to_string());
            AssistantError::RequestFailed { status, message }
        }
    }
}

/// Reject the response before streaming begins when it cannot be read:
/// non-2xx status (classified via [`classify_status`]) or a body that is
/// declared empty.
async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, AssistantError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(classify_status(status.as_u16(), &body));
    }
    if status == reqwest::StatusCode::NO_CONTENT || response.content_length() == Some(0) {
        return Err(AssistantError::EmptyBody);
    }
    Ok(response)
}

impl AssistantGateway for EdgeGateway {
    fn name(&self) -> &str {
        "edge"
    }

    fn stream(&self, endpoint: &str, request: AssistantRequest) -> EventStream {
        let client = self.client.clone();
        let url = self.url(endpoint);
        let auth = format!("Bearer {}", self.publishable_key.expose_secret());

        Box::pin(async_stream::try_stream! {
            let response = client
                .post(&url)
                .header(reqwest::header::AUTHORIZATION, &auth)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .json(&request)
                .send()
                .await
                .map_err(|e| AssistantError::TransportInterrupted(format!("request not sent: {e}")))?;

            let response = check_response(response).await?;

            yield StreamEvent::Connected;

            let mut decoder = DeltaDecoder::new();
            let mut body = response.bytes_stream();
            while let Some(chunk) = body.next().await {
                let chunk =
                    chunk.map_err(|e| AssistantError::TransportInterrupted(e.to_string()))?;
                for text in decoder.feed(&chunk) {
                    yield StreamEvent::TextDelta { text };
                }
                // After [DONE] the remaining body is drained without
                // producing deltas; the connection closes with it.
            }

            debug!(url = %url, done = decoder.is_done(), "assistant stream ended");
            decoder.finish();

            yield StreamEvent::Done;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(base_url: &str) -> EdgeGateway {
        EdgeGateway::new(GatewayConfig {
            base_url: base_url.to_string(),
            publishable_key: SecretString::from("sb_publishable_test"),
        })
    }

    #[test]
    fn test_url_joins_endpoint() {
        let gw = gateway("http://localhost:54321/functions/v1");
        assert_eq!(
            gw.url("health-assistant"),
            "http://localhost:54321/functions/v1/health-assistant"
        );
    }

    #[test]
    fn test_url_tolerates_trailing_slash() {
        let gw = gateway("http://localhost:54321/functions/v1/");
        assert_eq!(
            gw.url("analyze-food"),
            "http://localhost:54321/functions/v1/analyze-food"
        );
    }

    #[test]
    fn test_classify_rate_limit() {
        let err = classify_status(429, r#"{"error":"Rate limit exceeded"}"#);
        assert!(matches!(err, AssistantError::RateLimited));
    }

    #[test]
    fn test_classify_quota() {
        let err = classify_status(402, r#"{"error":"Payment required"}"#);
        assert!(matches!(err, AssistantError::QuotaExceeded));
    }

    #[test]
    fn test_classify_generic_failure_uses_error_field() {
        let err = classify_status(500, r#"{"error":"upstream unavailable"}"#);
        match err {
            AssistantError::RequestFailed { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "upstream unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_classify_generic_failure_falls_back_to_raw_body() {
        let err = classify_status(502, "Bad Gateway");
        match err {
            AssistantError::RequestFailed { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
