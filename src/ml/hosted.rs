// ============================================================
// Layer 5 — Hosted Inference Client
// ============================================================
// The QA and QG models run behind a hosted inference endpoint:
//
//   POST {base_url}/{model_id}
//   Authorization: Bearer <token>      (when a token is set)
//   { "inputs": …, "parameters": …, "options": … }
//
// Calls are synchronous and block until the model answers. The
// client is built with NO timeout: a slow model blocks the
// caller for as long as it takes, and nothing is retried.
//
// Reference: reqwest blocking client documentation

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::infra::config::EndpointConfig;

/// Longest slice of an error body echoed back to the user
const MAX_ERROR_BODY: usize = 300;

/// Options understood by the endpoint for every task.
#[derive(Debug, Clone, Serialize)]
pub struct RequestOptions {
    /// Block while a cold model is loaded instead of failing fast
    pub wait_for_model: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self { wait_for_model: true }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

pub struct HostedInference {
    client:    Client,
    base_url:  String,
    api_token: Option<String>,
}

impl HostedInference {
    pub fn new(endpoint: &EndpointConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .context("Cannot build HTTP client")?;

        if endpoint.api_token.is_none() {
            tracing::warn!("No API token configured; hosted models may reject requests");
        }

        Ok(Self {
            client,
            base_url:  endpoint.base_url.trim_end_matches('/').to_string(),
            api_token: endpoint.api_token.clone(),
        })
    }

    pub fn model_url(&self, model: &str) -> String {
        format!("{}/{}", self.base_url, model)
    }

    /// POST a JSON body to a model and decode its JSON reply.
    pub fn post<Req, Resp>(&self, model: &str, body: &Req) -> Result<Resp>
    where
        Req:  Serialize,
        Resp: DeserializeOwned,
    {
        let mut request = self.client.post(self.model_url(model)).json(body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let started  = Instant::now();
        let response = request
            .send()
            .with_context(|| format!("Request to '{model}' failed"))?;
        let status = response.status();
        let text   = response
            .text()
            .with_context(|| format!("Cannot read response from '{model}'"))?;

        tracing::debug!("'{}' answered {} in {:?}", model, status, started.elapsed());

        if !status.is_success() {
            bail!("'{model}' returned {status}: {}", error_message(&text));
        }

        serde_json::from_str(&text)
            .with_context(|| format!("Unexpected response from '{model}': {}", clip(&text)))
    }
}

/// The endpoint reports failures as {"error": "..."}; anything
/// else is echoed back clipped.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(e)  => e.error,
        Err(_) => clip(body).to_string(),
    }
}

fn clip(body: &str) -> &str {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => &body[..cut],
        None           => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(base: &str) -> EndpointConfig {
        EndpointConfig {
            base_url:  base.to_string(),
            api_token: Some("token".to_string()),
        }
    }

    #[test]
    fn test_model_url_joins_without_double_slash() {
        let hosted = HostedInference::new(&endpoint("https://example.test/models/")).unwrap();
        assert_eq!(
            hosted.model_url("deepset/roberta-base-squad2"),
            "https://example.test/models/deepset/roberta-base-squad2"
        );
    }

    #[test]
    fn test_error_message_prefers_error_field() {
        let body = r#"{"error": "Input is too long for this model"}"#;
        assert_eq!(error_message(body), "Input is too long for this model");
    }

    #[test]
    fn test_error_message_clips_raw_bodies() {
        let body = "x".repeat(1000);
        assert_eq!(error_message(&body).len(), MAX_ERROR_BODY);
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_unreachable_endpoint_is_an_error_not_a_panic() {
        // Port 9 (discard) on localhost is closed in test environments
        let hosted = HostedInference::new(&endpoint("http://127.0.0.1:9")).unwrap();
        let result: Result<serde_json::Value> = hosted.post("some/model", &serde_json::json!({}));
        let err = result.unwrap_err();
        assert!(format!("{err:#}").contains("some/model"));
    }
}
