//! `reqwest`-backed gateway to the remote specification service.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::AuthSession;
use crate::config::SpecForgeConfig;
use crate::spec::{
    domain::{FeatureRequest, HealthReport, RawSpecification, SavePayload, SpecId, Specification},
    ports::{GatewayError, GatewayResult, SpecGateway},
};

/// HTTP gateway speaking the service's JSON API.
///
/// Routes: `POST /generate`, `POST /spec`, `GET /specs`, `GET /spec/{id}`
/// and `GET /health`, all relative to the configured base URL. Responses may
/// be wrapped in a `{ "data": .. }` envelope.
#[derive(Debug, Clone)]
pub struct HttpSpecGateway {
    client: Client,
    base_url: String,
    session: Arc<AuthSession>,
}

impl HttpSpecGateway {
    /// Creates a gateway for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(
        base_url: impl Into<String>,
        session: Arc<AuthSession>,
        timeout: Duration,
    ) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(GatewayError::transport)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            session,
        })
    }

    /// Creates a gateway and session from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn from_config(config: &SpecForgeConfig) -> GatewayResult<Self> {
        let session = Arc::new(AuthSession::new(config.auth_token.clone()));
        Self::new(config.api_base_url.clone(), session, config.request_timeout)
    }

    /// Returns the session whose credential this gateway attaches.
    #[must_use]
    pub const fn session(&self) -> &Arc<AuthSession> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends a request and returns the status with the decoded body.
    ///
    /// A `401` signs the session out before the error is returned.
    async fn exchange(&self, request: RequestBuilder) -> GatewayResult<(StatusCode, Value)> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(GatewayError::transport)?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "gateway response");
        if status == StatusCode::UNAUTHORIZED {
            self.session.sign_out();
            return Err(GatewayError::Unauthorized);
        }
        let bytes = response.bytes().await.map_err(GatewayError::transport)?;
        Ok((status, parse_body(&bytes)))
    }

    async fn exchange_ok(&self, request: RequestBuilder) -> GatewayResult<Value> {
        let (status, body) = self.exchange(request).await?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "gateway request failed");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message: service_message(&body),
            });
        }
        Ok(unwrap_envelope(body))
    }
}

#[async_trait]
impl SpecGateway for HttpSpecGateway {
    async fn generate(&self, request: &FeatureRequest) -> GatewayResult<RawSpecification> {
        let body = self
            .exchange_ok(self.client.post(self.url("generate")).json(request))
            .await?;
        decode(body)
    }

    async fn save(&self, spec: &Specification) -> GatewayResult<RawSpecification> {
        let payload = SavePayload::from(spec);
        let body = self
            .exchange_ok(self.client.post(self.url("spec")).json(&payload))
            .await?;
        decode(body)
    }

    async fn list_recent(&self) -> GatewayResult<Vec<RawSpecification>> {
        let body = self.exchange_ok(self.client.get(self.url("specs"))).await?;
        Ok(decode_list(body))
    }

    async fn fetch_by_id(&self, id: &SpecId) -> GatewayResult<Option<RawSpecification>> {
        let request = self.client.get(self.url(&format!("spec/{id}")));
        let (status, body) = self.exchange(request).await?;
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message: service_message(&body),
            });
        }
        match unwrap_envelope(body) {
            Value::Null => Ok(None),
            other => decode(other).map(Some),
        }
    }

    async fn health_check(&self) -> GatewayResult<HealthReport> {
        let (status, body) = self.exchange(self.client.get(self.url("health"))).await?;
        if status.is_success() {
            return decode(unwrap_envelope(body));
        }
        // An unhealthy service still answers with a report under `data`.
        health_from_error_body(&body).ok_or_else(|| GatewayError::Status {
            status: status.as_u16(),
            message: service_message(&body),
        })
    }
}

fn parse_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

fn decode<T: DeserializeOwned>(body: Value) -> GatewayResult<T> {
    serde_json::from_value(body).map_err(GatewayError::decode)
}

/// Decodes a list response, skipping entries that are not objects.
pub(crate) fn decode_list(body: Value) -> Vec<RawSpecification> {
    let Value::Array(items) = body else {
        return Vec::new();
    };
    items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect()
}

/// Strips a `{ "data": .. }` envelope when present.
pub(crate) fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.get("data").is_some_and(|data| !data.is_null()) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Extracts the `message` field of an error body.
pub(crate) fn service_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_owned)
}

pub(crate) fn health_from_error_body(body: &Value) -> Option<HealthReport> {
    body.get("data")
        .filter(|data| data.is_object())
        .and_then(|data| serde_json::from_value(data.clone()).ok())
}
