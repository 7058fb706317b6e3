//! Request handling.
//!
//! [`handle`] is the whole pipeline for one invocation:
//! 1. Answer CORS pre-flight and reject anything but POST
//! 2. Parse and validate the JSON payload
//! 3. Compose the email
//! 4. Resolve the transport and dispatch (demo or live SMTP)
//!
//! Steps 2-4 run inside a single error boundary that turns any
//! [`NotifyError`] into the uniform envelope.

use axum::{body::Bytes, extract::State, http::Method, Json};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{error, info, warn};

use crate::compose::compose;
use crate::config::{Transport, TransportConfig};
use crate::dispatch::dispatch;
use crate::error::NotifyError;
use crate::request::NotificationRequest;
use crate::web::envelope::ResponseEnvelope;

/// Where each request gets its transport from.
#[derive(Debug, Clone)]
pub enum TransportSource {
    /// Re-read `SMTP_*` variables on every request.
    Environment,
    /// Use a fixed transport.
    Fixed(Transport),
}

impl TransportSource {
    pub fn resolve(&self) -> Result<Transport, NotifyError> {
        match self {
            TransportSource::Environment => Ok(TransportConfig::from_env()?.into_transport()),
            TransportSource::Fixed(transport) => Ok(transport.clone()),
        }
    }
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub transport: TransportSource,
}

impl AppState {
    pub fn new(transport: TransportSource) -> Self {
        Self { transport }
    }
}

/// Run one notification request end to end.
pub async fn handle(method: &str, body: &[u8], source: &TransportSource) -> ResponseEnvelope {
    match method {
        "OPTIONS" => return ResponseEnvelope::preflight(),
        "POST" => {}
        other => {
            warn!(method = %other, "notification_method_not_allowed");
            return ResponseEnvelope::method_not_allowed();
        }
    }

    info!(body_length = body.len(), "notification_received");

    match process(body, source).await {
        Ok(envelope) => envelope,
        Err(e) => {
            match e {
                NotifyError::MissingFields => warn!("notification_missing_fields"),
                _ => error!(error = %e, "notification_failed"),
            }
            ResponseEnvelope::from_error(&e)
        }
    }
}

async fn process(body: &[u8], source: &TransportSource) -> Result<ResponseEnvelope, NotifyError> {
    let request = NotificationRequest::from_json(body)?;

    info!(
        to = %request.to_email,
        order_id = %request.order_id,
        status = %request.status,
        "notification_validated"
    );

    let message = compose(&request)?;

    let transport = source.resolve()?;
    info!(mode = transport.mode(), "transport_resolved");

    let outcome = dispatch(&request, &message, &transport).await?;

    Ok(ResponseEnvelope::from_dispatched(outcome))
}

// =============================================================================
// Serverless Event
// =============================================================================

/// HTTP event as delivered by a serverless function platform.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpEvent {
    #[serde(default = "default_method")]
    pub http_method: String,
    /// `None` when the key is missing, `Some(None)` for an explicit `null`.
    #[serde(default, deserialize_with = "present")]
    pub body: Option<Option<String>>,
}

fn default_method() -> String {
    "GET".to_string()
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl HttpEvent {
    /// Raw request body as passed to the JSON parser.
    ///
    /// A missing key stands for an empty object; an explicit `null` is kept
    /// as JSON `null`, which is not a valid payload.
    pub fn raw_body(&self) -> &str {
        match &self.body {
            None => "{}",
            Some(None) => "null",
            Some(Some(body)) => body,
        }
    }
}

/// Handle a serverless event, reading transport settings from the environment.
pub async fn handle_event(event: HttpEvent) -> ResponseEnvelope {
    handle_event_with(event, &TransportSource::Environment).await
}

/// Handle a serverless event with an explicit transport source.
pub async fn handle_event_with(event: HttpEvent, source: &TransportSource) -> ResponseEnvelope {
    handle(&event.http_method, event.raw_body().as_bytes(), source).await
}

// =============================================================================
// Axum Handlers
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Notification endpoint, mounted for every method.
///
/// HTTP cannot tell an absent body from an empty one, so an empty body is
/// read as `{}`.
pub async fn send_email(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> ResponseEnvelope {
    let body: &[u8] = if body.is_empty() { b"{}" } else { &body };
    handle(method.as_str(), body, &state.transport).await
}
