//! Uniform response envelope: status code, headers, JSON body.
//!
//! The same value serves both hosts: it serializes to the serverless
//! `{statusCode, headers, body}` shape and converts into an axum response.

use std::collections::BTreeMap;

use axum::{
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::warn;

use crate::dispatch::{DemoDetails, Dispatched};
use crate::error::NotifyError;

pub const MSG_MISSING_FIELDS: &str = "Не все обязательные поля заполнены";
pub const MSG_METHOD_NOT_ALLOWED: &str = "Method not allowed";
pub const MSG_SEND_FAILED: &str = "Ошибка отправки email";

/// Response returned for every invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    /// JSON text, or empty for pre-flight responses.
    pub body: String,
}

/// Body of failed responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Body of successful responses.
#[derive(Debug, Serialize)]
pub struct SuccessBody {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<DemoDetails>,
}

impl ResponseEnvelope {
    /// 200 with CORS pre-flight headers and an empty body.
    pub fn preflight() -> Self {
        let headers = [
            ("Access-Control-Allow-Origin", "*"),
            ("Access-Control-Allow-Methods", "POST, OPTIONS"),
            ("Access-Control-Allow-Headers", "Content-Type, X-Admin-Token"),
            ("Access-Control-Max-Age", "86400"),
        ];

        Self {
            status_code: StatusCode::OK.as_u16(),
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: String::new(),
        }
    }

    pub fn method_not_allowed() -> Self {
        Self::json(
            StatusCode::METHOD_NOT_ALLOWED,
            &ErrorBody {
                error: MSG_METHOD_NOT_ALLOWED,
                details: None,
            },
        )
    }

    /// Envelope for a failed pipeline run.
    pub fn from_error(err: &NotifyError) -> Self {
        let body = match err {
            NotifyError::MissingFields => ErrorBody {
                error: MSG_MISSING_FIELDS,
                details: None,
            },
            other => ErrorBody {
                error: MSG_SEND_FAILED,
                details: Some(other.to_string()),
            },
        };

        Self::json(err.status_code(), &body)
    }

    /// Envelope for a successful dispatch.
    pub fn from_dispatched(outcome: Dispatched) -> Self {
        let body = match outcome {
            Dispatched::Simulated(details) => SuccessBody {
                success: true,
                message: format!("Email отправлен (демо-режим): {}", details.to),
                demo: Some(true),
                details: Some(details),
            },
            Dispatched::Sent { to } => SuccessBody {
                success: true,
                message: format!("Email успешно отправлен на {to}"),
                demo: None,
                details: None,
            },
        };

        Self::json(StatusCode::OK, &body)
    }

    fn json<T: Serialize>(status: StatusCode, body: &T) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());

        let body = serde_json::to_string(body).unwrap_or_default();

        Self {
            status_code: status.as_u16(),
            headers,
            body,
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        let status = self.status();

        let mut headers = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => warn!(header = %name, "envelope_header_invalid"),
            }
        }

        if self.body.is_empty() {
            (status, headers).into_response()
        } else {
            (status, headers, self.body).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn body_json(envelope: &ResponseEnvelope) -> Value {
        serde_json::from_str(&envelope.body).unwrap()
    }

    #[test]
    fn test_preflight() {
        let envelope = ResponseEnvelope::preflight();

        assert_eq!(envelope.status_code, 200);
        assert_eq!(envelope.body, "");
        assert_eq!(envelope.headers["Access-Control-Allow-Origin"], "*");
        assert_eq!(envelope.headers["Access-Control-Allow-Methods"], "POST, OPTIONS");
        assert_eq!(
            envelope.headers["Access-Control-Allow-Headers"],
            "Content-Type, X-Admin-Token"
        );
        assert_eq!(envelope.headers["Access-Control-Max-Age"], "86400");
    }

    #[test]
    fn test_validation_error_body() {
        let envelope = ResponseEnvelope::from_error(&NotifyError::MissingFields);

        assert_eq!(envelope.status_code, 400);
        assert_eq!(envelope.headers["Access-Control-Allow-Origin"], "*");
        assert_eq!(
            body_json(&envelope),
            serde_json::json!({ "error": MSG_MISSING_FIELDS })
        );
    }

    #[test]
    fn test_internal_error_carries_details() {
        let parse_err = serde_json::from_str::<Value>("{").unwrap_err();
        let envelope = ResponseEnvelope::from_error(&NotifyError::from(parse_err));
        let body = body_json(&envelope);

        assert_eq!(envelope.status_code, 500);
        assert_eq!(body["error"], MSG_SEND_FAILED);
        assert!(body["details"].as_str().unwrap().starts_with("malformed payload"));
    }

    #[test]
    fn test_demo_body() {
        let envelope = ResponseEnvelope::from_dispatched(Dispatched::Simulated(DemoDetails {
            to: "client@example.com".to_string(),
            subject: "Обновление статуса заказа 1 - CUSTOM SOUND".to_string(),
            order_id: "1".to_string(),
            status: "Новый".to_string(),
        }));
        let body = body_json(&envelope);

        assert_eq!(envelope.status_code, 200);
        assert_eq!(body["success"], true);
        assert_eq!(body["demo"], true);
        assert_eq!(body["message"], "Email отправлен (демо-режим): client@example.com");
        assert_eq!(body["details"]["order_id"], "1");
        assert_eq!(body["details"]["status"], "Новый");
    }

    #[test]
    fn test_sent_body_has_no_demo_flag() {
        let envelope = ResponseEnvelope::from_dispatched(Dispatched::Sent {
            to: "client@example.com".to_string(),
        });

        assert_eq!(
            body_json(&envelope),
            serde_json::json!({
                "success": true,
                "message": "Email успешно отправлен на client@example.com"
            })
        );
    }

    #[test]
    fn test_serverless_serialization() {
        let json = serde_json::to_value(ResponseEnvelope::method_not_allowed()).unwrap();

        assert_eq!(json["statusCode"], 405);
        assert_eq!(json["headers"]["Content-Type"], "application/json");
        assert_eq!(json["body"], r#"{"error":"Method not allowed"}"#);
    }

    #[test]
    fn test_into_response() {
        let response = ResponseEnvelope::preflight().into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["access-control-max-age"], "86400");
    }
}
