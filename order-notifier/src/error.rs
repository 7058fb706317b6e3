//! Error type for the notification pipeline.

use axum::http::StatusCode;
use thiserror::Error;

/// Every way a notification request can fail after the method check.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Body is not a JSON object with the expected field types.
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// One of `to_email`, `order_id` or `status` is absent or empty.
    #[error("missing required fields")]
    MissingFields,

    #[error("template rendering failed: {0}")]
    Template(#[from] tera::Error),

    /// A transport setting is present but unusable.
    #[error("invalid {name} value: {value:?}")]
    InvalidConfig { name: &'static str, value: String },

    #[error("invalid address: {0}")]
    InvalidAddress(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    #[error("smtp delivery failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

impl NotifyError {
    /// HTTP status reported to the caller.
    pub fn status_code(&self) -> StatusCode {
        match self {
            NotifyError::MissingFields => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(NotifyError::MissingFields.status_code(), StatusCode::BAD_REQUEST);

        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = NotifyError::from(parse_err);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("malformed payload"));
    }

    #[test]
    fn test_invalid_config_message() {
        let err = NotifyError::InvalidConfig {
            name: "SMTP_PORT",
            value: "abc".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "invalid SMTP_PORT value: \"abc\"");
    }
}
