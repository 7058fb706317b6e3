//! Dispatch strategy: simulated (demo) or live SMTP delivery.
//!
//! ```text
//! Transport::Demo          → Dispatched::Simulated (no network I/O)
//! Transport::Live(smtp)    → smtp::send() → Dispatched::Sent
//! ```
//!
//! A live attempt is made exactly once. Failures are returned to the caller
//! unchanged; retrying belongs to whoever sent the event.

pub mod smtp;

use serde::Serialize;
use tracing::info;

use crate::compose::RenderedMessage;
use crate::config::Transport;
use crate::error::NotifyError;
use crate::request::NotificationRequest;

/// What a demo send would have delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoDetails {
    pub to: String,
    pub subject: String,
    pub order_id: String,
    pub status: String,
}

/// Successful dispatch outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    /// Demo mode acknowledgement: the message was composed but not sent.
    Simulated(DemoDetails),
    /// The relay accepted the message.
    Sent { to: String },
}

/// Deliver (or simulate delivering) a composed message.
pub async fn dispatch(
    request: &NotificationRequest,
    message: &RenderedMessage,
    transport: &Transport,
) -> Result<Dispatched, NotifyError> {
    match transport {
        Transport::Demo => {
            info!(
                to = %request.to_email,
                order_id = %request.order_id,
                "notification_demo_mode"
            );

            Ok(Dispatched::Simulated(DemoDetails {
                to: request.to_email.clone(),
                subject: message.subject().to_string(),
                order_id: request.order_id.clone(),
                status: request.status.clone(),
            }))
        }
        Transport::Live(settings) => {
            smtp::send(settings, &request.to_email, message).await?;

            info!(
                to = %request.to_email,
                order_id = %request.order_id,
                "notification_sent"
            );

            Ok(Dispatched::Sent {
                to: request.to_email.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose;
    use crate::config::SmtpSettings;

    fn request() -> NotificationRequest {
        NotificationRequest {
            to_email: "client@example.com".to_string(),
            order_id: "A-7".to_string(),
            status: "В пути".to_string(),
            order_total: None,
        }
    }

    #[tokio::test]
    async fn test_demo_dispatch() {
        let req = request();
        let message = compose(&req).unwrap();

        let outcome = dispatch(&req, &message, &Transport::Demo).await.unwrap();

        assert_eq!(
            outcome,
            Dispatched::Simulated(DemoDetails {
                to: "client@example.com".to_string(),
                subject: "Обновление статуса заказа A-7 - CUSTOM SOUND".to_string(),
                order_id: "A-7".to_string(),
                status: "В пути".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_live_dispatch_propagates_failure() {
        let req = request();
        let message = compose(&req).unwrap();
        let transport = Transport::Live(SmtpSettings {
            host: "127.0.0.1".to_string(),
            port: 1,
            username: "login".to_string(),
            password: "secret".to_string(),
            from_address: "shop@example.com".to_string(),
        });

        let result = dispatch(&req, &message, &transport).await;
        assert!(matches!(result, Err(NotifyError::Transport(_))));
    }
}
