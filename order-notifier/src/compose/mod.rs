//! Message composition.
//!
//! Turns a validated [`NotificationRequest`] into the subject and HTML body
//! of the customer email. Composition is pure: no I/O and no clock, so the
//! same request always renders to the same bytes.
//!
//! ```text
//! NotificationRequest → status_phrase() → TemplateRenderer → RenderedMessage
//! ```

pub mod catalog;
pub mod template;

use tracing::debug;

use crate::error::NotifyError;
use crate::request::NotificationRequest;

pub use catalog::{status_phrase, DEFAULT_STATUS_PHRASE, DELIVERED_STATUS, STATUS_CATALOG};
pub use template::{TemplateRenderer, BRAND};

/// A composed email, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    subject: String,
    html: String,
}

impl RenderedMessage {
    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn html(&self) -> &str {
        &self.html
    }
}

/// Compose the email for a notification request.
pub fn compose(request: &NotificationRequest) -> Result<RenderedMessage, NotifyError> {
    let phrase = status_phrase(&request.status);
    let renderer = TemplateRenderer::new()?;

    let message = RenderedMessage {
        subject: template::subject(&request.order_id),
        html: renderer.render_html(request, phrase)?,
    };

    debug!(
        order_id = %request.order_id,
        status = %request.status,
        status_phrase = phrase,
        has_total = request.order_total.is_some(),
        html_length = message.html.len(),
        "message_composed"
    );

    Ok(message)
}
