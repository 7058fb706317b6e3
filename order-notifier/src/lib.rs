//! Order notifier - order-status emails over SMTP, with a credential-free demo mode.
//!
//! One request in, one response out:
//!
//! ```text
//! HTTP / serverless event → web::handle → request → compose → dispatch → ResponseEnvelope
//! ```
//!
//! When `SMTP_HOST`, `SMTP_USER` or `SMTP_PASSWORD` is missing the dispatcher
//! answers in demo mode: the email is composed but nothing is sent.

pub mod compose;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod request;
pub mod web;

// Re-export commonly used types
pub use compose::{compose, RenderedMessage};
pub use config::{Config, SmtpSettings, Transport, TransportConfig};
pub use dispatch::{dispatch, DemoDetails, Dispatched};
pub use error::NotifyError;
pub use request::{NotificationRequest, OrderTotal};
pub use web::{handle, handle_event, AppState, HttpEvent, ResponseEnvelope, TransportSource};
