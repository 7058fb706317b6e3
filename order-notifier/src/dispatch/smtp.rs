//! SMTP delivery through lettre's async transport.
//!
//! Each send opens its own connection (the transport is built without a
//! pool), upgrades it with STARTTLS, authenticates and hands the message
//! over. The connection is dropped when `send` returns, on success or error.

use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::info;

use crate::compose::RenderedMessage;
use crate::config::SmtpSettings;
use crate::error::NotifyError;

/// Build the MIME message: `multipart/alternative` with a single HTML part.
pub fn build_message(
    from: &str,
    to: &str,
    message: &RenderedMessage,
) -> Result<Message, NotifyError> {
    let from: Mailbox = from.parse()?;
    let to: Mailbox = to.parse()?;

    let email = Message::builder()
        .from(from)
        .to(to)
        .subject(message.subject())
        .multipart(
            MultiPart::alternative().singlepart(
                SinglePart::builder()
                    .header(ContentType::TEXT_HTML)
                    .body(message.html().to_string()),
            ),
        )?;

    Ok(email)
}

/// Deliver a message through the configured relay.
pub async fn send(
    settings: &SmtpSettings,
    to: &str,
    message: &RenderedMessage,
) -> Result<(), NotifyError> {
    let email = build_message(&settings.from_address, to, message)?;

    let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
        .port(settings.port)
        .credentials(Credentials::new(
            settings.username.clone(),
            settings.password.clone(),
        ))
        .build();

    info!(
        host = %settings.host,
        port = settings.port,
        to = %to,
        "smtp_sending"
    );

    let response = transport.send(email).await?;

    info!(
        host = %settings.host,
        code = %response.code(),
        "smtp_accepted"
    );

    Ok(())
}
