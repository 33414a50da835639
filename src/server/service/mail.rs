//! Outgoing mail seam.
//!
//! Registration hands verification links to a [`Mailer`]. The default [`LogMailer`]
//! writes the link to the log, which is enough for development and tests.

use futures::future::BoxFuture;

use crate::server::error::mail::MailError;

/// Sends account emails.
pub trait Mailer: Send + Sync {
    /// Sends the email verification link to `email`.
    fn send_verification<'a>(
        &'a self,
        email: &'a str,
        verification_url: &'a str,
    ) -> BoxFuture<'a, Result<(), MailError>>;
}

/// Mailer that only logs the verification link.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send_verification<'a>(
        &'a self,
        email: &'a str,
        verification_url: &'a str,
    ) -> BoxFuture<'a, Result<(), MailError>> {
        Box::pin(async move {
            tracing::info!(
                "Verification link for {}: {}",
                email,
                verification_url
            );

            Ok(())
        })
    }
}

/// Builds the link a user follows to verify their email.
pub fn verification_url(app_url: &str, token: &str) -> String {
    format!("{}/api/auth/verify?token={}", app_url, token)
}
