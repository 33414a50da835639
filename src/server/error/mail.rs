use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Failed to deliver verification email to {email}: {reason}")]
    Delivery { email: String, reason: String },
}
