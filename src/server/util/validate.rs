//! Input validation shared across services.

use crate::server::error::{hostel::HostelError, Error};

/// Roll numbers are an alphabetic prefix followed by a numeric suffix, e.g. `CS2023001`.
pub fn is_valid_roll_no(roll_no: &str) -> bool {
    let digits_at = match roll_no.find(|c: char| c.is_ascii_digit()) {
        Some(index) => index,
        None => return false,
    };
    let (prefix, suffix) = roll_no.split_at(digits_at);

    !prefix.is_empty()
        && prefix.chars().all(|c| c.is_ascii_alphabetic())
        && suffix.chars().all(|c| c.is_ascii_digit())
}

pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
        && !email.chars().any(char::is_whitespace)
        && !domain.contains('@')
}

/// Contact numbers are exactly ten digits.
pub fn is_valid_contact_no(contact_no: &str) -> bool {
    contact_no.len() == 10 && contact_no.chars().all(|c| c.is_ascii_digit())
}

/// Trims `value` and rejects it when shorter than `min_len` characters.
pub fn require_min_len(field: &str, value: &str, min_len: usize) -> Result<String, Error> {
    let trimmed = value.trim();
    if trimmed.chars().count() < min_len {
        return Err(HostelError::validation(format!(
            "{} must be at least {} characters",
            field, min_len
        ))
        .into());
    }

    Ok(trimmed.to_string())
}

/// Trims `value` and rejects it when empty.
pub fn require_non_empty(field: &str, value: &str) -> Result<String, Error> {
    require_min_len(field, value, 1).map_err(|_| {
        HostelError::validation(format!("{} is required", field)).into()
    })
}
