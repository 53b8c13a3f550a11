//! Field rules for the registration record.
//!
//! Each function checks one field and returns every rule it breaks. A missing
//! value only reports the "required" rule; a present value is checked against
//! all of its rules independently.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::error::Violation;

pub const USERNAME_MIN_LENGTH: usize = 6;
pub const USERNAME_MAX_LENGTH: usize = 12;
pub const PASSWORD_MIN_LENGTH: usize = 6;

const EMAIL_LOCAL_PART_MAX_LENGTH: usize = 64;
const EMAIL_DOMAIN_MAX_LENGTH: usize = 255;

static EMAIL_LOCAL_PART: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~\x{80}-\x{10FFFF}-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~\x{80}-\x{10FFFF}-]+)*$"#,
    )
    .expect("email local part pattern is valid")
});

static EMAIL_DOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[\p{L}\p{N}](?:[\p{L}\p{N}-]{0,61}[\p{L}\p{N}])?(?:\.[\p{L}\p{N}](?:[\p{L}\p{N}-]{0,61}[\p{L}\p{N}])?)*$",
    )
    .expect("email domain pattern is valid")
});

static EMAIL_IP_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[(?:[0-9]{1,3}(?:\.[0-9]{1,3}){3}|IPv6:[0-9a-fA-F:.]+)\]$")
        .expect("email ip literal pattern is valid")
});

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn validate_username(value: Option<&str>) -> Vec<Violation> {
    let Some(value) = value else {
        return vec![Violation::UsernameRequired];
    };

    let mut violations = Vec::new();
    if is_blank(value) {
        violations.push(Violation::UsernameRequired);
    }
    let length = value.chars().count();
    if !(USERNAME_MIN_LENGTH..=USERNAME_MAX_LENGTH).contains(&length) {
        violations.push(Violation::UsernameLength);
    }
    violations
}

pub fn validate_email(value: Option<&str>) -> Vec<Violation> {
    match value {
        None => vec![Violation::EmailRequired],
        Some("") => vec![Violation::EmailRequired],
        Some(value) if !is_email_address(value) => vec![Violation::InvalidEmail],
        Some(_) => Vec::new(),
    }
}

pub fn validate_password(value: Option<&str>) -> Vec<Violation> {
    let Some(value) = value else {
        return vec![Violation::PasswordRequired];
    };

    let mut violations = Vec::new();
    if is_blank(value) {
        violations.push(Violation::PasswordRequired);
    }
    if value.chars().count() < PASSWORD_MIN_LENGTH {
        violations.push(Violation::PasswordTooShort);
    }
    if !value.chars().any(|c| c.is_ascii_uppercase()) {
        violations.push(Violation::PasswordMissingUppercase);
    }
    if !value.chars().any(|c| c.is_ascii_lowercase()) {
        violations.push(Violation::PasswordMissingLowercase);
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        violations.push(Violation::PasswordMissingDigit);
    }
    violations
}

/// `local@domain`, split at the last `@`.
pub fn is_email_address(value: &str) -> bool {
    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };

    if local.chars().count() > EMAIL_LOCAL_PART_MAX_LENGTH
        || domain.chars().count() > EMAIL_DOMAIN_MAX_LENGTH
    {
        return false;
    }

    EMAIL_LOCAL_PART.is_match(local)
        && (EMAIL_DOMAIN.is_match(domain) || EMAIL_IP_LITERAL.is_match(domain))
}
