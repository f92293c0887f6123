//! Validated field values shared by school and student registration.
//!
//! Each constructor trims caller input and rejects values the registration
//! flows cannot store. Failures carry the offending field name so inbound
//! adapters can report exactly which input was wrong.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::Error;

/// Longest free-text value accepted for names, cities and class labels.
pub const TEXT_FIELD_MAX: usize = 200;
/// Longest accepted postal (pin) code.
pub const PIN_CODE_MAX: usize = 10;
/// Digit bounds for phone numbers, ignoring separators and a leading `+`.
pub const PHONE_DIGITS_MIN: usize = 7;
/// Upper digit bound for phone numbers.
pub const PHONE_DIGITS_MAX: usize = 15;

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldValidationError {
    /// A required field was absent or blank.
    #[error("{field} is required")]
    MissingField { field: &'static str },
    /// A free-text field exceeded [`TEXT_FIELD_MAX`].
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    /// The email address is not of the form `local@domain.tld`.
    #[error("{field} must be a valid email address")]
    InvalidEmail { field: &'static str },
    /// The phone number has the wrong shape.
    #[error("{field} must contain between {min} and {max} digits", min = PHONE_DIGITS_MIN, max = PHONE_DIGITS_MAX)]
    InvalidPhone { field: &'static str },
    /// The pin code contains unsupported characters or is too long.
    #[error("{field} must be at most {max} letters or digits", max = PIN_CODE_MAX)]
    InvalidPinCode { field: &'static str },
    /// The chosen password is too short.
    #[error("{field} must be at least {min} characters")]
    PasswordTooShort { field: &'static str, min: usize },
    /// The refer code could not be parsed.
    #[error("{field} must be a refer code without spaces")]
    InvalidReferCode { field: &'static str },
}

impl FieldValidationError {
    /// Name of the offending input field, as exposed on the wire.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field }
            | Self::TooLong { field, .. }
            | Self::InvalidEmail { field }
            | Self::InvalidPhone { field }
            | Self::InvalidPinCode { field }
            | Self::PasswordTooShort { field, .. }
            | Self::InvalidReferCode { field } => field,
        }
    }

    /// Stable machine-readable discriminator placed in `details.code`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::TooLong { .. } => "field_too_long",
            Self::InvalidEmail { .. } => "invalid_email",
            Self::InvalidPhone { .. } => "invalid_phone",
            Self::InvalidPinCode { .. } => "invalid_pin_code",
            Self::PasswordTooShort { .. } => "password_too_short",
            Self::InvalidReferCode { .. } => "invalid_refer_code",
        }
    }
}

impl From<FieldValidationError> for Error {
    fn from(value: FieldValidationError) -> Self {
        Error::invalid_request(value.to_string()).with_details(json!({
            "field": value.field(),
            "code": value.code(),
        }))
    }
}

/// Trim `raw` and require it to be non-empty and reasonably short.
pub(crate) fn required_text(field: &'static str, raw: &str) -> Result<String, FieldValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldValidationError::MissingField { field });
    }
    if trimmed.chars().count() > TEXT_FIELD_MAX {
        return Err(FieldValidationError::TooLong {
            field,
            max: TEXT_FIELD_MAX,
        });
    }
    Ok(trimmed.to_owned())
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@.]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Normalised email address.
///
/// ## Invariants
/// - Trimmed and lowercased, so equality is case-insensitive.
/// - Matches `local@domain.tld` with no whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate an email for the given input field.
    pub fn parse_field(field: &'static str, raw: &str) -> Result<Self, FieldValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FieldValidationError::MissingField { field });
        }
        let normalised = trimmed.to_lowercase();
        if normalised.chars().count() > TEXT_FIELD_MAX || !email_regex().is_match(&normalised) {
            return Err(FieldValidationError::InvalidEmail { field });
        }
        Ok(Self(normalised))
    }

    /// Validate an email submitted in the `email` field.
    pub fn parse(raw: &str) -> Result<Self, FieldValidationError> {
        Self::parse_field("email", raw)
    }

    /// Borrow the normalised address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = FieldValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Contact phone number with separators removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate a phone number submitted in the `phone` field.
    ///
    /// Spaces, hyphens and parentheses are dropped. A single leading `+` is
    /// kept. Between seven and fifteen digits must remain.
    pub fn parse(raw: &str) -> Result<Self, FieldValidationError> {
        const FIELD: &str = "phone";
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FieldValidationError::MissingField { field: FIELD });
        }

        let (prefix, rest) = match trimmed.strip_prefix('+') {
            Some(rest) => ("+", rest),
            None => ("", trimmed),
        };
        let digits: String = rest
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
            .collect();
        let valid = digits.chars().all(|c| c.is_ascii_digit())
            && (PHONE_DIGITS_MIN..=PHONE_DIGITS_MAX).contains(&digits.len());
        if !valid {
            return Err(FieldValidationError::InvalidPhone { field: FIELD });
        }
        Ok(Self(format!("{prefix}{digits}")))
    }

    /// Borrow the normalised number.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = FieldValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Postal (pin) code, kept verbatim apart from surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PinCode(String);

impl PinCode {
    /// Validate a pin code submitted in the `pinCode` field.
    pub fn parse(raw: &str) -> Result<Self, FieldValidationError> {
        const FIELD: &str = "pinCode";
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FieldValidationError::MissingField { field: FIELD });
        }
        if trimmed.len() > PIN_CODE_MAX || !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(FieldValidationError::InvalidPinCode { field: FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the pin code.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<PinCode> for String {
    fn from(value: PinCode) -> Self {
        value.0
    }
}

impl TryFrom<String> for PinCode {
    type Error = FieldValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}
