//! Refer codes: the public join key between schools and students.
//!
//! A school's refer code is derived deterministically from its affiliation
//! code, name and pin code by [`derive_refer_code`]. Because derivation is
//! pure, two schools with matching prefixes and pin code derive the same
//! code; uniqueness is enforced by the registration service and the store,
//! never by the deriver.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of leading characters taken from the affiliation code and name.
pub const REFER_CODE_PREFIX_LEN: usize = 4;

/// Validation errors raised when parsing a caller-supplied refer code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferCodeValidationError {
    /// The code was missing or blank.
    #[error("refer code must not be empty")]
    Empty,
    /// The code contained whitespace between characters.
    #[error("refer code must not contain whitespace")]
    ContainsWhitespace,
}

/// Identifier linking students to the school that derived it.
///
/// ## Invariants
/// - Never contains whitespace.
/// - Immutable once assigned to a school.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReferCode(String);

impl ReferCode {
    /// Parse a code submitted by a student or read back from storage.
    ///
    /// Surrounding whitespace is trimmed; the remaining text is matched
    /// exactly (codes are case-sensitive because the pin code portion is
    /// kept verbatim).
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, ReferCodeValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ReferCodeValidationError::Empty);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(ReferCodeValidationError::ContainsWhitespace);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the code as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ReferCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ReferCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ReferCode> for String {
    fn from(value: ReferCode) -> Self {
        value.0
    }
}

impl TryFrom<String> for ReferCode {
    type Error = ReferCodeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Derive the candidate refer code for a school.
///
/// The code is the concatenation of:
/// 1. the first four characters of the trimmed affiliation code, uppercased;
/// 2. the first four characters of the school name with every whitespace
///    character removed, uppercased;
/// 3. the pin code exactly as given (no trimming, no case change, no
///    truncation).
///
/// Shorter inputs contribute every character they have; nothing is padded.
///
/// # Examples
/// ```
/// use school_portal::domain::derive_refer_code;
///
/// let code = derive_refer_code("CBSE012345", "DAV Public School", "800001");
/// assert_eq!(code.as_str(), "CBSEDAVP800001");
/// ```
pub fn derive_refer_code(affiliation_code: &str, school_name: &str, pin_code: &str) -> ReferCode {
    let affiliation_prefix = leading_uppercase(affiliation_code.trim().chars());
    let name_prefix = leading_uppercase(school_name.chars().filter(|c| !c.is_whitespace()));

    ReferCode(format!("{affiliation_prefix}{name_prefix}{pin_code}"))
}

fn leading_uppercase(chars: impl Iterator<Item = char>) -> String {
    chars
        .take(REFER_CODE_PREFIX_LEN)
        .collect::<String>()
        .to_uppercase()
}
