//! School registration input and the persisted school aggregate.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

use super::fields::required_text;
use super::{
    EmailAddress, FieldValidationError, PasswordHash, PhoneNumber, PinCode, ReferCode,
    derive_refer_code,
};

/// Minimum length of a password chosen at registration.
pub const PASSWORD_MIN: usize = 8;

/// Stable school identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchoolId(Uuid);

impl SchoolId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SchoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SchoolId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Raw registration fields as submitted by a school.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchoolRegistrationParts<'a> {
    pub name: &'a str,
    pub affiliation_code: &'a str,
    pub phone: &'a str,
    pub email: &'a str,
    pub city: &'a str,
    pub pin_code: &'a str,
    pub password: &'a str,
}

/// Validated school registration request.
///
/// ## Invariants
/// - Text fields are trimmed and non-empty.
/// - `password` holds at least [`PASSWORD_MIN`] characters and is zeroed on
///   drop.
///
/// # Examples
/// ```
/// use school_portal::domain::{SchoolRegistration, SchoolRegistrationParts};
///
/// let registration = SchoolRegistration::try_from_parts(SchoolRegistrationParts {
///     name: "DAV Public School",
///     affiliation_code: "CBSE012345",
///     phone: "+91 98765 43210",
///     email: "Office@DAV.edu.in",
///     city: "Patna",
///     pin_code: "800001",
///     password: "correct horse",
/// })
/// .expect("valid registration");
/// assert_eq!(registration.refer_code().as_str(), "CBSEDAVP800001");
/// assert_eq!(registration.email().as_str(), "office@dav.edu.in");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SchoolRegistration {
    name: String,
    affiliation_code: String,
    phone: PhoneNumber,
    email: EmailAddress,
    city: String,
    pin_code: PinCode,
    password: Zeroizing<String>,
}

impl SchoolRegistration {
    /// Validate raw fields, reporting the first offending field.
    pub fn try_from_parts(parts: SchoolRegistrationParts<'_>) -> Result<Self, FieldValidationError> {
        let name = required_text("name", parts.name)?;
        let affiliation_code = required_text("affiliationCode", parts.affiliation_code)?;
        let phone = PhoneNumber::parse(parts.phone)?;
        let email = EmailAddress::parse(parts.email)?;
        let city = required_text("city", parts.city)?;
        let pin_code = PinCode::parse(parts.pin_code)?;

        if parts.password.is_empty() {
            return Err(FieldValidationError::MissingField { field: "password" });
        }
        if parts.password.chars().count() < PASSWORD_MIN {
            return Err(FieldValidationError::PasswordTooShort {
                field: "password",
                min: PASSWORD_MIN,
            });
        }

        Ok(Self {
            name,
            affiliation_code,
            phone,
            email,
            city,
            pin_code,
            password: Zeroizing::new(parts.password.to_owned()),
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn affiliation_code(&self) -> &str {
        self.affiliation_code.as_str()
    }

    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn city(&self) -> &str {
        self.city.as_str()
    }

    pub fn pin_code(&self) -> &PinCode {
        &self.pin_code
    }

    /// Plain-text password; only ever handed to the password hasher.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Candidate refer code for this registration.
    pub fn refer_code(&self) -> ReferCode {
        derive_refer_code(&self.affiliation_code, &self.name, self.pin_code.as_str())
    }
}

impl fmt::Debug for SchoolRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchoolRegistration")
            .field("name", &self.name)
            .field("affiliation_code", &self.affiliation_code)
            .field("email", &self.email)
            .field("city", &self.city)
            .field("pin_code", &self.pin_code)
            .finish_non_exhaustive()
    }
}

/// Input payload for [`School::new`].
#[derive(Debug, Clone)]
pub struct SchoolDraft {
    pub id: SchoolId,
    pub name: String,
    pub affiliation_code: String,
    pub phone: PhoneNumber,
    pub email: EmailAddress,
    pub city: String,
    pub pin_code: PinCode,
    pub password_hash: PasswordHash,
    pub refer_code: ReferCode,
    pub created_at: DateTime<Utc>,
}

/// A registered school.
///
/// ## Invariants
/// - `email` and `refer_code` are unique across all schools.
/// - `refer_code` never changes after registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct School {
    id: SchoolId,
    name: String,
    affiliation_code: String,
    phone: PhoneNumber,
    email: EmailAddress,
    city: String,
    pin_code: PinCode,
    password_hash: PasswordHash,
    refer_code: ReferCode,
    created_at: DateTime<Utc>,
}

impl School {
    /// Assemble a school from already validated parts.
    pub fn new(draft: SchoolDraft) -> Self {
        let SchoolDraft {
            id,
            name,
            affiliation_code,
            phone,
            email,
            city,
            pin_code,
            password_hash,
            refer_code,
            created_at,
        } = draft;
        Self {
            id,
            name,
            affiliation_code,
            phone,
            email,
            city,
            pin_code,
            password_hash,
            refer_code,
            created_at,
        }
    }

    /// Build a new school from a validated registration.
    pub fn register(
        registration: &SchoolRegistration,
        refer_code: ReferCode,
        password_hash: PasswordHash,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self::new(SchoolDraft {
            id: SchoolId::random(),
            name: registration.name.clone(),
            affiliation_code: registration.affiliation_code.clone(),
            phone: registration.phone.clone(),
            email: registration.email.clone(),
            city: registration.city.clone(),
            pin_code: registration.pin_code.clone(),
            password_hash,
            refer_code,
            created_at,
        })
    }

    pub fn id(&self) -> SchoolId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn affiliation_code(&self) -> &str {
        self.affiliation_code.as_str()
    }

    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn city(&self) -> &str {
        self.city.as_str()
    }

    pub fn pin_code(&self) -> &PinCode {
        &self.pin_code
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn refer_code(&self) -> &ReferCode {
        &self.refer_code
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Public view of the school without its credential hash.
    pub fn profile(&self) -> SchoolProfile {
        SchoolProfile {
            id: self.id,
            name: self.name.clone(),
            affiliation_code: self.affiliation_code.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            city: self.city.clone(),
            pin_code: self.pin_code.clone(),
            refer_code: self.refer_code.clone(),
            created_at: self.created_at,
        }
    }
}

/// School details safe to return to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolProfile {
    pub id: SchoolId,
    pub name: String,
    pub affiliation_code: String,
    pub phone: PhoneNumber,
    pub email: EmailAddress,
    pub city: String,
    pub pin_code: PinCode,
    pub refer_code: ReferCode,
    pub created_at: DateTime<Utc>,
}
