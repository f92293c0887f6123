//! Student registration input, the student record and payment status.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::fields::required_text;
use super::{EmailAddress, FieldValidationError, PhoneNumber, ReferCode};

/// Stable student identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(Uuid);

impl StudentId {
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

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for StudentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Error returned when a stored payment status is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown payment status: {0}")]
pub struct UnknownPaymentStatus(pub String);

/// Payment state of a student's registration fee.
///
/// Students start `Pending` and move to `Paid` once the payment collaborator
/// confirms. There is no transition back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl PaymentStatus {
    /// Stable lowercase label used on the wire and in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }

    /// Apply a payment confirmation. Confirming twice is a no-op.
    #[must_use]
    pub fn confirm(self) -> Self {
        Self::Paid
    }

    pub fn is_paid(self) -> bool {
        matches!(self, Self::Paid)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownPaymentStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            other => Err(UnknownPaymentStatus(other.to_owned())),
        }
    }
}

/// Raw registration fields as submitted by a student.
#[derive(Debug, Clone, Copy, Default)]
pub struct StudentRegistrationParts<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub class_label: &'a str,
    pub phone: &'a str,
    pub school_refer_code: &'a str,
}

/// Validated student registration request.
///
/// The refer code is only checked for shape here; whether a school owns it
/// is decided by the registration service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRegistration {
    name: String,
    email: EmailAddress,
    class_label: String,
    phone: PhoneNumber,
    refer_code: ReferCode,
}

impl StudentRegistration {
    /// Validate raw fields, reporting the first offending field.
    pub fn try_from_parts(
        parts: StudentRegistrationParts<'_>,
    ) -> Result<Self, FieldValidationError> {
        let name = required_text("name", parts.name)?;
        let email = EmailAddress::parse(parts.email)?;
        let class_label = required_text("class", parts.class_label)?;
        let phone = PhoneNumber::parse(parts.phone)?;
        let refer_code = required_text("schoolReferCode", parts.school_refer_code)
            .and_then(|code| {
                ReferCode::parse(code).map_err(|_| FieldValidationError::InvalidReferCode {
                    field: "schoolReferCode",
                })
            })?;

        Ok(Self {
            name,
            email,
            class_label,
            phone,
            refer_code,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn class_label(&self) -> &str {
        self.class_label.as_str()
    }

    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    pub fn refer_code(&self) -> &ReferCode {
        &self.refer_code
    }
}

/// Input payload for [`Student::new`].
#[derive(Debug, Clone)]
pub struct StudentDraft {
    pub id: StudentId,
    pub name: String,
    pub email: EmailAddress,
    pub class_label: String,
    pub phone: PhoneNumber,
    pub refer_code: ReferCode,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

/// A registered student.
///
/// `refer_code` is a lookup key into the school catalogue rather than an
/// ownership pointer; dashboards aggregate students by filtering on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    id: StudentId,
    name: String,
    email: EmailAddress,
    #[serde(rename = "class")]
    class_label: String,
    phone: PhoneNumber,
    #[serde(rename = "schoolReferCode")]
    refer_code: ReferCode,
    #[serde(rename = "status")]
    payment_status: PaymentStatus,
    created_at: DateTime<Utc>,
}

impl Student {
    /// Assemble a student from already validated parts.
    pub fn new(draft: StudentDraft) -> Self {
        let StudentDraft {
            id,
            name,
            email,
            class_label,
            phone,
            refer_code,
            payment_status,
            created_at,
        } = draft;
        Self {
            id,
            name,
            email,
            class_label,
            phone,
            refer_code,
            payment_status,
            created_at,
        }
    }

    /// Build a new pending student from a validated registration.
    pub fn register(registration: StudentRegistration, created_at: DateTime<Utc>) -> Self {
        let StudentRegistration {
            name,
            email,
            class_label,
            phone,
            refer_code,
        } = registration;
        Self::new(StudentDraft {
            id: StudentId::random(),
            name,
            email,
            class_label,
            phone,
            refer_code,
            payment_status: PaymentStatus::Pending,
            created_at,
        })
    }

    pub fn id(&self) -> StudentId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn class_label(&self) -> &str {
        self.class_label.as_str()
    }

    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    pub fn refer_code(&self) -> &ReferCode {
        &self.refer_code
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Return the student with payment confirmed.
    #[must_use]
    pub fn confirm_payment(mut self) -> Self {
        self.payment_status = self.payment_status.confirm();
        self
    }

    /// Dashboard row for this student.
    pub fn summary(&self) -> StudentSummary {
        StudentSummary {
            name: self.name.clone(),
            email: self.email.clone(),
            class_label: self.class_label.clone(),
            status: self.payment_status,
        }
    }
}

/// Student row shown on a school dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub name: String,
    pub email: EmailAddress,
    #[serde(rename = "class")]
    pub class_label: String,
    pub status: PaymentStatus,
}
