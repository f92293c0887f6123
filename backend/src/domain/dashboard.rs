//! Dashboard projections and student search queries.

use serde::Serialize;

use super::{FieldValidationError, PaymentStatus, Student, StudentSummary};

/// Longest accepted search query.
pub const SEARCH_QUERY_MAX: usize = 100;

/// Payment overview of one school's students.
///
/// ## Invariants
/// - `total_students == paid + pending == students.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub total_students: usize,
    pub paid: usize,
    pub pending: usize,
    pub students: Vec<StudentSummary>,
}

impl Dashboard {
    /// Aggregate counts over students already scoped to a single school.
    pub fn from_students(students: &[Student]) -> Self {
        let paid = students
            .iter()
            .filter(|student| student.payment_status() == PaymentStatus::Paid)
            .count();
        Self {
            total_students: students.len(),
            paid,
            pending: students.len() - paid,
            students: students.iter().map(Student::summary).collect(),
        }
    }
}

/// Case-insensitive substring query over student names and emails.
///
/// # Examples
/// ```
/// use school_portal::domain::StudentSearchQuery;
///
/// let query = StudentSearchQuery::parse("  ASHA ").expect("non-blank query");
/// assert_eq!(query.as_str(), "asha");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentSearchQuery(String);

impl StudentSearchQuery {
    /// Trim and lowercase the query, rejecting blank input.
    pub fn parse(raw: &str) -> Result<Self, FieldValidationError> {
        const FIELD: &str = "query";
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FieldValidationError::MissingField { field: FIELD });
        }
        if trimmed.chars().count() > SEARCH_QUERY_MAX {
            return Err(FieldValidationError::TooLong {
                field: FIELD,
                max: SEARCH_QUERY_MAX,
            });
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    /// Lowercased needle.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether the student's name or email contains the needle.
    pub fn matches(&self, student: &Student) -> bool {
        student.name().to_lowercase().contains(self.as_str())
            || student.email().as_str().contains(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{StudentRegistration, StudentRegistrationParts};
    use chrono::Utc;
    use rstest::rstest;

    fn student(name: &str, email: &str) -> Student {
        let registration = StudentRegistration::try_from_parts(StudentRegistrationParts {
            name,
            email,
            class_label: "9-B",
            phone: "9876501234",
            school_refer_code: "CBSEDAVP800001",
        })
        .expect("valid student");
        Student::register(registration, Utc::now())
    }

    #[rstest]
    fn dashboard_counts_paid_and_pending() {
        let students = vec![
            student("Asha", "asha@example.com").confirm_payment(),
            student("Ravi", "ravi@example.com"),
            student("Meera", "meera@example.com"),
        ];
        let dashboard = Dashboard::from_students(&students);
        assert_eq!(dashboard.total_students, 3);
        assert_eq!(dashboard.paid, 1);
        assert_eq!(dashboard.pending, 2);
        assert_eq!(dashboard.students.len(), 3);
    }

    #[rstest]
    fn empty_dashboard_has_zero_counts() {
        let dashboard = Dashboard::from_students(&[]);
        assert_eq!(dashboard.total_students, 0);
        assert!(dashboard.students.is_empty());
    }

    #[rstest]
    #[case("asha", true)]
    #[case("ASHA", true)]
    #[case("kumari", true)]
    #[case("mail.example", true)]
    #[case("ravi", false)]
    fn query_matches_name_or_email(#[case] raw: &str, #[case] expected: bool) {
        let query = StudentSearchQuery::parse(raw).expect("non-blank");
        let target = student("Asha Kumari", "asha.k@mail.example.org");
        assert_eq!(query.matches(&target), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_query_is_rejected(#[case] raw: &str) {
        let err = StudentSearchQuery::parse(raw).expect_err("blank");
        assert_eq!(err.code(), "missing_field");
        assert_eq!(err.field(), "query");
    }
}
