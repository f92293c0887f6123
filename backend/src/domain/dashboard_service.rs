//! Dashboard service: per-school payment overview and student search.
//!
//! Every query is filtered by the refer code of the authenticated identity.
//! Rows returned by the store are filtered again before they leave the
//! domain.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::failures::student_store_error;
use crate::domain::ports::{DashboardQuery, StudentRepository};
use crate::domain::{Dashboard, Error, SchoolIdentity, Student, StudentSearchQuery, StudentSummary};

fn owned_by(identity: &SchoolIdentity, students: Vec<Student>) -> Vec<Student> {
    students
        .into_iter()
        .filter(|student| student.refer_code() == &identity.refer_code)
        .collect()
}

/// Dashboard service implementing [`DashboardQuery`].
#[derive(Clone)]
pub struct DashboardService<R> {
    students: Arc<R>,
}

impl<R> DashboardService<R> {
    /// Create a dashboard service over the student repository.
    pub fn new(students: Arc<R>) -> Self {
        Self { students }
    }
}

#[async_trait]
impl<R> DashboardQuery for DashboardService<R>
where
    R: StudentRepository,
{
    async fn get_dashboard(&self, identity: &SchoolIdentity) -> Result<Dashboard, Error> {
        let students = self
            .students
            .list_by_refer_code(&identity.refer_code)
            .await
            .map_err(student_store_error)?;
        Ok(Dashboard::from_students(&owned_by(identity, students)))
    }

    async fn search_students(
        &self,
        identity: &SchoolIdentity,
        query: &str,
    ) -> Result<Vec<StudentSummary>, Error> {
        let query = StudentSearchQuery::parse(query)?;
        let students = self
            .students
            .search(&identity.refer_code, &query)
            .await
            .map_err(student_store_error)?;
        Ok(owned_by(identity, students)
            .iter()
            .filter(|student| query.matches(student))
            .map(Student::summary)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{MockStudentRepository, StudentRepositoryError};
    use crate::domain::{
        EmailAddress, ErrorCode, PaymentStatus, ReferCode, SchoolId, StudentRegistration,
        StudentRegistrationParts,
    };
    use chrono::Utc;
    use rstest::{fixture, rstest};

    const OWN: &str = "CBSEDAVP800001";
    const OTHER: &str = "ICSEHOLY110001";

    #[fixture]
    fn identity() -> SchoolIdentity {
        SchoolIdentity {
            school_id: SchoolId::random(),
            email: EmailAddress::parse("office@dav.edu.in").expect("valid email"),
            refer_code: ReferCode::parse(OWN).expect("valid code"),
        }
    }

    fn student(name: &str, email: &str, code: &str) -> Student {
        let registration = StudentRegistration::try_from_parts(StudentRegistrationParts {
            name,
            email,
            class_label: "8-C",
            phone: "9876501234",
            school_refer_code: code,
        })
        .expect("valid student");
        Student::register(registration, Utc::now())
    }

    #[rstest]
    #[tokio::test]
    async fn dashboard_counts_only_own_students(identity: SchoolIdentity) {
        let rows = vec![
            student("Asha", "asha@example.com", OWN).confirm_payment(),
            student("Ravi", "ravi@example.com", OWN),
            student("Leak", "leak@example.com", OTHER),
        ];
        let mut repo = MockStudentRepository::new();
        repo.expect_list_by_refer_code()
            .withf(|code| code.as_str() == OWN)
            .return_once(move |_| Ok(rows));

        let dashboard = DashboardService::new(Arc::new(repo))
            .get_dashboard(&identity)
            .await
            .expect("dashboard");

        assert_eq!(dashboard.total_students, 2);
        assert_eq!(dashboard.paid, 1);
        assert_eq!(dashboard.pending, 1);
        assert!(dashboard.students.iter().all(|row| row.name != "Leak"));
    }

    #[rstest]
    #[tokio::test]
    async fn search_returns_every_same_name_student_with_own_status(identity: SchoolIdentity) {
        let rows = vec![
            student("Rahul Sharma", "rahul.a@example.com", OWN).confirm_payment(),
            student("Rahul Sharma", "rahul.b@example.com", OWN),
            student("Rahul Sharma", "rahul.c@example.com", OWN),
        ];
        let mut repo = MockStudentRepository::new();
        repo.expect_search()
            .withf(|code, query| code.as_str() == OWN && query.as_str() == "rahul")
            .return_once(move |_, _| Ok(rows));

        let found = DashboardService::new(Arc::new(repo))
            .search_students(&identity, "  Rahul ")
            .await
            .expect("search");

        assert_eq!(found.len(), 3);
        let statuses: Vec<PaymentStatus> = found.iter().map(|row| row.status).collect();
        assert_eq!(
            statuses,
            vec![PaymentStatus::Paid, PaymentStatus::Pending, PaymentStatus::Pending]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn search_with_no_match_is_empty(identity: SchoolIdentity) {
        let mut repo = MockStudentRepository::new();
        repo.expect_search().return_once(|_, _| Ok(Vec::new()));

        let found = DashboardService::new(Arc::new(repo))
            .search_students(&identity, "zzz")
            .await
            .expect("search");
        assert!(found.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn blank_search_is_invalid_request(identity: SchoolIdentity) {
        let mut repo = MockStudentRepository::new();
        repo.expect_search().times(0);

        let error = DashboardService::new(Arc::new(repo))
            .search_students(&identity, "   ")
            .await
            .expect_err("blank query");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.detail_code(), Some("missing_field"));
    }

    #[rstest]
    #[tokio::test]
    async fn store_outage_is_service_unavailable(identity: SchoolIdentity) {
        let mut repo = MockStudentRepository::new();
        repo.expect_list_by_refer_code()
            .return_once(|_| Err(StudentRepositoryError::connection("refused")));

        let error = DashboardService::new(Arc::new(repo))
            .get_dashboard(&identity)
            .await
            .expect_err("outage");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
