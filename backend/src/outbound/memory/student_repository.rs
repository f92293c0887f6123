//! In-memory [`StudentRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{StudentRepository, StudentRepositoryError};
use crate::domain::{ReferCode, Student, StudentId, StudentSearchQuery};

/// Student store held in process memory, kept in registration order.
///
/// Clones share the same underlying store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStudentRepository {
    inner: Arc<RwLock<Vec<Student>>>,
}

impl InMemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn insert(&self, student: &Student) -> Result<(), StudentRepositoryError> {
        self.inner.write().await.push(student.clone());
        Ok(())
    }

    async fn list_by_refer_code(
        &self,
        refer_code: &ReferCode,
    ) -> Result<Vec<Student>, StudentRepositoryError> {
        let students = self.inner.read().await;
        Ok(students
            .iter()
            .filter(|student| student.refer_code() == refer_code)
            .cloned()
            .collect())
    }

    async fn search(
        &self,
        refer_code: &ReferCode,
        query: &StudentSearchQuery,
    ) -> Result<Vec<Student>, StudentRepositoryError> {
        let students = self.inner.read().await;
        Ok(students
            .iter()
            .filter(|student| student.refer_code() == refer_code && query.matches(student))
            .cloned()
            .collect())
    }

    async fn mark_paid(&self, id: &StudentId) -> Result<Option<Student>, StudentRepositoryError> {
        let mut students = self.inner.write().await;
        let Some(slot) = students.iter_mut().find(|student| student.id() == *id) else {
            return Ok(None);
        };
        *slot = slot.clone().confirm_payment();
        Ok(Some(slot.clone()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Utc;
    use rstest::{fixture, rstest};

    use crate::domain::{PaymentStatus, StudentRegistration, StudentRegistrationParts};

    fn student(name: &str, email: &str, code: &str) -> Student {
        let registration = StudentRegistration::try_from_parts(StudentRegistrationParts {
            name,
            email,
            class_label: "10-A",
            phone: "9876501234",
            school_refer_code: code,
        })
        .expect("valid registration");
        Student::register(registration, Utc::now())
    }

    #[fixture]
    fn code() -> ReferCode {
        ReferCode::parse("CBSEDAVP800001").expect("code")
    }

    #[rstest]
    #[tokio::test]
    async fn listing_only_returns_students_under_the_code(code: ReferCode) {
        let repo = InMemoryStudentRepository::new();
        repo.insert(&student("Asha", "asha@example.com", "CBSEDAVP800001"))
            .await
            .expect("insert");
        repo.insert(&student("Ravi", "ravi@example.com", "ICSEHOLY110001"))
            .await
            .expect("insert");
        repo.insert(&student("Meera", "meera@example.com", "CBSEDAVP800001"))
            .await
            .expect("insert");

        let names: Vec<String> = repo
            .list_by_refer_code(&code)
            .await
            .expect("list")
            .iter()
            .map(|s| s.name().to_owned())
            .collect();
        assert_eq!(names, vec!["Asha", "Meera"]);
    }

    #[rstest]
    #[tokio::test]
    async fn search_matches_name_or_email_within_code(code: ReferCode) {
        let repo = InMemoryStudentRepository::new();
        repo.insert(&student("Rahul Sharma", "r1@example.com", "CBSEDAVP800001"))
            .await
            .expect("insert");
        repo.insert(&student("Priya", "rahul.fan@example.com", "CBSEDAVP800001"))
            .await
            .expect("insert");
        repo.insert(&student("Rahul Verma", "r3@example.com", "ICSEHOLY110001"))
            .await
            .expect("insert");

        let query = StudentSearchQuery::parse("RAHUL").expect("query");
        let found = repo.search(&code, &query).await.expect("search");
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|s| s.refer_code() == &code));
    }

    #[rstest]
    #[tokio::test]
    async fn mark_paid_updates_only_the_target() {
        let repo = InMemoryStudentRepository::new();
        let first = student("Rahul Sharma", "r1@example.com", "CBSEDAVP800001");
        let second = student("Rahul Sharma", "r2@example.com", "CBSEDAVP800001");
        repo.insert(&first).await.expect("insert");
        repo.insert(&second).await.expect("insert");

        let updated = repo
            .mark_paid(&first.id())
            .await
            .expect("update")
            .expect("present");
        assert_eq!(updated.payment_status(), PaymentStatus::Paid);

        let listed = repo
            .list_by_refer_code(second.refer_code())
            .await
            .expect("list");
        let untouched = listed
            .iter()
            .find(|student| student.id() == second.id())
            .expect("present");
        assert_eq!(untouched.payment_status(), PaymentStatus::Pending);
    }

    #[rstest]
    #[tokio::test]
    async fn mark_paid_for_unknown_student_is_none() {
        let repo = InMemoryStudentRepository::new();
        assert!(repo.mark_paid(&StudentId::random()).await.expect("update").is_none());
    }
}
