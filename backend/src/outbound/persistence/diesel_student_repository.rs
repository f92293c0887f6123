//! PostgreSQL-backed `StudentRepository` implementation using Diesel ORM.
//!
//! Every multi-row query filters on `school_refer_code` before anything else.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StudentRepository, StudentRepositoryError};
use crate::domain::{PaymentStatus, ReferCode, Student, StudentId, StudentSearchQuery};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{NewStudentRow, StudentRow};
use super::pool::{DbPool, PoolError};
use super::schema::students;

/// Diesel-backed implementation of the student repository port.
#[derive(Clone)]
pub struct DieselStudentRepository {
    pool: DbPool,
}

impl DieselStudentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> StudentRepositoryError {
    StudentRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> StudentRepositoryError {
    match classify_diesel_error(error, "student repository") {
        DieselFailure::Connection(message) => StudentRepositoryError::connection(message),
        DieselFailure::Query(message) => StudentRepositoryError::query(message),
        DieselFailure::UniqueViolation { .. } => {
            StudentRepositoryError::query("unique constraint violated")
        }
    }
}

fn rows_to_students(rows: Vec<StudentRow>) -> Result<Vec<Student>, StudentRepositoryError> {
    rows.into_iter().map(row_to_student).collect()
}

fn row_to_student(row: StudentRow) -> Result<Student, StudentRepositoryError> {
    Student::try_from(row)
        .map_err(|message| StudentRepositoryError::query(format!("invalid student row: {message}")))
}

/// Escape `LIKE` metacharacters and wrap the term for a substring match.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl StudentRepository for DieselStudentRepository {
    async fn insert(&self, student: &Student) -> Result<(), StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(students::table)
            .values(&NewStudentRow::from(student))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(())
    }

    async fn list_by_refer_code(
        &self,
        refer_code: &ReferCode,
    ) -> Result<Vec<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<StudentRow> = students::table
            .filter(students::school_refer_code.eq(refer_code.as_str()))
            .order((students::created_at.asc(), students::id.asc()))
            .select(StudentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_students(rows)
    }

    async fn search(
        &self,
        refer_code: &ReferCode,
        query: &StudentSearchQuery,
    ) -> Result<Vec<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let pattern = contains_pattern(query.as_str());

        let rows: Vec<StudentRow> = students::table
            .filter(students::school_refer_code.eq(refer_code.as_str()))
            .filter(
                students::name
                    .ilike(pattern.as_str())
                    .or(students::email.ilike(pattern.as_str())),
            )
            .order((students::created_at.asc(), students::id.asc()))
            .select(StudentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_students(rows)
    }

    async fn mark_paid(&self, id: &StudentId) -> Result<Option<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<StudentRow> = diesel::update(students::table.filter(students::id.eq(id.as_uuid())))
            .set(students::payment_status.eq(PaymentStatus::Paid.as_str()))
            .returning(StudentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_student).transpose()
    }
}
