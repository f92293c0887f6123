//! PostgreSQL-backed `SchoolRepository` implementation using Diesel ORM.
//!
//! Email and refer code uniqueness is enforced by table constraints, so a
//! registration that loses a race surfaces as the matching duplicate error
//! rather than a generic query failure.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{SchoolRepository, SchoolRepositoryError};
use crate::domain::{EmailAddress, ReferCode, School};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{NewSchoolRow, SchoolRow};
use super::pool::{DbPool, PoolError};
use super::schema::schools;

const EMAIL_CONSTRAINT: &str = "schools_email_key";
const REFER_CODE_CONSTRAINT: &str = "schools_refer_code_key";

/// Diesel-backed implementation of the school repository port.
#[derive(Clone)]
pub struct DieselSchoolRepository {
    pool: DbPool,
}

impl DieselSchoolRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SchoolRepositoryError {
    SchoolRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, school: Option<&School>) -> SchoolRepositoryError {
    match classify_diesel_error(error, "school repository") {
        DieselFailure::UniqueViolation { constraint } => match (constraint.as_deref(), school) {
            (Some(EMAIL_CONSTRAINT), Some(school)) => {
                SchoolRepositoryError::duplicate_email(school.email().as_str())
            }
            (Some(REFER_CODE_CONSTRAINT), Some(school)) => {
                SchoolRepositoryError::duplicate_refer_code(school.refer_code().as_str())
            }
            (other, _) => {
                warn!(constraint = ?other, "unrecognised unique violation on schools");
                SchoolRepositoryError::query("unique constraint violated")
            }
        },
        DieselFailure::Connection(message) => SchoolRepositoryError::connection(message),
        DieselFailure::Query(message) => SchoolRepositoryError::query(message),
    }
}

fn row_to_school(row: SchoolRow) -> Result<School, SchoolRepositoryError> {
    School::try_from(row)
        .map_err(|message| SchoolRepositoryError::query(format!("invalid school row: {message}")))
}

#[async_trait]
impl SchoolRepository for DieselSchoolRepository {
    async fn insert(&self, school: &School) -> Result<(), SchoolRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(schools::table)
            .values(&NewSchoolRow::from(school))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(school)))?;

        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<School>, SchoolRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<SchoolRow> = schools::table
            .filter(schools::email.eq(email.as_str()))
            .select(SchoolRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;

        row.map(row_to_school).transpose()
    }

    async fn find_by_refer_code(
        &self,
        refer_code: &ReferCode,
    ) -> Result<Option<School>, SchoolRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<SchoolRow> = schools::table
            .filter(schools::refer_code.eq(refer_code.as_str()))
            .select(SchoolRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;

        row.map(row_to_school).transpose()
    }
}
