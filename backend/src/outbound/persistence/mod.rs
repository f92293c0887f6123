//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the school and student
//! repository ports backed by PostgreSQL via Diesel with async support
//! through `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel rows and domain types. No business logic resides here.
//! - **Internal models**: Row structs (`models.rs`) and schema definitions
//!   (`schema.rs`) never leave this module.
//! - **Constraint-backed uniqueness**: school email and refer code
//!   uniqueness is enforced by the database and surfaced as typed duplicate
//!   errors.
//!
//! # Example
//!
//! ```ignore
//! use school_portal::outbound::persistence::{
//!     DbPool, DieselSchoolRepository, PoolConfig, run_pending_migrations,
//! };
//!
//! run_pending_migrations("postgres://localhost/portal").await?;
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/portal")).await?;
//! let schools = DieselSchoolRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_school_repository;
mod diesel_student_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_school_repository::DieselSchoolRepository;
pub use diesel_student_repository::DieselStudentRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
