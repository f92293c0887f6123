//! In-process repositories for development and tests.
//!
//! These adapters honour the same uniqueness and scoping contracts as the
//! PostgreSQL adapters. State lives behind a single `RwLock` per store, so a
//! uniqueness check and the insert it guards happen under one write lock.

mod school_repository;
mod student_repository;

pub use school_repository::InMemorySchoolRepository;
pub use student_repository::InMemoryStudentRepository;
