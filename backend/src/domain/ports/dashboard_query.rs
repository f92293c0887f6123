//! Driving port for school dashboards and student search.

use async_trait::async_trait;

use crate::domain::{Dashboard, Error, SchoolIdentity, StudentSummary};

/// Read-side use-cases scoped to the authenticated school.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    /// Payment overview of the identity's own students.
    async fn get_dashboard(&self, identity: &SchoolIdentity) -> Result<Dashboard, Error>;

    /// Search the identity's own students by name or email.
    async fn search_students(
        &self,
        identity: &SchoolIdentity,
        query: &str,
    ) -> Result<Vec<StudentSummary>, Error>;
}
