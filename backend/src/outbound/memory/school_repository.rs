//! In-memory [`SchoolRepository`].

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{SchoolRepository, SchoolRepositoryError};
use crate::domain::{EmailAddress, ReferCode, School, SchoolId};

#[derive(Debug, Default)]
struct SchoolIndex {
    by_id: HashMap<SchoolId, School>,
    by_email: HashMap<EmailAddress, SchoolId>,
    by_refer_code: HashMap<ReferCode, SchoolId>,
}

impl SchoolIndex {
    fn lookup(&self, id: Option<&SchoolId>) -> Option<School> {
        id.and_then(|id| self.by_id.get(id)).cloned()
    }
}

/// School store held in process memory.
///
/// Clones share the same underlying store.
#[derive(Debug, Default, Clone)]
pub struct InMemorySchoolRepository {
    inner: Arc<RwLock<SchoolIndex>>,
}

impl InMemorySchoolRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.inner.read().await.by_id.len()
    }
}

#[async_trait]
impl SchoolRepository for InMemorySchoolRepository {
    async fn insert(&self, school: &School) -> Result<(), SchoolRepositoryError> {
        let mut index = self.inner.write().await;
        if index.by_email.contains_key(school.email()) {
            return Err(SchoolRepositoryError::duplicate_email(school.email().as_str()));
        }
        if index.by_refer_code.contains_key(school.refer_code()) {
            return Err(SchoolRepositoryError::duplicate_refer_code(
                school.refer_code().as_str(),
            ));
        }

        index.by_email.insert(school.email().clone(), school.id());
        index
            .by_refer_code
            .insert(school.refer_code().clone(), school.id());
        index.by_id.insert(school.id(), school.clone());
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<School>, SchoolRepositoryError> {
        let index = self.inner.read().await;
        Ok(index.lookup(index.by_email.get(email)))
    }

    async fn find_by_refer_code(
        &self,
        refer_code: &ReferCode,
    ) -> Result<Option<School>, SchoolRepositoryError> {
        let index = self.inner.read().await;
        Ok(index.lookup(index.by_refer_code.get(refer_code)))
    }
}
