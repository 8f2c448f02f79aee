//! In-memory stores for exercising the recommendation flow without a database.

use anyhow::Result;
use async_trait::async_trait;

use crate::models::job::JobRecord;
use crate::models::user::UserRecord;
use crate::store::{JobStore, UserStore};

#[derive(Default)]
pub struct MemoryUserStore {
    pub users: Vec<UserRecord>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_user(&self, user_id: &str) -> Result<Option<UserRecord>> {
        Ok(self.users.iter().find(|u| u.id == user_id).cloned())
    }
}

#[derive(Default)]
pub struct MemoryJobStore {
    pub jobs: Vec<JobRecord>,
    /// When set, `active_jobs` fails with this message.
    pub failure: Option<String>,
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn active_jobs(&self) -> Result<Vec<JobRecord>> {
        match &self.failure {
            Some(msg) => Err(anyhow::anyhow!(msg.clone())),
            None => Ok(self.jobs.clone()),
        }
    }
}
