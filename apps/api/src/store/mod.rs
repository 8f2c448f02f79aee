//! Collaborator seams for user and job lookups.
//!
//! `AppState` holds these as `Arc<dyn _>` so the recommendation flow never
//! touches the database directly.

pub mod postgres;

#[cfg(test)]
pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::job::JobRecord;
use crate::models::user::UserRecord;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user(&self, user_id: &str) -> Result<Option<UserRecord>>;
}

#[async_trait]
pub trait JobStore: Send + Sync {
    /// Jobs currently open for applications.
    async fn active_jobs(&self) -> Result<Vec<JobRecord>>;
}
