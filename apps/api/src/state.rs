use std::sync::Arc;

use crate::config::Config;
use crate::resume::ResumeReader;
use crate::scoring_client::ScoringClient;
use crate::store::{JobStore, UserStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub jobs: Arc<dyn JobStore>,
    pub scoring: ScoringClient,
    pub resumes: Arc<dyn ResumeReader>,
    pub config: Config,
}
