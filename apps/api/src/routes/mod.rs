pub mod health;

use axum::{routing::get, Router};

use crate::recommendation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/recommendations",
            get(handlers::handle_get_recommendations),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{Config, ScoringConfig};
    use crate::models::job::{ExperienceLevel, JobRecord};
    use crate::models::user::UserRecord;
    use crate::recommendation::orchestrator::{MSG_FALLBACK_AI_FAILED, MSG_NO_RESUME};
    use crate::resume::FileResumeReader;
    use crate::scoring_client::ScoringClient;
    use crate::store::memory::{MemoryJobStore, MemoryUserStore};

    const UNREACHABLE: &str = "http://127.0.0.1:1";

    fn job(id: &str, required: &[&str]) -> JobRecord {
        JobRecord {
            id: id.to_string(),
            title: "Developer".to_string(),
            category: "IT".to_string(),
            required_skills: required.iter().map(|s| s.to_string()).collect(),
            preferred_skills: vec![],
            experience_level: ExperienceLevel::EntryLevel,
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            job_type: "Full-time".to_string(),
            workplace_type: "Remote".to_string(),
            salary_display: String::new(),
            posted_at: None,
        }
    }

    fn app(users: Vec<UserRecord>, jobs: Vec<JobRecord>, upload_root: PathBuf) -> Router {
        let scoring = ScoringConfig {
            base_url: UNREACHABLE.to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(1),
        };
        let state = AppState {
            users: Arc::new(MemoryUserStore { users }),
            jobs: Arc::new(MemoryJobStore {
                jobs,
                failure: None,
            }),
            scoring: ScoringClient::new(scoring.clone()).unwrap(),
            resumes: Arc::new(FileResumeReader),
            config: Config {
                database_url: "postgres://unused".to_string(),
                scoring,
                upload_root,
                port: 0,
                rust_log: "info".to_string(),
            },
        };
        build_router(state)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_reports_unavailable_scoring_service() {
        let (status, body) = get_json(app(vec![], vec![], PathBuf::from(".")), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "jobboard-api");
        assert_eq!(body["scoring_service"], "unavailable");
    }

    #[tokio::test]
    async fn test_recommendations_fallback_envelope() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("uploads")).unwrap();
        std::fs::write(root.path().join("uploads/cv.txt"), "Rust and PostgreSQL").unwrap();

        let user = UserRecord {
            id: "u1".to_string(),
            resume: Some("uploads/cv.txt".to_string()),
            experiences: vec![],
        };
        let app = app(
            vec![user],
            vec![job("j1", &["Go"]), job("j2", &["Rust"])],
            root.path().to_path_buf(),
        );

        let (status, body) = get_json(app, "/api/v1/recommendations?user_id=u1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["hasResume"], true);
        assert_eq!(body["isAIRecommendation"], false);
        assert_eq!(body["message"], MSG_FALLBACK_AI_FAILED);

        let recommendations = body["recommendations"].as_array().unwrap();
        assert_eq!(recommendations.len(), 2);
        assert_eq!(recommendations[0]["id"], "j2");
        assert_eq!(recommendations[0]["provenance"], "fallback");
        assert_eq!(recommendations[0]["matchedSkills"][0], "Rust");
    }

    #[tokio::test]
    async fn test_recommendations_without_resume() {
        let user = UserRecord {
            id: "u1".to_string(),
            ..Default::default()
        };
        let app = app(vec![user], vec![job("j1", &["Go"])], PathBuf::from("."));

        let (status, body) = get_json(app, "/api/v1/recommendations?user_id=u1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["hasResume"], false);
        assert_eq!(body["message"], MSG_NO_RESUME);
        assert_eq!(body["recommendations"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_unknown_user_is_404() {
        let (status, body) = get_json(
            app(vec![], vec![], PathBuf::from(".")),
            "/api/v1/recommendations?user_id=nobody",
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_blank_user_id_is_400() {
        let (status, body) = get_json(
            app(vec![], vec![], PathBuf::from(".")),
            "/api/v1/recommendations?user_id=%20",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_missing_user_id_is_json_400() {
        let (status, body) = get_json(
            app(vec![], vec![], PathBuf::from(".")),
            "/api/v1/recommendations",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "user_id is required");
    }
}
