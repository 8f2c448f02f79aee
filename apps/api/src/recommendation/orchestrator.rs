//! Recommendation Orchestrator: decides between the AI service and the local
//! ranker for one request.
//!
//! ```text
//! START ─► NO_RESUME*
//!   └─► LOAD_JOBS ─► NO_JOBS*
//!         └─► TRY_AI_DIRECT ─► DONE_AI*
//!               └─► LOCAL_EXTRACT ─► TRY_AI_WITH_LOCAL_DATA ─► DONE_AI*
//!                                       └─► LOCAL_FALLBACK ─► DONE_FALLBACK*
//! ```
//!
//! Every stage after LOAD_JOBS is a separate function returning a
//! [`Transition`]. Service failures are transitions, not errors; only an
//! unexpected error escapes the stage loop, and it gets one last-resort pass
//! through local extraction and ranking before the request fails.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::models::job::JobRecord;
use crate::models::user::UserRecord;
use crate::recommendation::models::{RankedJob, RecommendationResponse};
use crate::recommendation::ranker;
use crate::resume::extractor::ResumeProfile;
use crate::resume::normalizer::{normalize, normalize_analysis, CandidateProfile};
use crate::resume::{resolve_resume_path, ResumeReader};
use crate::resume::vocabulary::DEFAULT_SKILLS;
use crate::scoring_client::ScoringClient;
use crate::store::{JobStore, UserStore};

pub const MSG_NO_RESUME: &str =
    "No resume found. Please upload your resume to get personalized recommendations";
pub const MSG_NO_JOBS: &str = "No active jobs found to match with your profile";
pub const MSG_AI_DIRECT: &str = "AI-powered job recommendations based on your profile";
pub const MSG_AI_LOCAL_DATA: &str = "AI-powered job recommendations";
pub const MSG_FALLBACK_EMPTY_AI: &str =
    "Job recommendations based on your skills (fallback method)";
pub const MSG_FALLBACK_AI_FAILED: &str =
    "Standard matching algorithm used (AI recommendations unavailable)";
pub const MSG_FALLBACK_LAST_RESORT: &str =
    "Standard matching algorithm used due to technical issues";

// ────────────────────────────────────────────────────────────────────────────
// States
// ────────────────────────────────────────────────────────────────────────────

/// Non-terminal stages after the jobs are loaded.
#[derive(Debug)]
pub enum Stage {
    TryAiDirect,
    LocalExtract,
    TryAiWithLocalData {
        profile: ResumeProfile,
        candidate: CandidateProfile,
    },
    LocalFallback {
        profile: ResumeProfile,
        reason: FallbackReason,
    },
}

impl Stage {
    fn name(&self) -> &'static str {
        match self {
            Stage::TryAiDirect => "TRY_AI_DIRECT",
            Stage::LocalExtract => "LOCAL_EXTRACT",
            Stage::TryAiWithLocalData { .. } => "TRY_AI_WITH_LOCAL_DATA",
            Stage::LocalFallback { .. } => "LOCAL_FALLBACK",
        }
    }
}

/// Why the local ranker produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The service answered but matched nothing.
    EmptyAiResult,
    /// The service was unavailable or the call failed.
    AiFailed,
    /// The stage loop itself failed and the last-resort path ran.
    LastResort,
}

/// Terminal states.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    NoResume,
    NoJobs,
    Ai {
        recommendations: Vec<RankedJob>,
        direct: bool,
    },
    Fallback {
        recommendations: Vec<RankedJob>,
        reason: FallbackReason,
    },
}

#[derive(Debug)]
pub enum Transition {
    Next(Stage),
    Done(Outcome),
}

impl Outcome {
    /// Wraps the outcome in the response envelope. The shape is identical for
    /// every path; only the values differ.
    pub fn into_response(self) -> RecommendationResponse {
        let (has_resume, is_ai, recommendations, message) = match self {
            Outcome::NoResume => (false, false, Vec::new(), MSG_NO_RESUME),
            Outcome::NoJobs => (true, false, Vec::new(), MSG_NO_JOBS),
            Outcome::Ai {
                recommendations,
                direct,
            } => {
                let message = if direct {
                    MSG_AI_DIRECT
                } else {
                    MSG_AI_LOCAL_DATA
                };
                (true, true, recommendations, message)
            }
            Outcome::Fallback {
                recommendations,
                reason,
            } => {
                let message = match reason {
                    FallbackReason::EmptyAiResult => MSG_FALLBACK_EMPTY_AI,
                    FallbackReason::AiFailed => MSG_FALLBACK_AI_FAILED,
                    FallbackReason::LastResort => MSG_FALLBACK_LAST_RESORT,
                };
                (true, false, recommendations, message)
            }
        };

        RecommendationResponse {
            has_resume,
            is_ai_recommendation: is_ai,
            recommendations,
            message: message.to_string(),
        }
    }
}

/// What the stages need about one request.
pub struct RequestContext<'a> {
    pub scoring: &'a ScoringClient,
    pub resumes: &'a dyn ResumeReader,
    pub user: &'a UserRecord,
    pub resume_path: PathBuf,
    pub jobs: &'a [JobRecord],
}

// ────────────────────────────────────────────────────────────────────────────
// Entry point
// ────────────────────────────────────────────────────────────────────────────

/// Produces recommendations for `user_id`.
///
/// Fails only when the user does not exist (`NotFound`), the job listing
/// cannot be loaded, or the last-resort fallback itself fails.
pub async fn recommend(
    users: &dyn UserStore,
    jobs: &dyn JobStore,
    scoring: &ScoringClient,
    resumes: &dyn ResumeReader,
    upload_root: &Path,
    user_id: &str,
) -> Result<RecommendationResponse, AppError> {
    let user = users
        .find_user(user_id)
        .await
        .map_err(AppError::Internal)?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let Some(stored_path) = user.resume_path() else {
        info!("No resume found for user {user_id}");
        return Ok(Outcome::NoResume.into_response());
    };
    let resume_path = resolve_resume_path(upload_root, stored_path);
    debug!("Resolved resume path: {}", resume_path.display());

    let active_jobs = jobs.active_jobs().await.map_err(AppError::Internal)?;
    info!("Found {} active jobs for recommendation", active_jobs.len());
    if active_jobs.is_empty() {
        return Ok(Outcome::NoJobs.into_response());
    }

    let ctx = RequestContext {
        scoring,
        resumes,
        user: &user,
        resume_path,
        jobs: &active_jobs,
    };

    let outcome = match run_stages(&ctx).await {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("Recommendation flow failed, trying last-resort fallback: {e:#}");
            last_resort(&ctx)
                .await
                .context("Last-resort fallback failed")
                .map_err(AppError::Internal)?
        }
    };

    Ok(outcome.into_response())
}

async fn run_stages(ctx: &RequestContext<'_>) -> anyhow::Result<Outcome> {
    let mut stage = Stage::TryAiDirect;
    loop {
        debug!("Recommendation stage: {}", stage.name());
        let transition = match stage {
            Stage::TryAiDirect => try_ai_direct(ctx).await,
            Stage::LocalExtract => local_extract(ctx).await?,
            Stage::TryAiWithLocalData { profile, candidate } => {
                try_ai_with_local_data(ctx, profile, candidate).await
            }
            Stage::LocalFallback { profile, reason } => local_fallback(ctx, &profile, reason),
        };

        match transition {
            Transition::Next(next) => stage = next,
            Transition::Done(outcome) => return Ok(outcome),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Stages
// ────────────────────────────────────────────────────────────────────────────

/// Lets the service analyze the resume file itself, then rank with that analysis.
async fn try_ai_direct(ctx: &RequestContext<'_>) -> Transition {
    if !ctx.scoring.check_availability().await {
        info!("AI model is not available, using local parsing");
        return Transition::Next(Stage::LocalExtract);
    }

    let analysis = match ctx.scoring.analyze_resume(&ctx.resume_path).await {
        Ok(analysis) => analysis,
        Err(e) => {
            warn!("AI resume analysis failed, falling back to local parsing: {e}");
            return Transition::Next(Stage::LocalExtract);
        }
    };

    let candidate = normalize_analysis(
        &analysis.skills,
        &analysis.education,
        &ctx.user.experiences,
        &ctx.user.id,
    );

    match ctx.scoring.recommend_jobs(Some(&candidate), ctx.jobs).await {
        Ok(recommendations) if !recommendations.is_empty() => {
            info!(
                "Returning {} AI-powered recommendations",
                recommendations.len()
            );
            Transition::Done(Outcome::Ai {
                recommendations,
                direct: true,
            })
        }
        Ok(_) => {
            warn!("AI returned zero recommendations for analyzed resume, using local parsing");
            Transition::Next(Stage::LocalExtract)
        }
        Err(e) => {
            warn!("AI recommendation with analyzed resume failed: {e}");
            Transition::Next(Stage::LocalExtract)
        }
    }
}

/// Extracts the resume locally. File problems give an empty profile; only
/// unexpected failures are returned as errors.
async fn local_extract(ctx: &RequestContext<'_>) -> anyhow::Result<Transition> {
    let profile = ctx
        .resumes
        .read_profile(&ctx.resume_path)
        .await
        .context("Local resume extraction failed")?;

    let mut candidate = normalize(&profile, &ctx.user.experiences, &ctx.user.id);
    if candidate.skills.is_empty() {
        info!("No skills detected in resume, sending default skills");
        candidate.skills = DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect();
    }

    Ok(Transition::Next(Stage::TryAiWithLocalData { profile, candidate }))
}

async fn try_ai_with_local_data(
    ctx: &RequestContext<'_>,
    profile: ResumeProfile,
    candidate: CandidateProfile,
) -> Transition {
    match ctx.scoring.recommend_jobs(Some(&candidate), ctx.jobs).await {
        Ok(recommendations) if !recommendations.is_empty() => {
            info!(
                "Received {} AI recommendations from locally parsed resume",
                recommendations.len()
            );
            Transition::Done(Outcome::Ai {
                recommendations,
                direct: false,
            })
        }
        Ok(_) => {
            warn!("AI returned zero recommendations, using fallback algorithm");
            Transition::Next(Stage::LocalFallback {
                profile,
                reason: FallbackReason::EmptyAiResult,
            })
        }
        Err(e) => {
            warn!("AI recommendation service unavailable, using fallback method: {e}");
            Transition::Next(Stage::LocalFallback {
                profile,
                reason: FallbackReason::AiFailed,
            })
        }
    }
}

fn local_fallback(
    ctx: &RequestContext<'_>,
    profile: &ResumeProfile,
    reason: FallbackReason,
) -> Transition {
    let recommendations = ranker::rank(ctx.jobs, &profile.skills, &ctx.user.experiences);
    info!(
        "Returning {} fallback recommendations ({reason:?})",
        recommendations.len()
    );
    Transition::Done(Outcome::Fallback {
        recommendations,
        reason,
    })
}

/// Final local-only pass after the stage loop failed.
async fn last_resort(ctx: &RequestContext<'_>) -> anyhow::Result<Outcome> {
    let profile = ctx.resumes.read_profile(&ctx.resume_path).await?;
    let recommendations = ranker::rank(ctx.jobs, &profile.skills, &ctx.user.experiences);
    Ok(Outcome::Fallback {
        recommendations,
        reason: FallbackReason::LastResort,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::json;
    use wiremock::{
        matchers::{body_partial_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;
    use crate::config::ScoringConfig;
    use crate::models::job::ExperienceLevel;
    use crate::models::user::StoredExperience;
    use crate::recommendation::models::Provenance;
    use crate::resume::FileResumeReader;
    use crate::store::memory::{MemoryJobStore, MemoryUserStore};

    const USER_ID: &str = "64b7f0c2a1b2c3d4e5f60718";
    const UNREACHABLE: &str = "http://127.0.0.1:1";

    fn scoring(base_url: &str) -> ScoringClient {
        ScoringClient::new(ScoringConfig {
            base_url: base_url.to_string(),
            api_key: "test-key".to_string(),
            timeout: Duration::from_secs(2),
        })
        .unwrap()
    }

    fn job(id: &str, title: &str, required: &[&str]) -> JobRecord {
        JobRecord {
            id: id.to_string(),
            title: title.to_string(),
            category: "Software Development".to_string(),
            required_skills: required.iter().map(|s| s.to_string()).collect(),
            preferred_skills: vec![],
            experience_level: ExperienceLevel::MidLevel,
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            job_type: "Full-time".to_string(),
            workplace_type: "Remote".to_string(),
            salary_display: String::new(),
            posted_at: None,
        }
    }

    fn jobs() -> Vec<JobRecord> {
        vec![
            job("job-java", "Java Developer", &["Java", "Spring"]),
            job("job-python", "Python Developer", &["Python", "Django"]),
            job("job-react", "Frontend Developer", &["React", "CSS"]),
        ]
    }

    fn user(resume: Option<String>) -> UserRecord {
        UserRecord {
            id: USER_ID.to_string(),
            resume,
            experiences: vec![StoredExperience {
                title: "Software Developer".to_string(),
                description: "Built python services".to_string(),
                start_date: "2019-01".to_string(),
                ..Default::default()
            }],
        }
    }

    /// Writes `text` as `uploads/resume.txt` under a fresh upload root.
    fn upload_root_with_resume(text: &str) -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("uploads")).unwrap();
        std::fs::write(root.path().join("uploads/resume.txt"), text).unwrap();
        root
    }

    async fn run(
        user: UserRecord,
        jobs: Vec<JobRecord>,
        scoring: &ScoringClient,
        upload_root: &Path,
    ) -> Result<RecommendationResponse, AppError> {
        let users = MemoryUserStore { users: vec![user] };
        let jobs = MemoryJobStore {
            jobs,
            failure: None,
        };
        recommend(&users, &jobs, scoring, &FileResumeReader, upload_root, USER_ID).await
    }

    /// Fails the first `failures` reads, then returns `profile`.
    struct FailingReader {
        failures: usize,
        calls: AtomicUsize,
        profile: ResumeProfile,
    }

    impl FailingReader {
        fn new(failures: usize, skills: &[&str]) -> Self {
            Self {
                failures,
                calls: AtomicUsize::new(0),
                profile: ResumeProfile {
                    skills: skills.iter().map(|s| s.to_string()).collect(),
                    ..Default::default()
                },
            }
        }
    }

    #[async_trait]
    impl ResumeReader for FailingReader {
        async fn read_profile(&self, _path: &Path) -> anyhow::Result<ResumeProfile> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                anyhow::bail!("extraction worker crashed");
            }
            Ok(self.profile.clone())
        }
    }

    async fn mount_active(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "active"})))
            .mount(server)
            .await;
    }

    fn recommend_response(ids: &[&str]) -> ResponseTemplate {
        let recommendations: Vec<_> = ids
            .iter()
            .map(|id| json!({"id": id, "match_score": 0.9, "match_reason": "fit"}))
            .collect();
        ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"recommendations": recommendations}
        }))
    }

    #[tokio::test]
    async fn test_service_unreachable_falls_back_to_local_ranking() {
        let root = upload_root_with_resume("python, react, 5 years");
        let response = run(
            user(Some("resume.txt".to_string())),
            jobs(),
            &scoring(UNREACHABLE),
            root.path(),
        )
        .await
        .unwrap();

        assert!(response.has_resume);
        assert!(!response.is_ai_recommendation);
        assert_eq!(response.message, MSG_FALLBACK_AI_FAILED);
        assert_eq!(response.recommendations.len(), 3);
        assert!(response
            .recommendations
            .iter()
            .all(|r| r.match_score.is_some() && r.provenance == Provenance::Fallback));
        assert_ne!(response.recommendations[0].job.id, "job-java");
    }

    #[tokio::test]
    async fn test_user_without_resume_gets_no_resume_envelope() {
        let response = run(user(None), jobs(), &scoring(UNREACHABLE), Path::new("."))
            .await
            .unwrap();

        assert!(!response.has_resume);
        assert!(!response.is_ai_recommendation);
        assert!(response.recommendations.is_empty());
        assert_eq!(response.message, MSG_NO_RESUME);
    }

    #[tokio::test]
    async fn test_no_active_jobs_returns_empty_list() {
        let root = upload_root_with_resume("python");
        let response = run(
            user(Some("resume.txt".to_string())),
            vec![],
            &scoring(UNREACHABLE),
            root.path(),
        )
        .await
        .unwrap();

        assert!(response.recommendations.is_empty());
        assert_eq!(response.message, MSG_NO_JOBS);
    }

    #[tokio::test]
    async fn test_no_active_jobs_with_unreadable_resume() {
        let response = run(
            user(Some("uploads/missing.pdf".to_string())),
            vec![],
            &scoring(UNREACHABLE),
            Path::new("/nonexistent-root"),
        )
        .await
        .unwrap();

        assert!(response.recommendations.is_empty());
        assert_eq!(response.message, MSG_NO_JOBS);
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let users = MemoryUserStore::default();
        let jobs = MemoryJobStore::default();
        let err = recommend(
            &users,
            &jobs,
            &scoring(UNREACHABLE),
            &FileResumeReader,
            Path::new("."),
            USER_ID,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_job_store_failure_is_internal_error() {
        let users = MemoryUserStore {
            users: vec![user(Some("resume.txt".to_string()))],
        };
        let jobs = MemoryJobStore {
            jobs: vec![],
            failure: Some("connection reset".to_string()),
        };
        let err = recommend(
            &users,
            &jobs,
            &scoring(UNREACHABLE),
            &FileResumeReader,
            Path::new("."),
            USER_ID,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn test_ai_direct_path() {
        let server = MockServer::start().await;
        mount_active(&server).await;
        Mock::given(method("POST"))
            .and(path("/api/analyze-resume"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"skills": ["python", "django"], "education": [], "text": "..."}
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/recommend-jobs"))
            .and(body_partial_json(json!({"resume_data": {"skills": ["python", "django"]}})))
            .respond_with(recommend_response(&["job-python"]))
            .expect(1)
            .mount(&server)
            .await;

        let root = upload_root_with_resume("python django");
        let response = run(
            user(Some("uploads/resume.txt".to_string())),
            jobs(),
            &scoring(&server.uri()),
            root.path(),
        )
        .await
        .unwrap();

        assert!(response.is_ai_recommendation);
        assert_eq!(response.message, MSG_AI_DIRECT);
        assert_eq!(response.recommendations.len(), 1);
        assert_eq!(response.recommendations[0].job.id, "job-python");
        assert_eq!(response.recommendations[0].provenance, Provenance::Ai);
        assert_eq!(response.recommendations[0].match_reason.as_deref(), Some("fit"));
    }

    #[tokio::test]
    async fn test_failed_analysis_retries_ai_with_local_data() {
        let server = MockServer::start().await;
        mount_active(&server).await;
        Mock::given(method("POST"))
            .and(path("/api/analyze-resume"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/recommend-jobs"))
            .respond_with(recommend_response(&["job-react", "job-python"]))
            .expect(1)
            .mount(&server)
            .await;

        let root = upload_root_with_resume("React and Python developer");
        let response = run(
            user(Some("resume.txt".to_string())),
            jobs(),
            &scoring(&server.uri()),
            root.path(),
        )
        .await
        .unwrap();

        assert!(response.is_ai_recommendation);
        assert_eq!(response.message, MSG_AI_LOCAL_DATA);
        let ids: Vec<_> = response
            .recommendations
            .iter()
            .map(|r| r.job.id.as_str())
            .collect();
        assert_eq!(ids, vec!["job-react", "job-python"]);
    }

    #[tokio::test]
    async fn test_missing_resume_file_sends_default_skills() {
        let server = MockServer::start().await;
        mount_active(&server).await;
        let defaults: Vec<_> = DEFAULT_SKILLS.to_vec();
        Mock::given(method("POST"))
            .and(path("/api/recommend-jobs"))
            .and(body_partial_json(json!({
                "user_id": USER_ID,
                "resume_data": {"skills": defaults}
            })))
            .respond_with(recommend_response(&["job-java"]))
            .expect(1)
            .mount(&server)
            .await;

        let root = tempfile::tempdir().unwrap();
        let response = run(
            user(Some("gone.pdf".to_string())),
            jobs(),
            &scoring(&server.uri()),
            root.path(),
        )
        .await
        .unwrap();

        assert!(response.is_ai_recommendation);
        assert_eq!(response.message, MSG_AI_LOCAL_DATA);
    }

    #[tokio::test]
    async fn test_zero_ai_results_use_fallback_ranking() {
        let server = MockServer::start().await;
        mount_active(&server).await;
        Mock::given(method("POST"))
            .and(path("/api/analyze-resume"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"skills": ["python"], "education": [], "text": "python"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/recommend-jobs"))
            .respond_with(recommend_response(&["job-that-was-deleted"]))
            .expect(2)
            .mount(&server)
            .await;

        let root = upload_root_with_resume("Python developer with Django experience");
        let response = run(
            user(Some("resume.txt".to_string())),
            jobs(),
            &scoring(&server.uri()),
            root.path(),
        )
        .await
        .unwrap();

        assert!(!response.is_ai_recommendation);
        assert_eq!(response.message, MSG_FALLBACK_EMPTY_AI);
        assert_eq!(response.recommendations.len(), 3);
        assert_eq!(response.recommendations[0].job.id, "job-python");
    }

    #[tokio::test]
    async fn test_local_fallback_with_empty_profile_is_unscored() {
        let jobs = jobs();
        let user = user(None);
        let client = scoring(UNREACHABLE);
        let ctx = RequestContext {
            scoring: &client,
            resumes: &FileResumeReader,
            user: &user,
            resume_path: PathBuf::from("/nonexistent"),
            jobs: &jobs,
        };

        let Transition::Done(Outcome::Fallback {
            recommendations,
            reason,
        }) = local_fallback(&ctx, &ResumeProfile::default(), FallbackReason::AiFailed)
        else {
            panic!("expected a fallback outcome");
        };
        assert_eq!(reason, FallbackReason::AiFailed);
        assert_eq!(recommendations.len(), 3);
        assert!(recommendations.iter().all(|r| r.match_score.is_none()));
    }

    #[tokio::test]
    async fn test_local_extract_moves_to_ai_with_local_data() {
        let root = upload_root_with_resume("rust, kubernetes");
        let jobs = jobs();
        let user = user(None);
        let client = scoring(UNREACHABLE);
        let ctx = RequestContext {
            scoring: &client,
            resumes: &FileResumeReader,
            user: &user,
            resume_path: root.path().join("uploads/resume.txt"),
            jobs: &jobs,
        };

        let transition = local_extract(&ctx).await.unwrap();
        let Transition::Next(Stage::TryAiWithLocalData { profile, candidate }) = transition else {
            panic!("expected TRY_AI_WITH_LOCAL_DATA");
        };
        assert!(profile.skills.contains(&"rust".to_string()));
        assert_eq!(candidate.skills, profile.skills);
        assert_eq!(candidate.user_id, USER_ID);
        assert_eq!(candidate.experience.len(), 1);
        assert_eq!(candidate.experience[0].start_year, "2019");
    }

    #[tokio::test]
    async fn test_last_resort_ranks_locally() {
        let root = upload_root_with_resume("java spring");
        let jobs = jobs();
        let user = user(None);
        let client = scoring(UNREACHABLE);
        let ctx = RequestContext {
            scoring: &client,
            resumes: &FileResumeReader,
            user: &user,
            resume_path: root.path().join("uploads/resume.txt"),
            jobs: &jobs,
        };

        let outcome = last_resort(&ctx).await.unwrap();
        let response = outcome.into_response();
        assert_eq!(response.message, MSG_FALLBACK_LAST_RESORT);
        assert!(response.has_resume);
        assert!(!response.is_ai_recommendation);
        assert_eq!(response.recommendations[0].job.id, "job-java");
    }

    async fn run_with_reader(reader: &FailingReader) -> Result<RecommendationResponse, AppError> {
        let users = MemoryUserStore {
            users: vec![user(Some("resume.pdf".to_string()))],
        };
        let jobs = MemoryJobStore {
            jobs: jobs(),
            failure: None,
        };
        recommend(
            &users,
            &jobs,
            &scoring(UNREACHABLE),
            reader,
            Path::new("/srv/app"),
            USER_ID,
        )
        .await
    }

    #[tokio::test]
    async fn test_failed_extraction_escalates_to_last_resort() {
        let reader = FailingReader::new(1, &["java", "spring"]);

        let response = run_with_reader(&reader).await.unwrap();

        assert_eq!(reader.calls.load(Ordering::SeqCst), 2);
        assert!(response.has_resume);
        assert!(!response.is_ai_recommendation);
        assert_eq!(response.message, MSG_FALLBACK_LAST_RESORT);
        assert_eq!(response.recommendations.len(), 3);
        assert_eq!(response.recommendations[0].job.id, "job-java");
        assert!(response
            .recommendations
            .iter()
            .all(|r| r.provenance == Provenance::Fallback));
    }

    #[tokio::test]
    async fn test_failed_last_resort_is_internal_error() {
        let reader = FailingReader::new(usize::MAX, &[]);

        let err = run_with_reader(&reader).await.unwrap_err();

        assert_eq!(reader.calls.load(Ordering::SeqCst), 2);
        assert!(matches!(err, AppError::Internal(_)));
    }
}
