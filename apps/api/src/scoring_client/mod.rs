/// Scoring Client: the single point of entry for calls to the external AI
/// scoring service.
///
/// ARCHITECTURAL RULE: No other module may call the scoring service directly.
///
/// The client is stateless: every call is independent and there are no retries.
/// A failed call is reported once and the caller decides how to degrade.
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use reqwest::{multipart, Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ScoringConfig;
use crate::models::job::JobRecord;
use crate::recommendation::models::{Provenance, RankedJob};
use crate::resume::normalizer::{CandidateProfile, EducationEntry, ExperienceEntry};

/// Bound on the availability probe, independent of the configured call timeout.
pub const HEALTH_PROBE_TIMEOUT: Duration = Duration::from_secs(5);
const API_KEY_HEADER: &str = "X-API-Key";
const ANALYZE_PATH: &str = "/api/analyze-resume";
const RECOMMEND_PATH: &str = "/api/recommend-jobs";
const DEFAULT_MATCH_REASON: &str = "AI-based recommendation";

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("AI scoring service is not available")]
    ServiceUnavailable,

    #[error("Resume file not found at: {0}")]
    NotFound(String),

    #[error("Invalid input for AI recommendations: {0}")]
    InvalidInput(String),

    #[error("Failed to analyze resume with AI service: {0}")]
    Analysis(String),

    #[error("Failed to get recommendations from AI model: {0}")]
    Service(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: Option<String>,
}

/// `{success, data}` wrapper used by every scoring endpoint.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    data: Option<T>,
}

impl<T> Envelope<T> {
    fn into_data(self) -> Option<T> {
        if self.success {
            self.data
        } else {
            None
        }
    }
}

/// The service's own reading of a resume.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResumeAnalysis {
    #[serde(default)]
    pub skills: Vec<String>,
    /// Shape is provider-defined; interpreted by the normalizer.
    #[serde(default)]
    pub education: Value,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
struct RecommendRequest<'a> {
    user_id: &'a str,
    resume_data: ResumeData<'a>,
}

#[derive(Debug, Serialize)]
struct ResumeData<'a> {
    skills: &'a [String],
    experience: &'a [ExperienceEntry],
    education: &'a [EducationEntry],
}

impl<'a> RecommendRequest<'a> {
    fn from_profile(profile: &'a CandidateProfile) -> Self {
        Self {
            user_id: &profile.user_id,
            resume_data: ResumeData {
                skills: &profile.skills,
                experience: &profile.experience,
                education: &profile.education,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct RecommendData {
    recommendations: Vec<ScoredJob>,
}

#[derive(Debug, Deserialize)]
struct ScoredJob {
    id: String,
    match_score: Option<f64>,
    match_factors: Option<Value>,
    match_reason: Option<String>,
    confidence_score: Option<f64>,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct ScoringClient {
    client: Client,
    config: ScoringConfig,
    health_timeout: Duration,
}

impl ScoringClient {
    pub fn new(config: ScoringConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build scoring service HTTP client")?;
        Ok(Self {
            client,
            config,
            health_timeout: HEALTH_PROBE_TIMEOUT,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Probes `GET /`. True only for HTTP 200 with `{"status": "active"}`.
    /// Every failure, including a timeout, reads as unavailable.
    pub async fn check_availability(&self) -> bool {
        let response = self
            .client
            .get(self.url("/"))
            .header(API_KEY_HEADER, &self.config.api_key)
            .timeout(self.health_timeout)
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                warn!("AI service health check failed: {e}");
                return false;
            }
        };

        if response.status() != StatusCode::OK {
            warn!("AI service health check returned {}", response.status());
            return false;
        }

        match response.json::<HealthResponse>().await {
            Ok(health) => health.status.as_deref() == Some("active"),
            Err(e) => {
                warn!("AI service health check returned a malformed body: {e}");
                false
            }
        }
    }

    /// Uploads the resume for analysis by the service.
    pub async fn analyze_resume(&self, path: &Path) -> Result<ResumeAnalysis, ScoringError> {
        if !self.check_availability().await {
            return Err(ScoringError::ServiceUnavailable);
        }

        let exists = tokio::fs::try_exists(path)
            .await
            .map_err(|e| ScoringError::Analysis(e.to_string()))?;
        if !exists {
            return Err(ScoringError::NotFound(path.display().to_string()));
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ScoringError::Analysis(e.to_string()))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume".to_string());
        let form = multipart::Form::new().part("file", multipart::Part::bytes(bytes).file_name(file_name));

        let response = self
            .client
            .post(self.url(ANALYZE_PATH))
            .header(API_KEY_HEADER, &self.config.api_key)
            .timeout(self.config.timeout)
            .multipart(form)
            .send()
            .await;

        let envelope: Envelope<ResumeAnalysis> = read_envelope(response)
            .await
            .map_err(ScoringError::Analysis)?;
        envelope.into_data().ok_or_else(|| {
            ScoringError::Analysis("Invalid response from AI resume analysis".to_string())
        })
    }

    /// Asks the service to score `jobs` against `candidate`.
    ///
    /// Recommendations whose id matches none of `jobs` are dropped; the
    /// posting may have closed between listing and scoring. Provider order is kept.
    pub async fn recommend_jobs(
        &self,
        candidate: Option<&CandidateProfile>,
        jobs: &[JobRecord],
    ) -> Result<Vec<RankedJob>, ScoringError> {
        let candidate = candidate
            .ok_or_else(|| ScoringError::InvalidInput("candidate profile is missing".to_string()))?;
        if jobs.is_empty() {
            return Err(ScoringError::InvalidInput("no jobs to rank".to_string()));
        }

        if !self.check_availability().await {
            return Err(ScoringError::ServiceUnavailable);
        }

        let request = RecommendRequest::from_profile(candidate);
        debug!(
            "Calling AI recommendation service: user_id={}, skills={}, experience={}, education={}",
            request.user_id,
            request.resume_data.skills.len(),
            request.resume_data.experience.len(),
            request.resume_data.education.len()
        );

        let response = self
            .client
            .post(self.url(RECOMMEND_PATH))
            .header(API_KEY_HEADER, &self.config.api_key)
            .timeout(self.config.timeout)
            .json(&request)
            .send()
            .await;

        let envelope: Envelope<RecommendData> = read_envelope(response)
            .await
            .map_err(ScoringError::Service)?;
        let data = envelope
            .into_data()
            .ok_or_else(|| ScoringError::Service("Invalid response from AI model".to_string()))?;

        debug!(
            "Received {} recommendations from AI model",
            data.recommendations.len()
        );
        Ok(join_recommendations(data.recommendations, jobs))
    }
}

/// Turns a raw send result into a parsed body, flattening transport, timeout,
/// status and decoding failures into one message.
async fn read_envelope<T: DeserializeOwned>(
    response: Result<reqwest::Response, reqwest::Error>,
) -> Result<Envelope<T>, String> {
    let response = response.map_err(|e| {
        if e.is_timeout() {
            "request timed out".to_string()
        } else {
            format!("request failed: {e}")
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::UNPROCESSABLE_ENTITY {
            warn!("AI service rejected the payload as invalid: {body}");
        }
        return Err(format!("status {status}: {body}"));
    }

    response
        .json::<Envelope<T>>()
        .await
        .map_err(|e| format!("malformed response body: {e}"))
}

fn join_recommendations(scored: Vec<ScoredJob>, jobs: &[JobRecord]) -> Vec<RankedJob> {
    let by_id: HashMap<&str, &JobRecord> = jobs.iter().map(|job| (job.id.as_str(), job)).collect();

    scored
        .into_iter()
        .filter_map(|rec| {
            let Some(job) = by_id.get(rec.id.as_str()) else {
                warn!("Job with ID {} not found among active jobs", rec.id);
                return None;
            };
            Some(RankedJob {
                job: (*job).clone(),
                match_score: Some(rec.match_score.unwrap_or(0.0)),
                matched_skills: matched_skills(rec.match_factors.as_ref()),
                provenance: Provenance::Ai,
                match_reason: Some(
                    rec.match_reason
                        .unwrap_or_else(|| DEFAULT_MATCH_REASON.to_string()),
                ),
                confidence_score: Some(rec.confidence_score.or(rec.match_score).unwrap_or(0.0)),
            })
        })
        .collect()
}

/// Keys of `match_factors.skill_match` when it is an object.
fn matched_skills(factors: Option<&Value>) -> Vec<String> {
    factors
        .and_then(|f| f.get("skill_match"))
        .and_then(Value::as_object)
        .map(|skills| skills.keys().cloned().collect())
        .unwrap_or_default()
}
