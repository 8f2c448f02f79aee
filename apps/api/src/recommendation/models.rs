use serde::Serialize;

use crate::models::job::JobRecord;

/// Where a ranked job's score came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Ai,
    Fallback,
}

/// A job annotated with its match against one candidate. Never persisted.
///
/// Every key is always serialized; fields that do not apply to the producing
/// path are `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedJob {
    #[serde(flatten)]
    pub job: JobRecord,
    /// Provider-defined scale on the AI path; non-negative integer points on
    /// the fallback path; `None` when the fallback could not score at all.
    pub match_score: Option<f64>,
    pub matched_skills: Vec<String>,
    pub provenance: Provenance,
    pub match_reason: Option<String>,
    pub confidence_score: Option<f64>,
}

impl RankedJob {
    /// A fallback-ranked job.
    pub fn fallback(job: JobRecord, score: Option<u32>, matched_skills: Vec<String>) -> Self {
        Self {
            job,
            match_score: score.map(f64::from),
            matched_skills,
            provenance: Provenance::Fallback,
            match_reason: None,
            confidence_score: None,
        }
    }
}

/// The envelope returned for every non-fatal recommendation outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub has_resume: bool,
    #[serde(rename = "isAIRecommendation")]
    pub is_ai_recommendation: bool,
    pub recommendations: Vec<RankedJob>,
    pub message: String,
}
