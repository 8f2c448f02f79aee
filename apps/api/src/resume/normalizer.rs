//! Request Normalizer: shapes extracted resume data into the candidate profile
//! the scoring service accepts.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::user::StoredExperience;
use crate::resume::extractor::ResumeProfile;

/// Sent when the caller's id does not look like a 24-hex-digit object id.
/// The scoring service rejects profiles without a well-formed id.
pub const FALLBACK_USER_ID: &str = "5f50c31f5b5f7a3a3c7e7c5a";

/// Start year used when an experience has no start date.
pub const DEFAULT_START_YEAR: &str = "2020";

/// End year for ongoing roles and roles without an end date.
pub const PRESENT: &str = "present";

/// Normalized candidate data. All three lists are always present, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub user_id: String,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub start_year: String,
    pub end_year: String,
    pub company: String,
    pub role: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub start_year: String,
    pub end_year: String,
}

/// Builds a candidate profile from locally extracted resume data.
pub fn normalize(
    profile: &ResumeProfile,
    experiences: &[StoredExperience],
    user_id: &str,
) -> CandidateProfile {
    CandidateProfile {
        user_id: normalize_user_id(user_id),
        skills: profile.skills.clone(),
        experience: normalize_experiences(experiences),
        education: profile
            .education
            .degrees
            .iter()
            .map(|degree| EducationEntry {
                degree: degree.clone(),
                institution: String::new(),
                start_year: DEFAULT_START_YEAR.to_string(),
                end_year: PRESENT.to_string(),
            })
            .collect(),
    }
}

/// Builds a candidate profile from the scoring service's own resume analysis.
///
/// Education comes back in whatever shape the service chose: a list of objects,
/// a list of degree names, or something else entirely (ignored).
pub fn normalize_analysis(
    skills: &[String],
    education: &Value,
    experiences: &[StoredExperience],
    user_id: &str,
) -> CandidateProfile {
    let education = education
        .as_array()
        .map(|items| items.iter().filter_map(education_from_value).collect())
        .unwrap_or_default();

    CandidateProfile {
        user_id: normalize_user_id(user_id),
        skills: skills.to_vec(),
        experience: normalize_experiences(experiences),
        education,
    }
}

fn education_from_value(value: &Value) -> Option<EducationEntry> {
    match value {
        Value::String(degree) => Some(EducationEntry {
            degree: degree.clone(),
            ..Default::default()
        }),
        Value::Object(_) => serde_json::from_value(value.clone()).ok(),
        _ => None,
    }
}

pub fn normalize_experiences(experiences: &[StoredExperience]) -> Vec<ExperienceEntry> {
    experiences
        .iter()
        .map(|exp| ExperienceEntry {
            start_year: year_prefix(&exp.start_date).unwrap_or(DEFAULT_START_YEAR).to_string(),
            end_year: end_year(&exp.end_date),
            company: exp.company.clone(),
            role: exp.title.clone(),
            description: exp.description.clone(),
        })
        .collect()
}

fn end_year(end_date: &str) -> String {
    if end_date.eq_ignore_ascii_case(PRESENT) {
        return PRESENT.to_string();
    }
    year_prefix(end_date).unwrap_or(PRESENT).to_string()
}

/// First four characters of a date string, e.g. `2021` from `2021-06-01`.
/// Shorter strings are returned whole.
fn year_prefix(date: &str) -> Option<&str> {
    let date = date.trim();
    if date.is_empty() {
        return None;
    }
    let end = date.char_indices().nth(4).map_or(date.len(), |(i, _)| i);
    Some(&date[..end])
}

/// Passes a 24-hex-digit id through unchanged, otherwise returns [`FALLBACK_USER_ID`].
pub fn normalize_user_id(user_id: &str) -> String {
    if is_object_id(user_id) {
        user_id.to_string()
    } else {
        FALLBACK_USER_ID.to_string()
    }
}

fn is_object_id(candidate: &str) -> bool {
    candidate.len() == 24 && candidate.chars().all(|c| c.is_ascii_hexdigit())
}
