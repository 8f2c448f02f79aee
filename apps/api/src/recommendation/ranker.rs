//! Local Relevance Ranker: deterministic job scoring used when the AI service
//! is unavailable or unhelpful.
//!
//! Algorithm, per job starting from 0:
//! 1. Each required skill: +10 on an exact (case-insensitive) candidate skill,
//!    plus +5 for every candidate skill that contains or is contained in it.
//!    Both bonuses stack and the partial bonus is uncapped.
//! 2. Each job-title token found among experience keywords: +8
//! 3. Each category token found among experience keywords: +5
//! 4. Experience-entry count inside the level's year range: +7
//!
//! Jobs are then sorted by score, highest first; equal scores keep input order.

use std::collections::HashSet;

use crate::models::job::JobRecord;
use crate::models::user::StoredExperience;
use crate::recommendation::models::RankedJob;

/// How many unscored jobs are returned when there are no skills to match.
pub const UNSCORED_RESULT_LIMIT: usize = 10;

const EXACT_SKILL_POINTS: u32 = 10;
const PARTIAL_SKILL_POINTS: u32 = 5;
const TITLE_TOKEN_POINTS: u32 = 8;
const CATEGORY_TOKEN_POINTS: u32 = 5;
const EXPERIENCE_LEVEL_POINTS: u32 = 7;
/// Experience words must be longer than this to count as keywords.
const MIN_EXPERIENCE_KEYWORD_CHARS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobScore {
    pub score: u32,
    /// Required skills (original casing) that exact-matched.
    pub matched_skills: Vec<String>,
}

/// Ranks `jobs` against a skill list and the user's stored experience.
///
/// Never fails. With no skills the first [`UNSCORED_RESULT_LIMIT`] jobs are
/// returned unscored in their original order.
pub fn rank(jobs: &[JobRecord], skills: &[String], experiences: &[StoredExperience]) -> Vec<RankedJob> {
    if skills.is_empty() {
        return jobs
            .iter()
            .take(UNSCORED_RESULT_LIMIT)
            .map(|job| RankedJob::fallback(job.clone(), None, Vec::new()))
            .collect();
    }

    let candidate_skills: Vec<String> = skills.iter().map(|s| s.to_lowercase()).collect();
    let keywords = experience_keywords(experiences);
    // Coarse proxy: one year per listed position.
    let years = u32::try_from(experiences.len()).unwrap_or(u32::MAX);

    let mut scored: Vec<(JobScore, &JobRecord)> = jobs
        .iter()
        .map(|job| (score_job(job, &candidate_skills, &keywords, years), job))
        .collect();

    // sort_by is stable, so ties keep input order
    scored.sort_by(|a, b| b.0.score.cmp(&a.0.score));

    scored
        .into_iter()
        .map(|(score, job)| RankedJob::fallback(job.clone(), Some(score.score), score.matched_skills))
        .collect()
}

/// Scores one job. `candidate_skills` must already be lower-cased.
pub fn score_job(
    job: &JobRecord,
    candidate_skills: &[String],
    experience_keywords: &HashSet<String>,
    experience_years: u32,
) -> JobScore {
    let mut score = 0;
    let mut matched_skills = Vec::new();

    for required in &job.required_skills {
        let required_lower = required.to_lowercase();

        if candidate_skills.contains(&required_lower) {
            score += EXACT_SKILL_POINTS;
            matched_skills.push(required.clone());
        }

        for skill in candidate_skills {
            if required_lower.contains(skill.as_str()) || skill.contains(required_lower.as_str()) {
                score += PARTIAL_SKILL_POINTS;
            }
        }
    }

    score += TITLE_TOKEN_POINTS * count_known_tokens(&job.title, experience_keywords);
    score += CATEGORY_TOKEN_POINTS * count_known_tokens(&job.category, experience_keywords);

    if job.experience_level.year_range().contains(experience_years) {
        score += EXPERIENCE_LEVEL_POINTS;
    }

    JobScore {
        score,
        matched_skills,
    }
}

/// Lower-cased words longer than three characters from every experience title
/// and description.
pub fn experience_keywords(experiences: &[StoredExperience]) -> HashSet<String> {
    experiences
        .iter()
        .flat_map(|exp| [exp.title.as_str(), exp.description.as_str()])
        .flat_map(|text| {
            text.to_lowercase()
                .split_whitespace()
                .filter(|word| word.chars().count() > MIN_EXPERIENCE_KEYWORD_CHARS)
                .map(String::from)
                .collect::<Vec<_>>()
        })
        .collect()
}

fn count_known_tokens(text: &str, keywords: &HashSet<String>) -> u32 {
    let hits = text
        .to_lowercase()
        .split_whitespace()
        .filter(|token| keywords.contains(*token))
        .count();
    u32::try_from(hits).unwrap_or(u32::MAX)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
