//! Resume Extractor: turns an uploaded resume file into a `ResumeProfile`.
//!
//! Pure-Rust heuristics, no network calls: keyword frequency, vocabulary-based
//! skill detection and education signals. Used when the scoring service cannot
//! analyze the resume itself.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{debug, info, warn};

use crate::resume::vocabulary::{
    DEFAULT_SKILLS, DEGREES, EDUCATION_KEYWORDS, MIN_SKILLS_BEFORE_BULLET_SCAN,
    MIN_SKILLS_BEFORE_DEFAULTS, SKILL_VOCABULARY, STOP_WORDS,
};

const MAX_KEYWORDS: usize = 30;
const MIN_KEYWORD_CHARS: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Signal extracted from one resume. Recomputed per request, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResumeProfile {
    pub raw_text: String,
    /// Most frequent tokens, highest count first.
    pub keywords: Vec<String>,
    /// Lower-cased, deduplicated, in vocabulary order with defaults appended.
    pub skills: Vec<String>,
    pub education: EducationSignals,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EducationSignals {
    pub keywords: Vec<String>,
    pub degrees: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Resume file not found at path: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read resume at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode resume text: {0}")]
    Decode(String),

    #[error("Resume decoding task failed: {0}")]
    Worker(#[from] JoinError),
}

impl ExtractError {
    /// Whether the failure is about this particular file (missing, unreadable,
    /// undecodable) rather than the process itself.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ExtractError::Worker(_))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// File entry points
// ────────────────────────────────────────────────────────────────────────────

/// Reads the resume at `path` and extracts its profile.
pub async fn extract(path: &Path) -> Result<ResumeProfile, ExtractError> {
    let text = read_resume_text(path).await?;
    Ok(profile_from_text(&text))
}

/// Like [`extract`], but a missing, unreadable or undecodable file yields an
/// empty profile so recommendations can still be produced.
///
/// Only worker failures propagate.
pub async fn extract_or_empty(path: &Path) -> Result<ResumeProfile, ExtractError> {
    match extract(path).await {
        Ok(profile) => Ok(profile),
        Err(e) if e.is_recoverable() => {
            warn!("Resume extraction degraded to empty profile: {e}");
            Ok(ResumeProfile::default())
        }
        Err(e) => Err(e),
    }
}

async fn read_resume_text(path: &Path) -> Result<String, ExtractError> {
    let exists = tokio::fs::try_exists(path)
        .await
        .map_err(|source| ExtractError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    if !exists {
        return Err(ExtractError::NotFound(path.to_path_buf()));
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ExtractError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("Read resume {} ({} bytes)", path.display(), bytes.len());

    if !is_pdf(path, &bytes) {
        return Ok(String::from_utf8_lossy(&bytes).into_owned());
    }

    let decoded =
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes)).await;
    match decoded {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractError::Decode(e.to_string())),
        // The PDF decoder panics on some malformed files.
        Err(e) if e.is_panic() => Err(ExtractError::Decode(format!(
            "PDF decoder panicked on {}",
            path.display()
        ))),
        Err(e) => Err(ExtractError::Worker(e)),
    }
}

fn is_pdf(path: &Path, bytes: &[u8]) -> bool {
    let pdf_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    pdf_extension || bytes.starts_with(b"%PDF")
}

// ────────────────────────────────────────────────────────────────────────────
// Text heuristics
// ────────────────────────────────────────────────────────────────────────────

/// Builds the full profile from already-decoded resume text.
pub fn profile_from_text(text: &str) -> ResumeProfile {
    let profile = ResumeProfile {
        raw_text: text.to_string(),
        keywords: extract_keywords(text),
        skills: extract_skills(text),
        education: extract_education(text),
    };
    info!(
        "Extracted resume profile: {} keywords, {} skills, {} education signals",
        profile.keywords.len(),
        profile.skills.len(),
        profile.education.keywords.len() + profile.education.degrees.len()
    );
    profile
}

fn non_word_regex() -> &'static Regex {
    static NON_WORD: OnceLock<Regex> = OnceLock::new();
    NON_WORD.get_or_init(|| Regex::new(r"[^A-Za-z0-9_\s]").expect("static regex"))
}

fn bullet_regex() -> &'static Regex {
    static BULLET: OnceLock<Regex> = OnceLock::new();
    BULLET.get_or_init(|| {
        Regex::new(r"(?m)^[ \t]*(?:•|\*|-|\d+\.)[ \t]*(.+)$").expect("static regex")
    })
}

/// Top tokens by frequency. Ties keep first-occurrence order.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let cleaned = non_word_regex().replace_all(&lower, " ");

    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for token in cleaned.split_whitespace() {
        if token.chars().count() < MIN_KEYWORD_CHARS || STOP_WORDS.contains(&token) {
            continue;
        }
        match index.get(token) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(token, counts.len());
                counts.push((token, 1));
            }
        }
    }

    // sort_by is stable, so equal counts stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(token, _)| token.to_string())
        .collect()
}

/// Vocabulary skills found in the text, topped up with defaults when sparse.
pub fn extract_skills(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();

    let mut found: Vec<&str> = SKILL_VOCABULARY
        .iter()
        .copied()
        .filter(|skill| lower.contains(skill))
        .collect();

    if found.len() < MIN_SKILLS_BEFORE_BULLET_SCAN {
        for caps in bullet_regex().captures_iter(&lower) {
            let point = caps[1].trim();
            for &skill in SKILL_VOCABULARY {
                if point.contains(skill) && !found.contains(&skill) {
                    found.push(skill);
                }
            }
        }
    }

    if found.len() < MIN_SKILLS_BEFORE_DEFAULTS {
        debug!(
            "Only {} skills found in resume, adding defaults",
            found.len()
        );
        for &skill in DEFAULT_SKILLS {
            if !found.contains(&skill) {
                found.push(skill);
            }
        }
    }

    found.into_iter().map(String::from).collect()
}

/// Education keywords and degree names present in the text. No defaults.
pub fn extract_education(text: &str) -> EducationSignals {
    let lower = text.to_lowercase();
    let matching = |terms: &[&str]| -> Vec<String> {
        terms
            .iter()
            .filter(|term| lower.contains(*term))
            .map(|term| term.to_string())
            .collect()
    };

    EducationSignals {
        keywords: matching(EDUCATION_KEYWORDS),
        degrees: matching(DEGREES),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
