use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An active job posting. Only the ranking fields are interpreted; the rest is
/// carried through to the response untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: String,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    pub experience_level: ExperienceLevel,

    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub job_type: String,
    #[serde(default)]
    pub workplace_type: String,
    #[serde(default)]
    pub salary_display: String,
    #[serde(default)]
    pub posted_at: Option<DateTime<Utc>>,
}

/// Declared seniority of a posting.
///
/// Labels are the ones employers pick from when posting. Anything else is
/// kept verbatim as `Other` and treated as "any experience" for ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExperienceLevel {
    EntryLevel,
    MidLevel,
    SeniorLevel,
    Manager,
    Executive,
    Other(String),
}

/// Inclusive band of years of experience a level expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub min: u32,
    pub max: u32,
}

impl YearRange {
    pub fn contains(&self, years: u32) -> bool {
        years >= self.min && years <= self.max
    }
}

/// Range used for labels outside the known set.
pub const UNRECOGNIZED_LEVEL_RANGE: YearRange = YearRange { min: 0, max: 30 };

impl ExperienceLevel {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Entry Level" => Self::EntryLevel,
            "Mid Level" => Self::MidLevel,
            "Senior Level" => Self::SeniorLevel,
            "Manager" => Self::Manager,
            "Executive" => Self::Executive,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::EntryLevel => "Entry Level",
            Self::MidLevel => "Mid Level",
            Self::SeniorLevel => "Senior Level",
            Self::Manager => "Manager",
            Self::Executive => "Executive",
            Self::Other(label) => label,
        }
    }

    pub fn year_range(&self) -> YearRange {
        match self {
            Self::EntryLevel => YearRange { min: 0, max: 2 },
            Self::MidLevel => YearRange { min: 2, max: 5 },
            Self::SeniorLevel => YearRange { min: 5, max: 10 },
            Self::Manager => YearRange { min: 5, max: 15 },
            Self::Executive => YearRange { min: 10, max: 30 },
            Self::Other(_) => UNRECOGNIZED_LEVEL_RANGE,
        }
    }
}

impl From<String> for ExperienceLevel {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<ExperienceLevel> for String {
    fn from(level: ExperienceLevel) -> Self {
        level.label().to_string()
    }
}
