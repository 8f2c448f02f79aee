use serde::{Deserialize, Serialize};

/// A user as seen by the recommendation flow: where their resume lives and
/// the work history they entered on their profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    /// Stored upload path. `None` or blank means no resume on file.
    pub resume: Option<String>,
    pub experiences: Vec<StoredExperience>,
}

impl UserRecord {
    /// The stored resume path, if one is on file.
    pub fn resume_path(&self) -> Option<&str> {
        self.resume
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
    }
}

/// One work-history entry from the user's profile. Dates are free-form
/// strings as entered (usually `YYYY-MM` or `YYYY-MM-DD`, or `present`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoredExperience {
    pub title: String,
    pub company: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
}
