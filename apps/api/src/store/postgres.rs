use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use crate::models::job::{ExperienceLevel, JobRecord};
use crate::models::user::{StoredExperience, UserRecord};
use crate::store::{JobStore, UserStore};

#[derive(Debug, FromRow)]
struct UserRow {
    id: String,
    resume: Option<String>,
    experiences: Option<Json<Vec<StoredExperience>>>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        UserRecord {
            id: row.id,
            resume: row.resume,
            experiences: row.experiences.map(|Json(list)| list).unwrap_or_default(),
        }
    }
}

#[derive(Debug, FromRow)]
struct JobRow {
    id: String,
    title: String,
    category: String,
    required_skills: Vec<String>,
    preferred_skills: Vec<String>,
    experience: String,
    company: String,
    location: String,
    job_type: String,
    workplace_type: String,
    salary_display: String,
    posted_at: Option<DateTime<Utc>>,
}

impl From<JobRow> for JobRecord {
    fn from(row: JobRow) -> Self {
        JobRecord {
            id: row.id,
            title: row.title,
            category: row.category,
            required_skills: row.required_skills,
            preferred_skills: row.preferred_skills,
            experience_level: ExperienceLevel::from_label(&row.experience),
            company: row.company,
            location: row.location,
            job_type: row.job_type,
            workplace_type: row.workplace_type,
            salary_display: row.salary_display,
            posted_at: row.posted_at,
        }
    }
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_user(&self, user_id: &str) -> Result<Option<UserRecord>> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT id, resume, experiences FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await
                .with_context(|| format!("Failed to load user {user_id}"))?;
        Ok(row.map(UserRecord::from))
    }
}

#[derive(Clone)]
pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn active_jobs(&self) -> Result<Vec<JobRecord>> {
        let rows: Vec<JobRow> = sqlx::query_as(
            r#"
            SELECT id, title, category, required_skills, preferred_skills, experience,
                   company, location, job_type, workplace_type, salary_display, posted_at
            FROM jobs
            WHERE status = 'Active'
            ORDER BY posted_at DESC NULLS LAST
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to load active jobs")?;
        Ok(rows.into_iter().map(JobRecord::from).collect())
    }
}
