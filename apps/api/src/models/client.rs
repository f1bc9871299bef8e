use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Posting totals for a single poster, keyed by email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ClientSummaryRow {
    pub name: Option<String>,
    pub email: String,
    pub gg_id: String,
    pub total_jobs: i64,
    pub open_jobs: i64,
    pub first_job_date: Option<NaiveDateTime>,
    pub last_job_date: Option<NaiveDateTime>,
}
