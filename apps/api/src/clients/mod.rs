//! Client lookup — posting totals for a single poster, by email.

pub mod handlers;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::debug;

use crate::errors::AppError;
use crate::models::client::ClientSummaryRow;
use crate::warehouse::Warehouse;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientSummary {
    pub name: Option<String>,
    pub email: String,
    pub gg_id: String,
    pub total_jobs_posted: i64,
    pub open_jobs: i64,
    pub first_job_date: Option<NaiveDateTime>,
    pub last_job_date: Option<NaiveDateTime>,
}

impl From<ClientSummaryRow> for ClientSummary {
    fn from(row: ClientSummaryRow) -> Self {
        ClientSummary {
            name: row.name,
            email: row.email,
            gg_id: row.gg_id,
            total_jobs_posted: row.total_jobs,
            open_jobs: row.open_jobs,
            first_job_date: row.first_job_date,
            last_job_date: row.last_job_date,
        }
    }
}

/// Looks up a poster by email. `NotFound` when no poster has that email.
pub async fn lookup(warehouse: &dyn Warehouse, email: &str) -> Result<ClientSummary, AppError> {
    let row = warehouse
        .client_summary(email)
        .await?
        .ok_or_else(|| AppError::NotFound("Client not found".to_string()))?;

    debug!(gg_id = %row.gg_id, total_jobs = row.total_jobs, "Client resolved");
    Ok(row.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warehouse::memory::{midnight, MemoryWarehouse, PosterFixture, PostingFixture};
    use chrono::{Duration, NaiveDate};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_email_is_not_found() {
        let wh = MemoryWarehouse::new(today());
        let err = lookup(&wh, "nobody@example.com").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_counts_total_and_open_postings() {
        let base = midnight(today());
        let mut closed = PostingFixture::open("c1", "gg-7", base - Duration::days(40));
        closed.status = "closed".to_string();

        let wh = MemoryWarehouse::new(today())
            .with_poster(PosterFixture::new("gg-7", "Luis", "luis@example.com"))
            .with_posting(closed)
            .with_posting(PostingFixture::open("o1", "gg-7", base - Duration::days(10)))
            .with_posting(PostingFixture::open("o2", "gg-7", base - Duration::days(1)));

        let summary = lookup(&wh, "luis@example.com").await.unwrap();
        assert_eq!(summary.total_jobs_posted, 3);
        assert_eq!(summary.open_jobs, 2);
        assert_eq!(summary.first_job_date, Some(base - Duration::days(40)));
        assert_eq!(summary.last_job_date, Some(base - Duration::days(1)));
        assert_eq!(summary.gg_id, "gg-7");
    }

    #[tokio::test]
    async fn test_poster_without_postings_has_null_dates() {
        let wh = MemoryWarehouse::new(today())
            .with_poster(PosterFixture::new("gg-9", "Eva", "eva@example.com"));

        let summary = lookup(&wh, "eva@example.com").await.unwrap();
        assert_eq!(summary.total_jobs_posted, 0);
        assert_eq!(summary.first_job_date, None);
    }

    #[tokio::test]
    async fn test_execution_failure_is_not_a_404() {
        let wh = MemoryWarehouse::new(today())
            .with_poster(PosterFixture::new("gg-9", "Eva", "eva@example.com"))
            .failing_client_lookup();

        let err = lookup(&wh, "eva@example.com").await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }
}
