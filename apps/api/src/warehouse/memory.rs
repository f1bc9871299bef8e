//! In-memory warehouse for tests. Evaluates flag definitions against fixture
//! rows with the same semantics the Postgres query encodes, using a fixed
//! `today` in place of `current_date`.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::errors::AppError;
use crate::flags::definition::{ExtraColumn, FlagDefinition, FlagKind, Join, Predicate};
use crate::models::client::ClientSummaryRow;
use crate::models::flag::FlagRow;
use crate::warehouse::Warehouse;

pub fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(0, 0, 0).expect("midnight is a valid time")
}

fn epoch() -> NaiveDateTime {
    midnight(NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch is a valid date"))
}

#[derive(Debug, Clone)]
pub struct PostingFixture {
    pub hash_id: String,
    pub opportunity_id: String,
    pub objective: Option<String>,
    pub locale: Option<String>,
    pub published_date: NaiveDateTime,
    pub organization_name: Option<String>,
    pub poster_gg_id: String,
    pub poster_first_post: NaiveDateTime,
    pub status: String,
    pub review: Option<String>,
    pub valuable_appls: Option<i64>,
    pub business_line: Option<String>,
}

impl PostingFixture {
    /// An open, approved, first-ever posting with no applicants.
    pub fn open(hash_id: &str, poster_gg_id: &str, published_date: NaiveDateTime) -> Self {
        PostingFixture {
            hash_id: hash_id.to_string(),
            opportunity_id: format!("opp-{hash_id}"),
            objective: Some("Backend Developer".to_string()),
            locale: Some("en".to_string()),
            published_date,
            organization_name: Some("Acme".to_string()),
            poster_gg_id: poster_gg_id.to_string(),
            poster_first_post: published_date,
            status: "open".to_string(),
            review: Some("approved".to_string()),
            valuable_appls: Some(0),
            business_line: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PosterFixture {
    pub gg_id: String,
    pub name: Option<String>,
    pub email: String,
}

impl PosterFixture {
    pub fn new(gg_id: &str, name: &str, email: &str) -> Self {
        PosterFixture {
            gg_id: gg_id.to_string(),
            name: Some(name.to_string()),
            email: email.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ActivityFixture {
    pub opportunity_id: String,
    pub disqualified_date: Option<NaiveDateTime>,
    pub mm_date: Option<NaiveDateTime>,
}

pub struct MemoryWarehouse {
    today: NaiveDate,
    postings: Vec<PostingFixture>,
    posters: Vec<PosterFixture>,
    activity: Vec<ActivityFixture>,
    failing: HashSet<FlagKind>,
    fail_client_lookup: bool,
}

impl MemoryWarehouse {
    pub fn new(today: NaiveDate) -> Self {
        MemoryWarehouse {
            today,
            postings: vec![],
            posters: vec![],
            activity: vec![],
            failing: HashSet::new(),
            fail_client_lookup: false,
        }
    }

    pub fn with_poster(mut self, poster: PosterFixture) -> Self {
        self.posters.push(poster);
        self
    }

    pub fn with_posting(mut self, posting: PostingFixture) -> Self {
        self.postings.push(posting);
        self
    }

    pub fn with_activity(mut self, activity: ActivityFixture) -> Self {
        self.activity.push(activity);
        self
    }

    /// Makes queries for this flag fail as if the warehouse errored.
    pub fn failing_on(mut self, kind: FlagKind) -> Self {
        self.failing.insert(kind);
        self
    }

    pub fn failing_client_lookup(mut self) -> Self {
        self.fail_client_lookup = true;
        self
    }

    fn last_activity(&self, opportunity_id: &str) -> Option<NaiveDateTime> {
        self.activity
            .iter()
            .filter(|a| a.opportunity_id == opportunity_id)
            .map(|a| {
                let disqualified = a.disqualified_date.unwrap_or_else(epoch);
                let moved = a.mm_date.unwrap_or_else(epoch);
                disqualified.max(moved)
            })
            .max()
    }

    fn matches(
        &self,
        definition: &FlagDefinition,
        predicate: &Predicate,
        p: &PostingFixture,
    ) -> bool {
        let today = midnight(self.today);
        match *predicate {
            Predicate::BusinessLineNot(line) => p.business_line.as_deref() != Some(line),
            Predicate::StatusOpen => p.status == "open",
            Predicate::PublishedWithin { days } => {
                p.published_date >= today - Duration::days(i64::from(days))
                    && p.published_date < today + Duration::days(1)
            }
            Predicate::FirstEverPosting => p.published_date == p.poster_first_post,
            Predicate::ReviewApproved => p.review.as_deref() == Some("approved"),
            Predicate::ValuableApplicantsBelow(threshold) => {
                p.valuable_appls.is_some_and(|n| n < threshold)
            }
            Predicate::InactiveFor { days } => {
                assert!(
                    definition.joins.contains(&Join::LatestActivity),
                    "InactiveFor without the activity join"
                );
                match self.last_activity(&p.opportunity_id) {
                    None => true,
                    Some(last) => last < today - Duration::days(i64::from(days)),
                }
            }
        }
    }

    fn connection_error() -> AppError {
        AppError::Database(sqlx::Error::Protocol(
            "connection to warehouse refused".to_string(),
        ))
    }
}

#[async_trait]
impl Warehouse for MemoryWarehouse {
    async fn flag_rows(&self, definition: &FlagDefinition) -> Result<Vec<FlagRow>, AppError> {
        if self.failing.contains(&definition.kind) {
            return Err(Self::connection_error());
        }

        let rows = self
            .postings
            .iter()
            .filter(|p| {
                definition
                    .predicates
                    .iter()
                    .all(|pred| self.matches(definition, pred, p))
            })
            .flat_map(|p| {
                self.posters
                    .iter()
                    .filter(move |poster| poster.gg_id == p.poster_gg_id)
                    .map(move |poster| (p, poster))
            })
            .map(|(p, poster)| FlagRow {
                ts_name: poster.name.clone(),
                ts_email: Some(poster.email.clone()),
                vacancy_name: p.objective.clone(),
                hash_id: p.hash_id.clone(),
                locale: p.locale.clone(),
                published_date: p.published_date,
                company_name: p.organization_name.clone(),
                poster_gg_id: p.poster_gg_id.clone(),
                review_status: if definition.projection.contains(&ExtraColumn::ReviewStatus) {
                    p.review.clone()
                } else {
                    None
                },
                valuable_appls: if definition
                    .projection
                    .contains(&ExtraColumn::ValuableApplicants)
                {
                    p.valuable_appls
                } else {
                    None
                },
            })
            .collect();

        Ok(rows)
    }

    async fn client_summary(&self, email: &str) -> Result<Option<ClientSummaryRow>, AppError> {
        if self.fail_client_lookup {
            return Err(Self::connection_error());
        }

        let Some(poster) = self.posters.iter().find(|p| p.email == email) else {
            return Ok(None);
        };

        let postings: Vec<&PostingFixture> = self
            .postings
            .iter()
            .filter(|p| p.poster_gg_id == poster.gg_id)
            .collect();

        let total: HashSet<&str> = postings.iter().map(|p| p.hash_id.as_str()).collect();
        let open: HashSet<&str> = postings
            .iter()
            .filter(|p| p.status == "open")
            .map(|p| p.hash_id.as_str())
            .collect();

        Ok(Some(ClientSummaryRow {
            name: poster.name.clone(),
            email: poster.email.clone(),
            gg_id: poster.gg_id.clone(),
            total_jobs: total.len() as i64,
            open_jobs: open.len() as i64,
            first_job_date: postings.iter().map(|p| p.published_date).min(),
            last_job_date: postings.iter().map(|p| p.published_date).max(),
        }))
    }
}
