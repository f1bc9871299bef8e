//! Response shaping — turns warehouse rows into the records the outreach
//! automation consumes.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::flags::definition::{FlagKind, FlagQuery};
use crate::flags::industry::{classify, Industry};
use crate::models::flag::FlagRow;

pub const UNTITLED_POSITION: &str = "Untitled Position";
pub const DEFAULT_COMPANY: &str = "Company";

const JOB_LINK_BASE: &str = "https://torre.ai/post";

pub fn build_job_link(hash_id: &str) -> String {
    format!("{JOB_LINK_BASE}/{hash_id}")
}

#[derive(Debug, Clone, Serialize)]
pub struct FlagRecord {
    pub ts_name: Option<String>,
    pub ts_email: Option<String>,
    pub vacancy_name: String,
    pub vacancy_link: String,
    pub locale: Option<String>,
    pub published_date: NaiveDateTime,
    pub company_name: String,
    pub poster_gg_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valuable_appls: Option<i64>,
    pub industry: Industry,
    pub flag: &'static str,
}

impl FlagRecord {
    pub fn from_row(row: FlagRow, kind: FlagKind) -> Self {
        // Blank values get the same fallback as missing ones.
        let vacancy_name = row
            .vacancy_name
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| UNTITLED_POSITION.to_string());
        let company_name = row
            .company_name
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_COMPANY.to_string());

        FlagRecord {
            industry: classify(&vacancy_name, &company_name),
            vacancy_link: build_job_link(&row.hash_id),
            ts_name: row.ts_name,
            ts_email: row.ts_email,
            vacancy_name,
            locale: row.locale,
            published_date: row.published_date,
            company_name,
            poster_gg_id: row.poster_gg_id,
            review_status: row.review_status,
            valuable_appls: row.valuable_appls,
            flag: kind.tag(),
        }
    }
}

/// Collapses duplicate (posting, poster) rows and orders newest first.
pub fn shape_rows(rows: Vec<FlagRow>, kind: FlagKind) -> Vec<FlagRecord> {
    let mut seen = HashSet::new();
    let mut records: Vec<FlagRecord> = rows
        .into_iter()
        .filter(|row| seen.insert((row.hash_id.clone(), row.poster_gg_id.clone())))
        .map(|row| FlagRecord::from_row(row, kind))
        .collect();

    records.sort_by(|a, b| b.published_date.cmp(&a.published_date));
    records
}

/// Lookback parameters echoed back to the caller, named per flag.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum LookbackWindow {
    Days {
        days_lookback: i32,
    },
    Inactivity {
        inactive_days_threshold: i32,
        lookback_days: i32,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct FlagReport {
    pub flag: &'static str,
    pub description: String,
    pub count: usize,
    #[serde(flatten)]
    pub window: LookbackWindow,
    pub data: Vec<FlagRecord>,
}

impl FlagReport {
    pub fn new(query: &FlagQuery, rows: Vec<FlagRow>) -> Self {
        let kind = query.kind();
        let data = shape_rows(rows, kind);
        let window = match *query {
            FlagQuery::NewTsPosting { days } | FlagQuery::LessThan6 { days } => {
                LookbackWindow::Days {
                    days_lookback: days,
                }
            }
            FlagQuery::NoActivity {
                inactive_days,
                lookback_days,
            } => LookbackWindow::Inactivity {
                inactive_days_threshold: inactive_days,
                lookback_days,
            },
        };

        FlagReport {
            flag: kind.tag(),
            description: query.description(),
            count: data.len(),
            window,
            data,
        }
    }
}
