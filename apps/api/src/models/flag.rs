use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One posting joined to its poster, as returned by a flag query.
/// Per-flag extra columns default to `None` when not projected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FlagRow {
    pub ts_name: Option<String>,
    pub ts_email: Option<String>,
    pub vacancy_name: Option<String>,
    pub hash_id: String,
    pub locale: Option<String>,
    pub published_date: NaiveDateTime,
    pub company_name: Option<String>,
    pub poster_gg_id: String,
    #[sqlx(default)]
    pub review_status: Option<String>,
    #[sqlx(default)]
    pub valuable_appls: Option<i64>,
}
