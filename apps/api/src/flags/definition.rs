//! Flag definitions — each flag is a named filter configuration over the
//! job postings table joined to poster profiles.
//!
//! Definitions are data, not SQL. The Postgres warehouse renders them into a
//! parameterized query; the in-memory test warehouse evaluates them directly.

use serde::Serialize;

use crate::errors::AppError;

/// Internal business line excluded from every flag.
pub const EXCLUDED_BUSINESS_LINE: &str = "torre_os";

/// `less_than_6` fires below this many valuable applicants.
pub const VALUABLE_APPLICANT_THRESHOLD: i64 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagKind {
    NewTsPosting,
    LessThan6,
    NoActivity,
}

impl FlagKind {
    pub const ALL: [FlagKind; 3] = [
        FlagKind::NewTsPosting,
        FlagKind::LessThan6,
        FlagKind::NoActivity,
    ];

    /// Tag carried on every result record and used as the aggregate key.
    pub fn tag(self) -> &'static str {
        match self {
            FlagKind::NewTsPosting => "new_ts_posting",
            FlagKind::LessThan6 => "less_than_6",
            FlagKind::NoActivity => "no_activity",
        }
    }

    /// Path segment under `/flags/`.
    pub fn slug(self) -> &'static str {
        match self {
            FlagKind::NewTsPosting => "new-ts-posting",
            FlagKind::LessThan6 => "less-than-6",
            FlagKind::NoActivity => "no-activity",
        }
    }

    pub fn default_lookback_days(self) -> i32 {
        match self {
            FlagKind::NewTsPosting => 7,
            FlagKind::LessThan6 | FlagKind::NoActivity => 30,
        }
    }
}

pub const DEFAULT_INACTIVE_DAYS: i32 = 7;

/// A validated request for one flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagQuery {
    NewTsPosting { days: i32 },
    LessThan6 { days: i32 },
    NoActivity { inactive_days: i32, lookback_days: i32 },
}

impl FlagQuery {
    pub fn new_ts_posting(days: i32) -> Result<Self, AppError> {
        Ok(FlagQuery::NewTsPosting {
            days: non_negative("days", days)?,
        })
    }

    pub fn less_than_6(days: i32) -> Result<Self, AppError> {
        Ok(FlagQuery::LessThan6 {
            days: non_negative("days", days)?,
        })
    }

    pub fn no_activity(inactive_days: i32, lookback_days: i32) -> Result<Self, AppError> {
        Ok(FlagQuery::NoActivity {
            inactive_days: non_negative("inactive_days", inactive_days)?,
            lookback_days: non_negative("lookback_days", lookback_days)?,
        })
    }

    pub fn kind(&self) -> FlagKind {
        match self {
            FlagQuery::NewTsPosting { .. } => FlagKind::NewTsPosting,
            FlagQuery::LessThan6 { .. } => FlagKind::LessThan6,
            FlagQuery::NoActivity { .. } => FlagKind::NoActivity,
        }
    }

    pub fn lookback_days(&self) -> i32 {
        match *self {
            FlagQuery::NewTsPosting { days } | FlagQuery::LessThan6 { days } => days,
            FlagQuery::NoActivity { lookback_days, .. } => lookback_days,
        }
    }

    pub fn description(&self) -> String {
        match self {
            FlagQuery::NewTsPosting { .. } => {
                "TSs posting for the first time (includes approved & unapproved)".to_string()
            }
            FlagQuery::LessThan6 { .. } => {
                "Approved openings with less than 6 relevant applicants".to_string()
            }
            FlagQuery::NoActivity { inactive_days, .. } => {
                format!("Approved jobs with no activity in pipeline for {inactive_days}+ days")
            }
        }
    }
}

fn non_negative(name: &str, value: i32) -> Result<i32, AppError> {
    if value < 0 {
        return Err(AppError::InvalidParameter(format!(
            "{name} must be zero or greater, got {value}"
        )));
    }
    Ok(value)
}

/// Row filters. Every predicate applies to the posting (`mj`) side of the join
/// unless noted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `business_line <> value OR business_line IS NULL`
    BusinessLineNot(&'static str),
    StatusOpen,
    /// Publish date within `[today - days, today + 1 day)`.
    PublishedWithin { days: i32 },
    /// Publish date equals the poster's first-ever publish date.
    FirstEverPosting,
    ReviewApproved,
    ValuableApplicantsBelow(i64),
    /// Latest pipeline activity older than `today - days`, or no activity at all.
    /// Requires [`Join::LatestActivity`].
    InactiveFor { days: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Join {
    /// Inner join to poster profiles on the poster id.
    Posters,
    /// Left join to the per-posting latest-activity aggregate.
    LatestActivity,
}

/// Per-flag columns projected on top of the base record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraColumn {
    ReviewStatus,
    ValuableApplicants,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagDefinition {
    pub kind: FlagKind,
    pub joins: Vec<Join>,
    pub predicates: Vec<Predicate>,
    pub projection: Vec<ExtraColumn>,
}

impl FlagDefinition {
    pub fn for_query(query: &FlagQuery) -> Self {
        let mut predicates = vec![
            Predicate::StatusOpen,
            Predicate::BusinessLineNot(EXCLUDED_BUSINESS_LINE),
            Predicate::PublishedWithin {
                days: query.lookback_days(),
            },
        ];

        match *query {
            FlagQuery::NewTsPosting { .. } => {
                predicates.push(Predicate::FirstEverPosting);
                FlagDefinition {
                    kind: FlagKind::NewTsPosting,
                    joins: vec![Join::Posters],
                    predicates,
                    projection: vec![ExtraColumn::ReviewStatus],
                }
            }
            FlagQuery::LessThan6 { .. } => {
                predicates.push(Predicate::ReviewApproved);
                predicates.push(Predicate::ValuableApplicantsBelow(
                    VALUABLE_APPLICANT_THRESHOLD,
                ));
                FlagDefinition {
                    kind: FlagKind::LessThan6,
                    joins: vec![Join::Posters],
                    predicates,
                    projection: vec![ExtraColumn::ValuableApplicants],
                }
            }
            FlagQuery::NoActivity { inactive_days, .. } => {
                predicates.push(Predicate::ReviewApproved);
                predicates.push(Predicate::InactiveFor {
                    days: inactive_days,
                });
                FlagDefinition {
                    kind: FlagKind::NoActivity,
                    joins: vec![Join::Posters, Join::LatestActivity],
                    predicates,
                    projection: vec![],
                }
            }
        }
    }
}
