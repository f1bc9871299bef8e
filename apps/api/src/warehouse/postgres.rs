use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::flags::definition::{ExtraColumn, FlagDefinition, Join, Predicate};
use crate::models::client::ClientSummaryRow;
use crate::models::flag::FlagRow;
use crate::warehouse::Warehouse;

const JOBS_TABLE: &str = "poseidon.mart_jobs";
const GENOMES_TABLE: &str = "poseidon.mart_genomes";
const APPLICATIONS_TABLE: &str = "poseidon.mart_applications";

/// Creates the warehouse connection pool.
///
/// The pool connects lazily: no connection is opened until the first query,
/// so the service comes up even while the warehouse is unreachable and
/// reports the failure per request instead.
pub fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    info!("Configuring warehouse pool (max {max_connections} connections, lazy connect)");

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_lazy(database_url)?;

    Ok(pool)
}

#[derive(Clone)]
pub struct PgWarehouse {
    pool: PgPool,
}

impl PgWarehouse {
    pub fn new(pool: PgPool) -> Self {
        PgWarehouse { pool }
    }
}

#[async_trait]
impl Warehouse for PgWarehouse {
    async fn flag_rows(&self, definition: &FlagDefinition) -> Result<Vec<FlagRow>, AppError> {
        let mut query = build_flag_query(definition);
        debug!(flag = definition.kind.tag(), sql = query.sql(), "Running flag query");

        let rows = query
            .build_query_as::<FlagRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn client_summary(&self, email: &str) -> Result<Option<ClientSummaryRow>, AppError> {
        let row = sqlx::query_as::<_, ClientSummaryRow>(&client_summary_sql())
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}

/// Renders a flag definition into a parameterized SELECT.
/// Only constants are written into the SQL text; day counts and thresholds are bound.
pub fn build_flag_query(definition: &FlagDefinition) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(
        r#"SELECT DISTINCT
    mg.name AS ts_name,
    mg.email AS ts_email,
    mj.objective AS vacancy_name,
    mj.hash_id::text AS hash_id,
    mj.locale AS locale,
    mj.published_date::timestamp AS published_date,
    mj.organization_name AS company_name,
    mj.poster_gg_id::text AS poster_gg_id"#,
    );

    for column in &definition.projection {
        match column {
            ExtraColumn::ReviewStatus => qb.push(",\n    mj.review AS review_status"),
            ExtraColumn::ValuableApplicants => {
                qb.push(",\n    mj.valuable_appls::bigint AS valuable_appls")
            }
        };
    }

    qb.push(format!("\nFROM {JOBS_TABLE} mj"));

    for join in &definition.joins {
        match join {
            Join::Posters => qb.push(format!(
                "\nINNER JOIN {GENOMES_TABLE} mg ON mj.poster_gg_id = mg.gg_id"
            )),
            // Missing timestamps fall back to the epoch so GREATEST never sees NULL.
            Join::LatestActivity => qb.push(format!(
                r#"
LEFT JOIN (
    SELECT
        ma.opportunity_id,
        MAX(GREATEST(
            COALESCE(ma.disqualified_date, '1970-01-01'::timestamp),
            COALESCE(ma.mm_date, '1970-01-01'::timestamp)
        )) AS last_activity
    FROM {APPLICATIONS_TABLE} ma
    GROUP BY ma.opportunity_id
) AS activity ON mj.opportunity_id = activity.opportunity_id"#
            )),
        };
    }

    for (i, predicate) in definition.predicates.iter().enumerate() {
        qb.push(if i == 0 { "\nWHERE " } else { "\n    AND " });
        push_predicate(&mut qb, predicate);
    }

    qb.push("\nORDER BY published_date DESC");
    qb
}

fn push_predicate(qb: &mut QueryBuilder<'static, Postgres>, predicate: &Predicate) {
    match *predicate {
        Predicate::BusinessLineNot(line) => {
            qb.push("(mj.business_line <> ")
                .push_bind(line)
                .push(" OR mj.business_line IS NULL)");
        }
        Predicate::StatusOpen => {
            qb.push("mj.status = 'open'");
        }
        Predicate::PublishedWithin { days } => {
            qb.push("mj.published_date >= current_date - make_interval(days => ")
                .push_bind(days)
                .push(")\n    AND mj.published_date < current_date + INTERVAL '1 day'");
        }
        Predicate::FirstEverPosting => {
            qb.push("mj.published_date = mj.poster_first_post");
        }
        Predicate::ReviewApproved => {
            qb.push("mj.review = 'approved'");
        }
        Predicate::ValuableApplicantsBelow(threshold) => {
            qb.push("mj.valuable_appls < ").push_bind(threshold);
        }
        Predicate::InactiveFor { days } => {
            qb.push("(activity.last_activity < current_date - make_interval(days => ")
                .push_bind(days)
                .push(") OR activity.last_activity IS NULL)");
        }
    }
}

/// Per-poster posting totals. A poster with no postings still yields one row
/// (zero counts, NULL dates); an unknown email yields none.
pub fn client_summary_sql() -> String {
    format!(
        r#"SELECT
    mg.name AS name,
    mg.email AS email,
    mg.gg_id::text AS gg_id,
    COUNT(DISTINCT mj.hash_id) AS total_jobs,
    COUNT(DISTINCT CASE WHEN mj.status = 'open' THEN mj.hash_id END) AS open_jobs,
    MIN(mj.published_date)::timestamp AS first_job_date,
    MAX(mj.published_date)::timestamp AS last_job_date
FROM {GENOMES_TABLE} mg
LEFT JOIN {JOBS_TABLE} mj ON mg.gg_id = mj.poster_gg_id
WHERE mg.email = $1
GROUP BY mg.name, mg.email, mg.gg_id"#
    )
}
