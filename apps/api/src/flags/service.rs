use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::flags::definition::{FlagDefinition, FlagQuery, DEFAULT_INACTIVE_DAYS};
use crate::flags::report::FlagReport;
use crate::response::Envelope;
use crate::warehouse::Warehouse;

/// Runs a single flag against the warehouse and shapes the result.
pub async fn run_flag(
    warehouse: &dyn Warehouse,
    query: FlagQuery,
) -> Result<FlagReport, AppError> {
    let definition = FlagDefinition::for_query(&query);
    let rows = warehouse.flag_rows(&definition).await?;
    let report = FlagReport::new(&query, rows);

    debug!(
        flag = report.flag,
        lookback_days = query.lookback_days(),
        count = report.count,
        "Flag evaluated"
    );
    Ok(report)
}

#[derive(Debug, Serialize)]
pub struct PriorityFlags {
    pub new_ts_posting: Envelope<FlagReport>,
    pub less_than_6: Envelope<FlagReport>,
    pub no_activity: Envelope<FlagReport>,
}

#[derive(Debug, Serialize)]
pub struct PriorityBreakdown {
    pub new_ts_posting: usize,
    pub less_than_6: usize,
    pub no_activity: usize,
}

#[derive(Debug, Serialize)]
pub struct PrioritySummary {
    pub total_clients_to_contact: usize,
    pub breakdown: PriorityBreakdown,
    /// Tags of sub-flags that failed; each contributed 0 to the total.
    pub failed_flags: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct AllPrioritiesReport {
    pub lookback_days: i32,
    pub flags: PriorityFlags,
    pub summary: PrioritySummary,
}

/// Runs every high-priority flag with one shared lookback. A failing flag is
/// embedded as its failure envelope and counted as zero; the others still report.
pub async fn all_priorities(
    warehouse: &dyn Warehouse,
    days: i32,
) -> Result<AllPrioritiesReport, AppError> {
    let new_ts_query = FlagQuery::new_ts_posting(days)?;
    let less_than_6_query = FlagQuery::less_than_6(days)?;
    let no_activity_query = FlagQuery::no_activity(DEFAULT_INACTIVE_DAYS, days)?;

    let (new_ts, less_than_6, no_activity) = tokio::join!(
        run_flag(warehouse, new_ts_query),
        run_flag(warehouse, less_than_6_query),
        run_flag(warehouse, no_activity_query),
    );

    let mut failed_flags = Vec::new();
    let mut count_of = |query: &FlagQuery, outcome: &Result<FlagReport, AppError>| {
        match outcome {
            Ok(report) => report.count,
            Err(e) => {
                warn!(flag = query.kind().tag(), "Sub-flag failed: {e}");
                failed_flags.push(query.kind().tag());
                0
            }
        }
    };

    let breakdown = PriorityBreakdown {
        new_ts_posting: count_of(&new_ts_query, &new_ts),
        less_than_6: count_of(&less_than_6_query, &less_than_6),
        no_activity: count_of(&no_activity_query, &no_activity),
    };

    Ok(AllPrioritiesReport {
        lookback_days: days,
        flags: PriorityFlags {
            new_ts_posting: new_ts.into(),
            less_than_6: less_than_6.into(),
            no_activity: no_activity.into(),
        },
        summary: PrioritySummary {
            total_clients_to_contact: breakdown.new_ts_posting
                + breakdown.less_than_6
                + breakdown.no_activity,
            breakdown,
            failed_flags,
        },
    })
}
