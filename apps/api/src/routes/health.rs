use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use crate::flags::definition::FlagKind;

pub const SERVICE_NAME: &str = "Outreach Flags API";

/// GET /
/// Keep-alive target for the automation tool; lists the flags it can poll.
pub async fn health_handler() -> Json<Value> {
    let available_flags: Vec<&str> = FlagKind::ALL.iter().map(|f| f.slug()).collect();

    Json(json!({
        "status": "running",
        "service": SERVICE_NAME,
        "timestamp": Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "available_flags": available_flags
    }))
}
