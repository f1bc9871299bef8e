pub mod health;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::clients::handlers as clients;
use crate::flags::handlers as flags;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::health_handler))
        .route("/flags/new-ts-posting", get(flags::handle_new_ts_posting))
        .route("/flags/less-than-6", get(flags::handle_less_than_6))
        .route("/flags/no-activity", get(flags::handle_no_activity))
        .route("/flags/all-priorities", get(flags::handle_all_priorities))
        .route("/client/:email", get(clients::handle_get_client))
        .route("/industries", get(flags::handle_industries))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                // Public, unauthenticated surface: any origin, method and header.
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
