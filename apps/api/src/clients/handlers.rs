use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use serde::Serialize;

use crate::clients::{lookup, ClientSummary};
use crate::errors::AppError;
use crate::response::Envelope;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ClientResponse {
    pub data: ClientSummary,
}

/// GET /client/:email
///
/// 404 when no poster has this email; other failures, including an
/// undecodable path segment, use the failure envelope.
pub async fn handle_get_client(
    State(state): State<AppState>,
    email: Result<Path<String>, PathRejection>,
) -> Result<Json<Envelope<ClientResponse>>, AppError> {
    let Path(email) = email?;
    let data = lookup(state.warehouse.as_ref(), &email).await?;
    Ok(Json(Envelope::success(ClientResponse { data })))
}
