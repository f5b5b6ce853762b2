//! HTTP surface for the transfer core
//!
//! Two routes, semantically fixed regardless of transport:
//! POST /api/v1/transfers and GET /api/v1/transfers/{id}.
//! Authentication is an external collaborator; the request body carries
//! the user id the excluded middleware resolved.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Extension, Json, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;

use crate::transfer::error::TransferError;
use crate::transfer::orchestrator::TransferOrchestrator;
use crate::transfer::types::{TransferId, TransferRequest};

pub struct AppState {
    pub orchestrator: Arc<TransferOrchestrator>,
}

#[derive(Debug, Deserialize)]
struct InitiateTransferReq {
    user_id: i64,
    sender_wallet_id: i64,
    receiver_wallet_id: i64,
    /// Integer minor units
    amount: i64,
    #[serde(default)]
    is_anonymous: bool,
    pin: Option<String>,
    /// Hex-encoded opaque proof blob for anonymous transfers
    proof: Option<String>,
    cid: Option<String>,
}

fn error_response(e: &TransferError) -> Response {
    let status =
        StatusCode::from_u16(e.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(serde_json::json!({
            "code": e.code(),
            "error": e.to_string(),
        })),
    )
        .into_response()
}

/// POST /api/v1/transfers
async fn initiate_transfer(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<InitiateTransferReq>,
) -> Response {
    let proof = match payload.proof.as_deref().map(hex::decode).transpose() {
        Ok(p) => p,
        Err(_) => {
            return error_response(&TransferError::InvalidTransfer(
                "proof must be hex-encoded".to_string(),
            ));
        }
    };

    let req = TransferRequest {
        user_id: payload.user_id,
        sender_wallet_id: payload.sender_wallet_id,
        receiver_wallet_id: payload.receiver_wallet_id,
        amount: payload.amount,
        is_anonymous: payload.is_anonymous,
        pin: payload.pin,
        proof,
        cid: payload.cid,
    };

    match state.orchestrator.initiate_transfer(req).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET /api/v1/transfers/{id}
async fn get_transfer(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let transfer_id: TransferId = match id.parse() {
        Ok(id) => id,
        Err(_) => {
            return error_response(&TransferError::NotFound(format!(
                "transfer {} (malformed id)",
                id
            )));
        }
    };

    match state.orchestrator.get_transfer_status(transfer_id).await {
        Ok(record) => Json(record).into_response(),
        Err(e) => error_response(&e),
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/transfers", post(initiate_transfer))
        .route("/api/v1/transfers/{id}", get(get_transfer))
        .layer(Extension(state))
}
