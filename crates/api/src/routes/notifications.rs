//! Notification submission route.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use tracing::{info, instrument};
use validator::Validate;

use contracts::NotificationRequest;

use crate::error::ApiError;
use crate::state::AppState;

pub const ACCEPTED_MESSAGE: &str = "Notification accepted for processing";

pub fn router() -> Router<AppState> {
    Router::new().route("/notifications", post(submit_notification))
}

#[derive(Debug, Serialize)]
struct SubmitResponse {
    message: &'static str,
}

/// POST /notifications - Queue one notification per requested channel.
///
/// Responds once the notifications are buffered; delivery happens in the background.
#[instrument(name = "api_submit_notification", skip_all)]
async fn submit_notification(
    State(state): State<AppState>,
    payload: Result<Json<NotificationRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))?;
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let channels = request.channels.len();
    state.notifier.submit(request.into_notifications()).await?;

    info!(channels, "Notification accepted");
    Ok(Json(SubmitResponse {
        message: ACCEPTED_MESSAGE,
    }))
}
