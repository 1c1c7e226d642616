//! Channel listing route.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/channels", get(list_channels))
}

#[derive(Debug, Serialize)]
struct ChannelsResponse {
    channels: Vec<String>,
}

/// GET /channels - Names of all registered backends, sorted for stable output.
async fn list_channels(State(state): State<AppState>) -> Json<ChannelsResponse> {
    let mut channels = state.notifier.channel_names();
    channels.sort();
    Json(ChannelsResponse { channels })
}
