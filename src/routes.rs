use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::{get, post}, Json, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::controller::RequestController;
use crate::models::{PublishedState, SubmitRequest, SubmitResponse};

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<RequestController>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/generate", post(submit))
        .route("/api/state", get(current_state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Fire-and-forget: the outcome shows up in `/api/state`.
pub async fn submit(
    State(state): State<AppState>,
    Json(body): Json<SubmitRequest>,
) -> (StatusCode, Json<SubmitResponse>) {
    let submission = state.controller.submit(&body.product_name, &body.keywords);
    (StatusCode::ACCEPTED, Json(SubmitResponse { token: submission.token }))
}

pub async fn current_state(State(state): State<AppState>) -> Json<PublishedState> {
    Json(state.controller.current())
}
