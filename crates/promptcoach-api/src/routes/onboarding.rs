//! Routes for the Onboarding bounded context.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{
    Json, Router,
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use promptcoach_onboarding::application::command_handlers::OnboardingCommandResult;
use promptcoach_onboarding::application::query_handlers::SessionView;
use promptcoach_onboarding::domain::phase::ChoiceId;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /sessions/{id}/choose.
#[derive(Debug, Deserialize)]
pub struct ChooseRequest {
    /// The option being picked.
    pub choice: ChoiceId,
}

/// Request body for POST /sessions/{id}/answer.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    /// The player's answer to "is this a good prompt?".
    pub is_good: bool,
}

/// Response body returned after a command is handled. `event_ids` is empty
/// when the input had no meaning in the session's current phase.
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    /// The session the command addressed.
    pub session_id: Uuid,
    /// IDs of the domain events produced and persisted.
    pub event_ids: Vec<Uuid>,
}

/// Response body for POST /sessions/{id}/call-to-action.
#[derive(Debug, Serialize)]
pub struct CallToActionResponse {
    /// Always `true`; the click never fails from the player's side.
    pub acknowledged: bool,
}

fn command_response(result: &OnboardingCommandResult) -> CommandResponse {
    CommandResponse {
        session_id: result.session_id,
        event_ids: result.stored_events.iter().map(|e| e.event_id).collect(),
    }
}

/// POST /sessions
#[instrument(skip(state))]
async fn start_session(State(state): State<AppState>) -> Result<Json<CommandResponse>, ApiError> {
    let result = state.session_service.start_session().await?;

    info!(session_id = %result.session_id, "onboarding session started");

    Ok(Json(command_response(&result)))
}

/// GET /sessions/{id}
#[instrument(skip(state), fields(session_id = %session_id))]
async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    let view = state.session_service.get_session(session_id).await?;

    Ok(Json(view))
}

/// POST /sessions/{id}/confirm
#[instrument(skip(state), fields(session_id = %session_id))]
async fn confirm(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<CommandResponse>, ApiError> {
    let result = state.session_service.confirm(session_id).await?;

    Ok(Json(command_response(&result)))
}

/// POST /sessions/{id}/choose
#[instrument(skip(state, request), fields(session_id = %session_id))]
async fn choose(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ChooseRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let result = state
        .session_service
        .choose(session_id, request.choice)
        .await?;

    Ok(Json(command_response(&result)))
}

/// POST /sessions/{id}/answer
#[instrument(skip(state, request), fields(session_id = %session_id))]
async fn answer(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let result = state
        .session_service
        .answer(session_id, request.is_good)
        .await?;

    Ok(Json(command_response(&result)))
}

/// POST /sessions/{id}/call-to-action
#[instrument(skip(state), fields(session_id = %session_id))]
async fn call_to_action(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<CallToActionResponse>, ApiError> {
    state
        .session_service
        .confirm_call_to_action(session_id)
        .await?;

    Ok(Json(CallToActionResponse { acknowledged: true }))
}

/// DELETE /sessions/{id}
#[instrument(skip(state), fields(session_id = %session_id))]
async fn teardown(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.session_service.teardown(session_id).await?;

    info!("onboarding session torn down");

    Ok(StatusCode::NO_CONTENT)
}

/// Returns the router for the onboarding context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(start_session))
        .route("/sessions/{id}", get(get_session))
        .route("/sessions/{id}", delete(teardown))
        .route("/sessions/{id}/confirm", post(confirm))
        .route("/sessions/{id}/choose", post(choose))
        .route("/sessions/{id}/answer", post(answer))
        .route("/sessions/{id}/call-to-action", post(call_to_action))
}
