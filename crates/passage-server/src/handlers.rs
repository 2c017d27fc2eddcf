//! Request handlers for pages, client CRUD, credentials, stats, and health.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde_json::Value;

use crate::api_types::{
    ChangeCredentialsRequest, CreatedResponse, CredentialsResponse, NotFoundResponse,
    StatusResponse,
};
use crate::error::ApiError;
use crate::pages;
use crate::session;
use crate::state::AppState;
use passage_core::client::{collect_for_create, collect_for_update};
use passage_core::{ClientRecord, PipelineStats};
use passage_store::admin::{self, CredentialError};

// =============================================================================
// Page handlers
// =============================================================================

/// GET `/` — route by session.
pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Redirect {
    if session::session_from_headers(&state, &headers).is_some() {
        Redirect::to("/dashboard")
    } else {
        Redirect::to("/login")
    }
}

/// GET `/login` — login form, or straight to the dashboard when already
/// authenticated.
pub async fn login_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if session::session_from_headers(&state, &headers).is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    Html(pages::LOGIN_PAGE).into_response()
}

/// GET `/dashboard` (behind the gate).
pub async fn dashboard_page(Extension(auth): Extension<session::AuthContext>) -> Html<&'static str> {
    tracing::debug!(username = %auth.username, "dashboard view");
    Html(pages::DASHBOARD_PAGE)
}

// =============================================================================
// Admin credentials API
// =============================================================================

/// GET `/api/admin/credentials` — public read used by the settings form.
pub async fn admin_credentials(State(state): State<AppState>) -> Result<Response, ApiError> {
    match state.store().find_admin().await? {
        Some(admin) => Ok(Json(CredentialsResponse {
            success: true,
            username: admin.username,
            password_length: 8,
        })
        .into_response()),
        None => Ok(Json(StatusResponse::failure("No admin found")).into_response()),
    }
}

/// POST `/api/admin/change-credentials`.
pub async fn change_credentials(
    State(state): State<AppState>,
    Json(body): Json<ChangeCredentialsRequest>,
) -> Response {
    match admin::change_credentials(
        state.store(),
        &body.current_password,
        &body.new_username,
        &body.new_password,
    )
    .await
    {
        Ok(username) => {
            state.rename_sessions(&username);
            Json(StatusResponse::ok("Credentials updated successfully!")).into_response()
        }
        Err(CredentialError::Store(err)) => ApiError::from(err).into_response(),
        Err(err) => Json(StatusResponse::failure(err.to_string())).into_response(),
    }
}

// =============================================================================
// Clients API
// =============================================================================

/// GET `/api/clients` — every record, newest first.
pub async fn list_clients(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClientRecord>>, ApiError> {
    Ok(Json(state.store().list_clients().await?))
}

/// POST `/api/clients`.
pub async fn create_client(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let Some(payload) = body.as_object() else {
        return Json(StatusResponse::failure("No data provided")).into_response();
    };
    let fields = match collect_for_create(payload) {
        Ok(fields) => fields,
        Err(err) => return Json(StatusResponse::failure(err.to_string())).into_response(),
    };
    if fields.is_empty() {
        return Json(StatusResponse::failure("No data provided")).into_response();
    }

    match state.store().insert_client(&fields).await {
        Ok(id) => Json(CreatedResponse {
            success: true,
            id,
            message: "Client added successfully!".to_string(),
        })
        .into_response(),
        // Constraint violations surface the driver message to the form.
        Err(err) => Json(StatusResponse::failure(err.to_string())).into_response(),
    }
}

/// GET `/api/clients/{id}`.
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    match state.store().get_client(id).await? {
        Some(record) => Ok(Json(record).into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(NotFoundResponse {
                error: "Client not found",
            }),
        )
            .into_response()),
    }
}

/// PUT `/api/clients/{id}` — partial update; a missing id is a silent no-op.
pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let Some(payload) = body.as_object() else {
        return Json(StatusResponse::failure("No data provided")).into_response();
    };
    let fields = match collect_for_update(payload) {
        Ok(fields) => fields,
        Err(err) => return Json(StatusResponse::failure(err.to_string())).into_response(),
    };

    match state.store().update_client(id, &fields).await {
        Ok(()) => Json(StatusResponse::ok("Client updated successfully!")).into_response(),
        Err(err) => Json(StatusResponse::failure(err.to_string())).into_response(),
    }
}

/// DELETE `/api/clients/{id}` — idempotent.
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<StatusResponse>, ApiError> {
    state.store().delete_client(id).await?;
    Ok(Json(StatusResponse::ok("Client deleted successfully!")))
}

/// DELETE `/api/clients/clear`.
pub async fn clear_clients(
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, ApiError> {
    state.store().clear_clients().await?;
    Ok(Json(StatusResponse::ok("All clients deleted!")))
}

// =============================================================================
// Stats and health
// =============================================================================

/// GET `/api/stats`.
pub async fn stats(State(state): State<AppState>) -> Result<Json<PipelineStats>, ApiError> {
    Ok(Json(state.store().stats().await?))
}

/// GET `/health`.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "database": state.store().backend(),
    }))
}
