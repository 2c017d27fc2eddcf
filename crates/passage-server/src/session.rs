//! Session cookies and the authentication gate.
//!
//! A session is a server-side (token -> username) entry plus a signed
//! cookie `<token>.<sha256(secret:token)>`. Routes behind
//! [`require_session`] get an [`AuthContext`] request extension; everything
//! else stays anonymous.

use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::api_types::{LoginRequest, StatusResponse};
use crate::error::ApiError;
use crate::state::AppState;
use passage_core::credentials;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "passage_session";

/// Authenticated identity attached to gated requests.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub username: String,
}

/// Gate middleware for everything that requires a login. API paths are
/// rejected with 401 JSON; page paths redirect to the login form.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(username) = session_from_headers(&state, request.headers()) {
        request.extensions_mut().insert(AuthContext { username });
        return next.run(request).await;
    }

    if request.uri().path().starts_with("/api/") {
        (
            StatusCode::UNAUTHORIZED,
            Json(StatusResponse::failure("Authentication required")),
        )
            .into_response()
    } else {
        Redirect::to("/login").into_response()
    }
}

/// Resolve the session cookie in `headers` to a username.
pub fn session_from_headers(state: &AppState, headers: &HeaderMap) -> Option<String> {
    let cookie_value = cookie_from_headers(headers)?;
    state.session_user(&cookie_value)
}

/// Extract the raw session cookie value from a Cookie header.
pub fn cookie_from_headers(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    for cookie in cookies.split(';') {
        if let Some(value) = cookie.trim().strip_prefix(&format!("{SESSION_COOKIE}=")) {
            return Some(value.to_string());
        }
    }
    None
}

fn set_session_cookie(value: &str) -> String {
    format!("{SESSION_COOKIE}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age=86400")
}

fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Handler for `POST /login`.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let username = body.username.trim();
    if username.is_empty() || body.password.is_empty() {
        return Ok(
            Json(StatusResponse::failure("Username and password required!")).into_response(),
        );
    }

    let admin = state.store().find_admin_by_username(username).await?;
    match admin {
        Some(admin) if credentials::verify(&body.password, &admin.password) => {
            let cookie = set_session_cookie(&state.open_session(username));
            tracing::info!(username, "admin logged in");
            Ok((
                [(header::SET_COOKIE, cookie)],
                Json(StatusResponse::ok("Login successful!")),
            )
                .into_response())
        }
        _ => Ok(Json(StatusResponse::failure("Invalid username or password!")).into_response()),
    }
}

/// Handler for `GET /logout`.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(cookie_value) = cookie_from_headers(&headers) {
        state.close_session(&cookie_value);
    }
    (
        [(header::SET_COOKIE, clear_session_cookie())],
        Redirect::to("/login"),
    )
        .into_response()
}
