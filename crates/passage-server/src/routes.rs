//! Route table.

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::session;
use crate::state::AppState;

/// Build the full router: public routes merged with the session-gated set.
pub fn create_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/", get(handlers::index))
        .route("/login", get(handlers::login_page).post(session::login))
        .route("/logout", get(session::logout))
        .route("/health", get(handlers::health))
        .route("/api/admin/credentials", get(handlers::admin_credentials))
        .route(
            "/api/admin/change-credentials",
            post(handlers::change_credentials),
        );

    let gated = Router::new()
        .route("/dashboard", get(handlers::dashboard_page))
        .route(
            "/api/clients",
            get(handlers::list_clients).post(handlers::create_client),
        )
        .route("/api/clients/clear", delete(handlers::clear_clients))
        .route(
            "/api/clients/{id}",
            get(handlers::get_client)
                .put(handlers::update_client)
                .delete(handlers::delete_client),
        )
        .route("/api/stats", get(handlers::stats))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session::require_session,
        ));

    public
        .merge(gated)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
