//! Axum router construction for the pick pool API.
//!
//! Assembles all routes into a single [`Router`] with CORS enabled so a
//! browser front end served from another origin can call it.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /api/health` -- liveness and storage location
/// - `GET /api/teams` -- live teams (`?group=eastern|western`)
/// - `GET /api/teams/{id}` -- single live team
/// - `PUT /api/team` -- set one team's wins
/// - `PUT /api/teams` -- set several teams' wins
/// - `GET /api/standings` -- ranked participants
/// - `GET /api/participants/{id}` -- participant detail
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/teams", get(handlers::list_teams).put(handlers::update_teams))
        .route("/api/teams/{id}", get(handlers::get_team))
        .route("/api/team", put(handlers::update_team))
        .route("/api/standings", get(handlers::get_standings))
        .route("/api/participants/{id}", get(handlers::get_participant))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
