//! REST API endpoint handlers for the pick pool server.
//!
//! Reads merge the team catalog with the stored win counts on every
//! request; standings are cached in [`AppState`] until the next write.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/api/health` | Liveness and storage location |
//! | `GET` | `/api/teams` | Live teams, optional `?group=` filter |
//! | `GET` | `/api/teams/:id` | Single live team |
//! | `PUT` | `/api/team` | Set one team's wins |
//! | `PUT` | `/api/teams` | Set several teams' wins in one write |
//! | `GET` | `/api/standings` | Ranked participants |
//! | `GET` | `/api/participants/:id` | Scored participant with per-pick rows |

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use pickpool_scoring::{pick_breakdown, score_participant};
use pickpool_types::{Group, ParticipantId, TeamId};
use serde_json::Number;

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request structs
// ---------------------------------------------------------------------------

/// Query parameters for the `GET /api/teams` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct TeamsQuery {
    /// Restrict to one group: `eastern` or `western`.
    pub group: Option<String>,
}

/// Body of `PUT /api/team` and one entry of `PUT /api/teams`.
///
/// Numbers are taken as raw JSON numbers so that fractional or
/// out-of-range values become a 400 with a clear message rather than a
/// generic deserialization failure.
#[derive(Debug, serde::Deserialize)]
pub struct WinsUpdate {
    /// Target team.
    #[serde(rename = "teamId")]
    pub team_id: Number,
    /// New win count.
    pub wins: Number,
}

/// Body of `PUT /api/teams`.
#[derive(Debug, serde::Deserialize)]
pub struct BatchWinsUpdate {
    /// Updates applied together in one snapshot write.
    pub teams: Vec<WinsUpdate>,
}

impl WinsUpdate {
    /// Check the shape of the numbers; range checks happen in the store.
    fn parse(&self) -> Result<(TeamId, i64), ApiError> {
        let team = self
            .team_id
            .as_u64()
            .and_then(|id| u32::try_from(id).ok())
            .ok_or_else(|| {
                ApiError::InvalidRequest(format!("teamId must be a non-negative integer, got {}", self.team_id))
            })?;
        let wins = match (self.wins.as_i64(), self.wins.is_u64()) {
            (Some(wins), _) => wins,
            (None, true) => {
                return Err(ApiError::InvalidRequest(format!("wins {} is out of range", self.wins)));
            }
            (None, false) => {
                return Err(ApiError::InvalidRequest(format!("wins must be an integer, got {}", self.wins)));
            }
        };
        Ok((TeamId(team), wins))
    }
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(ApiError::InvalidRequest(rejection.body_text())),
    }
}

fn parse_id(raw: &str, what: &str) -> Result<u32, ApiError> {
    raw.parse::<u32>()
        .map_err(|e| ApiError::InvalidRequest(format!("invalid {what} id '{raw}': {e}")))
}

// ---------------------------------------------------------------------------
// GET /api/health
// ---------------------------------------------------------------------------

/// Liveness probe reporting where win counts are stored.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "storage": state.store.describe(),
        "teams": state.registry.len(),
        "participants": state.roster.len(),
    }))
}

// ---------------------------------------------------------------------------
// GET /api/teams
// ---------------------------------------------------------------------------

/// List the merged live teams, optionally filtered by group.
///
/// Storage problems never fail this endpoint; catalog defaults are served
/// instead.
pub async fn list_teams(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TeamsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let group = params
        .group
        .as_deref()
        .map(str::parse::<Group>)
        .transpose()
        .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

    let live = state.live_teams().await?;
    let teams: Vec<_> = match group {
        Some(g) => live.in_group(g).cloned().collect(),
        None => live.into_teams(),
    };

    Ok(Json(serde_json::json!({ "teams": teams })))
}

// ---------------------------------------------------------------------------
// GET /api/teams/:id
// ---------------------------------------------------------------------------

/// Return one live team.
pub async fn get_team(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = TeamId(parse_id(&id_str, "team")?);
    let live = state.live_teams().await?;
    let team = live
        .get(id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("Team with ID {id} not found")))?;

    Ok(Json(serde_json::json!({ "team": team })))
}

// ---------------------------------------------------------------------------
// PUT /api/team
// ---------------------------------------------------------------------------

/// Set the win count of a single team.
///
/// Responds with the updated team and the value it replaced.
pub async fn update_team(
    State(state): State<Arc<AppState>>,
    body: Result<Json<WinsUpdate>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let (team_id, wins) = json_body(body)?.parse()?;

    let previous = state.update_wins(vec![(team_id, wins)]).await?;
    let previous_wins = previous.first().map(|&(_, prev)| prev);

    let live = state.live_teams().await?;
    let team = live.get(team_id).cloned();

    Ok(Json(serde_json::json!({
        "success": true,
        "team": team,
        "previousWins": previous_wins,
    })))
}

// ---------------------------------------------------------------------------
// PUT /api/teams
// ---------------------------------------------------------------------------

/// Set the win counts of several teams in one write.
///
/// All entries are validated before anything is written; one bad entry
/// rejects the whole batch.
pub async fn update_teams(
    State(state): State<Arc<AppState>>,
    body: Result<Json<BatchWinsUpdate>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let batch = json_body(body)?;
    let updates = batch
        .teams
        .iter()
        .map(WinsUpdate::parse)
        .collect::<Result<Vec<_>, _>>()?;
    if updates.is_empty() {
        return Err(ApiError::InvalidRequest(String::from("teams must not be empty")));
    }

    let count = updates.len();
    state.update_wins(updates).await?;
    let live = state.live_teams().await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "updated": count,
        "teams": live.into_teams(),
    })))
}

// ---------------------------------------------------------------------------
// GET /api/standings
// ---------------------------------------------------------------------------

/// Ranked standings for every participant in the roster.
pub async fn get_standings(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let standings = state.standings().await?;
    Ok(Json(serde_json::json!({
        "count": standings.len(),
        "standings": standings.as_slice(),
    })))
}

// ---------------------------------------------------------------------------
// GET /api/participants/:id
// ---------------------------------------------------------------------------

/// One participant's score, best pick, and per-pick breakdown.
pub async fn get_participant(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = ParticipantId(parse_id(&id_str, "participant")?);
    let participant = state
        .roster
        .get(id)
        .ok_or_else(|| ApiError::NotFound(format!("Participant with ID {id} not found")))?;

    let live = state.live_teams().await?;
    let scored = score_participant(participant, &live);
    let breakdown = pick_breakdown(participant, &live);

    Ok(Json(serde_json::json!({
        "participant": scored,
        "breakdown": breakdown,
    })))
}
