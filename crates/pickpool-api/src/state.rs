//! Shared application state for the pick pool API.
//!
//! [`AppState`] holds the reference data, the win-count store, a cached
//! standings view, and a broadcast channel that tells in-process consumers
//! when win counts changed.
//!
//! # Writes and staleness
//!
//! The store itself does not serialize writers, so the API does. Every
//! update takes the write side of an async gate. Reads take the read side,
//! because a read that finds the snapshot missing bootstraps and writes
//! one; holding the gate keeps that write from landing over an update.
//!
//! After a successful write the standings cache is invalidated and a
//! [`WinsChanged`] message is sent. Each write also bumps a generation
//! counter; a standings computation that started before a write will not be
//! cached after it.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use pickpool_registry::{Roster, TeamRegistry};
use pickpool_scoring::{LiveTeams, merge_live_teams, rank_participants};
use pickpool_store::WinCountStore;
use pickpool_types::{ScoredParticipant, TeamId, TeamRecord};
use tokio::sync::{RwLock, broadcast};

use crate::error::ApiError;

/// Capacity of the broadcast channel for change notifications.
const BROADCAST_CAPACITY: usize = 64;

/// Notification sent after win counts were written.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct WinsChanged {
    /// The new values that were written.
    pub teams: Vec<TeamRecord>,
    /// When the write completed.
    pub at: DateTime<Utc>,
}

/// Standings computed for one generation of win counts.
#[derive(Debug)]
struct CachedStandings {
    generation: u64,
    standings: Arc<Vec<ScoredParticipant>>,
}

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
pub struct AppState {
    /// The immutable team catalog.
    pub registry: Arc<TeamRegistry>,
    /// The participants scored in the standings.
    pub roster: Arc<Roster>,
    /// The durable win-count overlay.
    pub store: Arc<WinCountStore>,
    /// Shared by reads, exclusive for updates.
    store_gate: RwLock<()>,
    /// Bumped after every successful write.
    generation: AtomicU64,
    /// Last computed standings, if still current.
    standings: RwLock<Option<CachedStandings>>,
    /// Sender for change notifications.
    tx: broadcast::Sender<WinsChanged>,
}

impl core::fmt::Debug for AppState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppState")
            .field("teams", &self.registry.len())
            .field("participants", &self.roster.len())
            .field("store", &self.store)
            .field("generation", &self.generation())
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create application state around already loaded components.
    pub fn new(registry: Arc<TeamRegistry>, roster: Arc<Roster>, store: Arc<WinCountStore>) -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            registry,
            roster,
            store,
            store_gate: RwLock::new(()),
            generation: AtomicU64::new(0),
            standings: RwLock::new(None),
            tx,
        }
    }

    /// Subscribe to win-count change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<WinsChanged> {
        self.tx.subscribe()
    }

    /// Current write generation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    // -------------------------------------------------------------------
    // Read path
    // -------------------------------------------------------------------

    /// The merged live team set. Never fails on storage errors: the store
    /// degrades to catalog defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Internal`] only if the blocking read task panics.
    pub async fn live_teams(&self) -> Result<LiveTeams, ApiError> {
        let _guard = self.store_gate.read().await;
        let store = Arc::clone(&self.store);
        let wins = tokio::task::spawn_blocking(move || store.load_all()).await?;
        Ok(merge_live_teams(&self.registry, &wins))
    }

    /// Ranked standings for the roster, served from cache when current.
    ///
    /// # Errors
    ///
    /// See [`AppState::live_teams`].
    pub async fn standings(&self) -> Result<Arc<Vec<ScoredParticipant>>, ApiError> {
        let generation = self.generation();
        if let Some(cached) = self.standings.read().await.as_ref()
            && cached.generation == generation
        {
            return Ok(Arc::clone(&cached.standings));
        }

        let live = self.live_teams().await?;
        let standings = Arc::new(rank_participants(self.roster.participants(), &live));

        // A write may have landed while we were computing; only cache a
        // result that is still current.
        if self.generation() == generation {
            *self.standings.write().await = Some(CachedStandings {
                generation,
                standings: Arc::clone(&standings),
            });
        }
        Ok(standings)
    }

    /// Drop any cached standings so the next read recomputes them.
    pub async fn invalidate_standings(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.standings.write().await = None;
    }

    // -------------------------------------------------------------------
    // Write path
    // -------------------------------------------------------------------

    /// Write new win counts and return `(team, previous)` pairs.
    ///
    /// A single update goes through `update_one`; several go through one
    /// batched snapshot write.
    ///
    /// # Errors
    ///
    /// Propagates store errors: not found, invalid argument, or storage
    /// unavailable. Nothing is invalidated when the write fails.
    pub async fn update_wins(&self, updates: Vec<(TeamId, i64)>) -> Result<Vec<(TeamId, u32)>, ApiError> {
        let _guard = self.store_gate.write().await;

        let store = Arc::clone(&self.store);
        let batch = updates.clone();
        let previous = tokio::task::spawn_blocking(move || match batch.as_slice() {
            [(team, wins)] => store.update_one(*team, *wins).map(|prev| vec![(*team, prev)]),
            many => store.update_many(many),
        })
        .await??;

        self.invalidate_standings().await;

        let teams = updates
            .iter()
            .filter_map(|&(id, wins)| u32::try_from(wins).ok().map(|wins| TeamRecord { id, wins }))
            .collect();
        let receivers = self
            .tx
            .send(WinsChanged {
                teams,
                at: Utc::now(),
            })
            .unwrap_or(0);
        tracing::debug!(receivers, "Win-count change broadcast");

        Ok(previous)
    }
}
