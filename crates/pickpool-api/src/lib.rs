//! JSON API for the playoff pick pool.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Team endpoints** serving the catalog merged with stored win counts
//! - **Write endpoints** that set win counts through the win-count store
//! - **Standings endpoints** that score the roster against live teams
//!
//! # Architecture
//!
//! Handlers share an [`AppState`] holding the registry, the roster, and the
//! store. Store I/O is blocking and runs on Tokio's blocking pool. Writes
//! are serialized by the state; each successful write invalidates the
//! cached standings and is announced on a broadcast channel.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::{AppState, WinsChanged};
