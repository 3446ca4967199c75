//! Scoring and ranking engine for the pick pool.
//!
//! Everything here is a pure, synchronous function of its inputs: no I/O,
//! no shared mutable state, safe to call from any number of threads.
//!
//! # Flow
//!
//! ```text
//! TeamRegistry + WinCounts --merge_live_teams--> LiveTeams
//! LiveTeams + Participant  --score_participant--> ScoredParticipant
//! LiveTeams + [Participant] --rank_participants--> standings
//! ```
//!
//! # Modules
//!
//! - [`overlay`] -- The read-through merge and the [`LiveTeams`] lookup
//! - [`engine`] -- Per-participant scoring and standings
//! - [`breakdown`] -- Per-pick detail rows

pub mod breakdown;
pub mod engine;
pub mod overlay;

pub use breakdown::{group_breakdown, pick_breakdown};
pub use engine::{pick_points, rank_participants, score_participant};
pub use overlay::{LiveTeams, merge_live_teams};
