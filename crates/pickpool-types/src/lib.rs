//! Shared type definitions for the pick pool.
//!
//! This crate is the single source of truth for all types used across the
//! workspace. Types defined here flow downstream to `TypeScript` via
//! `ts-rs` for the standings front end.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe integer wrappers for team and participant ids
//! - [`enums`] -- The two-valued [`Group`] enumeration
//! - [`structs`] -- Teams, participants, persisted snapshots and scoring
//!   projections

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Group, UnknownGroup};
pub use ids::{ParticipantId, TeamId};
pub use structs::{
    BestPick, GroupBreakdown, GroupSubtotals, MAX_POSITION, MIN_POSITION, Participant,
    ParticipantBreakdown, PickRow, PickSet, ScoredParticipant, Team, TeamRecord, WinCounts,
    WinSnapshot,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs generates TypeScript bindings when types with
        // #[ts(export)] are used. The files land in `bindings/`
        // relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::TeamId::export_all();
        let _ = crate::ids::ParticipantId::export_all();

        // Enums
        let _ = crate::enums::Group::export_all();

        // Structs
        let _ = crate::structs::Team::export_all();
        let _ = crate::structs::PickSet::export_all();
        let _ = crate::structs::Participant::export_all();
        let _ = crate::structs::TeamRecord::export_all();
        let _ = crate::structs::WinSnapshot::export_all();
        let _ = crate::structs::BestPick::export_all();
        let _ = crate::structs::GroupSubtotals::export_all();
        let _ = crate::structs::ScoredParticipant::export_all();
        let _ = crate::structs::PickRow::export_all();
        let _ = crate::structs::GroupBreakdown::export_all();
        let _ = crate::structs::ParticipantBreakdown::export_all();
    }
}
