//! Worlds-style tournament simulator: library with models, business logic, file loading, snapshot storage and the live tournament registry.

pub mod loader;
pub mod logic;
pub mod models;
pub mod service;
pub mod store;

pub use loader::{load_setup, read_roster, read_seeding, LoadError, SetupPaths};
pub use logic::{
    advance, create_manual_round, full_reset, lock_match_result, partial_reset,
    prepare_swiss_round, rebuild_records, set_outcome_strategy, simulate_round,
};
pub use models::{
    Entrant, EntrantId, ErrorKind, GameMatch, KnockoutRound, MatchId, Matchup,
    OutcomeStrategyKind, Region, SeedingConfig, StageType, Tournament, TournamentError,
    TournamentId, TournamentPhase,
};
pub use service::{ServiceError, TournamentService};
pub use store::SnapshotStore;
