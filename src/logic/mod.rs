//! Tournament business logic: Swiss draw, knockout bracket, simulation, locks and resets.
//!
//! Every operation takes a snapshot and returns a new one; on error the input is untouched.

pub mod knockout;
pub mod outcome;
pub mod rules;
pub mod swiss_draw;

mod lock;
mod manual_round;
mod progression;
mod reset;
mod simulate;

pub use lock::lock_match_result;
pub use manual_round::create_manual_round;
pub use outcome::{
    strategy_for, MatchOutcome, OutcomeStrategy, RegionWeightedOutcome, UniformOutcome,
};
pub use progression::{advance, prepare_swiss_round, set_outcome_strategy};
pub use reset::{full_reset, partial_reset, rebuild_records};
pub use simulate::simulate_round;
