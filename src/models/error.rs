//! Errors raised by tournament operations.

use crate::models::entrant::{EntrantId, RecordBracket};
use crate::models::game::{KnockoutRound, MatchId, StageType};
use crate::models::seeding::SeedTier;
use serde::Serialize;

/// Broad category of a [`TournamentError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad roster, seeding tiers or baseline/manual matchups.
    Configuration,
    /// A round cannot be paired within the rules and the retry budget.
    PairingInfeasible,
    /// Counts or references that must hold did not.
    InvariantViolation,
    /// The operation is not allowed in the tournament's current state.
    State,
}

/// Errors that can occur during tournament operations. A failed operation never changes the snapshot.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Roster does not have the required number of entrants.
    WrongRosterSize { expected: usize, found: usize },
    /// Two roster rows share an id.
    DuplicateEntrant(EntrantId),
    /// Entrant name empty or longer than 50 characters.
    InvalidEntrantName(EntrantId),
    /// A seed tier has the wrong number of entrants.
    InvalidTierSize { tier: SeedTier, expected: usize, found: usize },
    /// An id does not match any (eligible) entrant.
    UnknownEntrant(EntrantId),
    /// Entrant listed in more than one seed tier.
    DuplicateTierMember(EntrantId),
    /// Roster entrant without a seed tier.
    MissingTier(EntrantId),
    /// Snapshot carries no seeding configuration.
    MissingSeedingConfig,
    /// No unused tier-3 entrant from another region is left for this tier-1 entrant.
    NoCrossRegionOpponent(EntrantId),
    /// Baseline round is malformed (bad round number, empty, repeated).
    InvalidBaselineRound { round_number: u32, reason: String },
    /// Entrant appears twice in one round's matchups.
    DuplicateAssignment { round_number: u32, entrant: EntrantId },
    /// Matchup pairs an entrant with itself.
    SelfPairing(EntrantId),
    /// Submitted round leaves active entrants without a match.
    IncompleteRound { round_number: u32, missing: Vec<EntrantId> },
    /// Submitted matchup pairs entrants with different records.
    RecordMismatch { entrant_a: EntrantId, entrant_b: EntrantId },
    /// A record group has an odd number of entrants.
    OddRecordGroup { record: RecordBracket, size: usize },
    /// Every shuffle attempt left someone unpaired.
    PairingExhausted { group: String, attempts: usize },
    /// Knockout needs exactly 8 qualified entrants.
    WrongQualifiedCount { expected: usize, found: usize },
    /// Qualified records cannot be seeded (two 3-0 and two or three 3-2 entrants required).
    InvalidKnockoutDistribution { three_zero: usize, three_one: usize, three_two: usize },
    /// A knockout round did not produce the expected number of matches.
    WrongMatchCount { round: KnockoutRound, expected: usize, found: usize },
    /// Wrong number of winners fed into the next knockout round.
    WrongWinnerCount { round: KnockoutRound, expected: usize, found: usize },
    /// Winner id is not one of the match's two entrants.
    WinnerNotParticipant { match_id: MatchId, winner: EntrantId },
    /// Operation applied to a match of the wrong stage.
    WrongStage { expected: StageType, found: StageType },
    MatchNotFound(MatchId),
    /// Entrant is qualified or eliminated and cannot be paired.
    EntrantNotActive(EntrantId),
    MatchAlreadyResolved(MatchId),
    MatchAlreadyLocked(MatchId),
    /// Partial reset needs a manual or baseline round to rewind to.
    NoAnchorRound,
    /// There is no unresolved round to simulate.
    NoPendingRound,
    /// All five Swiss rounds already exist.
    SwissRoundLimit,
    /// Swiss stage is already completed.
    SwissCompleted,
    /// Knockout final has been played.
    TournamentCompleted,
}

impl TournamentError {
    pub fn kind(&self) -> ErrorKind {
        use TournamentError::*;
        match self {
            WrongRosterSize { .. }
            | DuplicateEntrant(_)
            | InvalidEntrantName(_)
            | InvalidTierSize { .. }
            | UnknownEntrant(_)
            | DuplicateTierMember(_)
            | MissingTier(_)
            | MissingSeedingConfig
            | NoCrossRegionOpponent(_)
            | InvalidBaselineRound { .. }
            | DuplicateAssignment { .. }
            | SelfPairing(_)
            | IncompleteRound { .. }
            | RecordMismatch { .. } => ErrorKind::Configuration,
            OddRecordGroup { .. } | PairingExhausted { .. } => ErrorKind::PairingInfeasible,
            WrongQualifiedCount { .. }
            | InvalidKnockoutDistribution { .. }
            | WrongMatchCount { .. }
            | WrongWinnerCount { .. }
            | WinnerNotParticipant { .. }
            | WrongStage { .. }
            | MatchNotFound(_)
            | EntrantNotActive(_) => ErrorKind::InvariantViolation,
            MatchAlreadyResolved(_)
            | MatchAlreadyLocked(_)
            | NoAnchorRound
            | NoPendingRound
            | SwissRoundLimit
            | SwissCompleted
            | TournamentCompleted => ErrorKind::State,
        }
    }
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use TournamentError::*;
        match self {
            WrongRosterSize { expected, found } => {
                write!(f, "Roster must contain {} entrants (found {})", expected, found)
            }
            DuplicateEntrant(id) => write!(f, "Entrant id \"{}\" is used more than once", id),
            InvalidEntrantName(id) => {
                write!(f, "Entrant \"{}\" must have a name of 1-50 characters", id)
            }
            InvalidTierSize { tier, expected, found } => write!(
                f,
                "Tier {} must contain {} entrants (found {})",
                tier, expected, found
            ),
            UnknownEntrant(id) => write!(f, "Unknown or ineligible entrant \"{}\"", id),
            DuplicateTierMember(id) => write!(f, "Entrant \"{}\" appears in multiple tiers", id),
            MissingTier(id) => write!(f, "Entrant \"{}\" is missing a tier assignment", id),
            MissingSeedingConfig => {
                write!(f, "Seeding configuration missing; cannot prepare Swiss round")
            }
            NoCrossRegionOpponent(id) => write!(
                f,
                "Unable to find a tier 3 opponent for \"{}\" without violating region rules",
                id
            ),
            InvalidBaselineRound { round_number, reason } => {
                write!(f, "Baseline round {} is invalid: {}", round_number, reason)
            }
            DuplicateAssignment { round_number, entrant } => write!(
                f,
                "Entrant \"{}\" is assigned more than once in round {}",
                entrant, round_number
            ),
            SelfPairing(id) => write!(f, "Entrant \"{}\" cannot be paired with itself", id),
            IncompleteRound { round_number, missing } => write!(
                f,
                "Round {} leaves {} active entrant(s) unpaired: {}",
                round_number,
                missing.len(),
                missing.join(", ")
            ),
            RecordMismatch { entrant_a, entrant_b } => write!(
                f,
                "\"{}\" and \"{}\" do not share the same record",
                entrant_a, entrant_b
            ),
            OddRecordGroup { record, size } => write!(
                f,
                "Record bracket {} has an odd number of entrants ({})",
                record, size
            ),
            PairingExhausted { group, attempts } => write!(
                f,
                "Failed to pair group {} after {} attempts",
                group, attempts
            ),
            WrongQualifiedCount { expected, found } => {
                write!(f, "Expected {} qualified entrants, got {}", expected, found)
            }
            InvalidKnockoutDistribution { three_zero, three_one, three_two } => write!(
                f,
                "Swiss format expects exactly two 3-0 entrants and two or three 3-2 entrants \
                 (got 3-0: {}, 3-1: {}, 3-2: {})",
                three_zero, three_one, three_two
            ),
            WrongMatchCount { round, expected, found } => write!(
                f,
                "Expected {} {:?} matches, created {}",
                expected, round, found
            ),
            WrongWinnerCount { round, expected, found } => write!(
                f,
                "Expected {} winners to build the {:?} round, got {}",
                expected, round, found
            ),
            WinnerNotParticipant { match_id, winner } => write!(
                f,
                "Winner \"{}\" is not a participant of match {}",
                winner, match_id
            ),
            WrongStage { expected, found } => write!(
                f,
                "Operation requires a {:?} match, found {:?}",
                expected, found
            ),
            MatchNotFound(id) => write!(f, "Match {} not found", id),
            EntrantNotActive(id) => write!(f, "Entrant \"{}\" is no longer active", id),
            MatchAlreadyResolved(id) => {
                write!(f, "Match {} already has a winner", id)
            }
            MatchAlreadyLocked(id) => write!(f, "Match {} is already locked", id),
            NoAnchorRound => write!(
                f,
                "Partial reset is unavailable without any manual or baseline rounds"
            ),
            NoPendingRound => write!(f, "No pending round to simulate"),
            SwissRoundLimit => write!(f, "All Swiss rounds have already been drawn"),
            SwissCompleted => write!(f, "Swiss stage is already completed"),
            TournamentCompleted => write!(f, "Tournament is already complete"),
        }
    }
}

impl std::error::Error for TournamentError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(TournamentError::MissingSeedingConfig.kind(), ErrorKind::Configuration);
        assert_eq!(
            TournamentError::OddRecordGroup { record: RecordBracket::new(1, 0), size: 3 }.kind(),
            ErrorKind::PairingInfeasible
        );
        assert_eq!(
            TournamentError::WrongQualifiedCount { expected: 8, found: 7 }.kind(),
            ErrorKind::InvariantViolation
        );
        assert_eq!(TournamentError::NoAnchorRound.kind(), ErrorKind::State);
    }
}
