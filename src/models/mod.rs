//! Data structures for the tournament: entrants, matches, rounds, stages and the snapshot.

mod bracket;
mod entrant;
mod error;
mod game;
mod history;
mod round;
mod seeding;
mod stage;
mod tournament;

pub use bracket::{KnockoutBracket, KnockoutDrawEvent, KnockoutSlot};
pub use entrant::{
    Entrant, EntrantId, EntrantStatus, RecordBracket, Region, LOSSES_TO_ELIMINATE, WINS_TO_QUALIFY,
};
pub use error::{ErrorKind, TournamentError};
pub use game::{GameMatch, KnockoutRound, MatchId, MatchKind, Matchup, StageType};
pub use history::MatchHistory;
pub use round::{Round, RoundId, RoundSource};
pub use seeding::{
    BaselineRound, BaselineSource, SeedTier, SeedTiers, SeedingConfig, MAX_SWISS_ROUNDS,
};
pub use stage::{Stage, StageStatus};
pub use tournament::{
    validate_roster, OutcomeStrategyKind, Tournament, TournamentId, TournamentPhase,
    KNOCKOUT_ENTRANT_COUNT, SNAPSHOT_VERSION, SWISS_ENTRANT_COUNT,
};
