//! Tournament snapshot and its derived phase.

use crate::models::bracket::KnockoutBracket;
use crate::models::entrant::{Entrant, EntrantId, RecordBracket};
use crate::models::error::TournamentError;
use crate::models::game::{GameMatch, KnockoutRound, MatchId, StageType};
use crate::models::history::MatchHistory;
use crate::models::round::Round;
use crate::models::seeding::SeedingConfig;
use crate::models::stage::{Stage, StageStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Snapshot schema version. A stored snapshot with another version is treated as absent.
pub const SNAPSHOT_VERSION: &str = "1.1.0";
/// Entrants in the Swiss stage.
pub const SWISS_ENTRANT_COUNT: usize = 16;
/// Entrants that advance to the knockout stage.
pub const KNOCKOUT_ENTRANT_COUNT: usize = 8;

const MAX_NAME_LEN: usize = 50;

/// Which outcome model resolves matches.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStrategyKind {
    /// Every match is a coin flip.
    #[default]
    Uniform,
    /// Stronger regions win more often.
    RegionWeighted,
}

/// Where the tournament currently stands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentPhase {
    SwissNotStarted,
    SwissInProgress,
    /// Swiss completed; the knockout bracket is seeded on the next advance.
    KnockoutNotStarted,
    KnockoutInProgress,
    KnockoutCompleted,
}

/// Full tournament state. Operations take a snapshot and return a new one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub version: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub entrants: Vec<Entrant>,
    /// All matches, Swiss and knockout, in creation order.
    pub matches: Vec<GameMatch>,
    pub rounds: Vec<Round>,
    pub swiss_stage: Stage,
    pub knockout_stage: Stage,
    pub outcome_strategy: OutcomeStrategyKind,
    pub match_history: MatchHistory,
    pub seeding: Option<SeedingConfig>,
    /// Match id -> manually committed winner, for matches not yet resolved.
    pub locked_matches: BTreeMap<MatchId, EntrantId>,
    /// Derived from knockout matches; None until the bracket is seeded.
    pub knockout_bracket: Option<KnockoutBracket>,
}

/// Check roster shape: 16 entrants, unique ids, names of 1-50 characters.
pub fn validate_roster(entrants: &[Entrant]) -> Result<(), TournamentError> {
    if entrants.len() != SWISS_ENTRANT_COUNT {
        return Err(TournamentError::WrongRosterSize {
            expected: SWISS_ENTRANT_COUNT,
            found: entrants.len(),
        });
    }
    let mut ids = HashSet::new();
    for e in entrants {
        if !ids.insert(e.id.as_str()) {
            return Err(TournamentError::DuplicateEntrant(e.id.clone()));
        }
        let len = e.name.trim().chars().count();
        if len == 0 || len > MAX_NAME_LEN {
            return Err(TournamentError::InvalidEntrantName(e.id.clone()));
        }
    }
    Ok(())
}

impl Tournament {
    /// Fresh snapshot with the Swiss stage not started. Every entrant starts at 0-0.
    pub fn new(
        roster: Vec<Entrant>,
        seeding: SeedingConfig,
        outcome_strategy: OutcomeStrategyKind,
    ) -> Result<Self, TournamentError> {
        validate_roster(&roster)?;
        seeding.validate(&roster)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            version: SNAPSHOT_VERSION.to_string(),
            created_at: now,
            updated_at: now,
            entrants: roster
                .iter()
                .map(|e| {
                    let mut fresh = e.reset();
                    fresh.name = e.name.trim().to_string();
                    fresh
                })
                .collect(),
            matches: Vec::new(),
            rounds: Vec::new(),
            swiss_stage: Stage::new(StageType::Swiss),
            knockout_stage: Stage::new(StageType::Knockout),
            outcome_strategy,
            match_history: MatchHistory::new(),
            seeding: Some(seeding),
            locked_matches: BTreeMap::new(),
            knockout_bracket: None,
        })
    }

    /// Bump `updated_at`. Called on the working copy before it is returned.
    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn phase(&self) -> TournamentPhase {
        match (self.swiss_stage.status, self.knockout_stage.status) {
            (StageStatus::NotStarted, _) => TournamentPhase::SwissNotStarted,
            (StageStatus::InProgress, _) => TournamentPhase::SwissInProgress,
            (StageStatus::Completed, StageStatus::NotStarted) => TournamentPhase::KnockoutNotStarted,
            (StageStatus::Completed, StageStatus::InProgress) => TournamentPhase::KnockoutInProgress,
            (StageStatus::Completed, StageStatus::Completed) => TournamentPhase::KnockoutCompleted,
        }
    }

    pub fn entrant(&self, id: &str) -> Option<&Entrant> {
        self.entrants.iter().find(|e| e.id == id)
    }

    pub fn find_match(&self, id: MatchId) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn active(&self) -> Vec<&Entrant> {
        self.entrants.iter().filter(|e| e.is_active()).collect()
    }

    pub fn qualified(&self) -> Vec<&Entrant> {
        self.entrants.iter().filter(|e| e.is_qualified()).collect()
    }

    pub fn eliminated(&self) -> Vec<&Entrant> {
        self.entrants
            .iter()
            .filter(|e| !e.is_active() && !e.is_qualified())
            .collect()
    }

    /// Active entrants grouped by their current record.
    pub fn record_groups(&self) -> BTreeMap<RecordBracket, Vec<&Entrant>> {
        crate::logic::rules::group_by_record(self.active())
    }

    pub fn stage(&self, stage: StageType) -> &Stage {
        match stage {
            StageType::Swiss => &self.swiss_stage,
            StageType::Knockout => &self.knockout_stage,
        }
    }

    /// Matches of one round of a stage, in creation order.
    pub fn round_matches(&self, stage: StageType, round_number: u32) -> Vec<&GameMatch> {
        self.matches
            .iter()
            .filter(|m| m.stage() == stage && m.round_number == round_number)
            .collect()
    }

    /// Unresolved matches of the stage's current round.
    pub fn pending_matches(&self, stage: StageType) -> Vec<&GameMatch> {
        let current = self.stage(stage).current_round_number;
        if current == 0 {
            return Vec::new();
        }
        self.round_matches(stage, current)
            .into_iter()
            .filter(|m| !m.is_resolved())
            .collect()
    }

    /// Swiss rounds in stage order.
    pub fn swiss_rounds(&self) -> Vec<&Round> {
        self.swiss_stage
            .round_ids
            .iter()
            .filter_map(|id| self.rounds.iter().find(|r| r.id == *id))
            .collect()
    }

    pub fn current_swiss_round(&self) -> Option<&Round> {
        let current = self.swiss_stage.current_round_number;
        self.swiss_rounds()
            .into_iter()
            .find(|r| r.round_number == current)
    }

    /// Winner of the final, once played.
    pub fn champion(&self) -> Option<&Entrant> {
        let winner = self
            .matches
            .iter()
            .find(|m| m.knockout_round() == Some(KnockoutRound::Final))?
            .winner
            .as_deref()?;
        self.entrant(winner)
    }
}
