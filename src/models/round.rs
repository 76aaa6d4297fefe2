//! Round and its provenance.

use crate::models::entrant::RecordBracket;
use crate::models::game::{MatchId, StageType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Unique identifier for a round.
pub type RoundId = Uuid;

/// Where a round's pairings came from. Manual and baseline rounds anchor a partial reset.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundSource {
    #[default]
    Simulated,
    Manual,
    BaselineConfig,
}

impl RoundSource {
    pub fn is_anchor(self) -> bool {
        matches!(self, RoundSource::Manual | RoundSource::BaselineConfig)
    }
}

/// A set of matches played at the same time within one stage.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub stage: StageType,
    pub round_number: u32,
    pub match_ids: Vec<MatchId>,
    /// Record brackets present (Swiss only).
    pub record_brackets: BTreeSet<RecordBracket>,
    pub source: RoundSource,
    /// Matches whose winner was committed manually before the round resolved.
    pub locked_match_ids: BTreeSet<MatchId>,
}

impl Round {
    pub fn new(
        stage: StageType,
        round_number: u32,
        match_ids: Vec<MatchId>,
        record_brackets: BTreeSet<RecordBracket>,
        source: RoundSource,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            stage,
            round_number,
            match_ids,
            record_brackets,
            source,
            locked_match_ids: BTreeSet::new(),
        }
    }

    pub fn contains(&self, match_id: MatchId) -> bool {
        self.match_ids.contains(&match_id)
    }
}
