//! Stage progression (Swiss or knockout).

use crate::models::game::StageType;
use crate::models::round::RoundId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

/// A tournament stage: status, its rounds in order, and the latest round number (0 before the first).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub stage_type: StageType,
    pub status: StageStatus,
    pub round_ids: Vec<RoundId>,
    pub current_round_number: u32,
}

impl Stage {
    pub fn new(stage_type: StageType) -> Self {
        Self {
            stage_type,
            status: StageStatus::NotStarted,
            round_ids: Vec::new(),
            current_round_number: 0,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == StageStatus::Completed
    }

    /// Append a round and move the pointer to it. Starts the stage if needed.
    pub fn push_round(&mut self, round_id: RoundId, round_number: u32) {
        if self.status == StageStatus::NotStarted {
            self.status = StageStatus::InProgress;
        }
        self.round_ids.push(round_id);
        self.current_round_number = round_number;
    }

    pub fn complete(&mut self) {
        self.status = StageStatus::Completed;
    }
}
