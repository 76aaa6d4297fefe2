//! Match (game) between two entrants, tagged by the stage it belongs to.

use crate::models::entrant::{EntrantId, RecordBracket};
use crate::models::error::TournamentError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Tournament stage.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageType {
    Swiss,
    Knockout,
}

/// Knockout bracket round.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnockoutRound {
    Quarterfinal,
    Semifinal,
    Final,
}

impl KnockoutRound {
    pub const ALL: [KnockoutRound; 3] = [
        KnockoutRound::Quarterfinal,
        KnockoutRound::Semifinal,
        KnockoutRound::Final,
    ];

    /// Round number inside the knockout stage (1-3).
    pub fn number(self) -> u32 {
        match self {
            KnockoutRound::Quarterfinal => 1,
            KnockoutRound::Semifinal => 2,
            KnockoutRound::Final => 3,
        }
    }

    pub fn from_number(n: u32) -> Option<Self> {
        KnockoutRound::ALL.into_iter().find(|r| r.number() == n)
    }

    pub fn match_count(self) -> usize {
        match self {
            KnockoutRound::Quarterfinal => 4,
            KnockoutRound::Semifinal => 2,
            KnockoutRound::Final => 1,
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }
}

/// Stage-specific part of a match. Swiss matches always carry a record bracket,
/// knockout matches always carry their bracket round.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum MatchKind {
    Swiss { record_bracket: RecordBracket },
    Knockout { knockout_round: KnockoutRound },
}

/// An unordered pairing of two entrants, as supplied by baseline or manual rounds.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    pub entrant_a: EntrantId,
    pub entrant_b: EntrantId,
}

impl Matchup {
    pub fn new(entrant_a: impl Into<EntrantId>, entrant_b: impl Into<EntrantId>) -> Self {
        Self {
            entrant_a: entrant_a.into(),
            entrant_b: entrant_b.into(),
        }
    }
}

/// A single best-of match between two entrants.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub entrant_a: EntrantId,
    pub entrant_b: EntrantId,
    /// None until resolved; once set it never changes.
    pub winner: Option<EntrantId>,
    /// Round number within the stage (Swiss 1-5, knockout 1-3).
    pub round_number: u32,
    #[serde(flatten)]
    pub kind: MatchKind,
    /// A winner has been committed manually and is waiting for the round to resolve.
    pub locked: bool,
}

impl GameMatch {
    pub fn swiss(
        entrant_a: impl Into<EntrantId>,
        entrant_b: impl Into<EntrantId>,
        round_number: u32,
        record_bracket: RecordBracket,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            entrant_a: entrant_a.into(),
            entrant_b: entrant_b.into(),
            winner: None,
            round_number,
            kind: MatchKind::Swiss { record_bracket },
            locked: false,
        }
    }

    pub fn knockout(
        entrant_a: impl Into<EntrantId>,
        entrant_b: impl Into<EntrantId>,
        knockout_round: KnockoutRound,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            entrant_a: entrant_a.into(),
            entrant_b: entrant_b.into(),
            winner: None,
            round_number: knockout_round.number(),
            kind: MatchKind::Knockout { knockout_round },
            locked: false,
        }
    }

    pub fn stage(&self) -> StageType {
        match self.kind {
            MatchKind::Swiss { .. } => StageType::Swiss,
            MatchKind::Knockout { .. } => StageType::Knockout,
        }
    }

    pub fn record_bracket(&self) -> Option<RecordBracket> {
        match self.kind {
            MatchKind::Swiss { record_bracket } => Some(record_bracket),
            MatchKind::Knockout { .. } => None,
        }
    }

    pub fn knockout_round(&self) -> Option<KnockoutRound> {
        match self.kind {
            MatchKind::Knockout { knockout_round } => Some(knockout_round),
            MatchKind::Swiss { .. } => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.winner.is_some()
    }

    pub fn involves(&self, entrant: &str) -> bool {
        self.entrant_a == entrant || self.entrant_b == entrant
    }

    /// The losing entrant, if resolved.
    pub fn loser(&self) -> Option<&EntrantId> {
        let winner = self.winner.as_ref()?;
        if *winner == self.entrant_a {
            Some(&self.entrant_b)
        } else {
            Some(&self.entrant_a)
        }
    }

    /// Resolved copy of this match. Fails if already resolved or `winner` did not play in it.
    pub fn resolve(&self, winner: &str) -> Result<GameMatch, TournamentError> {
        if self.is_resolved() {
            return Err(TournamentError::MatchAlreadyResolved(self.id));
        }
        if !self.involves(winner) {
            return Err(TournamentError::WinnerNotParticipant {
                match_id: self.id,
                winner: winner.to_string(),
            });
        }
        Ok(GameMatch {
            winner: Some(winner.to_string()),
            locked: false,
            ..self.clone()
        })
    }

    /// Unresolved, unlocked copy of this match (same id and entrants).
    pub fn cleared(&self) -> GameMatch {
        GameMatch {
            winner: None,
            locked: false,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_only_once_and_only_for_participants() {
        let m = GameMatch::swiss("a", "b", 1, RecordBracket::OPENING);
        assert!(matches!(
            m.resolve("c"),
            Err(TournamentError::WinnerNotParticipant { .. })
        ));
        let resolved = m.resolve("b").unwrap();
        assert_eq!(resolved.winner.as_deref(), Some("b"));
        assert_eq!(resolved.loser().map(String::as_str), Some("a"));
        assert!(matches!(
            resolved.resolve("a"),
            Err(TournamentError::MatchAlreadyResolved(_))
        ));
        assert_eq!(resolved.cleared().winner, None);
    }

    #[test]
    fn stage_tag_is_flattened_into_json() {
        let m = GameMatch::knockout("a", "b", KnockoutRound::Semifinal);
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["stage"], "knockout");
        assert_eq!(json["knockout_round"], "semifinal");
        assert_eq!(json["round_number"], 2);
        let back: GameMatch = serde_json::from_value(json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn knockout_rounds_chain() {
        assert_eq!(KnockoutRound::Quarterfinal.next(), Some(KnockoutRound::Semifinal));
        assert_eq!(KnockoutRound::Final.next(), None);
        assert_eq!(KnockoutRound::from_number(3), Some(KnockoutRound::Final));
    }
}
