//! Knockout bracket view, derived from the knockout matches of a snapshot.

use crate::models::entrant::EntrantId;
use crate::models::game::{GameMatch, KnockoutRound, MatchId};
use serde::{Deserialize, Serialize};

/// One position in the bracket. Entrants stay empty until the feeding matches are decided.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct KnockoutSlot {
    pub round: KnockoutRound,
    /// 0-based position within the round, top of the bracket first.
    pub position: usize,
    pub match_id: Option<MatchId>,
    pub entrant_a: Option<EntrantId>,
    pub entrant_b: Option<EntrantId>,
    pub winner: Option<EntrantId>,
}

/// One pick of the quarterfinal draw.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct KnockoutDrawEvent {
    pub order: usize,
    pub selected: EntrantId,
    pub opponent: EntrantId,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct KnockoutBracket {
    pub slots: Vec<KnockoutSlot>,
    pub draw_history: Vec<KnockoutDrawEvent>,
}

impl KnockoutBracket {
    /// Rebuild the bracket from knockout matches. Rounds not yet created are
    /// filled from the winners of the round before.
    pub fn from_matches(matches: &[GameMatch]) -> Self {
        let mut slots: Vec<KnockoutSlot> = Vec::new();
        let mut previous: Vec<KnockoutSlot> = Vec::new();

        for round in KnockoutRound::ALL {
            let created: Vec<&GameMatch> = matches
                .iter()
                .filter(|m| m.knockout_round() == Some(round))
                .collect();
            let current: Vec<KnockoutSlot> = (0..round.match_count())
                .map(|position| match created.get(position) {
                    Some(m) => KnockoutSlot {
                        round,
                        position,
                        match_id: Some(m.id),
                        entrant_a: Some(m.entrant_a.clone()),
                        entrant_b: Some(m.entrant_b.clone()),
                        winner: m.winner.clone(),
                    },
                    None => KnockoutSlot {
                        round,
                        position,
                        match_id: None,
                        entrant_a: previous.get(position * 2).and_then(|s| s.winner.clone()),
                        entrant_b: previous.get(position * 2 + 1).and_then(|s| s.winner.clone()),
                        winner: None,
                    },
                })
                .collect();
            slots.extend(current.iter().cloned());
            previous = current;
        }

        let draw_history = matches
            .iter()
            .filter(|m| m.knockout_round() == Some(KnockoutRound::Quarterfinal))
            .enumerate()
            .map(|(i, m)| KnockoutDrawEvent {
                order: i + 1,
                selected: m.entrant_a.clone(),
                opponent: m.entrant_b.clone(),
            })
            .collect();

        Self { slots, draw_history }
    }

    pub fn round_slots(&self, round: KnockoutRound) -> impl Iterator<Item = &KnockoutSlot> {
        self.slots.iter().filter(move |s| s.round == round)
    }
}
