//! Outcome strategies: how an unresolved match gets its winner.

use crate::models::{Entrant, EntrantId, GameMatch, OutcomeStrategyKind};
use rand::{Rng, RngCore};

/// Result of resolving one match.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchOutcome {
    pub winner: EntrantId,
    pub loser: EntrantId,
    /// Probability that `a` (the match's first entrant) wins.
    pub probability: f64,
}

/// A probability model for matches between two entrants.
pub trait OutcomeStrategy {
    /// Probability in [0, 1] that `a` beats `b`.
    fn probability(&self, a: &Entrant, b: &Entrant) -> f64;

    /// Draw one uniform number; `a` wins when it falls below `probability(a, b)`.
    fn resolve(
        &self,
        game: &GameMatch,
        a: &Entrant,
        b: &Entrant,
        rng: &mut dyn RngCore,
    ) -> MatchOutcome {
        let probability = self.probability(a, b);
        let draw: f64 = rng.gen();
        let (winner, loser) = if draw < probability { (a, b) } else { (b, a) };
        log::debug!(
            "Match {}: {} beats {} (p(a)={:.3}, draw={:.3})",
            game.id,
            winner.id,
            loser.id,
            probability,
            draw
        );
        MatchOutcome {
            winner: winner.id.clone(),
            loser: loser.id.clone(),
            probability,
        }
    }
}

/// Every match is 50/50.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformOutcome;

impl OutcomeStrategy for UniformOutcome {
    fn probability(&self, _a: &Entrant, _b: &Entrant) -> f64 {
        0.5
    }
}

/// p(a) = strength(a) / (strength(a) + strength(b)), using the region strength table.
#[derive(Clone, Copy, Debug, Default)]
pub struct RegionWeightedOutcome;

impl OutcomeStrategy for RegionWeightedOutcome {
    fn probability(&self, a: &Entrant, b: &Entrant) -> f64 {
        let sa = f64::from(a.region.strength());
        let sb = f64::from(b.region.strength());
        sa / (sa + sb)
    }
}

pub fn strategy_for(kind: OutcomeStrategyKind) -> Box<dyn OutcomeStrategy> {
    match kind {
        OutcomeStrategyKind::Uniform => Box::new(UniformOutcome),
        OutcomeStrategyKind::RegionWeighted => Box::new(RegionWeightedOutcome),
    }
}
