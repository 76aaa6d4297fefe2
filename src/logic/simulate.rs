//! Simulate round: resolve every pending match of the current round.

use crate::logic::outcome::strategy_for;
use crate::models::{
    KnockoutBracket, KnockoutRound, MatchId, StageType, Tournament, TournamentError,
    TournamentPhase,
};
use rand::RngCore;

/// Resolve the current round of the active stage with the snapshot's outcome strategy.
///
/// Swiss: locked matches take their committed winner, every result is folded into
/// entrant records and match history, and the Swiss stage completes once no entrant
/// is active. Knockout: only match winners change; the stage completes when the final
/// is resolved.
pub fn simulate_round(
    tournament: &Tournament,
    rng: &mut dyn RngCore,
) -> Result<Tournament, TournamentError> {
    let stage = match tournament.phase() {
        TournamentPhase::SwissInProgress => StageType::Swiss,
        TournamentPhase::KnockoutInProgress => StageType::Knockout,
        TournamentPhase::KnockoutCompleted => return Err(TournamentError::TournamentCompleted),
        TournamentPhase::SwissNotStarted | TournamentPhase::KnockoutNotStarted => {
            return Err(TournamentError::NoPendingRound)
        }
    };
    if tournament.pending_matches(stage).is_empty() {
        return Err(TournamentError::NoPendingRound);
    }

    let mut next = tournament.clone();
    match stage {
        StageType::Swiss => resolve_swiss_round(&mut next, rng)?,
        StageType::Knockout => resolve_knockout_round(&mut next, rng)?,
    }
    next.touch();
    Ok(next)
}

fn pending_ids(tournament: &Tournament, stage: StageType) -> Vec<MatchId> {
    tournament
        .pending_matches(stage)
        .iter()
        .map(|m| m.id)
        .collect()
}

fn match_index(tournament: &Tournament, id: MatchId) -> Result<usize, TournamentError> {
    tournament
        .matches
        .iter()
        .position(|m| m.id == id)
        .ok_or(TournamentError::MatchNotFound(id))
}

fn entrant_index(tournament: &Tournament, id: &str) -> Result<usize, TournamentError> {
    tournament
        .entrants
        .iter()
        .position(|e| e.id == id)
        .ok_or_else(|| TournamentError::UnknownEntrant(id.to_string()))
}

/// Resolve the pending Swiss matches on a working copy.
pub(crate) fn resolve_swiss_round(
    tournament: &mut Tournament,
    rng: &mut dyn RngCore,
) -> Result<(), TournamentError> {
    let strategy = strategy_for(tournament.outcome_strategy);
    let round_number = tournament.swiss_stage.current_round_number;

    for id in pending_ids(tournament, StageType::Swiss) {
        let mi = match_index(tournament, id)?;
        let game = &tournament.matches[mi];
        let ai = entrant_index(tournament, &game.entrant_a)?;
        let bi = entrant_index(tournament, &game.entrant_b)?;

        let winner = match tournament.locked_matches.get(&id) {
            Some(locked) => locked.clone(),
            None => {
                strategy
                    .resolve(game, &tournament.entrants[ai], &tournament.entrants[bi], rng)
                    .winner
            }
        };
        let resolved = game.resolve(&winner)?;

        let a = tournament.entrants[ai].with_result(winner == tournament.entrants[ai].id);
        let b = tournament.entrants[bi].with_result(winner == tournament.entrants[bi].id);
        tournament.match_history.record(&a.id, &b.id);
        tournament.entrants[ai] = a;
        tournament.entrants[bi] = b;
        tournament.matches[mi] = resolved;
        tournament.locked_matches.remove(&id);
    }
    log::info!("Resolved Swiss round {}", round_number);

    if tournament.active().is_empty() {
        tournament.swiss_stage.complete();
        log::info!(
            "Swiss stage completed: {} qualified, {} eliminated",
            tournament.qualified().len(),
            tournament.eliminated().len()
        );
    }
    Ok(())
}

/// Resolve the pending knockout matches on a working copy. Entrant records are not touched.
pub(crate) fn resolve_knockout_round(
    tournament: &mut Tournament,
    rng: &mut dyn RngCore,
) -> Result<(), TournamentError> {
    let strategy = strategy_for(tournament.outcome_strategy);
    let round_number = tournament.knockout_stage.current_round_number;

    for id in pending_ids(tournament, StageType::Knockout) {
        let mi = match_index(tournament, id)?;
        let game = &tournament.matches[mi];
        let a = &tournament.entrants[entrant_index(tournament, &game.entrant_a)?];
        let b = &tournament.entrants[entrant_index(tournament, &game.entrant_b)?];
        let outcome = strategy.resolve(game, a, b, rng);
        tournament.matches[mi] = game.resolve(&outcome.winner)?;
    }
    log::info!("Resolved knockout round {}", round_number);

    if KnockoutRound::from_number(round_number) == Some(KnockoutRound::Final) {
        tournament.knockout_stage.complete();
        if let Some(champion) = tournament.champion() {
            log::info!("Tournament completed, champion: {}", champion.name);
        }
    }
    tournament.knockout_bracket = Some(KnockoutBracket::from_matches(&tournament.matches));
    Ok(())
}
