//! Stage progression: prepare the next Swiss round, seed and play out the knockout bracket.

use crate::logic::knockout::{next_round, seed_bracket};
use crate::logic::simulate::resolve_knockout_round;
use crate::logic::swiss_draw::generate_round;
use crate::models::{
    EntrantId, GameMatch, KnockoutBracket, KnockoutRound, OutcomeStrategyKind, Round, RoundSource,
    StageType, Tournament, TournamentError, TournamentPhase, MAX_SWISS_ROUNDS,
};
use rand::RngCore;
use std::collections::BTreeSet;

/// Make sure the next Swiss round is drawn.
///
/// Returns the snapshot unchanged when the Swiss stage is completed, a round is
/// already pending, no entrant is active, or all Swiss rounds exist.
pub fn prepare_swiss_round(
    tournament: &Tournament,
    rng: &mut dyn RngCore,
) -> Result<Tournament, TournamentError> {
    if tournament.swiss_stage.is_completed() {
        return Ok(tournament.clone());
    }
    let seeding = tournament
        .seeding
        .as_ref()
        .ok_or(TournamentError::MissingSeedingConfig)?;

    if !tournament.pending_matches(StageType::Swiss).is_empty() {
        return Ok(tournament.clone());
    }
    let active = tournament.active();
    if active.is_empty() {
        return Ok(tournament.clone());
    }
    let round_number = tournament.swiss_stage.current_round_number + 1;
    if round_number > MAX_SWISS_ROUNDS {
        return Ok(tournament.clone());
    }

    let draw = generate_round(round_number, &active, &tournament.match_history, seeding, rng)?;

    let mut next = tournament.clone();
    next.matches.extend(draw.matches);
    next.swiss_stage.push_round(draw.round.id, round_number);
    next.rounds.push(draw.round);
    next.touch();
    Ok(next)
}

/// One step of the tournament state machine.
///
/// - Swiss: draws the next round (idempotent while a round is pending) and closes
///   the stage once nobody is active.
/// - First step after Swiss: seeds the quarterfinals.
/// - Knockout: simulates the current round, then draws the next one or completes
///   the stage after the final.
pub fn advance(tournament: &Tournament, rng: &mut dyn RngCore) -> Result<Tournament, TournamentError> {
    match tournament.phase() {
        TournamentPhase::SwissNotStarted | TournamentPhase::SwissInProgress => {
            if tournament.active().is_empty() {
                let mut next = tournament.clone();
                next.swiss_stage.complete();
                next.touch();
                log::info!("Swiss stage completed");
                return Ok(next);
            }
            prepare_swiss_round(tournament, rng)
        }
        TournamentPhase::KnockoutNotStarted => start_knockout(tournament, rng),
        TournamentPhase::KnockoutInProgress => advance_knockout(tournament, rng),
        TournamentPhase::KnockoutCompleted => Err(TournamentError::TournamentCompleted),
    }
}

/// Switch the outcome model used for subsequent simulations.
pub fn set_outcome_strategy(tournament: &Tournament, kind: OutcomeStrategyKind) -> Tournament {
    let mut next = tournament.clone();
    next.outcome_strategy = kind;
    next.touch();
    next
}

fn push_knockout_round(tournament: &mut Tournament, round: KnockoutRound, matches: Vec<GameMatch>) {
    let record = Round::new(
        StageType::Knockout,
        round.number(),
        matches.iter().map(|m| m.id).collect(),
        BTreeSet::new(),
        RoundSource::Simulated,
    );
    log::info!("Drew knockout {:?}: {} matches", round, matches.len());
    tournament.matches.extend(matches);
    tournament.knockout_stage.push_round(record.id, round.number());
    tournament.rounds.push(record);
    tournament.knockout_bracket = Some(KnockoutBracket::from_matches(&tournament.matches));
}

fn start_knockout(tournament: &Tournament, rng: &mut dyn RngCore) -> Result<Tournament, TournamentError> {
    let quarterfinals = seed_bracket(&tournament.qualified(), rng)?;
    let mut next = tournament.clone();
    push_knockout_round(&mut next, KnockoutRound::Quarterfinal, quarterfinals);
    next.touch();
    Ok(next)
}

fn advance_knockout(tournament: &Tournament, rng: &mut dyn RngCore) -> Result<Tournament, TournamentError> {
    let mut next = tournament.clone();
    if !next.pending_matches(StageType::Knockout).is_empty() {
        resolve_knockout_round(&mut next, rng)?;
    }

    if !next.knockout_stage.is_completed() {
        let current = next.knockout_stage.current_round_number;
        let round = KnockoutRound::from_number(current).ok_or(TournamentError::NoPendingRound)?;
        let winners: Vec<EntrantId> = next
            .round_matches(StageType::Knockout, current)
            .iter()
            .filter_map(|m| m.winner.clone())
            .collect();
        match (next_round(round, &winners)?, round.next()) {
            (Some(matches), Some(following)) => push_knockout_round(&mut next, following, matches),
            _ => next.knockout_stage.complete(),
        }
    }
    next.touch();
    Ok(next)
}
