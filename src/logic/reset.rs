//! Partial and full resets.

use crate::models::{
    Entrant, GameMatch, MatchHistory, Stage, StageType, StageStatus, Tournament, TournamentError,
};
use std::collections::HashSet;

/// Replay resolved Swiss matches onto fresh 0-0 entrants.
///
/// Knockout matches and unresolved matches are ignored. Records, statuses and the
/// match history come out exactly as if the matches had been simulated in order.
pub fn rebuild_records(entrants: &[Entrant], matches: &[GameMatch]) -> (Vec<Entrant>, MatchHistory) {
    let mut rebuilt: Vec<Entrant> = entrants.iter().map(Entrant::reset).collect();
    let mut history = MatchHistory::new();
    for game in matches.iter().filter(|m| m.stage() == StageType::Swiss) {
        let Some(winner) = game.winner.as_deref() else {
            continue;
        };
        for entrant in rebuilt.iter_mut().filter(|e| game.involves(&e.id)) {
            *entrant = entrant.with_result(entrant.id == winner);
        }
        history.record(&game.entrant_a, &game.entrant_b);
    }
    (rebuilt, history)
}

/// Rewind to the most recent manual or baseline Swiss round.
///
/// That round keeps its pairings but loses its results; later rounds and the whole
/// knockout stage are discarded, and every lock is released.
pub fn partial_reset(tournament: &Tournament) -> Result<Tournament, TournamentError> {
    let anchor = tournament
        .swiss_rounds()
        .into_iter()
        .rev()
        .find(|r| r.source.is_anchor())
        .ok_or(TournamentError::NoAnchorRound)?;
    let anchor_id = anchor.id;
    let anchor_number = anchor.round_number;
    let anchor_matches: HashSet<_> = anchor.match_ids.iter().copied().collect();

    let kept_rounds: Vec<_> = tournament
        .swiss_rounds()
        .into_iter()
        .take_while(|r| r.round_number <= anchor_number)
        .cloned()
        .collect();
    let kept_matches: HashSet<_> = kept_rounds
        .iter()
        .flat_map(|r| r.match_ids.iter().copied())
        .collect();

    let mut next = tournament.clone();
    next.matches = tournament
        .matches
        .iter()
        .filter(|m| kept_matches.contains(&m.id))
        .map(|m| {
            if anchor_matches.contains(&m.id) {
                m.cleared()
            } else {
                GameMatch {
                    locked: false,
                    ..m.clone()
                }
            }
        })
        .collect();
    next.rounds = kept_rounds
        .into_iter()
        .map(|mut r| {
            r.locked_match_ids.clear();
            r
        })
        .collect();
    next.locked_matches.clear();

    let (entrants, history) = rebuild_records(&tournament.entrants, &next.matches);
    next.entrants = entrants;
    next.match_history = history;

    next.swiss_stage = Stage {
        stage_type: StageType::Swiss,
        status: StageStatus::InProgress,
        round_ids: next.rounds.iter().map(|r| r.id).collect(),
        current_round_number: anchor_number,
    };
    next.knockout_stage = Stage::new(StageType::Knockout);
    next.knockout_bracket = None;
    next.touch();
    log::info!(
        "Partial reset to Swiss round {} (round {})",
        anchor_number,
        anchor_id
    );
    Ok(next)
}

/// Start over from the original roster and seeding. Keeps the tournament id and outcome strategy.
pub fn full_reset(tournament: &Tournament) -> Result<Tournament, TournamentError> {
    let seeding = tournament
        .seeding
        .clone()
        .ok_or(TournamentError::MissingSeedingConfig)?;
    let mut fresh = Tournament::new(tournament.entrants.clone(), seeding, tournament.outcome_strategy)?;
    fresh.id = tournament.id;
    fresh.created_at = tournament.created_at;
    log::info!("Tournament {} reset", tournament.id);
    Ok(fresh)
}
