//! Manually submitted Swiss rounds.

use crate::models::{
    Entrant, GameMatch, Matchup, RecordBracket, Round, RoundSource, StageType, Tournament,
    TournamentError, MAX_SWISS_ROUNDS,
};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Install a manually paired Swiss round.
///
/// A pending, untouched current round is replaced in place (its matches and locks
/// are dropped); otherwise the matchups become the next round. Every active entrant
/// must appear exactly once and each pair must share a record. Rematches are allowed.
pub fn create_manual_round(
    tournament: &Tournament,
    matchups: &[Matchup],
) -> Result<Tournament, TournamentError> {
    if tournament.swiss_stage.is_completed() {
        return Err(TournamentError::SwissCompleted);
    }

    let current = tournament.swiss_stage.current_round_number;
    let replaced = tournament.current_swiss_round().filter(|round| {
        round
            .match_ids
            .iter()
            .filter_map(|id| tournament.find_match(*id))
            .any(|m| !m.is_resolved())
    });
    if let Some(round) = replaced {
        if let Some(done) = round
            .match_ids
            .iter()
            .filter_map(|id| tournament.find_match(*id))
            .find(|m| m.is_resolved())
        {
            return Err(TournamentError::MatchAlreadyResolved(done.id));
        }
    }
    let round_number = if replaced.is_some() { current } else { current + 1 };
    if round_number > MAX_SWISS_ROUNDS {
        return Err(TournamentError::SwissRoundLimit);
    }

    let matches = validate_matchups(tournament, round_number, matchups)?;

    let mut next = tournament.clone();
    if let Some(old) = replaced {
        let old_ids: HashSet<_> = old.match_ids.iter().copied().collect();
        next.matches.retain(|m| !old_ids.contains(&m.id));
        next.locked_matches.retain(|id, _| !old_ids.contains(id));
        next.rounds.retain(|r| r.id != old.id);
        next.swiss_stage.round_ids.retain(|id| *id != old.id);
        log::info!("Replacing pending Swiss round {} with a manual draw", round_number);
    }

    let brackets: BTreeSet<RecordBracket> =
        matches.iter().filter_map(|m| m.record_bracket()).collect();
    let round = Round::new(
        StageType::Swiss,
        round_number,
        matches.iter().map(|m| m.id).collect(),
        brackets,
        RoundSource::Manual,
    );
    next.matches.extend(matches);
    next.swiss_stage.push_round(round.id, round_number);
    next.rounds.push(round);
    next.touch();
    log::info!("Manual Swiss round {} created", round_number);
    Ok(next)
}

fn validate_matchups(
    tournament: &Tournament,
    round_number: u32,
    matchups: &[Matchup],
) -> Result<Vec<GameMatch>, TournamentError> {
    let by_id: HashMap<&str, &Entrant> = tournament
        .entrants
        .iter()
        .map(|e| (e.id.as_str(), e))
        .collect();
    let lookup = |id: &str| -> Result<&Entrant, TournamentError> {
        let entrant = by_id
            .get(id)
            .copied()
            .ok_or_else(|| TournamentError::UnknownEntrant(id.to_string()))?;
        if !entrant.is_active() {
            return Err(TournamentError::EntrantNotActive(entrant.id.clone()));
        }
        Ok(entrant)
    };

    let mut used: HashSet<&str> = HashSet::new();
    let mut matches = Vec::with_capacity(matchups.len());
    for matchup in matchups {
        let a = lookup(&matchup.entrant_a)?;
        let b = lookup(&matchup.entrant_b)?;
        if a.id == b.id {
            return Err(TournamentError::SelfPairing(a.id.clone()));
        }
        for id in [&a.id, &b.id] {
            if !used.insert(id.as_str()) {
                return Err(TournamentError::DuplicateAssignment {
                    round_number,
                    entrant: id.clone(),
                });
            }
        }
        if a.record() != b.record() {
            return Err(TournamentError::RecordMismatch {
                entrant_a: a.id.clone(),
                entrant_b: b.id.clone(),
            });
        }
        if tournament.match_history.have_met(&a.id, &b.id) {
            log::warn!("Manual round {} repeats {} vs {}", round_number, a.id, b.id);
        }
        matches.push(GameMatch::swiss(a.id.clone(), b.id.clone(), round_number, a.record()));
    }

    let missing: Vec<_> = tournament
        .active()
        .into_iter()
        .filter(|e| !used.contains(e.id.as_str()))
        .map(|e| e.id.clone())
        .collect();
    if !missing.is_empty() {
        return Err(TournamentError::IncompleteRound { round_number, missing });
    }
    Ok(matches)
}
