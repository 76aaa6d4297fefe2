//! Manual result locks for pending Swiss matches.

use crate::models::{MatchId, StageType, Tournament, TournamentError};

/// Commit (`Some(winner)`) or release (`None`) the result of a pending Swiss match.
///
/// The committed winner is used when the round is simulated. Releasing a match
/// that is not locked leaves the snapshot as it was.
pub fn lock_match_result(
    tournament: &Tournament,
    match_id: MatchId,
    winner: Option<&str>,
) -> Result<Tournament, TournamentError> {
    let game = tournament
        .find_match(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if game.stage() != StageType::Swiss {
        return Err(TournamentError::WrongStage {
            expected: StageType::Swiss,
            found: game.stage(),
        });
    }
    if game.is_resolved() {
        return Err(TournamentError::MatchAlreadyResolved(match_id));
    }

    let mut next = tournament.clone();
    match winner {
        Some(winner) => {
            if game.locked || tournament.locked_matches.contains_key(&match_id) {
                return Err(TournamentError::MatchAlreadyLocked(match_id));
            }
            if !game.involves(winner) {
                return Err(TournamentError::WinnerNotParticipant {
                    match_id,
                    winner: winner.to_string(),
                });
            }
            next.locked_matches.insert(match_id, winner.to_string());
            set_locked(&mut next, match_id, true);
            log::info!("Locked match {}: winner {}", match_id, winner);
        }
        None => {
            if next.locked_matches.remove(&match_id).is_none() && !game.locked {
                return Ok(next);
            }
            set_locked(&mut next, match_id, false);
            log::info!("Unlocked match {}", match_id);
        }
    }
    next.touch();
    Ok(next)
}

fn set_locked(tournament: &mut Tournament, match_id: MatchId, locked: bool) {
    if let Some(game) = tournament.matches.iter_mut().find(|m| m.id == match_id) {
        game.locked = locked;
    }
    if let Some(round) = tournament.rounds.iter_mut().find(|r| r.contains(match_id)) {
        if locked {
            round.locked_match_ids.insert(match_id);
        } else {
            round.locked_match_ids.remove(&match_id);
        }
    }
}
