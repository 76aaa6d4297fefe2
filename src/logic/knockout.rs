//! Knockout bracket: quarterfinal seeding from Swiss records, then semifinals and final.

use crate::models::{
    Entrant, EntrantId, GameMatch, KnockoutRound, TournamentError, KNOCKOUT_ENTRANT_COUNT,
};
use rand::seq::SliceRandom;
use rand::RngCore;

/// Seed 8 qualified entrants into quarterfinals.
///
/// 3-0 entrants open against 3-2 entrants and sit in the first and last
/// quarterfinal, so they can only meet in the final. 3-1 entrants play each
/// other; an odd 3-1 entrant out takes the remaining 3-2 entrant. Each record
/// group is shuffled before placement.
pub fn seed_bracket(
    qualified: &[&Entrant],
    rng: &mut dyn RngCore,
) -> Result<Vec<GameMatch>, TournamentError> {
    if qualified.len() != KNOCKOUT_ENTRANT_COUNT {
        return Err(TournamentError::WrongQualifiedCount {
            expected: KNOCKOUT_ENTRANT_COUNT,
            found: qualified.len(),
        });
    }

    let by_losses = |losses: u32| {
        qualified
            .iter()
            .copied()
            .filter(|e| e.wins == 3 && e.losses == losses)
            .collect::<Vec<&Entrant>>()
    };
    let mut three_zero = by_losses(0);
    let mut three_one = by_losses(1);
    let mut three_two = by_losses(2);
    log::info!(
        "Knockout seeding: 3-0: {}, 3-1: {}, 3-2: {}",
        three_zero.len(),
        three_one.len(),
        three_two.len()
    );

    let total = three_zero.len() + three_one.len() + three_two.len();
    if total != KNOCKOUT_ENTRANT_COUNT
        || three_zero.len() != 2
        || !(2..=3).contains(&three_two.len())
    {
        return Err(TournamentError::InvalidKnockoutDistribution {
            three_zero: three_zero.len(),
            three_one: three_one.len(),
            three_two: three_two.len(),
        });
    }

    three_zero.shuffle(rng);
    three_one.shuffle(rng);
    three_two.shuffle(rng);

    let quarterfinal = KnockoutRound::Quarterfinal;
    let top = GameMatch::knockout(three_zero[0].id.clone(), three_two[0].id.clone(), quarterfinal);
    let bottom = GameMatch::knockout(three_zero[1].id.clone(), three_two[1].id.clone(), quarterfinal);
    let mut leftover_three_two = three_two[2..].iter();

    let mut matches = vec![top];
    let mut pairs = three_one.chunks_exact(2);
    for pair in pairs.by_ref() {
        matches.push(GameMatch::knockout(pair[0].id.clone(), pair[1].id.clone(), quarterfinal));
    }
    if let ([odd], Some(opponent)) = (pairs.remainder(), leftover_three_two.next()) {
        matches.push(GameMatch::knockout(odd.id.clone(), opponent.id.clone(), quarterfinal));
    }
    matches.push(bottom);

    if matches.len() != quarterfinal.match_count() {
        return Err(TournamentError::WrongMatchCount {
            round: quarterfinal,
            expected: quarterfinal.match_count(),
            found: matches.len(),
        });
    }
    Ok(matches)
}

/// Pair winners in order: winners[0] vs winners[1], winners[2] vs winners[3], ...
fn pair_winners(
    winners: &[EntrantId],
    round: KnockoutRound,
) -> Result<Vec<GameMatch>, TournamentError> {
    let expected = round.match_count() * 2;
    if winners.len() != expected {
        return Err(TournamentError::WrongWinnerCount {
            round,
            expected,
            found: winners.len(),
        });
    }
    Ok(winners
        .chunks_exact(2)
        .map(|pair| GameMatch::knockout(pair[0].clone(), pair[1].clone(), round))
        .collect())
}

/// Semifinals from the 4 quarterfinal winners, in quarterfinal order.
pub fn create_semifinals(quarterfinal_winners: &[EntrantId]) -> Result<Vec<GameMatch>, TournamentError> {
    pair_winners(quarterfinal_winners, KnockoutRound::Semifinal)
}

/// Final from the 2 semifinal winners.
pub fn create_final(semifinal_winners: &[EntrantId]) -> Result<GameMatch, TournamentError> {
    let mut matches = pair_winners(semifinal_winners, KnockoutRound::Final)?;
    // pair_winners checked the count, so exactly one match.
    Ok(matches.remove(0))
}

/// Matches of the round that follows `finished`, or None after the final.
pub fn next_round(
    finished: KnockoutRound,
    winners: &[EntrantId],
) -> Result<Option<Vec<GameMatch>>, TournamentError> {
    match finished.next() {
        Some(KnockoutRound::Semifinal) => create_semifinals(winners).map(Some),
        Some(KnockoutRound::Final) => create_final(winners).map(|m| Some(vec![m])),
        Some(KnockoutRound::Quarterfinal) | None => Ok(None),
    }
}
