//! Swiss draw: generates one round of pairings.
//!
//! Dispatch order for a round number:
//! 1. a baseline round from the seeding configuration, used as is;
//! 2. round one, built from the seed tiers (tier 1 vs tier 3 across regions, tier 2 among itself);
//! 3. any later round, paired inside record brackets with the no-rematch rule.
//!
//! Randomness comes only from the `rng` argument.

use crate::logic::rules::{can_pair, ensure_even, group_by_record, regions_differ};
use crate::models::{
    BaselineRound, Entrant, EntrantId, GameMatch, MatchHistory, RecordBracket, Round, RoundSource,
    SeedTier, SeedingConfig, StageType, TournamentError,
};
use rand::seq::SliceRandom;
use rand::RngCore;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Shuffle attempts per group before a round is declared unpairable.
pub const MAX_PAIRING_ATTEMPTS: usize = 10;

/// A drawn round: unresolved matches plus the round that lists them.
#[derive(Clone, Debug)]
pub struct SwissDraw {
    pub round: Round,
    pub matches: Vec<GameMatch>,
}

/// Draw round `round_number` for the given active entrants.
pub fn generate_round(
    round_number: u32,
    active: &[&Entrant],
    history: &MatchHistory,
    seeding: &SeedingConfig,
    rng: &mut dyn RngCore,
) -> Result<SwissDraw, TournamentError> {
    if let Some(baseline) = seeding.baseline_round(round_number) {
        return apply_baseline_round(baseline, active, history);
    }
    if round_number == 1 {
        return generate_first_round(active, seeding, rng);
    }
    generate_standard_round(round_number, active, history, rng)
}

/// Greedy matcher: take the first unpaired item, pair it with the first later unpaired item
/// accepted by `compatible`, repeat. Returns index pairs, or None if anyone is left over.
pub fn greedy_match<T>(
    items: &[T],
    compatible: impl Fn(&T, &T) -> bool,
) -> Option<Vec<(usize, usize)>> {
    let mut paired = vec![false; items.len()];
    let mut pairs = Vec::with_capacity(items.len() / 2);
    for i in 0..items.len() {
        if paired[i] {
            continue;
        }
        let j = (i + 1..items.len()).find(|&j| !paired[j] && compatible(&items[i], &items[j]))?;
        paired[i] = true;
        paired[j] = true;
        pairs.push((i, j));
    }
    Some(pairs)
}

/// Up to [`MAX_PAIRING_ATTEMPTS`] shuffles of `group`, each followed by one greedy pass.
fn pair_with_retries<'a>(
    group: &[&'a Entrant],
    label: &str,
    rng: &mut dyn RngCore,
    compatible: impl Fn(&Entrant, &Entrant) -> bool,
) -> Result<Vec<(&'a Entrant, &'a Entrant)>, TournamentError> {
    let mut order: Vec<&Entrant> = group.to_vec();
    for attempt in 1..=MAX_PAIRING_ATTEMPTS {
        order.shuffle(rng);
        match greedy_match(&order, |a, b| compatible(a, b)) {
            Some(pairs) => {
                log::debug!("Paired group {} on attempt {}", label, attempt);
                return Ok(pairs.into_iter().map(|(i, j)| (order[i], order[j])).collect());
            }
            None => log::debug!("Pairing attempt {} for group {} left entrants unpaired", attempt, label),
        }
    }
    log::warn!(
        "Giving up on group {} after {} attempts",
        label,
        MAX_PAIRING_ATTEMPTS
    );
    Err(TournamentError::PairingExhausted {
        group: label.to_string(),
        attempts: MAX_PAIRING_ATTEMPTS,
    })
}

fn build_draw(round_number: u32, matches: Vec<GameMatch>, source: RoundSource) -> SwissDraw {
    let brackets: BTreeSet<RecordBracket> =
        matches.iter().filter_map(|m| m.record_bracket()).collect();
    let round = Round::new(
        StageType::Swiss,
        round_number,
        matches.iter().map(|m| m.id).collect(),
        brackets,
        source,
    );
    log::info!(
        "Drew Swiss round {} ({:?}): {} matches",
        round_number,
        source,
        matches.len()
    );
    SwissDraw { round, matches }
}

fn apply_baseline_round(
    baseline: &BaselineRound,
    active: &[&Entrant],
    history: &MatchHistory,
) -> Result<SwissDraw, TournamentError> {
    let round_number = baseline.round_number;
    let by_id: HashMap<&str, &Entrant> = active.iter().map(|e| (e.id.as_str(), *e)).collect();
    let mut used: HashSet<&str> = HashSet::new();
    let mut matches = Vec::with_capacity(baseline.matchups.len());

    for matchup in &baseline.matchups {
        let a = *by_id
            .get(matchup.entrant_a.as_str())
            .ok_or_else(|| TournamentError::UnknownEntrant(matchup.entrant_a.clone()))?;
        let b = *by_id
            .get(matchup.entrant_b.as_str())
            .ok_or_else(|| TournamentError::UnknownEntrant(matchup.entrant_b.clone()))?;
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
            log::warn!(
                "Baseline round {} pairs {} ({}) with {} ({})",
                round_number,
                a.id,
                a.record(),
                b.id,
                b.record()
            );
        }
        if history.have_met(&a.id, &b.id) {
            log::warn!("Baseline round {} repeats {} vs {}", round_number, a.id, b.id);
        }
        matches.push(GameMatch::swiss(a.id.clone(), b.id.clone(), round_number, a.record()));
    }

    let missing: Vec<EntrantId> = active
        .iter()
        .filter(|e| !used.contains(e.id.as_str()))
        .map(|e| e.id.clone())
        .collect();
    if !missing.is_empty() {
        return Err(TournamentError::IncompleteRound { round_number, missing });
    }

    Ok(build_draw(round_number, matches, RoundSource::BaselineConfig))
}

fn tier_members<'a>(
    tier: SeedTier,
    seeding: &SeedingConfig,
    by_id: &HashMap<&str, &'a Entrant>,
    rng: &mut dyn RngCore,
) -> Result<Vec<&'a Entrant>, TournamentError> {
    let mut members = seeding
        .tiers
        .get(tier)
        .iter()
        .map(|id| {
            by_id
                .get(id.as_str())
                .copied()
                .ok_or_else(|| TournamentError::UnknownEntrant(id.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if members.len() != tier.expected_size() {
        return Err(TournamentError::InvalidTierSize {
            tier,
            expected: tier.expected_size(),
            found: members.len(),
        });
    }
    members.shuffle(rng);
    Ok(members)
}

fn generate_first_round(
    active: &[&Entrant],
    seeding: &SeedingConfig,
    rng: &mut dyn RngCore,
) -> Result<SwissDraw, TournamentError> {
    let by_id: HashMap<&str, &Entrant> = active.iter().map(|e| (e.id.as_str(), *e)).collect();
    let tier1 = tier_members(SeedTier::Tier1, seeding, &by_id, rng)?;
    let tier2 = tier_members(SeedTier::Tier2, seeding, &by_id, rng)?;
    let tier3 = tier_members(SeedTier::Tier3, seeding, &by_id, rng)?;

    let record = RecordBracket::OPENING;
    let mut matches = Vec::with_capacity(active.len() / 2);
    let mut used_tier3 = vec![false; tier3.len()];

    for top in &tier1 {
        let idx = (0..tier3.len())
            .find(|&i| !used_tier3[i] && regions_differ(top, tier3[i]))
            .ok_or_else(|| TournamentError::NoCrossRegionOpponent(top.id.clone()))?;
        used_tier3[idx] = true;
        matches.push(GameMatch::swiss(top.id.clone(), tier3[idx].id.clone(), 1, record));
    }

    let tier2_pairs = pair_with_retries(&tier2, "tier2", rng, regions_differ)?;
    matches.extend(
        tier2_pairs
            .into_iter()
            .map(|(a, b)| GameMatch::swiss(a.id.clone(), b.id.clone(), 1, record)),
    );

    Ok(build_draw(1, matches, RoundSource::Simulated))
}

fn generate_standard_round(
    round_number: u32,
    active: &[&Entrant],
    history: &MatchHistory,
    rng: &mut dyn RngCore,
) -> Result<SwissDraw, TournamentError> {
    let groups = group_by_record(active.iter().copied());
    let mut matches = Vec::with_capacity(active.len() / 2);

    // Highest win count first.
    for (record, group) in groups.iter().rev() {
        ensure_even(*record, group.len())?;
        let label = record.to_string();
        let pairs = pair_with_retries(group, &label, rng, |a, b| can_pair(a, b, history))?;
        matches.extend(
            pairs
                .into_iter()
                .map(|(a, b)| GameMatch::swiss(a.id.clone(), b.id.clone(), round_number, *record)),
        );
    }

    Ok(build_draw(round_number, matches, RoundSource::Simulated))
}
