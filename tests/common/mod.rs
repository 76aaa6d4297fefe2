//! Shared fixtures: the 2024 field with tiers whose tier-1 and tier-3 regions never overlap.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;
use worlds_swiss_sim::models::{SeedTiers, StageType};
use worlds_swiss_sim::{
    advance, simulate_round, Entrant, ErrorKind, OutcomeStrategyKind, Region, SeedingConfig,
    Tournament, TournamentError, TournamentPhase,
};

pub fn roster() -> Vec<Entrant> {
    [
        ("gen", "Gen.G", Region::Lck),
        ("hle", "Hanwha Life Esports", Region::Lck),
        ("t1", "T1", Region::Lck),
        ("dk", "Dplus KIA", Region::Lck),
        ("blg", "Bilibili Gaming", Region::Lpl),
        ("tes", "Top Esports", Region::Lpl),
        ("lng", "LNG Esports", Region::Lpl),
        ("wbg", "Weibo Gaming", Region::Lpl),
        ("g2", "G2 Esports", Region::Lec),
        ("fnc", "Fnatic", Region::Lec),
        ("mdk", "MAD Lions KOI", Region::Lec),
        ("fly", "FlyQuest", Region::Lcs),
        ("tl", "Team Liquid", Region::Lcs),
        ("100t", "100 Thieves", Region::Lcs),
        ("psg", "PSG Talon", Region::Lcp),
        ("gam", "GAM Esports", Region::Lcp),
    ]
    .into_iter()
    .map(|(id, name, region)| Entrant::new(id, name, region))
    .collect()
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

pub fn tiers() -> SeedTiers {
    SeedTiers {
        tier1: ids(&["gen", "hle", "t1", "blg", "tes"]),
        tier2: ids(&["dk", "lng", "wbg", "g2", "fly", "psg"]),
        tier3: ids(&["fnc", "mdk", "tl", "100t", "gam"]),
    }
}

pub fn seeding() -> SeedingConfig {
    SeedingConfig::new(tiers())
}

pub fn tournament() -> Tournament {
    Tournament::new(roster(), seeding(), OutcomeStrategyKind::Uniform).unwrap()
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Entrant with the given Swiss record, status derived from it.
pub fn with_record(id: &str, region: Region, wins: u32, losses: u32) -> Entrant {
    let mut e = Entrant::new(id, id.to_uppercase(), region);
    for _ in 0..wins {
        e = e.with_result(true);
    }
    for _ in 0..losses {
        e = e.with_result(false);
    }
    e
}

/// Draw and simulate Swiss rounds until the stage completes.
pub fn run_swiss(t: &Tournament, rng: &mut StdRng) -> Result<Tournament, TournamentError> {
    let mut t = t.clone();
    while !t.swiss_stage.is_completed() {
        t = advance(&t, rng)?;
        if !t.pending_matches(StageType::Swiss).is_empty() {
            t = simulate_round(&t, rng)?;
        }
    }
    Ok(t)
}

/// Play the whole tournament with `advance` only.
pub fn run_to_completion(t: &Tournament, rng: &mut StdRng) -> Result<Tournament, TournamentError> {
    let mut t = run_swiss(t, rng)?;
    while t.phase() != TournamentPhase::KnockoutCompleted {
        t = advance(&t, rng)?;
    }
    Ok(t)
}

/// First seed in 0..50 whose Swiss stage pairs all the way through.
/// The greedy matcher may legitimately give up on a seed; those surface as pairing errors.
pub fn completed_swiss() -> Tournament {
    for seed in 0..50 {
        match run_swiss(&tournament(), &mut rng(seed)) {
            Ok(t) => return t,
            Err(e) => assert_eq!(e.kind(), ErrorKind::PairingInfeasible, "seed {seed}: {e}"),
        }
    }
    panic!("no seed completed the Swiss stage");
}
