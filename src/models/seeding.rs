//! Seeding configuration: seed tiers for the opening round and optional baseline rounds.

use crate::models::entrant::{Entrant, EntrantId};
use crate::models::error::TournamentError;
use crate::models::game::Matchup;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

/// Highest Swiss round number.
pub const MAX_SWISS_ROUNDS: u32 = 5;

/// Seed tier used to build Swiss round one.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedTier {
    Tier1,
    Tier2,
    Tier3,
}

impl SeedTier {
    pub const ALL: [SeedTier; 3] = [SeedTier::Tier1, SeedTier::Tier2, SeedTier::Tier3];

    pub fn expected_size(self) -> usize {
        match self {
            SeedTier::Tier1 => 5,
            SeedTier::Tier2 => 6,
            SeedTier::Tier3 => 5,
        }
    }
}

impl fmt::Display for SeedTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedTier::Tier1 => write!(f, "tier1"),
            SeedTier::Tier2 => write!(f, "tier2"),
            SeedTier::Tier3 => write!(f, "tier3"),
        }
    }
}

/// Entrant ids per seed tier.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeedTiers {
    pub tier1: Vec<EntrantId>,
    pub tier2: Vec<EntrantId>,
    pub tier3: Vec<EntrantId>,
}

impl SeedTiers {
    pub fn get(&self, tier: SeedTier) -> &[EntrantId] {
        match tier {
            SeedTier::Tier1 => &self.tier1,
            SeedTier::Tier2 => &self.tier2,
            SeedTier::Tier3 => &self.tier3,
        }
    }
}

/// Where a baseline round came from in the configuration file.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselineSource {
    #[default]
    BaselineJson,
    ManualImport,
}

/// A Swiss round whose pairings are fixed by configuration.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BaselineRound {
    pub round_number: u32,
    #[serde(default)]
    pub source: BaselineSource,
    pub matchups: Vec<Matchup>,
}

/// Seeding configuration, parsed and validated before it reaches the engine.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeedingConfig {
    pub format_version: String,
    #[serde(default)]
    pub season: Option<String>,
    pub tiers: SeedTiers,
    #[serde(default)]
    pub baseline_rounds: Vec<BaselineRound>,
}

impl SeedingConfig {
    pub fn new(tiers: SeedTiers) -> Self {
        Self {
            format_version: "1.0.0".to_string(),
            season: None,
            tiers,
            baseline_rounds: Vec::new(),
        }
    }

    pub fn with_baseline_rounds(mut self, rounds: Vec<BaselineRound>) -> Self {
        self.baseline_rounds = rounds;
        self
    }

    pub fn baseline_round(&self, round_number: u32) -> Option<&BaselineRound> {
        self.baseline_rounds
            .iter()
            .find(|r| r.round_number == round_number)
    }

    /// Cross-check tiers and baseline rounds against the roster.
    pub fn validate(&self, roster: &[Entrant]) -> Result<(), TournamentError> {
        let known: HashMap<&str, &Entrant> = roster.iter().map(|e| (e.id.as_str(), e)).collect();

        let mut tier_of: HashMap<&str, SeedTier> = HashMap::new();
        for tier in SeedTier::ALL {
            let members = self.tiers.get(tier);
            if members.len() != tier.expected_size() {
                return Err(TournamentError::InvalidTierSize {
                    tier,
                    expected: tier.expected_size(),
                    found: members.len(),
                });
            }
            for id in members {
                if !known.contains_key(id.as_str()) {
                    return Err(TournamentError::UnknownEntrant(id.clone()));
                }
                if tier_of.insert(id.as_str(), tier).is_some() {
                    return Err(TournamentError::DuplicateTierMember(id.clone()));
                }
            }
        }
        if let Some(e) = roster.iter().find(|e| !tier_of.contains_key(e.id.as_str())) {
            return Err(TournamentError::MissingTier(e.id.clone()));
        }

        let mut seen_rounds = HashSet::new();
        let mut seen_pairs: BTreeSet<(&str, &str)> = BTreeSet::new();
        for round in &self.baseline_rounds {
            let n = round.round_number;
            if n == 0 || n > MAX_SWISS_ROUNDS {
                return Err(TournamentError::InvalidBaselineRound {
                    round_number: n,
                    reason: format!("round number must be between 1 and {}", MAX_SWISS_ROUNDS),
                });
            }
            if !seen_rounds.insert(n) {
                return Err(TournamentError::InvalidBaselineRound {
                    round_number: n,
                    reason: "round number appears more than once".to_string(),
                });
            }
            if round.matchups.is_empty() {
                return Err(TournamentError::InvalidBaselineRound {
                    round_number: n,
                    reason: "at least one matchup is required".to_string(),
                });
            }
            let mut used = HashSet::new();
            for m in &round.matchups {
                for id in [&m.entrant_a, &m.entrant_b] {
                    if !known.contains_key(id.as_str()) {
                        return Err(TournamentError::UnknownEntrant(id.clone()));
                    }
                }
                if m.entrant_a == m.entrant_b {
                    return Err(TournamentError::SelfPairing(m.entrant_a.clone()));
                }
                for id in [&m.entrant_a, &m.entrant_b] {
                    if !used.insert(id.as_str()) {
                        return Err(TournamentError::DuplicateAssignment {
                            round_number: n,
                            entrant: id.clone(),
                        });
                    }
                }
                let pair = if m.entrant_a <= m.entrant_b {
                    (m.entrant_a.as_str(), m.entrant_b.as_str())
                } else {
                    (m.entrant_b.as_str(), m.entrant_a.as_str())
                };
                if !seen_pairs.insert(pair) {
                    return Err(TournamentError::InvalidBaselineRound {
                        round_number: n,
                        reason: format!("matchup {} vs {} repeats across baseline rounds", pair.0, pair.1),
                    });
                }
            }
        }
        Ok(())
    }
}
