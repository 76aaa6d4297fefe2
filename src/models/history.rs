//! Append-only record of which entrants have already met.

use crate::models::entrant::EntrantId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Unordered pairs of entrants that have played each other.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchHistory {
    pairs: BTreeSet<(EntrantId, EntrantId)>,
}

fn key(a: &str, b: &str) -> (EntrantId, EntrantId) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

impl MatchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `a` and `b` have met, in either order.
    pub fn have_met(&self, a: &str, b: &str) -> bool {
        self.pairs.contains(&key(a, b))
    }

    pub fn record(&mut self, a: &str, b: &str) {
        self.pairs.insert(key(a, b));
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(EntrantId, EntrantId)> {
        self.pairs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_are_unordered() {
        let mut h = MatchHistory::new();
        h.record("t1", "t2");
        h.record("t2", "t1");
        assert_eq!(h.len(), 1);
        assert!(h.have_met("t2", "t1"));
        assert!(!h.have_met("t1", "t3"));
    }
}
