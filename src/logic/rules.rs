//! Pairing constraints: same record, no rematch, region diversity.

use crate::models::{Entrant, MatchHistory, RecordBracket, TournamentError};
use std::collections::BTreeMap;

/// True if the two entrants already played each other, in either order.
pub fn have_met(a: &Entrant, b: &Entrant, history: &MatchHistory) -> bool {
    history.have_met(&a.id, &b.id)
}

/// Swiss pairing rule: distinct entrants, same record, never met before.
pub fn can_pair(a: &Entrant, b: &Entrant, history: &MatchHistory) -> bool {
    if a.id == b.id {
        return false;
    }
    if have_met(a, b, history) {
        return false;
    }
    a.wins == b.wins && a.losses == b.losses
}

/// Opening round rule for tier pairings.
pub fn regions_differ(a: &Entrant, b: &Entrant) -> bool {
    a.region != b.region
}

/// Partition entrants by (wins, losses). Order inside a group follows input order.
pub fn group_by_record<'a>(
    entrants: impl IntoIterator<Item = &'a Entrant>,
) -> BTreeMap<RecordBracket, Vec<&'a Entrant>> {
    let mut groups: BTreeMap<RecordBracket, Vec<&Entrant>> = BTreeMap::new();
    for e in entrants {
        groups.entry(e.record()).or_default().push(e);
    }
    groups
}

/// A record group must split into pairs; an odd group cannot be paired without crossing records.
pub fn ensure_even(record: RecordBracket, size: usize) -> Result<(), TournamentError> {
    if size % 2 != 0 {
        return Err(TournamentError::OddRecordGroup { record, size });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Region;

    fn entrant(id: &str, region: Region, wins: u32, losses: u32) -> Entrant {
        Entrant {
            wins,
            losses,
            ..Entrant::new(id, id.to_uppercase(), region)
        }
    }

    #[test]
    fn can_pair_requires_same_record_and_no_rematch() {
        let a = entrant("a", Region::Lck, 1, 0);
        let b = entrant("b", Region::Lck, 1, 0);
        let c = entrant("c", Region::Lpl, 0, 1);
        let mut history = MatchHistory::new();

        assert!(can_pair(&a, &b, &history));
        assert!(!can_pair(&a, &a, &history));
        assert!(!can_pair(&a, &c, &history));

        history.record("b", "a");
        assert!(!can_pair(&a, &b, &history));
        assert!(!can_pair(&b, &a, &history));
    }

    #[test]
    fn grouping_and_parity() {
        let entrants = vec![
            entrant("a", Region::Lck, 1, 0),
            entrant("b", Region::Lpl, 0, 1),
            entrant("c", Region::Lec, 1, 0),
        ];
        let groups = group_by_record(&entrants);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&RecordBracket::new(1, 0)].len(), 2);
        assert!(ensure_even(RecordBracket::new(1, 0), 2).is_ok());
        assert_eq!(
            ensure_even(RecordBracket::new(0, 1), 1),
            Err(TournamentError::OddRecordGroup {
                record: RecordBracket::new(0, 1),
                size: 1
            })
        );
    }
}
