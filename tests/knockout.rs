//! Integration tests for knockout seeding and bracket progression.

mod common;

use common::{completed_swiss, rng, with_record};
use std::collections::HashSet;
use worlds_swiss_sim::logic::knockout::{create_final, create_semifinals, next_round, seed_bracket};
use worlds_swiss_sim::{
    advance, simulate_round, Entrant, ErrorKind, KnockoutRound, Region, StageType,
    Tournament, TournamentError, TournamentPhase,
};

fn qualified_field() -> Vec<Entrant> {
    vec![
        with_record("a", Region::Lck, 3, 0),
        with_record("b", Region::Lpl, 3, 0),
        with_record("c", Region::Lck, 3, 1),
        with_record("d", Region::Lec, 3, 1),
        with_record("e", Region::Lpl, 3, 1),
        with_record("f", Region::Lcs, 3, 2),
        with_record("g", Region::Lcp, 3, 2),
        with_record("h", Region::Lec, 3, 2),
    ]
}

#[test]
fn quarterfinals_follow_swiss_records() {
    let field = qualified_field();
    let refs: Vec<&Entrant> = field.iter().collect();
    let record = |id: &str| {
        let e = field.iter().find(|e| e.id == id).unwrap();
        (e.wins, e.losses)
    };

    for seed in 0..5 {
        let quarterfinals = seed_bracket(&refs, &mut rng(seed)).unwrap();
        assert_eq!(quarterfinals.len(), 4);

        let mut seen = HashSet::new();
        for m in &quarterfinals {
            assert_eq!(m.knockout_round(), Some(KnockoutRound::Quarterfinal));
            assert!(seen.insert(m.entrant_a.clone()));
            assert!(seen.insert(m.entrant_b.clone()));
        }
        assert_eq!(seen.len(), 8);

        // 3-0 entrants open the top and bottom quarterfinal against 3-2 entrants.
        for m in [&quarterfinals[0], &quarterfinals[3]] {
            assert_eq!(record(&m.entrant_a), (3, 0));
            assert_eq!(record(&m.entrant_b), (3, 2));
        }
        let middle: Vec<_> = quarterfinals[1..3]
            .iter()
            .map(|m| (record(&m.entrant_a), record(&m.entrant_b)))
            .collect();
        assert!(middle.contains(&((3, 1), (3, 1))));
        assert!(middle.contains(&((3, 1), (3, 2))));
    }
}

#[test]
fn quarterfinals_with_four_three_one_entrants() {
    let field = vec![
        with_record("a", Region::Lck, 3, 0),
        with_record("b", Region::Lpl, 3, 0),
        with_record("c", Region::Lck, 3, 1),
        with_record("d", Region::Lec, 3, 1),
        with_record("e", Region::Lpl, 3, 1),
        with_record("i", Region::Lcs, 3, 1),
        with_record("f", Region::Lcs, 3, 2),
        with_record("g", Region::Lcp, 3, 2),
    ];
    let refs: Vec<&Entrant> = field.iter().collect();
    let record = |id: &str| {
        let e = field.iter().find(|e| e.id == id).unwrap();
        (e.wins, e.losses)
    };

    for seed in 0..5 {
        let quarterfinals = seed_bracket(&refs, &mut rng(seed)).unwrap();
        assert_eq!(quarterfinals.len(), 4);
        let seen: HashSet<_> = quarterfinals
            .iter()
            .flat_map(|m| [m.entrant_a.clone(), m.entrant_b.clone()])
            .collect();
        assert_eq!(seen.len(), 8);

        for m in [&quarterfinals[0], &quarterfinals[3]] {
            assert_eq!(record(&m.entrant_a), (3, 0));
            assert_eq!(record(&m.entrant_b), (3, 2));
        }
        for m in &quarterfinals[1..3] {
            assert_eq!(record(&m.entrant_a), (3, 1));
            assert_eq!(record(&m.entrant_b), (3, 1));
        }
    }
}

#[test]
fn unexpected_record_distribution_is_rejected() {
    let mut field = qualified_field();
    field[2] = with_record("c", Region::Lck, 3, 0);
    let refs: Vec<&Entrant> = field.iter().collect();
    let err = seed_bracket(&refs, &mut rng(0)).unwrap_err();
    assert_eq!(
        err,
        TournamentError::InvalidKnockoutDistribution {
            three_zero: 3,
            three_one: 2,
            three_two: 3
        }
    );
    assert_eq!(err.kind(), ErrorKind::InvariantViolation);

    let field = qualified_field();
    let refs: Vec<&Entrant> = field.iter().take(7).collect();
    assert!(matches!(
        seed_bracket(&refs, &mut rng(0)),
        Err(TournamentError::WrongQualifiedCount { expected: 8, found: 7 })
    ));
}

#[test]
fn semifinals_and_final_pair_winners_in_order() {
    let winners: Vec<String> = ["a", "c", "f", "b"].iter().map(|s| s.to_string()).collect();
    let semis = create_semifinals(&winners).unwrap();
    assert_eq!(semis.len(), 2);
    assert_eq!((semis[0].entrant_a.as_str(), semis[0].entrant_b.as_str()), ("a", "c"));
    assert_eq!((semis[1].entrant_a.as_str(), semis[1].entrant_b.as_str()), ("f", "b"));
    assert!(semis.iter().all(|m| m.knockout_round() == Some(KnockoutRound::Semifinal)));

    let last = create_final(&winners[1..3]).unwrap();
    assert_eq!(last.knockout_round(), Some(KnockoutRound::Final));
    assert_eq!(last.round_number, 3);

    assert!(matches!(
        create_semifinals(&winners[..3]),
        Err(TournamentError::WrongWinnerCount { round: KnockoutRound::Semifinal, expected: 4, found: 3 })
    ));
    assert_eq!(next_round(KnockoutRound::Final, &winners[..1]).unwrap(), None);
}

#[test]
fn knockout_stage_plays_out_from_swiss_qualifiers() {
    let swiss = completed_swiss();
    let t = swiss.clone();
    assert_eq!(t.phase(), TournamentPhase::KnockoutNotStarted);
    assert_eq!(t.qualified().len(), 8);
    assert_eq!(t.eliminated().len(), 8);
    assert!(matches!(simulate_round(&t, &mut rng(0)), Err(TournamentError::NoPendingRound)));

    let mut r = rng(11);
    let t = advance(&t, &mut r).unwrap();
    assert_eq!(t.phase(), TournamentPhase::KnockoutInProgress);
    assert_eq!(t.pending_matches(StageType::Knockout).len(), 4);
    let bracket = t.knockout_bracket.as_ref().unwrap();
    assert_eq!(bracket.slots.len(), 7);
    assert_eq!(bracket.draw_history.len(), 4);

    // Simulating resolves the quarterfinals but does not draw the semifinals.
    let t = simulate_round(&t, &mut r).unwrap();
    assert!(t.pending_matches(StageType::Knockout).is_empty());
    assert_eq!(t.knockout_stage.current_round_number, 1);

    let t = advance(&t, &mut r).unwrap();
    let semis = t.pending_matches(StageType::Knockout);
    assert_eq!(semis.len(), 2);
    let qf_winners: Vec<_> = t
        .round_matches(StageType::Knockout, 1)
        .iter()
        .map(|m| m.winner.clone().unwrap())
        .collect();
    assert_eq!(semis[0].entrant_a, qf_winners[0]);
    assert_eq!(semis[1].entrant_b, qf_winners[3]);

    let t = advance(&t, &mut r).unwrap();
    assert_eq!(t.pending_matches(StageType::Knockout).len(), 1);
    let t = advance(&t, &mut r).unwrap();
    assert_eq!(t.phase(), TournamentPhase::KnockoutCompleted);
    let final_match = t.round_matches(StageType::Knockout, 3)[0];
    assert_eq!(final_match.knockout_round(), Some(KnockoutRound::Final));
    assert_eq!(Some(&t.champion().unwrap().id), final_match.winner.as_ref());
    assert!(t
        .knockout_bracket
        .as_ref()
        .unwrap()
        .slots
        .iter()
        .all(|s| s.winner.is_some()));

    // Knockout results never touch Swiss records.
    let records = |t: &Tournament| t.entrants.iter().map(|e| e.record()).collect::<Vec<_>>();
    assert_eq!(records(&t), records(&swiss));
    assert!(matches!(advance(&t, &mut r), Err(TournamentError::TournamentCompleted)));
    assert!(matches!(simulate_round(&t, &mut r), Err(TournamentError::TournamentCompleted)));
}

