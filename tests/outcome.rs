//! Integration tests for outcome strategies.

mod common;

use common::{rng, tournament};
use rand::rngs::mock::StepRng;
use worlds_swiss_sim::logic::outcome::{
    strategy_for, OutcomeStrategy, RegionWeightedOutcome, UniformOutcome,
};
use worlds_swiss_sim::models::RecordBracket;
use worlds_swiss_sim::{
    advance, set_outcome_strategy, simulate_round, Entrant, GameMatch, OutcomeStrategyKind,
    Region, StageType,
};

#[test]
fn region_weighted_favours_stronger_regions() {
    let model = RegionWeightedOutcome;
    for ra in Region::ALL {
        for rb in Region::ALL {
            let a = Entrant::new("a", "A", ra);
            let b = Entrant::new("b", "B", rb);
            let p = model.probability(&a, &b);
            assert!((0.0..=1.0).contains(&p));
            assert!((p + model.probability(&b, &a) - 1.0).abs() < 1e-9);
            match ra.strength().cmp(&rb.strength()) {
                std::cmp::Ordering::Greater => assert!(p > 0.5, "{ra} vs {rb}"),
                std::cmp::Ordering::Less => assert!(p < 0.5, "{ra} vs {rb}"),
                std::cmp::Ordering::Equal => assert_eq!(p, 0.5),
            }
        }
    }
    let lck = Entrant::new("gen", "Gen.G", Region::Lck);
    let lcs = Entrant::new("fly", "FlyQuest", Region::Lcs);
    assert!((model.probability(&lck, &lcs) - 100.0 / 150.0).abs() < 1e-9);
}

#[test]
fn draw_below_probability_goes_to_first_entrant() {
    let a = Entrant::new("gen", "Gen.G", Region::Lck);
    let b = Entrant::new("fly", "FlyQuest", Region::Lcs);
    let game = GameMatch::swiss("gen", "fly", 1, RecordBracket::OPENING);

    // A zero draw always falls below p, an all-ones draw never does.
    let low = UniformOutcome.resolve(&game, &a, &b, &mut StepRng::new(0, 0));
    assert_eq!((low.winner.as_str(), low.loser.as_str()), ("gen", "fly"));
    assert_eq!(low.probability, 0.5);

    let high = RegionWeightedOutcome.resolve(&game, &a, &b, &mut StepRng::new(u64::MAX, 0));
    assert_eq!(high.winner, "fly");

    let boxed = strategy_for(OutcomeStrategyKind::RegionWeighted);
    assert_eq!(boxed.resolve(&game, &b, &a, &mut StepRng::new(0, 0)).winner, "fly");
}

#[test]
fn simulation_uses_the_selected_strategy() {
    let t = set_outcome_strategy(&tournament(), OutcomeStrategyKind::RegionWeighted);
    assert_eq!(t.outcome_strategy, OutcomeStrategyKind::RegionWeighted);

    let t = advance(&t, &mut rng(5)).unwrap();
    let t = simulate_round(&t, &mut StepRng::new(0, 0)).unwrap();
    for m in t.round_matches(StageType::Swiss, 1) {
        assert_eq!(m.winner.as_ref(), Some(&m.entrant_a));
        assert_eq!(t.entrant(&m.entrant_a).unwrap().wins, 1);
        assert_eq!(t.entrant(&m.entrant_b).unwrap().losses, 1);
    }
}
