use proptest::prelude::*;

use engine::sample::pick_one;
use engine::{Action, Combatant, Dice, Duel, MatchResult, Party};

fn action_strategy() -> impl Strategy<Value = Action> {
    (5u32..=150, 30u32..=100).prop_map(|(p, a)| Action::new(format!("m{}-{}", p, a), p, a))
}

fn side(name: &'static str) -> impl Strategy<Value = Combatant> {
    prop::collection::vec(action_strategy(), 1..6).prop_map(move |acts| Combatant::new(name, acts))
}

proptest! {
    #[test]
    fn random_matches_keep_every_invariant(
        a in side("a"),
        b in side("b"),
        max_hp in 1u32..=400,
        seed in any::<u64>(),
    ) {
        let mut duel = Duel::new(a, b, max_hp).unwrap();
        let mut dice = Dice::from_seed(seed);
        let mut expected = Party::A;
        let mut steps = 0u32;

        while let Some(mover) = duel.to_move() {
            prop_assert_eq!(mover, expected);
            let action = pick_one(&duel.combatant(mover).actions, &mut dice).unwrap().clone();
            let defender = mover.opponent();
            let before = duel.health(defender);
            let attacker_before = duel.health(mover);
            let draws_before = dice.draws();

            let out = duel.apply_action(mover, &action, &mut dice).unwrap();

            prop_assert_eq!(dice.draws() - draws_before, if out.hit { 2 } else { 1 });
            prop_assert_eq!(duel.health(mover), attacker_before);
            prop_assert_eq!(out.defender_hp, before.saturating_sub(out.damage));
            prop_assert_eq!(duel.health(defender), out.defender_hp);
            if out.hit {
                prop_assert!(out.hit_roll <= action.accuracy);
                let p = f64::from(action.power);
                prop_assert!(f64::from(out.damage) >= (p * 0.8).floor());
                prop_assert!(u64::from(out.damage) * 5 < u64::from(action.power) * 6);
            } else {
                prop_assert!(out.hit_roll > action.accuracy);
                prop_assert_eq!(out.damage, 0);
                prop_assert_eq!(out.defender_hp, before);
            }
            for party in [Party::A, Party::B] {
                prop_assert!(duel.health(party) <= max_hp);
            }

            expected = defender;
            steps += 1;
            prop_assert!(steps < 20_000, "match did not terminate");
        }

        let finale = duel.finale().unwrap();
        prop_assert_eq!(finale.turns, steps);
        match finale.result {
            MatchResult::WinA => prop_assert!(finale.hp_b == 0 && finale.hp_a > 0),
            MatchResult::WinB => prop_assert!(finale.hp_a == 0 && finale.hp_b > 0),
            MatchResult::Draw => prop_assert!(false, "draw from a full-health start"),
        }
        // the last mover is always the winner
        prop_assert_eq!(finale.result.winner(), Some(expected.opponent()));
    }

    #[test]
    fn starting_health_decides_degenerate_matches(hp_a in 0u32..3, hp_b in 0u32..3) {
        let c = Combatant::new("c", vec![Action::new("tackle", 40, 100)]);
        let duel = Duel::with_starting_hp(c.clone(), c, 300, hp_a, hp_b).unwrap();
        let expected = match (hp_a, hp_b) {
            (0, 0) => Some(MatchResult::Draw),
            (0, _) => Some(MatchResult::WinB),
            (_, 0) => Some(MatchResult::WinA),
            _ => None,
        };
        prop_assert_eq!(duel.finale().map(|f| f.result), expected);
    }
}
