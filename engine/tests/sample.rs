use std::collections::HashSet;

use engine::sample::{pick_one, sample_without_replacement};
use engine::Dice;

#[test]
fn draws_distinct_items() {
    let items: Vec<u32> = (0..10).collect();
    let mut dice = Dice::from_seed(9);
    let picked = sample_without_replacement(&items, 5, &mut dice);
    assert_eq!(picked.len(), 5);
    let unique: HashSet<_> = picked.iter().collect();
    assert_eq!(unique.len(), 5);
    assert!(picked.iter().all(|p| items.contains(p)));
    assert_eq!(dice.draws(), 5);
}

#[test]
fn oversized_request_returns_a_permutation() {
    let items = vec!["a", "b", "c"];
    let mut dice = Dice::from_seed(3);
    let mut picked = sample_without_replacement(&items, 40, &mut dice);
    picked.sort();
    assert_eq!(picked, items);
}

#[test]
fn zero_sample_is_empty() {
    let mut dice = Dice::from_seed(3);
    assert!(sample_without_replacement(&[1, 2, 3], 0, &mut dice).is_empty());
    assert!(sample_without_replacement::<u8, _>(&[], 4, &mut dice).is_empty());
    assert_eq!(dice.draws(), 0);
}

#[test]
fn scripted_rolls_drive_the_swaps() {
    // First draw swaps index 0 with the last slot, second keeps index 1 in place.
    let mut dice = Dice::from_scripted(vec![3, 1], vec![]);
    let picked = sample_without_replacement(&['w', 'x', 'y', 'z'], 2, &mut dice);
    assert_eq!(picked, vec!['z', 'x']);
}

#[test]
fn single_picks_are_roughly_uniform() {
    let items = [0usize, 1, 2, 3];
    let mut counts = [0u32; 4];
    let mut dice = Dice::from_seed(77);
    for _ in 0..3000 {
        let picked = sample_without_replacement(&items, 1, &mut dice);
        counts[picked[0]] += 1;
    }
    for c in counts {
        assert!((600..=900).contains(&c), "skewed counts: {:?}", counts);
    }
}

#[test]
fn pick_one_handles_empty_and_full() {
    let mut dice = Dice::from_scripted(vec![2], vec![]);
    assert_eq!(pick_one(&[10, 20, 30], &mut dice), Some(&30));
    assert_eq!(pick_one::<u8, _>(&[], &mut dice), None);
}
