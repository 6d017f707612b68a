use engine::life::*;

fn noop_log(_: String) {}

#[test]
fn apply_damage_clamps_at_zero_and_reports_the_drop() {
    let mut h = Health::starting_at(3, 10);
    let mut seen = vec![];
    let dropped = h.apply_damage("Hero", 5, |s| seen.push(s));
    assert!(dropped);
    assert_eq!(h.hp, 0);
    assert!(seen.iter().any(|s| s.contains("drops to 0 HP")));
}

#[test]
fn partial_damage_does_not_drop() {
    let mut h = Health::new(300);
    assert!(!h.apply_damage("Hero", 120, noop_log));
    assert_eq!(h.hp, 180);
    assert_eq!(h.max_hp, 300);
}

#[test]
fn damage_on_a_downed_creature_is_ignored() {
    let mut h = Health::starting_at(0, 10);
    assert!(!h.apply_damage("Hero", 5, noop_log));
    assert_eq!(h.hp, 0);
}

#[test]
fn bar_scales_to_width() {
    assert_eq!(Health::new(300).bar(30), "=".repeat(30));
    assert_eq!(Health::starting_at(0, 300).bar(30), " ".repeat(30));
    assert_eq!(Health::starting_at(9, 300).bar(30), " ".repeat(30));
    assert_eq!(Health::starting_at(10, 300).bar(30), format!("={}", " ".repeat(29)));
}
