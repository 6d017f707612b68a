use serde::Serialize;
use tracing::debug;

use crate::combat::duel::Party;
use crate::{Action, Rolls};

pub const VARIANCE_MIN: f64 = 0.8;
pub const VARIANCE_SPAN: f64 = 0.4;

/// What one resolved action did to the defender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub hit: bool,
    pub hit_roll: u32,
    pub damage: u32,
    pub defender_hp: u32,
}

/// Per-action record handed to display sinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    pub attacker: Party,
    pub attacker_name: String,
    pub action: Action,
    pub hit: bool,
    pub hit_roll: u32,
    pub damage: u32,
    pub defender_hp: u32,
}

/// Largest integer strictly below `power × 1.2`. Float rounding can push the
/// factor onto 1.2 itself when the unit draw sits just under 1.
fn damage_ceiling(power: u32) -> u32 {
    let ceiling = (u64::from(power) * 6).saturating_sub(1) / 5;
    u32::try_from(ceiling).unwrap_or(u32::MAX)
}

/// Roll d100 against accuracy, then damage = floor(power × [0.8, 1.2)).
///
/// Consumes one draw on a miss and two on a hit.
pub fn resolve<R: Rolls + ?Sized>(
    attacker: &str,
    action: &Action,
    defender_hp: u32,
    rng: &mut R,
) -> Resolution {
    let hit_roll = rng.roll_range(1, 100);
    if hit_roll > action.accuracy {
        debug!(attacker, action = %action.name, hit_roll, accuracy = action.accuracy, "miss");
        return Resolution { hit: false, hit_roll, damage: 0, defender_hp };
    }

    let factor = VARIANCE_MIN + rng.roll_unit() * VARIANCE_SPAN;
    let raw = (f64::from(action.power) * factor).floor() as u32;
    let damage = raw.min(damage_ceiling(action.power));
    let after = defender_hp.saturating_sub(damage);
    debug!(attacker, action = %action.name, hit_roll, factor, damage, defender_hp = after, "hit");
    Resolution { hit: true, hit_roll, damage, defender_hp: after }
}
