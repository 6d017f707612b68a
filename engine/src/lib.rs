use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod api;
pub mod combat;
pub mod content;
pub mod error;
pub mod life;
pub mod model;
pub mod orchestrator;
pub mod roster;
pub mod sample;

pub use combat::duel::{CombatState, Duel, Finale, MatchResult, MatchState, Party, Verdict};
pub use combat::resolve::{resolve, ActionOutcome, Resolution};
pub use error::{RosterError, SetupError, TurnError};
pub use life::Health;
pub use model::{Action, Combatant};

/// Source of uniform randomness for every roll the engine makes.
pub trait Rolls {
    /// Uniform integer in `lo..=hi`.
    fn roll_range(&mut self, lo: u32, hi: u32) -> u32;
    /// Uniform float in `[0, 1)`.
    fn roll_unit(&mut self) -> f64;
}

enum Source {
    Seeded(ChaCha8Rng),
    Scripted {
        ints: Vec<u32>,
        floats: Vec<f64>,
        next_int: usize,
        next_float: usize,
    },
}

pub struct Dice {
    source: Source,
    draws: u64,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self { source: Source::Seeded(ChaCha8Rng::seed_from_u64(seed)), draws: 0 }
    }

    /// Replays fixed values, cycling when a script runs out. Integers are clamped
    /// into the requested range; an empty script yields the range minimum / 0.0.
    pub fn from_scripted(ints: Vec<u32>, floats: Vec<f64>) -> Self {
        Self {
            source: Source::Scripted { ints, floats, next_int: 0, next_float: 0 },
            draws: 0,
        }
    }

    /// Total number of draws served so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl Rolls for Dice {
    fn roll_range(&mut self, lo: u32, hi: u32) -> u32 {
        self.draws += 1;
        match &mut self.source {
            Source::Seeded(rng) => rng.gen_range(lo..=hi),
            Source::Scripted { ints, next_int, .. } => {
                if ints.is_empty() {
                    return lo;
                }
                let v = ints[*next_int % ints.len()];
                *next_int += 1;
                v.clamp(lo, hi)
            }
        }
    }

    fn roll_unit(&mut self) -> f64 {
        self.draws += 1;
        match &mut self.source {
            Source::Seeded(rng) => rng.r#gen::<f64>(),
            Source::Scripted { floats, next_float, .. } => {
                if floats.is_empty() {
                    return 0.0;
                }
                let v = floats[*next_float % floats.len()];
                *next_float += 1;
                // keep scripted values inside [0, 1)
                v.clamp(0.0, 1.0 - f64::EPSILON)
            }
        }
    }
}
