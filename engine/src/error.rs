use thiserror::Error;

use crate::combat::duel::Party;

/// Failures raised while resolving combatants from a roster.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("combatant '{0}' not found")]
    NotFound(String),

    #[error("{combatant} has only {found} usable actions (need {required})")]
    InsufficientActions {
        combatant: String,
        found: usize,
        required: usize,
    },

    #[error("roster catalog is empty")]
    EmptyCatalog,

    #[error("invalid catalog: {0}")]
    Catalog(#[from] serde_json::Error),
}

/// `apply_action` called in a way the sequencer cannot honour.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error("{attempted:?} tried to act but it is {expected:?}'s turn")]
    OutOfTurn { expected: Party, attempted: Party },

    #[error("match is already over")]
    MatchOver,

    #[error("{combatant} does not know '{action}'")]
    UnknownAction { combatant: String, action: String },
}

/// Invalid match configuration, caught before any state is created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("max_hp must be positive")]
    ZeroMaxHp,

    #[error("{combatant} has no actions")]
    NoActions { combatant: String },

    #[error("action '{action}' has zero power")]
    ZeroPower { action: String },

    #[error("action '{action}' accuracy {accuracy} outside 1..=100")]
    AccuracyOutOfRange { action: String, accuracy: u32 },
}
