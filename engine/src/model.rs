use serde::{Deserialize, Serialize};

use crate::error::SetupError;

/// A named move: base damage magnitude and hit chance in percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    pub power: u32,
    pub accuracy: u32,
}

impl Action {
    pub fn new(name: impl Into<String>, power: u32, accuracy: u32) -> Self {
        Self { name: name.into(), power, accuracy }
    }

    pub fn validate(&self) -> Result<(), SetupError> {
        if self.power == 0 {
            return Err(SetupError::ZeroPower { action: self.name.clone() });
        }
        if !(1..=100).contains(&self.accuracy) {
            return Err(SetupError::AccuracyOutOfRange {
                action: self.name.clone(),
                accuracy: self.accuracy,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub actions: Vec<Action>,
}

impl Combatant {
    pub fn new(name: impl Into<String>, actions: Vec<Action>) -> Self {
        Self { name: name.into(), actions }
    }

    pub fn validate(&self) -> Result<(), SetupError> {
        if self.actions.is_empty() {
            return Err(SetupError::NoActions { combatant: self.name.clone() });
        }
        for action in &self.actions {
            action.validate()?;
        }
        Ok(())
    }

    pub fn knows(&self, action: &Action) -> bool {
        self.actions.iter().any(|a| a == action)
    }
}
