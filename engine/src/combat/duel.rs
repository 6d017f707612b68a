//! Turn sequencer for a two-party match.
//!
//! A [`Duel`] owns the only mutable copy of the match state. Parties take turns
//! strictly A, B, A, B, ... and the match ends the moment a defender drops to 0,
//! so B never answers the action that knocked it out.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::combat::resolve::{resolve, ActionOutcome};
use crate::error::{SetupError, TurnError};
use crate::{Action, Combatant, Health, Rolls};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Party {
    A,
    B,
}

impl Party {
    pub fn opponent(self) -> Party {
        match self {
            Party::A => Party::B,
            Party::B => Party::A,
        }
    }

    fn index(self) -> usize {
        match self {
            Party::A => 0,
            Party::B => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    WinA,
    WinB,
    Draw,
}

/// A [`MatchResult`] seen from one party's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Win,
    Lose,
    Draw,
}

impl MatchResult {
    fn win_for(party: Party) -> Self {
        match party {
            Party::A => MatchResult::WinA,
            Party::B => MatchResult::WinB,
        }
    }

    pub fn winner(self) -> Option<Party> {
        match self {
            MatchResult::WinA => Some(Party::A),
            MatchResult::WinB => Some(Party::B),
            MatchResult::Draw => None,
        }
    }

    pub fn for_party(self, party: Party) -> Verdict {
        match self.winner() {
            None => Verdict::Draw,
            Some(p) if p == party => Verdict::Win,
            Some(_) => Verdict::Lose,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CombatState {
    health: [Health; 2],
    to_move: Party,
}

impl CombatState {
    pub fn health(&self, party: Party) -> Health {
        self.health[party.index()]
    }

    pub fn to_move(&self) -> Party {
        self.to_move
    }
}

/// Terminal summary: the result plus the healths at the moment the match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Finale {
    pub result: MatchResult,
    pub hp_a: u32,
    pub hp_b: u32,
    pub turns: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MatchState {
    InProgress(CombatState),
    Terminal(Finale),
}

#[derive(Debug, Clone)]
pub struct Duel {
    sides: [Combatant; 2],
    max_hp: u32,
    state: MatchState,
    turns: u32,
}

impl Duel {
    /// Fresh match: both parties at `max_hp`, A to move.
    pub fn new(a: Combatant, b: Combatant, max_hp: u32) -> Result<Self, SetupError> {
        Self::with_starting_hp(a, b, max_hp, max_hp, max_hp)
    }

    /// Match that starts from arbitrary healths (clamped to `max_hp`).
    ///
    /// A party starting at 0 has already lost; both at 0 is a draw.
    pub fn with_starting_hp(
        a: Combatant,
        b: Combatant,
        max_hp: u32,
        hp_a: u32,
        hp_b: u32,
    ) -> Result<Self, SetupError> {
        if max_hp == 0 {
            return Err(SetupError::ZeroMaxHp);
        }
        a.validate()?;
        b.validate()?;

        let state = CombatState {
            health: [Health::starting_at(hp_a, max_hp), Health::starting_at(hp_b, max_hp)],
            to_move: Party::A,
        };
        let state = match (state.health(Party::A).is_down(), state.health(Party::B).is_down()) {
            (true, true) => MatchState::Terminal(finale(MatchResult::Draw, &state, 0)),
            (true, false) => MatchState::Terminal(finale(MatchResult::WinB, &state, 0)),
            (false, true) => MatchState::Terminal(finale(MatchResult::WinA, &state, 0)),
            (false, false) => MatchState::InProgress(state),
        };
        info!(a = %a.name, b = %b.name, max_hp, "match created");
        Ok(Self { sides: [a, b], max_hp, state, turns: 0 })
    }

    pub fn combatant(&self, party: Party) -> &Combatant {
        &self.sides[party.index()]
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, MatchState::Terminal(_))
    }

    /// Party to move, or `None` once the match is over.
    pub fn to_move(&self) -> Option<Party> {
        match &self.state {
            MatchState::InProgress(s) => Some(s.to_move),
            MatchState::Terminal(_) => None,
        }
    }

    pub fn finale(&self) -> Option<Finale> {
        match &self.state {
            MatchState::Terminal(f) => Some(*f),
            MatchState::InProgress(_) => None,
        }
    }

    /// Current health of `party`; after the match ends this is the final value.
    pub fn health(&self, party: Party) -> u32 {
        match &self.state {
            MatchState::InProgress(s) => s.health(party).hp,
            MatchState::Terminal(f) => match party {
                Party::A => f.hp_a,
                Party::B => f.hp_b,
            },
        }
    }

    /// Resolve `action` for `mover` against the opponent and advance the match.
    pub fn apply_action<R: Rolls + ?Sized>(
        &mut self,
        mover: Party,
        action: &Action,
        rng: &mut R,
    ) -> Result<ActionOutcome, TurnError> {
        let state = match &mut self.state {
            MatchState::Terminal(_) => return Err(TurnError::MatchOver),
            MatchState::InProgress(s) => s,
        };
        if state.to_move != mover {
            return Err(TurnError::OutOfTurn { expected: state.to_move, attempted: mover });
        }
        let attacker = &self.sides[mover.index()];
        if !attacker.knows(action) {
            return Err(TurnError::UnknownAction {
                combatant: attacker.name.clone(),
                action: action.name.clone(),
            });
        }

        let defender = mover.opponent();
        let defender_name = &self.sides[defender.index()].name;
        let res = resolve(&attacker.name, action, state.health(defender).hp, rng);
        let target = &mut state.health[defender.index()];
        target.apply_damage(defender_name, res.damage, |msg| tracing::trace!("{msg}"));
        debug_assert_eq!(target.hp, res.defender_hp);
        self.turns += 1;

        let outcome = ActionOutcome {
            attacker: mover,
            attacker_name: attacker.name.clone(),
            action: action.clone(),
            hit: res.hit,
            hit_roll: res.hit_roll,
            damage: res.damage,
            defender_hp: res.defender_hp,
        };

        if state.health(defender).is_down() {
            let result = if state.health(mover).is_down() {
                MatchResult::Draw
            } else {
                MatchResult::win_for(mover)
            };
            let done = finale(result, state, self.turns);
            info!(?result, turns = self.turns, hp_a = done.hp_a, hp_b = done.hp_b, "match over");
            self.state = MatchState::Terminal(done);
        } else {
            state.to_move = defender;
        }
        Ok(outcome)
    }
}

fn finale(result: MatchResult, state: &CombatState, turns: u32) -> Finale {
    Finale {
        result,
        hp_a: state.health(Party::A).hp,
        hp_b: state.health(Party::B).hp,
        turns,
    }
}
