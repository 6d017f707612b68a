//! Drives a [`Duel`] to completion: asks each side for an action, feeds it to the
//! sequencer and reports what happened to a display sink.

use std::thread;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;

use crate::sample::pick_one;
use crate::{Action, ActionOutcome, Duel, Finale, Health, MatchResult, Party, Rolls, Verdict};

/// Width of the health bar in narration.
pub const BAR_WIDTH: usize = 30;

/// Supplies one action per turn from the offered set.
pub trait Chooser {
    fn choose(&mut self, offered: &[Action], rng: &mut dyn Rolls) -> Result<Action>;
}

/// Uniform pick over the offered set: one roll per turn.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomChooser;

impl Chooser for RandomChooser {
    fn choose(&mut self, offered: &[Action], rng: &mut dyn Rolls) -> Result<Action> {
        pick_one(offered, rng)
            .cloned()
            .ok_or_else(|| anyhow!("no actions to choose from"))
    }
}

/// Adapts a closure (typically a terminal prompt) into a [`Chooser`].
pub struct FnChooser<F>(pub F);

impl<F> Chooser for FnChooser<F>
where
    F: FnMut(&[Action]) -> Result<Action>,
{
    fn choose(&mut self, offered: &[Action], _rng: &mut dyn Rolls) -> Result<Action> {
        let picked = (self.0)(offered)?;
        if !offered.contains(&picked) {
            bail!("chosen action '{}' was not offered", picked.name);
        }
        Ok(picked)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum MatchEvent {
    Started { player: String, bot: String },
    Health { name: String, hp: u32, max_hp: u32 },
    Preparing { name: String, action: String },
    Resolved(ActionOutcome),
    RoundOver,
    Finished { result: MatchResult, verdict: Verdict },
}

impl MatchEvent {
    /// One line of narration; `None` for events that only pace the output.
    pub fn narrate(&self) -> Option<String> {
        match self {
            MatchEvent::Started { player, bot } => {
                Some(format!("Fight: {} (you) vs {} (bot)", player, bot))
            }
            MatchEvent::Health { name, hp, max_hp } => {
                let bar = Health::starting_at(*hp, *max_hp).bar(BAR_WIDTH);
                Some(format!("{}: [{}] {} HP", name, bar, hp))
            }
            MatchEvent::Preparing { name, action } => {
                Some(format!("{} prepares \"{}\"...", name, action))
            }
            MatchEvent::Resolved(o) if o.hit => Some(format!(
                "{} uses {} and deals {} damage!",
                o.attacker_name, o.action.name, o.damage
            )),
            MatchEvent::Resolved(o) => {
                Some(format!("{} misses with \"{}\"!", o.attacker_name, o.action.name))
            }
            MatchEvent::RoundOver => Some("-------------------------------".to_string()),
            MatchEvent::Finished { verdict, .. } => Some(
                match verdict {
                    Verdict::Win => "You win!",
                    Verdict::Lose => "You lose!",
                    Verdict::Draw => "Draw!",
                }
                .to_string(),
            ),
        }
    }
}

fn pause(pacing: Duration) {
    if !pacing.is_zero() {
        thread::sleep(pacing);
    }
}

/// Run `duel` until it ends. Party A is the player, party B the bot.
pub fn run_match(
    duel: &mut Duel,
    player: &mut dyn Chooser,
    bot: &mut dyn Chooser,
    rng: &mut dyn Rolls,
    pacing: Duration,
    mut emit: impl FnMut(MatchEvent),
) -> Result<Finale> {
    emit(MatchEvent::Started {
        player: duel.combatant(Party::A).name.clone(),
        bot: duel.combatant(Party::B).name.clone(),
    });

    while let Some(mover) = duel.to_move() {
        let offered = &duel.combatant(mover).actions;
        let action = match mover {
            Party::A => {
                for party in [Party::A, Party::B] {
                    emit(MatchEvent::Health {
                        name: duel.combatant(party).name.clone(),
                        hp: duel.health(party),
                        max_hp: duel.max_hp(),
                    });
                }
                player.choose(offered, rng)?
            }
            Party::B => {
                pause(pacing);
                let action = bot.choose(offered, rng)?;
                emit(MatchEvent::Preparing {
                    name: duel.combatant(mover).name.clone(),
                    action: action.name.clone(),
                });
                pause(pacing);
                action
            }
        };

        let outcome = duel
            .apply_action(mover, &action, rng)
            .context("sequencer rejected an orchestrated action")?;
        emit(MatchEvent::Resolved(outcome));

        if mover == Party::B && !duel.is_over() {
            emit(MatchEvent::RoundOver);
            pause(pacing);
        }
    }

    let finale = duel
        .finale()
        .ok_or_else(|| anyhow!("match loop exited before a result"))?;
    emit(MatchEvent::Finished {
        result: finale.result,
        verdict: finale.result.for_party(Party::A),
    });
    Ok(finale)
}
