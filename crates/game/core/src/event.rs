//! Battle event feed.
//!
//! Every resolved action produces exactly one [`BattleEvent`]; floor entry and
//! the end of a battle add banner events. `Display` renders the human-readable
//! log line.

use core::fmt;

use crate::skill::SkillHit;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BattleEvent {
    FloorEntered {
        /// 1-based floor number.
        number: usize,
        name: String,
    },
    Attacked {
        actor: String,
        target: String,
        damage: u32,
        defeated: bool,
    },
    /// A basic attack whose targets were all out of range.
    NoTarget { actor: String },
    SkillUsed {
        actor: String,
        skill: String,
        heal: bool,
        hits: Vec<SkillHit>,
    },
    NotEnoughMp {
        actor: String,
        skill: String,
        cost: u32,
    },
    Defended { actor: String },
    Passed { actor: String },
    Victory,
    PartyWiped,
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FloorEntered { number, name } => {
                write!(f, "--- Entering Floor {number}: {name} ---")
            }
            Self::Attacked {
                actor,
                target,
                damage,
                defeated,
            } => {
                write!(f, "{actor} attacked {target} for {damage} damage.")?;
                if *defeated {
                    write!(f, " {target} is defeated!")?;
                }
                Ok(())
            }
            Self::NoTarget { actor } => write!(f, "{actor} found no target."),
            Self::SkillUsed {
                actor,
                skill,
                heal,
                hits,
            } => {
                write!(f, "{actor} used {skill}")?;
                if hits.is_empty() {
                    return write!(f, ", but nothing happened.");
                }
                let verb = if *heal { "healing" } else { "hitting" };
                write!(f, ", {verb} ")?;
                for (i, hit) in hits.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} for {}", hit.target, hit.amount)?;
                }
                write!(f, ".")?;
                for hit in hits.iter().filter(|hit| hit.defeated) {
                    write!(f, " {} is defeated!", hit.target)?;
                }
                Ok(())
            }
            Self::NotEnoughMp { actor, skill, cost } => {
                write!(f, "{actor} tried {skill} but lacks the {cost} MP.")
            }
            Self::Defended { actor } => write!(f, "{actor} is defending."),
            Self::Passed { actor } => write!(f, "{actor} waits."),
            Self::Victory => write!(f, "Victory! All enemies defeated."),
            Self::PartyWiped => write!(f, "Game Over... The party has been wiped out."),
        }
    }
}

/// Append-only event list with a drain cursor for front ends.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<BattleEvent>,
    drained: usize,
}

impl EventLog {
    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Log lines from `start` onwards.
    pub fn messages_since(&self, start: usize) -> Vec<String> {
        self.events
            .get(start..)
            .unwrap_or_default()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages_since(0)
    }

    /// Log lines not yet drained; advances the cursor.
    pub fn drain(&mut self) -> Vec<String> {
        let pending = self.messages_since(self.drained);
        self.drained = self.events.len();
        pending
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.drained = 0;
    }
}
