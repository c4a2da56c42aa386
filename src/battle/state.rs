use crate::battle::engine::BattleEngine;
use crate::moves::{title_case, Move};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }

    /// Both sides in checking order.
    pub fn both() -> [Side; 2] {
        [Side::A, Side::B]
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "side A"),
            Side::B => write!(f, "side B"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Winner(Side),
    /// Both rosters were defeated in the same turn.
    Draw,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum BattlePhase {
    AwaitingActions,
    Resolving,
    /// Each listed (side, slot) needs a switch before that side may move again.
    FaintedReplacementPending { slots: Vec<(Side, usize)> },
    BattleOver(BattleOutcome),
}

impl BattlePhase {
    pub fn is_over(&self) -> bool {
        matches!(self, BattlePhase::BattleOver(_))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Turn Management
    TurnStarted {
        turn_number: u32,
    },
    TurnEnded,

    // Switching
    Switched {
        side: Side,
        slot: usize,
        old_combatant: Option<String>,
        new_combatant: String,
    },

    // Moves
    MoveUsed {
        side: Side,
        user: String,
        move_used: Move,
    },
    MoveMissed {
        side: Side,
        user: String,
        move_used: Move,
    },
    NoTarget {
        side: Side,
        user: String,
        move_used: Move,
    },
    Effectiveness {
        multiplier: f64,
    },
    DamageDealt {
        side: Side,
        target: String,
        damage: u16,
        remaining_hp: u16,
    },
    Fainted {
        side: Side,
        slot: usize,
        combatant: String,
    },

    // Battle Flow
    ReplacementRequired {
        side: Side,
        slot: usize,
    },
    SideDefeated {
        side: Side,
    },
    BattleEnded {
        outcome: BattleOutcome,
    },
}

impl BattleEvent {
    /// Formats the event into a human-readable string using the roster names
    /// held by `engine`. Returns None for silent events.
    pub fn format(&self, engine: &BattleEngine) -> Option<String> {
        let side_name = |side: &Side| engine.roster(*side).name().to_string();

        match self {
            BattleEvent::TurnStarted { turn_number } => Some(format!("=== Turn {} ===", turn_number)),
            BattleEvent::TurnEnded => None,

            BattleEvent::Switched {
                side,
                old_combatant,
                new_combatant,
                ..
            } => match old_combatant {
                Some(old) => Some(format!(
                    "{} recalled {} and sent out {}!",
                    side_name(side),
                    title_case(old),
                    title_case(new_combatant)
                )),
                None => Some(format!("{} sent out {}!", side_name(side), title_case(new_combatant))),
            },

            BattleEvent::MoveUsed { side, user, move_used } => Some(format!(
                "{}'s {} used {}!",
                side_name(side),
                title_case(user),
                move_used
            )),
            BattleEvent::MoveMissed { user, .. } => Some(format!("{}'s attack missed!", title_case(user))),
            BattleEvent::NoTarget { user, move_used, .. } => Some(format!(
                "{}'s {} had no target.",
                title_case(user),
                move_used
            )),
            BattleEvent::Effectiveness { multiplier } => match *multiplier {
                m if m > 1.0 => Some("It's super effective!".to_string()),
                m if m < 1.0 && m > 0.0 => Some("It's not very effective...".to_string()),
                m if m == 0.0 => Some("It had no effect!".to_string()),
                _ => None,
            },
            BattleEvent::DamageDealt { damage: 0, .. } => None,
            BattleEvent::DamageDealt { target, damage, .. } => {
                Some(format!("{} took {} damage!", title_case(target), damage))
            }
            BattleEvent::Fainted { combatant, .. } => Some(format!("{} fainted!", title_case(combatant))),

            BattleEvent::ReplacementRequired { .. } => None,
            BattleEvent::SideDefeated { side } => Some(format!("{} has no combatants left!", side_name(side))),
            BattleEvent::BattleEnded { outcome } => match outcome {
                BattleOutcome::Winner(side) => Some(format!("{} wins the battle!", side_name(side))),
                BattleOutcome::Draw => Some("The battle ended in a draw!".to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn extend(&mut self, other: EventBus) {
        self.events.extend(other.events);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Formatted text for every non-silent event, in order.
    pub fn formatted_lines(&self, engine: &BattleEngine) -> Vec<String> {
        self.events.iter().filter_map(|event| event.format(engine)).collect()
    }

    /// Return true if the event bus contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Return the number of events in the bus.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl fmt::Display for EventBus {
    /// Debug format of all events, one per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}
