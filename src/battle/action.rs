use serde::{Deserialize, Serialize};
use std::fmt;

/// One side's choice for one active slot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// `user` is the acting combatant's roster index; `target_slot` selects
    /// the opposing active slot (always 0 in single battles).
    Move {
        user: usize,
        move_name: String,
        target_slot: usize,
    },
    /// Send roster member `target_index` into active `slot`.
    Switch { slot: usize, target_index: usize },
}

impl Action {
    /// Attack the opposing slot 0.
    pub fn attack(user: usize, move_name: &str) -> Self {
        Self::attack_slot(user, move_name, 0)
    }

    pub fn attack_slot(user: usize, move_name: &str, target_slot: usize) -> Self {
        Action::Move {
            user,
            move_name: move_name.to_string(),
            target_slot,
        }
    }

    /// Switch into slot 0.
    pub fn switch_to(target_index: usize) -> Self {
        Self::switch_into(0, target_index)
    }

    pub fn switch_into(slot: usize, target_index: usize) -> Self {
        Action::Switch { slot, target_index }
    }

    pub fn is_switch(&self) -> bool {
        matches!(self, Action::Switch { .. })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move {
                user,
                move_name,
                target_slot,
            } => write!(f, "#{} uses {} on slot {}", user, move_name, target_slot),
            Action::Switch { slot, target_index } => {
                write!(f, "switch #{} into slot {}", target_index, slot)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_battle_helpers_use_slot_zero() {
        assert_eq!(
            Action::attack(2, "surf"),
            Action::Move {
                user: 2,
                move_name: "surf".to_string(),
                target_slot: 0
            }
        );
        assert_eq!(Action::switch_to(4), Action::Switch { slot: 0, target_index: 4 });
        assert!(Action::switch_to(4).is_switch());
        assert!(!Action::attack(2, "surf").is_switch());
    }

    #[test]
    fn test_display() {
        assert_eq!(Action::attack_slot(1, "ember", 1).to_string(), "#1 uses ember on slot 1");
        assert_eq!(Action::switch_into(1, 3).to_string(), "switch #3 into slot 1");
    }
}
