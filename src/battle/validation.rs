//! Legality checks for a side's action set. Nothing here mutates state.

use crate::battle::action::Action;
use crate::errors::ValidationError;
use crate::roster::{Roster, ROSTER_SIZE};
use std::collections::HashSet;

/// Validate one side's actions against its own roster.
///
/// A legal set holds exactly one action per acting slot (every occupied slot
/// plus every vacancy that can be refilled), where vacancies only take
/// switches.
pub fn validate_actions(roster: &Roster, actions: &[Action]) -> Result<(), ValidationError> {
    let acting_slots = roster.acting_slots();
    let slot_count = roster.format().slot_count();

    if actions.len() != acting_slots.len() {
        return Err(ValidationError::ArityMismatch {
            expected: acting_slots.len(),
            found: actions.len(),
        });
    }

    let mut claimed_slots = HashSet::new();
    let mut switch_targets = HashSet::new();

    for action in actions {
        let slot = match action {
            Action::Move {
                user,
                move_name,
                target_slot,
            } => {
                validate_move(roster, *user, move_name)?;
                if *target_slot >= slot_count {
                    return Err(ValidationError::ArityMismatch {
                        expected: slot_count,
                        found: target_slot + 1,
                    });
                }
                roster
                    .slot_of(*user)
                    .ok_or(ValidationError::InactiveActor { user: *user })?
            }
            Action::Switch { slot, target_index } => {
                if *slot >= slot_count {
                    return Err(ValidationError::ArityMismatch {
                        expected: slot_count,
                        found: slot + 1,
                    });
                }
                validate_switch(roster, *target_index)?;
                if !switch_targets.insert(*target_index) {
                    return Err(ValidationError::InvalidSwitchTarget { index: *target_index });
                }
                *slot
            }
        };

        if !acting_slots.contains(&slot) || !claimed_slots.insert(slot) {
            return Err(ValidationError::ArityMismatch {
                expected: acting_slots.len(),
                found: actions.len(),
            });
        }
    }

    Ok(())
}

/// The user must be an active, healthy member that knows the move.
pub fn validate_move(roster: &Roster, user: usize, move_name: &str) -> Result<(), ValidationError> {
    let combatant = roster
        .member(user)
        .filter(|c| !c.is_fainted() && roster.is_active(user))
        .ok_or(ValidationError::InactiveActor { user })?;

    if combatant.find_move(move_name).is_none() {
        return Err(ValidationError::InvalidMove {
            user,
            move_name: move_name.to_string(),
        });
    }
    Ok(())
}

/// The target must be in range, healthy and on the bench.
pub fn validate_switch(roster: &Roster, target_index: usize) -> Result<(), ValidationError> {
    let valid = target_index < ROSTER_SIZE
        && roster.member(target_index).is_some_and(|c| !c.is_fainted())
        && !roster.is_active(target_index);

    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidSwitchTarget { index: target_index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::{create_test_roster, TestCombatantBuilder};
    use crate::roster::BattleFormat;
    use pretty_assertions::assert_eq;

    fn single() -> Roster {
        create_test_roster(
            "side",
            BattleFormat::Single,
            vec![
                TestCombatantBuilder::new("lead").build(),
                TestCombatantBuilder::new("fainted").with_hp(0).build(),
            ],
        )
    }

    #[test]
    fn test_single_move_and_switch_are_legal() {
        let roster = single();
        assert_eq!(validate_actions(&roster, &[Action::attack(0, "tackle")]), Ok(()));
        assert_eq!(validate_actions(&roster, &[Action::switch_to(2)]), Ok(()));
    }

    #[test]
    fn test_unknown_move_is_rejected() {
        let roster = single();
        assert_eq!(
            validate_actions(&roster, &[Action::attack(0, "hyper-beam")]),
            Err(ValidationError::InvalidMove {
                user: 0,
                move_name: "hyper-beam".to_string()
            })
        );
    }

    #[test]
    fn test_benched_or_fainted_actor_is_rejected() {
        let roster = single();
        assert_eq!(
            validate_actions(&roster, &[Action::attack(2, "tackle")]),
            Err(ValidationError::InactiveActor { user: 2 })
        );
        assert_eq!(
            validate_actions(&roster, &[Action::attack(1, "tackle")]),
            Err(ValidationError::InactiveActor { user: 1 })
        );
        assert_eq!(
            validate_actions(&roster, &[Action::attack(9, "tackle")]),
            Err(ValidationError::InactiveActor { user: 9 })
        );
    }

    #[test]
    fn test_bad_switch_targets_are_rejected() {
        let roster = single();
        for index in [0, 1, 6] {
            assert_eq!(
                validate_actions(&roster, &[Action::switch_to(index)]),
                Err(ValidationError::InvalidSwitchTarget { index })
            );
        }
    }

    #[test]
    fn test_wrong_action_count_is_arity_mismatch() {
        let roster = single();
        assert_eq!(
            validate_actions(&roster, &[]),
            Err(ValidationError::ArityMismatch { expected: 1, found: 0 })
        );
        assert_eq!(
            validate_actions(&roster, &[Action::attack(0, "tackle"), Action::switch_to(2)]),
            Err(ValidationError::ArityMismatch { expected: 1, found: 2 })
        );
    }

    #[test]
    fn test_double_target_slot_out_of_range_in_single() {
        let roster = single();
        assert_eq!(
            validate_actions(&roster, &[Action::attack_slot(0, "tackle", 1)]),
            Err(ValidationError::ArityMismatch { expected: 1, found: 2 })
        );
    }

    #[test]
    fn test_double_needs_one_action_per_slot() {
        let roster = create_test_roster("side", BattleFormat::Double, vec![]);
        assert_eq!(
            validate_actions(
                &roster,
                &[Action::attack_slot(0, "tackle", 1), Action::switch_into(1, 3)]
            ),
            Ok(())
        );
        // Both actions claim slot 0.
        assert_eq!(
            validate_actions(&roster, &[Action::attack(0, "tackle"), Action::switch_into(0, 3)]),
            Err(ValidationError::ArityMismatch { expected: 2, found: 2 })
        );
        // Same bench member sent into both slots.
        assert_eq!(
            validate_actions(&roster, &[Action::switch_into(0, 4), Action::switch_into(1, 4)]),
            Err(ValidationError::InvalidSwitchTarget { index: 4 })
        );
    }
}
