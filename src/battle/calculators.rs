use crate::battle::rng::BattleRng;
use crate::battle::stats::{effective_attack, effective_defense, move_hits};
use crate::combatant::Combatant;
use crate::moves::Move;
use crate::type_chart::TypeChart;

/// Result of one attack attempt against a present target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackOutcome {
    Missed,
    Hit { damage: u32, multiplier: f64 },
}

/// Roll accuracy, then damage if the move connects.
///
/// Draws exactly one accuracy roll, plus one damage roll when the move hits
/// and is not a status move.
pub fn calculate_attack_outcome(
    attacker: &Combatant,
    defender: &Combatant,
    move_used: &Move,
    type_chart: &TypeChart,
    rng: &mut dyn BattleRng,
) -> AttackOutcome {
    if !move_hits(move_used, rng) {
        return AttackOutcome::Missed;
    }

    AttackOutcome::Hit {
        damage: compute_damage(attacker, defender, move_used, type_chart, rng),
        multiplier: type_multiplier(move_used, defender, type_chart),
    }
}

/// Damage dealt by one move, truncated to an integer.
///
/// `((2 * level / 5 + 2) * power * (atk / def) / 50 + 2) * roll * type_multiplier`
///
/// Status moves deal 0 and draw no damage roll.
pub fn compute_damage(
    attacker: &Combatant,
    defender: &Combatant,
    move_used: &Move,
    type_chart: &TypeChart,
    rng: &mut dyn BattleRng,
) -> u32 {
    let Some(base) = base_damage(attacker, defender, move_used) else {
        return 0;
    };

    let roll = rng.damage_roll();
    let multiplier = type_multiplier(move_used, defender, type_chart);

    (base * roll * multiplier).max(0.0) as u32
}

/// The deterministic part of the damage formula, before roll and type.
pub fn base_damage(attacker: &Combatant, defender: &Combatant, move_used: &Move) -> Option<f64> {
    let class = move_used.damage_class();
    let attack = effective_attack(attacker, class)?;
    // A zero defense stat would divide by zero.
    let defense = effective_defense(defender, class)?.max(1.0);

    let level_factor = 2.0 * attacker.level() as f64 / 5.0 + 2.0;
    Some(level_factor * move_used.power() as f64 * (attack / defense) / 50.0 + 2.0)
}

/// Product of the move type's multiplier against each defender type.
pub fn type_multiplier(move_used: &Move, defender: &Combatant, type_chart: &TypeChart) -> f64 {
    type_chart.multiplier_against(move_used.element(), defender.types())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::rng::ScriptedRng;
    use crate::battle::tests::common::TestCombatantBuilder;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use schema::{DamageClass, ElementType, StatKind};

    fn strike(element: ElementType, power: u16) -> Move {
        Move::new("strike", element, power, 100, DamageClass::Physical)
    }

    #[test]
    fn test_neutral_power_80_at_level_50() {
        // (2*50/5 + 2) * 80 * 1 / 50 + 2 = 37.2
        let attacker = TestCombatantBuilder::new("attacker").build();
        let defender = TestCombatantBuilder::new("defender").build();
        let mut rng = ScriptedRng::new().with_damage(vec![1.0]);

        let damage = compute_damage(
            &attacker,
            &defender,
            &strike(ElementType::Normal, 80),
            &TypeChart::standard(),
            &mut rng,
        );
        assert_eq!(damage, 37);
    }

    #[test]
    fn test_status_move_deals_zero_without_rolling() {
        let attacker = TestCombatantBuilder::new("attacker").build();
        let defender = TestCombatantBuilder::new("defender").build();
        let growl = Move::new("growl", ElementType::Normal, 0, 100, DamageClass::Status);
        // An empty script panics on any draw.
        let mut rng = ScriptedRng::new();

        assert_eq!(
            compute_damage(&attacker, &defender, &growl, &TypeChart::standard(), &mut rng),
            0
        );
    }

    #[test]
    fn test_dual_weakness_compounds() {
        let attacker = TestCombatantBuilder::new("attacker").build();
        let defender = TestCombatantBuilder::new("defender")
            .with_types(vec![ElementType::Dragon, ElementType::Flying])
            .build();
        let chart = TypeChart::standard();
        let ice = strike(ElementType::Ice, 80);

        assert_eq!(type_multiplier(&ice, &defender, &chart), 4.0);
        let mut rng = ScriptedRng::new().with_damage(vec![1.0]);
        // 37.2 * 4.0 = 148.8
        assert_eq!(compute_damage(&attacker, &defender, &ice, &chart, &mut rng), 148);
    }

    #[test]
    fn test_immunity_deals_zero() {
        let attacker = TestCombatantBuilder::new("attacker").build();
        let defender = TestCombatantBuilder::new("defender")
            .with_types(vec![ElementType::Ghost])
            .build();
        let mut rng = ScriptedRng::new().with_damage(vec![1.0]);
        assert_eq!(
            compute_damage(
                &attacker,
                &defender,
                &strike(ElementType::Normal, 80),
                &TypeChart::standard(),
                &mut rng
            ),
            0
        );
    }

    #[test]
    fn test_roll_and_stages_scale_damage() {
        let mut attacker = TestCombatantBuilder::new("attacker").build();
        attacker.set_stat_stage(StatKind::Attack, 2);
        let defender = TestCombatantBuilder::new("defender").build();
        let chart = TypeChart::neutral();
        let mv = strike(ElementType::Normal, 80);

        // atk/def = 2.0: 22 * 80 * 2 / 50 + 2 = 72.4, times 0.85 = 61.54
        let mut rng = ScriptedRng::new().with_damage(vec![0.85]);
        assert_eq!(compute_damage(&attacker, &defender, &mv, &chart, &mut rng), 61);
    }

    #[test]
    fn test_special_moves_use_special_stats() {
        let attacker = TestCombatantBuilder::new("attacker")
            .with_stats(100, 10, 100, 200, 100, 100)
            .build();
        let defender = TestCombatantBuilder::new("defender")
            .with_stats(100, 100, 100, 100, 50, 100)
            .build();
        let beam = Move::new("beam", ElementType::Normal, 50, 100, DamageClass::Special);

        // 22 * 50 * (200 / 50) / 50 + 2 = 90
        assert_eq!(base_damage(&attacker, &defender, &beam), Some(90.0));
    }

    #[test]
    fn test_attack_outcome_miss_draws_no_damage_roll() {
        let attacker = TestCombatantBuilder::new("attacker").build();
        let defender = TestCombatantBuilder::new("defender").build();
        let mv = Move::new("stone", ElementType::Rock, 100, 80, DamageClass::Physical);
        let mut rng = ScriptedRng::new().with_accuracy(vec![81]);

        let outcome = calculate_attack_outcome(&attacker, &defender, &mv, &TypeChart::standard(), &mut rng);
        assert_eq!(outcome, AttackOutcome::Missed);
    }

    #[test]
    fn test_attack_outcome_hit_reports_multiplier() {
        let attacker = TestCombatantBuilder::new("attacker").build();
        let defender = TestCombatantBuilder::new("defender")
            .with_types(vec![ElementType::Fire])
            .build();
        let mv = strike(ElementType::Water, 80);
        let mut rng = ScriptedRng::new().with_accuracy(vec![100]).with_damage(vec![1.0]);

        let outcome = calculate_attack_outcome(&attacker, &defender, &mv, &TypeChart::standard(), &mut rng);
        // 37.2 * 2.0 = 74.4
        assert_eq!(
            outcome,
            AttackOutcome::Hit {
                damage: 74,
                multiplier: 2.0
            }
        );
    }

    proptest! {
        #[test]
        fn prop_damage_is_bounded_by_roll_range(
            power in 0u16..=250,
            atk in 1u16..=255,
            def in 1u16..=255,
            level in 1u8..=100,
            roll in 0.85f64..=1.0,
        ) {
            let attacker = TestCombatantBuilder::new("attacker")
                .with_level(level)
                .with_stats(100, atk, 100, 100, 100, 100)
                .build();
            let defender = TestCombatantBuilder::new("defender")
                .with_stats(100, 100, def, 100, 100, 100)
                .build();
            let mv = strike(ElementType::Normal, power);
            let chart = TypeChart::neutral();

            let mut low = ScriptedRng::new().with_damage(vec![0.85]);
            let mut mid = ScriptedRng::new().with_damage(vec![roll]);
            let mut high = ScriptedRng::new().with_damage(vec![1.0]);

            let d_low = compute_damage(&attacker, &defender, &mv, &chart, &mut low);
            let d_mid = compute_damage(&attacker, &defender, &mv, &chart, &mut mid);
            let d_high = compute_damage(&attacker, &defender, &mv, &chart, &mut high);
            prop_assert!(d_low <= d_mid && d_mid <= d_high);
            // The constant +2 term keeps every damaging hit at 1 or more.
            prop_assert!(d_low >= 1);
        }
    }
}
