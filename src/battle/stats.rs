use crate::battle::rng::BattleRng;
use crate::combatant::Combatant;
use crate::moves::Move;
use schema::{DamageClass, StatKind};

/// Apply stat stage scaling to a raw stat.
/// Positive stages: raw * (2 + stage) / 2
/// Negative stages: raw * 2 / (2 - stage)
pub fn apply_stage(raw: f64, stage: i8) -> f64 {
    match stage {
        0 => raw,
        s if s > 0 => raw * (2.0 + s as f64) / 2.0,
        s => raw * 2.0 / (2.0 - s as f64),
    }
}

/// Stage-scaled offensive stat for a damage class. Status moves use none.
pub fn effective_attack(combatant: &Combatant, class: DamageClass) -> Option<f64> {
    let stat = match class {
        DamageClass::Physical => StatKind::Attack,
        DamageClass::Special => StatKind::SpecialAttack,
        DamageClass::Status => return None,
    };
    effective_stat(combatant, stat)
}

/// Stage-scaled defensive stat for a damage class. Status moves use none.
pub fn effective_defense(combatant: &Combatant, class: DamageClass) -> Option<f64> {
    let stat = match class {
        DamageClass::Physical => StatKind::Defense,
        DamageClass::Special => StatKind::SpecialDefense,
        DamageClass::Status => return None,
    };
    effective_stat(combatant, stat)
}

/// Stage-scaled speed used for turn order.
pub fn effective_speed(combatant: &Combatant) -> f64 {
    apply_stage(combatant.base_stats().speed as f64, combatant.stat_stage(StatKind::Speed))
}

fn effective_stat(combatant: &Combatant, stat: StatKind) -> Option<f64> {
    combatant
        .raw_stat(stat)
        .map(|raw| apply_stage(raw as f64, combatant.stat_stage(stat)))
}

/// Roll accuracy for a move. The move misses when the roll exceeds its
/// accuracy; accuracy and evasion stages are not applied.
pub fn move_hits(move_used: &Move, rng: &mut dyn BattleRng) -> bool {
    rng.accuracy_roll() <= move_used.accuracy()
}
