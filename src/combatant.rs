use crate::battle::rng::BattleRng;
use crate::dex::Dex;
use crate::errors::{BattleResult, ConstructionError};
use crate::moves::Move;
use schema::{BaseStats, ElementType, StatKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::IntoEnumIterator;

pub const MAX_MOVES: usize = 4;
pub const MAX_STAGE: i8 = 6;
pub const MIN_STAGE: i8 = -6;

/// Persistent status ailment. Carried for display; it has no mechanical effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCondition {
    Burn,
    Freeze,
    Paralysis,
    Poison,
    Sleep,
}

/// Runtime state of one creature for the duration of a battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    name: String,
    level: u8,
    types: Vec<ElementType>,
    moves: Vec<Move>,
    base_stats: BaseStats,
    max_hp: u16,
    current_hp: u16,
    status: Option<StatusCondition>,
    // Every StatKind is present from construction, value in [-6, 6].
    stat_stages: HashMap<StatKind, i8>,
}

impl Combatant {
    /// Create a combatant at full health with all stages at 0.
    pub fn new(
        name: &str,
        level: u8,
        types: Vec<ElementType>,
        base_stats: BaseStats,
        moves: Vec<Move>,
    ) -> Result<Self, ConstructionError> {
        if level == 0 || level > 100 {
            return Err(ConstructionError::InvalidCombatant(format!(
                "{} has level {}, expected 1-100",
                name, level
            )));
        }
        if types.is_empty() || types.len() > 2 {
            return Err(ConstructionError::InvalidCombatant(format!(
                "{} has {} types, expected 1 or 2",
                name,
                types.len()
            )));
        }
        if moves.is_empty() || moves.len() > MAX_MOVES {
            return Err(ConstructionError::InvalidCombatant(format!(
                "{} has {} moves, expected 1-{}",
                name,
                moves.len(),
                MAX_MOVES
            )));
        }

        let max_hp = Self::calculate_max_hp(base_stats.hp, level);

        Ok(Combatant {
            name: name.to_string(),
            level,
            types,
            moves,
            base_stats,
            max_hp,
            current_hp: max_hp,
            status: None,
            stat_stages: StatKind::iter().map(|stat| (stat, 0)).collect(),
        })
    }

    /// Create a combatant from species data with up to four moves sampled from
    /// its movepool.
    pub fn from_name(dex: &Dex, name: &str, level: u8, rng: &mut dyn BattleRng) -> BattleResult<Self> {
        let species = dex.species(name)?;

        let mut pool: Vec<&String> = species.moves.iter().collect();
        let mut chosen = Vec::new();
        while chosen.len() < MAX_MOVES && !pool.is_empty() {
            let pick = rng.choose_index(pool.len());
            chosen.push(Move::from_name(dex, pool.swap_remove(pick))?);
        }

        Ok(Self::new(
            &species.name,
            level,
            species.types.clone(),
            species.base_stats,
            chosen,
        )?)
    }

    /// Create a combatant from species data with an explicit move list.
    pub fn with_moves(dex: &Dex, name: &str, level: u8, move_names: &[&str]) -> BattleResult<Self> {
        let species = dex.species(name)?;
        let moves = move_names
            .iter()
            .map(|m| Move::from_name(dex, m))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(
            &species.name,
            level,
            species.types.clone(),
            species.base_stats,
            moves,
        )?)
    }

    /// floor(base_hp * 2 * level / 100) + level + 10
    pub fn calculate_max_hp(base_hp: u16, level: u8) -> u16 {
        let level = level as u32;
        let hp = (base_hp as u32 * 2 * level) / 100 + level + 10;
        hp.min(u16::MAX as u32) as u16
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn types(&self) -> &[ElementType] {
        &self.types
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// The known move with this name, if any.
    pub fn find_move(&self, move_name: &str) -> Option<&Move> {
        self.moves.iter().find(|m| m.name() == move_name)
    }

    pub fn base_stats(&self) -> &BaseStats {
        &self.base_stats
    }

    /// Unscaled stat value. Accuracy and evasion have no raw value.
    pub fn raw_stat(&self, stat: StatKind) -> Option<u16> {
        match stat {
            StatKind::Attack => Some(self.base_stats.attack),
            StatKind::Defense => Some(self.base_stats.defense),
            StatKind::SpecialAttack => Some(self.base_stats.special_attack),
            StatKind::SpecialDefense => Some(self.base_stats.special_defense),
            StatKind::Speed => Some(self.base_stats.speed),
            StatKind::Accuracy | StatKind::Evasion => None,
        }
    }

    pub fn max_hp(&self) -> u16 {
        self.max_hp
    }

    pub fn current_hp(&self) -> u16 {
        self.current_hp
    }

    pub fn hp_fraction(&self) -> f64 {
        self.current_hp as f64 / self.max_hp as f64
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    /// Subtract damage, clamped at 0. Returns the amount actually removed.
    pub fn take_damage(&mut self, damage: u16) -> u16 {
        let dealt = damage.min(self.current_hp);
        self.current_hp -= dealt;
        dealt
    }

    /// Restore health, clamped at max. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u16) -> u16 {
        let restored = amount.min(self.max_hp - self.current_hp);
        self.current_hp += restored;
        restored
    }

    /// Set current HP directly, clamped to [0, max_hp].
    pub fn set_hp(&mut self, hp: u16) {
        self.current_hp = hp.min(self.max_hp);
    }

    pub fn status(&self) -> Option<StatusCondition> {
        self.status
    }

    pub fn set_status(&mut self, status: Option<StatusCondition>) {
        self.status = status;
    }

    // === Stat Stage Management ===

    pub fn stat_stage(&self, stat: StatKind) -> i8 {
        self.stat_stages.get(&stat).copied().unwrap_or(0)
    }

    /// Set the stage for a stat (clamped to -6 to +6)
    pub fn set_stat_stage(&mut self, stat: StatKind, stage: i8) {
        self.stat_stages.insert(stat, stage.clamp(MIN_STAGE, MAX_STAGE));
    }

    /// Modify the stage by a delta (clamped to -6 to +6). Returns the new stage.
    pub fn modify_stat_stage(&mut self, stat: StatKind, delta: i8) -> i8 {
        let new_stage = self.stat_stage(stat).saturating_add(delta);
        self.set_stat_stage(stat, new_stage);
        self.stat_stage(stat)
    }

    pub fn reset_stat_stages(&mut self) {
        for stage in self.stat_stages.values_mut() {
            *stage = 0;
        }
    }

    pub fn stat_stages(&self) -> &HashMap<StatKind, i8> {
        &self.stat_stages
    }
}
