use crate::battle::engine::BattleEngine;
use crate::battle::rng::ScriptedRng;
use crate::combatant::{Combatant, StatusCondition};
use crate::errors::BattleResult;
use crate::moves::Move;
use crate::roster::{BattleFormat, Roster, ROSTER_SIZE};
use crate::type_chart::TypeChart;
use schema::{BaseStats, DamageClass, ElementType};

/// A builder for test combatants with neutral defaults: level 50, Normal
/// type, 100 in every stat and a single 40-power Tackle.
///
/// # Example
/// ```ignore
/// let mon = TestCombatantBuilder::new("sparky")
///     .with_types(vec![ElementType::Electric])
///     .with_moves(vec![tackle()])
///     .with_hp(10)
///     .build();
/// ```
pub struct TestCombatantBuilder {
    name: String,
    level: u8,
    types: Vec<ElementType>,
    base_stats: BaseStats,
    moves: Option<Vec<Move>>,
    status: Option<StatusCondition>,
    current_hp: Option<u16>,
}

impl TestCombatantBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            level: 50,
            types: vec![ElementType::Normal],
            base_stats: BaseStats {
                hp: 100,
                attack: 100,
                defense: 100,
                special_attack: 100,
                special_defense: 100,
                speed: 100,
            },
            moves: None,
            status: None,
            current_hp: None,
        }
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub fn with_types(mut self, types: Vec<ElementType>) -> Self {
        self.types = types;
        self
    }

    /// hp, attack, defense, special attack, special defense, speed
    pub fn with_stats(mut self, hp: u16, attack: u16, defense: u16, special_attack: u16, special_defense: u16, speed: u16) -> Self {
        self.base_stats = BaseStats {
            hp,
            attack,
            defense,
            special_attack,
            special_defense,
            speed,
        };
        self
    }

    pub fn with_speed(mut self, speed: u16) -> Self {
        self.base_stats.speed = speed;
        self
    }

    pub fn with_moves(mut self, moves: Vec<Move>) -> Self {
        self.moves = Some(moves);
        self
    }

    pub fn with_status(mut self, status: StatusCondition) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn build(self) -> Combatant {
        let moves = self.moves.unwrap_or_else(|| vec![tackle()]);
        let mut combatant = match Combatant::new(&self.name, self.level, self.types, self.base_stats, moves) {
            Ok(c) => c,
            Err(err) => panic!("Failed to build test combatant {}: {}", self.name, err),
        };

        combatant.set_status(self.status);
        if let Some(hp) = self.current_hp {
            combatant.set_hp(hp);
        }
        combatant
    }
}

pub fn tackle() -> Move {
    Move::new("tackle", ElementType::Normal, 40, 100, DamageClass::Physical)
}

/// A 100-accuracy physical move of the given type and power.
pub fn strike(name: &str, element: ElementType, power: u16) -> Move {
    Move::new(name, element, power, 100, DamageClass::Physical)
}

/// Builds a roster from `members`, padding with healthy fillers up to six.
pub fn create_test_roster(name: &str, format: BattleFormat, members: Vec<Combatant>) -> Roster {
    let mut members = members;
    let mut filler = members.len();
    while members.len() < ROSTER_SIZE {
        members.push(TestCombatantBuilder::new(&format!("bench{}", filler)).build());
        filler += 1;
    }
    match Roster::new(name, members, format) {
        Ok(roster) => roster,
        Err(err) => panic!("Failed to build test roster {}: {}", name, err),
    }
}

/// Builds a roster where only `members` are healthy; padding members are fainted.
pub fn create_last_stand_roster(name: &str, format: BattleFormat, members: Vec<Combatant>) -> Roster {
    let mut members = members;
    let mut filler = members.len();
    while members.len() < ROSTER_SIZE {
        members.push(TestCombatantBuilder::new(&format!("fainted{}", filler)).with_hp(0).build());
        filler += 1;
    }
    match Roster::new(name, members, format) {
        Ok(roster) => roster,
        Err(err) => panic!("Failed to build test roster {}: {}", name, err),
    }
}

/// A single battle on the standard chart.
pub fn create_test_battle(side_a: Roster, side_b: Roster) -> BattleEngine {
    match BattleEngine::new(side_a, side_b, TypeChart::standard()) {
        Ok(engine) => engine,
        Err(err) => panic!("Failed to build test battle: {}", err),
    }
}

/// Every move hits for a 1.0 roll.
pub fn predictable_rng() -> ScriptedRng {
    ScriptedRng::always_hit()
}

/// Helper function to assert that a Result is Ok and return the value.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}
