use crate::battle::ai::Behavior;
use crate::battle::engine::BattleEngine;
use crate::battle::rng::BattleRng;
use crate::battle::state::{BattleEvent, BattleOutcome, BattlePhase, EventBus, Side};
use crate::combatant::StatusCondition;
use crate::errors::BattleResult;
use tracing::{info, warn};

pub const DEFAULT_MAX_TURNS: u32 = 500;

/// Drives a [`BattleEngine`] with one controller per side.
pub struct BattleRunner {
    engine: BattleEngine,
    controllers: [Box<dyn Behavior>; 2],
    accumulated_events: EventBus,
    max_turns: u32,
}

/// Information about the current battle state for display
#[derive(Debug, Clone)]
pub struct BattleInfo {
    pub turn_number: u32,
    pub phase: BattlePhase,
    pub sides: Vec<SideInfo>,
}

/// Information about one side of the battle
#[derive(Debug, Clone)]
pub struct SideInfo {
    pub side: Side,
    pub name: String,
    pub active: Vec<Option<CombatantInfo>>,
    pub team: Vec<CombatantInfo>,
    pub fainted_count: usize,
}

/// Information about a combatant for display
#[derive(Debug, Clone, PartialEq)]
pub struct CombatantInfo {
    pub name: String,
    pub level: u8,
    pub current_hp: u16,
    pub max_hp: u16,
    pub is_fainted: bool,
    pub status: Option<StatusCondition>,
}

/// Result of executing one turn
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub events: Vec<BattleEvent>,
    pub phase: BattlePhase,
    pub battle_ended: bool,
    pub winner: Option<Side>,
}

/// How a full run finished
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// `None` when the turn limit was reached first.
    pub outcome: Option<BattleOutcome>,
    pub turns: u32,
}

impl BattleRunner {
    pub fn new(engine: BattleEngine, side_a: Box<dyn Behavior>, side_b: Box<dyn Behavior>) -> Self {
        Self {
            engine,
            controllers: [side_a, side_b],
            accumulated_events: EventBus::new(),
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn engine(&self) -> &BattleEngine {
        &self.engine
    }

    /// Every event produced so far, across turns.
    pub fn events(&self) -> &EventBus {
        &self.accumulated_events
    }

    pub fn is_battle_ended(&self) -> bool {
        self.engine.is_over()
    }

    /// Ask both controllers for actions and resolve one turn.
    pub fn step(&mut self, rng: &mut dyn BattleRng) -> BattleResult<ExecutionResult> {
        let [a, b] = Side::both().map(|side| {
            self.controllers[side.index()].choose_actions(
                self.engine.roster(side),
                self.engine.roster(side.opponent()),
                self.engine.type_chart(),
                rng,
            )
        });

        let turn_before = self.engine.turn();
        let bus = match self.engine.execute_turn(&a, &b, rng) {
            Ok(bus) => bus,
            Err(e) => {
                // A turn that failed after resolution began still produced events.
                if self.engine.turn() > turn_before {
                    self.accumulated_events.extend(self.engine.last_turn_events().clone());
                }
                return Err(e);
            }
        };
        let events = bus.events().to_vec();
        self.accumulated_events.extend(bus);

        Ok(ExecutionResult {
            events,
            phase: self.engine.phase().clone(),
            battle_ended: self.engine.is_over(),
            winner: self.engine.winner().ok().flatten(),
        })
    }

    /// Step until the battle ends or the turn limit is reached.
    pub fn run(&mut self, rng: &mut dyn BattleRng) -> BattleResult<RunSummary> {
        while !self.engine.is_over() && self.engine.turn() < self.max_turns {
            self.step(rng)?;
        }

        let outcome = self.engine.outcome();
        match outcome {
            Some(outcome) => info!(turns = self.engine.turn(), ?outcome, "run finished"),
            None => warn!(max_turns = self.max_turns, "turn limit reached"),
        }

        Ok(RunSummary {
            outcome,
            turns: self.engine.turn(),
        })
    }

    /// Snapshot of both sides for display.
    pub fn battle_info(&self) -> BattleInfo {
        let sides = Side::both()
            .into_iter()
            .map(|side| {
                let roster = self.engine.roster(side);
                let team: Vec<CombatantInfo> = roster
                    .members()
                    .iter()
                    .map(|c| CombatantInfo {
                        name: c.name().to_string(),
                        level: c.level(),
                        current_hp: c.current_hp(),
                        max_hp: c.max_hp(),
                        is_fainted: c.is_fainted(),
                        status: c.status(),
                    })
                    .collect();
                let active = roster
                    .active_slots()
                    .iter()
                    .map(|entry| entry.and_then(|i| team.get(i).cloned()))
                    .collect();

                SideInfo {
                    side,
                    name: roster.name().to_string(),
                    active,
                    fainted_count: team.iter().filter(|c| c.is_fainted).count(),
                    team,
                }
            })
            .collect();

        BattleInfo {
            turn_number: self.engine.turn(),
            phase: self.engine.phase().clone(),
            sides,
        }
    }
}
