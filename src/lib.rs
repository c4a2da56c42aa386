// In: src/lib.rs

//! Pokemon Arena Battle Engine
//!
//! A turn-based creature battle engine: two six-member rosters, single or
//! double format, simultaneous action submission, speed-ordered resolution
//! and a heuristic decision engine for AI-controlled sides. All randomness is
//! injected so battles replay exactly.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod combatant;
pub mod config;
pub mod dex;
pub mod errors;
pub mod moves;
pub mod prefab_teams;
pub mod roster;
pub mod type_chart;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{BaseStats, DamageClass, ElementType, MoveData, SpeciesData, StatKind};

// --- From this crate's modules (`src/`) ---

// Core battle engine and state.
pub use battle::action::Action;
pub use battle::engine::BattleEngine;
pub use battle::state::{BattleEvent, BattleOutcome, BattlePhase, EventBus, Side};

// Decision engines and the driver that pairs them with an engine.
pub use battle::ai::{Behavior, FirstMoveAI, HeuristicAI, RandomTarget, TargetStrategy};
pub use battle::runner::{BattleRunner, RunSummary};

// Randomness.
pub use battle::rng::{BattleRng, ScriptedRng, SeededRng};

// Core runtime types for a battle.
pub use combatant::{Combatant, StatusCondition};
pub use moves::Move;
pub use roster::{BattleFormat, Roster};

// Static data access.
pub use config::BattleConfig;
pub use dex::Dex;
pub use type_chart::TypeChart;

// Crate-specific error and result types.
pub use errors::{
    BattleEngineError, BattleResult, ConfigResult, ConfigurationError, ConstructionError, StateError,
    ValidationError,
};
