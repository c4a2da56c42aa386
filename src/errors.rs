use crate::battle::state::Side;
use thiserror::Error;

/// Main error type for the Pokemon Arena battle engine
#[derive(Debug, Error)]
pub enum BattleEngineError {
    /// Battle or roster could not be set up
    #[error("Construction error: {0}")]
    Construction(#[from] ConstructionError),
    /// An action submitted for a side is illegal; nothing was mutated
    #[error("Invalid action for {side}: {source}")]
    Validation {
        side: Side,
        #[source]
        source: ValidationError,
    },
    /// Actions were submitted out of the required sequence
    #[error("Battle state error: {0}")]
    State(#[from] StateError),
    /// Static data lookup failed
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    /// Resolution hit a condition that the engine's invariants rule out
    #[error("Inconsistent battle state: {0}")]
    InconsistentState(String),
}

/// Fatal errors raised while assembling combatants, rosters and battles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("a roster needs exactly 6 combatants, got {found}")]
    WrongRosterSize { found: usize },
    #[error("both rosters must share a battle format (side A: {side_a}, side B: {side_b})")]
    ArityMismatch { side_a: String, side_b: String },
    #[error("roster has no combatant able to battle")]
    NoHealthyLead,
    #[error("invalid combatant: {0}")]
    InvalidCombatant(String),
}

/// Recoverable errors: the turn is rejected and the caller may resubmit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Move is not in the acting combatant's move set
    #[error("combatant {user} does not know {move_name}")]
    InvalidMove { user: usize, move_name: String },
    /// Acting combatant is fainted or not on the field
    #[error("combatant {user} is not able to act")]
    InactiveActor { user: usize },
    /// Switch target is out of range, fainted, already active or already chosen
    #[error("cannot switch to combatant {index}")]
    InvalidSwitchTarget { index: usize },
    /// Action set does not fit the battle format
    #[error("expected {expected} action(s), got {found}")]
    ArityMismatch { expected: usize, found: usize },
}

/// Recoverable sequencing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("the battle is already over")]
    BattleAlreadyOver,
    #[error("the battle is still in progress")]
    BattleNotOver,
    #[error("{side} must send a replacement into slot {slot} before acting")]
    ReplacementRequired { side: Side, slot: usize },
}

/// Fatal static-data errors. The engine never substitutes a guess.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("unknown species: {0}")]
    UnknownSpecies(String),
    #[error("unknown move: {0}")]
    UnknownMove(String),
    #[error("unknown type: {0}")]
    UnknownType(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using ConfigurationError
pub type ConfigResult<T> = Result<T, ConfigurationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_names_the_side() {
        let err = BattleEngineError::Validation {
            side: Side::B,
            source: ValidationError::InactiveActor { user: 3 },
        };
        assert_eq!(
            err.to_string(),
            "Invalid action for side B: combatant 3 is not able to act"
        );
    }

    #[test]
    fn test_from_conversions() {
        let err: BattleEngineError = StateError::BattleAlreadyOver.into();
        assert!(matches!(err, BattleEngineError::State(StateError::BattleAlreadyOver)));

        let err: BattleEngineError = ConstructionError::WrongRosterSize { found: 5 }.into();
        assert_eq!(
            err.to_string(),
            "Construction error: a roster needs exactly 6 combatants, got 5"
        );
    }
}
