//! Injectable random sources.
//!
//! The engine never reaches for a global generator; every roll goes through a
//! [`BattleRng`] handed in by the caller so tests can replay exact sequences.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

pub const DAMAGE_ROLL_MIN: f64 = 0.85;
pub const DAMAGE_ROLL_MAX: f64 = 1.0;

pub trait BattleRng {
    /// Uniform integer in [1, 100].
    fn accuracy_roll(&mut self) -> u8;

    /// Uniform factor in [0.85, 1.00].
    fn damage_roll(&mut self) -> f64;

    /// Uniform index in [0, len). `len` must be non-zero.
    fn choose_index(&mut self, len: usize) -> usize;
}

/// Production source backed by `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededRng {
    inner: StdRng,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_os_rng(),
        }
    }
}

impl BattleRng for SeededRng {
    fn accuracy_roll(&mut self) -> u8 {
        self.inner.random_range(1..=100)
    }

    fn damage_roll(&mut self) -> f64 {
        self.inner.random_range(DAMAGE_ROLL_MIN..=DAMAGE_ROLL_MAX)
    }

    fn choose_index(&mut self, len: usize) -> usize {
        self.inner.random_range(0..len)
    }
}

/// Replays fixed outcomes in order. Panics when a queue runs dry so a test that
/// consumes more randomness than it scripted fails loudly.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    accuracy: VecDeque<u8>,
    damage: VecDeque<f64>,
    choices: VecDeque<usize>,
    /// Used once the damage queue is empty, if set.
    fixed_damage: Option<f64>,
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every move hits and every damage roll is 1.0. Choice queue stays empty.
    pub fn always_hit() -> Self {
        Self::new().with_fixed_damage(1.0).with_accuracy(vec![1; 256])
    }

    pub fn with_accuracy(mut self, outcomes: Vec<u8>) -> Self {
        self.accuracy.extend(outcomes);
        self
    }

    pub fn with_damage(mut self, outcomes: Vec<f64>) -> Self {
        self.damage.extend(outcomes);
        self
    }

    pub fn with_fixed_damage(mut self, roll: f64) -> Self {
        self.fixed_damage = Some(roll);
        self
    }

    pub fn with_choices(mut self, outcomes: Vec<usize>) -> Self {
        self.choices.extend(outcomes);
        self
    }
}

impl BattleRng for ScriptedRng {
    fn accuracy_roll(&mut self) -> u8 {
        match self.accuracy.pop_front() {
            Some(outcome) => outcome,
            None => panic!("ScriptedRng exhausted! Tried to get a value for: 'accuracy roll'."),
        }
    }

    fn damage_roll(&mut self) -> f64 {
        match self.damage.pop_front().or(self.fixed_damage) {
            Some(outcome) => outcome,
            None => panic!("ScriptedRng exhausted! Tried to get a value for: 'damage roll'."),
        }
    }

    fn choose_index(&mut self, len: usize) -> usize {
        match self.choices.pop_front() {
            Some(outcome) => outcome % len,
            None => panic!(
                "ScriptedRng exhausted! Tried to get a value for: 'choice among {}'.",
                len
            ),
        }
    }
}
