pub mod action;
pub mod ai;
pub mod calculators;
pub mod engine;
pub mod rng;
pub mod runner;
pub mod state;
pub mod stats;
pub mod validation;

#[cfg(test)]
pub(crate) mod tests;
