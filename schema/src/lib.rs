// Pokemon Arena Schema - Shared type definitions
// Static data records shared by the engine and the data loaders. Nothing in here
// carries battle state; these are read once and never mutated.

pub use move_types::*;
pub use pokemon_types::*;
pub use species_data::*;

pub mod move_types;
pub mod pokemon_types;
pub mod species_data;
