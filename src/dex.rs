//! Read-only game data context.
//!
//! Species, move and type-chart tables are loaded once into a [`Dex`] and passed
//! explicitly to whatever needs them; there is no process-wide data table.

use crate::errors::{ConfigResult, ConfigurationError};
use crate::type_chart::{parse_type, TypeChart};
use schema::{BaseStats, DamageClass, MoveData, SpeciesData};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::debug;

const BUILTIN_DEX: &str = include_str!("../data/dex.ron");

#[derive(Debug, Clone, Default)]
pub struct Dex {
    species: HashMap<String, SpeciesData>,
    moves: HashMap<String, MoveData>,
    type_chart: TypeChart,
}

/// On-disk RON layout.
#[derive(Debug, Deserialize)]
struct DexFile {
    species: BTreeMap<String, SpeciesData>,
    moves: BTreeMap<String, MoveData>,
}

// --- JSON layout of the collected data files ---

#[derive(Debug, Deserialize)]
struct RawSpecies {
    types: Vec<String>,
    base_stats: RawBaseStats,
    #[serde(default)]
    moves: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawBaseStats {
    hp: u16,
    attack: u16,
    defense: u16,
    #[serde(rename = "special-attack")]
    special_attack: u16,
    #[serde(rename = "special-defense")]
    special_defense: u16,
    speed: u16,
}

#[derive(Debug, Deserialize)]
struct RawMove {
    #[serde(rename = "type")]
    element: String,
    power: Option<u16>,
    accuracy: Option<u8>,
    pp: Option<u8>,
    damage_class: DamageClass,
}

impl Dex {
    /// The data set compiled into the binary, with the standard type chart.
    pub fn builtin() -> ConfigResult<Self> {
        Self::from_ron_str(BUILTIN_DEX)
    }

    /// Parse a RON data file. Uses the standard type chart.
    pub fn from_ron_str(text: &str) -> ConfigResult<Self> {
        let file: DexFile = ron::from_str(text).map_err(|e| ConfigurationError::Parse {
            path: "dex.ron".to_string(),
            message: e.to_string(),
        })?;

        let species = file
            .species
            .into_iter()
            .map(|(key, mut data)| {
                data.name = key.clone();
                (key, data)
            })
            .collect();
        let moves = file
            .moves
            .into_iter()
            .map(|(key, mut data)| {
                data.name = key.clone();
                (key, data)
            })
            .collect();

        let dex = Self {
            species,
            moves,
            type_chart: TypeChart::standard(),
        };
        debug!(
            species = dex.species.len(),
            moves = dex.moves.len(),
            "loaded dex from RON"
        );
        Ok(dex)
    }

    /// Load `pokemon_data.json`, `moves_data.json` and `types_data.json` from `dir`.
    pub fn from_json_dir(dir: &Path) -> ConfigResult<Self> {
        let pokemon_text = read_file(&dir.join("pokemon_data.json"))?;
        let moves_text = read_file(&dir.join("moves_data.json"))?;
        let types_text = read_file(&dir.join("types_data.json"))?;
        Self::from_json_strs(&pokemon_text, &moves_text, &types_text)
    }

    pub fn from_json_strs(pokemon_json: &str, moves_json: &str, types_json: &str) -> ConfigResult<Self> {
        let raw_species: BTreeMap<String, RawSpecies> =
            serde_json::from_str(pokemon_json).map_err(|e| ConfigurationError::Parse {
                path: "pokemon_data.json".to_string(),
                message: e.to_string(),
            })?;
        let raw_moves: BTreeMap<String, RawMove> =
            serde_json::from_str(moves_json).map_err(|e| ConfigurationError::Parse {
                path: "moves_data.json".to_string(),
                message: e.to_string(),
            })?;

        let mut species = HashMap::with_capacity(raw_species.len());
        for (name, raw) in raw_species {
            let types = raw
                .types
                .iter()
                .map(|t| parse_type(t))
                .collect::<ConfigResult<Vec<_>>>()?;
            let base = raw.base_stats;
            species.insert(
                name.clone(),
                SpeciesData {
                    name,
                    types,
                    base_stats: BaseStats {
                        hp: base.hp,
                        attack: base.attack,
                        defense: base.defense,
                        special_attack: base.special_attack,
                        special_defense: base.special_defense,
                        speed: base.speed,
                    },
                    moves: raw.moves,
                },
            );
        }

        let mut moves = HashMap::with_capacity(raw_moves.len());
        for (name, raw) in raw_moves {
            moves.insert(
                name.clone(),
                MoveData {
                    name,
                    element: parse_type(&raw.element)?,
                    power: raw.power.unwrap_or(0),
                    accuracy: raw.accuracy.unwrap_or(MoveData::DEFAULT_ACCURACY),
                    pp: raw.pp.unwrap_or(MoveData::DEFAULT_PP),
                    damage_class: raw.damage_class,
                },
            );
        }

        Ok(Self {
            species,
            moves,
            type_chart: TypeChart::from_json_str(types_json)?,
        })
    }

    pub fn species(&self, name: &str) -> ConfigResult<&SpeciesData> {
        self.species
            .get(name)
            .ok_or_else(|| ConfigurationError::UnknownSpecies(name.to_string()))
    }

    pub fn move_data(&self, name: &str) -> ConfigResult<&MoveData> {
        self.moves
            .get(name)
            .ok_or_else(|| ConfigurationError::UnknownMove(name.to_string()))
    }

    pub fn type_chart(&self) -> &TypeChart {
        &self.type_chart
    }

    /// Species names in sorted order.
    pub fn species_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.species.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Every movepool entry that has no move record.
    pub fn dangling_moves(&self) -> Vec<(String, String)> {
        let mut missing = Vec::new();
        for species in self.species.values() {
            for move_name in &species.moves {
                if !self.moves.contains_key(move_name) {
                    missing.push((species.name.clone(), move_name.clone()));
                }
            }
        }
        missing.sort();
        missing
    }
}

fn read_file(path: &Path) -> ConfigResult<String> {
    fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
        path: path.display().to_string(),
        source,
    })
}
