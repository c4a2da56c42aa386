//! Battle configuration loaded from RON.
//!
//! Every field has a default, so a config file only needs to name what it
//! changes. `BattleConfig::default()` is the stock AI-vs-AI demo.

use crate::battle::ai::{Behavior, FirstMoveAI, HeuristicAI};
use crate::battle::rng::BattleRng;
use crate::battle::runner::DEFAULT_MAX_TURNS;
use crate::dex::Dex;
use crate::errors::{BattleResult, ConfigResult, ConfigurationError};
use crate::prefab_teams::{get_prefab_teams, PrefabMember, PrefabTeam};
use crate::roster::{BattleFormat, Roster};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_LEVEL: u8 = 50;

/// Which decision engine drives a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ControllerKind {
    #[default]
    Heuristic,
    FirstMove,
}

impl ControllerKind {
    pub fn behavior(&self) -> Box<dyn Behavior> {
        match self {
            ControllerKind::Heuristic => Box::new(HeuristicAI::new()),
            ControllerKind::FirstMove => Box::new(FirstMoveAI),
        }
    }
}

/// One roster entry. Moves are sampled from the movepool when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberConfig {
    pub species: String,
    #[serde(default)]
    pub moves: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideConfig {
    pub name: String,
    #[serde(default)]
    pub controller: ControllerKind,
    pub members: Vec<MemberConfig>,
}

impl SideConfig {
    fn from_prefab(team: &PrefabTeam, controller: ControllerKind) -> Self {
        Self {
            name: team.name.clone(),
            controller,
            members: team
                .members
                .iter()
                .map(|m| MemberConfig {
                    species: m.species.clone(),
                    moves: m.moves.clone(),
                })
                .collect(),
        }
    }

    pub fn to_prefab(&self, level: u8) -> PrefabTeam {
        PrefabTeam {
            id: self.name.to_lowercase(),
            name: self.name.clone(),
            description: String::new(),
            members: self
                .members
                .iter()
                .map(|m| PrefabMember {
                    species: m.species.clone(),
                    level,
                    moves: m.moves.clone(),
                })
                .collect(),
        }
    }

    pub fn build_roster(&self, dex: &Dex, format: BattleFormat, level: u8, rng: &mut dyn BattleRng) -> BattleResult<Roster> {
        self.to_prefab(level).build_roster(dex, format, rng)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    pub format: BattleFormat,
    pub level: u8,
    /// Fixed seed for reproducible runs; OS entropy when absent.
    pub seed: Option<u64>,
    pub max_turns: u32,
    /// Directory holding the JSON data files. The builtin dex is used when absent.
    pub data_dir: Option<PathBuf>,
    pub side_a: SideConfig,
    pub side_b: SideConfig,
}

impl Default for BattleConfig {
    fn default() -> Self {
        let teams = get_prefab_teams();
        // The player side stands in for the human seat: it plays its first move.
        let side = |i: usize, controller: ControllerKind| {
            teams
                .get(i)
                .map(|team| SideConfig::from_prefab(team, controller))
                .unwrap_or_else(|| SideConfig {
                    name: format!("Side {}", i + 1),
                    controller,
                    members: Vec::new(),
                })
        };

        Self {
            format: BattleFormat::Single,
            level: DEFAULT_LEVEL,
            seed: None,
            max_turns: DEFAULT_MAX_TURNS,
            data_dir: None,
            side_a: side(0, ControllerKind::FirstMove),
            side_b: side(1, ControllerKind::Heuristic),
        }
    }
}

impl BattleConfig {
    /// Load a config from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&contents, &path.display().to_string())
    }

    pub fn from_ron_str(ron: &str) -> ConfigResult<Self> {
        Self::parse(ron, "<inline>")
    }

    fn parse(ron: &str, origin: &str) -> ConfigResult<Self> {
        ron::from_str(ron).map_err(|e| ConfigurationError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// The data context this config points at.
    pub fn load_dex(&self) -> ConfigResult<Dex> {
        match &self.data_dir {
            Some(dir) => Dex::from_json_dir(dir),
            None => Dex::builtin(),
        }
    }
}
