use crate::battle::rng::BattleRng;
use crate::combatant::Combatant;
use crate::dex::Dex;
use crate::errors::BattleResult;
use crate::roster::{BattleFormat, Roster};
use serde::{Deserialize, Serialize};

pub const PLAYER_TEAM_ID: &str = "player_team";
pub const OPPONENT_TEAM_ID: &str = "opponent_team";

/// A predefined team configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrefabTeam {
    pub id: String,
    pub name: String,
    pub description: String,
    pub members: Vec<PrefabMember>,
}

/// A predefined combatant. An empty move list means "sample from the movepool".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrefabMember {
    pub species: String,
    pub level: u8,
    #[serde(default)]
    pub moves: Vec<String>,
}

impl PrefabMember {
    pub fn new(species: &str, level: u8) -> Self {
        Self {
            species: species.to_string(),
            level,
            moves: Vec::new(),
        }
    }

    pub fn build(&self, dex: &Dex, rng: &mut dyn BattleRng) -> BattleResult<Combatant> {
        if self.moves.is_empty() {
            Combatant::from_name(dex, &self.species, self.level, rng)
        } else {
            let moves: Vec<&str> = self.moves.iter().map(String::as_str).collect();
            Combatant::with_moves(dex, &self.species, self.level, &moves)
        }
    }
}

impl PrefabTeam {
    /// Build every member and assemble a roster named after the team.
    pub fn build_roster(&self, dex: &Dex, format: BattleFormat, rng: &mut dyn BattleRng) -> BattleResult<Roster> {
        let members = self
            .members
            .iter()
            .map(|m| m.build(dex, rng))
            .collect::<BattleResult<Vec<_>>>()?;
        Ok(Roster::new(&self.name, members, format)?)
    }

    /// Same team with every member at `level`.
    pub fn at_level(mut self, level: u8) -> Self {
        for member in &mut self.members {
            member.level = level;
        }
        self
    }
}

/// Get all available prefab teams
pub fn get_prefab_teams() -> Vec<PrefabTeam> {
    vec![
        PrefabTeam {
            id: PLAYER_TEAM_ID.to_string(),
            name: "Player".to_string(),
            description: "Classic starters backed by Pikachu, Snorlax and Gyarados".to_string(),
            members: ["charizard", "blastoise", "venusaur", "pikachu", "snorlax", "gyarados"]
                .iter()
                .map(|species| PrefabMember::new(species, 50))
                .collect(),
        },
        PrefabTeam {
            id: OPPONENT_TEAM_ID.to_string(),
            name: "Opponent".to_string(),
            description: "Pseudo-legendary powerhouses".to_string(),
            members: ["tyranitar", "metagross", "salamence", "garchomp", "dragonite", "hydreigon"]
                .iter()
                .map(|species| PrefabMember::new(species, 50))
                .collect(),
        },
    ]
}

/// Look up a prefab team by id
pub fn get_prefab_team(id: &str) -> Option<PrefabTeam> {
    get_prefab_teams().into_iter().find(|team| team.id == id)
}
