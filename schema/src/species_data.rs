use crate::ElementType;
use serde::{Deserialize, Serialize};

/// The six base stats of a species. Only `hp` is level-scaled; the other five are
/// used as-is by the damage formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub special_attack: u16,
    pub special_defense: u16,
    pub speed: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesData {
    #[serde(default)]
    pub name: String,
    pub types: Vec<ElementType>,
    pub base_stats: BaseStats,
    /// Every move this species may be created with.
    pub moves: Vec<String>,
}

impl SpeciesData {
    pub fn has_type(&self, element: ElementType) -> bool {
        self.types.contains(&element)
    }

    pub fn can_learn(&self, move_name: &str) -> bool {
        self.moves.iter().any(|m| m == move_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_species_from_ron() {
        let text = r#"(
            name: "pikachu",
            types: [electric],
            base_stats: (hp: 35, attack: 55, defense: 40, special_attack: 50, special_defense: 50, speed: 90),
            moves: ["thunderbolt", "quick-attack"],
        )"#;
        let species: SpeciesData = ron::from_str(text).unwrap();
        assert!(species.has_type(ElementType::Electric));
        assert!(species.can_learn("thunderbolt"));
        assert!(!species.can_learn("surf"));
        assert_eq!(species.base_stats.speed, 90);
    }
}
