use crate::dex::Dex;
use crate::errors::ConfigResult;
use schema::{DamageClass, ElementType, MoveData};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An immutable move value carried by a combatant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    data: MoveData,
}

impl Move {
    /// Look a move up by name in the data context.
    pub fn from_name(dex: &Dex, name: &str) -> ConfigResult<Self> {
        dex.move_data(name).map(|data| Self::from_data(data.clone()))
    }

    pub fn from_data(data: MoveData) -> Self {
        Self { data }
    }

    /// Build a move without a data context. Accuracy is clamped to 1-100.
    pub fn new(
        name: &str,
        element: ElementType,
        power: u16,
        accuracy: u8,
        damage_class: DamageClass,
    ) -> Self {
        Self {
            data: MoveData {
                name: name.to_string(),
                element,
                power: if damage_class == DamageClass::Status { 0 } else { power },
                accuracy: accuracy.clamp(1, 100),
                pp: MoveData::DEFAULT_PP,
                damage_class,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn element(&self) -> ElementType {
        self.data.element
    }

    pub fn power(&self) -> u16 {
        self.data.power
    }

    pub fn accuracy(&self) -> u8 {
        self.data.accuracy
    }

    pub fn pp(&self) -> u8 {
        self.data.pp
    }

    pub fn damage_class(&self) -> DamageClass {
        self.data.damage_class
    }

    pub fn is_status(&self) -> bool {
        self.data.is_status()
    }

    pub fn data(&self) -> &MoveData {
        &self.data
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", title_case(&self.data.name))
    }
}

/// "thunder-punch" -> "Thunder Punch"
pub fn title_case(name: &str) -> String {
    name.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
