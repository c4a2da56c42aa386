use crate::ElementType;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

/// Which pair of stats a move reads when it deals damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageClass {
    Physical,
    Special,
    Status,
}

impl fmt::Display for DamageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DamageClass::Physical => write!(f, "Physical"),
            DamageClass::Special => write!(f, "Special"),
            DamageClass::Status => write!(f, "Status"),
        }
    }
}

/// Stats that carry a battle stage in [-6, +6].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
    Accuracy,
    Evasion,
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatKind::Attack => write!(f, "Attack"),
            StatKind::Defense => write!(f, "Defense"),
            StatKind::SpecialAttack => write!(f, "Special Attack"),
            StatKind::SpecialDefense => write!(f, "Special Defense"),
            StatKind::Speed => write!(f, "Speed"),
            StatKind::Accuracy => write!(f, "accuracy"),
            StatKind::Evasion => write!(f, "evasiveness"),
        }
    }
}

/// Static record for one move, as stored in the data files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    /// Filled from the map key when the record is loaded from a keyed table.
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub element: ElementType,
    /// Base power; 0 for status moves.
    #[serde(default)]
    pub power: u16,
    /// Hit chance in percent, 1-100.
    #[serde(default = "MoveData::default_accuracy")]
    pub accuracy: u8,
    #[serde(default = "MoveData::default_pp")]
    pub pp: u8,
    pub damage_class: DamageClass,
}

impl MoveData {
    pub const DEFAULT_ACCURACY: u8 = 100;
    pub const DEFAULT_PP: u8 = 20;

    fn default_accuracy() -> u8 {
        Self::DEFAULT_ACCURACY
    }

    fn default_pp() -> u8 {
        Self::DEFAULT_PP
    }

    pub fn is_status(&self) -> bool {
        self.damage_class == DamageClass::Status
    }
}
