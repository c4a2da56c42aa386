//! Attack-type vs defend-type effectiveness lookup.

use crate::errors::{ConfigResult, ConfigurationError};
use schema::ElementType;
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use strum::IntoEnumIterator;

/// Effectiveness multipliers keyed by (attacking type, defending type).
///
/// Pairs that are not listed are neutral (1.0).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TypeChart {
    table: HashMap<(ElementType, ElementType), f64>,
}

impl TypeChart {
    /// An empty chart: every matchup is neutral.
    pub fn neutral() -> Self {
        Self::default()
    }

    /// The full 18-type chart.
    pub fn standard() -> Self {
        let mut table = HashMap::new();
        for attacking in ElementType::iter() {
            for defending in ElementType::iter() {
                let multiplier = ElementType::standard_effectiveness(attacking, defending);
                if multiplier != 1.0 {
                    table.insert((attacking, defending), multiplier as f64);
                }
            }
        }
        Self { table }
    }

    /// Parse the collected-data layout: `{ "fire": { "grass": 2.0, ... }, ... }`.
    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let raw: BTreeMap<String, BTreeMap<String, f64>> =
            serde_json::from_str(text).map_err(|e| ConfigurationError::Parse {
                path: "types_data.json".to_string(),
                message: e.to_string(),
            })?;

        let mut chart = Self::neutral();
        for (attacking, row) in raw {
            let attacking = parse_type(&attacking)?;
            for (defending, multiplier) in row {
                let defending = parse_type(&defending)?;
                if multiplier < 0.0 {
                    return Err(ConfigurationError::Parse {
                        path: "types_data.json".to_string(),
                        message: format!(
                            "negative multiplier {} for {} vs {}",
                            multiplier, attacking, defending
                        ),
                    });
                }
                chart.table.insert((attacking, defending), multiplier);
            }
        }
        Ok(chart)
    }

    /// Override one matchup.
    pub fn with_entry(mut self, attacking: ElementType, defending: ElementType, multiplier: f64) -> Self {
        self.table.insert((attacking, defending), multiplier.max(0.0));
        self
    }

    pub fn effectiveness(&self, attacking: ElementType, defending: ElementType) -> f64 {
        self.table.get(&(attacking, defending)).copied().unwrap_or(1.0)
    }

    /// Product of the per-type multipliers; dual types compound (2.0 x 2.0 = 4.0).
    pub fn multiplier_against(&self, attacking: ElementType, defender_types: &[ElementType]) -> f64 {
        defender_types
            .iter()
            .map(|&defending| self.effectiveness(attacking, defending))
            .product()
    }

    pub fn is_super_effective(&self, attacking: ElementType, defending: ElementType) -> bool {
        self.effectiveness(attacking, defending) > 1.0
    }
}

pub(crate) fn parse_type(name: &str) -> ConfigResult<ElementType> {
    ElementType::from_str(name).map_err(|_| ConfigurationError::UnknownType(name.to_string()))
}
