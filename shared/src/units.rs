//! Weight unit handling
//!
//! Weigh-ins are stored and analysed in pounds. Other units are accepted at the
//! API boundary and converted on the way in.

use serde::{Deserialize, Serialize};
use std::fmt;

const KG_PER_LB: f64 = 0.453_592_37;
const LBS_PER_STONE: f64 = 14.0;

/// Unit a weigh-in was entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Lbs,
    Kg,
    Stone,
}

impl WeightUnit {
    /// Convert a value in this unit to pounds
    pub fn to_lbs(&self, value: f64) -> f64 {
        match self {
            WeightUnit::Lbs => value,
            WeightUnit::Kg => value / KG_PER_LB,
            WeightUnit::Stone => value * LBS_PER_STONE,
        }
    }

    /// Convert pounds to this unit
    pub fn from_lbs(&self, lbs: f64) -> f64 {
        match self {
            WeightUnit::Lbs => lbs,
            WeightUnit::Kg => lbs * KG_PER_LB,
            WeightUnit::Stone => lbs / LBS_PER_STONE,
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            WeightUnit::Lbs => "lbs",
            WeightUnit::Kg => "kg",
            WeightUnit::Stone => "st",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lbs" | "lb" | "pound" | "pounds" => Ok(WeightUnit::Lbs),
            "kg" | "kilogram" | "kilograms" => Ok(WeightUnit::Kg),
            "st" | "stone" | "stones" => Ok(WeightUnit::Stone),
            _ => Err(format!("Unknown weight unit: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_kg_roundtrip(kg in 20.0f64..300.0) {
            let lbs = WeightUnit::Kg.to_lbs(kg);
            let back = WeightUnit::Kg.from_lbs(lbs);
            prop_assert!((kg - back).abs() < 1e-9, "{} -> {} -> {}", kg, lbs, back);
        }

        #[test]
        fn prop_lbs_identity(lbs in 40.0f64..700.0) {
            prop_assert_eq!(WeightUnit::Lbs.to_lbs(lbs), lbs);
            prop_assert_eq!(WeightUnit::Lbs.from_lbs(lbs), lbs);
        }
    }

    #[test]
    fn test_known_conversions() {
        assert!((WeightUnit::Kg.to_lbs(100.0) - 220.462_262).abs() < 1e-5);
        assert_eq!(WeightUnit::Stone.to_lbs(14.0), 196.0);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("LB".parse::<WeightUnit>().unwrap(), WeightUnit::Lbs);
        assert_eq!("kilograms".parse::<WeightUnit>().unwrap(), WeightUnit::Kg);
        assert_eq!("st".parse::<WeightUnit>().unwrap(), WeightUnit::Stone);
        assert!("grams".parse::<WeightUnit>().is_err());
    }

    #[test]
    fn test_default_is_pounds() {
        assert_eq!(WeightUnit::default(), WeightUnit::Lbs);
        assert_eq!(WeightUnit::default().to_string(), "lbs");
    }
}
