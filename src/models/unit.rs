use serde::{Deserialize, Serialize};

pub const KG_TO_LBS: f64 = 2.20462;
pub const LBS_TO_KG: f64 = 0.453592;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Kg,
    Lbs,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::Lbs => "lbs",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Unit::Kg => "公斤 (kg)",
            Unit::Lbs => "磅 (lbs)",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Round to one decimal place, halves away from zero (so -0.05 becomes -0.1).
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Convert a weight between units, rounded to one decimal place.
///
/// Always convert from the unit a value was recorded in; converting an
/// already converted value compounds the rounding.
pub fn convert_weight(weight: f64, from: Unit, to: Unit) -> f64 {
    match (from, to) {
        (Unit::Kg, Unit::Lbs) => round_to_tenth(weight * KG_TO_LBS),
        (Unit::Lbs, Unit::Kg) => round_to_tenth(weight * LBS_TO_KG),
        _ => weight,
    }
}
