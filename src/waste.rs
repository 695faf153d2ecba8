//! Waste categories and the points awarded for logging them.

use serde::{Deserialize, Serialize};

/// Category of logged waste.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WasteType {
    Food,
    Plastic,
    Paper,
    Glass,
    Metal,
    Electronic,
    Organic,
    Textile,
    Hazardous,
    Other,
}

impl WasteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WasteType::Food => "food",
            WasteType::Plastic => "plastic",
            WasteType::Paper => "paper",
            WasteType::Glass => "glass",
            WasteType::Metal => "metal",
            WasteType::Electronic => "electronic",
            WasteType::Organic => "organic",
            WasteType::Textile => "textile",
            WasteType::Hazardous => "hazardous",
            WasteType::Other => "other",
        }
    }

    /// Points per unit of quantity.
    pub fn base_points(&self) -> u32 {
        match self {
            WasteType::Food => 10,
            WasteType::Plastic => 15,
            WasteType::Paper => 8,
            WasteType::Glass => 12,
            WasteType::Metal => 20,
            WasteType::Electronic => 25,
            WasteType::Organic => 10,
            WasteType::Textile => 15,
            WasteType::Hazardous => 30,
            WasteType::Other => 5,
        }
    }
}

impl std::fmt::Display for WasteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized waste type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown waste type: {0}")]
pub struct ParseWasteTypeError(String);

impl std::str::FromStr for WasteType {
    type Err = ParseWasteTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "food" => Ok(WasteType::Food),
            "plastic" => Ok(WasteType::Plastic),
            "paper" => Ok(WasteType::Paper),
            "glass" => Ok(WasteType::Glass),
            "metal" => Ok(WasteType::Metal),
            "electronic" => Ok(WasteType::Electronic),
            "organic" => Ok(WasteType::Organic),
            "textile" => Ok(WasteType::Textile),
            "hazardous" => Ok(WasteType::Hazardous),
            "other" => Ok(WasteType::Other),
            _ => Err(ParseWasteTypeError(s.to_string())),
        }
    }
}

/// Points for logging `quantity` units of `waste_type`, rounded down.
///
/// Negative or non-finite quantities earn nothing.
pub fn points_for(waste_type: WasteType, quantity: f64) -> u32 {
    if !quantity.is_finite() || quantity <= 0.0 {
        return 0;
    }
    // `as` saturates at u32::MAX.
    (f64::from(waste_type.base_points()) * quantity).floor() as u32
}

/// Cumulative totals a caller keeps for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WasteTally {
    pub total_entries: u64,
    pub total_points: u64,
}

impl WasteTally {
    /// Count one logged entry worth `points`.
    pub fn record(&mut self, points: u32) {
        self.total_entries = self.total_entries.saturating_add(1);
        self.total_points = self.total_points.saturating_add(u64::from(points));
    }
}
