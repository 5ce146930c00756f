//! Table state types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Occupancy state of a physical table
///
/// A plain state holder. Any status may be set directly by an authorized
/// caller; the order workflow enforces the two coupling rules (placement
/// occupies, terminal status releases).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
    Cleaning,
}

impl TableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableStatus::Available => "available",
            TableStatus::Occupied => "occupied",
            TableStatus::Reserved => "reserved",
            TableStatus::Cleaning => "cleaning",
        }
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Location category of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TableLocation {
    #[default]
    Indoor,
    Outdoor,
    Patio,
    Terrace,
    Vip,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&TableStatus::Occupied).unwrap(),
            "\"occupied\""
        );
        let status: TableStatus = serde_json::from_str("\"cleaning\"").unwrap();
        assert_eq!(status, TableStatus::Cleaning);
        let location: TableLocation = serde_json::from_str("\"vip\"").unwrap();
        assert_eq!(location, TableLocation::Vip);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(TableStatus::default(), TableStatus::Available);
        assert_eq!(TableLocation::default(), TableLocation::Indoor);
    }
}
