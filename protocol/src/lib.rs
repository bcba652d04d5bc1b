//! Data exchanged with front ends: the export file and the share summary.
//!
//! Kept free of engine types so a renderer can read these without linking the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of seed characters shown in a share summary.
pub const SHARE_SEED_PREFIX: usize = 16;

/// Everything needed to replay and verify a prediction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    pub timestamp: DateTime<Utc>,
    pub hash_seed: String,
    pub mine_amount: u8,
    pub grid_size: u8,
    pub prediction_count: u32,
    /// Live payout multiplier while the board is in play, the opening one for the mine
    /// count once the game is over.
    pub current_multiplier: Option<f64>,
    pub mine_positions: Vec<u8>,
}

impl ExportRecord {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Suggested file name, stamped with the export time in milliseconds.
    pub fn file_name(&self) -> String {
        format!("mines-prediction-{}.json", self.timestamp.timestamp_millis())
    }
}

/// Short, human-readable summary of a prediction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShareSummary {
    pub seed_prefix: String,
    pub mines: u8,
    pub total_cells: u8,
    pub multiplier: Option<f64>,
}

impl ShareSummary {
    pub fn new(seed: &str, mines: u8, total_cells: u8, multiplier: Option<f64>) -> Self {
        Self {
            seed_prefix: seed.chars().take(SHARE_SEED_PREFIX).collect(),
            mines,
            total_cells,
            multiplier,
        }
    }

    pub fn to_text(&self) -> String {
        let multiplier = self
            .multiplier
            .map_or_else(|| "-".to_owned(), |m| format!("{m:.2}x"));
        format!(
            "Mines Prediction Result\nHash: {}...\nMines: {}/{}\nMultiplier: {}",
            self.seed_prefix, self.mines, self.total_cells, multiplier
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ExportRecord {
        ExportRecord {
            timestamp: DateTime::from_timestamp_millis(1_700_000_000_000).unwrap(),
            hash_seed: "abc".into(),
            mine_amount: 3,
            grid_size: 5,
            prediction_count: 2,
            current_multiplier: Some(1.1),
            mine_positions: vec![1, 7, 19],
        }
    }

    #[test]
    fn export_uses_camel_case_keys() {
        let json = record().to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["hashSeed"], "abc");
        assert_eq!(value["mineAmount"], 3);
        assert_eq!(value["minePositions"], serde_json::json!([1, 7, 19]));
        assert_eq!(ExportRecord::from_json(&json).unwrap(), record());
    }

    #[test]
    fn file_name_carries_timestamp() {
        assert_eq!(record().file_name(), "mines-prediction-1700000000000.json");
    }

    #[test]
    fn share_text_truncates_seed() {
        let summary = ShareSummary::new(&"f".repeat(64), 5, 25, Some(1.2375));
        assert_eq!(
            summary.to_text(),
            "Mines Prediction Result\nHash: ffffffffffffffff...\nMines: 5/25\nMultiplier: 1.24x"
        );

        let finished = ShareSummary::new("short", 24, 25, None);
        assert!(finished.to_text().ends_with("Multiplier: -"));
    }
}
