//! Chess match winner prediction from Lichess game records
//!
//! Loads a CSV of ~20k games, runs a fit/transform preprocessing pipeline
//! (target encoding, column dropping, categorical encoding, KNN imputation,
//! min-max normalization) and evaluates off-the-shelf classifiers on the
//! resulting feature table.

pub mod analysis;
pub mod data;
pub mod pipeline;
pub mod table;
pub mod training;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use table::{Column, ColumnType, Table, Value};

/// Application-wide errors
#[derive(Debug, Error)]
pub enum ChessError {
    #[error("schema error in column '{column}': {message}")]
    Schema { column: String, message: String },

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("column '{0}' is degenerate: min equals max, cannot rescale")]
    DegenerateColumn(String),

    #[error("pipeline is not fitted - call fit_transform on training data first")]
    NotFitted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Training error: {0}")]
    Training(String),
}

impl ChessError {
    /// Shorthand for schema violations tied to one column
    pub fn schema(column: impl Into<String>, message: impl Into<String>) -> Self {
        ChessError::Schema {
            column: column.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChessError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub pipeline: PipelineConfig,
    pub split: SplitConfig,
    pub models: ModelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub csv_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Identifier, timestamp and free-text columns removed before modelling
    pub drop_columns: Vec<String>,
    /// Columns label-encoded to integer codes
    pub categorical_columns: Vec<String>,
    /// Columns rescaled to [0, 1]
    pub normalize_columns: Vec<String>,
    /// Neighbour count for missing-value imputation
    pub neighbors: usize,
    /// When true, also drop the derived win-indicator columns so they
    /// cannot leak into the feature table
    pub corr: bool,
    /// Target column holding the three-valued winner label
    pub target_column: String,
    /// Label identifying drawn games
    pub draw_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    pub test_ratio: f32,
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Neighbour counts swept for the k-NN classifier
    pub knn_k: Vec<usize>,
    /// Depth limits swept for the decision tree
    pub tree_max_depth: Vec<u16>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data: DataConfig {
                csv_path: "games.csv".to_string(),
            },
            pipeline: PipelineConfig {
                drop_columns: vec![
                    "id".to_string(),
                    "created_at".to_string(),
                    "last_move_at".to_string(),
                    "increment_code".to_string(),
                    "white_id".to_string(),
                    "white_rating".to_string(),
                    "black_id".to_string(),
                    "black_rating".to_string(),
                    "moves".to_string(),
                    "opening_eco".to_string(),
                    "opening_name".to_string(),
                    "opening_ply".to_string(),
                ],
                categorical_columns: vec![
                    "winner".to_string(),
                    "rated".to_string(),
                    "victory_status".to_string(),
                ],
                normalize_columns: vec!["turns".to_string()],
                neighbors: 5,
                corr: true,
                target_column: "winner".to_string(),
                draw_label: "draw".to_string(),
            },
            split: SplitConfig {
                test_ratio: 0.3,
                seed: 42,
            },
            models: ModelConfig {
                knn_k: vec![1, 3, 5, 7, 9, 11, 13],
                tree_max_depth: vec![4, 6, 8, 10, 12, 15, 20, 30, 50, 90, 150],
            },
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ChessError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| ChessError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ChessError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
