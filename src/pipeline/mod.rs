//! Preprocessing pipeline
//!
//! Ordered fit/transform stages over a [`Table`]. Fitting a stage produces
//! an immutable fitted value object; transforming is a pure function of
//! that state and the input table, so a pipeline fitted on training data
//! can be replayed unchanged on evaluation data.

pub mod dropper;
pub mod encoder;
pub mod imputer;
pub mod normalizer;
pub mod target;

pub use dropper::ColumnDropper;
pub use encoder::CategoricalEncoder;
pub use imputer::KnnImputer;
pub use normalizer::MinMaxNormalizer;
pub use target::TargetEncoder;

use crate::{ChessError, PipelineConfig, Result, Table};

/// An unfitted transformation stage
pub trait Stage {
    fn name(&self) -> &'static str;

    /// Learn stage parameters from a table
    fn fit(&self, table: &Table) -> Result<Box<dyn FittedStage>>;
}

/// The immutable fitted state of a stage
pub trait FittedStage {
    fn name(&self) -> &'static str;

    /// Apply the fitted parameters, consuming the input table
    fn transform(&self, table: Table) -> Result<Table>;
}

/// Ordered sequence of stages with fit-once / transform-many semantics
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
    fitted: Option<Vec<Box<dyn FittedStage>>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Pipeline::default()
    }

    pub fn with_stage(mut self, stage: impl Stage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// The standard preprocessing pipeline: drop unusable columns, encode
    /// categoricals, impute missing values, rescale selected columns.
    pub fn preprocessing(config: &PipelineConfig) -> Self {
        Pipeline::new()
            .with_stage(ColumnDropper::from_config(config))
            .with_stage(CategoricalEncoder::new(config.categorical_columns.clone()))
            .with_stage(KnnImputer::new(config.neighbors))
            .with_stage(MinMaxNormalizer::new(config.normalize_columns.clone()))
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Fit every stage in order on the output of its predecessor and
    /// return the fully transformed table. Retains fitted state for
    /// later [`Pipeline::transform`] calls.
    pub fn fit_transform(&mut self, table: Table) -> Result<Table> {
        let mut fitted = Vec::with_capacity(self.stages.len());
        let mut current = table;
        for stage in &self.stages {
            log::debug!(
                "fitting stage '{}' on {} rows x {} columns",
                stage.name(),
                current.num_rows(),
                current.num_columns()
            );
            let stage = stage.fit(&current)?;
            current = stage.transform(current)?;
            fitted.push(stage);
        }
        self.fitted = Some(fitted);
        Ok(current)
    }

    /// Apply the already-fitted stages to new data
    pub fn transform(&self, table: Table) -> Result<Table> {
        let fitted = self.fitted.as_ref().ok_or(ChessError::NotFitted)?;
        let mut current = table;
        for stage in fitted {
            current = stage.transform(current)?;
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, Value};
    use crate::Config;

    /// Ten games, drawn in rows 5 and 9 (1-based)
    fn sample_games() -> Table {
        let winners = [
            "white", "black", "white", "white", "draw", "black", "white", "black", "draw", "white",
        ];
        Table::new(vec![
            Column::new(
                "id",
                (0..10).map(|i| Value::Text(format!("game{}", i))).collect(),
            ),
            Column::from_i64("turns", vec![12, 60, 35, 80, 41, 27, 95, 55, 70, 22]),
            Column::new(
                "winner",
                winners.iter().map(|w| Value::Text(w.to_string())).collect(),
            ),
            Column::new("rated", (0..10).map(|i| Value::Bool(i % 2 == 0)).collect()),
            Column::new(
                "victory_status",
                ["resign", "mate", "resign", "outoftime", "draw", "mate", "resign", "resign", "draw", "mate"]
                    .iter()
                    .map(|s| Value::Text(s.to_string()))
                    .collect(),
            ),
            Column::from_i64("opening_ply", vec![3, 5, 4, 7, 2, 6, 9, 5, 4, 3]),
        ])
        .unwrap()
    }

    fn sample_config() -> crate::PipelineConfig {
        let mut config = Config::default().pipeline;
        config.drop_columns = vec!["id".to_string(), "opening_ply".to_string()];
        config
    }

    #[test]
    fn transform_before_fit_is_an_error() {
        let pipeline = Pipeline::preprocessing(&sample_config());
        let result = pipeline.transform(sample_games());
        assert!(matches!(result, Err(ChessError::NotFitted)));
    }

    #[test]
    fn end_to_end_preprocessing() {
        let config = sample_config();

        let target = TargetEncoder::new("winner", "draw");
        let fitted_target = target.fit(&sample_games()).unwrap();
        let table = fitted_target.transform(sample_games()).unwrap();

        let mut pipeline = Pipeline::preprocessing(&config);
        let result = pipeline.fit_transform(table).unwrap();

        // Draws filtered, identifiers and indicators gone
        assert_eq!(result.num_rows(), 8);
        assert!(!result.has_column("id"));
        assert!(!result.has_column("opening_ply"));
        assert!(!result.has_column("white_wins"));
        assert!(!result.has_column("black_wins"));

        // Turns rescaled onto the unit interval
        let turns: Vec<f64> = result
            .column("turns")
            .unwrap()
            .numeric_values()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert!(turns.iter().all(|t| (0.0..=1.0).contains(t)));
        assert_eq!(turns.iter().cloned().fold(f64::INFINITY, f64::min), 0.0);
        assert_eq!(turns.iter().cloned().fold(f64::NEG_INFINITY, f64::max), 1.0);

        // Binary winner codes remain as the target
        let winner: Vec<f64> = result
            .column("winner")
            .unwrap()
            .numeric_values()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert!(winner.iter().all(|w| *w == 0.0 || *w == 1.0));
    }

    #[test]
    fn fitted_pipeline_transform_is_idempotent() {
        let config = sample_config();

        let target = TargetEncoder::new("winner", "draw");
        let fitted_target = target.fit(&sample_games()).unwrap();
        let table = fitted_target.transform(sample_games()).unwrap();

        let mut pipeline = Pipeline::preprocessing(&config);
        pipeline.fit_transform(table.clone()).unwrap();

        let once = pipeline.transform(table.clone()).unwrap();
        let twice = pipeline.transform(table).unwrap();
        assert_eq!(once, twice);
    }
}
