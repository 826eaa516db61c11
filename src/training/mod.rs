//! Model training and comparison
//!
//! Turns a fully numeric feature table into smartcore matrices, draws a
//! seeded holdout split and sweeps the configured classifier candidates,
//! reporting train/test accuracy per candidate.

pub mod metrics;
pub mod models;

use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::model_selection::train_test_split;

use crate::{ChessError, ModelConfig, Result, SplitConfig, Table};
pub use metrics::{Evaluation, ModelScores};

/// Feature matrix and integer labels extracted from a preprocessed table
pub struct Dataset {
    pub features: DenseMatrix<f64>,
    pub labels: Vec<u32>,
    pub feature_names: Vec<String>,
}

impl Dataset {
    /// Splits the named target column off from the rest of the table.
    ///
    /// Every remaining column must be numeric and complete; preprocessing
    /// is responsible for getting the table into that state.
    pub fn from_table(table: &Table, target: &str) -> Result<Self> {
        let target_values = table.require(target)?.numeric_values()?;
        let labels: Vec<u32> = target_values
            .into_iter()
            .enumerate()
            .map(|(row, v)| match v {
                Some(v) if v >= 0.0 && v.fract() == 0.0 => Ok(v as u32),
                _ => Err(ChessError::schema(
                    target,
                    format!("row {} does not hold a non-negative integer label", row),
                )),
            })
            .collect::<Result<_>>()?;

        let mut feature_names = Vec::new();
        let mut by_column: Vec<Vec<f64>> = Vec::new();
        for column in table.columns() {
            if column.name() == target {
                continue;
            }
            let values: Vec<f64> = column
                .numeric_values()?
                .into_iter()
                .collect::<Option<_>>()
                .ok_or_else(|| {
                    ChessError::schema(column.name(), "missing value in feature column")
                })?;
            feature_names.push(column.name().to_string());
            by_column.push(values);
        }
        if by_column.is_empty() {
            return Err(ChessError::InsufficientData(
                "no feature columns besides the target".to_string(),
            ));
        }

        let rows: Vec<Vec<f64>> = (0..table.num_rows())
            .map(|i| by_column.iter().map(|col| col[i]).collect())
            .collect();
        let features = DenseMatrix::from_2d_vec(&rows)
            .map_err(|e| ChessError::Training(format!("failed to build feature matrix: {}", e)))?;

        Ok(Dataset {
            features,
            labels,
            feature_names,
        })
    }

    /// Seeded shuffled holdout split
    pub fn split(&self, config: &SplitConfig) -> Result<HoldoutSplit> {
        if !(0.0..1.0).contains(&config.test_ratio) || config.test_ratio == 0.0 {
            return Err(ChessError::Config(format!(
                "test_ratio must be in (0, 1), got {}",
                config.test_ratio
            )));
        }
        let (x_train, x_test, y_train, y_test) = train_test_split(
            &self.features,
            &self.labels,
            config.test_ratio,
            true,
            Some(config.seed),
        );
        log::info!(
            "split {} rows into {} train / {} test (seed {})",
            self.labels.len(),
            y_train.len(),
            y_test.len(),
            config.seed
        );
        Ok(HoldoutSplit {
            x_train,
            x_test,
            y_train,
            y_test,
        })
    }
}

pub struct HoldoutSplit {
    pub x_train: DenseMatrix<f64>,
    pub x_test: DenseMatrix<f64>,
    pub y_train: Vec<u32>,
    pub y_test: Vec<u32>,
}

/// One evaluated candidate from a sweep
#[derive(Debug, Clone)]
pub struct CandidateResult {
    pub model: String,
    pub params: String,
    pub train_accuracy: f64,
    pub test_accuracy: f64,
}

impl CandidateResult {
    fn new(model: &str, params: String, scores: &ModelScores) -> Self {
        CandidateResult {
            model: model.to_string(),
            params,
            train_accuracy: scores.train.accuracy(),
            test_accuracy: scores.test.accuracy(),
        }
    }
}

pub fn sweep_knn(split: &HoldoutSplit, config: &ModelConfig) -> Result<Vec<CandidateResult>> {
    let mut results = Vec::with_capacity(config.knn_k.len());
    for &k in &config.knn_k {
        log::debug!("evaluating knn with k={}", k);
        let scores = models::evaluate_knn(split, k)?;
        results.push(CandidateResult::new("knn", format!("k={}", k), &scores));
    }
    Ok(results)
}

pub fn sweep_tree(split: &HoldoutSplit, config: &ModelConfig) -> Result<Vec<CandidateResult>> {
    let mut results = Vec::with_capacity(config.tree_max_depth.len() + 1);
    for &depth in &config.tree_max_depth {
        log::debug!("evaluating decision tree with max_depth={}", depth);
        let scores = models::evaluate_tree(split, Some(depth))?;
        results.push(CandidateResult::new(
            "tree",
            format!("max_depth={}", depth),
            &scores,
        ));
    }
    let scores = models::evaluate_tree(split, None)?;
    results.push(CandidateResult::new(
        "tree",
        "max_depth=none".to_string(),
        &scores,
    ));
    Ok(results)
}

pub fn sweep_naive_bayes(split: &HoldoutSplit) -> Result<Vec<CandidateResult>> {
    let scores = models::evaluate_gaussian_nb(split)?;
    Ok(vec![CandidateResult::new(
        "gaussian_nb",
        "-".to_string(),
        &scores,
    )])
}

/// Index of the candidate with the highest test accuracy
pub fn best_candidate(results: &[CandidateResult]) -> Option<usize> {
    results
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| {
            a.test_accuracy
                .partial_cmp(&b.test_accuracy)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
}
