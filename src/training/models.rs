//! Classifier wrappers
//!
//! Each function fits one smartcore classifier on the training half of a
//! holdout split and scores it on both halves. Models are fit, scored and
//! discarded; only the evaluations survive.

use smartcore::naive_bayes::gaussian::GaussianNB;
use smartcore::neighbors::knn_classifier::{KNNClassifier, KNNClassifierParameters};
use smartcore::tree::decision_tree_classifier::{
    DecisionTreeClassifier, DecisionTreeClassifierParameters,
};

use super::metrics::{Evaluation, ModelScores};
use super::HoldoutSplit;
use crate::{ChessError, Result};

pub fn evaluate_knn(split: &HoldoutSplit, k: usize) -> Result<ModelScores> {
    let params = KNNClassifierParameters::default().with_k(k);
    let model = KNNClassifier::fit(&split.x_train, &split.y_train, params)
        .map_err(|e| ChessError::Training(format!("knn (k={}) failed to fit: {}", k, e)))?;

    let train_pred = model
        .predict(&split.x_train)
        .map_err(|e| ChessError::Training(e.to_string()))?;
    let test_pred = model
        .predict(&split.x_test)
        .map_err(|e| ChessError::Training(e.to_string()))?;
    Ok(scores(split, &train_pred, &test_pred))
}

pub fn evaluate_tree(split: &HoldoutSplit, max_depth: Option<u16>) -> Result<ModelScores> {
    let mut params = DecisionTreeClassifierParameters::default();
    if let Some(depth) = max_depth {
        params = params.with_max_depth(depth);
    }
    let model = DecisionTreeClassifier::fit(&split.x_train, &split.y_train, params)
        .map_err(|e| ChessError::Training(format!("decision tree failed to fit: {}", e)))?;

    let train_pred = model
        .predict(&split.x_train)
        .map_err(|e| ChessError::Training(e.to_string()))?;
    let test_pred = model
        .predict(&split.x_test)
        .map_err(|e| ChessError::Training(e.to_string()))?;
    Ok(scores(split, &train_pred, &test_pred))
}

pub fn evaluate_gaussian_nb(split: &HoldoutSplit) -> Result<ModelScores> {
    let model = GaussianNB::fit(&split.x_train, &split.y_train, Default::default())
        .map_err(|e| ChessError::Training(format!("gaussian nb failed to fit: {}", e)))?;

    let train_pred = model
        .predict(&split.x_train)
        .map_err(|e| ChessError::Training(e.to_string()))?;
    let test_pred = model
        .predict(&split.x_test)
        .map_err(|e| ChessError::Training(e.to_string()))?;
    Ok(scores(split, &train_pred, &test_pred))
}

fn scores(split: &HoldoutSplit, train_pred: &[u32], test_pred: &[u32]) -> ModelScores {
    ModelScores {
        train: Evaluation::from_predictions(&split.y_train, train_pred),
        test: Evaluation::from_predictions(&split.y_test, test_pred),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartcore::linalg::basic::matrix::DenseMatrix;

    /// Two well-separated clusters, identical train and test halves
    fn separable_split() -> HoldoutSplit {
        let rows = vec![
            vec![0.0, 0.1],
            vec![0.1, 0.0],
            vec![0.2, 0.2],
            vec![0.9, 1.0],
            vec![1.0, 0.9],
            vec![0.8, 0.8],
        ];
        let labels = vec![0u32, 0, 0, 1, 1, 1];
        let x = DenseMatrix::from_2d_vec(&rows).unwrap();
        HoldoutSplit {
            x_train: x.clone(),
            x_test: x,
            y_train: labels.clone(),
            y_test: labels,
        }
    }

    #[test]
    fn knn_separates_distant_clusters() {
        let scores = evaluate_knn(&separable_split(), 1).unwrap();
        assert_eq!(scores.train.accuracy(), 1.0);
        assert_eq!(scores.test.accuracy(), 1.0);
    }

    #[test]
    fn tree_separates_distant_clusters() {
        let scores = evaluate_tree(&separable_split(), Some(3)).unwrap();
        assert_eq!(scores.test.accuracy(), 1.0);
    }

    #[test]
    fn gaussian_nb_separates_distant_clusters() {
        let scores = evaluate_gaussian_nb(&separable_split()).unwrap();
        assert_eq!(scores.test.accuracy(), 1.0);
    }
}
