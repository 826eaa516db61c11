//! Evaluation metrics
//!
//! Accuracy and confusion counts for the binary winner task, computed by
//! hand from prediction/label slices.

use std::fmt;

/// Outcome counts for one evaluation pass
#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    pub correct: usize,
    pub total: usize,
    /// confusion[actual][predicted] for the binary labels 0/1
    pub confusion: [[usize; 2]; 2],
}

impl Evaluation {
    pub fn from_predictions(y_true: &[u32], y_pred: &[u32]) -> Self {
        let mut eval = Evaluation::default();
        for (&actual, &predicted) in y_true.iter().zip(y_pred.iter()) {
            eval.total += 1;
            if actual == predicted {
                eval.correct += 1;
            }
            if actual < 2 && predicted < 2 {
                eval.confusion[actual as usize][predicted as usize] += 1;
            }
        }
        eval
    }

    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Acc: {:.1}% ({}/{})",
            self.accuracy() * 100.0,
            self.correct,
            self.total
        )
    }
}

/// Train and test evaluations for one fitted model
#[derive(Debug, Clone)]
pub struct ModelScores {
    pub train: Evaluation,
    pub test: Evaluation,
}
