//! Neighbour-based missing-value imputation
//!
//! Each missing entry is estimated from the k nearest complete rows seen
//! at fit time, under Euclidean distance over the coordinates the
//! incomplete row does have. Ties are broken by reference row index, so
//! imputation is fully deterministic.

use std::cmp::Ordering;

use super::{FittedStage, Stage};
use crate::table::Column;
use crate::{ChessError, Result, Table, Value};

pub struct KnnImputer {
    neighbors: usize,
}

impl KnnImputer {
    pub fn new(neighbors: usize) -> Self {
        KnnImputer { neighbors }
    }
}

impl Stage for KnnImputer {
    fn name(&self) -> &'static str {
        "knn_imputer"
    }

    fn fit(&self, table: &Table) -> Result<Box<dyn FittedStage>> {
        let columns: Vec<String> = table.column_names().iter().map(|s| s.to_string()).collect();
        let rows = numeric_rows(table, &columns)?;

        let reference: Vec<Vec<f64>> = rows
            .iter()
            .filter(|row| row.iter().all(Option::is_some))
            .map(|row| row.iter().map(|v| v.unwrap()).collect())
            .collect();

        if reference.is_empty() {
            return Err(ChessError::InsufficientData(
                "no complete rows available as imputation neighbours".to_string(),
            ));
        }

        let k = self.neighbors.min(reference.len());
        if k < self.neighbors {
            log::warn!(
                "only {} complete rows available, reducing imputation neighbours from {} to {}",
                reference.len(),
                self.neighbors,
                k
            );
        }

        Ok(Box::new(FittedKnnImputer {
            columns,
            reference,
            k,
        }))
    }
}

/// Fitted state: the complete reference rows and the effective neighbour count
pub struct FittedKnnImputer {
    columns: Vec<String>,
    reference: Vec<Vec<f64>>,
    k: usize,
}

impl FittedKnnImputer {
    /// Mean of the missing coordinate over the k nearest reference rows
    fn estimate(&self, row: &[Option<f64>], missing_col: usize) -> f64 {
        let mut order: Vec<usize> = (0..self.reference.len()).collect();
        let distances: Vec<f64> = self
            .reference
            .iter()
            .map(|reference_row| {
                row.iter()
                    .zip(reference_row)
                    .filter_map(|(v, r)| v.map(|v| (v - r) * (v - r)))
                    .sum::<f64>()
                    .sqrt()
            })
            .collect();
        order.sort_by(|&a, &b| {
            distances[a]
                .partial_cmp(&distances[b])
                .unwrap_or(Ordering::Equal)
                .then(a.cmp(&b))
        });

        let sum: f64 = order
            .iter()
            .take(self.k)
            .map(|&i| self.reference[i][missing_col])
            .sum();
        sum / self.k as f64
    }
}

impl FittedStage for FittedKnnImputer {
    fn name(&self) -> &'static str {
        "knn_imputer"
    }

    fn transform(&self, table: Table) -> Result<Table> {
        let rows = numeric_rows(&table, &self.columns)?;

        let mut table = table;
        for (col_idx, name) in self.columns.iter().enumerate() {
            let original = table.require(name)?.values().to_vec();
            if !original.iter().any(Value::is_missing) {
                continue;
            }
            let filled: Vec<Value> = original
                .into_iter()
                .enumerate()
                .map(|(row_idx, value)| {
                    if value.is_missing() {
                        Value::Float(self.estimate(&rows[row_idx], col_idx))
                    } else {
                        value
                    }
                })
                .collect();
            table = table.replace_column(Column::new(name.clone(), filled))?;
        }
        Ok(table)
    }
}

/// Row-major numeric view of the named columns
fn numeric_rows(table: &Table, columns: &[String]) -> Result<Vec<Vec<Option<f64>>>> {
    let mut by_column = Vec::with_capacity(columns.len());
    for name in columns {
        by_column.push(table.require(name)?.numeric_values()?);
    }
    let rows = (0..table.num_rows())
        .map(|i| by_column.iter().map(|col| col[i]).collect())
        .collect();
    Ok(rows)
}
