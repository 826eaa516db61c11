//! Feature/target correlation analysis
//!
//! Pearson correlation of every numeric column against a win-indicator
//! column, sorted strongest-positive first. A column with zero variance
//! has no linear relationship to report and scores 0.

use std::fmt;

use crate::{ChessError, Result, Table};

/// Correlations of all other numeric columns against one target column
#[derive(Debug, Clone)]
pub struct CorrelationReport {
    pub target: String,
    /// (column, coefficient) pairs in descending coefficient order
    pub entries: Vec<(String, f64)>,
}

pub fn correlations(table: &Table, target: &str) -> Result<CorrelationReport> {
    let target_values = complete_numeric(table, target)?;

    let mut entries = Vec::new();
    for column in table.columns() {
        if column.name() == target {
            continue;
        }
        let values = complete_numeric(table, column.name())?;
        entries.push((column.name().to_string(), pearson(&values, &target_values)));
    }
    entries.sort_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

    Ok(CorrelationReport {
        target: target.to_string(),
        entries,
    })
}

fn complete_numeric(table: &Table, name: &str) -> Result<Vec<f64>> {
    table
        .require(name)?
        .numeric_values()?
        .into_iter()
        .collect::<Option<_>>()
        .ok_or_else(|| ChessError::schema(name, "missing value in correlation input"))
}

/// Pearson coefficient; 0 when either side has zero variance
fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    if n == 0.0 {
        return 0.0;
    }
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return 0.0;
    }
    cov / (var_x.sqrt() * var_y.sqrt())
}

impl fmt::Display for CorrelationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Correlation with {}:", self.target)?;
        for (name, coefficient) in &self.entries {
            writeln!(f, "  {:<20} {:+.4}", name, coefficient)?;
        }
        Ok(())
    }
}
