//! Target encoding for the three-valued winner label
//!
//! One-hot encodes the winner column into per-class indicator columns and
//! removes drawn games so the downstream task is binary classification.
//! The draw indicator itself is never materialized.

use super::{FittedStage, Stage};
use crate::table::Column;
use crate::{ChessError, Result, Table};

/// Indicator column emitted for games won by white
pub const WHITE_WINS: &str = "white_wins";
/// Indicator column emitted for games won by black
pub const BLACK_WINS: &str = "black_wins";

pub struct TargetEncoder {
    column: String,
    draw_label: String,
}

impl TargetEncoder {
    pub fn new(column: impl Into<String>, draw_label: impl Into<String>) -> Self {
        TargetEncoder {
            column: column.into(),
            draw_label: draw_label.into(),
        }
    }

    pub fn from_config(config: &crate::PipelineConfig) -> Self {
        TargetEncoder::new(&config.target_column, &config.draw_label)
    }
}

impl Stage for TargetEncoder {
    fn name(&self) -> &'static str {
        "target_encoder"
    }

    fn fit(&self, table: &Table) -> Result<Box<dyn FittedStage>> {
        let column = table.require(&self.column)?;

        // Distinct labels in order of first appearance
        let mut classes: Vec<String> = Vec::new();
        for value in column.values() {
            let label = value.category().ok_or_else(|| {
                ChessError::schema(&self.column, "missing value in target column")
            })?;
            if !classes.contains(&label) {
                classes.push(label);
            }
        }

        if classes.len() != 3 {
            return Err(ChessError::schema(
                &self.column,
                format!(
                    "expected exactly 3 distinct labels (two winners and a draw), found {}: {:?}",
                    classes.len(),
                    classes
                ),
            ));
        }
        if !classes.contains(&self.draw_label) {
            return Err(ChessError::schema(
                &self.column,
                format!("draw label '{}' not present in target column", self.draw_label),
            ));
        }

        let winners: Vec<String> = classes
            .into_iter()
            .filter(|c| *c != self.draw_label)
            .collect();

        Ok(Box::new(FittedTargetEncoder {
            column: self.column.clone(),
            draw_label: self.draw_label.clone(),
            winners,
        }))
    }
}

/// Fitted state: the two winning classes in fit-time order
pub struct FittedTargetEncoder {
    column: String,
    draw_label: String,
    winners: Vec<String>,
}

impl FittedStage for FittedTargetEncoder {
    fn name(&self) -> &'static str {
        "target_encoder"
    }

    fn transform(&self, table: Table) -> Result<Table> {
        let column = table.require(&self.column)?;

        let labels: Vec<String> = column
            .values()
            .iter()
            .map(|v| {
                v.category().ok_or_else(|| {
                    ChessError::schema(&self.column, "missing value in target column")
                })
            })
            .collect::<Result<_>>()?;

        let keep: Vec<bool> = labels.iter().map(|l| *l != self.draw_label).collect();
        let kept_labels: Vec<&String> = labels.iter().filter(|l| **l != self.draw_label).collect();

        let mut table = table.filter_rows(&keep)?;
        for class in &self.winners {
            let indicator: Vec<i64> = kept_labels
                .iter()
                .map(|l| i64::from(*l == class))
                .collect();
            table = table.with_column(Column::from_i64(format!("{}_wins", class), indicator))?;
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;

    fn winner_table(labels: &[&str]) -> Table {
        Table::new(vec![
            Column::from_i64("turns", (0..labels.len() as i64).collect()),
            Column::new(
                "winner",
                labels.iter().map(|l| Value::Text(l.to_string())).collect(),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn filters_draws_and_adds_indicators() {
        let table = winner_table(&["white", "black", "draw", "white"]);
        let fitted = TargetEncoder::new("winner", "draw").fit(&table).unwrap();
        let result = fitted.transform(table).unwrap();

        assert_eq!(result.num_rows(), 3);
        assert!(!result.has_column("draw_wins"));

        let white: Vec<_> = result.column(WHITE_WINS).unwrap().values().to_vec();
        let black: Vec<_> = result.column(BLACK_WINS).unwrap().values().to_vec();
        assert_eq!(white, vec![Value::Int(1), Value::Int(0), Value::Int(1)]);
        assert_eq!(black, vec![Value::Int(0), Value::Int(1), Value::Int(0)]);

        // Row order preserved through the filter
        let turns = result.column("turns").unwrap();
        assert_eq!(
            turns.values(),
            &[Value::Int(0), Value::Int(1), Value::Int(3)]
        );
    }

    #[test]
    fn exactly_one_indicator_set_per_row() {
        let table = winner_table(&["black", "draw", "white", "black", "white", "draw"]);
        let fitted = TargetEncoder::new("winner", "draw").fit(&table).unwrap();
        let result = fitted.transform(table).unwrap();

        let white = result.column(WHITE_WINS).unwrap().values().to_vec();
        let black = result.column(BLACK_WINS).unwrap().values().to_vec();
        for (w, b) in white.iter().zip(black.iter()) {
            let sum = w.as_f64().unwrap() + b.as_f64().unwrap();
            assert_eq!(sum, 1.0);
        }
    }

    #[test]
    fn rejects_unexpected_label_cardinality() {
        let two = winner_table(&["white", "black"]);
        assert!(TargetEncoder::new("winner", "draw").fit(&two).is_err());

        let four = winner_table(&["white", "black", "draw", "void"]);
        assert!(TargetEncoder::new("winner", "draw").fit(&four).is_err());
    }

    #[test]
    fn rejects_absent_draw_label() {
        let table = winner_table(&["white", "black", "timeout"]);
        let result = TargetEncoder::new("winner", "draw").fit(&table);
        assert!(matches!(result, Err(ChessError::Schema { .. })));
    }
}
