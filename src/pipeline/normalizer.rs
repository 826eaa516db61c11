//! Min-max rescaling of selected numeric columns
//!
//! Linear map onto [0, 1] using the fit-time minimum and maximum. Values
//! on evaluation data outside the fitted range map outside the unit
//! interval; no clamping is applied.

use super::{FittedStage, Stage};
use crate::table::Column;
use crate::{ChessError, Result, Table, Value};

pub struct MinMaxNormalizer {
    columns: Vec<String>,
}

impl MinMaxNormalizer {
    pub fn new(columns: Vec<String>) -> Self {
        MinMaxNormalizer { columns }
    }
}

impl Stage for MinMaxNormalizer {
    fn name(&self) -> &'static str {
        "minmax_normalizer"
    }

    fn fit(&self, table: &Table) -> Result<Box<dyn FittedStage>> {
        let mut ranges = Vec::with_capacity(self.columns.len());
        for name in &self.columns {
            let values = table.require(name)?.numeric_values()?;
            let present: Vec<f64> = values.into_iter().flatten().collect();
            if present.is_empty() {
                return Err(ChessError::InsufficientData(format!(
                    "column '{}' has no values to fit a range on",
                    name
                )));
            }
            let min = present.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = present.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            if min == max {
                return Err(ChessError::DegenerateColumn(name.clone()));
            }
            ranges.push(ColumnRange {
                column: name.clone(),
                min,
                max,
            });
        }
        Ok(Box::new(FittedMinMaxNormalizer { ranges }))
    }
}

struct ColumnRange {
    column: String,
    min: f64,
    max: f64,
}

pub struct FittedMinMaxNormalizer {
    ranges: Vec<ColumnRange>,
}

impl FittedStage for FittedMinMaxNormalizer {
    fn name(&self) -> &'static str {
        "minmax_normalizer"
    }

    fn transform(&self, table: Table) -> Result<Table> {
        let mut table = table;
        for range in &self.ranges {
            let span = range.max - range.min;
            let rescaled: Vec<Value> = table
                .require(&range.column)?
                .values()
                .iter()
                .map(|value| match value.as_f64() {
                    Some(v) => Ok(Value::Float((v - range.min) / span)),
                    None if value.is_missing() => Ok(Value::Missing),
                    None => Err(ChessError::schema(
                        &range.column,
                        "text value where a numeric column was expected",
                    )),
                })
                .collect::<Result<_>>()?;
            table = table.replace_column(Column::new(range.column.clone(), rescaled))?;
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turns_table(values: Vec<f64>) -> Table {
        Table::new(vec![Column::from_f64("turns", values)]).unwrap()
    }

    #[test]
    fn output_spans_the_unit_interval_exactly() {
        let table = turns_table(vec![10.0, 55.0, 100.0]);
        let fitted = MinMaxNormalizer::new(vec!["turns".to_string()])
            .fit(&table)
            .unwrap();
        let result = fitted.transform(table).unwrap();

        let turns: Vec<f64> = result
            .column("turns")
            .unwrap()
            .numeric_values()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(turns[0], 0.0);
        assert_eq!(turns[1], 0.5);
        assert_eq!(turns[2], 1.0);
    }

    #[test]
    fn degenerate_column_is_an_error() {
        let table = turns_table(vec![42.0, 42.0, 42.0]);
        let result = MinMaxNormalizer::new(vec!["turns".to_string()]).fit(&table);
        assert!(matches!(result, Err(ChessError::DegenerateColumn(_))));
    }

    #[test]
    fn fit_time_range_applies_to_new_data() {
        let train = turns_table(vec![0.0, 100.0]);
        let fitted = MinMaxNormalizer::new(vec!["turns".to_string()])
            .fit(&train)
            .unwrap();

        // Out-of-range evaluation values extrapolate linearly
        let eval = turns_table(vec![50.0, 150.0]);
        let result = fitted.transform(eval).unwrap();
        let turns: Vec<f64> = result
            .column("turns")
            .unwrap()
            .numeric_values()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(turns, vec![0.5, 1.5]);
    }

    #[test]
    fn absent_column_is_an_error() {
        let table = turns_table(vec![1.0, 2.0]);
        let result = MinMaxNormalizer::new(vec!["moves".to_string()]).fit(&table);
        assert!(matches!(result, Err(ChessError::ColumnNotFound(_))));
    }
}
