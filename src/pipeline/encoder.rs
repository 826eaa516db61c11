//! Integer coding for categorical columns
//!
//! Codes are assigned in order of first appearance at fit time and the
//! mapping is frozen: transform replays it unchanged, so codes stay stable
//! between training and evaluation data. A category never seen at fit maps
//! to the reserved unknown code, one past the last fitted code.

use std::collections::HashMap;

use super::{FittedStage, Stage};
use crate::table::Column;
use crate::{ChessError, Result, Table, Value};

pub struct CategoricalEncoder {
    columns: Vec<String>,
}

impl CategoricalEncoder {
    pub fn new(columns: Vec<String>) -> Self {
        CategoricalEncoder { columns }
    }
}

impl Stage for CategoricalEncoder {
    fn name(&self) -> &'static str {
        "categorical_encoder"
    }

    fn fit(&self, table: &Table) -> Result<Box<dyn FittedStage>> {
        let mut mappings = Vec::with_capacity(self.columns.len());
        for name in &self.columns {
            let column = table.require(name)?;
            let mut codes: HashMap<String, i64> = HashMap::new();
            for value in column.values() {
                let label = value.category().ok_or_else(|| {
                    ChessError::schema(name, "missing value in categorical column at fit time")
                })?;
                let next = codes.len() as i64;
                codes.entry(label).or_insert(next);
            }
            mappings.push(ColumnCodes {
                column: name.clone(),
                codes,
            });
        }
        Ok(Box::new(FittedCategoricalEncoder { mappings }))
    }
}

/// Frozen fit-time mapping for one column
struct ColumnCodes {
    column: String,
    codes: HashMap<String, i64>,
}

impl ColumnCodes {
    /// Reserved code for categories unseen at fit time
    fn unknown_code(&self) -> i64 {
        self.codes.len() as i64
    }
}

pub struct FittedCategoricalEncoder {
    mappings: Vec<ColumnCodes>,
}

impl FittedStage for FittedCategoricalEncoder {
    fn name(&self) -> &'static str {
        "categorical_encoder"
    }

    fn transform(&self, table: Table) -> Result<Table> {
        let mut table = table;
        for mapping in &self.mappings {
            let column = table.require(&mapping.column)?;
            let encoded: Vec<i64> = column
                .values()
                .iter()
                .map(|value| match value.category() {
                    Some(label) => mapping
                        .codes
                        .get(&label)
                        .copied()
                        .unwrap_or_else(|| mapping.unknown_code()),
                    None => mapping.unknown_code(),
                })
                .collect();
            table = table.replace_column(Column::from_i64(mapping.column.clone(), encoded))?;
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_of(labels: &[&str]) -> Table {
        Table::new(vec![Column::new(
            "victory_status",
            labels.iter().map(|l| Value::Text(l.to_string())).collect(),
        )])
        .unwrap()
    }

    #[test]
    fn codes_follow_first_appearance_order() {
        let table = table_of(&["resign", "mate", "resign", "outoftime", "mate"]);
        let fitted = CategoricalEncoder::new(vec!["victory_status".to_string()])
            .fit(&table)
            .unwrap();
        let result = fitted.transform(table).unwrap();

        let codes = result.column("victory_status").unwrap().values().to_vec();
        assert_eq!(
            codes,
            vec![
                Value::Int(0),
                Value::Int(1),
                Value::Int(0),
                Value::Int(2),
                Value::Int(1)
            ]
        );
    }

    #[test]
    fn fit_time_mapping_is_reused_on_new_data() {
        let train = table_of(&["resign", "mate"]);
        let fitted = CategoricalEncoder::new(vec!["victory_status".to_string()])
            .fit(&train)
            .unwrap();

        // Same labels in a different order keep their training codes
        let eval = table_of(&["mate", "resign"]);
        let result = fitted.transform(eval).unwrap();
        let codes = result.column("victory_status").unwrap().values().to_vec();
        assert_eq!(codes, vec![Value::Int(1), Value::Int(0)]);
    }

    #[test]
    fn unseen_category_gets_the_unknown_code() {
        let train = table_of(&["resign", "mate"]);
        let fitted = CategoricalEncoder::new(vec!["victory_status".to_string()])
            .fit(&train)
            .unwrap();

        let eval = table_of(&["resign", "outoftime"]);
        let result = fitted.transform(eval).unwrap();
        let codes = result.column("victory_status").unwrap().values().to_vec();
        // Two fitted categories, so the unknown code is 2
        assert_eq!(codes, vec![Value::Int(0), Value::Int(2)]);
    }

    #[test]
    fn bool_columns_are_encodable() {
        let table = Table::new(vec![Column::new(
            "rated",
            vec![Value::Bool(true), Value::Bool(false), Value::Bool(true)],
        )])
        .unwrap();
        let fitted = CategoricalEncoder::new(vec!["rated".to_string()])
            .fit(&table)
            .unwrap();
        let result = fitted.transform(table).unwrap();
        let codes = result.column("rated").unwrap().values().to_vec();
        assert_eq!(codes, vec![Value::Int(0), Value::Int(1), Value::Int(0)]);
    }

    #[test]
    fn missing_at_fit_time_is_an_error() {
        let table = Table::new(vec![Column::new(
            "victory_status",
            vec![Value::Text("mate".into()), Value::Missing],
        )])
        .unwrap();
        let result = CategoricalEncoder::new(vec!["victory_status".to_string()]).fit(&table);
        assert!(matches!(result, Err(ChessError::Schema { .. })));
    }
}
