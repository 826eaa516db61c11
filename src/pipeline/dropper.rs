//! Removal of columns unusable as numeric features
//!
//! Identifiers, timestamps and free-text move lists carry no model signal
//! in this framing; the drop list is fixed at construction, never inferred
//! from data. With `corr` set the derived win indicators are dropped too,
//! keeping the targets out of the feature table.

use super::{FittedStage, Stage};
use super::target::{BLACK_WINS, WHITE_WINS};
use crate::{Result, Table};

pub struct ColumnDropper {
    columns: Vec<String>,
}

impl ColumnDropper {
    pub fn new(mut columns: Vec<String>, corr: bool) -> Self {
        if corr {
            columns.push(WHITE_WINS.to_string());
            columns.push(BLACK_WINS.to_string());
        }
        ColumnDropper { columns }
    }

    pub fn from_config(config: &crate::PipelineConfig) -> Self {
        ColumnDropper::new(config.drop_columns.clone(), config.corr)
    }
}

impl Stage for ColumnDropper {
    fn name(&self) -> &'static str {
        "column_dropper"
    }

    fn fit(&self, table: &Table) -> Result<Box<dyn FittedStage>> {
        for name in &self.columns {
            table.require(name)?;
        }
        Ok(Box::new(FittedColumnDropper {
            columns: self.columns.clone(),
        }))
    }
}

pub struct FittedColumnDropper {
    columns: Vec<String>,
}

impl FittedStage for FittedColumnDropper {
    fn name(&self) -> &'static str {
        "column_dropper"
    }

    fn transform(&self, table: Table) -> Result<Table> {
        table.drop_columns(&self.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;
    use crate::ChessError;

    fn sample() -> Table {
        Table::new(vec![
            Column::from_i64("id", vec![1, 2, 3]),
            Column::from_i64("turns", vec![10, 20, 30]),
            Column::from_i64(WHITE_WINS, vec![1, 0, 1]),
            Column::from_i64(BLACK_WINS, vec![0, 1, 0]),
        ])
        .unwrap()
    }

    #[test]
    fn drops_exactly_the_configured_columns() {
        let dropper = ColumnDropper::new(vec!["id".to_string()], false);
        let fitted = dropper.fit(&sample()).unwrap();
        let result = fitted.transform(sample()).unwrap();

        assert_eq!(result.num_rows(), 3);
        assert_eq!(result.column_names(), vec!["turns", WHITE_WINS, BLACK_WINS]);
    }

    #[test]
    fn corr_mode_also_drops_win_indicators() {
        let dropper = ColumnDropper::new(vec!["id".to_string()], true);
        let fitted = dropper.fit(&sample()).unwrap();
        let result = fitted.transform(sample()).unwrap();

        assert_eq!(result.column_names(), vec!["turns"]);
    }

    #[test]
    fn absent_column_is_an_error() {
        let dropper = ColumnDropper::new(vec!["moves".to_string()], false);
        let result = dropper.fit(&sample());
        assert!(matches!(result, Err(ChessError::ColumnNotFound(_))));
    }
}
