//! Typed in-memory record table
//!
//! Column-major storage for the game dataset. Every transformation stage
//! consumes a `Table` by value and produces a new one; rows always share
//! one schema and column names are unique.

use std::fmt;

use crate::{ChessError, Result};

/// A single cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Missing,
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Numeric view of the value; `None` for missing entries
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
            Value::Text(_) | Value::Missing => None,
        }
    }

    /// Category key used by the label encoder; `None` for missing entries
    pub fn category(&self) -> Option<String> {
        match self {
            Value::Text(v) => Some(v.clone()),
            Value::Int(v) => Some(v.to_string()),
            Value::Float(v) => Some(format!("{}", v)),
            Value::Bool(v) => Some(v.to_string()),
            Value::Missing => None,
        }
    }

    fn kind(&self) -> Option<ColumnType> {
        match self {
            Value::Text(_) => Some(ColumnType::Text),
            Value::Int(_) => Some(ColumnType::Int),
            Value::Float(_) => Some(ColumnType::Float),
            Value::Bool(_) => Some(ColumnType::Bool),
            Value::Missing => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Missing => write!(f, ""),
        }
    }
}

/// Semantic type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Int,
    Float,
    Bool,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Text => write!(f, "text"),
            ColumnType::Int => write!(f, "int"),
            ColumnType::Float => write!(f, "float"),
            ColumnType::Bool => write!(f, "bool"),
        }
    }
}

/// A named, ordered column of values
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Column {
            name: name.into(),
            values,
        }
    }

    /// Convenience constructor from plain floats
    pub fn from_f64(name: impl Into<String>, values: Vec<f64>) -> Self {
        Column::new(name, values.into_iter().map(Value::Float).collect())
    }

    /// Convenience constructor from integer codes
    pub fn from_i64(name: impl Into<String>, values: Vec<i64>) -> Self {
        Column::new(name, values.into_iter().map(Value::Int).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Column type inferred from the first non-missing value.
    /// A column of only missing values reports `Float` (it can only ever
    /// be consumed numerically, by the imputer).
    pub fn kind(&self) -> ColumnType {
        self.values
            .iter()
            .find_map(Value::kind)
            .unwrap_or(ColumnType::Float)
    }

    /// Numeric view of the whole column; missing entries become `None`.
    /// Fails on text values, which have no numeric interpretation.
    pub fn numeric_values(&self) -> Result<Vec<Option<f64>>> {
        self.values
            .iter()
            .map(|v| match v {
                Value::Missing => Ok(None),
                Value::Text(_) => Err(ChessError::schema(
                    &self.name,
                    "text value where a numeric column was expected",
                )),
                other => Ok(other.as_f64()),
            })
            .collect()
    }
}

/// An ordered collection of equally sized, uniquely named columns
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table, enforcing the schema invariants: unique column names
    /// and equal column lengths.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut seen = std::collections::HashSet::new();
        for col in &columns {
            if !seen.insert(col.name.clone()) {
                return Err(ChessError::schema(&col.name, "duplicate column name"));
            }
        }
        if let Some(first) = columns.first() {
            let rows = first.len();
            for col in &columns {
                if col.len() != rows {
                    return Err(ChessError::schema(
                        &col.name,
                        format!("column length {} does not match table length {}", col.len(), rows),
                    ));
                }
            }
        }
        Ok(Table { columns })
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Like [`Table::column`], but absence is an error
    pub fn require(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| ChessError::ColumnNotFound(name.to_string()))
    }

    /// Ordered (name, type) pairs
    pub fn schema(&self) -> Vec<(String, ColumnType)> {
        self.columns
            .iter()
            .map(|c| (c.name.clone(), c.kind()))
            .collect()
    }

    /// Remove exactly the named columns; any absent name is an error
    pub fn drop_columns(mut self, names: &[String]) -> Result<Table> {
        for name in names {
            if !self.has_column(name) {
                return Err(ChessError::ColumnNotFound(name.clone()));
            }
        }
        self.columns.retain(|c| !names.contains(&c.name));
        Ok(self)
    }

    /// Append a new column; duplicating an existing name is an error
    pub fn with_column(mut self, column: Column) -> Result<Table> {
        if self.has_column(&column.name) {
            return Err(ChessError::schema(&column.name, "duplicate column name"));
        }
        if !self.columns.is_empty() && column.len() != self.num_rows() {
            return Err(ChessError::schema(
                &column.name,
                format!(
                    "column length {} does not match table length {}",
                    column.len(),
                    self.num_rows()
                ),
            ));
        }
        self.columns.push(column);
        Ok(self)
    }

    /// Replace the values of an existing column in place
    pub fn replace_column(mut self, column: Column) -> Result<Table> {
        if column.len() != self.num_rows() {
            return Err(ChessError::schema(
                &column.name,
                format!(
                    "column length {} does not match table length {}",
                    column.len(),
                    self.num_rows()
                ),
            ));
        }
        let slot = self
            .columns
            .iter_mut()
            .find(|c| c.name == column.name)
            .ok_or_else(|| ChessError::ColumnNotFound(column.name.clone()))?;
        *slot = column;
        Ok(self)
    }

    /// Keep only the rows where `keep` is true, preserving order
    pub fn filter_rows(mut self, keep: &[bool]) -> Result<Table> {
        if keep.len() != self.num_rows() {
            return Err(ChessError::schema(
                "<mask>",
                format!(
                    "row mask length {} does not match table length {}",
                    keep.len(),
                    self.num_rows()
                ),
            ));
        }
        for col in &mut self.columns {
            let mut it = keep.iter();
            col.values.retain(|_| *it.next().unwrap());
        }
        Ok(self)
    }
}
