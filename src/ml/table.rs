//! Loosely typed tabular records.
//!
//! Requests for the tabular model arrive as JSON in one of three layouts:
//!
//! - a single record: `{"Age": 24, "Sex": "M"}`
//! - an array of records: `[{"Age": 24, "Sex": "M"}, ...]`
//! - column-oriented: `{"Age": [24, 30], "Sex": ["M", "F"]}`
//!
//! [`Record::parse_many`] accepts all three and yields one [`Record`] per row.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AssistError, Result};

/// A single scalar value in a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Cell {
    /// Convert a JSON scalar. Nested arrays and objects are rejected.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Cell::Null),
            Value::Bool(b) => Ok(Cell::Bool(*b)),
            Value::Number(n) => n
                .as_f64()
                .map(Cell::Number)
                .ok_or_else(|| AssistError::invalid_input(format!("Unsupported number: {n}"))),
            Value::String(s) => Ok(Cell::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => Err(AssistError::invalid_input(
                "Nested values are not supported in a record",
            )),
        }
    }

    /// Numeric view of the cell. Numeric strings are accepted.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => s.trim().parse().ok(),
            Cell::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Cell::Null => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => write!(f, "null"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Text(s) => write!(f, "{s}"),
        }
    }
}

/// One row: column name -> value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    cells: BTreeMap<String, Cell>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with<S: Into<String>>(mut self, column: S, cell: Cell) -> Self {
        self.insert(column, cell);
        self
    }

    pub fn insert<S: Into<String>>(&mut self, column: S, cell: Cell) {
        self.cells.insert(column.into(), cell);
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.cells.get(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Numeric value of a required column.
    pub fn number(&self, column: &str) -> Result<f64> {
        let cell = self
            .get(column)
            .ok_or_else(|| AssistError::invalid_input(format!("Missing column: {column}")))?;
        cell.as_number().ok_or_else(|| {
            AssistError::invalid_input(format!("Column {column} must be numeric, got {cell}"))
        })
    }

    /// Text value of a required column.
    pub fn text(&self, column: &str) -> Result<&str> {
        let cell = self
            .get(column)
            .ok_or_else(|| AssistError::invalid_input(format!("Missing column: {column}")))?;
        cell.as_text().ok_or_else(|| {
            AssistError::invalid_input(format!("Column {column} must be a string, got {cell}"))
        })
    }

    /// Build a record from a JSON object of scalars.
    pub fn from_object(object: &Map<String, Value>) -> Result<Self> {
        let mut record = Record::new();
        for (column, value) in object {
            record.insert(column.clone(), Cell::from_json(value)?);
        }
        Ok(record)
    }

    /// Parse any supported request layout into rows.
    pub fn parse_many(value: &Value) -> Result<Vec<Record>> {
        let records = match value {
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::Object(object) => Record::from_object(object),
                    _ => Err(AssistError::invalid_input("Every record must be a JSON object")),
                })
                .collect::<Result<Vec<_>>>()?,
            Value::Object(object) if is_columnar(object) => Record::from_columns(object)?,
            Value::Object(object) => vec![Record::from_object(object)?],
            _ => {
                return Err(AssistError::invalid_input(
                    "Expected a JSON object or an array of objects",
                ));
            }
        };

        if records.is_empty() {
            return Err(AssistError::invalid_input("No records provided"));
        }
        Ok(records)
    }

    fn from_columns(object: &Map<String, Value>) -> Result<Vec<Record>> {
        let mut rows: Option<usize> = None;
        for (column, value) in object {
            let len = value.as_array().map_or(0, Vec::len);
            match rows {
                None => rows = Some(len),
                Some(expected) if expected != len => {
                    return Err(AssistError::invalid_input(format!(
                        "All columns must have the same length: {column} has {len}, expected {expected}"
                    )));
                }
                Some(_) => {}
            }
        }

        let mut records = vec![Record::new(); rows.unwrap_or(0)];
        for (column, value) in object {
            let cells = value.as_array().map(Vec::as_slice).unwrap_or_default();
            for (record, cell) in records.iter_mut().zip(cells) {
                record.insert(column.clone(), Cell::from_json(cell)?);
            }
        }
        Ok(records)
    }
}

fn is_columnar(object: &Map<String, Value>) -> bool {
    !object.is_empty() && object.values().all(Value::is_array)
}
