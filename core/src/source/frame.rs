use std::fmt::{Display, Formatter};

use tracing::info;

use super::{resolve_column_override, Dataset, Decode, DecodeError};

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Missing,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    /// NaN floats count as missing, same as an explicit gap.
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Missing => true,
            Cell::Float(value) => value.is_nan(),
            _ => false,
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Missing => Ok(()),
            Cell::Bool(value) => write!(f, "{}", value),
            Cell::Integer(value) => write!(f, "{}", value),
            Cell::Float(value) => write!(f, "{}", value),
            Cell::Text(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Integer(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Missing)
    }
}

/// An in-memory table: named columns and rows of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct DataFrame {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl DataFrame {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self, DecodeError> {
        if let Some((row, cells)) =
            rows.iter().enumerate().find(|(_, cells)| cells.len() != columns.len())
        {
            return Err(DecodeError::RowLengthMismatch {
                row,
                expected: columns.len(),
                found: cells.len(),
            });
        }

        Ok(DataFrame { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns a copy with every missing cell replaced by `fill`.
    pub fn fill_missing(&self, fill: &str) -> DataFrame {
        let rows = self
            .rows
            .iter()
            .map(|cells| {
                cells
                    .iter()
                    .map(|cell| if cell.is_missing() { Cell::from(fill) } else { cell.clone() })
                    .collect()
            })
            .collect();

        DataFrame { columns: self.columns.clone(), rows }
    }

    pub fn to_string_rows(&self) -> Vec<Vec<String>> {
        self.rows.iter().map(|cells| cells.iter().map(Cell::to_string).collect()).collect()
    }
}

impl Decode for DataFrame {
    fn decode(&self, custom_column_names: Option<&[String]>) -> Result<Dataset, DecodeError> {
        let columns = match resolve_column_override(custom_column_names, self.columns.len())? {
            Some(names) => names.to_vec(),
            None => self.columns.clone(),
        };

        let rows = self.fill_missing("").to_string_rows();
        info!("Decoded {} rows with {} columns from data frame", rows.len(), columns.len());

        Ok(Dataset { columns, rows })
    }
}
