mod csv;
mod frame;

use std::path::{Path, PathBuf};

pub use self::csv::{decode_csv_reader, CsvFile};
pub use frame::{Cell, DataFrame};
use serde_yaml::Value;

use crate::convert::ConvertError;

pub const CSV_EXTENSION: &str = ".csv";
pub const FALLBACK_TABLE_NAME: &str = "dataframe_table";

#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("column override has {found} names but the source has {expected} columns")]
    ColumnCountMismatch { expected: usize, found: usize },

    #[error("row {row} has {found} values but the frame has {expected} columns")]
    RowLengthMismatch { row: usize, expected: usize, found: usize },

    #[error("Could not read csv: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("Could not open source: {0}")]
    Io(#[from] std::io::Error),
}

/// Column names plus stringified rows, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub trait Decode {
    /// Produces the dataset. An override replaces the natural column names and
    /// must have exactly as many entries.
    fn decode(&self, custom_column_names: Option<&[String]>) -> Result<Dataset, DecodeError>;
}

/// An empty override list means "no override".
pub(crate) fn resolve_column_override<'a>(
    custom_column_names: Option<&'a [String]>,
    natural_count: usize,
) -> Result<Option<&'a [String]>, DecodeError> {
    match custom_column_names {
        Some(names) if !names.is_empty() => {
            if names.len() != natural_count {
                return Err(DecodeError::ColumnCountMismatch {
                    expected: natural_count,
                    found: names.len(),
                });
            }
            Ok(Some(names))
        }
        _ => Ok(None),
    }
}

#[derive(Debug, Clone)]
pub enum Source {
    Path(PathBuf),
    Frame(DataFrame),
}

impl From<PathBuf> for Source {
    fn from(value: PathBuf) -> Self {
        Source::Path(value)
    }
}

impl From<&Path> for Source {
    fn from(value: &Path) -> Self {
        Source::Path(value.to_path_buf())
    }
}

impl From<&str> for Source {
    fn from(value: &str) -> Self {
        Source::Path(PathBuf::from(value))
    }
}

impl From<DataFrame> for Source {
    fn from(value: DataFrame) -> Self {
        Source::Frame(value)
    }
}

fn describe_value(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

fn cell_from_value(value: &Value) -> Result<Cell, ConvertError> {
    match value {
        Value::Null => Ok(Cell::Missing),
        Value::Bool(value) => Ok(Cell::Bool(*value)),
        Value::Number(number) => match number.as_i64() {
            Some(int_value) => Ok(Cell::Integer(int_value)),
            None => Ok(number.as_f64().map(Cell::Float).unwrap_or(Cell::Missing)),
        },
        Value::String(value) => Ok(Cell::Text(value.clone())),
        other => Err(ConvertError::InvalidSourceType(format!(
            "table cells must be scalars, found {}",
            describe_value(other)
        ))),
    }
}

fn frame_from_mapping(value: &Value) -> Result<DataFrame, ConvertError> {
    let columns = value
        .get("columns")
        .and_then(Value::as_sequence)
        .ok_or_else(|| {
            ConvertError::InvalidSourceType("inline table needs a `columns` list".to_string())
        })?
        .iter()
        .map(|column| match column {
            Value::String(name) => Ok(name.clone()),
            other => Err(ConvertError::InvalidSourceType(format!(
                "column names must be strings, found {}",
                describe_value(other)
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let rows = match value.get("rows") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Sequence(rows)) => rows
            .iter()
            .map(|row| match row {
                Value::Sequence(cells) => cells.iter().map(cell_from_value).collect(),
                other => Err(ConvertError::InvalidSourceType(format!(
                    "table rows must be lists, found {}",
                    describe_value(other)
                ))),
            })
            .collect::<Result<Vec<Vec<Cell>>, _>>()?,
        Some(other) => {
            return Err(ConvertError::InvalidSourceType(format!(
                "inline table `rows` must be a list, found {}",
                describe_value(other)
            )))
        }
    };

    Ok(DataFrame::new(columns, rows)?)
}

impl Source {
    /// Builds a source from a loosely typed value, as found in manifests: a
    /// string is a file path, a mapping with `columns` and `rows` is an inline
    /// table. Anything else is rejected.
    pub fn from_value(value: &Value) -> Result<Self, ConvertError> {
        match value {
            Value::String(path) => Ok(Source::Path(PathBuf::from(path))),
            Value::Mapping(_) => Ok(Source::Frame(frame_from_mapping(value)?)),
            other => Err(ConvertError::InvalidSourceType(format!(
                "input must be a CSV path or a table, found {}",
                describe_value(other)
            ))),
        }
    }

    pub fn is_csv_path(&self) -> bool {
        match self {
            Source::Path(path) => path.to_string_lossy().ends_with(CSV_EXTENSION),
            Source::Frame(_) => false,
        }
    }
}

/// Table name used when none is configured: the file stem for paths, a fixed
/// name for in-memory frames.
pub fn guess_table_name(source: &Source) -> String {
    match source {
        Source::Path(path) => path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .filter(|stem| !stem.is_empty())
            .unwrap_or_else(|| FALLBACK_TABLE_NAME.to_string()),
        Source::Frame(_) => FALLBACK_TABLE_NAME.to_string(),
    }
}
