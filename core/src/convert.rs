use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use tracing::info;

use crate::{
    generator::{generate_insert_lines, InsertStatementOptions},
    helpers::format_duration,
    manifest::config::{ConvertConfig, ValidateConfigError, PREVIEW_LINE_COUNT},
    progress::{reporter_for, ProgressReporter},
    simple_file_formatters::sql::SqlFileSplitter,
    source::{guess_table_name, CsvFile, Dataset, Decode, DecodeError, Source},
};

pub const PREVIEW_TRUNCATION_MARKER: &str = "... (truncated)";

#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("Only .csv is supported for file inputs, got {0}")]
    UnsupportedSourceType(String),

    #[error("Input must be a CSV path or a table: {0}")]
    InvalidSourceType(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(#[from] ValidateConfigError),

    #[error("{0}")]
    Decode(#[from] DecodeError),

    #[error("Could not write SQL files: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub table_name: String,
    pub rows: usize,
    pub lines: Vec<String>,
    pub files: Vec<PathBuf>,
    pub elapsed: Duration,
}

fn decode_source(
    source: &Source,
    custom_column_names: Option<&[String]>,
) -> Result<Dataset, ConvertError> {
    match source {
        Source::Path(path) => {
            if !source.is_csv_path() {
                return Err(ConvertError::UnsupportedSourceType(path.display().to_string()));
            }
            Ok(CsvFile::new(path).decode(custom_column_names)?)
        }
        Source::Frame(frame) => Ok(frame.decode(custom_column_names)?),
    }
}

/// The first lines of the output followed by a truncation marker.
pub fn format_preview(lines: &[String]) -> String {
    let mut preview =
        lines.iter().take(PREVIEW_LINE_COUNT).map(String::as_str).collect::<Vec<_>>().join("\n");
    preview.push('\n');
    preview.push_str(PREVIEW_TRUNCATION_MARKER);
    preview
}

/// Runs a full conversion and reports what was produced.
pub fn convert_with_report(
    source: impl Into<Source>,
    config: &ConvertConfig,
    progress: &mut dyn ProgressReporter,
) -> Result<ConversionReport, ConvertError> {
    let start = Instant::now();
    let source = source.into();

    config.validate()?;

    let dataset = decode_source(&source, config.custom_column_names.as_deref())?;
    let table_name = config
        .table_name
        .clone()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| guess_table_name(&source));

    let options = InsertStatementOptions {
        table_name: &table_name,
        columns: &dataset.columns,
        null_values: &config.null_values,
        rows_per_insert: config.rows_per_insert,
        compact: config.compact_sql,
    };
    let lines = generate_insert_lines(&dataset.rows, &options, progress);

    if config.preview {
        println!("{}", format_preview(&lines));
    }

    let splitter = SqlFileSplitter::new(&config.output_dir, &table_name, config.max_file_size_mb);
    let files = splitter.write_lines(&lines, progress)?;

    let elapsed = start.elapsed();
    info!(
        "Converted {} rows into {} files for {} in {}",
        dataset.rows.len(),
        files.len(),
        table_name,
        format_duration(elapsed)
    );

    Ok(ConversionReport { table_name, rows: dataset.rows.len(), lines, files, elapsed })
}

/// Converts `source` with an explicit progress reporter and returns every
/// generated line.
pub fn to_sql_with_progress(
    source: impl Into<Source>,
    config: &ConvertConfig,
    progress: &mut dyn ProgressReporter,
) -> Result<Vec<String>, ConvertError> {
    convert_with_report(source, config, progress).map(|report| report.lines)
}

/// Converts a CSV path or data frame into INSERT statements, writes them to
/// size-capped files and returns every generated line.
pub fn to_sql(
    source: impl Into<Source>,
    config: &ConvertConfig,
) -> Result<Vec<String>, ConvertError> {
    let mut progress = reporter_for(config.use_progress_bar);
    to_sql_with_progress(source, config, progress.as_mut())
}
