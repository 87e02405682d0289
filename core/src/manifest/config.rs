use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_OUTPUT_DIR: &str = "output_sqls";
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 100;
pub const DEFAULT_ROWS_PER_INSERT: usize = 100_000;
pub const DEFAULT_NULL_VALUES: [&str; 3] = ["", "null", "NULL"];
pub const PREVIEW_LINE_COUNT: usize = 10;

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_max_file_size_mb() -> u64 {
    DEFAULT_MAX_FILE_SIZE_MB
}

fn default_rows_per_insert() -> usize {
    DEFAULT_ROWS_PER_INSERT
}

pub fn default_null_values() -> Vec<String> {
    DEFAULT_NULL_VALUES.iter().map(|value| value.to_string()).collect()
}

fn default_true() -> bool {
    true
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ValidateConfigError {
    #[error("rows_per_insert must be greater than zero")]
    ZeroRowsPerInsert,
}

/// Options for one conversion. Every field has a default, so a manifest only
/// needs to mention what it changes.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ConvertConfig {
    /// Target table, guessed from the source when not set or empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Ceiling per output file in mebibytes.
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,

    /// Rows per INSERT statement.
    #[serde(default = "default_rows_per_insert")]
    pub rows_per_insert: usize,

    /// Values rendered as NULL, compared case-insensitively after trimming.
    #[serde(default = "default_null_values")]
    pub null_values: Vec<String>,

    /// Replaces the source's column names. For CSV input this also means the
    /// first record is data, not a header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_column_names: Option<Vec<String>>,

    #[serde(default)]
    pub preview: bool,

    #[serde(default = "default_true")]
    pub use_progress_bar: bool,

    /// Joins values with `,` instead of `, `.
    #[serde(default)]
    pub compact_sql: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            table_name: None,
            output_dir: default_output_dir(),
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
            rows_per_insert: DEFAULT_ROWS_PER_INSERT,
            null_values: default_null_values(),
            custom_column_names: None,
            preview: false,
            use_progress_bar: true,
            compact_sql: false,
        }
    }
}

impl ConvertConfig {
    pub fn validate(&self) -> Result<(), ValidateConfigError> {
        if self.rows_per_insert == 0 {
            return Err(ValidateConfigError::ZeroRowsPerInsert);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConvertConfig::default();

        assert_eq!(config.table_name, None);
        assert_eq!(config.output_dir, PathBuf::from("output_sqls"));
        assert_eq!(config.max_file_size_mb, 100);
        assert_eq!(config.rows_per_insert, 100_000);
        assert_eq!(config.null_values, vec!["", "null", "NULL"]);
        assert!(!config.preview);
        assert!(config.use_progress_bar);
        assert!(!config.compact_sql);
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config: ConvertConfig = serde_yaml::from_str("{}").unwrap();

        assert_eq!(config, ConvertConfig::default());
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r#"
          table_name: people
          rows_per_insert: 500
          null_values: ["N/A"]
          compact_sql: true
        "#;

        let config: ConvertConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.table_name.as_deref(), Some("people"));
        assert_eq!(config.rows_per_insert, 500);
        assert_eq!(config.null_values, vec!["N/A"]);
        assert!(config.compact_sql);
        assert!(config.use_progress_bar);
        assert_eq!(config.max_file_size_mb, 100);
    }

    #[test]
    fn test_validate() {
        assert!(ConvertConfig::default().validate().is_ok());

        let config = ConvertConfig { rows_per_insert: 0, ..Default::default() };
        assert_eq!(config.validate(), Err(ValidateConfigError::ZeroRowsPerInsert));

        let config = ConvertConfig { table_name: Some(String::new()), ..Default::default() };
        assert!(config.validate().is_ok());
    }
}
