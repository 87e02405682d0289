// public
pub mod generator;
pub mod manifest;
pub mod progress;
pub mod source;

mod convert;
pub use convert::{
    convert_with_report, format_preview, to_sql, to_sql_with_progress, ConversionReport,
    ConvertError, PREVIEW_TRUNCATION_MARKER,
};

mod simple_file_formatters;
pub use simple_file_formatters::sql::{SqlFileSplitter, BYTES_PER_MEBIBYTE};

mod helpers;
pub use helpers::format_duration;

mod logger;
pub use logger::{setup_info_logger, setup_logger};

pub use manifest::config::ConvertConfig;
pub use source::{guess_table_name, Cell, DataFrame, DecodeError, Source};
// export 3rd party dependencies
pub use tracing::level_filters::LevelFilter;
pub use tracing::{error as sqlgen_error, info as sqlgen_info};
