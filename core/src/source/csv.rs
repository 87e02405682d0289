use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use csv::ReaderBuilder;
use tracing::info;

use super::{resolve_column_override, Dataset, Decode, DecodeError};

/// A comma separated file on disk.
#[derive(Debug, Clone)]
pub struct CsvFile {
    path: PathBuf,
}

impl CsvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Decode for CsvFile {
    fn decode(&self, custom_column_names: Option<&[String]>) -> Result<Dataset, DecodeError> {
        let file = File::open(&self.path)?;
        let dataset = decode_csv_reader(file, custom_column_names)?;

        info!(
            "Decoded {} rows with {} columns from {}",
            dataset.rows.len(),
            dataset.columns.len(),
            self.path.display()
        );

        Ok(dataset)
    }
}

/// Reads every record from `reader`. The first record is the header unless
/// custom column names are given, in which case every record is data.
pub fn decode_csv_reader<R: Read>(
    reader: R,
    custom_column_names: Option<&[String]>,
) -> Result<Dataset, DecodeError> {
    let mut reader = ReaderBuilder::new().has_headers(false).from_reader(reader);

    let mut records = reader
        .records()
        .map(|record| record.map(|record| record.iter().map(str::to_string).collect::<Vec<_>>()))
        .collect::<Result<Vec<_>, _>>()?;

    let natural_count = records.first().map(Vec::len).unwrap_or(0);

    if let Some(names) = resolve_column_override(custom_column_names, natural_count)? {
        return Ok(Dataset { columns: names.to_vec(), rows: records });
    }

    if records.is_empty() {
        return Ok(Dataset::default());
    }

    let columns = records.remove(0);
    Ok(Dataset { columns, rows: records })
}
