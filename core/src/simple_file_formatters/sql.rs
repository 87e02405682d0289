use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::progress::ProgressReporter;

pub const BYTES_PER_MEBIBYTE: u64 = 1024 * 1024;

/// Writes SQL lines to `<base_name>_<n>.sql` files, starting a new file
/// whenever the next line would push the current one past `max_bytes`.
#[derive(Debug, Clone)]
pub struct SqlFileSplitter {
    output_dir: PathBuf,
    base_name: String,
    max_bytes: u64,
}

impl SqlFileSplitter {
    pub fn new(output_dir: impl Into<PathBuf>, base_name: &str, max_file_size_mb: u64) -> Self {
        SqlFileSplitter {
            output_dir: output_dir.into(),
            base_name: base_name.to_string(),
            max_bytes: max_file_size_mb.saturating_mul(BYTES_PER_MEBIBYTE),
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    pub fn file_path(&self, index: usize) -> PathBuf {
        self.output_dir.join(format!("{}_{}.sql", self.base_name, index))
    }

    /// Returns the written paths in order. A single line larger than the
    /// ceiling still gets written, alone in its own file.
    pub fn write_lines(
        &self,
        lines: &[String],
        progress: &mut dyn ProgressReporter,
    ) -> Result<Vec<PathBuf>, std::io::Error> {
        fs::create_dir_all(&self.output_dir)?;

        let mut written = Vec::new();
        let mut pending: Vec<&str> = Vec::new();
        let mut pending_bytes: u64 = 0;

        progress.start("Writing SQL to files", lines.len() as u64);
        for line in lines {
            // every line is counted with its newline separator
            let line_bytes = line.len() as u64 + 1;

            if pending_bytes + line_bytes > self.max_bytes && !pending.is_empty() {
                written.push(self.flush(written.len() + 1, &pending)?);
                pending.clear();
                pending_bytes = 0;
            }

            pending.push(line);
            pending_bytes += line_bytes;
            progress.advance(1);
        }

        if !pending.is_empty() {
            written.push(self.flush(written.len() + 1, &pending)?);
        }
        progress.finish();

        info!("Wrote {} SQL files to {}", written.len(), self.output_dir.display());

        Ok(written)
    }

    fn flush(&self, index: usize, lines: &[&str]) -> Result<PathBuf, std::io::Error> {
        let path = self.file_path(index);
        write_joined_lines(&path, lines)?;
        debug!("Wrote {} lines to {}", lines.len(), path.display());

        Ok(path)
    }
}

fn write_joined_lines(path: &Path, lines: &[&str]) -> Result<(), std::io::Error> {
    let mut writer = BufWriter::new(File::create(path)?);

    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            writer.write_all(b"\n")?;
        }
        writer.write_all(line.as_bytes())?;
    }

    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{tests::RecordingProgress, NoProgress};
    use tempfile::tempdir;

    fn lines(count: usize, width: usize) -> Vec<String> {
        (0..count).map(|i| format!("{:0width$}", i, width = width)).collect()
    }

    fn read_all(paths: &[PathBuf]) -> Vec<String> {
        paths.iter().map(|path| fs::read_to_string(path).unwrap()).collect()
    }

    #[test]
    fn test_everything_fits_in_one_file() {
        let dir = tempdir().unwrap();
        let splitter = SqlFileSplitter::new(dir.path(), "users", 1);
        let input = lines(3, 4);

        let paths = splitter.write_lines(&input, &mut NoProgress).unwrap();

        assert_eq!(paths, vec![dir.path().join("users_1.sql")]);
        assert_eq!(read_all(&paths), vec!["0000\n0001\n0002"]);
    }

    #[test]
    fn test_splits_at_ceiling_and_preserves_content() {
        let dir = tempdir().unwrap();
        // each line costs 5 bytes, so two lines fit under 12 bytes
        let splitter = SqlFileSplitter::new(dir.path(), "t", 1).with_max_bytes(12);
        let input = lines(5, 4);

        let paths = splitter.write_lines(&input, &mut NoProgress).unwrap();

        assert_eq!(
            paths,
            vec![dir.path().join("t_1.sql"), dir.path().join("t_2.sql"), dir.path().join("t_3.sql")]
        );

        let contents = read_all(&paths);
        for content in &contents {
            assert!(content.len() as u64 <= splitter.max_bytes());
        }
        assert_eq!(contents.join("\n"), input.join("\n"));
    }

    #[test]
    fn test_exact_fit_counts_newlines() {
        let dir = tempdir().unwrap();
        let splitter = SqlFileSplitter::new(dir.path(), "t", 1).with_max_bytes(10);
        let input = lines(3, 4);

        let paths = splitter.write_lines(&input, &mut NoProgress).unwrap();

        assert_eq!(read_all(&paths), vec!["0000\n0001", "0002"]);
    }

    #[test]
    fn test_oversized_line_gets_its_own_file() {
        let dir = tempdir().unwrap();
        let splitter = SqlFileSplitter::new(dir.path(), "t", 1).with_max_bytes(8);
        let input = vec!["ab".to_string(), "x".repeat(20), "cd".to_string()];

        let paths = splitter.write_lines(&input, &mut NoProgress).unwrap();

        assert_eq!(read_all(&paths), vec!["ab".to_string(), "x".repeat(20), "cd".to_string()]);
    }

    #[test]
    fn test_multibyte_characters_count_as_bytes() {
        let dir = tempdir().unwrap();
        // "é" is two bytes, so each line costs 3
        let splitter = SqlFileSplitter::new(dir.path(), "t", 1).with_max_bytes(5);
        let input = vec!["é".to_string(), "é".to_string()];

        let paths = splitter.write_lines(&input, &mut NoProgress).unwrap();

        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn test_creates_missing_output_dir_and_writes_nothing_for_no_lines() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("nested").join("out");
        let splitter = SqlFileSplitter::new(&output, "t", 1);
        let mut progress = RecordingProgress::default();

        let paths = splitter.write_lines(&[], &mut progress).unwrap();

        assert!(paths.is_empty());
        assert!(output.is_dir());
        assert_eq!(fs::read_dir(&output).unwrap().count(), 0);
        assert_eq!(progress.stages, vec![("Writing SQL to files".to_string(), 0)]);
    }

    #[test]
    fn test_mebibyte_ceiling() {
        let splitter = SqlFileSplitter::new("out", "t", 100);

        assert_eq!(splitter.max_bytes(), 100 * 1024 * 1024);
    }
}
