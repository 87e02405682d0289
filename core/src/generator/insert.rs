use tracing::info;

use crate::{
    generator::escape::{escape_value, quote_identifier},
    progress::ProgressReporter,
};

pub struct InsertStatementOptions<'a> {
    pub table_name: &'a str,
    pub columns: &'a [String],
    pub null_values: &'a [String],
    pub rows_per_insert: usize,
    pub compact: bool,
}

pub fn generate_insert_header(table_name: &str, columns: &[String]) -> String {
    let column_string =
        columns.iter().map(|column| quote_identifier(column)).collect::<Vec<_>>().join(", ");

    format!("INSERT INTO {} ({}) VALUES", quote_identifier(table_name), column_string)
}

fn generate_value_row(row: &[String], null_values: &[String], compact: bool, last: bool) -> String {
    let separator = if compact { "," } else { ", " };
    let values = row
        .iter()
        .map(|value| escape_value(Some(value.as_str()), null_values))
        .collect::<Vec<_>>()
        .join(separator);
    let suffix = if last { ';' } else { ',' };

    format!("\t({}){}", values, suffix)
}

/// Renders rows as batched INSERT statements, one header line per batch
/// followed by one line per row.
pub fn generate_insert_lines(
    rows: &[Vec<String>],
    options: &InsertStatementOptions<'_>,
    progress: &mut dyn ProgressReporter,
) -> Vec<String> {
    // rows_per_insert is validated to be non-zero before we get here
    let batch_size = options.rows_per_insert.max(1);
    let batch_count = rows.len().div_ceil(batch_size);
    let header = generate_insert_header(options.table_name, options.columns);

    let mut lines = Vec::with_capacity(rows.len() + batch_count);

    progress.start("Generating INSERT statements", batch_count as u64);
    for batch in rows.chunks(batch_size) {
        lines.push(header.clone());
        for (i, row) in batch.iter().enumerate() {
            lines.push(generate_value_row(
                row,
                options.null_values,
                options.compact,
                i == batch.len() - 1,
            ));
        }
        progress.advance(1);
    }
    progress.finish();

    info!(
        "Generated {} INSERT statements for {} rows into {}",
        batch_count,
        rows.len(),
        options.table_name
    );

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{tests::RecordingProgress, NoProgress};

    fn nulls() -> Vec<String> {
        vec!["".to_string(), "null".to_string(), "NULL".to_string()]
    }

    fn rows(count: usize) -> Vec<Vec<String>> {
        (0..count).map(|i| vec![i.to_string(), format!("name{}", i)]).collect()
    }

    fn columns() -> Vec<String> {
        vec!["id".to_string(), "name".to_string()]
    }

    #[test]
    fn test_generate_insert_header() {
        assert_eq!(
            generate_insert_header("people", &columns()),
            "INSERT INTO `people` (`id`, `name`) VALUES"
        );
    }

    #[test]
    fn test_batches_are_ceil_of_rows_over_batch_size() {
        let columns = columns();
        let nulls = nulls();
        let data = rows(7);
        let options = InsertStatementOptions {
            table_name: "t",
            columns: &columns,
            null_values: &nulls,
            rows_per_insert: 3,
            compact: false,
        };

        let lines = generate_insert_lines(&data, &options, &mut NoProgress);

        let headers: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.starts_with("INSERT INTO"))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(headers, vec![0, 4, 8]);
        assert_eq!(lines.len(), 7 + 3);

        // every line before a header (and the final line) closes its statement
        for &header in headers.iter().skip(1) {
            assert!(lines[header - 1].ends_with(';'));
        }
        assert_eq!(lines.last().map(String::as_str), Some("\t(6, 'name6');"));
        assert_eq!(lines[1], "\t(0, 'name0'),");
        assert_eq!(lines[2], "\t(1, 'name1'),");
        assert_eq!(lines[3], "\t(2, 'name2');");
    }

    #[test]
    fn test_exact_multiple_has_no_empty_batch() {
        let columns = columns();
        let nulls = nulls();
        let data = rows(4);
        let options = InsertStatementOptions {
            table_name: "t",
            columns: &columns,
            null_values: &nulls,
            rows_per_insert: 2,
            compact: false,
        };

        let lines = generate_insert_lines(&data, &options, &mut NoProgress);

        assert_eq!(lines.len(), 6);
        assert_eq!(lines.iter().filter(|line| line.ends_with(';')).count(), 2);
    }

    #[test]
    fn test_compact_output_drops_value_spacing() {
        let columns = columns();
        let nulls = nulls();
        let data = vec![vec!["1".to_string(), "".to_string()]];
        let options = InsertStatementOptions {
            table_name: "t",
            columns: &columns,
            null_values: &nulls,
            rows_per_insert: 10,
            compact: true,
        };

        let lines = generate_insert_lines(&data, &options, &mut NoProgress);

        assert_eq!(lines, vec!["INSERT INTO `t` (`id`, `name`) VALUES", "\t(1,NULL);"]);
    }

    #[test]
    fn test_no_rows_no_lines() {
        let columns = columns();
        let nulls = nulls();
        let options = InsertStatementOptions {
            table_name: "t",
            columns: &columns,
            null_values: &nulls,
            rows_per_insert: 10,
            compact: false,
        };
        let mut progress = RecordingProgress::default();

        let lines = generate_insert_lines(&[], &options, &mut progress);

        assert!(lines.is_empty());
        assert_eq!(progress.stages, vec![("Generating INSERT statements".to_string(), 0)]);
    }

    #[test]
    fn test_progress_advances_once_per_batch() {
        let columns = columns();
        let nulls = nulls();
        let data = rows(5);
        let options = InsertStatementOptions {
            table_name: "t",
            columns: &columns,
            null_values: &nulls,
            rows_per_insert: 2,
            compact: false,
        };
        let mut progress = RecordingProgress::default();

        generate_insert_lines(&data, &options, &mut progress);

        assert_eq!(progress.advanced, 3);
        assert_eq!(progress.finished, 1);
    }
}
