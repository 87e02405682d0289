use std::path::{Path, PathBuf};

use serde_yaml::Value;
use sqlgen::{
    convert_with_report,
    manifest::yaml::{read_manifest, Manifest, YAML_CONFIG_NAME},
    progress::reporter_for,
    sqlgen_info, ConvertConfig,
};

use crate::{
    cli_interface::ConvertArgs,
    console::{print_error_message, print_success_message},
};

/// Flags given on the command line win over the manifest.
pub fn apply_overrides(config: &mut ConvertConfig, args: &ConvertArgs) {
    if let Some(table_name) = &args.table_name {
        config.table_name = Some(table_name.clone());
    }
    if let Some(output_dir) = &args.output_dir {
        config.output_dir = PathBuf::from(output_dir);
    }
    if let Some(max_file_size_mb) = args.max_file_size_mb {
        config.max_file_size_mb = max_file_size_mb;
    }
    if let Some(rows_per_insert) = args.rows_per_insert {
        config.rows_per_insert = rows_per_insert;
    }
    if !args.null_values.is_empty() {
        config.null_values = args.null_values.clone();
    }
    if !args.columns.is_empty() {
        config.custom_column_names = Some(args.columns.clone());
    }
    if args.preview {
        config.preview = true;
    }
    if args.no_progress {
        config.use_progress_bar = false;
    }
    if args.compact {
        config.compact_sql = true;
    }
}

/// Relative inputs are read from `project_path`, the same way manifest sources
/// resolve against the manifest's directory.
fn resolve_input(project_path: &Path, input: &str) -> PathBuf {
    let input = PathBuf::from(input);
    if input.is_relative() {
        project_path.join(input)
    } else {
        input
    }
}

fn load_manifest(
    project_path: &Path,
    input: Option<&str>,
) -> Result<Manifest, Box<dyn std::error::Error>> {
    if let Some(input) = input {
        let input = resolve_input(project_path, input);
        let source = Value::String(input.to_string_lossy().into_owned());
        return Ok(Manifest::new(Some(source), ConvertConfig::default()));
    }

    let manifest_path = project_path.join(YAML_CONFIG_NAME);
    if !manifest_path.exists() {
        let message = format!(
            "No input given and {} does not exist in {}. Pass a CSV file or run sqlgen init.",
            YAML_CONFIG_NAME,
            project_path.display()
        );
        print_error_message(&message);
        return Err(message.into());
    }

    read_manifest(&manifest_path).map_err(|e| {
        print_error_message(&format!("Could not read {}: {}", YAML_CONFIG_NAME, e));
        e.into()
    })
}

pub fn handle_convert_command(
    project_path: PathBuf,
    input: Option<&str>,
    args: &ConvertArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut manifest = load_manifest(&project_path, input)?;
    apply_overrides(&mut manifest.config, args);

    let source = manifest.source().map_err(|e| {
        print_error_message(&e.to_string());
        e
    })?;

    sqlgen_info!("Converting into {}", manifest.config.output_dir.display());

    let mut progress = reporter_for(manifest.config.use_progress_bar);
    let report = convert_with_report(source, &manifest.config, progress.as_mut()).map_err(|e| {
        print_error_message(&format!("Conversion failed: {}", e));
        e
    })?;

    print_success_message(&format!(
        "Converted {} rows of `{}` into {} lines across {} files in {}",
        report.rows,
        report.table_name,
        report.lines.len(),
        report.files.len(),
        manifest.config.output_dir.display()
    ));

    Ok(())
}
