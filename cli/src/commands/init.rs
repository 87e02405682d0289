use std::path::PathBuf;

use serde_yaml::Value;
use sqlgen::{
    manifest::yaml::{write_manifest, Manifest, YAML_CONFIG_NAME},
    ConvertConfig,
};

use crate::console::{print_error_message, print_success_message, print_warn_message};

pub fn handle_init_command(
    project_path: PathBuf,
    source: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let manifest_path = project_path.join(YAML_CONFIG_NAME);
    if manifest_path.exists() {
        print_error_message(&format!(
            "{} already exists in {}. Edit it or remove it first.",
            YAML_CONFIG_NAME,
            project_path.display()
        ));
        return Err(format!("{} already exists.", YAML_CONFIG_NAME).into());
    }

    let manifest = Manifest::new(
        source.map(|source| Value::String(source.to_string())),
        ConvertConfig::default(),
    );

    write_manifest(&manifest, &manifest_path).map_err(|e| {
        print_error_message(&format!("Could not write {}: {}", YAML_CONFIG_NAME, e));
        e
    })?;

    print_success_message(&format!("Created {}", manifest_path.display()));
    if source.is_none() {
        print_warn_message(
            "Add a `source:` entry pointing at your CSV file before running sqlgen convert.",
        );
    }

    Ok(())
}
