use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use tracing::error;

use crate::{
    convert::ConvertError,
    manifest::config::{ConvertConfig, ValidateConfigError},
    source::Source,
};

pub const YAML_CONFIG_NAME: &str = "sqlgen.yaml";

/// A conversion described in YAML: where the data comes from plus the
/// conversion options at the top level.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Manifest {
    /// A CSV path, or an inline table with `columns` and `rows`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Value>,

    #[serde(flatten)]
    pub config: ConvertConfig,
}

impl Manifest {
    pub fn new(source: Option<Value>, config: ConvertConfig) -> Self {
        Self { source, config }
    }

    pub fn source(&self) -> Result<Source, ConvertError> {
        match &self.source {
            Some(value) => Source::from_value(value),
            None => Err(ConvertError::InvalidSourceType(format!(
                "no source given in {}",
                YAML_CONFIG_NAME
            ))),
        }
    }

    /// Makes relative source and output paths relative to `base` instead of
    /// the working directory.
    fn resolve_paths(&mut self, base: &Path) {
        if let Some(Value::String(path)) = &self.source {
            let path = PathBuf::from(path);
            if path.is_relative() {
                self.source = Some(Value::String(base.join(path).to_string_lossy().into_owned()));
            }
        }

        if self.config.output_dir.is_relative() {
            self.config.output_dir = base.join(&self.config.output_dir);
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ReadManifestError {
    #[error("Could not open file: {0}")]
    CouldNotOpenFile(#[from] std::io::Error),

    #[error("Could not parse manifest: {0}")]
    CouldNotParseManifest(#[from] serde_yaml::Error),

    #[error("Could not substitute env variables: {0}")]
    CouldNotSubstituteEnvVariables(#[from] regex::Error),

    #[error("Environment variable {0} not found")]
    MissingEnvVariable(String),

    #[error("Could not validate manifest: {0}")]
    CouldNotValidateManifest(#[from] ValidateConfigError),
}

fn substitute_env_variables(contents: &str) -> Result<String, ReadManifestError> {
    let re = Regex::new(r"\$\{([^}]+)\}")?;
    let mut missing = None;

    let result = re.replace_all(contents, |caps: &Captures| {
        let var_name = &caps[1];
        match env::var(var_name) {
            Ok(val) => val,
            Err(_) => {
                error!("Environment variable {} not found", var_name);
                missing.get_or_insert_with(|| var_name.to_string());
                String::new()
            }
        }
    });

    match missing {
        Some(var_name) => Err(ReadManifestError::MissingEnvVariable(var_name)),
        None => Ok(result.into_owned()),
    }
}

pub fn parse_manifest(contents: &str) -> Result<Manifest, ReadManifestError> {
    let contents = substitute_env_variables(contents)?;
    let manifest: Manifest = serde_yaml::from_str(&contents)?;
    manifest.config.validate()?;

    Ok(manifest)
}

pub fn read_manifest(file_path: &Path) -> Result<Manifest, ReadManifestError> {
    let contents = fs::read_to_string(file_path)?;
    let mut manifest = parse_manifest(&contents)?;

    if let Some(project_path) = file_path.parent() {
        manifest.resolve_paths(project_path);
    }

    Ok(manifest)
}

#[derive(thiserror::Error, Debug)]
pub enum WriteManifestError {
    #[error("Could not parse manifest to string: {0}")]
    CouldNotTurnManifestToString(serde_yaml::Error),

    #[error("Could not create file: {0}")]
    CouldNotCreateFile(std::io::Error),

    #[error("Could not write to file: {0}")]
    CouldNotWriteToFile(std::io::Error),
}

pub fn write_manifest(data: &Manifest, file_path: &Path) -> Result<(), WriteManifestError> {
    let yaml_string =
        serde_yaml::to_string(data).map_err(WriteManifestError::CouldNotTurnManifestToString)?;

    let mut file = File::create(file_path).map_err(WriteManifestError::CouldNotCreateFile)?;
    file.write_all(yaml_string.as_bytes()).map_err(WriteManifestError::CouldNotWriteToFile)?;
    Ok(())
}
