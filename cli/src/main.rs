use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use sqlgen::setup_info_logger;

use crate::{
    cli_interface::{Commands, CLI},
    commands::{convert::handle_convert_command, init::handle_init_command},
    console::print_error_message,
};

mod cli_interface;
mod commands;
mod console;

fn resolve_path(override_path: &Option<String>) -> Result<PathBuf, String> {
    match override_path {
        Some(path) => {
            let path = PathBuf::from_str(path).map_err(|_| "Invalid path provided.".to_string())?;
            Ok(path)
        }
        None => Ok(std::env::current_dir()
            .map_err(|_| "Failed to get current directory.".to_string())?),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CLI::parse();

    setup_info_logger();

    match &cli.command {
        Commands::Init { source, path } => {
            let resolved_path = resolve_path(path).map_err(|e| {
                print_error_message(&e);
                e
            })?;
            handle_init_command(resolved_path, source.as_deref())
        }
        Commands::Convert { input, options, path } => {
            let resolved_path = resolve_path(path).map_err(|e| {
                print_error_message(&e);
                e
            })?;
            handle_convert_command(resolved_path, input.as_deref(), options)
        }
    }
}
