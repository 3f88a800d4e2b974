//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;
use vareval_engine::EngineConfig;

/// Execute the config command.
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: &Path,
    format: OutputFormat,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            let rendered = match format {
                OutputFormat::Json => serde_json::to_string_pretty(config)?,
                OutputFormat::Table | OutputFormat::Quiet => config.to_toml()?,
            };
            println!("{}", rendered);
        }
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Init { force, strict } => {
            init_config(path, force, strict)?;
            println!(
                "{}",
                formatter.success(&format!("Wrote configuration to {}", path.display()))
            );
        }
    }
    Ok(())
}

/// Write a fresh configuration file.
fn init_config(path: &Path, force: bool, strict: bool) -> Result<Config> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let config = Config {
        engine: if strict {
            EngineConfig::strict()
        } else {
            EngineConfig::default()
        },
        ..Config::default()
    };
    config.save_to(path)?;
    Ok(config)
}
