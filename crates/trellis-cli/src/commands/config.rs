//! `trellis config`: show the effective configuration.
//!
//! Keys are looked up in the serialized [`AppConfig`], so every field is
//! addressable as `section.field` without a hand-kept key list.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(cmd: ConfigCommands, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = lookup(config, &key)?;
            output.print(&format!("{key} = {value}"))?;
        }
        ConfigCommands::List => {
            output.header("Effective configuration:")?;
            for (key, value) in flatten(&as_table(config)?) {
                output.print(&format!("{key} = {value}"))?;
            }
        }
        ConfigCommands::Path => {
            let path = AppConfig::config_path();
            let note = if path.is_file() { "" } else { " (not created)" };
            output.print(&format!("{}{note}", path.display()))?;
        }
    }
    Ok(())
}

fn as_table(config: &AppConfig) -> CliResult<toml::Table> {
    let value = toml::Value::try_from(config).map_err(|e| CliError::ConfigError {
        message: format!("configuration is not representable as TOML: {e}"),
        source: Some(Box::new(e)),
    })?;
    match value {
        toml::Value::Table(table) => Ok(table),
        _ => Err(CliError::ConfigError {
            message: "configuration must serialize to a table".into(),
            source: None,
        }),
    }
}

fn lookup(config: &AppConfig, key: &str) -> CliResult<toml::Value> {
    let table = as_table(config)?;
    let mut parts = key.split('.');
    let mut current = parts.next().and_then(|first| table.get(first));
    for part in parts {
        current = current.and_then(|value| value.get(part));
    }

    match current {
        Some(value) if !value.is_table() => Ok(value.clone()),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}

/// `(dotted.key, value)` pairs of every leaf, in table order.
fn flatten(table: &toml::Table) -> Vec<(String, toml::Value)> {
    let mut leaves = Vec::new();
    for (key, value) in table {
        match value {
            toml::Value::Table(inner) => leaves.extend(
                flatten(inner)
                    .into_iter()
                    .map(|(sub, leaf)| (format!("{key}.{sub}"), leaf)),
            ),
            leaf => leaves.push((key.clone(), leaf.clone())),
        }
    }
    leaves
}
