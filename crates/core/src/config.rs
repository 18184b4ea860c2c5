//! Configuration path utilities for the grimoire.
//!
//! This module resolves where spells are stored and which editor and shell
//! to use, from an optional YAML config file plus built-in defaults. Shell
//! expansions like `~` are resolved here.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default path for the grimoire configuration file
pub const DEFAULT_CONFIG_PATH: &str = "~/.grimoire/config.yml";
/// Default directory where spells are stored
pub const DEFAULT_SPELL_PATH: &str = "~/grimoire";

/// Default editor for the `edit` subcommand
pub const DEFAULT_EDITOR: &str = "nvim";
/// Default shell to use for spell execution
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// Optional knobs read from the config file.
///
/// Every field may be omitted; resolution falls back to the environment
/// and then the `DEFAULT_*` constants (see the CLI crate).
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct GrimoireConfig {
    /// Directory where spells are saved.
    pub spell_path: Option<String>,
    /// Editor to open a spell with when using the `edit` subcommand.
    pub editor: Option<String>,
    /// Shell that casts spells.
    pub shell: Option<String>,
}

/// Resolves the configuration file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the
/// default configuration path. Shell expansions like `~` are resolved.
pub fn get_config_path(config_path_arg: &Option<String>) -> String {
    let config_path = match config_path_arg {
        Some(config_path) => config_path,
        None => DEFAULT_CONFIG_PATH,
    };

    shellexpand::tilde(config_path).to_string()
}

/// Loads the config file, treating a missing file as an empty config.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read, or contains
/// invalid YAML.
pub fn load_config(config_path_arg: &Option<String>) -> Result<GrimoireConfig> {
    let config_path = get_config_path(config_path_arg);

    if !Path::new(&config_path).exists() {
        return Ok(GrimoireConfig::default());
    }

    let reader = File::open(&config_path)
        .map_err(|e| Error::io_error("config".to_string(), config_path.clone(), e))?;

    serde_yaml::from_reader(reader).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "config".to_string(),
            config_path,
            e,
        )
    })
}

/// Resolves the spell directory path.
///
/// Precedence: command-line argument, then config file, then
/// [`DEFAULT_SPELL_PATH`]. Shell expansions like `~` are resolved.
pub fn get_spell_path(spell_path_arg: &Option<String>, config: &GrimoireConfig) -> String {
    let spell_path = spell_path_arg
        .as_deref()
        .or(config.spell_path.as_deref())
        .unwrap_or(DEFAULT_SPELL_PATH);

    shellexpand::tilde(spell_path).to_string()
}
