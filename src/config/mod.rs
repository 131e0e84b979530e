//! Configuration management for integral drivers
//!
//! This module holds the declarative option schema, YAML option files and
//! the command-line arguments of the `scf_driver` binary.

mod args;
pub mod schema;

pub use args::Args;
pub use schema::{
    Bound, ConfigSchema, OptionMap, OptionSchema, OptionType, OptionValue, ResolvedConfig,
};

use color_eyre::eyre::{Result, WrapErr};
use std::fs;
use std::path::Path;

/// Parse a flat YAML mapping of option name to scalar value.
pub fn parse_options(content: &str) -> std::result::Result<OptionMap, serde_yml::Error> {
    if content.trim().is_empty() {
        return Ok(OptionMap::new());
    }
    serde_yml::from_str::<OptionMap>(content)
}

/// Load driver options from a YAML file.
pub fn load_options(path: &Path) -> Result<OptionMap> {
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("Unable to read configuration file: {}", path.display()))?;

    parse_options(&content).wrap_err("Failed to parse configuration file")
}

/// Overlay `overrides` on top of `base`; later values win.
pub fn merge_options(mut base: OptionMap, overrides: OptionMap) -> OptionMap {
    base.extend(overrides);
    base
}
