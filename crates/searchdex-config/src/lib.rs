// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered configuration for the searchdex tools.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file,
//!   environment, command line)
//! - Consistent environment variable naming (`SEARCHDEX_*`)
//! - Validation of the merged result
//!
//! # Usage
//!
//! ```ignore
//! use searchdex_config::load_config;
//!
//! let config = load_config()?;
//! let outcome = searchdex_core::Table::from_files(&config.index.paths, &config.index.load_options())?;
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

use std::path::PathBuf;

pub use error::ConfigError;
pub use layer::ConfigLayer;
pub use sections::*;
pub use sources::{
	CliOverrides, CliSource, ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource,
};

use tracing::{debug, info};

/// Fully resolved configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchdexConfig {
	pub index: IndexConfig,
	pub search: SearchConfig,
	pub logging: LoggingConfig,
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`SEARCHDEX_*`)
/// 2. User config file (`$XDG_CONFIG_HOME/searchdex/config.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<SearchdexConfig, ConfigError> {
	load_config_with(None, CliOverrides::default())
}

/// Load configuration with an optional explicit config file and CLI
/// overrides. An explicit file replaces the user config file and must exist.
pub fn load_config_with(
	config_path: Option<PathBuf>,
	cli: CliOverrides,
) -> Result<SearchdexConfig, ConfigError> {
	let mut sources: Vec<Box<dyn ConfigSource>> = vec![Box::new(DefaultsSource)];

	match config_path {
		Some(path) => sources.push(Box::new(TomlSource::required(path))),
		None => {
			if let Some(user) = TomlSource::user() {
				sources.push(Box::new(user));
			}
		}
	}

	sources.push(Box::new(EnvSource::new()));
	sources.push(Box::new(CliSource::new(cli)));

	load_from_sources(sources)
}

/// Merge the given sources in precedence order and finalize.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<SearchdexConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: ConfigLayer) -> Result<SearchdexConfig, ConfigError> {
	let config = SearchdexConfig {
		index: layer.index.unwrap_or_default().finalize(),
		search: layer.search.unwrap_or_default().finalize(),
		logging: layer.logging.unwrap_or_default().finalize(),
	};

	validate_config(&config)?;

	info!(
		index_files = config.index.paths.len(),
		on_malformed = config.index.on_malformed.as_str(),
		search_mode = config.search.mode.as_str(),
		search_limit = config.search.limit,
		"configuration loaded"
	);

	Ok(config)
}

/// Validate cross-field configuration rules.
fn validate_config(config: &SearchdexConfig) -> Result<(), ConfigError> {
	if config.search.limit == 0 {
		return Err(ConfigError::Validation(
			"search.limit must be greater than zero".to_string(),
		));
	}
	if config.logging.level.trim().is_empty() {
		return Err(ConfigError::Validation(
			"logging.level must not be empty".to_string(),
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use searchdex_core::{MalformedPolicy, MatchMode};

	fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
		let path = dir.path().join("config.toml");
		std::fs::write(&path, body).unwrap();
		path
	}

	#[test]
	fn test_defaults_only() {
		let config = load_from_sources(vec![Box::new(DefaultsSource)]).unwrap();
		assert_eq!(config, SearchdexConfig::default());
		assert_eq!(config.search.limit, DEFAULT_LIMIT);
		assert_eq!(config.index.on_malformed, MalformedPolicy::Abort);
	}

	#[test]
	fn test_file_overrides_defaults() {
		let dir = tempfile::tempdir().unwrap();
		let path = write_config(&dir, "[search]\nmode = \"prefix\"\nlimit = 8\n");

		let config =
			load_from_sources(vec![Box::new(DefaultsSource), Box::new(TomlSource::new(path))])
				.unwrap();
		assert_eq!(config.search.mode, MatchMode::Prefix);
		assert_eq!(config.search.limit, 8);
	}

	#[test]
	fn test_env_overrides_file_regardless_of_order() {
		let dir = tempfile::tempdir().unwrap();
		let path = write_config(
			&dir,
			"[index]\npaths = [\"a.js\"]\non_malformed = \"abort\"\n[search]\nlimit = 8\n",
		);

		let config = load_from_sources(vec![
			Box::new(EnvSource::from_vars([
				("SEARCHDEX_SEARCH_LIMIT", "3"),
				("SEARCHDEX_INDEX_ON_MALFORMED", "skip"),
			])),
			Box::new(TomlSource::new(path)),
			Box::new(DefaultsSource),
		])
		.unwrap();

		assert_eq!(config.search.limit, 3);
		assert_eq!(config.index.on_malformed, MalformedPolicy::Skip);
		assert_eq!(config.index.paths, [PathBuf::from("a.js")]);
	}

	#[test]
	fn test_cli_overrides_env() {
		let cli = CliOverrides {
			index_paths: vec![PathBuf::from("cli.js")],
			search_mode: Some(MatchMode::Substring),
			..Default::default()
		};

		let config = load_from_sources(vec![
			Box::new(CliSource::new(cli)),
			Box::new(EnvSource::from_vars([
				("SEARCHDEX_INDEX_PATHS", "env.js"),
				("SEARCHDEX_SEARCH_MODE", "prefix"),
				("SEARCHDEX_LOG_LEVEL", "warn"),
			])),
		])
		.unwrap();

		assert_eq!(config.index.paths, [PathBuf::from("cli.js")]);
		assert_eq!(config.search.mode, MatchMode::Substring);
		assert_eq!(config.logging.level, "warn");
	}

	#[test]
	fn test_zero_limit_is_rejected() {
		let result = load_from_sources(vec![Box::new(EnvSource::from_vars([(
			"SEARCHDEX_SEARCH_LIMIT",
			"0",
		)]))]);
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[test]
	fn test_explicit_config_must_exist() {
		let dir = tempfile::tempdir().unwrap();
		let result = load_config_with(Some(dir.path().join("missing.toml")), CliOverrides::default());
		assert!(matches!(result, Err(ConfigError::FileRead { .. })));
	}
}
