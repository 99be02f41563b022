// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: defaults, TOML files, environment variables and
//! command-line overrides.

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use searchdex_core::{MalformedPolicy, MatchMode};
use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::ConfigLayer;
use crate::sections::{IndexConfigLayer, LogFormat, LoggingConfigLayer, SearchConfigLayer};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
	Cli = 60,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
	required: bool,
}

impl TomlSource {
	/// An optional file; a missing file contributes nothing.
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			required: false,
		}
	}

	/// A file the user asked for explicitly; it must exist.
	pub fn required(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			required: true,
		}
	}

	/// `$XDG_CONFIG_HOME/searchdex/config.toml`, if a config dir is known.
	pub fn user() -> Option<Self> {
		dirs::config_dir().map(|dir| Self::new(dir.join("searchdex/config.toml")))
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		if !self.required && !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ConfigLayer = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: SEARCHDEX_<SECTION>_<FIELD>
#[derive(Default)]
pub struct EnvSource {
	vars: Option<HashMap<String, String>>,
}

impl EnvSource {
	/// Read from the process environment.
	pub fn new() -> Self {
		Self::default()
	}

	/// Read from a fixed set of variables instead of the process environment.
	pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			vars: Some(
				vars
					.into_iter()
					.map(|(k, v)| (k.into(), v.into()))
					.collect(),
			),
		}
	}

	fn var(&self, name: &str) -> Option<String> {
		let value = match &self.vars {
			Some(vars) => vars.get(name).cloned(),
			None => std::env::var(name).ok(),
		};
		value.filter(|s| !s.trim().is_empty())
	}

	fn parsed<T>(&self, name: &str) -> Result<Option<T>, ConfigError>
	where
		T: FromStr,
		T::Err: std::fmt::Display,
	{
		match self.var(name) {
			Some(v) => v
				.trim()
				.parse()
				.map(Some)
				.map_err(|e| ConfigError::invalid_value(name, format!("'{v}': {e}"))),
			None => Ok(None),
		}
	}

	fn load_index(&self) -> Result<IndexConfigLayer, ConfigError> {
		Ok(IndexConfigLayer {
			paths: self.var("SEARCHDEX_INDEX_PATHS").map(|v| split_paths(&v)),
			on_malformed: self.parsed::<MalformedPolicy>("SEARCHDEX_INDEX_ON_MALFORMED")?,
		})
	}

	fn load_search(&self) -> Result<SearchConfigLayer, ConfigError> {
		Ok(SearchConfigLayer {
			mode: self.parsed::<MatchMode>("SEARCHDEX_SEARCH_MODE")?,
			limit: self.parsed::<usize>("SEARCHDEX_SEARCH_LIMIT")?,
		})
	}

	fn load_logging(&self) -> Result<LoggingConfigLayer, ConfigError> {
		Ok(LoggingConfigLayer {
			level: self.var("SEARCHDEX_LOG_LEVEL"),
			format: self.parsed::<LogFormat>("SEARCHDEX_LOG_FORMAT")?,
		})
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(ConfigLayer {
			index: Some(self.load_index()?),
			search: Some(self.load_search()?),
			logging: Some(self.load_logging()?),
		})
	}
}

/// Split a comma-separated path list, dropping empty items.
fn split_paths(value: &str) -> Vec<PathBuf> {
	value
		.split(',')
		.map(str::trim)
		.filter(|p| !p.is_empty())
		.map(PathBuf::from)
		.collect()
}

/// Values given on the command line. `None` and empty lists defer to other
/// sources.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
	pub index_paths: Vec<PathBuf>,
	pub on_malformed: Option<MalformedPolicy>,
	pub search_mode: Option<MatchMode>,
	pub search_limit: Option<usize>,
	pub log_level: Option<String>,
}

pub struct CliSource {
	overrides: CliOverrides,
}

impl CliSource {
	pub fn new(overrides: CliOverrides) -> Self {
		Self { overrides }
	}
}

impl ConfigSource for CliSource {
	fn name(&self) -> &'static str {
		"cli"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Cli
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		let cli = &self.overrides;
		let paths = (!cli.index_paths.is_empty()).then(|| cli.index_paths.clone());

		Ok(ConfigLayer {
			index: Some(IndexConfigLayer {
				paths,
				on_malformed: cli.on_malformed,
			}),
			search: Some(SearchConfigLayer {
				mode: cli.search_mode,
				limit: cli.search_limit,
			}),
			logging: Some(LoggingConfigLayer {
				level: cli.log_level.clone(),
				format: None,
			}),
		})
	}
}
