// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Logging configuration section.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	#[default]
	Pretty,
	Json,
}

impl std::str::FromStr for LogFormat {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"pretty" | "text" => Ok(LogFormat::Pretty),
			"json" => Ok(LogFormat::Json),
			_ => Err(format!("invalid log format: {s}")),
		}
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfigLayer {
	#[serde(default)]
	pub level: Option<String>,
	#[serde(default)]
	pub format: Option<LogFormat>,
}

impl LoggingConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.level.is_some() {
			self.level = other.level;
		}
		if other.format.is_some() {
			self.format = other.format;
		}
	}

	pub fn finalize(self) -> LoggingConfig {
		LoggingConfig {
			level: self.level.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
			format: self.format.unwrap_or_default(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
	/// An `EnvFilter` directive, e.g. `info` or `searchdex_core=debug`.
	pub level: String,
	pub format: LogFormat,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		LoggingConfigLayer::default().finalize()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = LoggingConfig::default();
		assert_eq!(config.level, "info");
		assert_eq!(config.format, LogFormat::Pretty);
	}

	#[test]
	fn test_parse_format() {
		assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
		assert_eq!("text".parse::<LogFormat>(), Ok(LogFormat::Pretty));
		assert!("xml".parse::<LogFormat>().is_err());
	}

	#[test]
	fn test_deserialize() {
		let layer: LoggingConfigLayer =
			toml::from_str("level = \"searchdex_core=debug\"\nformat = \"json\"").unwrap();
		let config = layer.finalize();
		assert_eq!(config.level, "searchdex_core=debug");
		assert_eq!(config.format, LogFormat::Json);
	}
}
