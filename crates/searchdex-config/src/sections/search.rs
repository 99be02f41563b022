// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Lookup behaviour configuration section.

use searchdex_core::{MatchMode, SearchParams};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: usize = 20;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfigLayer {
	#[serde(default)]
	pub mode: Option<MatchMode>,
	#[serde(default)]
	pub limit: Option<usize>,
}

impl SearchConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.mode.is_some() {
			self.mode = other.mode;
		}
		if other.limit.is_some() {
			self.limit = other.limit;
		}
	}

	pub fn finalize(self) -> SearchConfig {
		SearchConfig {
			mode: self.mode.unwrap_or_default(),
			limit: self.limit.unwrap_or(DEFAULT_LIMIT),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
	pub mode: MatchMode,
	pub limit: usize,
}

impl Default for SearchConfig {
	fn default() -> Self {
		SearchConfigLayer::default().finalize()
	}
}

impl SearchConfig {
	/// Search parameters for `query` using the configured mode and limit.
	pub fn params(&self, query: impl Into<String>) -> SearchParams {
		SearchParams {
			query: query.into(),
			mode: self.mode,
			limit: self.limit,
			offset: 0,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = SearchConfig::default();
		assert_eq!(config.mode, MatchMode::Substring);
		assert_eq!(config.limit, DEFAULT_LIMIT);
	}

	#[test]
	fn test_deserialize() {
		let layer: SearchConfigLayer = toml::from_str("mode = \"prefix\"\nlimit = 5").unwrap();
		let config = layer.finalize();
		assert_eq!(config.mode, MatchMode::Prefix);
		assert_eq!(config.limit, 5);
	}

	#[test]
	fn test_params_carry_settings() {
		let config = SearchConfig {
			mode: MatchMode::Prefix,
			limit: 3,
		};
		let params = config.params("ad9361_set");
		assert_eq!(params.query, "ad9361_set");
		assert_eq!(params.mode, MatchMode::Prefix);
		assert_eq!(params.limit, 3);
		assert_eq!(params.offset, 0);
	}

	#[test]
	fn test_layer_merge() {
		let mut base = SearchConfigLayer {
			mode: Some(MatchMode::Prefix),
			limit: Some(10),
		};
		base.merge(SearchConfigLayer {
			mode: None,
			limit: Some(50),
		});
		assert_eq!(base.mode, Some(MatchMode::Prefix));
		assert_eq!(base.limit, Some(50));
	}
}
