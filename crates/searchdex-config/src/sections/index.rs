// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Index source configuration section.

use std::path::PathBuf;

use searchdex_core::{LoadOptions, MalformedPolicy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexConfigLayer {
	#[serde(default)]
	pub paths: Option<Vec<PathBuf>>,
	#[serde(default)]
	pub on_malformed: Option<MalformedPolicy>,
}

impl IndexConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.paths.is_some() {
			self.paths = other.paths;
		}
		if other.on_malformed.is_some() {
			self.on_malformed = other.on_malformed;
		}
	}

	pub fn finalize(self) -> IndexConfig {
		IndexConfig {
			paths: self.paths.unwrap_or_default(),
			on_malformed: self.on_malformed.unwrap_or_default(),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
	/// `searchData` files merged into one table, in order.
	pub paths: Vec<PathBuf>,
	pub on_malformed: MalformedPolicy,
}

impl IndexConfig {
	pub fn load_options(&self) -> LoadOptions {
		LoadOptions {
			on_malformed: self.on_malformed,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_abort_with_no_paths() {
		let config = IndexConfigLayer::default().finalize();
		assert!(config.paths.is_empty());
		assert_eq!(config.on_malformed, MalformedPolicy::Abort);
		assert_eq!(config.load_options().on_malformed, MalformedPolicy::Abort);
	}

	#[test]
	fn test_deserialize() {
		let toml_str = r#"
paths = ["html/search/all_0.js", "html/search/all_1.js"]
on_malformed = "skip"
"#;
		let layer: IndexConfigLayer = toml::from_str(toml_str).unwrap();
		let config = layer.finalize();
		assert_eq!(config.paths.len(), 2);
		assert_eq!(config.on_malformed, MalformedPolicy::Skip);
	}

	#[test]
	fn test_rejects_unknown_policy() {
		let result: Result<IndexConfigLayer, _> = toml::from_str(r#"on_malformed = "ignore""#);
		assert!(result.is_err());
	}

	#[test]
	fn test_layer_merge_replaces_paths() {
		let mut base = IndexConfigLayer {
			paths: Some(vec![PathBuf::from("a.js")]),
			on_malformed: Some(MalformedPolicy::Skip),
		};
		base.merge(IndexConfigLayer {
			paths: Some(vec![PathBuf::from("b.js"), PathBuf::from("c.js")]),
			on_malformed: None,
		});

		let config = base.finalize();
		assert_eq!(config.paths, [PathBuf::from("b.js"), PathBuf::from("c.js")]);
		assert_eq!(config.on_malformed, MalformedPolicy::Skip);
	}
}
