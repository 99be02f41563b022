// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration produced by a single source.

use serde::{Deserialize, Serialize};

use crate::sections::{IndexConfigLayer, LoggingConfigLayer, SearchConfigLayer};

/// One source's view of the configuration. Unset fields defer to
/// lower-precedence layers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigLayer {
	#[serde(default)]
	pub index: Option<IndexConfigLayer>,
	#[serde(default)]
	pub search: Option<SearchConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
}

impl ConfigLayer {
	/// Overlay `other` on top of `self`.
	pub fn merge(&mut self, other: ConfigLayer) {
		if let Some(index) = other.index {
			self.index.get_or_insert_with(Default::default).merge(index);
		}
		if let Some(search) = other.search {
			self.search.get_or_insert_with(Default::default).merge(search);
		}
		if let Some(logging) = other.logging {
			self.logging.get_or_insert_with(Default::default).merge(logging);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use searchdex_core::MatchMode;

	#[test]
	fn test_deserialize_full_file() {
		let toml_str = r#"
[index]
paths = ["docs/html/search/all_0.js"]
on_malformed = "skip"

[search]
mode = "prefix"

[logging]
format = "json"
"#;
		let layer: ConfigLayer = toml::from_str(toml_str).unwrap();
		assert!(layer.index.is_some());
		assert_eq!(layer.search.unwrap().mode, Some(MatchMode::Prefix));
		assert!(layer.logging.unwrap().level.is_none());
	}

	#[test]
	fn test_merge_keeps_unset_sections() {
		let mut base: ConfigLayer = toml::from_str("[search]\nlimit = 7").unwrap();
		let overlay: ConfigLayer = toml::from_str("[logging]\nlevel = \"debug\"").unwrap();
		base.merge(overlay);

		assert_eq!(base.search.as_ref().unwrap().limit, Some(7));
		assert_eq!(
			base.logging.as_ref().unwrap().level.as_deref(),
			Some("debug")
		);
		assert!(base.index.is_none());
	}
}
