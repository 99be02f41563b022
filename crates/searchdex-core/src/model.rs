// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Index entry types.

use serde::Serialize;

use crate::normalize::fold_case;

/// One documented occurrence of a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
	/// Page or anchor URL fragment, relative to the search page.
	pub anchor_url: String,
	/// Human-readable signature; empty for files and plain members.
	pub signature: String,
	/// File or scope label the symbol belongs to; empty when absent.
	pub origin_file: String,
	/// `false` when the anchor points into external tag-file documentation.
	pub local: bool,
}

impl Target {
	pub fn new(anchor_url: impl Into<String>) -> Self {
		Self {
			anchor_url: anchor_url.into(),
			signature: String::new(),
			origin_file: String::new(),
			local: true,
		}
	}

	pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
		self.signature = signature.into();
		self
	}

	pub fn with_origin_file(mut self, origin_file: impl Into<String>) -> Self {
		self.origin_file = origin_file.into();
		self
	}

	pub fn with_local(mut self, local: bool) -> Self {
		self.local = local;
		self
	}

	/// Page part of the anchor URL, without the `#fragment`.
	pub fn page(&self) -> &str {
		self
			.anchor_url
			.split_once('#')
			.map_or(self.anchor_url.as_str(), |(page, _)| page)
	}

	/// Fragment part of the anchor URL, if any.
	pub fn fragment(&self) -> Option<&str> {
		self.anchor_url.split_once('#').map(|(_, fragment)| fragment)
	}
}

/// A searchable symbol with every place it is documented.
///
/// Only constructed by the table builder, which guarantees that `key` is
/// `fold_case(display_name)` and that `targets` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
	pub(crate) key: String,
	pub(crate) display_name: String,
	pub(crate) targets: Vec<Target>,
	pub(crate) source_keys: Vec<String>,
}

impl IndexEntry {
	pub(crate) fn new(display_name: String, source_key: String, targets: Vec<Target>) -> Self {
		Self {
			key: fold_case(&display_name),
			display_name,
			targets,
			source_keys: vec![source_key],
		}
	}

	pub(crate) fn absorb(&mut self, source_key: String, targets: Vec<Target>) {
		self.targets.extend(targets);
		if !self.source_keys.contains(&source_key) {
			self.source_keys.push(source_key);
		}
	}

	/// Normalized search key.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Original symbol name as shown to the user.
	pub fn display_name(&self) -> &str {
		&self.display_name
	}

	/// Every documented occurrence, in input order.
	pub fn targets(&self) -> &[Target] {
		&self.targets
	}

	/// Raw keys of the input tuples merged into this entry.
	pub fn source_keys(&self) -> &[String] {
		&self.source_keys
	}

	/// True when the symbol is documented more than once.
	pub fn is_overloaded(&self) -> bool {
		self.targets.len() > 1
	}
}
