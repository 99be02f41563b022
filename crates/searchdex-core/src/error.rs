// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Result type alias for index operations.
pub type IndexResult<T> = Result<T, IndexError>;

/// Errors that can occur while building a search index.
///
/// Lookups never fail; every variant here is produced at load time.
#[derive(Error, Debug)]
pub enum IndexError {
	#[error("Malformed entry: {0}")]
	MalformedEntry(MalformedEntry),

	#[error("Syntax error at {line}:{column}: {message}")]
	Syntax {
		line: usize,
		column: usize,
		message: String,
	},

	#[error("Failed to read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

impl From<MalformedEntry> for IndexError {
	fn from(entry: MalformedEntry) -> Self {
		IndexError::MalformedEntry(entry)
	}
}

/// A raw tuple that could not be turned into an index entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedEntry {
	/// Zero-based position of the tuple in its source list.
	pub position: usize,
	/// The tuple's raw key, when it was readable.
	pub key: Option<String>,
	pub reason: String,
	/// Label of the source list, usually a file path.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub source: Option<String>,
}

impl MalformedEntry {
	pub fn new(position: usize, key: Option<&str>, reason: impl Into<String>) -> Self {
		Self {
			position,
			key: key.map(str::to_owned),
			reason: reason.into(),
			source: None,
		}
	}

	pub fn with_source(mut self, source: impl Into<String>) -> Self {
		self.source = Some(source.into());
		self
	}
}

impl fmt::Display for MalformedEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if let Some(source) = &self.source {
			write!(f, "{source}: ")?;
		}
		match &self.key {
			Some(key) => write!(f, "entry #{} ({}): {}", self.position, key, self.reason),
			None => write!(f, "entry #{}: {}", self.position, self.reason),
		}
	}
}
