// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The immutable search table and its builder.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{IndexResult, MalformedEntry};
use crate::model::{IndexEntry, Target};
use crate::normalize::fold_case;
use crate::raw::parse_entry;
use crate::searchdata::read_search_data;

/// What to do with a tuple that fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
	/// Fail the whole load on the first malformed tuple.
	#[default]
	Abort,
	/// Drop malformed tuples, log them and report them in [`LoadOutcome`].
	Skip,
}

impl MalformedPolicy {
	pub fn as_str(&self) -> &'static str {
		match self {
			MalformedPolicy::Abort => "abort",
			MalformedPolicy::Skip => "skip",
		}
	}
}

impl std::str::FromStr for MalformedPolicy {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"abort" | "fail" => Ok(MalformedPolicy::Abort),
			"skip" | "drop" => Ok(MalformedPolicy::Skip),
			_ => Err(format!("invalid malformed-entry policy: {s}")),
		}
	}
}

/// How a query is matched against entry keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
	/// Key starts with or contains the query.
	#[default]
	Substring,
	/// Key starts with the query.
	Prefix,
}

impl MatchMode {
	pub fn as_str(&self) -> &'static str {
		match self {
			MatchMode::Substring => "substring",
			MatchMode::Prefix => "prefix",
		}
	}

	fn matches(&self, key: &str, query: &str) -> bool {
		match self {
			MatchMode::Substring => key.contains(query),
			MatchMode::Prefix => key.starts_with(query),
		}
	}
}

impl std::str::FromStr for MatchMode {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"substring" | "contains" => Ok(MatchMode::Substring),
			"prefix" => Ok(MatchMode::Prefix),
			_ => Err(format!("invalid match mode: {s}")),
		}
	}
}

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
	pub on_malformed: MalformedPolicy,
}

impl LoadOptions {
	pub fn skip_malformed() -> Self {
		Self {
			on_malformed: MalformedPolicy::Skip,
		}
	}
}

/// A loaded table together with the tuples that were left out of it.
#[derive(Debug)]
pub struct LoadOutcome {
	pub table: Table,
	pub rejected: Vec<MalformedEntry>,
}

/// Paged search parameters.
#[derive(Debug, Clone)]
pub struct SearchParams {
	pub query: String,
	pub mode: MatchMode,
	pub limit: usize,
	pub offset: usize,
}

impl Default for SearchParams {
	fn default() -> Self {
		Self {
			query: String::new(),
			mode: MatchMode::default(),
			limit: 20,
			offset: 0,
		}
	}
}

impl SearchParams {
	pub fn new(query: impl Into<String>) -> Self {
		Self {
			query: query.into(),
			..Default::default()
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableStats {
	pub entries: usize,
	pub targets: usize,
	/// Entries documented more than once.
	pub overloaded: usize,
	/// Distinct non-empty origin labels.
	pub files: usize,
}

/// Accumulates raw tuples from one or more sources into a [`Table`].
///
/// Tuples with the same display name are merged into one entry, keeping
/// every target in input order.
#[derive(Debug, Default)]
pub struct TableBuilder {
	policy: MalformedPolicy,
	entries: Vec<IndexEntry>,
	by_name: HashMap<String, usize>,
	rejected: Vec<MalformedEntry>,
}

impl TableBuilder {
	pub fn new(options: &LoadOptions) -> Self {
		Self {
			policy: options.on_malformed,
			..Default::default()
		}
	}

	/// Add a list of raw tuples.
	pub fn add(&mut self, raw: &[Value]) -> IndexResult<&mut Self> {
		self.add_tuples(None, raw)
	}

	/// Add a list of raw tuples, tagging rejections with `source`.
	pub fn add_source(&mut self, source: &str, raw: &[Value]) -> IndexResult<&mut Self> {
		self.add_tuples(Some(source), raw)
	}

	/// Read a `searchData` file and add its tuples.
	pub fn add_file(&mut self, path: impl AsRef<Path>) -> IndexResult<&mut Self> {
		let path = path.as_ref();
		let raw = read_search_data(path)?;
		self.add_tuples(Some(&path.display().to_string()), &raw)
	}

	fn add_tuples(&mut self, source: Option<&str>, raw: &[Value]) -> IndexResult<&mut Self> {
		for (position, value) in raw.iter().enumerate() {
			match parse_entry(position, value) {
				Ok(entry) => self.insert(entry.key, entry.display_name, entry.targets),
				Err(malformed) => {
					let malformed = match source {
						Some(source) => malformed.with_source(source),
						None => malformed,
					};
					match self.policy {
						MalformedPolicy::Abort => return Err(malformed.into()),
						MalformedPolicy::Skip => {
							warn!(
								position = malformed.position,
								key = malformed.key.as_deref().unwrap_or(""),
								source = source.unwrap_or(""),
								reason = %malformed.reason,
								"skipping malformed index entry"
							);
							self.rejected.push(malformed);
						}
					}
				}
			}
		}
		Ok(self)
	}

	fn insert(&mut self, source_key: String, display_name: String, targets: Vec<Target>) {
		match self.by_name.entry(display_name) {
			Entry::Occupied(slot) => self.entries[*slot.get()].absorb(source_key, targets),
			Entry::Vacant(slot) => {
				let entry = IndexEntry::new(slot.key().clone(), source_key, targets);
				slot.insert(self.entries.len());
				self.entries.push(entry);
			}
		}
	}

	/// Tuples rejected so far.
	pub fn rejected(&self) -> &[MalformedEntry] {
		&self.rejected
	}

	/// Freeze the accumulated entries into an immutable table.
	pub fn build(self) -> LoadOutcome {
		let mut entries = self.entries;
		entries.sort_by(|a, b| {
			a.key
				.cmp(&b.key)
				.then_with(|| a.display_name.cmp(&b.display_name))
		});

		let table = Table { entries };
		info!(
			entries = table.len(),
			targets = table.target_count(),
			rejected = self.rejected.len(),
			"search index built"
		);

		LoadOutcome {
			table,
			rejected: self.rejected,
		}
	}
}

/// Immutable symbol search table.
///
/// Entries are sorted by key. The table has no interior mutability and can
/// be shared across threads by reference or `Arc`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Table {
	entries: Vec<IndexEntry>,
}

impl Table {
	/// Load a table from raw tuples, failing on the first malformed one.
	pub fn load(raw: &[Value]) -> IndexResult<Table> {
		Self::load_with(raw, &LoadOptions::default()).map(|outcome| outcome.table)
	}

	pub fn load_with(raw: &[Value], options: &LoadOptions) -> IndexResult<LoadOutcome> {
		let mut builder = TableBuilder::new(options);
		builder.add(raw)?;
		Ok(builder.build())
	}

	/// Load and merge several `searchData` files.
	pub fn from_files<P: AsRef<Path>>(paths: &[P], options: &LoadOptions) -> IndexResult<LoadOutcome> {
		let mut builder = TableBuilder::new(options);
		for path in paths {
			debug!(path = %path.as_ref().display(), "loading search data file");
			builder.add_file(path)?;
		}
		Ok(builder.build())
	}

	/// Entries whose key starts with or contains the folded query, in key
	/// order. An empty query yields every entry.
	pub fn lookup(&self, query: &str) -> Lookup<'_> {
		self.lookup_with(query, MatchMode::Substring)
	}

	pub fn lookup_with(&self, query: &str, mode: MatchMode) -> Lookup<'_> {
		let query = fold_case(query);
		let candidates = match mode {
			MatchMode::Prefix => self.prefix_range(&query),
			MatchMode::Substring => &self.entries[..],
		};
		Lookup {
			candidates: candidates.iter(),
			query,
			mode,
		}
	}

	/// One page of lookup results.
	pub fn search(&self, params: &SearchParams) -> Vec<&IndexEntry> {
		self
			.lookup_with(&params.query, params.mode)
			.skip(params.offset)
			.take(params.limit)
			.collect()
	}

	/// The entry with exactly this display name.
	pub fn get(&self, display_name: &str) -> Option<&IndexEntry> {
		let key = fold_case(display_name);
		let start = self.entries.partition_point(|e| e.key() < key.as_str());
		self.entries[start..]
			.iter()
			.take_while(|e| e.key() == key)
			.find(|e| e.display_name() == display_name)
	}

	/// Sorted entries whose key starts with `prefix`.
	fn prefix_range(&self, prefix: &str) -> &[IndexEntry] {
		let start = self.entries.partition_point(|e| e.key() < prefix);
		let len = self.entries[start..]
			.iter()
			.take_while(|e| e.key().starts_with(prefix))
			.count();
		&self.entries[start..start + len]
	}

	pub fn entries(&self) -> &[IndexEntry] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn target_count(&self) -> usize {
		self.entries.iter().map(|e| e.targets().len()).sum()
	}

	pub fn stats(&self) -> TableStats {
		let files: BTreeSet<&str> = self
			.entries
			.iter()
			.flat_map(|e| e.targets())
			.map(|t| t.origin_file.as_str())
			.filter(|origin| !origin.is_empty())
			.collect();

		TableStats {
			entries: self.len(),
			targets: self.target_count(),
			overloaded: self.entries.iter().filter(|e| e.is_overloaded()).count(),
			files: files.len(),
		}
	}
}

/// Lazy lookup results. Clone it to enumerate the same results again.
#[derive(Debug, Clone)]
pub struct Lookup<'a> {
	candidates: std::slice::Iter<'a, IndexEntry>,
	query: String,
	mode: MatchMode,
}

impl<'a> Lookup<'a> {
	/// The folded query being matched.
	pub fn query(&self) -> &str {
		&self.query
	}
}

impl<'a> Iterator for Lookup<'a> {
	type Item = &'a IndexEntry;

	fn next(&mut self) -> Option<Self::Item> {
		let query = self.query.as_str();
		let mode = self.mode;
		self
			.candidates
			.by_ref()
			.find(|entry| mode.matches(entry.key(), query))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(0, Some(self.candidates.len()))
	}
}

/// Load a table from raw tuples, failing on the first malformed one.
pub fn load(raw: &[Value]) -> IndexResult<Table> {
	Table::load(raw)
}

/// Load a table from raw tuples with an explicit malformed-entry policy.
pub fn load_with(raw: &[Value], options: &LoadOptions) -> IndexResult<LoadOutcome> {
	Table::load_with(raw, options)
}
