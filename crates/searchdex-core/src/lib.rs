// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Immutable symbol search index for generated documentation sites.
//!
//! This crate provides:
//! - [`Table`]: a write-once table of [`IndexEntry`] values, sorted by key
//! - [`load`] / [`load_with`]: build a table from raw `[key, [name, targets...]]` tuples
//! - [`parse_search_data`]: read Doxygen `search/*.js` files into raw tuples
//! - [`Table::lookup`]: lazy, case-insensitive prefix/substring lookup
//!
//! # Usage
//!
//! ```ignore
//! use searchdex_core::{read_search_data, load};
//!
//! let table = load(&read_search_data("html/search/all_0.js")?)?;
//! for entry in table.lookup("ad9361_set") {
//!     println!("{} -> {}", entry.display_name(), entry.targets()[0].anchor_url);
//! }
//! ```

pub mod entities;
pub mod error;
pub mod model;
pub mod normalize;
mod raw;
pub mod searchdata;
pub mod table;

pub use error::{IndexError, IndexResult, MalformedEntry};
pub use model::{IndexEntry, Target};
pub use normalize::fold_case;
pub use searchdata::{parse_search_data, read_search_data};
pub use table::{
	load, load_with, LoadOptions, LoadOutcome, Lookup, MalformedPolicy, MatchMode, SearchParams,
	Table, TableBuilder, TableStats,
};
