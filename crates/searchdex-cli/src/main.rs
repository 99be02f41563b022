// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! searchdex binary: query generated documentation search indexes.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use searchdex_config::{CliOverrides, SearchdexConfig};
use searchdex_core::{LoadOptions, LoadOutcome, MalformedPolicy, MatchMode, Table};

mod logging;
mod output;

/// searchdex - look up symbols in Doxygen `searchData` indexes.
#[derive(Parser, Debug)]
#[command(name = "searchdex", about = "Query documentation search indexes", version)]
struct Args {
	/// Config file to use instead of the user config file
	#[arg(long, global = true, env = "SEARCHDEX_CONFIG")]
	config: Option<PathBuf>,

	/// searchData file to load (repeatable); replaces configured paths
	#[arg(long = "index", global = true)]
	index: Vec<PathBuf>,

	/// Drop malformed entries instead of failing the load
	#[arg(long, global = true)]
	skip_malformed: bool,

	/// Log filter directive, e.g. `debug` or `searchdex_core=trace`
	#[arg(long, global = true)]
	log_level: Option<String>,

	/// Print machine-readable JSON
	#[arg(long, global = true)]
	json: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Find entries whose key starts with or contains QUERY
	Lookup {
		query: String,
		/// Only match keys starting with QUERY
		#[arg(long, conflicts_with = "substring")]
		prefix: bool,
		/// Match keys containing QUERY anywhere, overriding a configured prefix mode
		#[arg(long)]
		substring: bool,
		#[arg(long)]
		limit: Option<usize>,
		#[arg(long, default_value_t = 0)]
		offset: usize,
	},
	/// Print entry and target counts
	Stats,
	/// Load every index file and report malformed entries
	Check,
	/// Show version information
	Version,
}

impl Args {
	fn overrides(&self) -> CliOverrides {
		let (search_mode, search_limit) = match &self.command {
			Command::Lookup {
				prefix,
				substring,
				limit,
				..
			} => {
				let mode = if *prefix {
					Some(MatchMode::Prefix)
				} else {
					substring.then_some(MatchMode::Substring)
				};
				(mode, *limit)
			}
			_ => (None, None),
		};

		CliOverrides {
			index_paths: self.index.clone(),
			on_malformed: self.skip_malformed.then_some(MalformedPolicy::Skip),
			search_mode,
			search_limit,
			log_level: self.log_level.clone(),
		}
	}
}

fn main() -> Result<ExitCode> {
	let args = Args::parse();

	if let Command::Version = args.command {
		println!("searchdex {}", env!("CARGO_PKG_VERSION"));
		return Ok(ExitCode::SUCCESS);
	}

	let config = searchdex_config::load_config_with(args.config.clone(), args.overrides())
		.context("Failed to load configuration")?;
	logging::init_tracing(&config.logging);

	let stdout = io::stdout();
	let mut out = stdout.lock();
	let code = run(&args, &config, &mut out)?;
	out.flush()?;
	Ok(code)
}

fn run<W: Write>(args: &Args, config: &SearchdexConfig, out: &mut W) -> Result<ExitCode> {
	match &args.command {
		Command::Lookup { query, offset, .. } => {
			let outcome = load_table(config, &config.index.load_options())?;
			let mut params = config.search.params(query.as_str());
			params.offset = *offset;

			let hits = outcome.table.search(&params);
			tracing::debug!(query = %params.query, hits = hits.len(), "lookup finished");
			if args.json {
				output::write_json(out, &hits)?;
			} else {
				output::write_entries(out, &hits)?;
			}
			Ok(ExitCode::SUCCESS)
		}
		Command::Stats => {
			let outcome = load_table(config, &config.index.load_options())?;
			let stats = outcome.table.stats();
			if args.json {
				output::write_json(out, &stats)?;
			} else {
				output::write_stats(out, &stats)?;
			}
			Ok(ExitCode::SUCCESS)
		}
		Command::Check => {
			let outcome = load_table(config, &LoadOptions::skip_malformed())?;
			if args.json {
				output::write_json(out, &outcome.rejected)?;
			} else {
				output::write_rejected(out, &outcome.rejected)?;
			}
			if outcome.rejected.is_empty() {
				Ok(ExitCode::SUCCESS)
			} else {
				Ok(ExitCode::FAILURE)
			}
		}
		Command::Version => Ok(ExitCode::SUCCESS),
	}
}

fn load_table(config: &SearchdexConfig, options: &LoadOptions) -> Result<LoadOutcome> {
	let paths = &config.index.paths;
	if paths.is_empty() {
		bail!("No index files configured; pass --index or set SEARCHDEX_INDEX_PATHS");
	}

	let outcome = Table::from_files(paths.as_slice(), options).context("Failed to load search index")?;
	if !outcome.rejected.is_empty() {
		tracing::warn!(
			rejected = outcome.rejected.len(),
			"skipped malformed entries while loading search index"
		);
	}
	Ok(outcome)
}
