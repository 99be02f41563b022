// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Text and JSON rendering of command results.

use std::io::{self, Write};

use searchdex_core::{IndexEntry, MalformedEntry, TableStats};
use serde::Serialize;

pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
	serde_json::to_writer_pretty(&mut *out, value)?;
	writeln!(out)
}

pub fn write_entries<W: Write>(out: &mut W, entries: &[&IndexEntry]) -> io::Result<()> {
	if entries.is_empty() {
		return writeln!(out, "no matches");
	}

	for entry in entries {
		writeln!(out, "{}", entry.display_name())?;
		for target in entry.targets() {
			match (target.signature.is_empty(), target.origin_file.is_empty()) {
				(false, false) => writeln!(out, "    {}  [{}]", target.signature, target.origin_file)?,
				(false, true) => writeln!(out, "    {}", target.signature)?,
				(true, false) => writeln!(out, "    [{}]", target.origin_file)?,
				(true, true) => {}
			}
			let marker = if target.local { "" } else { " (external)" };
			writeln!(out, "      -> {}{}", target.anchor_url, marker)?;
		}
	}
	Ok(())
}

pub fn write_stats<W: Write>(out: &mut W, stats: &TableStats) -> io::Result<()> {
	writeln!(out, "entries:    {}", stats.entries)?;
	writeln!(out, "targets:    {}", stats.targets)?;
	writeln!(out, "overloaded: {}", stats.overloaded)?;
	writeln!(out, "files:      {}", stats.files)
}

pub fn write_rejected<W: Write>(out: &mut W, rejected: &[MalformedEntry]) -> io::Result<()> {
	if rejected.is_empty() {
		return writeln!(out, "ok: no malformed entries");
	}
	for entry in rejected {
		writeln!(out, "malformed: {entry}")?;
	}
	writeln!(out, "{} malformed entries", rejected.len())
}
