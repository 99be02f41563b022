// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTML character reference decoding for index strings.
//!
//! Doxygen writes display names and scopes HTML-escaped, e.g. the separator
//! between a signature and its file is `:&#160;`. Handles the five named XML
//! entities plus decimal and hex numeric references. Unknown or unterminated
//! references are kept as written.

use std::borrow::Cow;

/// Decode HTML character references in `input`.
///
/// Returns `Cow::Borrowed` when the input contains no `&`.
pub fn decode_html(input: &str) -> Cow<'_, str> {
	if !input.contains('&') {
		return Cow::Borrowed(input);
	}

	let mut out = String::with_capacity(input.len());
	let mut rest = input;

	while let Some(amp) = rest.find('&') {
		out.push_str(&rest[..amp]);
		rest = &rest[amp..];

		// Reference names are `#`, ASCII letters and digits; stop at anything else.
		let name_len = rest[1..]
			.find(|c: char| !(c.is_ascii_alphanumeric() || c == '#'))
			.unwrap_or(rest.len() - 1);
		let terminated = rest[1 + name_len..].starts_with(';');

		match terminated.then(|| decode_reference(&rest[1..1 + name_len])).flatten() {
			Some(c) => {
				out.push(c);
				rest = &rest[name_len + 2..];
			}
			None => {
				out.push('&');
				rest = &rest[1..];
			}
		}
	}

	out.push_str(rest);
	Cow::Owned(out)
}

fn decode_reference(name: &str) -> Option<char> {
	match name {
		"amp" => Some('&'),
		"lt" => Some('<'),
		"gt" => Some('>'),
		"quot" => Some('"'),
		"apos" => Some('\''),
		"nbsp" => Some('\u{a0}'),
		_ => {
			let numeric = name.strip_prefix('#')?;
			let code = match numeric.strip_prefix(['x', 'X']) {
				Some(hex) => u32::from_str_radix(hex, 16).ok()?,
				None => numeric.parse::<u32>().ok()?,
			};
			char::from_u32(code)
		}
	}
}
