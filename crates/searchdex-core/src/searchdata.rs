// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Reader for Doxygen `search/*.js` index files.
//!
//! These files hold a single JavaScript assignment:
//!
//! ```text
//! var searchData=
//! [
//!   ['apass_12',['Apass',['../structfilter__design__parameters.html#abb1f',1,'filter_design_parameters']]],
//! ];
//! ```
//!
//! The literal is JSON-like but uses single-quoted strings and may carry
//! trailing commas, so it is read with a small winnow grammar into
//! [`serde_json::Value`] tuples. A bare array without the assignment is also
//! accepted, which covers plain JSON exports.

use std::path::Path;

use serde_json::{Map, Number, Value};
use tracing::debug;
use winnow::combinator::{alt, cut_err, delimited, fail, opt, preceded, repeat, separated, terminated};
use winnow::error::{ContextError, ErrMode, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, take_till, take_until, take_while};

use crate::error::{IndexError, IndexResult};

/// Containers nested deeper than this are rejected.
const MAX_DEPTH: usize = 64;

/// Parse the body of a `searchData` file into raw index tuples.
pub fn parse_search_data(input: &str) -> IndexResult<Vec<Value>> {
	document.parse(input).map_err(|e| {
		let (line, column) = line_column(input, e.offset());
		let message = e.inner().to_string().replace('\n', "; ");
		IndexError::Syntax {
			line,
			column,
			message: if message.is_empty() {
				"unexpected input".to_string()
			} else {
				message
			},
		}
	})
}

/// Read and parse a `searchData` file from disk.
pub fn read_search_data(path: impl AsRef<Path>) -> IndexResult<Vec<Value>> {
	let path = path.as_ref();
	let content = std::fs::read_to_string(path).map_err(|source| IndexError::Io {
		path: path.to_path_buf(),
		source,
	})?;

	let tuples = parse_search_data(&content)?;
	debug!(path = %path.display(), tuples = tuples.len(), "read search data");
	Ok(tuples)
}

fn line_column(input: &str, offset: usize) -> (usize, usize) {
	let consumed = input.get(..offset).unwrap_or(input);
	let line = consumed.matches('\n').count() + 1;
	let column = match consumed.rfind('\n') {
		Some(nl) => consumed[nl + 1..].chars().count() + 1,
		None => consumed.chars().count() + 1,
	};
	(line, column)
}

fn expected(what: &'static str) -> StrContext {
	StrContext::Expected(StrContextValue::Description(what))
}

fn document(input: &mut &str) -> ModalResult<Vec<Value>> {
	delimited(
		(trivia, opt(assignment)),
		index,
		(trivia, opt(';'), trivia),
	)
	.parse_next(input)
}

fn index(input: &mut &str) -> ModalResult<Vec<Value>> {
	if !input.starts_with('[') {
		return cut_err(fail.context(expected("index array"))).parse_next(input);
	}
	array(input, 0)
}

/// Whitespace, `//` line comments and `/* */` block comments.
fn trivia(input: &mut &str) -> ModalResult<()> {
	repeat(
		0..,
		alt((
			take_while(1.., |c: char| c.is_whitespace()).void(),
			("//", take_till(0.., '\n')).void(),
			("/*", cut_err(take_until(0.., "*/").context(expected("`*/`"))), "*/").void(),
		)),
	)
	.parse_next(input)
}

fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
	take_while(1.., |c: char| c.is_alphanumeric() || c == '_' || c == '$').parse_next(input)
}

/// `var name =` (or `let`/`const`).
fn assignment(input: &mut &str) -> ModalResult<()> {
	(
		identifier.verify(|word: &str| matches!(word, "var" | "let" | "const")),
		cut_err((
			trivia,
			identifier.context(expected("variable name")),
			trivia,
			'='.context(expected("`=`")),
			trivia,
		)),
	)
		.void()
		.parse_next(input)
}

fn value(input: &mut &str, depth: usize) -> ModalResult<Value> {
	if depth > MAX_DEPTH {
		return cut_err(
			fail
				.context(StrContext::Label("nesting depth"))
				.context(expected("at most 64 nested levels")),
		)
		.parse_next(input);
	}

	match input.chars().next() {
		Some('[') => array(input, depth).map(Value::Array),
		Some('{') => object(input, depth).map(Value::Object),
		Some('\'' | '"') => string.map(Value::String).parse_next(input),
		Some(c) if c == '-' || c.is_ascii_digit() => number(input),
		_ => alt((
			"true".value(Value::Bool(true)),
			"false".value(Value::Bool(false)),
			"null".value(Value::Null),
		))
		.context(expected("value"))
		.parse_next(input),
	}
}

fn array(input: &mut &str, depth: usize) -> ModalResult<Vec<Value>> {
	let element = move |i: &mut &str| value(i, depth + 1);
	preceded(
		'[',
		cut_err(terminated(
			separated(0.., preceded(trivia, element), (trivia, ',')),
			(trivia, opt((',', trivia)), ']'.context(expected("`,` or `]`"))),
		)),
	)
	.parse_next(input)
}

fn object(input: &mut &str, depth: usize) -> ModalResult<Map<String, Value>> {
	let member = (
		alt((string, identifier.map(str::to_string))),
		cut_err(preceded(
			(trivia, ':'.context(expected("`:`")), trivia),
			move |i: &mut &str| value(i, depth + 1),
		)),
	);
	preceded(
		'{',
		cut_err(terminated(
			separated(0.., preceded(trivia, member), (trivia, ',')),
			(trivia, opt((',', trivia)), '}'.context(expected("`,` or `}`"))),
		)),
	)
	.map(|members: Vec<(String, Value)>| members.into_iter().collect())
	.parse_next(input)
}

fn number(input: &mut &str) -> ModalResult<Value> {
	cut_err(
		take_while(1.., |c: char| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'))
			.verify_map(|text: &str| match text.parse::<i64>() {
				Ok(int) => Some(Value::from(int)),
				Err(_) => text.parse::<f64>().ok().and_then(Number::from_f64).map(Value::Number),
			})
			.context(expected("number")),
	)
	.parse_next(input)
}

#[derive(Debug, Clone)]
enum Fragment<'i> {
	Literal(&'i str),
	Char(char),
	/// Backslash-newline inside a string.
	Continuation,
}

fn string(input: &mut &str) -> ModalResult<String> {
	alt((quoted('\''), quoted('"'))).parse_next(input)
}

fn quoted<'i>(quote: char) -> impl Parser<&'i str, String, ErrMode<ContextError>> {
	preceded(
		quote,
		cut_err(terminated(
			repeat(
				0..,
				alt((
					take_till(1.., move |c: char| c == quote || c == '\\' || c == '\n')
						.map(Fragment::Literal),
					preceded('\\', escape),
				)),
			)
			.fold(String::new, |mut out, fragment: Fragment<'i>| {
				match fragment {
					Fragment::Literal(text) => out.push_str(text),
					Fragment::Char(c) => out.push(c),
					Fragment::Continuation => {}
				}
				out
			}),
			quote.context(expected("closing quote")),
		)),
	)
}

fn escape<'i>(input: &mut &'i str) -> ModalResult<Fragment<'i>> {
	cut_err(
		alt((
			"\r\n".value(Fragment::Continuation),
			'\n'.value(Fragment::Continuation),
			'n'.value(Fragment::Char('\n')),
			't'.value(Fragment::Char('\t')),
			'r'.value(Fragment::Char('\r')),
			'b'.value(Fragment::Char('\u{8}')),
			'f'.value(Fragment::Char('\u{c}')),
			'v'.value(Fragment::Char('\u{b}')),
			'0'.value(Fragment::Char('\0')),
			preceded('x', cut_err(hex_char(2))),
			preceded('u', cut_err(hex_char(4))),
			any.map(Fragment::Char),
		))
		.context(expected("escape sequence")),
	)
	.parse_next(input)
}

fn hex_char<'i>(digits: usize) -> impl Parser<&'i str, Fragment<'i>, ErrMode<ContextError>> {
	take_while(digits, |c: char| c.is_ascii_hexdigit())
		.try_map(|hex: &str| u32::from_str_radix(hex, 16))
		.verify_map(char::from_u32)
		.map(Fragment::Char)
		.context(expected("hex escape"))
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_parses_doxygen_assignment() {
		let input = "var searchData=\n[\n  ['apass_12',['Apass',['../structfilter__design__parameters.html#abb1f',1,'filter_design_parameters']]],\n  ['astop_13',['Astop',['../structfilter__design__parameters.html#a8344',1,'filter_design_parameters']]]\n];\n";

		let tuples = parse_search_data(input).unwrap();
		assert_eq!(tuples.len(), 2);
		assert_eq!(
			tuples[0],
			json!(["apass_12", ["Apass", ["../structfilter__design__parameters.html#abb1f", 1, "filter_design_parameters"]]])
		);
	}

	#[test]
	fn test_parses_bare_json_array() {
		let tuples = parse_search_data(r#"[["x_0", ["x", ["../x.html", 0, ""]]]]"#).unwrap();
		assert_eq!(tuples, vec![json!(["x_0", ["x", ["../x.html", 0, ""]]])]);
	}

	#[test]
	fn test_trailing_commas_and_comments() {
		let input = "// generated\nvar searchData = /* all */ [\n ['a_0', ['a', ['../a.html', 1, ''],],],\n];";
		let tuples = parse_search_data(input).unwrap();
		assert_eq!(tuples, vec![json!(["a_0", ["a", ["../a.html", 1, ""]]])]);
	}

	#[test]
	fn test_string_escapes() {
		let input = r#"[['k', ['it\'s \"q\" \x41é\\é', ['../a.html']]]]"#;
		let tuples = parse_search_data(input).unwrap();
		assert_eq!(tuples[0][1][0], json!("it's \"q\" A\u{e9}\\\u{e9}"));
	}

	#[test]
	fn test_line_continuation_with_crlf() {
		let input = "var searchData=\r\n[\r\n  ['k_0', ['long\\\r\nname', ['../a.html', 1, '']]],\r\n  ['k_1', ['lf\\\nonly', ['../b.html', 1, '']]]\r\n];\r\n";
		let tuples = parse_search_data(input).unwrap();
		assert_eq!(tuples[0][1][0], json!("longname"));
		assert_eq!(tuples[1][1][0], json!("lfonly"));
	}

	#[test]
	fn test_bad_hex_escape() {
		let err = parse_search_data(r"[['k', ['\x4g', ['../a.html']]]]").unwrap_err();
		match err {
			IndexError::Syntax { message, .. } => assert!(message.contains("hex escape"), "{message}"),
			other => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn test_objects_and_literals() {
		let input = "[['k', ['n', [{anchorUrl: '../a.html', 'local': false, extra: null, n: -1.5,}]]]]";
		let tuples = parse_search_data(input).unwrap();
		assert_eq!(
			tuples[0][1][1][0],
			json!({"anchorUrl": "../a.html", "local": false, "extra": null, "n": -1.5})
		);
	}

	#[test]
	fn test_empty_index() {
		assert!(parse_search_data("var searchData=\n[\n];").unwrap().is_empty());
	}

	#[test]
	fn test_syntax_error_position() {
		let err = parse_search_data("var searchData=\n[\n  ['a', ['b' ['c']]]\n];").unwrap_err();
		match err {
			IndexError::Syntax { line, column, message } => {
				assert_eq!(line, 3);
				assert_eq!(column, 14);
				assert!(message.contains("expected `,` or `]`"), "{message}");
			}
			other => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn test_nesting_within_limit() {
		let input = format!("[{}{}]", "[".repeat(50), "]".repeat(50));
		let tuples = parse_search_data(&input).unwrap();
		assert_eq!(tuples.len(), 1);
	}

	#[test]
	fn test_deep_nesting_is_a_syntax_error() {
		let input = format!("var searchData=\n{}{};", "[".repeat(200_000), "]".repeat(200_000));
		match parse_search_data(&input) {
			Err(IndexError::Syntax { line, message, .. }) => {
				assert_eq!(line, 2);
				assert!(message.contains("nesting depth"), "{message}");
			}
			other => panic!("expected a syntax error, got {other:?}"),
		}
	}

	#[test]
	fn test_rejects_non_array_and_trailing_content() {
		assert!(matches!(
			parse_search_data("var searchData = 'x';"),
			Err(IndexError::Syntax { .. })
		));
		assert!(matches!(
			parse_search_data("[] extra"),
			Err(IndexError::Syntax { .. })
		));
		assert!(matches!(
			parse_search_data("[['unterminated]]"),
			Err(IndexError::Syntax { .. })
		));
		assert!(matches!(
			parse_search_data("/* open"),
			Err(IndexError::Syntax { .. })
		));
		assert!(matches!(
			parse_search_data("var = []"),
			Err(IndexError::Syntax { .. })
		));
	}

	#[test]
	fn test_read_search_data_missing_file() {
		let dir = tempfile::tempdir().unwrap();
		let err = read_search_data(dir.path().join("all_0.js")).unwrap_err();
		assert!(matches!(err, IndexError::Io { .. }));
	}

	#[test]
	fn test_read_search_data_from_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("all_1.js");
		std::fs::write(&path, "var searchData=\n[\n  ['b_0',['b',['../b.html',1,'']]]\n];\n").unwrap();

		let tuples = read_search_data(&path).unwrap();
		assert_eq!(tuples.len(), 1);
	}
}
