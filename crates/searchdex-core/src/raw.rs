// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Raw index tuples as they appear in generated `searchData` tables.
//!
//! Two layouts are accepted:
//!
//! - `[key, [display_name, target, target, ...]]`, where targets follow the
//!   display name directly (the layout Doxygen emits);
//! - `[key, [display_name, [target, target, ...]]]`, with the targets wrapped
//!   in a single list.
//!
//! A target is either `[anchor_url, flag, scope]` or an object with
//! `anchorUrl`, `signature`, `originFile` and `local` fields.

use serde::Deserialize;
use serde_json::Value;

use crate::entities::decode_html;
use crate::error::MalformedEntry;
use crate::model::Target;

/// Separator between signature and origin in a decoded scope string.
const SCOPE_SEPARATOR: &str = ":\u{a0}";

/// A validated input tuple, before merging into the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawEntry {
	pub key: String,
	pub display_name: String,
	pub targets: Vec<Target>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TargetObject {
	#[serde(alias = "anchor_url")]
	anchor_url: String,
	#[serde(default)]
	signature: String,
	#[serde(default, alias = "origin_file")]
	origin_file: String,
	#[serde(default)]
	local: Option<Value>,
}

/// Parse one tuple. `position` is only used for error reporting.
pub(crate) fn parse_entry(position: usize, value: &Value) -> Result<RawEntry, MalformedEntry> {
	let malformed = |key: Option<&str>, reason: String| MalformedEntry::new(position, key, reason);

	let tuple = value.as_array().ok_or_else(|| {
		malformed(None, "expected a [key, [display_name, targets...]] array".to_string())
	})?;
	if tuple.len() != 2 {
		return Err(malformed(
			tuple.first().and_then(Value::as_str),
			format!("expected 2 elements, found {}", tuple.len()),
		));
	}

	let key = tuple[0]
		.as_str()
		.filter(|k| !k.is_empty())
		.ok_or_else(|| malformed(None, "key must be a non-empty string".to_string()))?;

	let body = tuple[1].as_array().ok_or_else(|| {
		malformed(
			Some(key),
			"expected a [display_name, targets...] array".to_string(),
		)
	})?;

	let display_name = body
		.first()
		.and_then(Value::as_str)
		.map(|name| decode_html(name).trim().to_string())
		.filter(|name| !name.is_empty())
		.ok_or_else(|| malformed(Some(key), "missing display name".to_string()))?;

	let target_values = target_values(&body[1..]);
	if target_values.is_empty() {
		return Err(malformed(Some(key), "no targets".to_string()));
	}

	let targets = target_values
		.iter()
		.enumerate()
		.map(|(i, v)| {
			parse_target(v).map_err(|reason| malformed(Some(key), format!("target {i}: {reason}")))
		})
		.collect::<Result<Vec<_>, _>>()?;

	Ok(RawEntry {
		key: key.to_string(),
		display_name,
		targets,
	})
}

/// Resolve the two accepted layouts into a flat list of target values.
fn target_values(rest: &[Value]) -> &[Value] {
	if let [Value::Array(inner)] = rest {
		if inner.iter().all(|v| v.is_array() || v.is_object()) {
			return inner;
		}
	}
	rest
}

fn parse_target(value: &Value) -> Result<Target, String> {
	match value {
		Value::Array(fields) => parse_target_array(fields),
		Value::Object(_) => parse_target_object(value),
		_ => Err("expected an array or object".to_string()),
	}
}

fn parse_target_array(fields: &[Value]) -> Result<Target, String> {
	let anchor_url = fields
		.first()
		.and_then(Value::as_str)
		.filter(|url| !url.is_empty())
		.ok_or("missing anchor url")?;

	let local = match fields.get(1) {
		None => true,
		Some(flag) => parse_flag(flag)?,
	};

	let scope = match fields.get(2) {
		None | Some(Value::Null) => "",
		Some(Value::String(scope)) => scope.as_str(),
		Some(_) => return Err("scope must be a string".to_string()),
	};

	let (signature, origin_file) = split_scope(scope);
	Ok(Target::new(anchor_url)
		.with_signature(signature)
		.with_origin_file(origin_file)
		.with_local(local))
}

fn parse_target_object(value: &Value) -> Result<Target, String> {
	let object: TargetObject =
		serde_json::from_value(value.clone()).map_err(|e| e.to_string())?;
	if object.anchor_url.is_empty() {
		return Err("missing anchor url".to_string());
	}

	let local = match &object.local {
		None => true,
		Some(flag) => parse_flag(flag)?,
	};

	Ok(Target::new(object.anchor_url)
		.with_signature(decode_html(object.signature.trim()))
		.with_origin_file(decode_html(object.origin_file.trim()))
		.with_local(local))
}

fn parse_flag(flag: &Value) -> Result<bool, String> {
	match flag {
		Value::Bool(b) => Ok(*b),
		Value::Number(n) => match n.as_u64() {
			Some(0) => Ok(false),
			Some(1) => Ok(true),
			_ => Err(format!("link flag must be 0 or 1, found {n}")),
		},
		Value::Null => Ok(true),
		other => Err(format!("link flag must be 0 or 1, found {other}")),
	}
}

/// Split a scope string into `(signature, origin_file)`.
///
/// `name(args):&#160;file.c` splits at the separator. Without one, anything
/// that looks like a call signature is a signature and the rest is an origin
/// label such as the owning struct.
pub(crate) fn split_scope(scope: &str) -> (String, String) {
	let decoded = decode_html(scope);
	let decoded = decoded.trim();

	if let Some((signature, origin)) = decoded.split_once(SCOPE_SEPARATOR) {
		return (signature.trim().to_string(), origin.trim().to_string());
	}
	if decoded.contains('(') {
		(decoded.to_string(), String::new())
	} else {
		(String::new(), decoded.to_string())
	}
}
