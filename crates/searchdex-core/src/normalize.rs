// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Search key normalization.

/// Fold a display name or query into a search key.
///
/// Lowercases every character, trims surrounding whitespace and collapses
/// inner whitespace runs to a single space. Punctuation such as `_`, `.` and
/// `:` is kept so keys still match what users type.
pub fn fold_case(input: &str) -> String {
	let mut key = String::with_capacity(input.len());
	let mut pending_space = false;

	for c in input.trim().chars() {
		if c.is_whitespace() {
			pending_space = true;
			continue;
		}
		if pending_space {
			key.push(' ');
			pending_space = false;
		}
		key.extend(c.to_lowercase());
	}

	key
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_fold_case_lowercases() {
		assert_eq!(fold_case("Apass"), "apass");
		assert_eq!(fold_case("AD9361_Set_BB_Rate"), "ad9361_set_bb_rate");
	}

	#[test]
	fn test_fold_case_keeps_punctuation() {
		assert_eq!(fold_case("ad9361.h"), "ad9361.h");
		assert_eq!(fold_case("iio::Context"), "iio::context");
	}

	#[test]
	fn test_fold_case_collapses_whitespace() {
		assert_eq!(
			fold_case("  struct \t filter_design_parameters \n"),
			"struct filter_design_parameters"
		);
		assert_eq!(fold_case("   "), "");
	}

	proptest! {
		/// Folding an already folded key changes nothing.
		#[test]
		fn fold_case_is_idempotent(input in "[a-zA-Z0-9À-ÿ_.: \t]{0,40}") {
			let once = fold_case(&input);
			prop_assert_eq!(fold_case(&once), once);
		}

		/// Case variants of an ASCII name fold to the same key.
		#[test]
		fn ascii_case_variants_share_key(name in "[a-zA-Z0-9_.]{1,32}") {
			prop_assert_eq!(fold_case(&name.to_uppercase()), fold_case(&name.to_lowercase()));
		}

		/// Folded keys never carry leading, trailing or doubled whitespace.
		#[test]
		fn folded_keys_have_tidy_whitespace(input in "[ a-zA-Z\t]{0,40}") {
			let key = fold_case(&input);
			prop_assert_eq!(key.trim(), key.as_str());
			prop_assert!(!key.contains("  "));
			prop_assert!(!key.contains('\t'));
		}
	}
}
