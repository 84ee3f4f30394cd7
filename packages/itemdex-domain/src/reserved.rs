//! Reserved-word rewriting for text-bearing index fields.
//!
//! The index treats a handful of operator tokens specially inside `text`
//! fields. Documents are written with those tokens rewritten to full-width
//! stand-ins, and search texts go through the same rewrite so phrase matches
//! keep lining up. The reverse table restores the original text for display.

const MAPPINGS: &[(&str, &str)] = &[
	("&&", "＆＆"),
	("||", "｜｜"),
	("+", "＋"),
	("-", "－"),
	("=", "＝"),
	(">", "＞"),
	("<", "＜"),
	("!", "！"),
	("(", "（"),
	(")", "）"),
	("{", "｛"),
	("}", "｝"),
	("[", "［"),
	("]", "］"),
	("^", "＾"),
	("\"", "＂"),
	("~", "～"),
	("*", "＊"),
	("?", "？"),
	(":", "："),
	("\\", "＼"),
	("/", "／"),
];

pub fn escape(text: &str) -> String {
	let mut out = text.to_string();

	for (from, to) in MAPPINGS {
		out = out.replace(from, to);
	}

	out
}

/// Reverse rewrite for response layers that render stored text to callers.
pub fn unescape(text: &str) -> String {
	let mut out = text.to_string();

	for (from, to) in MAPPINGS {
		out = out.replace(to, from);
	}

	out
}

pub fn escape_in_place(value: &mut String) {
	if value.is_empty() {
		return;
	}

	*value = escape(value);
}

pub fn escape_all(values: &mut [String]) {
	for value in values {
		escape_in_place(value);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn escape_rewrites_operator_tokens() {
		assert_eq!(escape("a+b=c"), "a＋b＝c");
		assert_eq!(escape("p && q"), "p ＆＆ q");
	}

	#[test]
	fn unescape_restores_original_text() {
		let text = "2(x-1) >= 3? \"yes\" : no/maybe";

		assert_eq!(unescape(&escape(text)), text);
	}

	#[test]
	fn escape_leaves_plain_text_alone() {
		assert_eq!(escape("plain words only"), "plain words only");
	}
}
