//! Description text cleanup.

use std::sync::LazyLock;

use regex::Regex;

/// Matches the delimiter-bounded metadata block some providers embed in
/// descriptions (Google Meet dial-in footers use `-::~ … ::~-` fences).
static METADATA_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)-::~.*::~-").expect("metadata block regex is valid"));

/// Flattens a description into a single line of plain text.
///
/// Strips any metadata block, turns literal and escaped (`\n`) newlines into
/// single spaces, and trims the result.
pub fn clean_description(description: &str) -> String {
    let without_block = METADATA_BLOCK.replace_all(description, "");
    without_block
        .replace("\\n", " ")
        .replace('\n', " ")
        .trim()
        .to_string()
}
