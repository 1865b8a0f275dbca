//! Command line parsing helpers
//!
//! Lines are matched against table names, not tokenized: a table entry
//! matches when its whole name is a case-insensitive prefix of the text.
//! The comparison always runs over the *entry's* length, so `h` does not
//! match `help` while `helpme` does.

use core::cmp::Ordering;

/// Compare table entry `name` against `text` over `name.len()` bytes,
/// ignoring ASCII case.
///
/// `Equal` means `name` is a prefix of `text`. Otherwise the ordering is
/// that of `name` relative to `text`, so it can drive a binary search over
/// a name-sorted table.
pub fn prefix_cmp(name: &str, text: &str) -> Ordering {
    let text = text.as_bytes();
    for (i, &n) in name.as_bytes().iter().enumerate() {
        let n = n.to_ascii_lowercase();
        // Past the end of the input compares like a string terminator
        let t = text.get(i).map_or(0, u8::to_ascii_lowercase);
        match n.cmp(&t) {
            Ordering::Equal => {}
            other => return other,
        }
    }
    Ordering::Equal
}

/// True if table entry `name` is a case-insensitive prefix of `text`
pub fn matches_prefix(name: &str, text: &str) -> bool {
    prefix_cmp(name, text) == Ordering::Equal
}

/// Argument tail handed to a command handler.
///
/// Skips the command name plus exactly one separator byte, whether or not
/// a separator was typed (`"set"` and `"setx"` both yield `""`).
pub fn argument_tail<'a>(line: &'a str, name: &str) -> &'a str {
    line.get(name.len() + 1..).unwrap_or("")
}

/// Split `key=value` on the first `=`.
///
/// Leading spaces of the value are skipped; the key is returned untrimmed.
/// Returns `None` when there is no `=`.
pub fn split_assignment(text: &str) -> Option<(&str, &str)> {
    let (key, value) = text.split_once('=')?;
    Some((key, value.trim_start_matches(' ')))
}

/// Parse the leading decimal digits of `text`.
///
/// Scanning stops at the first non-digit; no digits yields `0`.
/// Overflow wraps modulo 2^32.
pub fn parse_decimal(text: &str) -> u32 {
    text.bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u32, |acc, d| acc.wrapping_mul(10).wrapping_add(u32::from(d - b'0')))
}

/// Compile-time check for name tables: `a` sorts strictly before `b`
/// (ASCII case-insensitive) and neither is a prefix of the other.
///
/// Together these make prefix lookup unambiguous.
pub const fn strictly_before(a: &str, b: &str) -> bool {
    let a = a.as_bytes();
    let b = b.as_bytes();
    let mut i = 0;
    while i < a.len() && i < b.len() {
        let x = a[i].to_ascii_lowercase();
        let y = b[i].to_ascii_lowercase();
        if x != y {
            return x < y;
        }
        i += 1;
    }
    // One name is a prefix of the other
    false
}
