//! Zero-allocation field parsing for tab-delimited records.
//!
//! The record readers work on raw line bytes; nothing here allocates.

use crate::interval::{Coord, MAX_COORD};
use memchr::{memchr, memchr_iter};

/// Iterator over the tab-separated fields of one line.
///
/// Uses memchr for SIMD-accelerated tab searching instead of collecting
/// a `Vec` of fields per line.
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    rest: Option<&'a [u8]>,
}

impl<'a> Iterator for Fields<'a> {
    type Item = &'a [u8];

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        match memchr(b'\t', rest) {
            Some(tab) => {
                self.rest = Some(&rest[tab + 1..]);
                Some(&rest[..tab])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}

/// Split a line into its tab-separated fields.
#[inline]
pub fn split_fields(line: &[u8]) -> Fields<'_> {
    Fields { rest: Some(line) }
}

/// The `n`th (0-based) tab-separated field, if the line has one.
#[inline]
pub fn nth_field(line: &[u8], n: usize) -> Option<&[u8]> {
    split_fields(line).nth(n)
}

/// Number of tab-separated fields in a line.
#[inline]
pub fn count_fields(line: &[u8]) -> usize {
    memchr_iter(b'\t', line).count() + 1
}

/// Parse a signed decimal coordinate - no allocation, no error formatting.
///
/// Accepts an optional leading `-` followed by ASCII digits. Returns None
/// for empty input, any other character, or a magnitude above `MAX_COORD`.
#[inline(always)]
pub fn parse_coord(bytes: &[u8]) -> Option<Coord> {
    let (negative, digits) = match bytes.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some(_) => (false, bytes),
        None => return None,
    };
    if digits.is_empty() {
        return None;
    }
    let mut n: Coord = 0;
    for &b in digits {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        n = n.checked_mul(10)?.checked_add(d as Coord)?;
    }
    if n > MAX_COORD {
        return None;
    }
    Some(if negative { -n } else { n })
}

/// Strip a trailing `\n` or `\r\n`.
#[inline(always)]
pub fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Check if a line should be skipped (blank or comment).
#[inline(always)]
pub fn should_skip_line(line: &[u8]) -> bool {
    line.iter().all(|b| b.is_ascii_whitespace()) || line[0] == b'#'
}
