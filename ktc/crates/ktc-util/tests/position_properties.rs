//! Property-based tests for `LineIndex`/`Position`.

use ktc_util::{LineIndex, Position};
use quickcheck_macros::quickcheck;

/// Restrict generated sources to a small alphabet including newlines so
/// quickcheck's shrinker produces readable failures.
fn sanitize(raw: String) -> String {
    raw.chars()
        .map(|c| if c == '\0' { ' ' } else { c })
        .take(500)
        .collect()
}

#[quickcheck]
fn offsets_are_never_before_line_one_column_one(raw: String) -> bool {
    let source = sanitize(raw);
    let index = LineIndex::new(&source);
    (0..=source.len())
        .all(|off| index.offset_to_position(off) >= Position::new(1, 1))
}

#[quickcheck]
fn position_is_monotonic_in_offset(raw: String) -> bool {
    let source = sanitize(raw);
    let index = LineIndex::new(&source);
    let mut last = Position::new(0, 0);
    for off in 0..=source.len() {
        let pos = index.offset_to_position(off);
        if (pos.line, pos.column) < (last.line, last.column) {
            return false;
        }
        last = pos;
    }
    true
}

#[quickcheck]
fn line_never_exceeds_newline_count_plus_one(raw: String) -> bool {
    let source = sanitize(raw);
    let index = LineIndex::new(&source);
    let newline_count = source.chars().filter(|&c| c == '\n' || c == '\r').count() as u32;
    index.offset_to_position(source.len()).line <= newline_count + 1
}
