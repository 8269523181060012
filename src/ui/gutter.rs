//! Line-number gutter.

/// Number of decimal digits in `n` (at least 1).
pub const fn digit_count(mut n: usize) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

/// Columns taken by the gutter for a document of `line_count` lines: the
/// widest label plus one separator column.
pub const fn gutter_width(line_count: usize) -> usize {
    digit_count(line_count) + 1
}

/// The label for absolute row `row`: its 1-based number, right-aligned in
/// `digits` columns and followed by the separator.
pub fn line_label(row: usize, digits: usize) -> String {
    format!("{:>digits$} ", row + 1)
}
