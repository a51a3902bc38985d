//! Formatting utilities used for CLI outputs.

use unicode_width::UnicodeWidthStr;

/// Pad on the right to a display width; wide glyphs such as 한글 count double.
pub fn pad_right(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

pub fn pad_left(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", " ".repeat(width.saturating_sub(w)), s)
}

/// One decimal, ties rounded away from zero (`0.25` → `"0.3"`).
pub fn one_decimal(x: f64) -> String {
    format!("{:.1}", (x * 10.0).round() / 10.0)
}

/// Grid cell for a first check-in hour, `-` when the member did not come.
pub fn hour_cell(hour: Option<u32>) -> String {
    match hour {
        Some(h) => format!("{h:02}"),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_uses_display_width() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_right("남", 4), "남  ");
        assert_eq!(pad_left("7", 3), "  7");
        assert_eq!(pad_right("toolong", 3), "toolong");
    }

    #[test]
    fn one_decimal_rounds_ties_up() {
        assert_eq!(one_decimal(0.25), "0.3");
        assert_eq!(one_decimal(1.25), "1.3");
        assert_eq!(one_decimal(6.25), "6.3");
        assert_eq!(one_decimal(0.24), "0.2");
        assert_eq!(one_decimal(0.0), "0.0");
    }

    #[test]
    fn hour_cells() {
        assert_eq!(hour_cell(Some(7)), "07");
        assert_eq!(hour_cell(None), "-");
    }
}
