/// ANSI color helper utilities for terminal output.
use crate::models::risk::RiskLevel;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Danger → red, warning → yellow, caution → cyan, none → reset.
pub fn color_for_level(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Danger => RED,
        RiskLevel::Warning => YELLOW,
        RiskLevel::Caution => CYAN,
        RiskLevel::None => RESET,
    }
}

pub fn paint(color: &str, value: &str) -> String {
    format!("{color}{value}{RESET}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_map_to_distinct_colors() {
        assert_eq!(color_for_level(RiskLevel::Danger), RED);
        assert_eq!(color_for_level(RiskLevel::None), RESET);
        assert_eq!(paint(YELLOW, "x"), "\x1b[33mx\x1b[0m");
    }
}
