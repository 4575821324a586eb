//! Condition-keyed glyphs and terminal art

use crate::model::Condition;

/// Single-cell glyph for list rows.
pub fn glyph(condition: Condition) -> &'static str {
    match condition {
        Condition::Sunny => "☀",
        Condition::Cloudy => "☁",
        Condition::Rainy => "☂",
        Condition::Snowy => "☃",
    }
}

/// Small art block for the detail screen.
pub fn art(condition: Condition) -> [&'static str; 3] {
    match condition {
        Condition::Sunny => [
            r"   \ | /   ",
            r"  -- O --  ",
            r"   / | \   ",
        ],
        Condition::Cloudy => [
            r"    .--.   ",
            r"  .(    ). ",
            r" (___.__)_)",
        ],
        Condition::Rainy => [
            r"    .--.   ",
            r"  .(    ). ",
            r"  ' ' ' '  ",
        ],
        Condition::Snowy => [
            r"    .--.   ",
            r"  .(    ). ",
            r"  *  *  *  ",
        ],
    }
}
