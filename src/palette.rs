// Copyright (c) 2026 rezky_nightky

use crossterm::style::Color;

/// Names accepted by the `--*-color` flags, in listing order.
pub const COLOR_NAMES: [&str; 8] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

pub const DEFAULT_RAIN: Color = Color::Cyan;
pub const DEFAULT_LIGHTNING: Color = Color::Yellow;
pub const DEFAULT_SNOW: Color = Color::White;
pub const DEFAULT_MOON: Color = Color::Yellow;

pub const STAR_CLEAR: Color = Color::White;
pub const STAR_SNOWY: Color = Color::DarkGrey;

pub fn parse_color(name: &str) -> Option<Color> {
    match name.trim().to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::DarkGreen),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" | "purple" => Some(Color::DarkMagenta),
        "cyan" | "aqua" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::DarkGrey),
        _ => None,
    }
}

/// Unknown names quietly map to `fallback`.
pub fn color_or(name: &str, fallback: Color) -> Color {
    parse_color(name).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_name_resolves() {
        for name in COLOR_NAMES {
            assert!(parse_color(name).is_some(), "{name}");
        }
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        assert_eq!(parse_color(" CyAn "), Some(Color::Cyan));
        assert_eq!(parse_color("grey"), parse_color("gray"));
    }

    #[test]
    fn unknown_name_falls_back() {
        assert_eq!(color_or("ultraviolet", DEFAULT_RAIN), DEFAULT_RAIN);
        assert_eq!(color_or("", DEFAULT_MOON), DEFAULT_MOON);
        assert_eq!(color_or("red", DEFAULT_MOON), Color::Red);
    }
}
