// Copyright (c) 2026 rezky_nightky

pub const RAIN: [char; 3] = ['|', '.', '`'];
pub const SNOW: [char; 2] = ['*', '-'];
pub const STAR: char = '•';
pub const DEFAULT_MOON: char = '#';

/// Lightning glyphs from dimmest to brightest.
pub const LIGHTNING: [char; 3] = ['*', '+', '#'];

/// First character of `arg`, or the default moon glyph when empty.
pub fn moon_glyph(arg: &str) -> char {
    arg.chars().next().unwrap_or(DEFAULT_MOON)
}
