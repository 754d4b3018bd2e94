// Copyright (c) 2026 rezky_nightky

use crossterm::style::Color;

/// Rendering attributes for a single glyph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Style {
    pub fg: Option<Color>,
    pub bold: bool,
    pub dim: bool,
}

impl Style {
    pub const fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(mut self, on: bool) -> Self {
        self.bold = on;
        self
    }

    pub const fn dim(mut self, on: bool) -> Self {
        self.dim = on;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        style: Style {
            fg: None,
            bold: false,
            dim: false,
        },
    };

    pub fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}
