// Copyright (c) 2026 rezky_nightky

use crate::cell::{Cell, Style};

/// Drawing side of the terminal surface. The scene only ever talks to this.
pub trait Surface {
    fn size(&self) -> (u16, u16);

    /// Writes one glyph. Coordinates outside the grid are ignored.
    fn set_cell(&mut self, x: i32, y: i32, ch: char, style: Style);

    fn clear(&mut self);
}

#[derive(Clone, Debug)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    cells: Vec<Cell>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; len],
        }
    }

    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    #[allow(dead_code)]
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn row(&self, y: u16) -> &[Cell] {
        let w = self.width as usize;
        let start = y as usize * w;
        self.cells.get(start..start + w).unwrap_or(&[])
    }

    /// Cells that hold something other than a blank.
    #[cfg(test)]
    pub fn painted(&self) -> impl Iterator<Item = (u16, u16, Cell)> + '_ {
        let w = self.width.max(1) as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c != Cell::BLANK)
            .map(move |(i, c)| ((i % w) as u16, (i / w) as u16, *c))
    }
}

impl Surface for Frame {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn set_cell(&mut self, x: i32, y: i32, ch: char, style: Style) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = Cell::new(ch, style);
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }
}
