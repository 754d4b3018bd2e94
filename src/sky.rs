// Copyright (c) 2026 rezky_nightky

use rand::Rng;

use crate::cell::Style;
use crate::frame::Surface;
use crate::glyphs;
use crate::palette::{STAR_CLEAR, STAR_SNOWY};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Star {
    pub x: u16,
    pub y: u16,
    pub ch: char,
}

/// Background stars, scattered over the upper half of the screen.
#[derive(Clone, Debug, Default)]
pub struct StarField {
    stars: Vec<Star>,
}

impl StarField {
    #[cfg(test)]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn clear(&mut self) {
        self.stars.clear();
    }

    /// Replaces the whole field with `count` fresh stars.
    pub fn regenerate<R: Rng>(&mut self, rng: &mut R, count: usize, width: u16, height: u16) {
        self.stars.clear();
        if width == 0 || height == 0 {
            return;
        }
        let rows = (height / 2).max(1);
        self.stars.extend((0..count).map(|_| Star {
            x: rng.random_range(0..width),
            y: rng.random_range(0..rows),
            ch: glyphs::STAR,
        }));
    }

    /// Stars are dim; now and then one flares bold for a single frame.
    pub fn draw<S: Surface, R: Rng>(
        &self,
        surface: &mut S,
        rng: &mut R,
        snowing: bool,
        twinkle_chance: f64,
    ) {
        let base = Style::fg(if snowing { STAR_SNOWY } else { STAR_CLEAR }).dim(true);
        for star in &self.stars {
            let style = if rng.random_bool(twinkle_chance) {
                base.bold(true)
            } else {
                base
            };
            surface.set_cell(star.x as i32, star.y as i32, star.ch, style);
        }
    }
}

/// Fills a disc centred on (`cx`, `cy`). Columns are stretched 2:1 so the
/// moon looks round in a terminal cell grid.
pub fn draw_moon<S: Surface>(surface: &mut S, cx: i32, cy: i32, radius: i32, ch: char, style: Style) {
    let limit = radius as f64 + 0.5;
    for dy in -radius..=radius {
        for dx in -radius * 2..=radius * 2 {
            let (fx, fy) = (dx as f64, dy as f64);
            if (fx * fx / 4.0 + fy * fy).sqrt() <= limit {
                surface.set_cell(cx + dx, cy + dy, ch, style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Frame;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn regenerate_fills_upper_half() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut field = StarField::default();
        field.regenerate(&mut rng, 50, 100, 40);
        assert_eq!(field.len(), 50);
        assert!(field.stars().iter().all(|s| s.x < 100 && s.y < 20));

        field.regenerate(&mut rng, 50, 10, 1);
        assert!(field.stars().iter().all(|s| s.y == 0));
        field.regenerate(&mut rng, 50, 0, 10);
        assert!(field.is_empty());
    }

    #[test]
    fn star_color_follows_snow() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut field = StarField::default();
        field.regenerate(&mut rng, 1, 4, 4);
        let star = field.stars()[0];
        let mut frame = Frame::new(4, 4);

        field.draw(&mut frame, &mut rng, true, 0.0);
        let cell = *frame.get(star.x as i32, star.y as i32).unwrap();
        assert_eq!(cell.style.fg, Some(STAR_SNOWY));
        assert!(cell.style.dim && !cell.style.bold);

        field.draw(&mut frame, &mut rng, false, 1.0);
        let cell = *frame.get(star.x as i32, star.y as i32).unwrap();
        assert_eq!(cell.style.fg, Some(STAR_CLEAR));
        assert!(cell.style.bold);
    }

    #[test]
    fn moon_is_wider_than_tall() {
        let mut frame = Frame::new(40, 12);
        draw_moon(&mut frame, 20, 5, 3, '#', Style::default());
        let cells: Vec<_> = frame.painted().collect();
        let xs = cells.iter().map(|c| c.0);
        let ys = cells.iter().map(|c| c.1);
        let (x0, x1) = (xs.clone().min().unwrap(), xs.max().unwrap());
        let (y0, y1) = (ys.clone().min().unwrap(), ys.max().unwrap());
        assert_eq!((x0, x1), (14, 26));
        assert_eq!((y0, y1), (2, 8));
        assert_eq!(frame.get(20, 5).unwrap().ch, '#');
        // corners of the bounding box stay empty
        assert_eq!(frame.get(14, 2).unwrap().ch, ' ');
    }

    #[test]
    fn moon_clips_at_screen_edges() {
        let mut frame = Frame::new(4, 3);
        draw_moon(&mut frame, 0, 0, 3, '#', Style::default());
        assert!(frame.painted().all(|(x, y, _)| x < 4 && y < 3));
        assert_eq!(frame.get(0, 0).unwrap().ch, '#');
    }
}
