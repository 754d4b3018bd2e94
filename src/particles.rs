// Copyright (c) 2026 rezky_nightky

use rand::Rng;

use crate::cell::Style;
use crate::config::{RainParams, SnowParams};
use crate::frame::Surface;
use crate::glyphs;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Raindrop {
    pub x: f64,
    pub y: f64,
    pub speed: f64,
    pub ch: char,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Snowflake {
    pub x: f64,
    pub y: f64,
    pub speed: f64,
    pub drift: f64,
    pub ch: char,
}

fn speed_between<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

/// How many particles one successful spawn roll produces: `1..=width/divisor`.
fn batch_size<R: Rng>(rng: &mut R, width: u16, divisor: u16) -> usize {
    let max_new = (width / divisor.max(1)).max(1) as usize;
    rng.random_range(1..=max_new)
}

fn pick<R: Rng>(rng: &mut R, set: &[char]) -> char {
    set[rng.random_range(0..set.len())]
}

#[derive(Clone, Debug, Default)]
pub struct Rain {
    drops: Vec<Raindrop>,
}

impl Rain {
    #[cfg(test)]
    pub fn drops(&self) -> &[Raindrop] {
        &self.drops
    }

    pub fn len(&self) -> usize {
        self.drops.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }

    pub fn clear(&mut self) {
        self.drops.clear();
    }

    #[cfg(test)]
    pub fn push(&mut self, drop: Raindrop) {
        self.drops.push(drop);
    }

    /// Rolls once for a new batch of drops along the top row.
    pub fn spawn<R: Rng>(&mut self, rng: &mut R, params: &RainParams, width: u16, storm: bool) -> usize {
        if width == 0 {
            return 0;
        }
        let (chance, divisor, max_speed) = if storm {
            (params.storm_chance, params.storm_width_divisor, params.storm_max_speed)
        } else {
            (params.chance, params.width_divisor, params.max_speed)
        };
        if !rng.random_bool(chance) {
            return 0;
        }

        let n = batch_size(rng, width, divisor);
        for _ in 0..n {
            let x = rng.random_range(0..width) as f64;
            let speed = speed_between(rng, params.min_speed, max_speed);
            let ch = pick(rng, &glyphs::RAIN);
            self.drops.push(Raindrop { x, y: 0.0, speed, ch });
        }
        n
    }

    /// Moves every drop down by its speed and forgets the ones past the bottom.
    pub fn advance(&mut self, height: u16) {
        let bottom = height as f64;
        for d in &mut self.drops {
            d.y += d.speed;
        }
        self.drops.retain(|d| d.y < bottom);
    }

    pub fn draw<S: Surface>(&self, surface: &mut S, base: Style, storm: bool, dim_below: f64) {
        for d in &self.drops {
            let style = if storm {
                base.bold(true)
            } else if d.speed < dim_below {
                base.dim(true)
            } else {
                base
            };
            surface.set_cell(d.x as i32, d.y as i32, d.ch, style);
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Snow {
    flakes: Vec<Snowflake>,
}

impl Snow {
    #[cfg(test)]
    pub fn flakes(&self) -> &[Snowflake] {
        &self.flakes
    }

    pub fn len(&self) -> usize {
        self.flakes.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.flakes.is_empty()
    }

    pub fn clear(&mut self) {
        self.flakes.clear();
    }

    #[cfg(test)]
    pub fn push(&mut self, flake: Snowflake) {
        self.flakes.push(flake);
    }

    pub fn spawn<R: Rng>(&mut self, rng: &mut R, params: &SnowParams, width: u16) -> usize {
        if width == 0 || !rng.random_bool(params.chance) {
            return 0;
        }

        let n = batch_size(rng, width, params.width_divisor);
        for _ in 0..n {
            let x = rng.random_range(0..width) as f64;
            let speed = speed_between(rng, params.min_speed, params.max_speed);
            let drift = (rng.random::<f64>() - 0.5) * params.drift;
            let ch = pick(rng, &glyphs::SNOW);
            self.flakes.push(Snowflake {
                x,
                y: 0.0,
                speed,
                drift,
                ch,
            });
        }
        n
    }

    /// Moves flakes down and sideways; drops any that leave the screen.
    pub fn advance(&mut self, width: u16, height: u16) {
        let (right, bottom) = (width as f64, height as f64);
        for f in &mut self.flakes {
            f.y += f.speed;
            f.x += f.drift;
        }
        self.flakes
            .retain(|f| f.y < bottom && f.x >= 0.0 && f.x < right);
    }

    pub fn draw<S: Surface>(&self, surface: &mut S, style: Style) {
        for f in &self.flakes {
            surface.set_cell(f.x as i32, f.y as i32, f.ch, style);
        }
    }
}
