// Copyright (c) 2026 rezky_nightky

//! Lightning bolts: a bolt is seeded near the top of the screen, grows
//! downward a row at a time (occasionally branching or forking), then fades
//! segment by segment until every segment has outlived its lifespan.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::cell::Style;
use crate::config::LightningParams;
use crate::frame::Surface;
use crate::glyphs;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub row: u16,
    pub col: u16,
    pub created: Instant,
}

impl Segment {
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoltState {
    Growing,
    Fading,
    Expired,
}

/// Glyph for a segment of the given age, brightest first. `None` once the
/// segment has outlived `lifespan`.
pub fn segment_glyph(age: Duration, lifespan: Duration) -> Option<char> {
    if age > lifespan {
        return None;
    }
    let [dim, mid, bright] = glyphs::LIGHTNING;
    if age * 3 < lifespan {
        Some(bright)
    } else if age * 3 < lifespan * 2 {
        Some(mid)
    } else {
        Some(dim)
    }
}

#[derive(Clone, Debug)]
pub struct Bolt {
    segments: Vec<Segment>,
    target_length: usize,
    growing: bool,
    max_rows: u16,
    max_cols: u16,
    last_growth: Instant,
}

impl Bolt {
    /// A bolt with a single seed segment. The seed is clamped into the box.
    pub fn new(
        row: u16,
        col: u16,
        target_length: usize,
        max_rows: u16,
        max_cols: u16,
        now: Instant,
    ) -> Self {
        let seed = Segment {
            row: row.min(max_rows.saturating_sub(1)),
            col: col.min(max_cols.saturating_sub(1)),
            created: now,
        };
        Self {
            segments: vec![seed],
            target_length: target_length.max(1),
            growing: true,
            max_rows,
            max_cols,
            last_growth: now,
        }
    }

    /// Seeds a bolt in the middle half of the width and the top fifth of the
    /// height, aiming for between half and nearly the full height.
    pub fn spawn<R: Rng>(rng: &mut R, width: u16, height: u16, now: Instant) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let (w, h) = (width as u32, height as u32);
        let col = rng.random_range(0..(w / 2).max(1)) + w / 4;
        let row = rng.random_range(0..(h / 5).max(1));
        let span = h.saturating_sub(h / 2).saturating_sub(2).max(1);
        let target = rng.random_range(0..span) + h / 2;
        Some(Self::new(
            row as u16,
            col as u16,
            target as usize,
            height,
            width,
            now,
        ))
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn target_length(&self) -> usize {
        self.target_length
    }

    pub fn is_growing(&self) -> bool {
        self.growing
    }

    pub fn is_expired(&self, now: Instant, lifespan: Duration) -> bool {
        self.segments.iter().all(|s| s.age(now) > lifespan)
    }

    pub fn state(&self, now: Instant, lifespan: Duration) -> BoltState {
        if self.is_expired(now, lifespan) {
            BoltState::Expired
        } else if self.is_growing() {
            BoltState::Growing
        } else {
            BoltState::Fading
        }
    }

    /// Adds the next row of segments if the growth delay has passed.
    /// Returns how many segments were added.
    pub fn grow<R: Rng>(&mut self, rng: &mut R, params: &LightningParams, now: Instant) -> usize {
        if !self.growing || now.saturating_duration_since(self.last_growth) < params.growth_delay
        {
            return 0;
        }
        self.last_growth = now;

        let Some(last) = self.segments.last().copied() else {
            self.growing = false;
            return 0;
        };
        let bottom = self.max_rows.saturating_sub(1);
        let budget = self.target_length.saturating_sub(self.segments.len());
        if budget == 0 || last.row >= bottom {
            self.growing = false;
            return 0;
        }

        let mut branches = 1;
        if rng.random_bool(params.branch_chance) {
            branches = rng.random_range(1..=params.max_branches.max(1));
        }
        let branches = branches.min(budget);

        let row = last.row + 1;
        let max_col = self.max_cols.saturating_sub(1) as i32;
        let jitter = params.jitter.abs();
        let before = self.segments.len();

        let mut col = last.col as i32;
        let mut primary = None;
        for _ in 0..branches {
            col = (col + rng.random_range(-jitter..=jitter)).clamp(0, max_col);
            primary.get_or_insert(col);
            self.segments.push(Segment {
                row,
                col: col as u16,
                created: now,
            });
        }

        if self.segments.len() < self.target_length && rng.random_bool(params.fork_chance) {
            let spread = params.fork_spread.abs().max(1);
            let fork = (last.col as i32 + rng.random_range(-spread..=spread)).clamp(0, max_col);
            if Some(fork) != primary {
                self.segments.push(Segment {
                    row,
                    col: fork as u16,
                    created: now,
                });
            }
        }

        let added = self.segments.len() - before;
        if added == 0 || self.segments.len() >= self.target_length || row >= bottom {
            self.growing = false;
        }
        added
    }

    pub fn draw<S: Surface>(&self, surface: &mut S, style: Style, now: Instant, lifespan: Duration) {
        for seg in &self.segments {
            if seg.row >= self.max_rows || seg.col >= self.max_cols {
                continue;
            }
            if let Some(ch) = segment_glyph(seg.age(now), lifespan) {
                surface.set_cell(seg.col as i32, seg.row as i32, ch, style);
            }
        }
    }
}

/// The set of active bolts. Bolts live here and nowhere else.
#[derive(Clone, Debug, Default)]
pub struct Storm {
    bolts: Vec<Bolt>,
}

impl Storm {
    #[cfg(test)]
    pub fn bolts(&self) -> &[Bolt] {
        &self.bolts
    }

    pub fn len(&self) -> usize {
        self.bolts.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.bolts.is_empty()
    }

    pub fn clear(&mut self) {
        self.bolts.clear();
    }

    #[cfg(test)]
    pub fn push(&mut self, bolt: Bolt) {
        self.bolts.push(bolt);
    }

    /// One Bernoulli trial for a new bolt, skipped while the storm is full.
    pub fn maybe_spawn<R: Rng>(
        &mut self,
        rng: &mut R,
        params: &LightningParams,
        width: u16,
        height: u16,
        now: Instant,
    ) -> bool {
        if self.bolts.len() >= params.max_active || !rng.random_bool(params.chance) {
            return false;
        }
        match Bolt::spawn(rng, width, height, now) {
            Some(bolt) => {
                let seed = bolt.segments()[0];
                tracing::trace!(
                    row = seed.row,
                    col = seed.col,
                    target = bolt.target_length(),
                    "bolt spawned"
                );
                self.bolts.push(bolt);
                true
            }
            None => false,
        }
    }

    /// Grows every bolt, then drops the ones that have fully faded.
    /// Returns the number of bolts removed.
    pub fn update<R: Rng>(&mut self, rng: &mut R, params: &LightningParams, now: Instant) -> usize {
        for bolt in &mut self.bolts {
            bolt.grow(rng, params, now);
        }
        let before = self.bolts.len();
        self.bolts
            .retain(|b| b.state(now, params.lifespan) != BoltState::Expired);
        let removed = before - self.bolts.len();
        if removed > 0 {
            tracing::trace!(removed, active = self.bolts.len(), "bolts expired");
        }
        removed
    }

    pub fn draw<S: Surface>(&self, surface: &mut S, style: Style, now: Instant, lifespan: Duration) {
        for bolt in &self.bolts {
            bolt.draw(surface, style, now, lifespan);
        }
    }
}
