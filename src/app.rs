// Copyright (c) 2026 rezky_nightky

use std::time::Instant;

use rand::{rngs::StdRng, SeedableRng};

use crate::audio::{Audio, Cue};
use crate::config::Config;
use crate::error::Result;
use crate::frame::Frame;
use crate::input::{Command, InputQueue};
use crate::runtime::FrameClock;
use crate::scene::{Outcome, Scene};
use crate::terminal::Terminal;

const STATS_EVERY: u64 = 600;

/// The animation loop. Returns when a quit command arrives.
pub fn run(term: &mut Terminal, config: Config, queue: &InputQueue, audio: &Audio) -> Result<()> {
    let (w, h) = term.size()?;
    tracing::info!(width = w, height = h, frame_ms = config.frame_interval.as_millis() as u64, "animation started");

    let mut clock = FrameClock::new(config.frame_interval, Instant::now());
    let mut scene = Scene::new(config, w, h, StdRng::from_os_rng());
    let mut frame = Frame::new(w, h);

    loop {
        while let Some(cmd) = queue.try_next() {
            let was_storm = scene.modes().thunderstorm;
            if scene.apply(cmd) == Outcome::Quit {
                tracing::info!(frames = clock.frames(), "quit");
                return Ok(());
            }
            if let Command::Resize(nw, nh) = cmd {
                frame = Frame::new(nw, nh);
            }
            if !was_storm && scene.modes().thunderstorm {
                audio.play(Cue::Rain);
            }
            term.invalidate();
        }

        let now = clock.pace();
        let report = scene.tick(now);
        for _ in 0..report.bolts_spawned {
            audio.play(Cue::Thunder);
        }
        if report.bolts_expired > 0 {
            tracing::trace!(expired = report.bolts_expired, "bolts faded out");
        }

        scene.render(&mut frame, now);
        term.present(&frame)?;

        if clock.frames() % STATS_EVERY == 0 {
            tracing::debug!(
                frames = clock.frames(),
                bolts = scene.storm().len(),
                drops = scene.rain().len(),
                flakes = scene.snow().len(),
                stars = scene.stars().len(),
                "scene stats"
            );
        }
    }
}
