// Copyright (c) 2026 rezky_nightky

use std::time::Instant;

use rand::rngs::StdRng;

use crate::config::Config;
use crate::frame::Surface;
use crate::input::Command;
use crate::lightning::Storm;
use crate::particles::{Rain, Snow};
use crate::sky::{draw_moon, StarField};

/// Visual mode flags. Thunderstorm and snow exclude each other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modes {
    pub thunderstorm: bool,
    pub snowing: bool,
    pub night: bool,
    pub hidden: bool,
}

impl Modes {
    pub fn toggle_thunderstorm(&mut self) {
        self.thunderstorm = !self.thunderstorm;
        self.snowing = false;
    }

    pub fn toggle_snow(&mut self) {
        self.snowing = !self.snowing;
        self.thunderstorm = false;
    }

    pub fn toggle_night(&mut self) {
        self.night = !self.night;
    }

    pub fn toggle_hidden(&mut self) {
        self.hidden = !self.hidden;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Keep going; the screen must be repainted from scratch.
    Redraw,
    Quit,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub bolts_spawned: usize,
    pub bolts_expired: usize,
}

/// Every live collection plus the mode flags. Owned by the main loop.
pub struct Scene {
    config: Config,
    modes: Modes,
    width: u16,
    height: u16,
    storm: Storm,
    rain: Rain,
    snow: Snow,
    stars: StarField,
    rng: StdRng,
}

impl Scene {
    pub fn new(config: Config, width: u16, height: u16, rng: StdRng) -> Self {
        Self {
            config,
            modes: Modes::default(),
            width,
            height,
            storm: Storm::default(),
            rain: Rain::default(),
            snow: Snow::default(),
            stars: StarField::default(),
            rng,
        }
    }

    pub fn modes(&self) -> Modes {
        self.modes
    }

    #[cfg(test)]
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn storm(&self) -> &Storm {
        &self.storm
    }

    pub fn rain(&self) -> &Rain {
        &self.rain
    }

    pub fn snow(&self) -> &Snow {
        &self.snow
    }

    pub fn stars(&self) -> &StarField {
        &self.stars
    }

    pub fn apply(&mut self, cmd: Command) -> Outcome {
        match cmd {
            Command::Quit => return Outcome::Quit,
            Command::ToggleThunderstorm => self.modes.toggle_thunderstorm(),
            Command::ToggleSnow => self.modes.toggle_snow(),
            Command::ToggleNight => {
                self.modes.toggle_night();
                if self.modes.night {
                    self.regenerate_stars();
                } else {
                    self.stars.clear();
                }
            }
            Command::ToggleHidden => self.modes.toggle_hidden(),
            Command::Resize(w, h) => self.resize(w, h),
        }
        tracing::debug!(?cmd, modes = ?self.modes, "command applied");
        Outcome::Redraw
    }

    /// Drops every dynamic collection; the night sky is rebuilt for the new size.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.storm.clear();
        self.rain.clear();
        self.snow.clear();
        self.stars.clear();
        if self.modes.night {
            self.regenerate_stars();
        }
        tracing::info!(width, height, "resized");
    }

    fn regenerate_stars(&mut self) {
        self.stars.regenerate(
            &mut self.rng,
            self.config.sky.star_count,
            self.width,
            self.height,
        );
    }

    /// Advances the simulation by one frame.
    pub fn tick(&mut self, now: Instant) -> TickReport {
        let (w, h) = (self.width, self.height);
        let modes = self.modes;
        let mut report = TickReport::default();

        if modes.thunderstorm
            && self
                .storm
                .maybe_spawn(&mut self.rng, &self.config.lightning, w, h, now)
        {
            report.bolts_spawned = 1;
        }
        report.bolts_expired = self.storm.update(&mut self.rng, &self.config.lightning, now);

        if !modes.hidden && !modes.snowing {
            self.rain
                .spawn(&mut self.rng, &self.config.rain, w, modes.thunderstorm);
        }
        self.rain.advance(h);

        if !modes.hidden && modes.snowing {
            self.snow.spawn(&mut self.rng, &self.config.snow, w);
        }
        self.snow.advance(w, h);

        report
    }

    /// Paints the sky first, then the weather on top.
    pub fn render<S: Surface>(&mut self, surface: &mut S, now: Instant) {
        surface.clear();
        let (width, _) = surface.size();
        let modes = self.modes;
        let styles = self.config.styles;

        if modes.night {
            let sky = &self.config.sky;
            self.stars
                .draw(surface, &mut self.rng, modes.snowing, sky.twinkle_chance);
            draw_moon(
                surface,
                width as i32 / 2,
                sky.moon_y,
                sky.moon_radius,
                self.config.moon_char,
                styles.moon,
            );
        }

        if modes.hidden {
            return;
        }
        self.storm
            .draw(surface, styles.lightning, now, self.config.lightning.lifespan);
        if modes.snowing {
            self.snow.draw(surface, styles.snow);
        } else {
            self.rain.draw(
                surface,
                styles.rain,
                modes.thunderstorm,
                self.config.rain.dim_below,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rand::SeedableRng;

    use super::*;
    use crate::frame::Frame;
    use crate::glyphs;
    use crate::lightning::Bolt;
    use crate::particles::Raindrop;

    fn scene(w: u16, h: u16) -> Scene {
        Scene::new(Config::default(), w, h, StdRng::seed_from_u64(42))
    }

    #[test]
    fn thunderstorm_and_snow_are_exclusive() {
        let mut s = scene(80, 24);
        s.apply(Command::ToggleSnow);
        assert!(s.modes().snowing);
        s.apply(Command::ToggleThunderstorm);
        assert!(s.modes().thunderstorm && !s.modes().snowing);
        s.apply(Command::ToggleSnow);
        assert!(s.modes().snowing && !s.modes().thunderstorm);
        s.apply(Command::ToggleSnow);
        assert_eq!(s.modes(), Modes::default());
    }

    #[test]
    fn quit_is_reported_and_toggles_request_redraw() {
        let mut s = scene(10, 10);
        assert_eq!(s.apply(Command::ToggleHidden), Outcome::Redraw);
        assert!(s.modes().hidden);
        assert_eq!(s.apply(Command::Quit), Outcome::Quit);
    }

    #[test]
    fn rain_never_reaches_past_the_bottom() {
        let mut s = scene(80, 24);
        let mut now = Instant::now();
        let mut seen = 0;
        for _ in 0..1000 {
            now += Duration::from_millis(15);
            s.tick(now);
            seen = seen.max(s.rain().len());
            assert!(s.rain().drops().iter().all(|d| d.y < 24.0));
        }
        assert!(seen > 0);
    }

    #[test]
    fn resize_empties_every_collection() {
        let mut s = scene(80, 24);
        let now = Instant::now();
        for i in 0..5 {
            s.storm.push(Bolt::new(0, 10 + i, 10, 24, 80, now));
        }
        for i in 0..30 {
            s.rain.push(Raindrop {
                x: i as f64,
                y: 1.0,
                speed: 0.5,
                ch: '|',
            });
        }
        assert_eq!((s.storm().len(), s.rain().len()), (5, 30));

        s.apply(Command::Resize(100, 30));

        assert!(s.storm().is_empty());
        assert!(s.rain().is_empty());
        assert!(s.snow().is_empty());
        assert!(s.stars().is_empty());
        assert_eq!(s.size(), (100, 30));
    }

    #[test]
    fn night_mode_scatters_fifty_stars_in_upper_half() {
        let mut s = scene(100, 40);
        s.apply(Command::ToggleNight);
        assert_eq!(s.stars().len(), 50);
        assert!(s.stars().stars().iter().all(|st| st.y < 20));

        s.apply(Command::Resize(60, 10));
        assert_eq!(s.stars().len(), 50);
        assert!(s.stars().stars().iter().all(|st| st.y < 5 && st.x < 60));

        s.apply(Command::ToggleNight);
        assert!(s.stars().is_empty());
    }

    #[test]
    fn snow_mode_spawns_flakes_instead_of_drops() {
        let mut s = scene(80, 24);
        s.apply(Command::ToggleSnow);
        let mut now = Instant::now();
        for _ in 0..200 {
            now += Duration::from_millis(15);
            s.tick(now);
        }
        assert!(s.rain().is_empty());
        assert!(!s.snow().is_empty());
        assert!(s
            .snow()
            .flakes()
            .iter()
            .all(|f| f.y < 24.0 && f.x >= 0.0 && f.x < 80.0));
    }

    #[test]
    fn hidden_weather_spawns_nothing_and_draws_nothing() {
        let mut s = scene(80, 24);
        s.apply(Command::ToggleHidden);
        let mut now = Instant::now();
        for _ in 0..200 {
            now += Duration::from_millis(15);
            s.tick(now);
        }
        assert!(s.rain().is_empty());

        let mut frame = Frame::new(80, 24);
        s.render(&mut frame, now);
        assert_eq!(frame.painted().count(), 0);
    }

    #[test]
    fn storm_spawns_bolts_and_never_exceeds_three() {
        let mut cfg = Config::default();
        cfg.lightning.chance = 0.5;
        let mut s = Scene::new(cfg, 80, 24, StdRng::seed_from_u64(3));
        s.apply(Command::ToggleThunderstorm);
        let mut now = Instant::now();
        let mut spawned = 0;
        for _ in 0..400 {
            now += Duration::from_millis(15);
            spawned += s.tick(now).bolts_spawned;
            assert!(s.storm().len() <= 3);
            for bolt in s.storm().bolts() {
                assert!(bolt.segments().iter().all(|seg| seg.row < 24 && seg.col < 80));
            }
        }
        assert!(spawned > 0);
    }

    #[test]
    fn bolts_finish_fading_after_storm_ends() {
        let mut s = scene(80, 24);
        let now = Instant::now();
        // a single-segment bolt has nothing left to grow
        s.storm.push(Bolt::new(0, 40, 1, 24, 80, now));
        s.tick(now + Duration::from_millis(2));
        assert_eq!(s.storm().len(), 1);
        assert!(!s.storm().bolts()[0].is_growing());
        s.tick(now + Duration::from_secs(2));
        assert!(s.storm().is_empty());
    }

    #[test]
    fn night_render_draws_moon_under_weather() {
        let mut s = scene(40, 20);
        s.apply(Command::ToggleNight);
        let mut frame = Frame::new(40, 20);
        s.render(&mut frame, Instant::now());
        let moon = frame.get(20, 5).unwrap();
        assert_eq!(moon.ch, glyphs::DEFAULT_MOON);
        assert!(moon.style.bold);
    }
}
