// Copyright (c) 2026 rezky_nightky

use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::cell::Style;
use crate::glyphs;
use crate::palette::{self, COLOR_NAMES};

pub const DEFAULT_FRAME_MS: u64 = 15;

pub fn color_enabled_stdout() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if matches!(std::env::var("CLICOLOR").ok().as_deref(), Some("0")) {
        return false;
    }
    std::io::stdout().is_terminal()
}

#[derive(Parser, Debug, Clone)]
#[command(name = "skyfall", version, disable_version_flag = true)]
pub struct Args {
    #[arg(
        long = "rain-color",
        default_value = "cyan",
        help_heading = "APPEARANCE",
        help = "Color for the rain (see --list-colors)"
    )]
    pub rain_color: String,

    #[arg(
        long = "lightning-color",
        default_value = "yellow",
        help_heading = "APPEARANCE",
        help = "Color for the lightning"
    )]
    pub lightning_color: String,

    #[arg(
        long = "snow-color",
        default_value = "white",
        help_heading = "APPEARANCE",
        help = "Color for the snow"
    )]
    pub snow_color: String,

    #[arg(
        long = "moon-color",
        default_value = "yellow",
        help_heading = "APPEARANCE",
        help = "Color for the moon"
    )]
    pub moon_color: String,

    #[arg(
        long = "moon-char",
        default_value = "#",
        help_heading = "APPEARANCE",
        help = "Character used to fill the moon"
    )]
    pub moon_char: String,

    #[arg(
        long = "frame-ms",
        default_value_t = DEFAULT_FRAME_MS,
        value_parser = clap::value_parser!(u64).range(5..=100),
        help_heading = "PERFORMANCE",
        help = "Frame interval in milliseconds (min 5 max 100)"
    )]
    pub frame_ms: u64,

    #[arg(long = "mute", help_heading = "AUDIO", help = "Disable all sound")]
    pub mute: bool,

    #[arg(
        long = "volume",
        default_value_t = 70,
        value_parser = clap::value_parser!(u8).range(0..=100),
        help_heading = "AUDIO",
        help = "Sound volume in percent (min 0 max 100)"
    )]
    pub volume: u8,

    #[arg(
        long = "sound-dir",
        default_value = "sounds",
        help_heading = "AUDIO",
        help = "Directory holding thunder.wav and rain.wav"
    )]
    pub sound_dir: PathBuf,

    #[arg(
        long = "log-file",
        help_heading = "GENERAL",
        help = "Write logs to this file (filter with RUST_LOG)"
    )]
    pub log_file: Option<PathBuf>,

    #[arg(
        long = "list-colors",
        help_heading = "HELP",
        help = "List available color names and exit"
    )]
    pub list_colors: bool,

    #[arg(
        long = "info",
        short = 'i',
        help_heading = "HELP",
        help = "Print version info and exit"
    )]
    pub info: bool,

    #[arg(
        long = "version",
        short = 'v',
        help_heading = "HELP",
        help = "Print version and exit"
    )]
    pub version: bool,
}

/// Resolved per-layer styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Styles {
    pub rain: Style,
    pub lightning: Style,
    pub snow: Style,
    pub moon: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self::from_colors("", "", "", "")
    }
}

impl Styles {
    pub fn from_colors(rain: &str, lightning: &str, snow: &str, moon: &str) -> Self {
        Self {
            rain: Style::fg(palette::color_or(rain, palette::DEFAULT_RAIN)),
            lightning: Style::fg(palette::color_or(lightning, palette::DEFAULT_LIGHTNING))
                .bold(true),
            snow: Style::fg(palette::color_or(snow, palette::DEFAULT_SNOW)),
            moon: Style::fg(palette::color_or(moon, palette::DEFAULT_MOON)).bold(true),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LightningParams {
    /// Per-frame spawn probability while the storm is on.
    pub chance: f64,
    pub max_active: usize,
    pub growth_delay: Duration,
    pub max_branches: usize,
    pub branch_chance: f64,
    pub fork_chance: f64,
    pub fork_spread: i32,
    pub jitter: i32,
    pub lifespan: Duration,
}

impl Default for LightningParams {
    fn default() -> Self {
        Self {
            chance: 0.005,
            max_active: 3,
            growth_delay: Duration::from_millis(2),
            max_branches: 2,
            branch_chance: 0.3,
            fork_chance: 0.15,
            fork_spread: 3,
            jitter: 2,
            lifespan: Duration::from_millis(800),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RainParams {
    pub chance: f64,
    pub storm_chance: f64,
    /// Up to `width / width_divisor` drops per successful spawn.
    pub width_divisor: u16,
    pub storm_width_divisor: u16,
    pub min_speed: f64,
    pub max_speed: f64,
    pub storm_max_speed: f64,
    /// Drops slower than this are drawn dimmed.
    pub dim_below: f64,
}

impl Default for RainParams {
    fn default() -> Self {
        Self {
            chance: 0.3,
            storm_chance: 0.5,
            width_divisor: 15,
            storm_width_divisor: 8,
            min_speed: 0.3,
            max_speed: 0.6,
            storm_max_speed: 1.0,
            dim_below: 0.8,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SnowParams {
    pub chance: f64,
    pub width_divisor: u16,
    pub min_speed: f64,
    pub max_speed: f64,
    /// Full width of the drift range, centred on zero.
    pub drift: f64,
}

impl Default for SnowParams {
    fn default() -> Self {
        Self {
            chance: 0.2,
            width_divisor: 10,
            min_speed: 0.05,
            max_speed: 0.2,
            drift: 0.2,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SkyParams {
    pub star_count: usize,
    pub twinkle_chance: f64,
    pub moon_radius: i32,
    pub moon_y: i32,
}

impl Default for SkyParams {
    fn default() -> Self {
        Self {
            star_count: 50,
            twinkle_chance: 0.005,
            moon_radius: 3,
            moon_y: 5,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AudioConfig {
    pub muted: bool,
    pub volume: u8,
    pub sound_dir: PathBuf,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            muted: false,
            volume: 70,
            sound_dir: PathBuf::from("sounds"),
        }
    }
}

/// Everything the scene and loop need, fixed at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub styles: Styles,
    pub moon_char: char,
    pub frame_interval: Duration,
    pub lightning: LightningParams,
    pub rain: RainParams,
    pub snow: SnowParams,
    pub sky: SkyParams,
    pub audio: AudioConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            styles: Styles::default(),
            moon_char: glyphs::DEFAULT_MOON,
            frame_interval: Duration::from_millis(DEFAULT_FRAME_MS),
            lightning: LightningParams::default(),
            rain: RainParams::default(),
            snow: SnowParams::default(),
            sky: SkyParams::default(),
            audio: AudioConfig::default(),
        }
    }
}

impl Config {
    pub fn from_args(args: &Args) -> Self {
        Self {
            styles: Styles::from_colors(
                &args.rain_color,
                &args.lightning_color,
                &args.snow_color,
                &args.moon_color,
            ),
            moon_char: glyphs::moon_glyph(&args.moon_char),
            frame_interval: Duration::from_millis(args.frame_ms),
            audio: AudioConfig {
                muted: args.mute,
                volume: args.volume,
                sound_dir: args.sound_dir.clone(),
            },
            ..Self::default()
        }
    }
}

pub fn print_list_colors() {
    if color_enabled_stdout() {
        println!("\x1b[1;36mAVAILABLE COLORS:\x1b[0m");
        println!("\x1b[2mNOTE: Unknown names fall back to the flag's default.\x1b[0m");
    } else {
        println!("AVAILABLE COLORS:");
        println!("NOTE: Unknown names fall back to the flag's default.");
    }
    println!();
    for name in COLOR_NAMES {
        println!("  {name}");
    }
    println!();
    println!("DEFAULTS:");
    println!("  --rain-color cyan  --lightning-color yellow  --snow-color white  --moon-color yellow");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::style::Color;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("skyfall").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_match_documented_values() {
        let cfg = Config::from_args(&parse(&[]));
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.styles.rain.fg, Some(Color::Cyan));
        assert!(cfg.styles.lightning.bold);
        assert_eq!(cfg.frame_interval, Duration::from_millis(15));
    }

    #[test]
    fn unknown_colors_fall_back_silently() {
        let cfg = Config::from_args(&parse(&["--rain-color", "chartreuse", "--moon-color", "red"]));
        assert_eq!(cfg.styles.rain.fg, Some(Color::Cyan));
        assert_eq!(cfg.styles.moon.fg, Some(Color::Red));
    }

    #[test]
    fn moon_char_uses_first_character() {
        let cfg = Config::from_args(&parse(&["--moon-char", "Ox"]));
        assert_eq!(cfg.moon_char, 'O');
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let argv = ["skyfall", "--volume", "150"];
        assert!(Args::try_parse_from(argv).is_err());
        let argv = ["skyfall", "--frame-ms", "1"];
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn audio_flags_are_carried() {
        let cfg = Config::from_args(&parse(&["--mute", "--volume", "20", "--sound-dir", "/tmp/s"]));
        assert!(cfg.audio.muted);
        assert_eq!(cfg.audio.volume, 20);
        assert_eq!(cfg.audio.sound_dir, PathBuf::from("/tmp/s"));
    }
}
