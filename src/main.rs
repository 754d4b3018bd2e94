// Copyright (c) 2026 rezky_nightky

mod app;
mod audio;
mod cell;
mod config;
mod error;
mod frame;
mod glyphs;
mod input;
mod lightning;
mod logging;
mod palette;
mod particles;
mod runtime;
mod scene;
mod sky;
mod terminal;

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::builder::styling::{AnsiColor as ClapAnsiColor, Color as ClapColor};
use clap::builder::styling::{Effects as ClapEffects, Style as ClapStyle};
use clap::builder::Styles as ClapStyles;
use clap::{CommandFactory, FromArgMatches};

use crate::audio::Audio;
use crate::config::{color_enabled_stdout, print_list_colors, Args, Config};
use crate::error::{Result, SkyfallError};
use crate::input::InputQueue;
use crate::terminal::{restore_terminal_best_effort, Terminal};

const KEYS_HELP: &str = "\
KEYS:
  t  toggle thunderstorm     s  toggle snow
  n  toggle night sky        h  hide/show weather
  q, Esc, Ctrl-C  quit";

const HELP_TEMPLATE_PLAIN: &str = "\
{before-help}{about-with-newline}
USAGE:
  {usage}

{all-args}{after-help}";

const HELP_TEMPLATE_COLOR: &str = "\
{before-help}{about-with-newline}
\x1b[1;36mUSAGE:\x1b[0m
  {usage}

{all-args}{after-help}";

fn clap_styles() -> ClapStyles {
    ClapStyles::styled()
        .header(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Cyan))),
        )
        .usage(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Green))),
        )
        .literal(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Yellow))))
        .placeholder(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Magenta))))
}

fn parse_args() -> Args {
    let help_template = if color_enabled_stdout() {
        HELP_TEMPLATE_COLOR
    } else {
        HELP_TEMPLATE_PLAIN
    };
    let cmd = Args::command()
        .styles(clap_styles())
        .help_template(help_template)
        .after_help(KEYS_HELP);
    let matches = cmd.get_matches();
    Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}

fn print_info() {
    println!("Version: v{}", env!("CARGO_PKG_VERSION"));
    let sha = env!("SKYFALL_GIT_SHA");
    if sha.is_empty() {
        println!("Build: {}", env!("SKYFALL_BUILD"));
    } else {
        println!("Build: {} ({})", env!("SKYFALL_BUILD"), sha);
    }
    println!("License: {}", env!("CARGO_PKG_LICENSE"));
    println!("Source: {}", env!("CARGO_PKG_REPOSITORY"));
}

fn run(args: Args) -> Result<()> {
    logging::init(args.log_file.as_deref())?;

    if !std::io::stdout().is_terminal() {
        return Err(SkyfallError::NotATerminal);
    }

    let config = Config::from_args(&args);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        moon = %config.moon_char,
        muted = config.audio.muted,
        "starting"
    );

    let queue = InputQueue::new();
    if let Err(e) = input::forward_signals(queue.sender()) {
        tracing::warn!(error = %e, "signal handling unavailable");
    }
    let audio = Audio::new(&config.audio);
    tracing::debug!(audio = audio.is_enabled(), "audio ready");

    let mut term = Terminal::new().map_err(SkyfallError::TerminalInit)?;
    let _reader = queue.spawn_reader(Terminal::read_event)?;

    let result = app::run(&mut term, config, &queue, &audio);
    drop(term);
    tracing::info!(ok = result.is_ok(), "terminal released");
    result
}

fn main() -> ExitCode {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        tracing::error!(%info, "panic");
        eprintln!("{}", info);
    }));

    let args = parse_args();

    if args.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    if args.info {
        print_info();
        return ExitCode::SUCCESS;
    }

    if args.list_colors {
        print_list_colors();
        return ExitCode::SUCCESS;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "fatal");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
