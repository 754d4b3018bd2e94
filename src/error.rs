// Copyright (c) 2026 rezky_nightky

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SkyfallError {
    #[error("this program requires an interactive terminal (stdout is not a TTY)")]
    NotATerminal,

    #[error("failed to initialize terminal: {0}")]
    TerminalInit(#[source] io::Error),

    #[error("cannot open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot install logger: {0}")]
    Logger(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, SkyfallError>;

/// Audio never stops the animation; these only end up in the log.
#[derive(Debug, Error)]
#[cfg_attr(not(feature = "audio"), allow(dead_code))]
pub enum AudioError {
    #[error("audio support was not compiled in (enable the `audio` feature)")]
    Unsupported,

    #[error("no audio device: {0}")]
    Device(String),

    #[error("cannot load sound {}: {message}", path.display())]
    Asset { path: PathBuf, message: String },

    #[error("cannot start audio thread: {0}")]
    Thread(#[from] io::Error),
}
