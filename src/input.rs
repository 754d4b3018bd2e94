// Copyright (c) 2026 rezky_nightky

use std::io;
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError};
use std::thread::{self, JoinHandle};

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

const QUEUE_DEPTH: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    ToggleThunderstorm,
    ToggleSnow,
    ToggleNight,
    ToggleHidden,
    Resize(u16, u16),
}

/// Maps a raw terminal event to a command. Unbound keys map to `None`.
pub fn command_for(ev: &Event) -> Option<Command> {
    match ev {
        Event::Resize(w, h) => Some(Command::Resize(*w, *h)),
        Event::Key(k) if k.kind == KeyEventKind::Press => match (k.code, k.modifiers) {
            (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
            (KeyCode::Esc, _) | (KeyCode::Char('q' | 'Q'), _) => Some(Command::Quit),
            (KeyCode::Char('t' | 'T'), _) => Some(Command::ToggleThunderstorm),
            (KeyCode::Char('s' | 'S'), _) => Some(Command::ToggleSnow),
            (KeyCode::Char('n' | 'N'), _) => Some(Command::ToggleNight),
            (KeyCode::Char('h' | 'H'), _) => Some(Command::ToggleHidden),
            _ => None,
        },
        _ => None,
    }
}

/// Bounded queue between the blocking input reader and the frame loop.
pub struct InputQueue {
    tx: SyncSender<Command>,
    rx: Receiver<Command>,
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl InputQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::sync_channel(QUEUE_DEPTH);
        Self { tx, rx }
    }

    pub fn sender(&self) -> SyncSender<Command> {
        self.tx.clone()
    }

    /// Starts a thread that blocks on `read` and forwards mapped commands.
    /// The thread ends when `read` fails or the queue is dropped.
    pub fn spawn_reader<F>(&self, mut read: F) -> io::Result<JoinHandle<()>>
    where
        F: FnMut() -> io::Result<Event> + Send + 'static,
    {
        let tx = self.sender();
        thread::Builder::new()
            .name("skyfall-input".into())
            .spawn(move || loop {
                match read() {
                    Ok(ev) => {
                        let Some(cmd) = command_for(&ev) else {
                            continue;
                        };
                        if tx.send(cmd).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "input reader stopped");
                        break;
                    }
                }
            })
    }

    /// Never blocks.
    pub fn try_next(&self) -> Option<Command> {
        match self.rx.try_recv() {
            Ok(cmd) => Some(cmd),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}

/// Turns termination signals into a `Quit` command so the loop can return
/// and the terminal is released normally.
#[cfg(unix)]
pub fn forward_signals(tx: SyncSender<Command>) -> io::Result<()> {
    use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP])?;
    thread::Builder::new()
        .name("skyfall-signals".into())
        .spawn(move || {
            for sig in signals.forever() {
                tracing::info!(signal = sig, "termination signal received");
                if tx.try_send(Command::Quit).is_err() {
                    crate::terminal::restore_terminal_best_effort();
                    std::process::exit(128 + sig);
                }
            }
        })?;
    Ok(())
}

#[cfg(windows)]
pub fn forward_signals(tx: SyncSender<Command>) -> io::Result<()> {
    ctrlc::set_handler(move || {
        tracing::info!("ctrl-c received");
        if tx.try_send(Command::Quit).is_err() {
            crate::terminal::restore_terminal_best_effort();
            std::process::exit(130);
        }
    })
    .map_err(io::Error::other)
}
