// Copyright (c) 2026 rezky_nightky

use std::io::{stdout, Result, Stdout, Write};

use crossterm::{
    cursor, event,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::cell::{Cell, Style};
use crate::frame::Frame;

/// What the terminal is currently showing, used to diff the next frame.
struct LastFrame {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl LastFrame {
    fn blank(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; width as usize * height as usize],
        }
    }
}

#[derive(Default)]
struct Pen {
    pos: Option<(u16, u16)>,
    fg: Option<Color>,
    bold: bool,
    dim: bool,
}

impl Pen {
    fn apply(&mut self, out: &mut Stdout, style: Style) -> Result<()> {
        if style.fg != self.fg {
            out.queue(SetForegroundColor(style.fg.unwrap_or(Color::Reset)))?;
            self.fg = style.fg;
        }
        if style.bold != self.bold || style.dim != self.dim {
            out.queue(SetAttribute(Attribute::NormalIntensity))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.bold = style.bold;
            self.dim = style.dim;
        }
        Ok(())
    }
}

/// The real terminal surface. Acquired in `new`, released on drop.
pub struct Terminal {
    stdout: Stdout,
    last: Option<LastFrame>,
    run_buf: String,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        let init_res: Result<()> = (|| {
            out.execute(terminal::EnterAlternateScreen)?;
            out.execute(cursor::Hide)?;
            let _ = out.execute(terminal::DisableLineWrap);
            out.execute(SetAttribute(Attribute::Reset))?;
            out.execute(ResetColor)?;
            out.execute(terminal::Clear(terminal::ClearType::All))?;
            out.flush()?;
            Ok(())
        })();
        if let Err(e) = init_res {
            restore_terminal_best_effort();
            return Err(e);
        }
        Ok(Self {
            stdout: out,
            last: None,
            run_buf: String::with_capacity(64),
        })
    }

    pub fn size(&self) -> Result<(u16, u16)> {
        terminal::size()
    }

    /// Blocks until the next key, resize or mouse event.
    pub fn read_event() -> Result<event::Event> {
        event::read()
    }

    /// Forgets what is on screen so the next `present` repaints from scratch.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn present(&mut self, frame: &Frame) -> Result<()> {
        let Self {
            stdout,
            last,
            run_buf,
        } = self;

        let stale = last
            .as_ref()
            .map(|l| l.width != frame.width || l.height != frame.height)
            .unwrap_or(true);
        if stale {
            stdout.queue(SetAttribute(Attribute::Reset))?;
            stdout.queue(ResetColor)?;
            stdout.queue(terminal::Clear(terminal::ClearType::All))?;
            *last = Some(LastFrame::blank(frame.width, frame.height));
        }
        let Some(last) = last.as_mut() else {
            return Ok(());
        };

        let mut pen = Pen::default();
        stdout.queue(SetAttribute(Attribute::Reset))?;
        stdout.queue(ResetColor)?;

        let width = frame.width as usize;
        for y in 0..frame.height {
            let row = frame.row(y);
            let base = y as usize * width;
            let mut x = 0usize;
            while x < row.len() {
                let cell = row[x];
                if last.cells[base + x] == cell {
                    x += 1;
                    continue;
                }

                run_buf.clear();
                run_buf.push(cell.ch);
                last.cells[base + x] = cell;
                let mut end = x + 1;
                while end < row.len() {
                    let next = row[end];
                    if last.cells[base + end] == next || next.style != cell.style {
                        break;
                    }
                    run_buf.push(next.ch);
                    last.cells[base + end] = next;
                    end += 1;
                }

                let x0 = x as u16;
                if pen.pos != Some((x0, y)) {
                    stdout.queue(cursor::MoveTo(x0, y))?;
                }
                pen.apply(stdout, cell.style)?;
                stdout.queue(Print(run_buf.as_str()))?;
                pen.pos = (end < width).then_some((end as u16, y));

                x = end;
            }
        }

        stdout.queue(SetAttribute(Attribute::Reset))?;
        stdout.queue(ResetColor)?;
        stdout.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.stdout.execute(SetAttribute(Attribute::Reset));
        let _ = self.stdout.execute(ResetColor);
        let _ = self.stdout.execute(cursor::Show);
        let _ = self.stdout.execute(terminal::EnableLineWrap);
        let _ = self.stdout.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let _ = self.stdout.flush();
    }
}

pub fn restore_terminal_best_effort() {
    let mut out = stdout();
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::EnableLineWrap);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}
