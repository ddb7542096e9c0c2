//! Raw-mode terminal with double-buffered, diffed output.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event},
    execute, queue,
    style::{Attribute, Color as CtColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::buffer::{Buffer, char_width};
use crate::theme::{Rgb, TextStyle};

pub struct Terminal {
    stdout: io::Stdout,
    current_buffer: Buffer,
    previous_buffer: Buffer,
}

impl Terminal {
    /// Enter raw mode and the alternate screen. Both are undone on drop.
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

        let (width, height) = terminal::size()?;
        log::debug!("Terminal size {width}x{height}");

        Ok(Self {
            stdout,
            current_buffer: Buffer::new(width, height),
            previous_buffer: Buffer::new(width, height),
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.current_buffer.width(), self.current_buffer.height())
    }

    /// Wait for input. `None` blocks until an event arrives.
    pub fn poll(&self, timeout: Option<Duration>) -> io::Result<Vec<Event>> {
        let mut events = Vec::new();

        let has_event = match timeout {
            Some(dur) => event::poll(dur)?,
            None => {
                events.push(event::read()?);
                return Ok(events);
            }
        };

        if has_event {
            events.push(event::read()?);
            while event::poll(Duration::ZERO)? {
                events.push(event::read()?);
            }
        }

        Ok(events)
    }

    /// Resize the back buffers if the terminal changed size.
    ///
    /// Returns the current size.
    pub fn refresh_size(&mut self) -> io::Result<(u16, u16)> {
        let (width, height) = terminal::size()?;
        if width != self.current_buffer.width() || height != self.current_buffer.height() {
            log::debug!("Terminal resized to {width}x{height}");
            self.current_buffer = Buffer::new(width, height);
            self.previous_buffer = Buffer::new(width, height);
            queue!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
        }
        Ok((width, height))
    }

    /// Draw a frame and write only the cells that changed.
    pub fn draw(&mut self, render: impl FnOnce(&mut Buffer)) -> io::Result<()> {
        render(&mut self.current_buffer);
        self.flush_diff()?;
        std::mem::swap(&mut self.current_buffer, &mut self.previous_buffer);
        Ok(())
    }

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_x = u16::MAX;
        let mut last_y = u16::MAX;
        let mut last_char_width: u16 = 1;
        let mut last_fg = Rgb::new(255, 255, 255);
        let mut last_bg = Rgb::new(0, 0, 0);
        let mut last_style = TextStyle::new();

        queue!(
            self.stdout,
            SetAttribute(Attribute::Reset),
            SetForegroundColor(rgb(last_fg)),
            SetBackgroundColor(rgb(last_bg))
        )?;

        for (x, y, cell) in self.current_buffer.diff(&self.previous_buffer) {
            if cell.wide_continuation {
                continue;
            }

            if y != last_y || x != last_x.wrapping_add(last_char_width) {
                queue!(self.stdout, cursor::MoveTo(x, y))?;
            }

            if cell.fg != last_fg {
                queue!(self.stdout, SetForegroundColor(rgb(cell.fg)))?;
                last_fg = cell.fg;
            }
            if cell.bg != last_bg {
                queue!(self.stdout, SetBackgroundColor(rgb(cell.bg)))?;
                last_bg = cell.bg;
            }

            // Bold and dim share NormalIntensity as their reset.
            if cell.style.bold != last_style.bold || cell.style.dim != last_style.dim {
                queue!(self.stdout, SetAttribute(Attribute::NormalIntensity))?;
                if cell.style.bold {
                    queue!(self.stdout, SetAttribute(Attribute::Bold))?;
                }
                if cell.style.dim {
                    queue!(self.stdout, SetAttribute(Attribute::Dim))?;
                }
            }
            if cell.style.underline != last_style.underline {
                let attr = if cell.style.underline {
                    Attribute::Underlined
                } else {
                    Attribute::NoUnderline
                };
                queue!(self.stdout, SetAttribute(attr))?;
            }
            last_style = cell.style;

            write!(self.stdout, "{}", cell.char)?;

            last_x = x;
            last_y = y;
            last_char_width = char_width(cell.char).max(1) as u16;
        }

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()
    }
}

fn rgb(color: Rgb) -> CtColor {
    CtColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
