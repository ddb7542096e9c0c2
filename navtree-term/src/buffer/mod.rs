//! Cell buffer the outline is drawn into before flushing to the terminal.

mod cell;

pub use cell::Cell;

use unicode_width::UnicodeWidthChar;

use crate::theme::Rgb;

/// Display width of a character, zero for control characters.
pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        let cells = vec![Cell::default(); (width as usize) * (height as usize)];
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells[idx] = cell;
        }
    }

    fn index(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Cells of `self` that differ from `other`, with their coordinates.
    pub fn diff<'a>(&'a self, other: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(move |(i, (cell, _))| {
                let x = (i % self.width as usize) as u16;
                let y = (i / self.width as usize) as u16;
                (x, y, cell)
            })
    }

    /// Reset every cell to a blank on `bg`.
    pub fn clear(&mut self, bg: Rgb) {
        let blank = Cell::default().with_bg(bg);
        self.cells.fill(blank);
    }

    /// Paint a whole line with a background.
    pub fn fill_line(&mut self, y: u16, bg: Rgb) {
        for x in 0..self.width {
            self.set(x, y, Cell::default().with_bg(bg));
        }
    }

    /// Write `text` starting at `x` on line `y`, clipped at `max_x`.
    ///
    /// Colors and style come from `pen`. Returns the column after the last
    /// written character. Wide characters that would straddle `max_x` are
    /// dropped.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, max_x: u16, pen: Cell) -> u16 {
        let max_x = max_x.min(self.width);
        let mut x = x;
        for ch in text.chars() {
            let w = char_width(ch) as u16;
            if w == 0 {
                continue;
            }
            if x + w > max_x {
                break;
            }
            self.set(x, y, Cell { char: ch, ..pen });
            if w == 2 {
                let mut continuation = Cell::new(' ').with_fg(pen.fg).with_bg(pen.bg);
                continuation.wide_continuation = true;
                self.set(x + 1, y, continuation);
            }
            x += w;
        }
        x
    }
}
