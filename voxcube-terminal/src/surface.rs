/// Terminal render surface: a full-resolution framebuffer shown as
/// character cells
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::{self, Write};
use voxcube_core::{Framebuffer, RenderSurface, Rgb};

/// Character coverage ramp (empty to fully lit)
const COVERAGE_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// One downsampled terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub color: Option<Rgb>,
}

impl Cell {
    const EMPTY: Cell = Cell { ch: ' ', color: None };
}

/// Reduce the framebuffer to `cols` x `rows` cells.
///
/// A cell's character encodes the fraction of its pixel block that differs
/// from the background; any lit pixel yields at least the first glyph.
pub fn downsample(framebuffer: &Framebuffer, cols: usize, rows: usize) -> Vec<Cell> {
    let mut cells = vec![Cell::EMPTY; cols * rows];
    if cols == 0 || rows == 0 {
        return cells;
    }

    let (width, height) = (framebuffer.width(), framebuffer.height());
    let background = framebuffer.background();

    for row in 0..rows {
        let y0 = row * height / rows;
        let y1 = ((row + 1) * height / rows).max(y0 + 1).min(height);
        for col in 0..cols {
            let x0 = col * width / cols;
            let x1 = ((col + 1) * width / cols).max(x0 + 1).min(width);

            let mut lit = 0usize;
            let mut color = None;
            for y in y0..y1 {
                for x in x0..x1 {
                    if let Some(c) = framebuffer.pixel(x, y).filter(|&c| c != background) {
                        lit += 1;
                        color = Some(c);
                    }
                }
            }
            if lit == 0 {
                continue;
            }

            let total = (x1.saturating_sub(x0) * y1.saturating_sub(y0)).max(1);
            let coverage = lit as f32 / total as f32;
            let index = ((coverage * (COVERAGE_RAMP.len() - 1) as f32).round() as usize)
                .clamp(1, COVERAGE_RAMP.len() - 1);

            cells[row * cols + col] = Cell {
                ch: COVERAGE_RAMP[index],
                color,
            };
        }
    }

    cells
}

/// Render surface that draws into a [`Framebuffer`] and shows it on
/// `present`
pub struct TerminalSurface<W: Write> {
    framebuffer: Framebuffer,
    cols: usize,
    rows: usize,
    status: String,
    writer: W,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(writer: W, width: usize, height: usize, cols: usize, rows: usize) -> Self {
        Self {
            framebuffer: Framebuffer::new(width, height),
            cols,
            rows,
            status: String::new(),
            writer,
        }
    }

    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.cols = cols;
        self.rows = rows;
    }

    /// Text drawn over the first row on the next present
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }
}

impl<W: Write> RenderSurface for TerminalSurface<W> {
    type Error = io::Error;

    fn clear(&mut self, color: Rgb) {
        self.framebuffer.clear(color);
    }

    fn set_draw_color(&mut self, color: Rgb) {
        self.framebuffer.set_draw_color(color);
    }

    fn plot(&mut self, x: i32, y: i32) {
        self.framebuffer.plot(x, y);
    }

    fn present(&mut self) -> io::Result<()> {
        let cells = downsample(&self.framebuffer, self.cols, self.rows);

        for (row, line) in cells.chunks(self.cols.max(1)).enumerate() {
            let row = u16::try_from(row).unwrap_or(u16::MAX);
            self.writer.queue(cursor::MoveTo(0, row))?;
            for cell in line {
                let color = match cell.color {
                    Some(Rgb { r, g, b }) => Color::Rgb { r, g, b },
                    None => Color::DarkGrey,
                };
                self.writer.queue(SetForegroundColor(color))?;
                self.writer.queue(Print(cell.ch))?;
            }
        }

        if !self.status.is_empty() {
            self.writer
                .queue(cursor::MoveTo(0, 0))?
                .queue(SetForegroundColor(Color::Yellow))?
                .queue(Print(&self.status))?;
        }
        self.writer.queue(ResetColor)?;
        self.writer.flush()
    }
}
