use std::fmt::Write as _;
use std::io;
use std::io::Write;

use crossterm::cursor;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::Age;
use crate::grid::Grid;

/// Title shown above the grid, both in the terminal and in text dumps
pub const TITLE: &str = "Game of Life";

/// How far towards white the oldest cells are faded, in `[0, 1]`
const MAX_FADE: f64 = 0.8;

/// Every cell is drawn this many terminal columns wide, so that cells come out roughly square
const CELL_WIDTH: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation from `self` (`p = 0`) to `other` (`p = 1`).
    pub fn lerp(&self, other: &Rgb, p: f64) -> Rgb {
        assert!((0f64..=1f64).contains(&p), "lerp p lives in [0, 1]");

        // interpolate a channel
        let f = |a: u8, b: u8| ((a as f64) * (1f64 - p) + (b as f64) * p).round() as u8;

        Rgb {
            r: f(self.r, other.r),
            g: f(self.g, other.g),
            b: f(self.b, other.b),
        }
    }
}

impl From<Rgb> for style::Color {
    fn from(c: Rgb) -> Self {
        style::Color::Rgb {
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }
}

/// Dark base colors a run may be drawn in
const BASE_COLORS: [Rgb; 6] = [
    Rgb::new(0, 0, 0),
    Rgb::new(0, 0, 139),
    Rgb::new(0, 100, 0),
    Rgb::new(139, 0, 0),
    Rgb::new(85, 26, 139),
    Rgb::new(0, 104, 139),
];

/// Maps ages onto shades of a single color. Newborn cells get the base color, and cells fade
/// towards white as they age, until `max_age`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    base: Rgb,
    max_age: Age,
}

impl Palette {
    pub fn new(base: Rgb, max_age: Age) -> Self {
        Self { base, max_age }
    }

    /// Pick a base color at random
    pub fn random<G: Rng>(max_age: Age, rng: &mut G) -> Self {
        let base = BASE_COLORS.choose(rng).copied().unwrap_or(BASE_COLORS[0]);

        Self::new(base, max_age)
    }

    pub fn base(&self) -> Rgb {
        self.base
    }

    /// Color of a cell aged `age`. Dead cells are white.
    pub fn shade(&self, age: Age) -> Rgb {
        if age == 0 {
            return Rgb::WHITE;
        }

        let age = age.min(self.max_age);
        let span = self.max_age.saturating_sub(1).max(1);
        let p = f64::from(age - 1) / f64::from(span) * MAX_FADE;

        self.base.lerp(&Rgb::WHITE, p)
    }
}

/// Anything a simulation can be drawn onto.
pub trait Renderer {
    /// Reset the canvas for a `rows` by `cols` grid
    fn dimensions(&mut self, rows: usize, cols: usize) -> io::Result<()>;

    /// Draw the cell at `(row, col)`, replacing whatever was drawn there. An `age` of `0` clears
    /// the cell.
    fn draw(&mut self, row: usize, col: usize, age: Age) -> io::Result<()>;

    /// Show everything drawn since the last call
    fn present(&mut self) -> io::Result<()>;
}

/// Draw every cell of `grid`, then present the frame
pub fn draw_grid<R: Renderer + ?Sized>(renderer: &mut R, grid: &Grid) -> io::Result<()> {
    for (row, col, age) in grid.iter() {
        renderer.draw(row, col, age)?;
    }

    renderer.present()
}

/// Human readable dump of the ages of `grid`.
///
/// Example output:
/// ```notrust
/// Game of Life
/// 1  2  1  0  0
/// 0  1  0  0  0
/// 0  0  0  0  4
/// ```
pub fn text_dump(grid: &Grid) -> String {
    let mut s = String::with_capacity((grid.rows() + 1) * (3 * grid.cols() + 1));

    s.push_str(TITLE);
    s.push('\n');

    for row in 0..grid.rows() {
        let mut line = String::with_capacity(3 * grid.cols());

        for age in grid.row(row) {
            let _ = write!(line, "{age:<3}");
        }

        s.push_str(line.trim_end());
        s.push('\n');
    }

    s
}

fn out_of_bounds(row: usize, col: usize, rows: usize, cols: usize) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("Cell ({row}, {col}) is outside of a {rows}x{cols} canvas"),
    )
}

/// Headless renderer, which writes a [`text_dump`] on every [`Renderer::present`].
pub struct TextRenderer<W: Write> {
    out: W,
    ages: Grid,

    /// Line terminator. Raw mode terminals need `\r\n`.
    newline: &'static str,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            ages: Grid::new(0, 0),
            newline: "\n",
        }
    }

    /// End lines with `\r\n`, so that dumps stay readable while the terminal is in raw mode
    pub fn with_crlf(mut self) -> Self {
        self.newline = "\r\n";
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn dimensions(&mut self, rows: usize, cols: usize) -> io::Result<()> {
        self.ages = Grid::new(rows, cols);

        Ok(())
    }

    fn draw(&mut self, row: usize, col: usize, age: Age) -> io::Result<()> {
        let (rows, cols) = (self.ages.rows(), self.ages.cols());

        self.ages
            .set(row, col, age)
            .map_err(|_| out_of_bounds(row, col, rows, cols))
    }

    fn present(&mut self) -> io::Result<()> {
        for line in text_dump(&self.ages).lines() {
            self.out.write_all(line.as_bytes())?;
            self.out.write_all(self.newline.as_bytes())?;
        }

        self.out.flush()
    }
}

/// Draws cells as colored blocks on a terminal.
pub struct TermRenderer<W: Write> {
    out: W,
    palette: Palette,
    rows: u16,
    cols: u16,
}

impl<W: Write> TermRenderer<W> {
    pub fn new(out: W, palette: Palette) -> Self {
        Self {
            out,
            palette,
            rows: 0,
            cols: 0,
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Terminal row just below the title and the grid
    fn footer(&self) -> u16 {
        self.rows.saturating_add(1)
    }
}

impl<W: Write> Renderer for TermRenderer<W> {
    fn dimensions(&mut self, rows: usize, cols: usize) -> io::Result<()> {
        let too_large = |_| io::Error::new(io::ErrorKind::InvalidInput, "Grid is too large");

        self.rows = u16::try_from(rows).map_err(too_large)?;
        self.cols = u16::try_from(cols).map_err(too_large)?;

        queue!(
            self.out,
            terminal::SetTitle(TITLE),
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
            style::Print(TITLE),
        )
    }

    fn draw(&mut self, row: usize, col: usize, age: Age) -> io::Result<()> {
        let (Ok(y), Ok(x)) = (u16::try_from(row), u16::try_from(col)) else {
            return Err(out_of_bounds(row, col, self.rows.into(), self.cols.into()));
        };

        if y >= self.rows || x >= self.cols {
            return Err(out_of_bounds(row, col, self.rows.into(), self.cols.into()));
        }

        let color = self.palette.shade(age);

        // The title takes up the first line
        queue!(
            self.out,
            cursor::MoveTo(x.saturating_mul(CELL_WIDTH), y.saturating_add(1)),
            style::SetBackgroundColor(color.into()),
            style::Print("  "),
            style::ResetColor,
        )
    }

    fn present(&mut self) -> io::Result<()> {
        let footer = self.footer();

        queue!(
            self.out,
            cursor::MoveTo(0, footer),
            terminal::Clear(terminal::ClearType::FromCursorDown),
        )?;

        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::Palette;
    use super::Renderer;
    use super::Rgb;
    use super::TextRenderer;
    use super::text_dump;
    use crate::grid::Grid;

    #[test]
    fn dead_cells_are_white() {
        let palette = Palette::new(Rgb::new(0, 0, 139), 20);

        assert_eq!(palette.shade(0), Rgb::WHITE);
        assert_eq!(palette.shade(1), Rgb::new(0, 0, 139));
    }

    #[test]
    fn shades_fade_with_age() {
        let palette = Palette::new(Rgb::new(139, 0, 0), 20);

        for age in 1..20 {
            let (a, b) = (palette.shade(age), palette.shade(age + 1));

            assert!(a.r <= b.r && a.g <= b.g && a.b <= b.b, "age {age}");
            assert_ne!(a, b, "age {age}");
        }

        // Past the ceiling, cells look the same
        assert_eq!(palette.shade(20), palette.shade(30));
        assert_ne!(palette.shade(20), Rgb::WHITE);
    }

    #[test]
    fn single_age_palette() {
        let palette = Palette::new(Rgb::new(10, 20, 30), 1);

        assert_eq!(palette.shade(1), Rgb::new(10, 20, 30));
    }

    #[test]
    fn dump() {
        let grid = Grid::from_ages(&[vec![1, 2, 1, 0, 0], vec![0, 20, 0, 0, 4]]).unwrap();

        insta::assert_snapshot!(text_dump(&grid).trim_end(), @r"
        Game of Life
        1  2  1  0  0
        0  20 0  0  4
        ");
    }

    #[test]
    fn text_renderer_prints_frames() {
        let mut renderer = TextRenderer::new(Vec::new());

        renderer.dimensions(1, 3).unwrap();
        renderer.draw(0, 1, 5).unwrap();
        renderer.present().unwrap();

        assert!(renderer.draw(1, 0, 1).is_err());

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(out, "Game of Life\n0  5  0\n");
    }

    #[test]
    fn crlf_text_renderer() {
        let mut renderer = TextRenderer::new(Vec::new()).with_crlf();

        renderer.dimensions(1, 1).unwrap();
        renderer.present().unwrap();

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(out, "Game of Life\r\n0\r\n");
    }
}
