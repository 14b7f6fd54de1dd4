//! Terminal line chart of rate dynamics.
//!
//! Each character cell is a braille glyph holding a 2x4 grid of dots, which
//! gives the chart eight times the resolution of plain character art.

use chrono::NaiveDateTime;

use converter_types::{BASE_CURRENCY, RateDynamics};

pub const DEFAULT_WIDTH: usize = 64;
pub const DEFAULT_HEIGHT: usize = 16;

const MIN_WIDTH: usize = 8;
const MIN_HEIGHT: usize = 2;
const LABEL_WIDTH: usize = 10;
const BRAILLE_BASE: u32 = 0x2800;

/// Dot bit for column `x % 2`, row `y % 4` of a braille cell.
const DOT_BITS: [[u8; 4]; 2] = [[0x01, 0x02, 0x04, 0x40], [0x08, 0x10, 0x20, 0x80]];

/// Braille dot canvas, origin at the top-left.
struct Canvas {
    cols: usize,
    rows: usize,
    cells: Vec<u8>,
}

impl Canvas {
    fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![0; cols * rows],
        }
    }

    fn dot_width(&self) -> usize {
        self.cols * 2
    }

    fn dot_height(&self) -> usize {
        self.rows * 4
    }

    fn set(&mut self, x: i64, y: i64) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.dot_width() || y >= self.dot_height() {
            return;
        }
        self.cells[(y / 4) * self.cols + x / 2] |= DOT_BITS[x % 2][y % 4];
    }

    fn line(&mut self, (x0, y0): (i64, i64), (x1, y1): (i64, i64)) {
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).max(1);
        for i in 0..=steps {
            let x = x0 as f64 + (x1 - x0) as f64 * i as f64 / steps as f64;
            let y = y0 as f64 + (y1 - y0) as f64 * i as f64 / steps as f64;
            self.set(x.round() as i64, y.round() as i64);
        }
    }

    fn marker(&mut self, (x, y): (i64, i64)) {
        for (dx, dy) in [(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)] {
            self.set(x + dx, y + dy);
        }
    }

    fn row(&self, row: usize) -> String {
        self.cells[row * self.cols..(row + 1) * self.cols]
            .iter()
            .map(|&bits| char::from_u32(BRAILLE_BASE + bits as u32).unwrap_or(' '))
            .collect()
    }
}

/// Line chart renderer with point markers.
#[derive(Debug, Clone, Copy)]
pub struct Chart {
    width: usize,
    height: usize,
}

impl Default for Chart {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Chart {
    /// Plot area size in characters.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.max(MIN_WIDTH),
            height: height.max(MIN_HEIGHT),
        }
    }

    /// Renders `dynamics` of `code` as a titled chart: dates along the x axis,
    /// BYN per `scale` units along the y axis.
    pub fn render(&self, code: &str, dynamics: &RateDynamics) -> anyhow::Result<String> {
        let (lo, hi) = dynamics
            .bounds()
            .ok_or_else(|| anyhow::anyhow!("There are no rates to plot"))?;
        let (lo, hi) = if hi - lo < f64::EPSILON {
            (lo - 0.5, hi + 0.5)
        } else {
            (lo, hi)
        };

        let (first, last) = match (
            dynamics.rates.keys().next(),
            dynamics.rates.keys().next_back(),
        ) {
            (Some(first), Some(last)) => (*first, *last),
            _ => anyhow::bail!("There are no rates to plot"),
        };
        let span = (last - first).num_seconds().max(1) as f64;

        let mut canvas = Canvas::new(self.width, self.height);
        let max_x = (canvas.dot_width() - 1) as f64;
        let max_y = (canvas.dot_height() - 1) as f64;
        let project = |at: &NaiveDateTime, rate: f64| -> (i64, i64) {
            let x = (*at - first).num_seconds() as f64 / span * max_x;
            let y = (hi - rate) / (hi - lo) * max_y;
            (x.round() as i64, y.round() as i64)
        };

        let points: Vec<(i64, i64)> = dynamics
            .rates
            .iter()
            .map(|(at, rate)| project(at, *rate))
            .collect();
        for pair in points.windows(2) {
            canvas.line(pair[0], pair[1]);
        }
        for point in &points {
            canvas.marker(*point);
        }

        let code = code.to_uppercase();
        let mut out = String::new();
        out.push_str(&format!(
            "The rates of {:.0} {} in {}\n",
            dynamics.scale, code, BASE_CURRENCY
        ));
        for row in 0..self.height {
            let label = if row == 0 {
                format!("{hi:>LABEL_WIDTH$.4} ┤")
            } else if row == self.height - 1 {
                format!("{lo:>LABEL_WIDTH$.4} ┤")
            } else {
                format!("{:>LABEL_WIDTH$} │", "")
            };
            out.push_str(&label);
            out.push_str(&canvas.row(row));
            out.push('\n');
        }
        out.push_str(&format!(
            "{:>LABEL_WIDTH$} └{}\n",
            "",
            "─".repeat(self.width)
        ));

        let start = first.format("%Y-%m-%d").to_string();
        let end = last.format("%Y-%m-%d").to_string();
        let gap = (self.width + 1).saturating_sub(start.len() + end.len()).max(1);
        out.push_str(&format!(
            "{:>LABEL_WIDTH$}  {start}{}{end}\n",
            "",
            " ".repeat(gap)
        ));
        out.push_str(&format!(
            "{:>LABEL_WIDTH$}  ── {:.0} {}\n",
            "", dynamics.scale, code
        ));
        Ok(out)
    }
}
