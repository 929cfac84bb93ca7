//! Preview: prints a finished canvas to the terminal.
//!
//! The canvas bounds are mapped onto a character grid and each primitive is
//! painted in display-list order, so later primitives overwrite earlier ones
//! exactly as they would in an exported image. Output is a single static
//! print; there is no event loop.

use std::io::{self, Write};

use crossterm::{queue, style, terminal};

use crate::types::{Canvas, Color, Point, Primitive};

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;
const MAX_COLUMNS: u16 = 120;
const FALLBACK_COLUMNS: u16 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

/// Maps data units onto grid cells.
struct Grid {
    cells: Vec<Vec<Cell>>,
    cols: usize,
    rows: usize,
    x_min: f64,
    y_max: f64,
    col_per_unit: f64,
    row_per_unit: f64,
}

impl Grid {
    fn new(canvas: &Canvas, cols: usize, rows: usize) -> Self {
        let blank = Cell {
            ch: ' ',
            fg: Color::INK,
            bg: canvas.background,
        };
        let b = canvas.bounds;
        Grid {
            cells: vec![vec![blank; cols]; rows],
            cols,
            rows,
            x_min: b.x_min,
            y_max: b.y_max,
            col_per_unit: cols as f64 / b.width(),
            row_per_unit: rows as f64 / b.height(),
        }
    }

    /// Fractional (col, row) of a data point.
    fn locate(&self, p: Point) -> (f64, f64) {
        (
            (p.x - self.x_min) * self.col_per_unit,
            (self.y_max - p.y) * self.row_per_unit,
        )
    }

    fn cell_mut(&mut self, col: i64, row: i64) -> Option<&mut Cell> {
        if col < 0 || row < 0 {
            return None;
        }
        self.cells
            .get_mut(row as usize)
            .and_then(|r| r.get_mut(col as usize))
    }

    fn put(&mut self, col: i64, row: i64, ch: char, fg: Color) {
        if let Some(cell) = self.cell_mut(col, row) {
            cell.ch = ch;
            cell.fg = fg;
        }
    }

    fn fill(&mut self, center: Point, width: f64, height: f64, bg: Color) {
        let (c0, r0) = self.locate(center.offset(-width / 2.0, height / 2.0));
        let (c1, r1) = self.locate(center.offset(width / 2.0, -height / 2.0));
        let (c0, r0) = (c0.round() as i64, r0.round() as i64);
        // Always cover at least the center cell so small goods stay visible.
        let c1 = (c1.round() as i64).max(c0 + 1);
        let r1 = (r1.round() as i64).max(r0 + 1);
        for row in r0..r1 {
            for col in c0..c1 {
                if let Some(cell) = self.cell_mut(col, row) {
                    cell.ch = ' ';
                    cell.bg = bg;
                }
            }
        }
    }

    fn line(&mut self, from: Point, to: Point, color: Color) {
        let (c0, r0) = self.locate(from);
        let (c1, r1) = self.locate(to);
        let (dc, dr) = (c1 - c0, r1 - r0);
        let steps = dc.abs().max(dr.abs()).ceil().max(1.0) as usize;
        for i in 0..steps {
            let t = i as f64 / steps as f64;
            self.put(
                (c0 + dc * t).floor() as i64,
                (r0 + dr * t).floor() as i64,
                '·',
                color,
            );
        }
        let head = if dc.abs() >= dr.abs() * CELL_ASPECT {
            if dc >= 0.0 { '▶' } else { '◀' }
        } else if dr >= 0.0 {
            '▼'
        } else {
            '▲'
        };
        self.put(c1.floor() as i64, r1.floor() as i64, head, color);
    }

    fn text(&mut self, at: Point, text: &str, fg: Color, bg: Option<Color>) {
        let (col, row) = self.locate(at);
        let len = text.chars().count() as i64;
        let start = col.floor() as i64 - len / 2;
        let row = row.floor() as i64;
        for (i, ch) in text.chars().enumerate() {
            if let Some(cell) = self.cell_mut(start + i as i64, row) {
                cell.ch = ch;
                cell.fg = fg;
                if let Some(bg) = bg {
                    cell.bg = bg;
                }
            }
        }
    }
}

/// Rasterize `canvas` onto a `cols` × `rows` character grid.
pub fn rasterize(canvas: &Canvas, cols: usize, rows: usize) -> Vec<Vec<Cell>> {
    let mut grid = Grid::new(canvas, cols, rows);
    if grid.cols == 0 || grid.rows == 0 {
        return grid.cells;
    }

    for primitive in canvas.primitives() {
        match primitive {
            Primitive::Rect {
                center,
                width,
                height,
                fill,
                ..
            } => grid.fill(*center, *width, *height, *fill),
            Primitive::Circle { center, fill, .. } => {
                let (col, row) = grid.locate(*center);
                grid.put(col.floor() as i64, row.floor() as i64, '●', *fill);
            }
            Primitive::Arrow {
                from, to, color, ..
            } => grid.line(*from, *to, *color),
            Primitive::Text {
                position,
                text,
                style,
            } => grid.text(
                *position,
                text,
                style.color,
                style.panel.map(|panel| panel.fill),
            ),
        }
    }

    grid.cells
}

/// Grid size that keeps the canvas' aspect ratio within the terminal width.
pub fn grid_size(canvas: &Canvas, term_cols: u16) -> (usize, usize) {
    let cols = term_cols.min(MAX_COLUMNS) as usize;
    let b = canvas.bounds;
    let rows = (cols as f64 * b.height() / b.width() / CELL_ASPECT).round() as usize;
    (cols, rows.max(1))
}

fn term_color(color: Color) -> style::Color {
    let (r, g, b) = color.to_rgb();
    style::Color::Rgb { r, g, b }
}

/// Print `canvas` to stdout once.
pub fn show(canvas: &Canvas) -> io::Result<()> {
    let term_cols = terminal::size().map(|(w, _)| w).unwrap_or(FALLBACK_COLUMNS);
    show_on(&mut io::stdout(), canvas, term_cols)
}

fn show_on(out: &mut impl Write, canvas: &Canvas, term_cols: u16) -> io::Result<()> {
    let (cols, rows) = grid_size(canvas, term_cols);
    let cells = rasterize(canvas, cols, rows);

    for row in &cells {
        for cell in row {
            queue!(
                out,
                style::SetForegroundColor(term_color(cell.fg)),
                style::SetBackgroundColor(term_color(cell.bg)),
                style::Print(cell.ch),
            )?;
        }
        queue!(out, style::ResetColor, style::Print("\n"))?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Dimensions, FontWeight, TextAnchor, TextStyle};

    fn canvas() -> Canvas {
        Canvas::new(Dimensions::default())
    }

    #[test]
    fn empty_canvas_is_background() {
        let cells = rasterize(&canvas(), 40, 16);
        assert_eq!(cells.len(), 16);
        assert!(cells.iter().flatten().all(|c| c.ch == ' ' && c.bg == Color::WHITE));
    }

    #[test]
    fn rect_fills_its_cells() {
        let mut canvas = canvas();
        canvas.push(Primitive::Rect {
            center: Point::new(0.0, 0.0),
            width: 2.0,
            height: 2.0,
            fill: Color::TAN,
            stroke: Color::INK,
            stroke_width: 1.5,
            opacity: 0.85,
        });
        // 40x16 over 20x16 units: 2 cols and 1 row per unit.
        let cells = rasterize(&canvas, 40, 16);
        let tan: usize = cells.iter().flatten().filter(|c| c.bg == Color::TAN).count();
        assert_eq!(tan, 4 * 2);
        assert_eq!(cells[7][19].bg, Color::TAN);
        assert_eq!(cells[0][0].bg, Color::WHITE);
    }

    #[test]
    fn later_primitives_paint_over_earlier_ones() {
        let mut canvas = canvas();
        canvas.push(Primitive::Rect {
            center: Point::new(0.0, 0.0),
            width: 4.0,
            height: 2.0,
            fill: Color::TAN,
            stroke: Color::INK,
            stroke_width: 1.5,
            opacity: 0.85,
        });
        canvas.push(Primitive::Text {
            position: Point::new(0.0, 0.0),
            text: "AB".into(),
            style: TextStyle {
                font_size: 9.0,
                weight: FontWeight::Bold,
                color: Color::INK,
                anchor: TextAnchor::Center,
                panel: None,
            },
        });
        let cells = rasterize(&canvas, 40, 16);
        let row: String = cells[8].iter().map(|c| c.ch).collect();
        assert!(row.contains("AB"));
        // Unpaneled text keeps the block's background.
        let a = cells[8].iter().find(|c| c.ch == 'A').unwrap();
        assert_eq!(a.bg, Color::TAN);
    }

    #[test]
    fn arrow_gets_a_head() {
        let mut canvas = canvas();
        canvas.push(Primitive::Arrow {
            from: Point::new(-3.0, 0.0),
            to: Point::new(3.0, 0.0),
            color: Color::hex(0x4A90E2),
            width: 2.5,
            opacity: 0.9,
        });
        let cells = rasterize(&canvas, 40, 16);
        let chars: String = cells.iter().flatten().map(|c| c.ch).collect();
        assert!(chars.contains('▶'));
        assert!(chars.contains('·'));
    }

    #[test]
    fn offgrid_primitives_are_dropped() {
        let mut canvas = canvas();
        canvas.push(Primitive::Circle {
            center: Point::new(50.0, 50.0),
            radius: 0.25,
            fill: Color::TAN,
            stroke: Color::INK,
            stroke_width: 1.0,
            opacity: 1.0,
        });
        let cells = rasterize(&canvas, 40, 16);
        assert!(cells.iter().flatten().all(|c| c.ch == ' '));
    }

    #[test]
    fn show_writes_one_line_per_row() {
        let mut out = Vec::new();
        show_on(&mut out, &canvas(), 80).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches('\n').count(), 32);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn grid_keeps_aspect() {
        assert_eq!(grid_size(&canvas(), 80), (80, 32));
        assert_eq!(grid_size(&canvas(), 500).0, 120);
    }
}
