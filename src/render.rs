//! Drawing for the pattern grid.
//!
//! Styles are plain values picked per cell at draw time; the host hands in a
//! [`Painter`] each frame.

use serde::{Deserialize, Serialize};
use web_sys::CanvasRenderingContext2d;

use crate::config::GridConfig;
use crate::model::PatternGrid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const CYAN: Color = Color::rgb(0x00, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Outline style for circles and trace segments.
///
/// Canvas 2D paths are always anti-aliased, so there is no switch for it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub stroke_width: f64,
}

impl Paint {
    pub const fn stroke(color: Color, stroke_width: f64) -> Self {
        Self {
            color,
            stroke_width,
        }
    }
}

/// Idle and selected styles, both outlined with the same stroke width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub normal: Paint,
    pub selected: Paint,
}

impl Palette {
    pub fn from_config(config: &GridConfig) -> Self {
        Self {
            normal: Paint::stroke(config.normal_color, config.stroke_width),
            selected: Paint::stroke(config.selected_color, config.stroke_width),
        }
    }

    pub fn for_cell(&self, selected: bool) -> &Paint {
        if selected { &self.selected } else { &self.normal }
    }
}

/// Primitive drawing surface supplied by the host on each frame.
pub trait Painter {
    fn draw_circle(&mut self, cx: f64, cy: f64, radius: f64, paint: &Paint);
    fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, paint: &Paint);
}

/// Draws the nine cells, then the trace on top of them.
pub fn render_pattern<P: Painter + ?Sized>(grid: &PatternGrid, painter: &mut P) {
    let palette = Palette::from_config(grid.config());
    draw_cells(grid, &palette, painter);
    draw_trace(grid, &palette, painter);
}

fn draw_cells<P: Painter + ?Sized>(grid: &PatternGrid, palette: &Palette, painter: &mut P) {
    let radius = grid.config().radius();
    for cell in grid.cells() {
        painter.draw_circle(
            cell.center_x,
            cell.center_y,
            radius,
            palette.for_cell(cell.selected),
        );
    }
}

fn draw_trace<P: Painter + ?Sized>(grid: &PatternGrid, palette: &Palette, painter: &mut P) {
    let Some(last) = grid.trace().last() else {
        return;
    };
    let cells = grid.cells();
    for (from, to) in grid.trace().segments() {
        let (a, b) = (&cells[from], &cells[to]);
        painter.draw_line(a.center_x, a.center_y, b.center_x, b.center_y, &palette.selected);
    }
    // rubber band to the finger
    if !grid.is_finished() {
        let tail = &cells[last];
        let cursor = grid.cursor();
        painter.draw_line(tail.center_x, tail.center_y, cursor.x, cursor.y, &palette.selected);
    }
}

impl Painter for CanvasRenderingContext2d {
    fn draw_circle(&mut self, cx: f64, cy: f64, radius: f64, paint: &Paint) {
        self.set_stroke_style_str(&paint.color.css());
        self.set_line_width(paint.stroke_width);
        self.begin_path();
        self.arc(cx, cy, radius, 0.0, std::f64::consts::TAU).ok();
        self.stroke();
    }

    fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, paint: &Paint) {
        self.set_stroke_style_str(&paint.color.css());
        self.set_line_width(paint.stroke_width);
        self.begin_path();
        self.move_to(x0, y0);
        self.line_to(x1, y1);
        self.stroke();
    }
}
