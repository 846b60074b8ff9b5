//! Camera scrolling and fitting the logical view onto an output surface.

use crate::physics::{Rect, Vec2};

/// A view rectangle that scrolls inside the world bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub view: Rect,
    pub bounds: Rect,
}

impl Camera {
    pub fn new(view: Rect, bounds: Rect) -> Self {
        Self { view, bounds }
    }

    /// Centre the view on `target`, never showing anything outside the world.
    pub fn follow(&mut self, target: Vec2) {
        let x = target.x - self.view.width / 2.0;
        let y = target.y - self.view.height / 2.0;
        let max_x = (self.bounds.right() - self.view.width).max(self.bounds.left());
        let max_y = (self.bounds.bottom() - self.view.height).max(self.bounds.top());
        self.view.x = x.clamp(self.bounds.left(), max_x);
        self.view.y = y.clamp(self.bounds.top(), max_y);
    }

    pub fn world_to_screen(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x - self.view.x, p.y - self.view.y)
    }

    pub fn screen_to_world(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x + self.view.x, p.y + self.view.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScaleMode {
    /// Keep the whole view visible at its aspect ratio, centred.
    #[default]
    ShowAll,
}

/// Mapping between logical view pixels and terminal cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub px_per_col: f32,
    pub px_per_row: f32,
    pub origin_col: u16,
    pub origin_row: u16,
    pub cols: u16,
    pub rows: u16,
}

impl ScaleMode {
    /// Fit a `view`-sized picture into `cols`×`rows` cells whose height is
    /// `cell_aspect` times their width.
    pub fn fit(&self, view: Vec2, cols: u16, rows: u16, cell_aspect: f32) -> Viewport {
        match self {
            ScaleMode::ShowAll => {
                let cols_f = f32::from(cols.max(1));
                let rows_f = f32::from(rows.max(1));
                let px_per_col = (view.x / cols_f).max(view.y / (rows_f * cell_aspect));
                let px_per_row = px_per_col * cell_aspect;
                let used_cols = ((view.x / px_per_col).round() as u16).min(cols);
                let used_rows = ((view.y / px_per_row).round() as u16).min(rows);
                Viewport {
                    px_per_col,
                    px_per_row,
                    origin_col: (cols - used_cols) / 2,
                    origin_row: (rows - used_rows) / 2,
                    cols: used_cols,
                    rows: used_rows,
                }
            }
        }
    }
}

impl Viewport {
    /// Cell holding the logical point, if it falls inside the viewport.
    pub fn to_cell(&self, p: Vec2) -> Option<(u16, u16)> {
        if p.x < 0.0 || p.y < 0.0 {
            return None;
        }
        let col = (p.x / self.px_per_col) as u16;
        let row = (p.y / self.px_per_row) as u16;
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some((self.origin_col + col, self.origin_row + row))
    }

    /// Logical point at the centre of a terminal cell.
    pub fn to_logical(&self, col: u16, row: u16) -> Option<Vec2> {
        let c = col.checked_sub(self.origin_col)?;
        let r = row.checked_sub(self.origin_row)?;
        if c >= self.cols || r >= self.rows {
            return None;
        }
        Some(Vec2::new(
            (f32::from(c) + 0.5) * self.px_per_col,
            (f32::from(r) + 0.5) * self.px_per_row,
        ))
    }
}
