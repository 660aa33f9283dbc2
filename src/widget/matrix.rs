//! Editable value matrix: a grid of numeric cells bound through
//! `(row, col)` accessors.
//!
//! A press selects a cell; dragging vertically from the press point edits
//! the selected cell's value across the configured range.

use crate::constants::{MATRIX_CELL, MATRIX_GAP};
use crate::geometry::{Rect, clamp};
use crate::input::Pointer;
use crate::render::{Surface, TextAlign};
use crate::theme::Theme;
use crate::widget::{CellGetter, CellSetter, format_value};

/// Vertical distance (units) that sweeps a cell across its full range.
const DRAG_FULL_RANGE: f32 = 100.0;

#[derive(Debug, Clone, Copy)]
struct CellDrag {
    row: usize,
    col: usize,
    start_y: f32,
    start_value: f32,
}

pub struct Matrix {
    rows: usize,
    cols: usize,
    get: Option<CellGetter>,
    set: Option<CellSetter>,
    min: f32,
    max: f32,
    selected: Option<(usize, usize)>,
    drag: Option<CellDrag>,
    hover: bool,
}

impl Matrix {
    pub fn new(
        rows: usize,
        cols: usize,
        get: Option<CellGetter>,
        set: Option<CellSetter>,
        min: f32,
        max: f32,
    ) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            rows: rows.max(1),
            cols: cols.max(1),
            get,
            set,
            min,
            max,
            selected: None,
            drag: None,
            hover: false,
        }
    }

    pub fn selected(&self) -> Option<(usize, usize)> {
        self.selected
    }

    pub fn min_width(&self) -> f32 {
        self.cols as f32 * MATRIX_CELL + (self.cols - 1) as f32 * MATRIX_GAP
    }

    pub fn height(&self) -> f32 {
        self.rows as f32 * MATRIX_CELL + (self.rows - 1) as f32 * MATRIX_GAP
    }

    fn cell_rect(&self, origin: Rect, row: usize, col: usize) -> Rect {
        Rect::new(
            origin.x + col as f32 * (MATRIX_CELL + MATRIX_GAP),
            origin.y + row as f32 * (MATRIX_CELL + MATRIX_GAP),
            MATRIX_CELL,
            MATRIX_CELL,
        )
    }

    fn cell_at(&self, origin: Rect, x: f32, y: f32) -> Option<(usize, usize)> {
        for row in 0..self.rows {
            for col in 0..self.cols {
                if self.cell_rect(origin, row, col).contains(x, y) {
                    return Some((row, col));
                }
            }
        }
        None
    }

    fn value_at(&self, row: usize, col: usize) -> f32 {
        let raw = self
            .get
            .as_ref()
            .map(|get| get(row, col))
            .unwrap_or(self.min);
        clamp(raw, self.min, self.max)
    }

    pub fn draw(&self, surface: &mut dyn Surface, rect: Rect, theme: &Theme) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell = self.cell_rect(rect, row, col);
                surface.fill_rect(cell, theme.matrix_cell_bg);
                surface.text(
                    &format_value(self.value_at(row, col)),
                    cell.x + cell.width / 2.0,
                    cell.y + cell.height / 2.0 - 5.0,
                    &theme.small_font,
                    theme.matrix_cell_fg,
                    TextAlign::Center,
                );
                if self.selected == Some((row, col)) {
                    surface.stroke_rect(cell, theme.matrix_selection);
                } else {
                    surface.stroke_rect(cell, theme.panel_border);
                }
            }
        }
    }

    pub fn update(&mut self, rect: Rect, pointer: Pointer) {
        self.hover = pointer.on_surface() && rect.contains(pointer.x, pointer.y);

        if pointer.just_pressed
            && let Some((row, col)) = self.cell_at(rect, pointer.x, pointer.y)
        {
            self.selected = Some((row, col));
            self.drag = Some(CellDrag {
                row,
                col,
                start_y: pointer.y,
                start_value: self.value_at(row, col),
            });
            return;
        }

        let Some(drag) = self.drag else {
            return;
        };
        if !pointer.pressed || !pointer.on_surface() {
            self.drag = None;
            return;
        }
        // Upward motion increases the value.
        let delta = (drag.start_y - pointer.y) / DRAG_FULL_RANGE * (self.max - self.min);
        let next = clamp(drag.start_value + delta, self.min, self.max);
        match self.set.as_mut() {
            Some(set) => {
                if let Err(err) = set(drag.row, drag.col, next) {
                    tracing::warn!(row = drag.row, col = drag.col, %err, "matrix setter failed");
                    self.drag = None;
                }
            }
            None => {
                tracing::warn!("matrix has no bound setter");
                self.drag = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn bound_matrix(cells: &Rc<RefCell<Vec<Vec<f32>>>>) -> Matrix {
        let get_cells = cells.clone();
        let set_cells = cells.clone();
        Matrix::new(
            2,
            2,
            Some(Box::new(move |r, c| get_cells.borrow()[r][c])),
            Some(Box::new(move |r, c, v| {
                set_cells.borrow_mut()[r][c] = v;
                Ok(())
            })),
            -1.0,
            1.0,
        )
    }

    #[test]
    fn press_selects_the_hit_cell() {
        let cells = Rc::new(RefCell::new(vec![vec![0.0; 2]; 2]));
        let mut matrix = bound_matrix(&cells);
        let origin = Rect::new(0.0, 0.0, matrix.min_width(), matrix.height());
        // second column, second row
        let x = MATRIX_CELL + MATRIX_GAP + 5.0;
        let y = MATRIX_CELL + MATRIX_GAP + 5.0;
        matrix.update(origin, Pointer::new(x, y, true, true));
        assert_eq!(matrix.selected(), Some((1, 1)));
    }

    #[test]
    fn vertical_drag_edits_the_selected_cell() {
        let cells = Rc::new(RefCell::new(vec![vec![0.0; 2]; 2]));
        let mut matrix = bound_matrix(&cells);
        let origin = Rect::new(0.0, 0.0, matrix.min_width(), matrix.height());
        matrix.update(origin, Pointer::new(5.0, 20.0, true, true));
        // drag up 50 units: half the DRAG_FULL_RANGE over a range of 2.0
        matrix.update(origin, Pointer::new(5.0, -30.0, true, false));
        let value = cells.borrow()[0][0];
        assert!((value - 1.0).abs() < 1e-4);
        // release ends the edit
        matrix.update(origin, Pointer::new(5.0, -30.0, false, false));
        matrix.update(origin, Pointer::new(5.0, 100.0, false, false));
        assert!((cells.borrow()[0][0] - value).abs() < 1e-4);
    }

    #[test]
    fn drag_clamps_to_range() {
        let cells = Rc::new(RefCell::new(vec![vec![0.0; 2]; 2]));
        let mut matrix = bound_matrix(&cells);
        let origin = Rect::new(0.0, 0.0, 100.0, 100.0);
        matrix.update(origin, Pointer::new(5.0, 20.0, true, true));
        matrix.update(origin, Pointer::new(5.0, -2000.0, true, false));
        assert_eq!(cells.borrow()[0][0], 1.0);
    }

    #[test]
    fn unbound_matrix_selects_but_does_not_edit() {
        let mut matrix = Matrix::new(2, 2, None, None, 0.0, 1.0);
        let origin = Rect::new(0.0, 0.0, 100.0, 100.0);
        matrix.update(origin, Pointer::new(5.0, 5.0, true, true));
        assert_eq!(matrix.selected(), Some((0, 0)));
        matrix.update(origin, Pointer::new(5.0, -50.0, true, false));
    }
}
