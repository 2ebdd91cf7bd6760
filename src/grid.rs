//! The planner grid: a resizable 2D collection of cells with bounds-checked
//! lookup and a single active-cell pointer.

use thiserror::Error;

use crate::cell::PlannerCell;
use crate::config;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("column {x} is out of range for a grid {width} cells wide")]
    ColumnOutOfRange { x: u16, width: u16 },
    #[error("row {y} is out of range for a grid {height} cells tall")]
    RowOutOfRange { y: u16, height: u16 },
}

#[derive(Debug, Clone)]
pub struct PlannerGrid {
    // Rows of cells, indexed [y][x].
    cells: Vec<Vec<PlannerCell>>,
    active_cell: (u16, u16),
}

impl Default for PlannerGrid {
    fn default() -> Self {
        Self::new(config::DEFAULT_GRID_WIDTH, config::DEFAULT_GRID_HEIGHT)
    }
}

impl PlannerGrid {
    pub fn new(width: u16, height: u16) -> Self {
        let mut grid = Self {
            cells: Vec::new(),
            active_cell: (0, 0),
        };
        grid.reformat(width, height, false);
        grid
    }

    /// Grid width in cells, read from the live buffer.
    pub fn width(&self) -> u16 {
        self.cells.first().map_or(0, |row| row.len() as u16)
    }

    /// Grid height in cells, read from the live buffer.
    pub fn height(&self) -> u16 {
        self.cells.len() as u16
    }

    pub fn set_width(&mut self, width: u16) {
        self.reformat(width, self.height(), false);
    }

    pub fn set_height(&mut self, height: u16) {
        self.reformat(self.width(), height, false);
    }

    /// Reshapes the grid to `new_width` x `new_height`.
    ///
    /// Unchanged dimensions are a no-op. Growing keeps existing cells at
    /// their coordinates and fills new coordinates with default cells.
    /// Shrinking in either axis resets every cell of the new grid to a fresh
    /// default: the planner treats any shrink as a plan reset.
    ///
    /// With `force_redraw`, every cell of the resulting grid is left dirty.
    pub fn reformat(&mut self, new_width: u16, new_height: u16, force_redraw: bool) {
        let old_width = self.width();
        let old_height = self.height();

        if new_width == old_width && new_height == old_height {
            if force_redraw {
                self.invalidate_all();
            }
            return;
        }

        log::info!(
            "reformatting grid from {}x{} to {}x{}",
            old_width,
            old_height,
            new_width,
            new_height
        );

        let recreate = old_width > new_width || old_height > new_height;
        let mut old_rows = std::mem::take(&mut self.cells);

        let mut cells = Vec::with_capacity(new_height as usize);
        for y in 0..new_height as usize {
            let mut kept = if !recreate && y < old_rows.len() {
                std::mem::take(&mut old_rows[y])
            } else {
                Vec::new()
            };
            let mut drain = kept.drain(..);

            let mut row = Vec::with_capacity(new_width as usize);
            for _ in 0..new_width {
                row.push(drain.next().unwrap_or_default());
            }
            drop(drain);
            cells.push(row);
        }
        self.cells = cells;

        if force_redraw {
            self.invalidate_all();
        }
    }

    /// Bounds-checked lookup.
    pub fn get_cell_at(&self, x: u16, y: u16) -> Result<&PlannerCell, GridError> {
        self.check_bounds(x, y)?;
        Ok(&self.cells[y as usize][x as usize])
    }

    pub fn get_cell_at_mut(&mut self, x: u16, y: u16) -> Result<&mut PlannerCell, GridError> {
        self.check_bounds(x, y)?;
        Ok(&mut self.cells[y as usize][x as usize])
    }

    fn check_bounds(&self, x: u16, y: u16) -> Result<(), GridError> {
        if x >= self.width() {
            return Err(GridError::ColumnOutOfRange {
                x,
                width: self.width(),
            });
        }
        if y >= self.height() {
            return Err(GridError::RowOutOfRange {
                y,
                height: self.height(),
            });
        }
        Ok(())
    }

    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width() && y < self.height()
    }

    /// Coordinates of the active cell. Only meaningful while they are within
    /// the current bounds; `active_cell()` re-validates on access.
    pub fn active_cell_coordinates(&self) -> (u16, u16) {
        self.active_cell
    }

    /// Moves the active-cell pointer. Out-of-range coordinates are ignored.
    pub fn set_active_cell(&mut self, x: u16, y: u16) {
        if self.in_bounds(x, y) {
            self.active_cell = (x, y);
        } else {
            log::debug!("ignoring out-of-range active cell ({}, {})", x, y);
        }
    }

    pub fn active_cell(&self) -> Option<&PlannerCell> {
        let (x, y) = self.active_cell;
        self.get_cell_at(x, y).ok()
    }

    pub fn active_cell_mut(&mut self) -> Option<&mut PlannerCell> {
        let (x, y) = self.active_cell;
        self.get_cell_at_mut(x, y).ok()
    }

    /// Moves the hover highlight to (x, y), clearing it from every other
    /// cell. Cells whose highlight changes are marked dirty.
    pub fn hover_cell(&mut self, x: u16, y: u16) {
        if !self.in_bounds(x, y) {
            return;
        }
        for (cy, row) in self.cells.iter_mut().enumerate() {
            for (cx, cell) in row.iter_mut().enumerate() {
                let target = cx as u16 == x && cy as u16 == y;
                if target && !cell.is_hovered_over() {
                    cell.set_hovered_over(true);
                    cell.invalidate();
                } else if !target && cell.is_hovered_over() {
                    cell.set_hovered_over(false);
                    cell.invalidate();
                }
            }
        }
    }

    /// Clears the hover highlight wherever it is (cursor left the grid).
    pub fn clear_hover(&mut self) {
        for row in &mut self.cells {
            for cell in row {
                if cell.is_hovered_over() {
                    cell.set_hovered_over(false);
                    cell.invalidate();
                }
            }
        }
    }

    /// Selects the cell at (x, y), deselecting any other, and points the
    /// active cell at it. Out-of-range coordinates are ignored.
    pub fn select_cell(&mut self, x: u16, y: u16) {
        if !self.in_bounds(x, y) {
            return;
        }
        for (cy, row) in self.cells.iter_mut().enumerate() {
            for (cx, cell) in row.iter_mut().enumerate() {
                let target = cx as u16 == x && cy as u16 == y;
                if target && !cell.is_selected() {
                    cell.set_selected(true);
                    cell.invalidate();
                } else if !target && cell.is_selected() {
                    cell.set_selected(false);
                    cell.invalidate();
                }
            }
        }
        self.active_cell = (x, y);
    }

    /// Marks every cell dirty.
    pub fn invalidate_all(&mut self) {
        for row in &mut self.cells {
            for cell in row {
                cell.invalidate();
            }
        }
    }

    /// Read access to the rows, indexed [y][x].
    pub fn rows(&self) -> &[Vec<PlannerCell>] {
        &self.cells
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Vec<PlannerCell>] {
        &mut self.cells
    }
}
