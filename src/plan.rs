//! Saving and loading plans as JSON.
//!
//! A plan records the grid shape and the per-cell properties that matter to
//! a layout: sprite id, rotation, draw toggles, edge flags, border colors.
//! Highlight state and dirty flags are transient and not persisted.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cell::{CellError, Edge, PlannerCell};
use crate::grid::{GridError, PlannerGrid};
use crate::sprite::RotateFlip;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("plan I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("plan format error: {0}")]
    Format(#[from] serde_json::Error),
    #[error("plan lists {actual} cells but declares a {width}x{height} grid")]
    CellCountMismatch {
        width: u16,
        height: u16,
        actual: usize,
    },
    #[error("plan cell is invalid: {0}")]
    Cell(#[from] CellError),
    #[error("plan grid is invalid: {0}")]
    Grid(#[from] GridError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanFile {
    pub width: u16,
    pub height: u16,
    pub cell_size: u32,
    /// Cells in row-major order, `width * height` of them.
    pub cells: Vec<PlanCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanCell {
    pub sprite: Option<String>,
    pub rotation: RotateFlip,
    pub draws: bool,
    pub draws_image: bool,
    pub force_scaling: bool,
    /// Top, right, bottom, left.
    pub edges: [bool; 4],
    pub default_border_color: [u8; 4],
    pub hovered_border_color: [u8; 4],
    pub selected_border_color: [u8; 4],
}

impl PlanCell {
    fn from_cell(cell: &PlannerCell) -> Self {
        Self {
            sprite: cell.sprite_id().map(str::to_owned),
            rotation: cell.rotation(),
            draws: cell.draws(),
            draws_image: cell.draws_image(),
            force_scaling: cell.force_scaling(),
            edges: [
                cell.draws_top(),
                cell.draws_right(),
                cell.draws_bottom(),
                cell.draws_left(),
            ],
            default_border_color: cell.default_border_color(),
            hovered_border_color: cell.hovered_border_color(),
            selected_border_color: cell.selected_border_color(),
        }
    }

    fn apply_to(&self, cell: &mut PlannerCell) {
        cell.set_sprite(self.sprite.as_deref());
        cell.set_rotation(self.rotation);
        cell.set_draws(self.draws);
        cell.set_draws_image(self.draws_image);
        cell.set_force_scaling(self.force_scaling);
        cell.set_draws_edge(Edge::Top, self.edges[0]);
        cell.set_draws_edge(Edge::Right, self.edges[1]);
        cell.set_draws_edge(Edge::Bottom, self.edges[2]);
        cell.set_draws_edge(Edge::Left, self.edges[3]);
        cell.set_default_border_color(self.default_border_color);
        cell.set_hovered_border_color(self.hovered_border_color);
        cell.set_selected_border_color(self.selected_border_color);
        cell.invalidate();
    }
}

impl PlanFile {
    pub fn from_grid(grid: &PlannerGrid) -> Self {
        let cell_size = grid
            .get_cell_at(0, 0)
            .map_or(crate::config::DEFAULT_CELL_SIZE, |cell| cell.cell_size());

        let mut cells = Vec::with_capacity(grid.width() as usize * grid.height() as usize);
        for row in grid.rows() {
            for cell in row {
                cells.push(PlanCell::from_cell(cell));
            }
        }

        Self {
            width: grid.width(),
            height: grid.height(),
            cell_size,
            cells,
        }
    }

    /// Rebuilds a grid from the plan. Sprites are re-materialized from the
    /// built-in registry by id.
    pub fn into_grid(self) -> Result<PlannerGrid, PlanError> {
        let expected = self.width as usize * self.height as usize;
        if self.cells.len() != expected {
            return Err(PlanError::CellCountMismatch {
                width: self.width,
                height: self.height,
                actual: self.cells.len(),
            });
        }
        if self.cell_size == 0 {
            return Err(PlanError::Cell(CellError::ZeroSize));
        }

        let mut grid = PlannerGrid::new(self.width, self.height);
        for (i, plan_cell) in self.cells.iter().enumerate() {
            let x = (i % self.width as usize) as u16;
            let y = (i / self.width as usize) as u16;
            let cell = grid.get_cell_at_mut(x, y)?;
            cell.set_cell_size(self.cell_size)?;
            plan_cell.apply_to(cell);
        }
        Ok(grid)
    }
}

pub fn save_plan<P: AsRef<Path>>(path: P, grid: &PlannerGrid) -> Result<(), PlanError> {
    let plan = PlanFile::from_grid(grid);
    let json = serde_json::to_string_pretty(&plan)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<PlannerGrid, PlanError> {
    let json = fs::read_to_string(path)?;
    let plan: PlanFile = serde_json::from_str(&json)?;
    plan.into_grid()
}
