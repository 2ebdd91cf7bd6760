//! Colony planner grid: a resizable grid of square cells, each drawing a
//! dashed border on any subset of its edges and an optional rotated sprite.
//! The binary hosts the grid in a `winit` window and renders it with
//! `pixels`; everything else lives here so it can be driven headless.

pub mod cell;
pub mod config;
pub mod graphics;
pub mod grid;
pub mod input;
pub mod plan;
pub mod sprite;

pub use cell::{CellBuilder, CellError, Edge, Highlight, PlannerCell};
pub use grid::{GridError, PlannerGrid};
pub use plan::{load_plan, save_plan, PlanCell, PlanError, PlanFile};
pub use sprite::RotateFlip;
