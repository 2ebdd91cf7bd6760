use colony_planner::plan::{self, PlanFile};
use colony_planner::{Edge, PlanError, PlannerGrid, RotateFlip};

use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(name);
    let _ = std::fs::remove_file(&path);
    path
}

fn sample_grid() -> PlannerGrid {
    let mut grid = PlannerGrid::new(3, 2);

    let cell = grid.get_cell_at_mut(0, 0).unwrap();
    cell.set_sprite(Some("ladder"));
    cell.set_rotation(RotateFlip::Rotate90);
    cell.set_draws_edge(Edge::Right, false);

    let cell = grid.get_cell_at_mut(2, 1).unwrap();
    cell.set_sprite(Some("wire"));
    cell.set_force_scaling(false);
    cell.set_draws_image(false);
    cell.set_default_border_color([9, 9, 9, 255]);

    let cell = grid.get_cell_at_mut(1, 0).unwrap();
    cell.set_draws(false);

    grid
}

#[test]
fn plan_round_trips_through_disk() {
    let path = temp_path("colony_planner_round_trip.json");
    let grid = sample_grid();

    plan::save_plan(&path, &grid).unwrap();
    let loaded = plan::load_plan(&path).unwrap();

    assert_eq!(PlanFile::from_grid(&loaded), PlanFile::from_grid(&grid));

    // sprites were re-materialized from the registry
    let cell = loaded.get_cell_at(0, 0).unwrap();
    assert_eq!(cell.sprite_id(), Some("ladder"));
    assert!(cell.original_image().is_some());
    assert_eq!(cell.rotation(), RotateFlip::Rotate90);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn loaded_cells_start_dirty() {
    let path = temp_path("colony_planner_dirty.json");
    plan::save_plan(&path, &sample_grid()).unwrap();

    let loaded = plan::load_plan(&path).unwrap();
    for y in 0..loaded.height() {
        for x in 0..loaded.width() {
            assert!(loaded.get_cell_at(x, y).unwrap().needs_redraw());
        }
    }

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn cell_count_mismatch_is_rejected() {
    let grid = sample_grid();
    let mut plan = PlanFile::from_grid(&grid);
    plan.cells.pop();

    match plan.into_grid() {
        Err(PlanError::CellCountMismatch { width, height, actual }) => {
            assert_eq!((width, height, actual), (3, 2, 5));
        }
        Err(other) => panic!("expected a cell count mismatch, got {other:?}"),
        Ok(_) => panic!("expected a cell count mismatch, got a grid"),
    }
}

#[test]
fn zero_cell_size_is_rejected() {
    let mut plan = PlanFile::from_grid(&sample_grid());
    plan.cell_size = 0;
    assert!(matches!(plan.into_grid(), Err(PlanError::Cell(_))));
}

#[test]
fn missing_plan_file_surfaces_an_io_error() {
    let path = temp_path("colony_planner_missing.json");
    assert!(matches!(plan::load_plan(&path), Err(PlanError::Io(_))));
}

#[test]
fn unknown_sprite_ids_load_as_empty_cells() {
    let mut plan = PlanFile::from_grid(&sample_grid());
    plan.cells[0].sprite = Some("retired-sprite".to_string());

    let grid = plan.into_grid().unwrap();
    let cell = grid.get_cell_at(0, 0).unwrap();
    assert!(cell.sprite_id().is_none());
    assert!(cell.original_image().is_none());
}
