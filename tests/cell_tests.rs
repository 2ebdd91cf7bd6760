use colony_planner::{CellError, Highlight, PlannerCell, RotateFlip};
use colony_planner::{config, sprite};

use image::{Rgba, RgbaImage};

fn two_by_one(a: [u8; 4], b: [u8; 4]) -> RgbaImage {
    let mut img = RgbaImage::new(2, 1);
    img.put_pixel(0, 0, Rgba(a));
    img.put_pixel(1, 0, Rgba(b));
    img
}

const A: [u8; 4] = [10, 20, 30, 255];
const B: [u8; 4] = [40, 50, 60, 255];

#[test]
fn construction_validates_cell_size() {
    assert_eq!(PlannerCell::new(0).unwrap_err(), CellError::ZeroSize);
    assert_eq!(
        PlannerCell::with_image(0, two_by_one(A, B), RotateFlip::None).unwrap_err(),
        CellError::ZeroSize
    );
    assert_eq!(
        PlannerCell::builder(0).build().unwrap_err(),
        CellError::ZeroSize
    );

    for size in [1, 2, 103, 4096] {
        let cell = PlannerCell::new(size).unwrap();
        assert_eq!(cell.cell_size(), size);
        assert_eq!(cell.width(), size);
        assert_eq!(cell.height(), size);
    }
}

#[test]
fn default_cell_matches_environment_defaults() {
    let cell = PlannerCell::default();
    assert_eq!(cell.cell_size(), config::DEFAULT_CELL_SIZE);
    assert!(cell.draws());
    assert!(cell.draws_image());
    assert!(cell.needs_redraw());
    assert!(cell.force_scaling());
    assert_eq!(cell.highlight(), Highlight::None);
    assert_eq!(cell.default_border_color(), config::DEFAULT_BORDER_COLOR);
    assert_eq!(cell.hovered_border_color(), config::HOVERED_BORDER_COLOR);
    assert_eq!(cell.selected_border_color(), config::SELECTED_BORDER_COLOR);
    assert!(cell.draws_top() && cell.draws_right() && cell.draws_bottom() && cell.draws_left());
    assert!(cell.original_image().is_none());
    assert!(cell.rotated_image().is_none());
}

#[test]
fn set_cell_size_validates_and_does_not_dirty() {
    let mut cell = PlannerCell::new(10).unwrap();
    cell.set_needs_redraw(false);

    assert_eq!(cell.set_cell_size(0).unwrap_err(), CellError::ZeroSize);
    assert_eq!(cell.cell_size(), 10);

    cell.set_cell_size(50).unwrap();
    assert_eq!(cell.cell_size(), 50);
    assert!(!cell.needs_redraw());
}

#[test]
fn handle_resize_keeps_the_cell_square() {
    let mut cell = PlannerCell::new(10).unwrap();
    cell.handle_resize(30, 20);
    assert_eq!(cell.cell_size(), 20);
    cell.handle_resize(5, 40);
    assert_eq!(cell.cell_size(), 5);
    // degenerate footprints are ignored
    cell.handle_resize(0, 40);
    assert_eq!(cell.cell_size(), 5);
}

#[test]
fn hover_then_select_leaves_only_selected() {
    let mut cell = PlannerCell::default();
    cell.set_hovered_over(true);
    cell.set_selected(true);
    assert!(cell.is_selected());
    assert!(!cell.is_hovered_over());
}

#[test]
fn select_then_hover_leaves_only_hovered() {
    let mut cell = PlannerCell::default();
    cell.set_selected(true);
    cell.set_hovered_over(true);
    assert!(cell.is_hovered_over());
    assert!(!cell.is_selected());
}

#[test]
fn clearing_one_flag_leaves_the_other_alone() {
    let mut cell = PlannerCell::default();
    cell.set_selected(true);
    cell.set_hovered_over(false);
    assert!(cell.is_selected());

    cell.set_hovered_over(true);
    cell.set_selected(false);
    assert!(cell.is_hovered_over());
}

#[test]
fn highlight_none_is_reachable_directly() {
    let mut cell = PlannerCell::default();
    cell.set_selected(true);
    cell.set_highlight(Highlight::None);
    assert!(!cell.is_selected());
    assert!(!cell.is_hovered_over());
}

#[test]
fn border_color_priority_is_selected_then_hovered_then_default() {
    let mut cell = PlannerCell::default();
    assert_eq!(cell.border_color_for_state(), config::DEFAULT_BORDER_COLOR);
    cell.set_hovered_over(true);
    assert_eq!(cell.border_color_for_state(), config::HOVERED_BORDER_COLOR);
    cell.set_selected(true);
    assert_eq!(cell.border_color_for_state(), config::SELECTED_BORDER_COLOR);
}

#[test]
fn rotation_change_invalidates_the_cached_image() {
    let mut cell = PlannerCell::with_image(10, two_by_one(A, B), RotateFlip::None).unwrap();
    assert!(cell.rotated_image().is_none());

    cell.materialized_image().unwrap();
    assert!(cell.rotated_image().is_some());

    cell.set_rotation(RotateFlip::Rotate90);
    assert!(cell.rotated_image().is_none());

    let rotated = cell.materialized_image().unwrap();
    assert_eq!((rotated.width(), rotated.height()), (1, 2));
    assert_eq!(rotated.get_pixel(0, 0).0, A);
    assert_eq!(rotated.get_pixel(0, 1).0, B);
}

#[test]
fn replacing_the_source_image_invalidates_the_cache() {
    let mut cell = PlannerCell::with_image(10, two_by_one(A, B), RotateFlip::FlipX).unwrap();
    cell.materialized_image().unwrap();
    assert!(cell.rotated_image().is_some());

    cell.set_original_image(Some(two_by_one(B, A)));
    assert!(cell.rotated_image().is_none());

    let flipped = cell.materialized_image().unwrap();
    assert_eq!(flipped.get_pixel(0, 0).0, A);
    assert_eq!(flipped.get_pixel(1, 0).0, B);
}

#[test]
fn materialized_image_is_none_without_a_source() {
    let mut cell = PlannerCell::new(10).unwrap();
    assert!(cell.materialized_image().is_none());
}

#[test]
fn rotate_flip_transforms() {
    let img = two_by_one(A, B);

    let same = RotateFlip::None.apply(&img);
    assert_eq!(same, img);

    let flipped = RotateFlip::FlipX.apply(&img);
    assert_eq!(flipped.get_pixel(0, 0).0, B);
    assert_eq!(flipped.get_pixel(1, 0).0, A);

    let half_turn = RotateFlip::Rotate180.apply(&img);
    assert_eq!(half_turn.get_pixel(0, 0).0, B);
    assert_eq!(half_turn.get_pixel(1, 0).0, A);

    let quarter = RotateFlip::Rotate270.apply(&img);
    assert_eq!((quarter.width(), quarter.height()), (1, 2));
    assert_eq!(quarter.get_pixel(0, 0).0, B);
    assert_eq!(quarter.get_pixel(0, 1).0, A);
}

#[test]
fn rotate_flip_cycle_visits_all_eight_states() {
    let mut seen = vec![RotateFlip::None];
    let mut current = RotateFlip::None;
    for _ in 0..7 {
        current = current.next();
        assert!(!seen.contains(&current));
        seen.push(current);
    }
    assert_eq!(current.next(), RotateFlip::None);
}

#[test]
fn sprites_cycle_and_round_trip_by_id() {
    assert_eq!(sprite::next_sprite_id(None), "tile");
    assert_eq!(sprite::next_sprite_id(Some("tile")), "ladder");
    assert_eq!(sprite::next_sprite_id(Some("door")), "tile");

    let mut cell = PlannerCell::default();
    cell.set_sprite(Some("ladder"));
    assert_eq!(cell.sprite_id(), Some("ladder"));
    assert!(cell.original_image().is_some());

    cell.set_sprite(Some("no-such-sprite"));
    assert!(cell.sprite_id().is_none());
    assert!(cell.original_image().is_none());
}

#[test]
fn builder_covers_the_full_property_ladder() {
    let cell = PlannerCell::builder(50)
        .image(two_by_one(A, B), RotateFlip::Rotate180)
        .draw_toggles(false, true, false, false)
        .highlight(Highlight::Selected)
        .border_colors([1, 1, 1, 255], [2, 2, 2, 255], [3, 3, 3, 255])
        .edges(true, false, true, false)
        .build()
        .unwrap();

    assert_eq!(cell.cell_size(), 50);
    assert_eq!(cell.rotation(), RotateFlip::Rotate180);
    assert!(!cell.draws());
    assert!(cell.draws_image());
    assert!(!cell.needs_redraw());
    assert!(!cell.force_scaling());
    assert!(cell.is_selected());
    assert_eq!(cell.default_border_color(), [1, 1, 1, 255]);
    assert_eq!(cell.hovered_border_color(), [2, 2, 2, 255]);
    assert_eq!(cell.selected_border_color(), [3, 3, 3, 255]);
    assert!(cell.draws_top());
    assert!(!cell.draws_right());
    assert!(cell.draws_bottom());
    assert!(!cell.draws_left());
}
