use winit::{
    event::{ElementState, Event, MouseButton, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use colony_planner::config::{self, GRID_PADDING};
use colony_planner::graphics::GraphicsRenderer;
use colony_planner::input::{InputHandler, PlannerAction};
use colony_planner::{plan, sprite, PlannerCell, PlannerGrid};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut grid = PlannerGrid::default();

    // Size the window so every cell gets its default footprint.
    let width = grid.width() as u32 * config::DEFAULT_CELL_SIZE + GRID_PADDING * 2;
    let height = grid.height() as u32 * config::DEFAULT_CELL_SIZE + GRID_PADDING * 2;

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(config::WINDOW_TITLE)
        .with_inner_size(winit::dpi::LogicalSize::new(width, height))
        .with_resizable(true)
        .build(&event_loop)?;

    let mut graphics = GraphicsRenderer::new(&window, width, height)?;
    let mut input_handler = InputHandler::new();

    let mut cursor_position = (0.0f64, 0.0f64);
    let mut redraw_requested = true;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::WindowEvent { event, .. } => {
                match event {
                    WindowEvent::CloseRequested => {
                        *control_flow = ControlFlow::Exit;
                    }
                    WindowEvent::Resized(size) => {
                        graphics.resize(size.width, size.height);
                        redraw_requested = true;
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        cursor_position = (position.x, position.y);
                        match graphics.cell_at_position(&grid, position.x, position.y) {
                            Some((x, y)) => grid.hover_cell(x, y),
                            None => grid.clear_hover(),
                        }
                        redraw_requested = true;
                    }
                    WindowEvent::CursorLeft { .. } => {
                        grid.clear_hover();
                        redraw_requested = true;
                    }
                    WindowEvent::MouseInput { state, button, .. } => {
                        if state == ElementState::Pressed && button == MouseButton::Left {
                            if let Some((x, y)) = graphics.cell_at_position(
                                &grid,
                                cursor_position.0,
                                cursor_position.1,
                            ) {
                                grid.select_cell(x, y);
                                redraw_requested = true;
                            }
                        }
                    }
                    WindowEvent::KeyboardInput { input, .. } => {
                        let action = input_handler.handle_keyboard_input(&input);
                        if apply_action(action, &mut grid, &mut graphics) {
                            redraw_requested = true;
                        }
                    }
                    _ => {}
                }
            }
            Event::MainEventsCleared => {
                if redraw_requested {
                    graphics.render(&mut grid);

                    if let Err(err) = graphics.present() {
                        log::error!("Render error: {}", err);
                        *control_flow = ControlFlow::Exit;
                    }
                    redraw_requested = false;
                }
            }
            _ => {}
        }
    });
}

/// Applies a keyboard action to the plan. Returns whether anything changed
/// that warrants a repaint.
fn apply_action(
    action: PlannerAction,
    grid: &mut PlannerGrid,
    graphics: &mut GraphicsRenderer,
) -> bool {
    match action {
        PlannerAction::None => false,
        PlannerAction::MoveSelection(dx, dy) => {
            let (x, y) = grid.active_cell_coordinates();
            let max_x = (grid.width() as i32 - 1).max(0);
            let max_y = (grid.height() as i32 - 1).max(0);
            let new_x = (x as i32 + dx).clamp(0, max_x) as u16;
            let new_y = (y as i32 + dy).clamp(0, max_y) as u16;
            grid.select_cell(new_x, new_y);
            true
        }
        PlannerAction::ToggleEdge(edge) => edit_active(grid, |cell| cell.toggle_edge(edge)),
        PlannerAction::CycleRotation => edit_active(grid, |cell| {
            let next = cell.rotation().next();
            cell.set_rotation(next);
        }),
        PlannerAction::CycleSprite => edit_active(grid, |cell| {
            let next = sprite::next_sprite_id(cell.sprite_id());
            cell.set_sprite(Some(next));
        }),
        PlannerAction::ClearSprite => edit_active(grid, |cell| cell.set_sprite(None)),
        PlannerAction::ToggleDraws => edit_active(grid, |cell| {
            let draws = !cell.draws();
            cell.set_draws(draws);
        }),
        PlannerAction::ToggleDrawsImage => edit_active(grid, |cell| {
            let draws_image = !cell.draws_image();
            cell.set_draws_image(draws_image);
        }),
        PlannerAction::ToggleForceScaling => edit_active(grid, |cell| {
            let force_scaling = !cell.force_scaling();
            cell.set_force_scaling(force_scaling);
        }),
        PlannerAction::GrowWidth => {
            let (width, height) = (grid.width(), grid.height());
            resize_grid(grid, graphics, width + 1, height)
        }
        PlannerAction::ShrinkWidth => {
            let (width, height) = (grid.width(), grid.height());
            if width > 1 {
                resize_grid(grid, graphics, width - 1, height)
            } else {
                false
            }
        }
        PlannerAction::GrowHeight => {
            let (width, height) = (grid.width(), grid.height());
            resize_grid(grid, graphics, width, height + 1)
        }
        PlannerAction::ShrinkHeight => {
            let (width, height) = (grid.width(), grid.height());
            if height > 1 {
                resize_grid(grid, graphics, width, height - 1)
            } else {
                false
            }
        }
        PlannerAction::SavePlan => {
            match plan::save_plan(config::PLAN_PATH, grid) {
                Ok(()) => log::info!("saved plan to {}", config::PLAN_PATH),
                Err(err) => log::error!("failed to save plan: {}", err),
            }
            false
        }
        PlannerAction::LoadPlan => match plan::load_plan(config::PLAN_PATH) {
            Ok(loaded) => {
                *grid = loaded;
                graphics.mark_layout_dirty();
                true
            }
            Err(err) => {
                log::error!("failed to load plan: {}", err);
                false
            }
        },
    }
}

fn edit_active(grid: &mut PlannerGrid, edit: impl FnOnce(&mut PlannerCell)) -> bool {
    match grid.active_cell_mut() {
        Some(cell) => {
            edit(cell);
            cell.invalidate();
            true
        }
        None => false,
    }
}

fn resize_grid(
    grid: &mut PlannerGrid,
    graphics: &mut GraphicsRenderer,
    width: u16,
    height: u16,
) -> bool {
    grid.reformat(width, height, true);
    graphics.mark_layout_dirty();
    true
}
