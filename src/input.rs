use std::collections::HashSet;

use winit::event::{ElementState, KeyboardInput, VirtualKeyCode};

use crate::cell::Edge;

/// Everything the keyboard can do to the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerAction {
    None,
    MoveSelection(i32, i32),
    ToggleEdge(Edge),
    CycleRotation,
    CycleSprite,
    ClearSprite,
    ToggleDraws,
    ToggleDrawsImage,
    ToggleForceScaling,
    GrowWidth,
    ShrinkWidth,
    GrowHeight,
    ShrinkHeight,
    SavePlan,
    LoadPlan,
}

pub struct InputHandler {
    pressed_keys: HashSet<VirtualKeyCode>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
        }
    }

    pub fn handle_keyboard_input(&mut self, input: &KeyboardInput) -> PlannerAction {
        if let Some(key_code) = input.virtual_keycode {
            match input.state {
                ElementState::Pressed => {
                    self.pressed_keys.insert(key_code);
                    self.handle_key_press(key_code)
                }
                ElementState::Released => {
                    self.pressed_keys.remove(&key_code);
                    PlannerAction::None
                }
            }
        } else {
            PlannerAction::None
        }
    }

    fn shift_pressed(&self) -> bool {
        self.pressed_keys.contains(&VirtualKeyCode::LShift)
            || self.pressed_keys.contains(&VirtualKeyCode::RShift)
    }

    fn handle_key_press(&mut self, key_code: VirtualKeyCode) -> PlannerAction {
        let shift = self.shift_pressed();

        match key_code {
            // Plain arrows move the selection; shifted arrows resize the grid.
            VirtualKeyCode::Up => {
                if shift {
                    PlannerAction::GrowHeight
                } else {
                    PlannerAction::MoveSelection(0, -1)
                }
            }
            VirtualKeyCode::Down => {
                if shift {
                    PlannerAction::ShrinkHeight
                } else {
                    PlannerAction::MoveSelection(0, 1)
                }
            }
            VirtualKeyCode::Left => {
                if shift {
                    PlannerAction::ShrinkWidth
                } else {
                    PlannerAction::MoveSelection(-1, 0)
                }
            }
            VirtualKeyCode::Right => {
                if shift {
                    PlannerAction::GrowWidth
                } else {
                    PlannerAction::MoveSelection(1, 0)
                }
            }
            VirtualKeyCode::Key1 => PlannerAction::ToggleEdge(Edge::Top),
            VirtualKeyCode::Key2 => PlannerAction::ToggleEdge(Edge::Right),
            VirtualKeyCode::Key3 => PlannerAction::ToggleEdge(Edge::Bottom),
            VirtualKeyCode::Key4 => PlannerAction::ToggleEdge(Edge::Left),
            VirtualKeyCode::R => PlannerAction::CycleRotation,
            VirtualKeyCode::P => PlannerAction::CycleSprite,
            VirtualKeyCode::X => PlannerAction::ClearSprite,
            VirtualKeyCode::B => PlannerAction::ToggleDraws,
            VirtualKeyCode::I => PlannerAction::ToggleDrawsImage,
            VirtualKeyCode::F => PlannerAction::ToggleForceScaling,
            VirtualKeyCode::S => PlannerAction::SavePlan,
            VirtualKeyCode::L => PlannerAction::LoadPlan,
            _ => PlannerAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
