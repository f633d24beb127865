use eframe::egui::{Pos2, Response};
use kurbo::{Point, Vec2};

use crate::scene::{HandleRole, Scene};

/// What the pointer is doing to the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        role: HandleRole,
        // pointer position minus handle center at press time
        offset: Vec2,
    },
}

/// Turns pointer events into handle moves.
#[derive(Debug, Default)]
pub struct InputController {
    state: DragState,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state(), DragState::Dragging { .. })
    }

    /// Start dragging the first handle under `pos`, if any. A press that
    /// lands while already dragging is evaluated the same way and may pick
    /// another handle.
    pub fn on_pointer_down(&mut self, scene: &Scene, pos: Point) {
        self.state = match scene.hit_test(pos) {
            Some((role, offset)) => {
                log::debug!("drag start on {role:?}, offset ({}, {})", offset.x, offset.y);
                DragState::Dragging { role, offset }
            }
            None => {
                log::trace!("pointer down at ({}, {}) hit nothing", pos.x, pos.y);
                DragState::Idle
            }
        };
    }

    /// Move the dragged handle so it keeps its grab offset under the
    /// pointer. Returns whether the scene changed and needs a redraw.
    pub fn on_pointer_move(&mut self, scene: &mut Scene, pos: Point) -> bool {
        let DragState::Dragging { role, offset } = self.state else {
            return false;
        };

        scene.handle_mut(role).move_to(pos - offset);
        true
    }

    pub fn on_pointer_up(&mut self) {
        if let DragState::Dragging { role, .. } = self.state {
            log::debug!("drag end on {role:?}");
        }
        self.state = DragState::Idle;
    }

    /// Feed one frame of egui drag input for the canvas into the state
    /// machine. Positions are made relative to the canvas rect first.
    /// Returns whether a handle moved.
    pub fn handle_response(&mut self, scene: &mut Scene, response: &Response) -> bool {
        let to_local = |pos: Pos2| canvas_local(pos, response.rect.min);

        if response.drag_started() {
            // the press position, not where the pointer is once egui decided it's a drag
            let press = response
                .ctx
                .input(|i| i.pointer.press_origin())
                .or(response.interact_pointer_pos());
            if let Some(pos) = press {
                self.on_pointer_down(scene, to_local(pos));
            }
        }

        let mut moved = false;
        if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                moved = self.on_pointer_move(scene, to_local(pos));
            }
        }

        if response.drag_stopped() {
            self.on_pointer_up();
        }

        moved
    }
}

/// Screen position to canvas-local coordinates. Each f32 is widened through
/// its shortest decimal form, so 120.6 stays 120.6 rather than picking up
/// the f32 rounding error.
pub fn canvas_local(pos: Pos2, origin: Pos2) -> Point {
    let local = pos - origin;
    Point::new(widen(local.x), widen(local.y))
}

fn widen(v: f32) -> f64 {
    v.to_string().parse().unwrap_or(f64::from(v))
}
