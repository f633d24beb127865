use kurbo::{Point, Vec2};

use crate::handle::Handle;
use crate::settings::EditorSettings;

pub const HANDLE_COUNT: usize = 6;

/// What each of the six handles stands for. The discriminant is the
/// handle's index in the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandleRole {
    StartAnchor,
    StartTangent,
    Control1,
    Control2,
    EndTangent,
    EndAnchor,
}

impl HandleRole {
    /// every role, in index (and hit-test) order
    pub const ALL: [HandleRole; HANDLE_COUNT] = [
        HandleRole::StartAnchor,
        HandleRole::StartTangent,
        HandleRole::Control1,
        HandleRole::Control2,
        HandleRole::EndTangent,
        HandleRole::EndAnchor,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// The six handles that make up the curve. Handles are only ever moved,
/// never added or removed.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    handles: [Handle; HANDLE_COUNT],
}

impl Scene {
    pub fn new(handles: [Handle; HANDLE_COUNT]) -> Self {
        Scene { handles }
    }

    pub fn from_settings(settings: &EditorSettings) -> Self {
        let handles = settings
            .handle_layout
            .map(|(center, color)| Handle::new(center, settings.handle_size).with_color(color));
        Scene::new(handles)
    }

    pub fn handle(&self, role: HandleRole) -> &Handle {
        &self.handles[role.index()]
    }

    pub fn handle_mut(&mut self, role: HandleRole) -> &mut Handle {
        &mut self.handles[role.index()]
    }

    pub fn handles(&self) -> &[Handle; HANDLE_COUNT] {
        &self.handles
    }

    /// Finds the handle under `p`. Handles are tested in index order and
    /// the first hit wins, so overlapping boxes resolve to the lower index.
    pub fn hit_test(&self, p: Point) -> Option<(HandleRole, Vec2)> {
        HandleRole::ALL
            .into_iter()
            .find_map(|role| self.handle(role).hit_test(p).map(|offset| (role, offset)))
    }
}

impl Default for Scene {
    fn default() -> Self {
        Scene::from_settings(&EditorSettings::default())
    }
}
