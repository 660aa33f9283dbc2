//! Window ownership, z-order, and frame orchestration.
//!
//! The manager owns every [`Window`] and is the single enforcement point of
//! the pointer-ownership protocol: per frame, at most one window sees the
//! real pointer; every other window is handed a neutralized one. That rule
//! is what makes "exactly one window may be mutating drag state" hold
//! without any window knowing about its peers.

use std::collections::BTreeMap;
use std::fmt;

use crate::geometry::Rect;
use crate::input::Pointer;
use crate::render::{Surface, TextMeasurer};
use crate::theme::Theme;

use super::Window;

/// Opaque handle to a managed window. Ids are never reused within a
/// manager's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(u64);

impl WindowId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub struct WindowManager {
    windows: BTreeMap<WindowId, Window>,
    /// Bottom to top; the last entry draws last and is hit-tested first.
    z_order: Vec<WindowId>,
    /// Window owning the current press, from pointer-down to release.
    active: Option<WindowId>,
    viewport: Rect,
    next_id: u64,
}

impl WindowManager {
    pub fn new(viewport: Rect) -> Self {
        Self {
            windows: BTreeMap::new(),
            z_order: Vec::new(),
            active: None,
            viewport,
            next_id: 0,
        }
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Propagate a viewport change. Fullscreen windows track the new size;
    /// their restore snapshots are untouched.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
        for window in self.windows.values_mut() {
            if window.fullscreen() {
                window.apply_viewport(viewport);
            }
        }
    }

    pub fn insert(&mut self, window: Window) -> WindowId {
        let id = WindowId(self.next_id);
        self.next_id += 1;
        self.windows.insert(id, window);
        self.z_order.push(id);
        self.renumber_z();
        tracing::debug!(%id, "window registered");
        id
    }

    pub fn remove(&mut self, id: WindowId) -> Option<Window> {
        let mut window = self.windows.remove(&id)?;
        window.stop_drag();
        self.z_order.retain(|other| *other != id);
        if self.active == Some(id) {
            self.active = None;
        }
        self.renumber_z();
        tracing::debug!(%id, "window removed");
        Some(window)
    }

    pub fn get(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(&id)
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.z_order.iter().copied()
    }

    pub fn active(&self) -> Option<WindowId> {
        self.active
    }

    /// Whether some window currently holds a drag/resize/scroll session.
    pub fn drag_in_progress(&self) -> bool {
        self.active
            .and_then(|id| self.windows.get(&id))
            .is_some_and(|window| window.drag_kind().is_some())
    }

    pub fn bring_to_front(&mut self, id: WindowId) {
        if !self.windows.contains_key(&id) {
            return;
        }
        self.z_order.retain(|other| *other != id);
        self.z_order.push(id);
        self.renumber_z();
    }

    fn renumber_z(&mut self) {
        for (z, id) in self.z_order.iter().enumerate() {
            if let Some(window) = self.windows.get_mut(id) {
                window.z = z;
            }
        }
    }

    /// Topmost interactive window under the point, if any.
    pub fn window_at(&self, x: f32, y: f32) -> Option<WindowId> {
        self.z_order
            .iter()
            .rev()
            .copied()
            .find(|id| {
                self.windows
                    .get(id)
                    .is_some_and(|window| window.interactive() && window.contains(x, y))
            })
    }

    /// Route a pointer press. The topmost interactive window under the
    /// point owns the gesture: it runs its priority chain, raises, and
    /// becomes the press target. Returns whether any window consumed the
    /// press.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        let Some(id) = self.window_at(x, y) else {
            return false;
        };
        let viewport = self.viewport;
        let handled = self
            .windows
            .get_mut(&id)
            .is_some_and(|window| window.start_drag(x, y, viewport));
        if handled {
            self.active = Some(id);
            self.bring_to_front(id);
        }
        handled
    }

    /// Advance the press owner's session, if it holds one.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if let Some(id) = self.active
            && let Some(window) = self.windows.get_mut(&id)
        {
            window.drag(x, y);
        }
    }

    /// Release ends any session and clears the press owner.
    pub fn pointer_up(&mut self) {
        if let Some(id) = self.active.take()
            && let Some(window) = self.windows.get_mut(&id)
        {
            window.stop_drag();
        }
    }

    /// Wheel scroll goes to the topmost interactive window under the
    /// pointer and is consumed by it whether or not its content overflows.
    pub fn wheel(&mut self, x: f32, y: f32, delta: f32) -> bool {
        let Some(id) = self.window_at(x, y) else {
            return false;
        };
        if let Some(window) = self.windows.get_mut(&id) {
            window.scroll_by(delta);
        }
        true
    }

    /// Per-frame update pass. The press owner (or, with no press, the
    /// topmost interactive window under the pointer) receives the real
    /// pointer; every other window receives a neutralized one so its
    /// widgets cannot observe, or act on, this frame's input.
    pub fn update(&mut self, pointer: Pointer, measurer: &dyn TextMeasurer, theme: &Theme) {
        let under = if pointer.on_surface() {
            self.window_at(pointer.x, pointer.y)
        } else {
            None
        };
        let target = self.active.or(under);
        let viewport = self.viewport;
        for (id, window) in self.windows.iter_mut() {
            let p = if Some(*id) == target {
                pointer
            } else {
                Pointer::neutralized()
            };
            window.update(p, measurer, theme, viewport);
        }
    }

    /// Draw bottom to top so the z-order reads correctly on screen.
    pub fn draw(&mut self, surface: &mut dyn Surface, theme: &Theme) {
        let viewport = self.viewport;
        for id in self.z_order.clone() {
            if let Some(window) = self.windows.get_mut(&id) {
                window.draw(surface, theme, viewport);
            }
        }
    }
}
