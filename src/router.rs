//! Top-level event routing: taskbar first, then the window layer, and
//! whatever neither claims falls through to the host's pan/zoom hooks.

use crate::constants::PAN_THRESHOLD_SQ;
use crate::geometry::Point;
use crate::input::{InputEvent, PointerState};
use crate::render::TextMeasurer;
use crate::taskbar::Taskbar;
use crate::theme::Theme;
use crate::window::WindowManager;

/// Called with `(dx, dy)` while the user drags empty surface.
pub type PanHook = Box<dyn FnMut(f32, f32)>;
/// Called with `(x, y, delta)` when a wheel event misses every window.
pub type ZoomHook = Box<dyn FnMut(f32, f32, f32)>;

/// Background pan micro state machine. A press on empty surface arms a
/// candidate pan; it only starts reporting deltas once the pointer travels
/// past the threshold, so stray clicks never nudge the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PanState {
    Idle,
    Armed { start: Point, last: Point },
    Panning { last: Point },
}

pub struct EventRouter {
    pointer: PointerState,
    pan: PanState,
    pan_hook: Option<PanHook>,
    zoom_hook: Option<ZoomHook>,
}

impl EventRouter {
    pub fn new() -> Self {
        Self {
            pointer: PointerState::new(),
            pan: PanState::Idle,
            pan_hook: None,
            zoom_hook: None,
        }
    }

    pub fn set_pan_hook(&mut self, hook: PanHook) {
        self.pan_hook = Some(hook);
    }

    pub fn set_zoom_hook(&mut self, hook: ZoomHook) {
        self.zoom_hook = Some(hook);
    }

    pub fn panning(&self) -> bool {
        matches!(self.pan, PanState::Panning { .. })
    }

    /// Route one input event. Returns whether the UI consumed it; `false`
    /// means the event acted on the background (pan or zoom).
    pub fn handle(
        &mut self,
        event: InputEvent,
        taskbar: &mut Taskbar,
        wm: &mut WindowManager,
    ) -> bool {
        match event {
            InputEvent::PointerDown { x, y } => {
                self.pointer.press(x, y);
                if taskbar.pointer_down(x, y, wm) {
                    return true;
                }
                if wm.pointer_down(x, y) {
                    return true;
                }
                let here = Point::new(x, y);
                self.pan = PanState::Armed {
                    start: here,
                    last: here,
                };
                false
            }
            InputEvent::PointerMove { x, y } => {
                self.pointer.move_to(x, y);
                wm.pointer_move(x, y);
                self.advance_pan(x, y)
            }
            InputEvent::PointerUp { x, y } => {
                self.pointer.release(x, y);
                wm.pointer_up();
                let consumed = self.pan == PanState::Idle;
                self.pan = PanState::Idle;
                consumed
            }
            InputEvent::Wheel { x, y, delta } => {
                if wm.wheel(x, y, delta) {
                    return true;
                }
                if let Some(zoom) = self.zoom_hook.as_mut() {
                    zoom(x, y, delta);
                }
                false
            }
        }
    }

    fn advance_pan(&mut self, x: f32, y: f32) -> bool {
        let here = Point::new(x, y);
        match self.pan {
            PanState::Idle => true,
            PanState::Armed { start, .. } => {
                if start.distance_sq(here) >= PAN_THRESHOLD_SQ {
                    // report the whole accumulated travel on the first step
                    if let Some(pan) = self.pan_hook.as_mut() {
                        pan(here.x - start.x, here.y - start.y);
                    }
                    self.pan = PanState::Panning { last: here };
                } else {
                    self.pan = PanState::Armed { start, last: here };
                }
                false
            }
            PanState::Panning { last } => {
                if let Some(pan) = self.pan_hook.as_mut() {
                    pan(here.x - last.x, here.y - last.y);
                }
                self.pan = PanState::Panning { last: here };
                false
            }
        }
    }

    /// End-of-frame update: feed the pointer snapshot through the window
    /// layer (real pointer to the target, neutralized elsewhere), then
    /// retire the press edge.
    pub fn tick(&mut self, wm: &mut WindowManager, measurer: &dyn TextMeasurer, theme: &Theme) {
        wm.update(self.pointer.snapshot(), measurer, theme);
        self.pointer.end_frame();
    }
}

impl Default for EventRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::window::Window;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 800.0, 600.0)
    }

    fn wm_with_window() -> (WindowManager, crate::window::WindowId) {
        let mut wm = WindowManager::new(viewport());
        let mut window = Window::new("w");
        window.x = 100.0;
        window.y = 100.0;
        window.width = 200.0;
        window.height = 150.0;
        let id = wm.insert(window);
        (wm, id)
    }

    #[test]
    fn window_press_is_consumed_and_never_pans() {
        let (mut wm, _) = wm_with_window();
        let mut taskbar = Taskbar::new();
        let mut router = EventRouter::new();
        let panned = Rc::new(RefCell::new(0.0f32));
        let sink = panned.clone();
        router.set_pan_hook(Box::new(move |dx, _| *sink.borrow_mut() += dx));

        assert!(router.handle(
            InputEvent::PointerDown { x: 150.0, y: 180.0 },
            &mut taskbar,
            &mut wm,
        ));
        router.handle(InputEvent::PointerMove { x: 250.0, y: 180.0 }, &mut taskbar, &mut wm);
        assert_eq!(*panned.borrow(), 0.0);
        assert!(!router.panning());
    }

    #[test]
    fn empty_surface_drag_pans_after_threshold() {
        let (mut wm, _) = wm_with_window();
        let mut taskbar = Taskbar::new();
        let mut router = EventRouter::new();
        let panned = Rc::new(RefCell::new((0.0f32, 0.0f32)));
        let sink = panned.clone();
        router.set_pan_hook(Box::new(move |dx, dy| {
            let mut total = sink.borrow_mut();
            total.0 += dx;
            total.1 += dy;
        }));

        assert!(!router.handle(
            InputEvent::PointerDown { x: 500.0, y: 500.0 },
            &mut taskbar,
            &mut wm,
        ));
        // below the threshold: armed, no deltas yet
        router.handle(InputEvent::PointerMove { x: 502.0, y: 501.0 }, &mut taskbar, &mut wm);
        assert_eq!(*panned.borrow(), (0.0, 0.0));
        assert!(!router.panning());
        // past the threshold: the accumulated travel arrives at once
        router.handle(InputEvent::PointerMove { x: 510.0, y: 500.0 }, &mut taskbar, &mut wm);
        assert!(router.panning());
        assert_eq!(*panned.borrow(), (10.0, 0.0));
        router.handle(InputEvent::PointerMove { x: 515.0, y: 505.0 }, &mut taskbar, &mut wm);
        assert_eq!(*panned.borrow(), (15.0, 5.0));
        router.handle(InputEvent::PointerUp { x: 515.0, y: 505.0 }, &mut taskbar, &mut wm);
        assert!(!router.panning());
    }

    #[test]
    fn wheel_off_window_zooms() {
        let (mut wm, _) = wm_with_window();
        let mut taskbar = Taskbar::new();
        let mut router = EventRouter::new();
        let zoomed = Rc::new(RefCell::new(0.0f32));
        let sink = zoomed.clone();
        router.set_zoom_hook(Box::new(move |_, _, delta| *sink.borrow_mut() += delta));

        // over the window: consumed by it
        assert!(router.handle(
            InputEvent::Wheel { x: 150.0, y: 180.0, delta: 3.0 },
            &mut taskbar,
            &mut wm,
        ));
        assert_eq!(*zoomed.borrow(), 0.0);
        // over empty surface: falls through to the zoom hook
        assert!(!router.handle(
            InputEvent::Wheel { x: 600.0, y: 400.0, delta: 3.0 },
            &mut taskbar,
            &mut wm,
        ));
        assert_eq!(*zoomed.borrow(), 3.0);
    }

    #[test]
    fn taskbar_outranks_windows() {
        let mut wm = WindowManager::new(viewport());
        let mut window = Window::new("w");
        window.x = 0.0;
        window.y = 0.0;
        window.width = 800.0;
        window.height = 600.0; // covers the whole viewport, bar included
        let id = wm.insert(window);
        let mut taskbar = Taskbar::new();
        taskbar.add_window(id, "w");

        // draw once so the bar records its band
        let mut surface = crate::render::RecordingSurface::new();
        let theme = Theme::default();
        taskbar.draw(&mut surface, &wm, &theme, viewport());
        let bar = taskbar.bar_rect();

        let mut router = EventRouter::new();
        assert!(router.handle(
            InputEvent::PointerDown { x: bar.x + 200.0, y: bar.y + 5.0 },
            &mut taskbar,
            &mut wm,
        ));
        // consumed by the bar: the window started no session
        assert_eq!(wm.get(id).and_then(Window::drag_kind), None);
    }

    #[test]
    fn tick_feeds_pointer_and_retires_the_edge() {
        let (mut wm, _) = wm_with_window();
        let mut taskbar = Taskbar::new();
        let mut router = EventRouter::new();
        let surface = crate::render::RecordingSurface::new();
        let theme = Theme::default();

        router.handle(InputEvent::PointerDown { x: 150.0, y: 180.0 }, &mut taskbar, &mut wm);
        assert!(router.pointer.snapshot().just_pressed);
        router.tick(&mut wm, &surface, &theme);
        assert!(!router.pointer.snapshot().just_pressed);
        assert!(router.pointer.snapshot().pressed);
    }
}
