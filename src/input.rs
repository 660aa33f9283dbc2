//! Pointer input model.
//!
//! The host delivers discrete [`InputEvent`]s in viewport coordinates; the
//! router folds them into a per-frame [`Pointer`] snapshot that the update
//! pass hands to every window. Correctness of the single-active-window rule
//! rests on two derived forms of the snapshot:
//!
//! - [`Pointer::neutralized`]: off-surface and released. Given to every
//!   window that is not the pointer target so any widget mid-drag there
//!   releases immediately.
//! - [`Pointer::masked`]: off-surface but with `pressed` preserved. Used by
//!   a window for widgets outside its visible content band; a slider thumb
//!   mid-drag sees the pointer leave and ends its drag instead of freezing.

/// Sentinel coordinate far outside any plausible viewport.
pub const OFF_SURFACE: f32 = -1.0e6;

/// Raw input as delivered by the host, viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    Wheel { x: f32, y: f32, delta: f32 },
}

/// Per-frame pointer snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
    /// Button currently held.
    pub pressed: bool,
    /// Button went down since the previous frame.
    pub just_pressed: bool,
}

impl Pointer {
    pub const fn new(x: f32, y: f32, pressed: bool, just_pressed: bool) -> Self {
        Self {
            x,
            y,
            pressed,
            just_pressed,
        }
    }

    /// Off-surface, released. Forces widget drags in non-target windows to
    /// let go.
    pub const fn neutralized() -> Self {
        Self {
            x: OFF_SURFACE,
            y: OFF_SURFACE,
            pressed: false,
            just_pressed: false,
        }
    }

    /// Off-surface with the press state kept, for widgets outside the
    /// visible band of their own window.
    pub const fn masked(self) -> Self {
        Self {
            x: OFF_SURFACE,
            y: OFF_SURFACE,
            pressed: self.pressed,
            just_pressed: false,
        }
    }

    pub fn on_surface(&self) -> bool {
        self.x > OFF_SURFACE && self.y > OFF_SURFACE
    }
}

impl Default for Pointer {
    fn default() -> Self {
        Self::neutralized()
    }
}

/// Accumulates discrete events into the frame snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct PointerState {
    pointer: Pointer,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, x: f32, y: f32) {
        self.pointer = Pointer::new(x, y, true, true);
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.pointer.x = x;
        self.pointer.y = y;
    }

    pub fn release(&mut self, x: f32, y: f32) {
        self.pointer.x = x;
        self.pointer.y = y;
        self.pointer.pressed = false;
    }

    pub fn snapshot(&self) -> Pointer {
        self.pointer
    }

    /// Retire the just-pressed edge at the end of a tick.
    pub fn end_frame(&mut self) {
        self.pointer.just_pressed = false;
    }
}
