//! Retained-mode window manager and widget toolkit for a single rendering
//! surface.
//!
//! The core (`window`, `widget`, `taskbar`, `router`) is host-agnostic: it
//! draws through the [`render::Surface`] trait and consumes
//! [`input::InputEvent`]s in abstract viewport units. The `term` and
//! `drivers` modules supply a terminal host on top of crossterm/ratatui;
//! other hosts implement `Surface` and feed events themselves.

pub mod constants;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod logging;
pub mod render;
pub mod router;
pub mod taskbar;
pub mod term;
pub mod theme;
pub mod widget;
pub mod window;

pub use error::UiError;
pub use geometry::{Point, Rect, Size};
pub use input::{InputEvent, Pointer};
pub use render::{RecordingSurface, Surface, TextAlign, TextMeasurer};
pub use router::EventRouter;
pub use taskbar::Taskbar;
pub use theme::{Color, Theme};
pub use widget::Widget;
pub use window::{ModeRequest, Window, WindowId, WindowManager, WindowMode};
