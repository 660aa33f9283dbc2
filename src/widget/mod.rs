//! The widget family: one variant per kind, a shared sizing/draw/update
//! surface, and the closure-based data-binding contract.
//!
//! Widgets never read or write domain state directly. Interactive kinds are
//! constructed with getter/setter closures supplied by the host, so the same
//! window code can front arbitrary backing values. A missing closure leaves
//! the control inert; a closure returning `Err` is logged and the tick
//! continues.

use crate::error::UiError;
use crate::geometry::Rect;
use crate::input::Pointer;
use crate::render::{Surface, TextMeasurer};
use crate::theme::Theme;

pub mod button;
pub mod content_view;
pub mod matrix;
pub mod section;
pub mod slider;
pub mod text;
pub mod toggle;

pub use button::Button;
pub use content_view::ContentView;
pub use matrix::Matrix;
pub use section::Section;
pub use slider::Slider;
pub use text::{TextBlock, TextSource};
pub use toggle::Toggle;

pub type Getter<T> = Box<dyn Fn() -> T>;
pub type Setter<T> = Box<dyn FnMut(T) -> Result<(), UiError>>;
pub type Action = Box<dyn FnMut() -> Result<(), UiError>>;
pub type TextProducer = Box<dyn Fn() -> String>;
pub type CellGetter = Box<dyn Fn(usize, usize) -> f32>;
pub type CellSetter = Box<dyn FnMut(usize, usize, f32) -> Result<(), UiError>>;

/// Sizing context handed to `min_width`/`height`. `content_width` is the
/// window's current inner width so wrapped text can answer with its true
/// height.
pub struct MeasureCtx<'a> {
    pub measurer: &'a dyn TextMeasurer,
    pub theme: &'a Theme,
    pub content_width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Button,
    Toggle,
    Slider,
    Text,
    Section,
    Matrix,
    Content,
}

/// Tagged widget variant. Layout, drawing, and pointer updates all dispatch
/// through this one type so the window never inspects widget internals.
pub enum Widget {
    Button(Button),
    Toggle(Toggle),
    Slider(Slider),
    Text(TextBlock),
    Section(Section),
    Matrix(Matrix),
    Content(ContentView),
}

impl Widget {
    pub fn kind(&self) -> WidgetKind {
        match self {
            Widget::Button(_) => WidgetKind::Button,
            Widget::Toggle(_) => WidgetKind::Toggle,
            Widget::Slider(_) => WidgetKind::Slider,
            Widget::Text(_) => WidgetKind::Text,
            Widget::Section(_) => WidgetKind::Section,
            Widget::Matrix(_) => WidgetKind::Matrix,
            Widget::Content(_) => WidgetKind::Content,
        }
    }

    /// Narrowest width this widget renders usefully at. Feeds the window's
    /// auto-sizing pass.
    pub fn min_width(&self, ctx: &MeasureCtx<'_>) -> f32 {
        match self {
            Widget::Button(w) => w.min_width(ctx),
            Widget::Toggle(w) => w.min_width(ctx),
            Widget::Slider(w) => w.min_width(ctx),
            Widget::Text(w) => w.min_width(ctx),
            Widget::Section(w) => w.min_width(ctx),
            Widget::Matrix(w) => w.min_width(),
            Widget::Content(w) => w.min_width(),
        }
    }

    /// Rendered height. The layout engine only ever sizes through this
    /// accessor; no widget duplicates its own stacking math elsewhere.
    pub fn height(&self, ctx: &MeasureCtx<'_>) -> f32 {
        match self {
            Widget::Button(w) => w.height(),
            Widget::Toggle(w) => w.height(),
            Widget::Slider(w) => w.height(),
            Widget::Text(w) => w.height(ctx),
            Widget::Section(w) => w.height(),
            Widget::Matrix(w) => w.height(),
            Widget::Content(w) => w.height(),
        }
    }

    /// Time-varying content whose size may change between frames. The
    /// owning window re-runs layout every frame while one of these is
    /// present, cache or not.
    pub fn is_dynamic(&self) -> bool {
        match self {
            Widget::Text(w) => w.is_dynamic(),
            _ => false,
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, rect: Rect, theme: &Theme) {
        match self {
            Widget::Button(w) => w.draw(surface, rect, theme),
            Widget::Toggle(w) => w.draw(surface, rect, theme),
            Widget::Slider(w) => w.draw(surface, rect, theme),
            Widget::Text(w) => w.draw(surface, rect, theme),
            Widget::Section(w) => w.draw(surface, rect, theme),
            Widget::Matrix(w) => w.draw(surface, rect, theme),
            Widget::Content(w) => w.draw(surface, rect, theme),
        }
    }

    pub fn update(&mut self, rect: Rect, pointer: Pointer) {
        match self {
            Widget::Button(w) => w.update(rect, pointer),
            Widget::Toggle(w) => w.update(rect, pointer),
            Widget::Slider(w) => w.update(rect, pointer),
            Widget::Text(_) | Widget::Section(_) | Widget::Content(_) => {}
            Widget::Matrix(w) => w.update(rect, pointer),
        }
    }
}

/// Compact numeric label: whole numbers lose the fraction, everything else
/// keeps two places.
pub(crate) fn format_value(value: f32) -> String {
    if (value - value.round()).abs() < 1e-4 {
        format!("{}", value.round() as i64)
    } else {
        format!("{value:.2}")
    }
}
