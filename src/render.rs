//! Host rendering contract.
//!
//! The core never talks to a real drawing API. Windows and widgets draw
//! through the [`Surface`] trait and measure text through [`TextMeasurer`];
//! the host supplies an implementation (see `crate::term` for the bundled
//! terminal backend). [`RecordingSurface`] is a headless implementation used
//! by the test suite and handy for host smoke tests.

use crate::geometry::Rect;
use crate::theme::Color;

/// Text measurement, separated from drawing so layout and auto-sizing can
/// run without a frame in flight.
pub trait TextMeasurer {
    /// Advance width of `text` rendered with `font`, in viewport units.
    fn measure_text(&self, text: &str, font: &str) -> f32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Styled 2D primitives the widget set draws with.
///
/// `draw_content` is the embedded-content seam: a [`crate::widget::Widget::Content`]
/// widget forwards its opaque id here and the host blits whatever external
/// surface that id names.
pub trait Surface: TextMeasurer {
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, color: Color);
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color);
    fn text(&mut self, text: &str, x: f32, y: f32, font: &str, color: Color, align: TextAlign);
    fn circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color);

    /// Restrict subsequent drawing to `rect` until the matching `pop_clip`.
    /// Clips nest.
    fn push_clip(&mut self, rect: Rect);
    fn pop_clip(&mut self);

    /// Blit an external content surface into `rect`. Default is a no-op so
    /// hosts without embedded content need not care.
    fn draw_content(&mut self, _content_id: &str, _rect: Rect) {}
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect(Rect, Color),
    StrokeRect(Rect, Color),
    Line(f32, f32, f32, f32, Color),
    Text {
        text: String,
        x: f32,
        y: f32,
        align: TextAlign,
    },
    Circle(f32, f32, f32, Color),
    PushClip(Rect),
    PopClip,
    Content(String, Rect),
}

/// Headless [`Surface`] that records every draw call and measures text at a
/// fixed per-character advance.
#[derive(Debug)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    char_advance: f32,
    clip_depth: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            char_advance: 7.0,
            clip_depth: 0,
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Open clip count; zero once drawing is balanced.
    pub fn clip_depth(&self) -> usize {
        self.clip_depth
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer for RecordingSurface {
    fn measure_text(&self, text: &str, _font: &str) -> f32 {
        text.chars().count() as f32 * self.char_advance
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect(rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::StrokeRect(rect, color));
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color) {
        self.commands.push(DrawCommand::Line(x1, y1, x2, y2, color));
    }

    fn text(&mut self, text: &str, x: f32, y: f32, _font: &str, _color: Color, align: TextAlign) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            align,
        });
    }

    fn circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle(cx, cy, radius, color));
    }

    fn push_clip(&mut self, rect: Rect) {
        self.clip_depth += 1;
        self.commands.push(DrawCommand::PushClip(rect));
    }

    fn pop_clip(&mut self) {
        self.clip_depth = self.clip_depth.saturating_sub(1);
        self.commands.push(DrawCommand::PopClip);
    }

    fn draw_content(&mut self, content_id: &str, rect: Rect) {
        self.commands
            .push(DrawCommand::Content(content_id.to_string(), rect));
    }
}
