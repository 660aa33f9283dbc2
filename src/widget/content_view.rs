//! Embedded content view: reserves a band of the window and delegates its
//! pixels to the host through `Surface::draw_content`.

use crate::geometry::Rect;
use crate::render::Surface;
use crate::theme::Theme;

const CONTENT_MIN_WIDTH: f32 = 80.0;

pub struct ContentView {
    content_id: String,
    height: f32,
}

impl ContentView {
    pub fn new(content_id: impl Into<String>, height: f32) -> Self {
        Self {
            content_id: content_id.into(),
            height: height.max(1.0),
        }
    }

    pub fn content_id(&self) -> &str {
        &self.content_id
    }

    pub fn min_width(&self) -> f32 {
        CONTENT_MIN_WIDTH
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn draw(&self, surface: &mut dyn Surface, rect: Rect, theme: &Theme) {
        surface.fill_rect(rect, theme.content_placeholder);
        surface.draw_content(&self.content_id, rect);
    }
}
