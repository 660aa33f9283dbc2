//! Section divider: a dimmed title with a rule running to the right edge.
//! Sections sit flush against the content beneath them (zero trailing gap).

use crate::geometry::Rect;
use crate::render::{Surface, TextAlign};
use crate::theme::Theme;
use crate::widget::MeasureCtx;

const SECTION_HEIGHT: f32 = 18.0;
const TITLE_GAP: f32 = 8.0;

pub struct Section {
    title: String,
    category: Option<String>,
}

impl Section {
    pub fn new(title: impl Into<String>, category: Option<String>) -> Self {
        Self {
            title: title.into(),
            category,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn min_width(&self, ctx: &MeasureCtx<'_>) -> f32 {
        ctx.measurer.measure_text(&self.title, &ctx.theme.small_font) + TITLE_GAP * 2.0
    }

    pub fn height(&self) -> f32 {
        SECTION_HEIGHT
    }

    pub fn draw(&self, surface: &mut dyn Surface, rect: Rect, theme: &Theme) {
        surface.text(
            &self.title,
            rect.x,
            rect.y + 2.0,
            &theme.small_font,
            theme.section_fg,
            TextAlign::Left,
        );
        let title_width = surface.measure_text(&self.title, &theme.small_font);
        let mid = rect.y + rect.height / 2.0;
        surface.line(
            rect.x + title_width + TITLE_GAP,
            mid,
            rect.right(),
            mid,
            theme.section_line,
        );
    }
}
