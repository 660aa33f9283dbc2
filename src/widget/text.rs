//! Text block widget: a static string or a per-frame producer, word-wrapped
//! to the window's content width.

use crate::constants::LINE_HEIGHT;
use crate::geometry::Rect;
use crate::render::{Surface, TextAlign, TextMeasurer};
use crate::theme::{Color, Theme};
use crate::widget::{MeasureCtx, TextProducer};

pub enum TextSource {
    Static(String),
    /// Re-evaluated every frame; marks the widget dynamic so the owning
    /// window re-runs layout even when its cache is clean.
    Dynamic(TextProducer),
}

pub struct TextBlock {
    source: TextSource,
    color: Option<Color>,
}

impl TextBlock {
    pub fn fixed(text: impl Into<String>) -> Self {
        Self {
            source: TextSource::Static(text.into()),
            color: None,
        }
    }

    pub fn dynamic(producer: TextProducer) -> Self {
        Self {
            source: TextSource::Dynamic(producer),
            color: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self.source, TextSource::Dynamic(_))
    }

    fn current_text(&self) -> String {
        match &self.source {
            TextSource::Static(text) => text.clone(),
            TextSource::Dynamic(producer) => producer(),
        }
    }

    /// Longest single word; text reflows to any width at least this wide.
    pub fn min_width(&self, ctx: &MeasureCtx<'_>) -> f32 {
        self.current_text()
            .split_whitespace()
            .map(|word| ctx.measurer.measure_text(word, &ctx.theme.label_font))
            .fold(0.0, f32::max)
    }

    pub fn height(&self, ctx: &MeasureCtx<'_>) -> f32 {
        let lines = wrap_text(
            &self.current_text(),
            ctx.content_width,
            ctx.measurer,
            &ctx.theme.label_font,
        );
        lines.len().max(1) as f32 * LINE_HEIGHT
    }

    pub fn draw(&self, surface: &mut dyn Surface, rect: Rect, theme: &Theme) {
        let color = self.color.unwrap_or(theme.text_fg);
        let lines = wrap_text(
            &self.current_text(),
            rect.width,
            &*surface,
            &theme.label_font,
        );
        for (idx, line) in lines.iter().enumerate() {
            surface.text(
                line,
                rect.x,
                rect.y + idx as f32 * LINE_HEIGHT,
                &theme.label_font,
                color,
                TextAlign::Left,
            );
        }
    }
}

/// Greedy word wrap. Explicit newlines always break; a word wider than
/// `max_width` gets its own line rather than being split.
pub fn wrap_text(
    text: &str,
    max_width: f32,
    measurer: &dyn TextMeasurer,
    font: &str,
) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if !current.is_empty() && measurer.measure_text(&candidate, font) > max_width {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            } else {
                current = candidate;
            }
        }
        lines.push(current);
    }
    lines
}
