//! Push button widget.

use crate::constants::LINE_HEIGHT;
use crate::geometry::Rect;
use crate::input::Pointer;
use crate::render::{Surface, TextAlign};
use crate::theme::Theme;
use crate::widget::{Action, MeasureCtx};

const LABEL_INSET: f32 = 20.0;
const BUTTON_HEIGHT: f32 = 22.0;

pub struct Button {
    label: String,
    action: Option<Action>,
    hover: bool,
    held: bool,
}

impl Button {
    pub fn new(label: impl Into<String>, action: Option<Action>) -> Self {
        Self {
            label: label.into(),
            action,
            hover: false,
            held: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn hover(&self) -> bool {
        self.hover
    }

    pub fn min_width(&self, ctx: &MeasureCtx<'_>) -> f32 {
        ctx.measurer.measure_text(&self.label, &ctx.theme.label_font) + LABEL_INSET
    }

    pub fn height(&self) -> f32 {
        BUTTON_HEIGHT
    }

    pub fn draw(&self, surface: &mut dyn Surface, rect: Rect, theme: &Theme) {
        let bg = if self.hover || self.held {
            theme.button_hover_bg
        } else {
            theme.button_bg
        };
        surface.fill_rect(rect, bg);
        surface.stroke_rect(rect, theme.panel_border);
        surface.text(
            &self.label,
            rect.x + rect.width / 2.0,
            rect.y + (rect.height - LINE_HEIGHT) / 2.0,
            &theme.label_font,
            theme.button_fg,
            TextAlign::Center,
        );
    }

    pub fn update(&mut self, rect: Rect, pointer: Pointer) {
        self.hover = pointer.on_surface() && rect.contains(pointer.x, pointer.y);
        if pointer.just_pressed && self.hover {
            self.held = true;
            match self.action.as_mut() {
                Some(action) => {
                    if let Err(err) = action() {
                        tracing::warn!(button = %self.label, %err, "button action failed");
                    }
                }
                None => {
                    tracing::warn!(button = %self.label, "button has no bound action");
                }
            }
        }
        if !pointer.pressed {
            self.held = false;
        }
    }
}
