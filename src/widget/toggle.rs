//! Boolean toggle widget: a check box with a trailing label.

use crate::constants::LINE_HEIGHT;
use crate::geometry::Rect;
use crate::input::Pointer;
use crate::render::{Surface, TextAlign};
use crate::theme::Theme;
use crate::widget::{Getter, MeasureCtx, Setter};

const BOX_SIZE: f32 = 14.0;
const BOX_GAP: f32 = 8.0;
const TOGGLE_HEIGHT: f32 = 20.0;

pub struct Toggle {
    label: String,
    get: Option<Getter<bool>>,
    set: Option<Setter<bool>>,
    hover: bool,
}

impl Toggle {
    pub fn new(
        label: impl Into<String>,
        get: Option<Getter<bool>>,
        set: Option<Setter<bool>>,
    ) -> Self {
        Self {
            label: label.into(),
            get,
            set,
            hover: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    fn value(&self) -> bool {
        self.get.as_ref().map(|get| get()).unwrap_or(false)
    }

    pub fn min_width(&self, ctx: &MeasureCtx<'_>) -> f32 {
        BOX_SIZE + BOX_GAP + ctx.measurer.measure_text(&self.label, &ctx.theme.label_font)
    }

    pub fn height(&self) -> f32 {
        TOGGLE_HEIGHT
    }

    pub fn draw(&self, surface: &mut dyn Surface, rect: Rect, theme: &Theme) {
        let box_rect = Rect::new(
            rect.x,
            rect.y + (rect.height - BOX_SIZE) / 2.0,
            BOX_SIZE,
            BOX_SIZE,
        );
        surface.fill_rect(box_rect, theme.slider_track);
        surface.stroke_rect(box_rect, theme.toggle_box);
        if self.value() {
            surface.circle(
                box_rect.x + BOX_SIZE / 2.0,
                box_rect.y + BOX_SIZE / 2.0,
                BOX_SIZE / 2.0 - 3.0,
                theme.toggle_check,
            );
        }
        surface.text(
            &self.label,
            box_rect.right() + BOX_GAP,
            rect.y + (rect.height - LINE_HEIGHT) / 2.0,
            &theme.label_font,
            theme.text_fg,
            TextAlign::Left,
        );
    }

    pub fn update(&mut self, rect: Rect, pointer: Pointer) {
        self.hover = pointer.on_surface() && rect.contains(pointer.x, pointer.y);
        if !(pointer.just_pressed && self.hover) {
            return;
        }
        let Some(get) = self.get.as_ref() else {
            tracing::warn!(toggle = %self.label, "toggle has no bound getter");
            return;
        };
        let next = !get();
        match self.set.as_mut() {
            Some(set) => {
                if let Err(err) = set(next) {
                    tracing::warn!(toggle = %self.label, %err, "toggle setter failed");
                }
            }
            None => {
                tracing::warn!(toggle = %self.label, "toggle has no bound setter");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn bound_toggle(flag: &Rc<Cell<bool>>) -> Toggle {
        let get_flag = flag.clone();
        let set_flag = flag.clone();
        Toggle::new(
            "paused",
            Some(Box::new(move || get_flag.get())),
            Some(Box::new(move |v| {
                set_flag.set(v);
                Ok(())
            })),
        )
    }

    #[test]
    fn click_flips_the_bound_value() {
        let flag = Rc::new(Cell::new(false));
        let mut toggle = bound_toggle(&flag);
        let rect = Rect::new(0.0, 0.0, 80.0, 20.0);
        toggle.update(rect, Pointer::new(5.0, 10.0, true, true));
        assert!(flag.get());
        toggle.update(rect, Pointer::new(5.0, 10.0, false, false));
        toggle.update(rect, Pointer::new(5.0, 10.0, true, true));
        assert!(!flag.get());
    }

    #[test]
    fn unbound_toggle_is_inert() {
        let mut toggle = Toggle::new("ghost", None, None);
        let rect = Rect::new(0.0, 0.0, 80.0, 20.0);
        toggle.update(rect, Pointer::new(5.0, 10.0, true, true));
        assert!(!toggle.value());
    }
}
