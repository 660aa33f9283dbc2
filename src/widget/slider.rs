//! Numeric slider widget: label, draggable track, and a value readout.
//!
//! Values are quantized to the configured step at every write, so a drag
//! released at 73% of a 0..=10 track settles on 7, never 7.3.

use crate::constants::{LINE_HEIGHT, SLIDER_TRACK_MIN, SLIDER_VALUE_ALLOWANCE};
use crate::geometry::{Rect, clamp, inverse_lerp, lerp};
use crate::input::Pointer;
use crate::render::{Surface, TextAlign};
use crate::theme::Theme;
use crate::widget::{Getter, MeasureCtx, Setter, format_value};

const SLIDER_HEIGHT: f32 = 22.0;
const TRACK_THICKNESS: f32 = 6.0;
const LABEL_GAP: f32 = 6.0;
/// Extra grab slack above/below the visual track.
const TRACK_SLACK: f32 = 5.0;

pub struct Slider {
    label: String,
    get: Option<Getter<f32>>,
    set: Option<Setter<f32>>,
    min: f32,
    max: f32,
    step: f32,
    hover: bool,
    dragging: bool,
    label_width: f32,
}

impl Slider {
    pub fn new(
        label: impl Into<String>,
        get: Option<Getter<f32>>,
        set: Option<Setter<f32>>,
        min: f32,
        max: f32,
        step: f32,
    ) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            label: label.into(),
            get,
            set,
            min,
            max,
            step: step.abs(),
            hover: false,
            dragging: false,
            label_width: 0.0,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn dragging(&self) -> bool {
        self.dragging
    }

    fn value(&self) -> f32 {
        let raw = self.get.as_ref().map(|get| get()).unwrap_or(self.min);
        clamp(raw, self.min, self.max)
    }

    /// Snap `value` to the nearest step inside the range. A zero step
    /// degrades to plain clamping.
    fn quantize(&self, value: f32) -> f32 {
        if self.step <= f32::EPSILON {
            return clamp(value, self.min, self.max);
        }
        let steps = ((value - self.min) / self.step).round();
        clamp(self.min + steps * self.step, self.min, self.max)
    }

    pub fn min_width(&self, ctx: &MeasureCtx<'_>) -> f32 {
        ctx.measurer.measure_text(&self.label, &ctx.theme.label_font)
            + SLIDER_VALUE_ALLOWANCE
            + SLIDER_TRACK_MIN
    }

    pub fn height(&self) -> f32 {
        SLIDER_HEIGHT
    }

    /// Track rectangle inside the widget rect, between the label and the
    /// value readout. `label_width` is cached by the owning window's layout
    /// pass so update and draw agree without re-measuring.
    fn track_rect(&self, rect: Rect) -> Rect {
        let x = rect.x + self.label_width + LABEL_GAP;
        let width = (rect.right() - SLIDER_VALUE_ALLOWANCE - x).max(10.0);
        Rect::new(
            x,
            rect.y + (rect.height - TRACK_THICKNESS) / 2.0,
            width,
            TRACK_THICKNESS,
        )
    }

    pub fn draw(&self, surface: &mut dyn Surface, rect: Rect, theme: &Theme) {
        surface.text(
            &self.label,
            rect.x,
            rect.y + (rect.height - LINE_HEIGHT) / 2.0,
            &theme.label_font,
            theme.text_fg,
            TextAlign::Left,
        );
        let track = self.track_rect(rect);
        let ratio = inverse_lerp(self.value(), self.min, self.max);
        surface.fill_rect(track, theme.slider_track);
        let filled = Rect::new(track.x, track.y, track.width * ratio, track.height);
        surface.fill_rect(filled, theme.slider_fill);
        surface.stroke_rect(track, theme.slider_border);
        surface.circle(
            track.x + track.width * ratio,
            track.y + track.height / 2.0,
            TRACK_THICKNESS,
            theme.slider_fill,
        );
        surface.text(
            &format_value(self.value()),
            rect.right(),
            rect.y + (rect.height - LINE_HEIGHT) / 2.0,
            &theme.label_font,
            theme.text_fg,
            TextAlign::Right,
        );
    }

    /// Cache the measured label width for `track_rect`. Called by the
    /// owning window whenever layout runs.
    pub fn sync_label_width(&mut self, ctx: &MeasureCtx<'_>) {
        self.label_width = ctx.measurer.measure_text(&self.label, &ctx.theme.label_font);
    }

    pub fn update(&mut self, rect: Rect, pointer: Pointer) {
        let track = self.track_rect(rect);
        let grab = Rect::new(
            track.x,
            track.y - TRACK_SLACK,
            track.width,
            track.height + TRACK_SLACK * 2.0,
        );
        self.hover = pointer.on_surface() && grab.contains(pointer.x, pointer.y);

        if pointer.just_pressed && self.hover {
            self.dragging = true;
        }
        if !self.dragging {
            return;
        }
        // An off-surface pointer is a release signal even while pressed:
        // the window masks coordinates when the pointer leaves the content
        // band and the manager neutralizes non-target windows.
        if !pointer.pressed || !pointer.on_surface() {
            self.dragging = false;
            return;
        }
        let ratio = inverse_lerp(pointer.x, track.x, track.right());
        let next = self.quantize(lerp(self.min, self.max, ratio));
        match self.set.as_mut() {
            Some(set) => {
                if let Err(err) = set(next) {
                    tracing::warn!(slider = %self.label, %err, "slider setter failed");
                    self.dragging = false;
                }
            }
            None => {
                tracing::warn!(slider = %self.label, "slider has no bound setter");
                self.dragging = false;
            }
        }
    }
}
