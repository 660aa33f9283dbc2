//! Terminal backend: a [`Surface`] over a ratatui [`Buffer`] (one cell per
//! viewport unit) and the crossterm mouse-event mapping.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::style::Color as TermColor;

use crate::geometry::Rect;
use crate::input::InputEvent;
use crate::render::{Surface, TextAlign, TextMeasurer};
use crate::theme::Color;

/// Wheel distance reported per terminal scroll notch, in cells.
const WHEEL_STEP: f32 = 3.0;

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb(color.r, color.g, color.b)
}

/// Draws UI primitives into a ratatui buffer. Cell-quantized: rects round
/// to whole cells, circles degrade to a single glyph, fonts are ignored
/// beyond their monospace advance.
///
/// The unit scale maps viewport units onto terminal cells. The default is
/// one unit per cell; hosts reusing pixel-tuned metrics pick a coarser
/// scale (see [`TermSurface::with_scale`]) so a 22-unit header lands on a
/// few rows instead of 22.
pub struct TermSurface<'a> {
    buffer: &'a mut Buffer,
    /// Units per cell, horizontal and vertical. Clips are kept in units.
    scale_x: f32,
    scale_y: f32,
    /// Effective clip per push; each entry is already intersected with the
    /// one below it.
    clips: Vec<Rect>,
}

impl<'a> TermSurface<'a> {
    pub fn new(buffer: &'a mut Buffer) -> Self {
        Self::with_scale(buffer, 1.0, 1.0)
    }

    pub fn with_scale(buffer: &'a mut Buffer, scale_x: f32, scale_y: f32) -> Self {
        Self {
            buffer,
            scale_x: scale_x.max(f32::EPSILON),
            scale_y: scale_y.max(f32::EPSILON),
            clips: Vec::new(),
        }
    }

    /// Viewport size in units for the buffer this surface wraps.
    pub fn unit_viewport(&self) -> Rect {
        let area = self.buffer.area;
        Rect::new(
            0.0,
            0.0,
            area.width as f32 * self.scale_x,
            area.height as f32 * self.scale_y,
        )
    }

    fn clip(&self) -> Option<Rect> {
        self.clips.last().copied()
    }

    fn cell_visible(&self, ux: f32, uy: f32) -> bool {
        match self.clip() {
            Some(clip) => clip.contains(ux, uy),
            None => true,
        }
    }

    /// `x`/`y` in cells; visibility is checked against the clip in units.
    fn put(&mut self, x: f32, y: f32, symbol: Option<&str>, fg: Option<Color>, bg: Option<Color>) {
        if x < 0.0
            || y < 0.0
            || !self.cell_visible(x * self.scale_x, y * self.scale_y)
        {
            return;
        }
        if let Some(cell) = self.buffer.cell_mut((x as u16, y as u16)) {
            if let Some(symbol) = symbol {
                cell.set_symbol(symbol);
            }
            if let Some(fg) = fg {
                cell.set_fg(term_color(fg));
            }
            if let Some(bg) = bg {
                cell.set_bg(term_color(bg));
            }
        }
    }

    fn to_cell_x(&self, ux: f32) -> f32 {
        (ux / self.scale_x).round()
    }

    fn to_cell_y(&self, uy: f32) -> f32 {
        (uy / self.scale_y).round()
    }

    fn fill(&mut self, rect: Rect, bg: Color) {
        let x0 = self.to_cell_x(rect.x) as i32;
        let y0 = self.to_cell_y(rect.y) as i32;
        let x1 = self.to_cell_x(rect.right()) as i32;
        let y1 = self.to_cell_y(rect.bottom()) as i32;
        for y in y0..y1 {
            for x in x0..x1 {
                self.put(x as f32, y as f32, Some(" "), None, Some(bg));
            }
        }
    }
}

impl TextMeasurer for TermSurface<'_> {
    fn measure_text(&self, text: &str, _font: &str) -> f32 {
        text.chars().count() as f32 * self.scale_x
    }
}

impl Surface for TermSurface<'_> {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fill(rect, color);
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color) {
        let x0 = self.to_cell_x(rect.x);
        let y0 = self.to_cell_y(rect.y);
        let x1 = (self.to_cell_x(rect.right()) - 1.0).max(x0);
        let y1 = (self.to_cell_y(rect.bottom()) - 1.0).max(y0);
        let mut x = x0;
        while x <= x1 {
            self.put(x, y0, Some("─"), Some(color), None);
            self.put(x, y1, Some("─"), Some(color), None);
            x += 1.0;
        }
        let mut y = y0;
        while y <= y1 {
            self.put(x0, y, Some("│"), Some(color), None);
            self.put(x1, y, Some("│"), Some(color), None);
            y += 1.0;
        }
        self.put(x0, y0, Some("┌"), Some(color), None);
        self.put(x1, y0, Some("┐"), Some(color), None);
        self.put(x0, y1, Some("└"), Some(color), None);
        self.put(x1, y1, Some("┘"), Some(color), None);
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color) {
        // axis-aligned only; that is all the widget set draws
        if (y1 - y2).abs() <= (x1 - x2).abs() {
            let y = self.to_cell_y(y1);
            let (from, to) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
            let mut x = self.to_cell_x(from);
            let end = self.to_cell_x(to);
            while x <= end {
                self.put(x, y, Some("─"), Some(color), None);
                x += 1.0;
            }
        } else {
            let x = self.to_cell_x(x1);
            let (from, to) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
            let mut y = self.to_cell_y(from);
            let end = self.to_cell_y(to);
            while y <= end {
                self.put(x, y, Some("│"), Some(color), None);
                y += 1.0;
            }
        }
    }

    fn text(&mut self, text: &str, x: f32, y: f32, _font: &str, color: Color, align: TextAlign) {
        let width = text.chars().count() as f32; // cells
        let anchor = x / self.scale_x;
        let start = match align {
            TextAlign::Left => anchor,
            TextAlign::Center => anchor - width / 2.0,
            TextAlign::Right => anchor - width,
        };
        let y = self.to_cell_y(y);
        for (i, ch) in text.chars().enumerate() {
            self.put(
                (start + i as f32).round(),
                y,
                Some(&ch.to_string()),
                Some(color),
                None,
            );
        }
    }

    fn circle(&mut self, cx: f32, cy: f32, _radius: f32, color: Color) {
        let (x, y) = (self.to_cell_x(cx), self.to_cell_y(cy));
        self.put(x, y, Some("●"), Some(color), None);
    }

    fn push_clip(&mut self, rect: Rect) {
        let effective = match self.clip() {
            Some(previous) => previous.intersection(rect),
            None => rect,
        };
        self.clips.push(effective);
    }

    fn pop_clip(&mut self) {
        self.clips.pop();
    }
}

/// Buffer-free measurer with the same metrics as a [`TermSurface`] at the
/// given scale. Lets the update pass run before a frame exists.
#[derive(Debug, Clone, Copy)]
pub struct CellMeasurer {
    pub scale_x: f32,
}

impl TextMeasurer for CellMeasurer {
    fn measure_text(&self, text: &str, _font: &str) -> f32 {
        text.chars().count() as f32 * self.scale_x
    }
}

/// Translate a crossterm mouse event into the core's pointer vocabulary.
/// Only the left button participates; everything else is dropped.
pub fn map_mouse_event(event: MouseEvent) -> Option<InputEvent> {
    let x = event.column as f32;
    let y = event.row as f32;
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::PointerDown { x, y }),
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
            Some(InputEvent::PointerMove { x, y })
        }
        MouseEventKind::Up(MouseButton::Left) => Some(InputEvent::PointerUp { x, y }),
        MouseEventKind::ScrollUp => Some(InputEvent::Wheel {
            x,
            y,
            delta: -WHEEL_STEP,
        }),
        MouseEventKind::ScrollDown => Some(InputEvent::Wheel {
            x,
            y,
            delta: WHEEL_STEP,
        }),
        _ => None,
    }
}

/// Rescale an event from cell coordinates into viewport units, matching a
/// surface built with [`TermSurface::with_scale`].
pub fn scale_event(event: InputEvent, scale_x: f32, scale_y: f32) -> InputEvent {
    let map = |x: f32, y: f32| (x * scale_x, y * scale_y);
    match event {
        InputEvent::PointerDown { x, y } => {
            let (x, y) = map(x, y);
            InputEvent::PointerDown { x, y }
        }
        InputEvent::PointerMove { x, y } => {
            let (x, y) = map(x, y);
            InputEvent::PointerMove { x, y }
        }
        InputEvent::PointerUp { x, y } => {
            let (x, y) = map(x, y);
            InputEvent::PointerUp { x, y }
        }
        InputEvent::Wheel { x, y, delta } => {
            let (x, y) = map(x, y);
            InputEvent::Wheel {
                x,
                y,
                delta: delta * scale_y,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::layout::Rect as TermRect;

    fn buffer() -> Buffer {
        Buffer::empty(TermRect::new(0, 0, 40, 12))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn text_lands_at_cells_with_alignment() {
        let mut buffer = buffer();
        let mut surface = TermSurface::new(&mut buffer);
        surface.text(
            "hi",
            10.0,
            2.0,
            "mono",
            Color::rgb(255, 255, 255),
            TextAlign::Right,
        );
        drop(surface);
        assert_eq!(buffer.cell((8, 2)).unwrap().symbol(), "h");
        assert_eq!(buffer.cell((9, 2)).unwrap().symbol(), "i");
    }

    #[test]
    fn clip_suppresses_out_of_band_cells() {
        let mut buffer = buffer();
        let mut surface = TermSurface::new(&mut buffer);
        surface.push_clip(Rect::new(0.0, 0.0, 5.0, 5.0));
        surface.fill_rect(Rect::new(0.0, 0.0, 10.0, 1.0), Color::rgb(9, 9, 9));
        surface.pop_clip();
        drop(surface);
        assert_eq!(
            buffer.cell((4, 0)).unwrap().bg,
            TermColor::Rgb(9, 9, 9)
        );
        assert_eq!(buffer.cell((5, 0)).unwrap().bg, TermColor::Reset);
    }

    #[test]
    fn nested_clips_intersect() {
        let mut buffer = buffer();
        let mut surface = TermSurface::new(&mut buffer);
        surface.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        surface.push_clip(Rect::new(5.0, 0.0, 10.0, 10.0));
        surface.fill_rect(Rect::new(0.0, 0.0, 20.0, 1.0), Color::rgb(1, 1, 1));
        drop(surface);
        assert_eq!(buffer.cell((4, 0)).unwrap().bg, TermColor::Reset);
        assert_eq!(buffer.cell((5, 0)).unwrap().bg, TermColor::Rgb(1, 1, 1));
        assert_eq!(buffer.cell((9, 0)).unwrap().bg, TermColor::Rgb(1, 1, 1));
        assert_eq!(buffer.cell((10, 0)).unwrap().bg, TermColor::Reset);
    }

    #[test]
    fn scaled_surface_maps_units_to_cells() {
        let mut buffer = buffer();
        let mut surface = TermSurface::with_scale(&mut buffer, 4.0, 8.0);
        assert_eq!(surface.measure_text("abc", "mono"), 12.0);
        assert_eq!(surface.unit_viewport(), Rect::new(0.0, 0.0, 160.0, 96.0));
        surface.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), Color::rgb(2, 2, 2));
        drop(surface);
        assert_eq!(buffer.cell((0, 0)).unwrap().bg, TermColor::Rgb(2, 2, 2));
        assert_eq!(buffer.cell((1, 0)).unwrap().bg, TermColor::Rgb(2, 2, 2));
        assert_eq!(buffer.cell((2, 0)).unwrap().bg, TermColor::Reset);

        let scaled = scale_event(InputEvent::PointerDown { x: 3.0, y: 2.0 }, 4.0, 8.0);
        assert_eq!(scaled, InputEvent::PointerDown { x: 12.0, y: 16.0 });
    }

    #[test]
    fn mouse_mapping_covers_the_pointer_vocabulary() {
        let down = map_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 3, 4));
        assert_eq!(down, Some(InputEvent::PointerDown { x: 3.0, y: 4.0 }));
        let drag = map_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 5, 4));
        assert_eq!(drag, Some(InputEvent::PointerMove { x: 5.0, y: 4.0 }));
        let up = map_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 5, 4));
        assert_eq!(up, Some(InputEvent::PointerUp { x: 5.0, y: 4.0 }));
        let wheel = map_mouse_event(mouse(MouseEventKind::ScrollDown, 5, 4));
        assert_eq!(
            wheel,
            Some(InputEvent::Wheel { x: 5.0, y: 4.0, delta: 3.0 })
        );
        assert_eq!(
            map_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 0, 0)),
            None
        );
    }
}
