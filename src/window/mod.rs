//! The `Window` entity: a draggable, resizable panel hosting a vertical
//! widget stack, with the drag/resize/scroll session state machine and the
//! pointer-ownership protocol.

mod window_manager;

pub use window_manager::{WindowId, WindowManager};

use crate::constants::{
    AUTO_HEIGHT_BUDGET, HEADER_BUTTON_COUNT, HEADER_BUTTON_WIDTH, HEADER_HEIGHT, MIN_WINDOW_HEIGHT,
    MIN_WINDOW_WIDTH, MOVE_THRESHOLD_SQ, RESIZE_HOTZONE, SCROLLBAR_MIN_THUMB, SCROLLBAR_WIDTH,
    WINDOW_PADDING,
};
use crate::geometry::{Point, Rect, clamp};
use crate::input::Pointer;
use crate::layout::{LayoutEntry, stack_layout};
use crate::render::{Surface, TextAlign, TextMeasurer};
use crate::theme::Theme;
use crate::widget::{
    Action, CellGetter, CellSetter, ContentView, Getter, Matrix, MeasureCtx, Section, Setter,
    Slider, TextBlock, TextProducer, Toggle, Widget,
};

/// Primary mode. Exactly one of these describes a window at any instant;
/// `visible` is independent draw-gating bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMode {
    Normal,
    Minimized,
    Transparent,
    Fullscreen,
}

impl WindowMode {
    pub fn as_str(self) -> &'static str {
        match self {
            WindowMode::Normal => "normal",
            WindowMode::Minimized => "minimized",
            WindowMode::Transparent => "transparent",
            WindowMode::Fullscreen => "fullscreen",
        }
    }
}

/// Transition requested by a header control or a strategy hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeRequest {
    Minimize,
    Restore,
    ToggleFullscreen,
    ToggleTransparent,
    Hide,
}

/// Which header control button occupies each slot of the strip,
/// left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderButton {
    Eye,
    Maximize,
    Minimize,
    Close,
}

const HEADER_BUTTONS: [HeaderButton; HEADER_BUTTON_COUNT] = [
    HeaderButton::Eye,
    HeaderButton::Maximize,
    HeaderButton::Minimize,
    HeaderButton::Close,
];

/// Active pointer session. At most one per window, and the manager
/// guarantees at most one window holds any session at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
enum DragSession {
    Move {
        grab_dx: f32,
        grab_dy: f32,
        start: Point,
        moved: bool,
    },
    Resize {
        start_width: f32,
        start_height: f32,
        start: Point,
    },
    Thumb {
        grab: f32,
    },
}

/// Public view of the session kind, for hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Move,
    Resize,
    Scroll,
}

/// Strategy hook deciding a transition; `None` consumes the control press
/// without any transition.
pub type ModeHook = Box<dyn FnMut() -> Option<ModeRequest>>;
/// Fired when the window closes, before `visible` bookkeeping settles.
pub type CloseHook = Box<dyn FnMut()>;
/// Fire-and-forget primary-mode notification: `(external id, new mode)`.
pub type ModeNotify = Box<dyn FnMut(&str, WindowMode)>;

pub struct Window {
    title: String,
    tag: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    padding: f32,
    header_height: f32,

    visible: bool,
    minimized: bool,
    transparent: bool,
    fullscreen: bool,
    restore_rect: Option<Rect>,

    scroll_offset: f32,
    content_height: f32,

    session: Option<DragSession>,
    manually_resized: bool,

    widgets: Vec<Widget>,
    layout: Vec<LayoutEntry>,
    layout_dirty: bool,

    // explicit z value renumbered by the manager for external consumers
    z: usize,

    external_id: Option<String>,
    minimize_hook: Option<ModeHook>,
    transparent_hook: Option<ModeHook>,
    close_hook: Option<CloseHook>,
    mode_notify: Option<ModeNotify>,
}

impl Window {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tag: String::new(),
            x: 0.0,
            y: 0.0,
            width: MIN_WINDOW_WIDTH,
            height: MIN_WINDOW_HEIGHT,
            padding: WINDOW_PADDING,
            header_height: HEADER_HEIGHT,
            visible: true,
            minimized: false,
            transparent: false,
            fullscreen: false,
            restore_rect: None,
            scroll_offset: 0.0,
            content_height: 0.0,
            session: None,
            manually_resized: false,
            widgets: Vec::new(),
            layout: Vec::new(),
            layout_dirty: true,
            z: 0,
            external_id: None,
            minimize_hook: None,
            transparent_hook: None,
            close_hook: None,
            mode_notify: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Pin the window to an exact frame, opting it out of auto-sizing.
    pub fn set_frame(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.x = x;
        self.y = y;
        self.width = width.max(MIN_WINDOW_WIDTH);
        self.height = height.max(MIN_WINDOW_HEIGHT);
        self.manually_resized = true;
        self.layout_dirty = true;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn z(&self) -> usize {
        self.z
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn minimized(&self) -> bool {
        self.minimized
    }

    pub fn transparent(&self) -> bool {
        self.transparent
    }

    pub fn fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    pub fn external_id(&self) -> Option<&str> {
        self.external_id.as_deref()
    }

    pub fn set_external_id(&mut self, id: impl Into<String>) {
        self.external_id = Some(id.into());
    }

    pub fn set_minimize_hook(&mut self, hook: ModeHook) {
        self.minimize_hook = Some(hook);
    }

    pub fn set_transparent_hook(&mut self, hook: ModeHook) {
        self.transparent_hook = Some(hook);
    }

    pub fn set_close_hook(&mut self, hook: CloseHook) {
        self.close_hook = Some(hook);
    }

    pub fn set_mode_notify(&mut self, hook: ModeNotify) {
        self.mode_notify = Some(hook);
    }

    // ---- widget list -----------------------------------------------------

    pub fn add_widget(&mut self, widget: Widget) {
        self.widgets.push(widget);
        self.layout_dirty = true;
    }

    pub fn add_button(&mut self, label: impl Into<String>, action: Action) {
        self.add_widget(Widget::Button(crate::widget::Button::new(
            label,
            Some(action),
        )));
    }

    pub fn add_toggle(&mut self, label: impl Into<String>, get: Getter<bool>, set: Setter<bool>) {
        self.add_widget(Widget::Toggle(Toggle::new(label, Some(get), Some(set))));
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_slider(
        &mut self,
        label: impl Into<String>,
        get: Getter<f32>,
        set: Setter<f32>,
        min: f32,
        max: f32,
        step: f32,
    ) {
        self.add_widget(Widget::Slider(Slider::new(
            label,
            Some(get),
            Some(set),
            min,
            max,
            step,
        )));
    }

    pub fn add_text(&mut self, text: impl Into<String>) {
        self.add_widget(Widget::Text(TextBlock::fixed(text)));
    }

    pub fn add_dynamic_text(&mut self, producer: TextProducer) {
        self.add_widget(Widget::Text(TextBlock::dynamic(producer)));
    }

    pub fn add_section(&mut self, title: impl Into<String>, category: Option<String>) {
        self.add_widget(Widget::Section(Section::new(title, category)));
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_matrix(
        &mut self,
        rows: usize,
        cols: usize,
        get: CellGetter,
        set: CellSetter,
        min: f32,
        max: f32,
    ) {
        self.add_widget(Widget::Matrix(Matrix::new(
            rows,
            cols,
            Some(get),
            Some(set),
            min,
            max,
        )));
    }

    pub fn add_content(&mut self, content_id: impl Into<String>, height: f32) {
        self.add_widget(Widget::Content(ContentView::new(content_id, height)));
    }

    // ---- geometry --------------------------------------------------------

    /// Height the window actually occupies: a minimized window collapses to
    /// its header band.
    pub fn effective_height(&self) -> f32 {
        if self.minimized {
            self.header_height
        } else {
            self.height
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.effective_height())
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        self.bounds().contains(px, py)
    }

    fn header_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.header_height)
    }

    fn header_button_rect(&self, slot: usize) -> Rect {
        let strip_x =
            self.x + self.width - HEADER_BUTTON_WIDTH * HEADER_BUTTON_COUNT as f32;
        Rect::new(
            strip_x + slot as f32 * HEADER_BUTTON_WIDTH,
            self.y,
            HEADER_BUTTON_WIDTH,
            self.header_height,
        )
    }

    fn resize_hotzone(&self) -> Rect {
        Rect::new(
            self.x + self.width - RESIZE_HOTZONE,
            self.y + self.height - RESIZE_HOTZONE,
            RESIZE_HOTZONE,
            RESIZE_HOTZONE,
        )
    }

    fn view_height(&self) -> f32 {
        (self.height - self.header_height).max(0.0)
    }

    /// Clip region for widget content: everything below the header.
    fn content_rect(&self) -> Rect {
        Rect::new(self.x, self.y + self.header_height, self.width, self.view_height())
    }

    fn content_inner_width(&self) -> f32 {
        let scrollbar = if self.has_scrollbar() { SCROLLBAR_WIDTH } else { 0.0 };
        (self.width - self.padding * 2.0 - scrollbar).max(10.0)
    }

    pub fn has_scrollbar(&self) -> bool {
        self.content_height > self.view_height() + 0.5
    }

    fn max_scroll(&self) -> f32 {
        (self.content_height - self.view_height()).max(0.0)
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = clamp(self.scroll_offset, 0.0, self.max_scroll());
    }

    pub fn scroll_by(&mut self, delta: f32) {
        self.scroll_offset += delta;
        self.clamp_scroll();
    }

    fn scrollbar_track(&self) -> Rect {
        Rect::new(
            self.x + self.width - SCROLLBAR_WIDTH,
            self.y + self.header_height,
            SCROLLBAR_WIDTH,
            self.view_height(),
        )
    }

    fn scrollbar_thumb(&self) -> Rect {
        let track = self.scrollbar_track();
        let view = self.view_height();
        let thumb_height = if self.content_height > 0.0 {
            (view * view / self.content_height).max(SCROLLBAR_MIN_THUMB).min(track.height)
        } else {
            track.height
        };
        let travel = (track.height - thumb_height).max(0.0);
        let ratio = if self.max_scroll() > 0.0 {
            self.scroll_offset / self.max_scroll()
        } else {
            0.0
        };
        Rect::new(track.x, track.y + travel * ratio, track.width, thumb_height)
    }

    /// Absolute rect of one layout entry, scroll-adjusted.
    fn entry_rect(&self, entry: LayoutEntry) -> Rect {
        Rect::new(
            self.x + self.padding,
            self.y + entry.offset - self.scroll_offset,
            self.content_inner_width(),
            entry.height,
        )
    }

    // ---- mode state machine ---------------------------------------------

    pub fn mode(&self) -> WindowMode {
        if self.fullscreen {
            WindowMode::Fullscreen
        } else if self.minimized {
            WindowMode::Minimized
        } else if self.transparent {
            WindowMode::Transparent
        } else {
            WindowMode::Normal
        }
    }

    fn notify_mode(&mut self) {
        let mode = self.mode();
        let id = self
            .external_id
            .clone()
            .unwrap_or_else(|| self.title.clone());
        if let Some(notify) = self.mode_notify.as_mut() {
            notify(&id, mode);
        }
        tracing::debug!(window = %self.title, mode = mode.as_str(), "mode change");
    }

    pub fn enter_fullscreen(&mut self, viewport: Rect) {
        if self.fullscreen {
            // never overwrite the snapshot while already fullscreen
            return;
        }
        self.restore_rect = Some(Rect::new(self.x, self.y, self.width, self.height));
        self.fullscreen = true;
        self.apply_viewport(viewport);
        self.notify_mode();
    }

    pub fn exit_fullscreen(&mut self) {
        if !self.fullscreen {
            return;
        }
        self.fullscreen = false;
        if let Some(rect) = self.restore_rect.take() {
            self.x = rect.x;
            self.y = rect.y;
            self.width = rect.width;
            self.height = rect.height;
        }
        self.layout_dirty = true;
        self.notify_mode();
    }

    pub fn toggle_fullscreen(&mut self, viewport: Rect) {
        if self.fullscreen {
            self.exit_fullscreen();
        } else {
            self.enter_fullscreen(viewport);
        }
    }

    /// Track a viewport change while fullscreen; the restore snapshot is
    /// left alone.
    pub(crate) fn apply_viewport(&mut self, viewport: Rect) {
        self.x = viewport.x;
        self.y = viewport.y;
        self.width = viewport.width;
        self.height = viewport.height;
        self.layout_dirty = true;
        self.clamp_scroll();
    }

    pub fn minimize(&mut self) {
        if self.minimized {
            return;
        }
        self.minimized = true;
        self.visible = false;
        self.notify_mode();
    }

    pub fn toggle_transparent(&mut self) {
        self.transparent = !self.transparent;
        self.notify_mode();
    }

    /// Unified restore: back to normal, visible. Callers bring the window
    /// to front afterwards.
    pub fn restore(&mut self) {
        if self.fullscreen {
            self.exit_fullscreen();
        }
        self.visible = true;
        self.minimized = false;
        self.transparent = false;
        self.notify_mode();
    }

    /// Hide the window without touching `minimized`, then let the host
    /// deregister through the close hook.
    pub fn close(&mut self) {
        self.visible = false;
        if let Some(hook) = self.close_hook.as_mut() {
            hook();
        }
        tracing::debug!(window = %self.title, "closed");
    }

    fn apply_request(&mut self, request: ModeRequest, viewport: Rect) {
        match request {
            ModeRequest::Minimize => self.minimize(),
            ModeRequest::Restore => self.restore(),
            ModeRequest::ToggleFullscreen => self.toggle_fullscreen(viewport),
            ModeRequest::ToggleTransparent => self.toggle_transparent(),
            ModeRequest::Hide => self.close(),
        }
    }

    fn press_header_button(&mut self, button: HeaderButton, viewport: Rect) {
        let request = match button {
            HeaderButton::Eye => match self.transparent_hook.as_mut() {
                Some(hook) => hook(),
                None => Some(ModeRequest::ToggleTransparent),
            },
            HeaderButton::Maximize => Some(ModeRequest::ToggleFullscreen),
            HeaderButton::Minimize => match self.minimize_hook.as_mut() {
                Some(hook) => hook(),
                None => Some(ModeRequest::Minimize),
            },
            HeaderButton::Close => Some(ModeRequest::Hide),
        };
        if let Some(request) = request {
            self.apply_request(request, viewport);
        }
    }

    /// Interactive for hit testing: drawn normally or as a transparent HUD,
    /// and not collapsed to its header.
    pub fn interactive(&self) -> bool {
        (self.visible || self.transparent) && !self.minimized
    }

    fn drawable(&self) -> bool {
        self.visible || self.transparent || self.fullscreen
    }

    // ---- pointer ownership protocol --------------------------------------

    /// Evaluate a pointer-down in strict priority order. The first match
    /// wins and owns the gesture until release. Returns whether the event
    /// was consumed.
    pub fn start_drag(&mut self, px: f32, py: f32, viewport: Rect) -> bool {
        // 1. resize handle, unavailable while transparent or fullscreen
        if !self.transparent && !self.fullscreen && self.resize_hotzone().contains(px, py) {
            self.session = Some(DragSession::Resize {
                start_width: self.width,
                start_height: self.height,
                start: Point::new(px, py),
            });
            return true;
        }

        // 2 + 3. scrollbar thumb, then track jump
        if self.has_scrollbar() && !self.transparent {
            let thumb = self.scrollbar_thumb();
            if thumb.contains(px, py) {
                self.session = Some(DragSession::Thumb { grab: py - thumb.y });
                return true;
            }
            let track = self.scrollbar_track();
            if track.contains(px, py) {
                let ratio = if track.height > 0.0 {
                    (py - track.y) / track.height
                } else {
                    0.0
                };
                self.scroll_offset = ratio * self.max_scroll();
                self.clamp_scroll();
                return true;
            }
        }

        // 4. header control strip, left to right; skipped while transparent
        //    (a transparent window's header is not drawn and not hittable)
        if !self.transparent && self.header_rect().contains(px, py) {
            for (slot, button) in HEADER_BUTTONS.iter().enumerate() {
                if self.header_button_rect(slot).contains(px, py) {
                    self.press_header_button(*button, viewport);
                    return true;
                }
            }
            // 5. remaining header area starts a move drag, armed behind a
            //    movement threshold so a plain click cannot jitter position
            if !self.fullscreen {
                self.session = Some(DragSession::Move {
                    grab_dx: px - self.x,
                    grab_dy: py - self.y,
                    start: Point::new(px, py),
                    moved: false,
                });
            }
            return true;
        }

        // 6. clicks in the body are consumed so they never fall through to
        //    windows beneath; widgets see the press via the update pass
        if self.contains(px, py) {
            return true;
        }

        false
    }

    /// Advance the active session, if any.
    pub fn drag(&mut self, px: f32, py: f32) {
        match self.session {
            Some(DragSession::Resize {
                start_width,
                start_height,
                start,
            }) => {
                self.width = (start_width + px - start.x).max(MIN_WINDOW_WIDTH);
                self.height = (start_height + py - start.y).max(MIN_WINDOW_HEIGHT);
                self.manually_resized = true;
                self.layout_dirty = true;
                self.clamp_scroll();
            }
            Some(DragSession::Thumb { grab }) => {
                let track = self.scrollbar_track();
                let thumb_height = self.scrollbar_thumb().height;
                let travel = (track.height - thumb_height).max(0.0);
                if travel > 0.0 {
                    let ratio = clamp((py - grab - track.y) / travel, 0.0, 1.0);
                    self.scroll_offset = ratio * self.max_scroll();
                }
            }
            Some(DragSession::Move {
                grab_dx,
                grab_dy,
                start,
                moved,
            }) => {
                let passed =
                    moved || start.distance_sq(Point::new(px, py)) >= MOVE_THRESHOLD_SQ;
                if passed {
                    self.x = px - grab_dx;
                    self.y = py - grab_dy;
                    self.session = Some(DragSession::Move {
                        grab_dx,
                        grab_dy,
                        start,
                        moved: true,
                    });
                }
            }
            None => {}
        }
    }

    /// Unconditionally end whichever session is active.
    pub fn stop_drag(&mut self) {
        self.session = None;
    }

    pub fn drag_kind(&self) -> Option<DragKind> {
        match self.session {
            Some(DragSession::Move { .. }) => Some(DragKind::Move),
            Some(DragSession::Resize { .. }) => Some(DragKind::Resize),
            Some(DragSession::Thumb { .. }) => Some(DragKind::Scroll),
            None => None,
        }
    }

    pub fn manually_resized(&self) -> bool {
        self.manually_resized
    }

    // ---- layout & sizing -------------------------------------------------

    fn has_dynamic_widget(&self) -> bool {
        self.widgets.iter().any(Widget::is_dynamic)
    }

    /// Recompute the stacking layout (and auto-size when permitted).
    /// Cached behind the dirty flag; dynamic widgets bypass the cache since
    /// their size may change every frame.
    pub fn refresh_layout(&mut self, measurer: &dyn TextMeasurer, theme: &Theme, viewport: Rect) {
        if !self.layout_dirty && !self.has_dynamic_widget() {
            return;
        }
        if !self.manually_resized && !self.fullscreen {
            self.auto_size(measurer, theme, viewport);
        }
        let content_width = self.content_inner_width();
        {
            let ctx = MeasureCtx {
                measurer,
                theme,
                content_width,
            };
            for widget in &mut self.widgets {
                if let Widget::Slider(slider) = widget {
                    slider.sync_label_width(&ctx);
                }
            }
            let (entries, content_height) =
                stack_layout(&self.widgets, &ctx, self.header_height + self.padding);
            self.layout = entries;
            self.content_height = content_height;
        }
        self.clamp_scroll();
        self.layout_dirty = false;
    }

    /// Fit width to the widest of title and widgets, height to content
    /// within the viewport budget. Suppressed once the user resizes.
    fn auto_size(&mut self, measurer: &dyn TextMeasurer, theme: &Theme, viewport: Rect) {
        let strip = HEADER_BUTTON_WIDTH * HEADER_BUTTON_COUNT as f32;
        let title_width =
            measurer.measure_text(&self.title, &theme.header_font) + strip + self.padding * 2.0;
        let ctx = MeasureCtx {
            measurer,
            theme,
            content_width: self.content_inner_width(),
        };
        let widest = self
            .widgets
            .iter()
            .map(|widget| widget.min_width(&ctx))
            .fold(0.0, f32::max);
        let mut width = title_width
            .max(widest + self.padding * 2.0)
            .max(MIN_WINDOW_WIDTH);

        let ctx = MeasureCtx {
            measurer,
            theme,
            content_width: width - self.padding * 2.0,
        };
        let (_, content_height) =
            stack_layout(&self.widgets, &ctx, self.header_height + self.padding);
        let budget = (viewport.height * AUTO_HEIGHT_BUDGET).max(MIN_WINDOW_HEIGHT);
        let natural = self.header_height + content_height;
        if natural > budget {
            // content will scroll; leave room for the scrollbar
            width += SCROLLBAR_WIDTH;
        }
        self.width = width;
        self.height = natural.min(budget).max(MIN_WINDOW_HEIGHT);
    }

    // ---- draw / update contracts -----------------------------------------

    pub fn draw(&mut self, surface: &mut dyn Surface, theme: &Theme, viewport: Rect) {
        if !self.drawable() {
            return;
        }
        self.refresh_layout(&*surface, theme, viewport);
        let chrome = !self.transparent && !self.fullscreen;

        if self.minimized {
            // collapsed to the header band
            if chrome {
                self.draw_chrome(surface, theme);
            }
            return;
        }

        if chrome {
            surface.fill_rect(self.bounds(), theme.panel_bg);
            surface.stroke_rect(self.bounds(), theme.panel_border);
            self.draw_chrome(surface, theme);
        }

        let content = self.content_rect();
        surface.push_clip(content);
        for i in 0..self.layout.len() {
            let entry = self.layout[i];
            let rect = self.entry_rect(entry);
            if !rect.intersects_band(content.y, content.bottom()) {
                continue;
            }
            self.widgets[entry.index].draw(surface, rect, theme);
        }
        surface.pop_clip();

        if chrome && self.has_scrollbar() {
            surface.fill_rect(self.scrollbar_track(), theme.scrollbar_track);
            surface.fill_rect(self.scrollbar_thumb(), theme.scrollbar_thumb);
        }
    }

    fn draw_chrome(&self, surface: &mut dyn Surface, theme: &Theme) {
        let header = self.header_rect();
        surface.fill_rect(header, theme.header_bg);
        surface.text(
            &self.title,
            header.x + self.padding,
            header.y + 4.0,
            &theme.header_font,
            theme.header_fg,
            TextAlign::Left,
        );
        for (slot, button) in HEADER_BUTTONS.iter().enumerate() {
            let rect = self.header_button_rect(slot);
            let glyph = match button {
                HeaderButton::Eye => "o",
                HeaderButton::Maximize => "#",
                HeaderButton::Minimize => "_",
                HeaderButton::Close => "x",
            };
            surface.text(
                glyph,
                rect.x + rect.width / 2.0,
                rect.y + 4.0,
                &theme.small_font,
                theme.header_button_fg,
                TextAlign::Center,
            );
        }
    }

    /// Per-frame update. Every widget in the cached layout is updated;
    /// entries outside the visible band, or any widget while the pointer is
    /// outside the content area, see a masked pointer (off-surface, press
    /// preserved) so mid-drag widgets release instead of freezing.
    ///
    /// While the window itself owns a session the pointer is masked for
    /// every widget: whichever zone claimed the press keeps the gesture
    /// exclusively, even where the resize corner overlaps a widget rect.
    pub fn update(
        &mut self,
        pointer: Pointer,
        measurer: &dyn TextMeasurer,
        theme: &Theme,
        viewport: Rect,
    ) {
        if self.drawable() && !self.minimized {
            self.refresh_layout(measurer, theme, viewport);
        }
        let content = self.content_rect();
        let pointer_in_content = pointer.on_surface()
            && content.contains(pointer.x, pointer.y)
            && self.interactive()
            && self.session.is_none();
        for i in 0..self.layout.len() {
            let entry = self.layout[i];
            let rect = self.entry_rect(entry);
            let visible_band = rect.intersects_band(content.y, content.bottom());
            let widget_pointer = if pointer_in_content && visible_band {
                pointer
            } else {
                pointer.masked()
            };
            self.widgets[entry.index].update(rect, widget_pointer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingSurface;
    use std::cell::Cell;
    use std::rc::Rc;

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 800.0, 600.0)
    }

    fn window_at(x: f32, y: f32, width: f32, height: f32) -> Window {
        let mut window = Window::new("test");
        window.x = x;
        window.y = y;
        window.width = width;
        window.height = height;
        window.manually_resized = true; // pin geometry for the test
        window
    }

    #[test]
    fn fullscreen_round_trip_restores_exact_rect() {
        let mut window = window_at(50.0, 50.0, 300.0, 200.0);
        window.enter_fullscreen(viewport());
        assert!(window.fullscreen());
        assert_eq!(window.width, 800.0);
        // viewport change while fullscreen must not touch the snapshot
        window.apply_viewport(Rect::new(0.0, 0.0, 1024.0, 768.0));
        window.exit_fullscreen();
        assert_eq!(
            (window.x, window.y, window.width, window.height),
            (50.0, 50.0, 300.0, 200.0)
        );
    }

    #[test]
    fn snapshot_not_overwritten_while_fullscreen() {
        let mut window = window_at(50.0, 50.0, 300.0, 200.0);
        window.enter_fullscreen(viewport());
        window.enter_fullscreen(Rect::new(0.0, 0.0, 100.0, 100.0));
        window.exit_fullscreen();
        assert_eq!((window.x, window.y), (50.0, 50.0));
    }

    #[test]
    fn minimize_then_restore_round_trip() {
        let mut window = window_at(10.0, 10.0, 200.0, 150.0);
        window.minimize();
        assert!(window.minimized());
        assert!(!window.visible());
        assert_eq!(window.effective_height(), HEADER_HEIGHT);
        window.restore();
        assert!(window.visible());
        assert!(!window.minimized());
        assert!(!window.transparent());
    }

    #[test]
    fn move_drag_honors_threshold() {
        let mut window = window_at(0.0, 0.0, 200.0, 150.0);
        // header area, away from the button strip
        assert!(window.start_drag(10.0, 10.0, viewport()));
        assert_eq!(window.drag_kind(), Some(DragKind::Move));
        window.drag(12.0, 11.0); // squared distance 5 < 25
        assert_eq!((window.x, window.y), (0.0, 0.0));
        window.drag(20.0, 10.0); // squared distance 100
        assert_eq!((window.x, window.y), (10.0, 0.0));
        // once past the threshold every move tracks directly
        window.drag(21.0, 10.0);
        assert_eq!((window.x, window.y), (11.0, 0.0));
        window.stop_drag();
        assert_eq!(window.drag_kind(), None);
    }

    #[test]
    fn resize_drag_clamps_and_marks_manual() {
        let mut window = window_at(0.0, 0.0, 200.0, 150.0);
        window.manually_resized = false;
        let px = window.x + window.width - 5.0;
        let py = window.y + window.height - 5.0;
        assert!(window.start_drag(px, py, viewport()));
        assert_eq!(window.drag_kind(), Some(DragKind::Resize));
        window.drag(px + 40.0, py + 30.0);
        assert_eq!((window.width, window.height), (240.0, 180.0));
        assert!(window.manually_resized());
        window.drag(px - 1000.0, py - 1000.0);
        assert_eq!(window.width, MIN_WINDOW_WIDTH);
        assert_eq!(window.height, MIN_WINDOW_HEIGHT);
    }

    #[test]
    fn resize_handle_skipped_while_transparent_or_fullscreen() {
        let mut window = window_at(0.0, 0.0, 200.0, 150.0);
        window.transparent = true;
        let px = window.x + window.width - 5.0;
        let py = window.y + window.height - 5.0;
        // body click still consumes, but no resize session begins
        assert!(window.start_drag(px, py, viewport()));
        assert_eq!(window.drag_kind(), None);
    }

    #[test]
    fn header_button_strip_triggers_transitions() {
        let mut window = window_at(0.0, 0.0, 200.0, 150.0);
        // slot 2 = minimize
        let rect = window.header_button_rect(2);
        assert!(window.start_drag(rect.x + 1.0, rect.y + 1.0, viewport()));
        assert!(window.minimized());
        assert_eq!(window.drag_kind(), None);
    }

    #[test]
    fn minimize_hook_can_redirect_to_fullscreen() {
        let mut window = window_at(0.0, 0.0, 200.0, 150.0);
        window.set_minimize_hook(Box::new(|| Some(ModeRequest::ToggleFullscreen)));
        let rect = window.header_button_rect(2);
        assert!(window.start_drag(rect.x + 1.0, rect.y + 1.0, viewport()));
        assert!(window.fullscreen());
        assert!(!window.minimized());
    }

    #[test]
    fn close_fires_hook_and_keeps_minimized_flag() {
        let closed = Rc::new(Cell::new(false));
        let hook_flag = closed.clone();
        let mut window = window_at(0.0, 0.0, 200.0, 150.0);
        window.set_close_hook(Box::new(move || hook_flag.set(true)));
        window.close();
        assert!(closed.get());
        assert!(!window.visible());
        assert!(!window.minimized());
    }

    #[test]
    fn mode_notify_fires_with_external_id() {
        let seen = Rc::new(std::cell::RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut window = window_at(0.0, 0.0, 200.0, 150.0);
        window.set_external_id("sim-3");
        window.set_mode_notify(Box::new(move |id, mode| {
            sink.borrow_mut().push((id.to_string(), mode));
        }));
        window.minimize();
        window.restore();
        let seen = seen.borrow();
        assert_eq!(seen[0], ("sim-3".to_string(), WindowMode::Minimized));
        assert_eq!(seen.last().unwrap().1, WindowMode::Normal);
    }

    #[test]
    fn scroll_offset_stays_clamped_through_resize() {
        let mut window = window_at(0.0, 0.0, 200.0, 400.0);
        for i in 0..30 {
            window.add_button(format!("button {i}"), Box::new(|| Ok(())));
        }
        let surface = RecordingSurface::new();
        let theme = Theme::default();
        window.refresh_layout(&surface, &theme, viewport());
        assert!(window.has_scrollbar());
        window.scroll_by(10_000.0);
        let max = window.content_height() - (window.height - HEADER_HEIGHT);
        assert!((window.scroll_offset() - max).abs() < 1e-3);
        // shrinking the view keeps the offset in range
        window.height = 800.0;
        window.layout_dirty = true;
        window.refresh_layout(&surface, &theme, viewport());
        assert!(window.scroll_offset() <= window.content_height());
        window.scroll_by(-10_000.0);
        assert_eq!(window.scroll_offset(), 0.0);
    }

    #[test]
    fn scrollbar_track_click_jumps_to_ratio() {
        let mut window = window_at(0.0, 0.0, 200.0, 300.0);
        for i in 0..40 {
            window.add_button(format!("b{i}"), Box::new(|| Ok(())));
        }
        let surface = RecordingSurface::new();
        let theme = Theme::default();
        window.refresh_layout(&surface, &theme, viewport());
        let track = window.scrollbar_track();
        // click low in the track but above the resize corner: jump, no
        // drag session
        let py = track.bottom() - RESIZE_HOTZONE - 1.0;
        assert!(window.start_drag(track.x + 2.0, py, viewport()));
        assert_eq!(window.drag_kind(), None);
        assert!(window.scroll_offset() > 0.0);
    }

    #[test]
    fn track_click_in_the_resize_corner_resizes_instead() {
        let mut window = window_at(0.0, 0.0, 200.0, 300.0);
        for i in 0..40 {
            window.add_button(format!("b{i}"), Box::new(|| Ok(())));
        }
        let surface = RecordingSurface::new();
        let theme = Theme::default();
        window.refresh_layout(&surface, &theme, viewport());
        let track = window.scrollbar_track();
        // the track's bottom end sits inside the resize hot-zone, which is
        // evaluated first and wins
        assert!(window.start_drag(track.x + 2.0, track.bottom() - 1.0, viewport()));
        assert_eq!(window.drag_kind(), Some(DragKind::Resize));
        assert_eq!(window.scroll_offset(), 0.0);
    }

    #[test]
    fn resize_session_masks_widgets_under_the_corner() {
        let fired = Rc::new(Cell::new(0u32));
        let mut window = window_at(0.0, 0.0, 200.0, 150.0);
        for _ in 0..4 {
            let count = fired.clone();
            window.add_button(
                "run",
                Box::new(move || {
                    count.set(count.get() + 1);
                    Ok(())
                }),
            );
        }
        let surface = RecordingSurface::new();
        let theme = Theme::default();
        window.refresh_layout(&surface, &theme, viewport());
        // the press lands inside both the hot-zone and the last button
        assert!(window.start_drag(190.0, 140.0, viewport()));
        assert_eq!(window.drag_kind(), Some(DragKind::Resize));
        window.update(Pointer::new(190.0, 140.0, true, true), &surface, &theme, viewport());
        assert_eq!(fired.get(), 0);
        // release frees the content area again
        window.stop_drag();
        window.update(Pointer::new(100.0, 40.0, true, true), &surface, &theme, viewport());
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn auto_size_fits_widest_widget_until_user_resize() {
        let mut window = Window::new("w");
        window.add_button("a really quite long button label", Box::new(|| Ok(())));
        let surface = RecordingSurface::new();
        let theme = Theme::default();
        window.refresh_layout(&surface, &theme, viewport());
        let fitted = window.width;
        assert!(fitted > MIN_WINDOW_WIDTH);
        // user resize pins the size
        let px = window.x + window.width - 2.0;
        let py = window.y + window.height - 2.0;
        window.start_drag(px, py, viewport());
        window.drag(px + 100.0, py);
        window.stop_drag();
        let pinned = window.width;
        window.layout_dirty = true;
        window.refresh_layout(&surface, &theme, viewport());
        assert_eq!(window.width, pinned);
        assert!(pinned > fitted);
    }

    #[test]
    fn transparent_window_skips_chrome_but_draws_content() {
        let mut window = window_at(0.0, 0.0, 200.0, 150.0);
        window.add_text("hud readout");
        let mut surface = RecordingSurface::new();
        let theme = Theme::default();
        window.transparent = true;
        window.draw(&mut surface, &theme, viewport());
        assert!(surface.texts().contains(&"hud readout"));
        // no header title drawn
        assert!(!surface.texts().contains(&"test"));
        assert_eq!(surface.clip_depth(), 0);
    }

    #[test]
    fn hidden_window_draws_nothing() {
        let mut window = window_at(0.0, 0.0, 200.0, 150.0);
        window.visible = false;
        let mut surface = RecordingSurface::new();
        let theme = Theme::default();
        window.draw(&mut surface, &theme, viewport());
        assert!(surface.commands.is_empty());
    }

    #[test]
    fn update_masks_pointer_outside_content_area() {
        let value = Rc::new(Cell::new(0.0f32));
        let get_value = value.clone();
        let set_value = value.clone();
        let mut window = window_at(0.0, 0.0, 300.0, 200.0);
        window.add_slider(
            "v",
            Box::new(move || get_value.get()),
            Box::new(move |v| {
                set_value.set(v);
                Ok(())
            }),
            0.0,
            10.0,
            1.0,
        );
        let surface = RecordingSurface::new();
        let theme = Theme::default();
        window.refresh_layout(&surface, &theme, viewport());
        // pointer pressed but inside the header band, not the content area:
        // the slider must not begin a drag
        let pointer = Pointer::new(10.0, 5.0, true, true);
        window.update(pointer, &surface, &theme, viewport());
        if let Widget::Slider(slider) = &window.widgets[0] {
            assert!(!slider.dragging());
        } else {
            panic!("expected slider");
        }
    }
}
