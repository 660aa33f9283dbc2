//! Bottom taskbar: a registry of windows that have left normal view, plus
//! an activation menu listing every registered window grouped by section.
//!
//! The taskbar never owns windows. It holds ids into the manager and talks
//! to windows exclusively through [`WindowManager`] lookups, so a removed
//! window degrades to a logged warning instead of a stale reference.

use crate::constants::{TASKBAR_HEIGHT, TASKBAR_MENU_ROW};
use crate::error::UiError;
use crate::geometry::Rect;
use crate::render::{Surface, TextAlign};
use crate::theme::Theme;
use crate::window::{WindowId, WindowManager};

const BAR_PADDING: f32 = 4.0;
const BUTTON_GAP: f32 = 4.0;
const BUTTON_TEXT_PAD: f32 = 8.0;
const MENU_GLYPH: &str = "=";
const MENU_WIDTH: f32 = 160.0;

/// One registry entry, in display order.
enum TaskbarItem {
    /// Grouping header for the activation menu.
    Section(String),
    Window {
        id: WindowId,
        title: String,
        external_id: Option<String>,
    },
}

/// What a recorded hit-rect does when pressed. Rebuilt every draw, the same
/// way the draw pass records exactly what it put on screen.
#[derive(Debug, Clone, PartialEq)]
enum HitAction {
    ToggleMenu,
    Restore(WindowId),
}

pub struct Taskbar {
    items: Vec<TaskbarItem>,
    menu_open: bool,
    hits: Vec<(Rect, HitAction)>,
    bar: Rect,
}

impl Taskbar {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            menu_open: false,
            hits: Vec::new(),
            bar: Rect::new(0.0, 0.0, 0.0, 0.0),
        }
    }

    pub fn add_section(&mut self, title: impl Into<String>) {
        self.items.push(TaskbarItem::Section(title.into()));
    }

    pub fn add_window(&mut self, id: WindowId, title: impl Into<String>) {
        self.items.push(TaskbarItem::Window {
            id,
            title: title.into(),
            external_id: None,
        });
    }

    pub fn add_window_with_external_id(
        &mut self,
        id: WindowId,
        title: impl Into<String>,
        external_id: impl Into<String>,
    ) {
        self.items.push(TaskbarItem::Window {
            id,
            title: title.into(),
            external_id: Some(external_id.into()),
        });
    }

    pub fn remove_window(&mut self, id: WindowId) {
        self.items.retain(|item| match item {
            TaskbarItem::Window { id: other, .. } => *other != id,
            TaskbarItem::Section(_) => true,
        });
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Screen band the bar occupied at the last draw.
    pub fn bar_rect(&self) -> Rect {
        self.bar
    }

    /// Single unification point for bringing a window back: every trigger
    /// (bar button, menu entry, external id) funnels through here.
    pub fn restore_window(&self, wm: &mut WindowManager, id: WindowId) {
        match wm.get_mut(id) {
            Some(window) => {
                window.restore();
                wm.bring_to_front(id);
            }
            None => {
                let err = UiError::UnknownWindow(id);
                tracing::warn!(%err, "taskbar restore skipped");
            }
        }
    }

    /// Restore by the host-facing id a window was registered under.
    pub fn restore_by_external_id(&self, wm: &mut WindowManager, external: &str) -> bool {
        let id = self.items.iter().find_map(|item| match item {
            TaskbarItem::Window {
                id, external_id, ..
            } if external_id.as_deref() == Some(external) => Some(*id),
            _ => None,
        });
        match id {
            Some(id) => {
                self.restore_window(wm, id);
                true
            }
            None => false,
        }
    }

    /// A bar button appears only for windows that left normal view.
    fn shows_button(wm: &WindowManager, id: WindowId) -> bool {
        wm.get(id).is_some_and(|window| {
            window.fullscreen()
                || window.transparent()
                || (window.minimized() && !window.visible())
        })
    }

    /// Draw the bar, the derived buttons, and the activation menu when
    /// open. Hit rects are re-recorded from scratch so routing always
    /// matches what is on screen.
    pub fn draw(
        &mut self,
        surface: &mut dyn Surface,
        wm: &WindowManager,
        theme: &Theme,
        viewport: Rect,
    ) {
        self.hits.clear();
        self.bar = Rect::new(
            viewport.x,
            viewport.bottom() - TASKBAR_HEIGHT,
            viewport.width,
            TASKBAR_HEIGHT,
        );
        surface.fill_rect(self.bar, theme.taskbar_bg);

        // menu toggle at the left edge
        let menu_button = Rect::new(
            self.bar.x + BAR_PADDING,
            self.bar.y + BAR_PADDING,
            TASKBAR_HEIGHT - BAR_PADDING * 2.0,
            TASKBAR_HEIGHT - BAR_PADDING * 2.0,
        );
        surface.fill_rect(menu_button, theme.taskbar_button_bg);
        surface.text(
            MENU_GLYPH,
            menu_button.x + menu_button.width / 2.0,
            menu_button.y + 2.0,
            &theme.small_font,
            theme.taskbar_button_fg,
            TextAlign::Center,
        );
        self.hits.push((menu_button, HitAction::ToggleMenu));

        // derived buttons, left to right in registry order
        let mut x = menu_button.right() + BUTTON_GAP * 2.0;
        for item in &self.items {
            let TaskbarItem::Window { id, title, .. } = item else {
                continue;
            };
            if !Self::shows_button(wm, *id) {
                continue;
            }
            let width =
                surface.measure_text(title, &theme.small_font) + BUTTON_TEXT_PAD * 2.0;
            let button = Rect::new(
                x,
                self.bar.y + BAR_PADDING,
                width,
                TASKBAR_HEIGHT - BAR_PADDING * 2.0,
            );
            surface.fill_rect(button, theme.taskbar_button_bg);
            surface.text(
                title,
                button.x + BUTTON_TEXT_PAD,
                button.y + 2.0,
                &theme.small_font,
                theme.taskbar_button_fg,
                TextAlign::Left,
            );
            self.hits.push((button, HitAction::Restore(*id)));
            x = button.right() + BUTTON_GAP;
        }

        if self.menu_open {
            self.draw_menu(surface, theme);
        }
    }

    fn draw_menu(&mut self, surface: &mut dyn Surface, theme: &Theme) {
        let rows = self.items.len().max(1) as f32;
        let height = rows * TASKBAR_MENU_ROW + BAR_PADDING * 2.0;
        let menu = Rect::new(
            self.bar.x + BAR_PADDING,
            self.bar.y - height,
            MENU_WIDTH,
            height,
        );
        surface.fill_rect(menu, theme.menu_bg);
        surface.stroke_rect(menu, theme.panel_border);

        let mut y = menu.y + BAR_PADDING;
        for item in &self.items {
            let row = Rect::new(menu.x, y, menu.width, TASKBAR_MENU_ROW);
            match item {
                TaskbarItem::Section(title) => {
                    surface.text(
                        title,
                        row.x + BUTTON_TEXT_PAD,
                        row.y + 2.0,
                        &theme.small_font,
                        theme.menu_section_fg,
                        TextAlign::Left,
                    );
                }
                TaskbarItem::Window { id, title, .. } => {
                    surface.text(
                        title,
                        row.x + BUTTON_TEXT_PAD * 2.0,
                        row.y + 2.0,
                        &theme.small_font,
                        theme.menu_fg,
                        TextAlign::Left,
                    );
                    self.hits.push((row, HitAction::Restore(*id)));
                }
            }
            y += TASKBAR_MENU_ROW;
        }
    }

    /// Route a press. Returns whether the taskbar consumed it. While the
    /// menu is open every press is consumed: entries activate, anything
    /// else dismisses.
    pub fn pointer_down(&mut self, x: f32, y: f32, wm: &mut WindowManager) -> bool {
        let was_open = self.menu_open;
        let hit = self
            .hits
            .iter()
            .find(|(rect, _)| rect.contains(x, y))
            .map(|(_, action)| action.clone());

        match hit {
            Some(HitAction::ToggleMenu) => {
                self.menu_open = !self.menu_open;
                return true;
            }
            Some(HitAction::Restore(id)) => {
                self.restore_window(wm, id);
                self.menu_open = false;
                return true;
            }
            None => {}
        }

        if was_open {
            // dismiss without activating anything
            self.menu_open = false;
            return true;
        }
        self.bar.contains(x, y)
    }
}

impl Default for Taskbar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingSurface;
    use crate::window::Window;

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 800.0, 600.0)
    }

    fn managed_window(wm: &mut WindowManager, title: &str) -> WindowId {
        let mut window = Window::new(title);
        window.width = 200.0;
        window.height = 150.0;
        wm.insert(window)
    }

    fn draw(taskbar: &mut Taskbar, wm: &WindowManager) -> RecordingSurface {
        let mut surface = RecordingSurface::new();
        let theme = Theme::default();
        taskbar.draw(&mut surface, wm, &theme, viewport());
        surface
    }

    #[test]
    fn buttons_appear_only_for_windows_out_of_normal_view() {
        let mut wm = WindowManager::new(viewport());
        let shown = managed_window(&mut wm, "sim");
        let hidden = managed_window(&mut wm, "log");
        let mut taskbar = Taskbar::new();
        taskbar.add_window(shown, "sim");
        taskbar.add_window(hidden, "log");

        let surface = draw(&mut taskbar, &wm);
        assert!(!surface.texts().contains(&"sim"));
        assert!(!surface.texts().contains(&"log"));

        wm.get_mut(hidden).unwrap().minimize();
        let surface = draw(&mut taskbar, &wm);
        assert!(surface.texts().contains(&"log"));
        assert!(!surface.texts().contains(&"sim"));
    }

    #[test]
    fn transparent_and_fullscreen_windows_get_buttons_too() {
        let mut wm = WindowManager::new(viewport());
        let hud = managed_window(&mut wm, "hud");
        let full = managed_window(&mut wm, "full");
        wm.get_mut(hud).unwrap().toggle_transparent();
        let vp = wm.viewport();
        wm.get_mut(full).unwrap().enter_fullscreen(vp);
        let mut taskbar = Taskbar::new();
        taskbar.add_window(hud, "hud");
        taskbar.add_window(full, "full");
        let surface = draw(&mut taskbar, &wm);
        assert!(surface.texts().contains(&"hud"));
        assert!(surface.texts().contains(&"full"));
    }

    #[test]
    fn bar_button_restores_and_raises() {
        let mut wm = WindowManager::new(viewport());
        let a = managed_window(&mut wm, "a");
        let b = managed_window(&mut wm, "b");
        wm.get_mut(a).unwrap().minimize();
        let mut taskbar = Taskbar::new();
        taskbar.add_window(a, "a");
        taskbar.add_window(b, "b");
        draw(&mut taskbar, &wm);

        // press the first (and only) restore button
        let (rect, _) = taskbar
            .hits
            .iter()
            .find(|(_, action)| matches!(action, HitAction::Restore(_)))
            .cloned()
            .unwrap();
        assert!(taskbar.pointer_down(rect.x + 1.0, rect.y + 1.0, &mut wm));
        let restored = wm.get(a).unwrap();
        assert!(restored.visible());
        assert!(!restored.minimized());
        assert_eq!(restored.z(), 1); // raised above b
    }

    #[test]
    fn menu_lists_sections_and_consumes_dismissal_click() {
        let mut wm = WindowManager::new(viewport());
        let a = managed_window(&mut wm, "boids");
        let mut taskbar = Taskbar::new();
        taskbar.add_section("simulations");
        taskbar.add_window(a, "boids");

        draw(&mut taskbar, &wm);
        // open the menu via the toggle button
        let (toggle, _) = taskbar.hits[0].clone();
        assert!(taskbar.pointer_down(toggle.x + 1.0, toggle.y + 1.0, &mut wm));
        assert!(taskbar.menu_open());

        let surface = draw(&mut taskbar, &wm);
        assert!(surface.texts().contains(&"simulations"));
        assert!(surface.texts().contains(&"boids"));

        // a click nowhere near the menu dismisses and is still consumed
        assert!(taskbar.pointer_down(400.0, 100.0, &mut wm));
        assert!(!taskbar.menu_open());
        // and with the menu closed the same click falls through
        draw(&mut taskbar, &wm);
        assert!(!taskbar.pointer_down(400.0, 100.0, &mut wm));
    }

    #[test]
    fn menu_entry_restores_a_minimized_window() {
        let mut wm = WindowManager::new(viewport());
        let a = managed_window(&mut wm, "boids");
        wm.get_mut(a).unwrap().minimize();
        let mut taskbar = Taskbar::new();
        taskbar.add_window(a, "boids");

        draw(&mut taskbar, &wm);
        let (toggle, _) = taskbar.hits[0].clone();
        taskbar.pointer_down(toggle.x + 1.0, toggle.y + 1.0, &mut wm);
        draw(&mut taskbar, &wm);

        let (row, _) = taskbar
            .hits
            .iter()
            .find(|(_, action)| matches!(action, HitAction::Restore(_)))
            .cloned()
            .unwrap();
        assert!(taskbar.pointer_down(row.x + 1.0, row.y + 1.0, &mut wm));
        assert!(wm.get(a).unwrap().visible());
        assert!(!taskbar.menu_open());
    }

    #[test]
    fn restore_by_external_id_and_stale_entries() {
        let mut wm = WindowManager::new(viewport());
        let a = managed_window(&mut wm, "boids");
        wm.get_mut(a).unwrap().minimize();
        let mut taskbar = Taskbar::new();
        taskbar.add_window_with_external_id(a, "boids", "sim-1");

        assert!(taskbar.restore_by_external_id(&mut wm, "sim-1"));
        assert!(wm.get(a).unwrap().visible());
        assert!(!taskbar.restore_by_external_id(&mut wm, "sim-404"));

        // a stale id is a warning, not a panic
        wm.remove(a);
        taskbar.restore_window(&mut wm, a);
        taskbar.remove_window(a);
        assert_eq!(taskbar.item_count(), 0);
    }
}
