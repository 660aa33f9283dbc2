//! Centralized theme table.
//!
//! One `Theme` is built before the first draw and then treated as read-only
//! for the rest of the run. Draw calls take it by shared reference instead of
//! reaching for a global, which keeps the core testable without a live
//! rendering surface.

/// An opaque RGB color the host maps onto whatever its surface supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Named color and font slots enumerated by the widget set.
///
/// Font slots are free-form strings interpreted by the host's
/// text-measurement implementation (a CSS-style spec for a canvas host; the
/// terminal backend ignores them).
#[derive(Debug, Clone)]
pub struct Theme {
    pub panel_bg: Color,
    pub panel_border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub header_button_fg: Color,

    pub text_fg: Color,
    pub section_fg: Color,
    pub section_line: Color,

    pub button_bg: Color,
    pub button_hover_bg: Color,
    pub button_fg: Color,

    pub toggle_box: Color,
    pub toggle_check: Color,

    pub slider_track: Color,
    pub slider_border: Color,
    pub slider_fill: Color,

    pub matrix_cell_bg: Color,
    pub matrix_cell_fg: Color,
    pub matrix_selection: Color,

    pub scrollbar_track: Color,
    pub scrollbar_thumb: Color,

    pub content_placeholder: Color,

    pub taskbar_bg: Color,
    pub taskbar_button_bg: Color,
    pub taskbar_button_fg: Color,
    pub menu_bg: Color,
    pub menu_fg: Color,
    pub menu_section_fg: Color,

    pub header_font: String,
    pub label_font: String,
    pub small_font: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            panel_bg: Color::rgb(30, 32, 38),
            panel_border: Color::rgb(70, 74, 84),
            header_bg: Color::rgb(48, 52, 62),
            header_fg: Color::rgb(230, 230, 235),
            header_button_fg: Color::rgb(180, 184, 192),

            text_fg: Color::rgb(210, 212, 218),
            section_fg: Color::rgb(150, 154, 164),
            section_line: Color::rgb(70, 74, 84),

            button_bg: Color::rgb(58, 64, 78),
            button_hover_bg: Color::rgb(78, 86, 104),
            button_fg: Color::rgb(230, 230, 235),

            toggle_box: Color::rgb(90, 95, 108),
            toggle_check: Color::rgb(120, 190, 120),

            slider_track: Color::rgb(44, 48, 56),
            slider_border: Color::rgb(90, 95, 108),
            slider_fill: Color::rgb(90, 130, 190),

            matrix_cell_bg: Color::rgb(44, 48, 56),
            matrix_cell_fg: Color::rgb(210, 212, 218),
            matrix_selection: Color::rgb(200, 160, 60),

            scrollbar_track: Color::rgb(40, 42, 50),
            scrollbar_thumb: Color::rgb(100, 105, 118),

            content_placeholder: Color::rgb(38, 40, 48),

            taskbar_bg: Color::rgb(24, 26, 30),
            taskbar_button_bg: Color::rgb(52, 56, 66),
            taskbar_button_fg: Color::rgb(220, 222, 228),
            menu_bg: Color::rgb(36, 38, 46),
            menu_fg: Color::rgb(220, 222, 228),
            menu_section_fg: Color::rgb(150, 154, 164),

            header_font: "bold 13px sans-serif".to_string(),
            label_font: "12px sans-serif".to_string(),
            small_font: "10px sans-serif".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_has_distinct_hover_states() {
        let theme = Theme::default();
        assert_ne!(theme.button_bg, theme.button_hover_bg);
        assert!(!theme.label_font.is_empty());
    }
}
