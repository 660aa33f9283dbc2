//! Stacking layout engine.
//!
//! Pure: given a widget list and a sizing context, produce the vertical
//! stack and its total content height. No side effects, safe to call every
//! frame; windows cache the result behind a dirty flag and only bypass the
//! cache while a dynamic widget is present.

use crate::constants::{
    SPACING_AFTER_SECTION, SPACING_AFTER_TEXT, SPACING_DEFAULT, WINDOW_PADDING,
};
use crate::widget::{MeasureCtx, Widget, WidgetKind};

/// One computed stack entry. `offset` is window-relative (from the window's
/// top edge); `index` points into the window's widget list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEntry {
    pub index: usize,
    pub offset: f32,
    pub height: f32,
}

/// Gap inserted after a widget of `kind`: dividers hug the content below
/// them, text stays compact, everything else gets the regular spacing.
pub fn spacing_after(kind: WidgetKind) -> f32 {
    match kind {
        WidgetKind::Section => SPACING_AFTER_SECTION,
        WidgetKind::Text => SPACING_AFTER_TEXT,
        _ => SPACING_DEFAULT,
    }
}

/// Stack `widgets` top to bottom starting at `top` (header plus padding).
/// Returns the entries and the content height measured from `top` minus the
/// header — i.e. how much vertical room the content band needs, including
/// bottom padding.
pub fn stack_layout(
    widgets: &[Widget],
    ctx: &MeasureCtx<'_>,
    top: f32,
) -> (Vec<LayoutEntry>, f32) {
    let mut entries = Vec::with_capacity(widgets.len());
    let mut cursor = top;
    for (index, widget) in widgets.iter().enumerate() {
        let height = widget.height(ctx);
        entries.push(LayoutEntry {
            index,
            offset: cursor,
            height,
        });
        cursor += height;
        if index + 1 < widgets.len() {
            cursor += spacing_after(widget.kind());
        }
    }
    let content_height = if entries.is_empty() {
        WINDOW_PADDING
    } else {
        cursor + WINDOW_PADDING - (top - WINDOW_PADDING)
    };
    (entries, content_height)
}
