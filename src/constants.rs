//! Shared crate-wide constants.

/// Height of a window header band, in viewport units. Minimized windows
/// collapse to exactly this height.
pub const HEADER_HEIGHT: f32 = 22.0;

/// Inner padding between a window border and its widget stack.
pub const WINDOW_PADDING: f32 = 8.0;

/// Squared distance a pointer must travel from its press point before a
/// header drag actually moves the window. Keeps a plain click on the header
/// from jittering the position.
pub const MOVE_THRESHOLD_SQ: f32 = 25.0;

/// Squared distance before the fallback pan gesture commits. Same idea as
/// [`MOVE_THRESHOLD_SQ`] but for the empty-surface camera collaborator.
pub const PAN_THRESHOLD_SQ: f32 = 25.0;

/// Edge length of the square resize hot-zone anchored at a window's
/// bottom-right corner.
pub const RESIZE_HOTZONE: f32 = 12.0;

/// Width reserved for the vertical scrollbar when window content overflows.
pub const SCROLLBAR_WIDTH: f32 = 10.0;

/// Minimum scrollbar thumb height so it stays grabbable for very long
/// content.
pub const SCROLLBAR_MIN_THUMB: f32 = 16.0;

/// Width of one header control button. The strip holds four of them
/// (eye, maximize, minimize, close) flush against the right edge.
pub const HEADER_BUTTON_WIDTH: f32 = 18.0;

/// Number of buttons in the header control strip.
pub const HEADER_BUTTON_COUNT: usize = 4;

/// Vertical gap after a widget, keyed by the preceding widget's kind:
/// sections sit flush against what follows, text stays compact, everything
/// else gets the regular gap.
pub const SPACING_AFTER_SECTION: f32 = 0.0;
pub const SPACING_AFTER_TEXT: f32 = 4.0;
pub const SPACING_DEFAULT: f32 = 8.0;

/// Smallest size a user resize may shrink a window to.
pub const MIN_WINDOW_WIDTH: f32 = 80.0;
pub const MIN_WINDOW_HEIGHT: f32 = 60.0;

/// Fraction of the viewport height an auto-sized window may occupy before
/// its content scrolls instead of growing further.
pub const AUTO_HEIGHT_BUDGET: f32 = 0.8;

/// Line height used by text blocks and widget labels.
pub const LINE_HEIGHT: f32 = 14.0;

/// Fixed allowance for a slider's numeric value readout, and the shortest
/// track that still drags usefully. A slider's minimum width is
/// `label + SLIDER_VALUE_ALLOWANCE + SLIDER_TRACK_MIN`.
pub const SLIDER_VALUE_ALLOWANCE: f32 = 48.0;
pub const SLIDER_TRACK_MIN: f32 = 60.0;

/// Matrix cell edge length and the gap between cells.
pub const MATRIX_CELL: f32 = 26.0;
pub const MATRIX_GAP: f32 = 2.0;

/// Height of the taskbar strip along the bottom viewport edge.
pub const TASKBAR_HEIGHT: f32 = 26.0;

/// Per-row height inside the taskbar popup menu.
pub const TASKBAR_MENU_ROW: f32 = 18.0;
