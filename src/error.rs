//! Error types for the windowing core.
//!
//! Nothing at this layer is fatal: callers catch these, surface a diagnostic
//! through `tracing`, and keep the tick running. The worst outcome is an
//! inert or visually wrong control, never an aborted frame.

use thiserror::Error;

use crate::window::WindowId;

#[derive(Debug, Error)]
pub enum UiError {
    /// A widget was constructed without the getter/setter it needs for an
    /// operation. The control stays on screen but inert.
    #[error("missing binding for `{0}`")]
    MissingBinding(String),

    /// A bound callback reported failure. The frame continues; the widget
    /// simply did not commit its change.
    #[error("callback `{name}` failed: {reason}")]
    Callback { name: String, reason: String },

    /// A taskbar entry references a window that is no longer registered
    /// with the manager.
    #[error("window {0:?} is not registered")]
    UnknownWindow(WindowId),
}

impl UiError {
    pub fn callback(name: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Callback {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_are_stable() {
        let err = UiError::MissingBinding("slider:gravity".into());
        assert_eq!(err.to_string(), "missing binding for `slider:gravity`");

        let err = UiError::callback("reset", "domain rejected value");
        assert!(err.to_string().contains("reset"));
        assert!(err.to_string().contains("domain rejected value"));
    }
}
