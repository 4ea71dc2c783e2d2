//! Read-only layout-mode projections of host configuration.
//!
//! These are re-read on every recomputation rather than cached; the host owns
//! the store and may change values at any time. Unknown values fall back to
//! the defaults the host itself would apply.

use crate::host::ConfigurationStore;

pub const TITLE_BAR_MODE_KEY: &str = "chrome.titleBar";
pub const ACTIVITY_BAR_MODE_KEY: &str = "chrome.activityBar";
pub const STATUS_BAR_POSITION_KEY: &str = "chrome.statusBarPosition";

/// Title-bar placement. Customization only activates for the inline and
/// frameless modes; `Native` leaves the host untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitleBarMode {
    #[default]
    Native,
    Inline,
    Frameless,
}

/// Activity-bar orientation. `Wide` is a sub-mode of vertical; `Bottom` never
/// counts as vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityBarMode {
    #[default]
    Narrow,
    Wide,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusBarPosition {
    Top,
    #[default]
    Bottom,
}

/// Sidebar placement relative to the editor area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Left,
    Right,
}

pub fn title_bar_mode(config: &dyn ConfigurationStore) -> TitleBarMode {
    match config.lookup(TITLE_BAR_MODE_KEY).as_deref() {
        Some("inline") => TitleBarMode::Inline,
        Some("frameless") => TitleBarMode::Frameless,
        _ => TitleBarMode::Native,
    }
}

pub fn activity_bar_mode(config: &dyn ConfigurationStore) -> ActivityBarMode {
    match config.lookup(ACTIVITY_BAR_MODE_KEY).as_deref() {
        Some("wide") => ActivityBarMode::Wide,
        Some("bottom") => ActivityBarMode::Bottom,
        _ => ActivityBarMode::Narrow,
    }
}

pub fn status_bar_position(config: &dyn ConfigurationStore) -> StatusBarPosition {
    match config.lookup(STATUS_BAR_POSITION_KEY).as_deref() {
        Some("top") => StatusBarPosition::Top,
        _ => StatusBarPosition::Bottom,
    }
}
