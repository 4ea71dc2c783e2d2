//! Narrow interfaces onto the host application's services.
//!
//! The chrome layer only ever performs point lookups and one-shot requests
//! against these; their implementations belong to the host. Tests substitute
//! small hand-built fakes.

use std::rc::Rc;

/// A paintable color value, as produced by the host's color-resolution
/// subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Color token painted behind the traffic lights and onto the inline title
/// area. Registered with the host at install time; resolves with a
/// sidebar-background fallback.
pub const INLINE_TITLE_BAR_BACKGROUND: &str = "inlineTitleBar.background";
pub const SIDE_BAR_BACKGROUND: &str = "sideBar.background";
pub const ACTIVITY_BAR_BACKGROUND: &str = "activityBar.background";
pub const STATUS_BAR_BACKGROUND: &str = "statusBar.background";

/// Point lookups into the host configuration store.
pub trait ConfigurationStore {
    fn lookup(&self, key: &str) -> Option<String>;
}

/// Display and zoom state, plus change notifications. Observers are invoked
/// on the UI thread whenever the corresponding state flips.
pub trait DisplayInfo {
    /// Current zoom factor; a positive real. Values below the supported
    /// minimum are clamped by the geometry layer.
    fn zoom_factor(&self) -> f64;

    fn is_fullscreen(&self) -> bool;

    fn on_zoom_changed(&self, observer: Rc<dyn Fn()>);

    fn on_fullscreen_changed(&self, observer: Rc<dyn Fn()>);
}

/// Outbound requests to the native window host.
pub trait NativeHostBridge {
    /// Replicates the native title-bar double-click (zoom/maximize) behavior
    /// from a custom element.
    fn handle_title_double_click(&self);
}

/// The host's theming subsystem.
pub trait ColorResolver {
    fn resolve(&self, token: &str) -> Option<Rgb>;

    /// Announce a token this layer will resolve. Hosts without a dynamic
    /// registry may ignore this.
    fn register_token(&self, _token: &str) {}
}

/// The bundle of host services the chrome layer is constructed over.
#[derive(Clone)]
pub struct HostServices {
    pub config: Rc<dyn ConfigurationStore>,
    pub display: Rc<dyn DisplayInfo>,
    pub native: Rc<dyn NativeHostBridge>,
    pub colors: Rc<dyn ColorResolver>,
}
