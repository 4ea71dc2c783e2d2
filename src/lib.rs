//! Inline title-bar chrome for a host workbench application.
//!
//! The host's own layout classes stay in charge; this crate layers a fixed
//! set of behavioral overrides over them (via [`hooks`]) and keeps the
//! visually-coupled chrome regions consistent: the traffic-light
//! reservation, the activity-bar vertical offset, the sidebar title height,
//! tab-strip left padding, and the trailing drag region. [`chrome::TitleBarChrome`]
//! is the coordinator; [`workbench`] models the hookable slice of the host
//! object graph, and [`host`] declares the narrow service interfaces the
//! host supplies.
//!
//! Everything runs on the host UI thread; the only deferred work is a
//! single-shot task per drag region, drained by the host each turn via
//! [`defer::DeferQueue`].

pub mod chrome;
pub mod config;
pub mod defer;
pub mod element;
pub mod geometry;
pub mod hooks;
pub mod host;
pub mod style;
pub mod workbench;

pub use chrome::TitleBarChrome;
pub use hooks::HookError;
