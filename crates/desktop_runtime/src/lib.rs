//! Leptos desktop shell rendering the [`window_manager`] model in the browser.

pub mod apps;
pub mod components;
mod effect_executor;
mod host;
pub mod runtime_context;

pub use apps::{
    demo_registry, open_request_for_app, window_id_for_app, AppContent, AppEntry, AppRegistry,
    StaticAppRegistry,
};
pub use components::DesktopShell;
pub use runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};
