//! App registry seam: the shell stores [`AppContent`] handles in the window manager and asks the
//! registry to render them. Nothing in the window manager looks at app content.

mod placeholders;

use leptos::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use window_manager::{OpenWindowRequest, WindowId};

pub use placeholders::demo_registry;

/// Opaque content handle stored on each window record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppContent {
    /// Registry key of the app that renders this window.
    pub app_id: String,
    /// Launch parameters forwarded to the app.
    #[serde(default)]
    pub params: Value,
}

impl AppContent {
    /// Creates a handle without launch parameters.
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            params: Value::Null,
        }
    }
}

/// Catalog of launchable apps and the views they render.
pub trait AppRegistry {
    /// Launchable apps as `(app_id, title)` pairs, in menu order.
    fn launchers(&self) -> Vec<(String, String)>;

    /// Display title for `app_id`.
    fn title(&self, app_id: &str) -> Option<String>;

    /// Renders the body of a window holding `content`.
    fn render(&self, content: &AppContent) -> View;
}

/// One statically registered app.
#[derive(Clone, Copy)]
pub struct AppEntry {
    /// Registry key.
    pub app_id: &'static str,
    /// Title used for new windows and launchers.
    pub title: &'static str,
    /// View factory.
    pub render: fn(&AppContent) -> View,
}

/// Registry backed by a fixed list of entries.
#[derive(Clone, Default)]
pub struct StaticAppRegistry {
    entries: Vec<AppEntry>,
}

impl StaticAppRegistry {
    /// Creates a registry from `entries`; later duplicates of an app id are ignored.
    pub fn new(entries: Vec<AppEntry>) -> Self {
        let mut unique: Vec<AppEntry> = Vec::with_capacity(entries.len());
        for entry in entries {
            if unique.iter().all(|known| known.app_id != entry.app_id) {
                unique.push(entry);
            }
        }
        Self { entries: unique }
    }

    fn entry(&self, app_id: &str) -> Option<&AppEntry> {
        self.entries.iter().find(|entry| entry.app_id == app_id)
    }
}

impl AppRegistry for StaticAppRegistry {
    fn launchers(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|entry| (entry.app_id.to_string(), entry.title.to_string()))
            .collect()
    }

    fn title(&self, app_id: &str) -> Option<String> {
        self.entry(app_id).map(|entry| entry.title.to_string())
    }

    fn render(&self, content: &AppContent) -> View {
        match self.entry(&content.app_id) {
            Some(entry) => (entry.render)(content),
            None => {
                let message = format!("No app is registered for `{}`.", content.app_id);
                view! { <p class="app-missing">{message}</p> }.into_view()
            }
        }
    }
}

/// Window id for a new instance of `app_id`, following the `appId-timestamp` convention.
pub fn window_id_for_app(app_id: &str, timestamp_ms: u64) -> WindowId {
    WindowId::new(format!("{app_id}-{timestamp_ms}"))
}

/// Builds an open request for a new instance of `app_id` with default placement.
pub fn open_request_for_app(
    registry: &dyn AppRegistry,
    app_id: &str,
    timestamp_ms: u64,
    params: Value,
) -> OpenWindowRequest<AppContent> {
    let title = registry
        .title(app_id)
        .unwrap_or_else(|| app_id.to_string());
    OpenWindowRequest::new(
        window_id_for_app(app_id, timestamp_ms),
        title,
        AppContent {
            app_id: app_id.to_string(),
            params,
        },
    )
}
