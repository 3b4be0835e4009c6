use std::rc::Rc;

use desktop_runtime::{demo_registry, AppRegistry, DesktopProvider, DesktopShell};
use leptos::*;
use leptos_meta::*;
use window_manager::WindowManagerConfig;

const DESKTOP_CONFIG_TOML: &str = include_str!("../desktop.toml");

/// Window manager configuration bundled with the site, or the defaults when it does not load.
pub fn desktop_config() -> WindowManagerConfig {
    match WindowManagerConfig::from_toml_str(DESKTOP_CONFIG_TOML) {
        Ok(config) => config,
        Err(err) => {
            logging::warn!("desktop.toml rejected, using defaults: {err}");
            WindowManagerConfig::default()
        }
    }
}

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Browser Desktop" />
        <Meta name="description" content="Draggable, resizable windows in the browser." />

        <main class="site-root">
            <DesktopEntry />
        </main>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    let registry: Rc<dyn AppRegistry> = Rc::new(demo_registry());

    view! {
        <DesktopProvider registry=registry config=desktop_config()>
            <DesktopShell />
        </DesktopProvider>
    }
}
