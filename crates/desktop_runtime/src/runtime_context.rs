//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived window manager signal, the runtime effect queue and the app
//! registry. UI composition stays in [`crate::components`].

use std::rc::Rc;

use leptos::*;
use window_manager::{
    reduce_window_manager, RuntimeEffect, WindowAction, WindowManager, WindowManagerConfig,
};

use crate::{apps::AppContent, apps::AppRegistry, effect_executor};

/// Manager type hosted by the shell.
pub type DesktopWindowManager = WindowManager<AppContent>;

#[derive(Clone, Copy)]
/// Leptos context for reading window state and dispatching [`WindowAction`] values.
pub struct DesktopRuntimeContext {
    /// Reactive window manager.
    pub manager: RwSignal<DesktopWindowManager>,
    /// Queue of runtime effects emitted by the reducer and drained by the effect executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// App catalog used to title and render windows.
    pub registry: StoredValue<Rc<dyn AppRegistry>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<WindowAction<AppContent>>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: WindowAction<AppContent>) {
        self.dispatch.call(action);
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components.
pub fn DesktopProvider(
    /// App catalog assembled by the entry layer.
    registry: Rc<dyn AppRegistry>,
    /// Window manager tunables; defaults apply when omitted.
    #[prop(optional)]
    config: Option<WindowManagerConfig>,
    children: Children,
) -> impl IntoView {
    let manager = create_rw_signal(DesktopWindowManager::new(config.unwrap_or_default()));
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());
    let registry = store_value(registry);

    let dispatch = Callback::new(move |action: WindowAction<AppContent>| {
        let new_effects = manager
            .try_update(|wm| reduce_window_manager(wm, action))
            .unwrap_or_default();
        if !new_effects.is_empty() {
            effects.update(|queue| queue.extend(new_effects));
        }
    });

    let runtime = DesktopRuntimeContext {
        manager,
        effects,
        registry,
        dispatch,
    };

    provide_context(runtime);
    effect_executor::install(runtime);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
