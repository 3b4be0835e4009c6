//! Browser-side execution of reducer effects and viewport queries.

#[cfg(target_arch = "wasm32")]
use std::time::Duration;

use leptos::logging;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use window_manager::WindowAction;
use window_manager::{RuntimeEffect, Viewport, WindowId};

use crate::runtime_context::DesktopRuntimeContext;

const FALLBACK_VIEWPORT: Viewport = Viewport::new(1024, 768);

/// Executes one reducer effect.
pub(crate) fn run_runtime_effect(runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
    match effect {
        RuntimeEffect::ScheduleWake { delay_ms } => schedule_wake(runtime, delay_ms),
        RuntimeEffect::FocusWindowInput(window_id) => focus_window_input(&window_id),
        RuntimeEffect::WindowDestroyed(window_id) => {
            logging::log!("window `{window_id}` destroyed");
        }
    }
}

/// Wakes the manager once the earliest lifecycle timer is due.
///
/// The timeout belongs to the runtime rather than to any window component, so a window that
/// unmounts before its closing animation ends is still removed.
fn schedule_wake(runtime: DesktopRuntimeContext, delay_ms: u64) {
    #[cfg(target_arch = "wasm32")]
    {
        leptos::set_timeout(
            move || runtime.dispatch_action(WindowAction::RunDueTimers),
            Duration::from_millis(delay_ms),
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = runtime;
        logging::warn!("no browser timer available for a lifecycle wake in {delay_ms}ms");
    }
}

/// DOM id of the element wrapping a window.
pub(crate) fn window_dom_id(window_id: &WindowId) -> String {
    format!("desktop-window-{window_id}")
}

fn focus_window_input(window_id: &WindowId) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(element) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(&window_dom_id(window_id)))
        else {
            return;
        };
        if let Ok(element) = element.dyn_into::<web_sys::HtmlElement>() {
            let _ = element.focus();
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = window_id;
}

/// Returns the full browser viewport; the taskbar strip is reserved by the window manager config.
pub(crate) fn desktop_viewport() -> Viewport {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let width = window
                .inner_width()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(FALLBACK_VIEWPORT.width);
            let height = window
                .inner_height()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(FALLBACK_VIEWPORT.height);

            return Viewport::new(width.max(320), height.max(240));
        }
    }

    FALLBACK_VIEWPORT
}
