use super::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let manager = runtime.manager;
    let dom_id = host::window_dom_id(&window_id);
    let id = store_value(window_id);

    let state = Signal::derive(move || {
        manager.with(|wm| id.with_value(|window_id| window_view_state(wm, window_id)))
    });

    // Pressing an active window still raises it.
    let focus = move |_: web_sys::PointerEvent| {
        runtime.dispatch_action(WindowAction::Focus {
            window_id: id.get_value(),
        });
    };
    let minimize = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        runtime.dispatch_action(WindowAction::Minimize {
            window_id: id.get_value(),
        });
    };
    let toggle_maximize = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        runtime.dispatch_action(WindowAction::Maximize {
            window_id: id.get_value(),
        });
    };
    let close = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        runtime.dispatch_action(WindowAction::Close {
            window_id: id.get_value(),
        });
    };
    let begin_drag = move |ev: web_sys::PointerEvent| {
        if !is_primary_pointer(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        stop_pointer_event(&ev);
        runtime.dispatch_action(WindowAction::BeginDrag {
            window_id: id.get_value(),
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    let is_maximized = move || state.with(|s| s.as_ref().is_some_and(|s| s.is_maximized));

    view! {
        <section
            id=dom_id
            class=move || state.with(|s| s.as_ref().map(window_class).unwrap_or_default())
            style=move || state.with(|s| s.as_ref().map(|s| frame_style(s.frame)).unwrap_or_default())
            role="dialog"
            tabindex="-1"
            aria-label=move || state.with(|s| s.as_ref().map(|s| s.title.clone()).unwrap_or_default())
            on:pointerdown=focus
        >
            <header class="titlebar" on:pointerdown=begin_drag on:dblclick=toggle_maximize>
                <span class="titlebar-title">
                    {move || state.with(|s| s.as_ref().map(|s| s.title.clone()).unwrap_or_default())}
                </span>
                <div class="titlebar-controls">
                    <button
                        type="button"
                        aria-label="Minimize window"
                        on:pointerdown=move |ev: web_sys::PointerEvent| stop_pointer_event(&ev)
                        on:click=minimize
                    >
                        "_"
                    </button>
                    <button
                        type="button"
                        aria-label=move || if is_maximized() { "Restore window" } else { "Maximize window" }
                        on:pointerdown=move |ev: web_sys::PointerEvent| stop_pointer_event(&ev)
                        on:click=toggle_maximize
                    >
                        {move || if is_maximized() { "❐" } else { "□" }}
                    </button>
                    <button
                        type="button"
                        aria-label="Close window"
                        on:pointerdown=move |ev: web_sys::PointerEvent| stop_pointer_event(&ev)
                        on:click=close
                    >
                        "×"
                    </button>
                </div>
            </header>
            <div class="window-body">
                <WindowBody window_id=id.get_value() />
            </div>
            // Handles stay mounted; the maximized class hides them.
            {RESIZE_EDGES
                .iter()
                .map(|edge| view! { <WindowResizeHandle window_id=id.get_value() edge=*edge /> })
                .collect_view()}
        </section>
    }
}

#[component]
fn WindowResizeHandle(window_id: WindowId, edge: ResizeEdge) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let class_name = format!("window-resize-handle {}", resize_edge_class(edge));
    let id = store_value(window_id);

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_pointer(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        stop_pointer_event(&ev);
        runtime.dispatch_action(WindowAction::BeginResize {
            window_id: id.get_value(),
            edge,
            pointer: pointer_from_pointer_event(&ev),
        });
    };

    view! {
        <div class=class_name aria-hidden="true" on:pointerdown=on_pointerdown />
    }
}

#[component]
fn WindowBody(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let contents = runtime
        .manager
        .with_untracked(|wm| wm.window(&window_id).map(|w| w.content.clone()))
        .map(|content| runtime.registry.with_value(|registry| registry.render(&content)))
        .unwrap_or_else(|| view! { <p>"Closed"</p> }.into_view());

    view! {
        <div class="window-body-content">
            {contents}
        </div>
    }
}
