//! Desktop shell UI composition and interaction surfaces.

mod window;

use leptos::*;
use window_manager::{
    Interaction, PointerPosition, ResizeEdge, Transition, WindowAction, WindowFrame, WindowId,
};

use self::window::DesktopWindow;
use crate::{
    apps::open_request_for_app,
    host,
    runtime_context::{use_desktop_runtime, DesktopRuntimeContext, DesktopWindowManager},
};

/// Every resize handle rendered around a window frame.
const RESIZE_EDGES: [ResizeEdge; 8] = [
    ResizeEdge::North,
    ResizeEdge::South,
    ResizeEdge::East,
    ResizeEdge::West,
    ResizeEdge::NorthEast,
    ResizeEdge::NorthWest,
    ResizeEdge::SouthEast,
    ResizeEdge::SouthWest,
];

#[derive(Debug, Clone, PartialEq, Eq)]
struct WindowViewState {
    title: String,
    frame: WindowFrame,
    is_active: bool,
    is_maximized: bool,
    is_minimized: bool,
    transition: Option<Transition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct WindowListEntryState {
    title: String,
    is_active: bool,
    is_minimized: bool,
}

/// Window ids in creation order. Minimized windows stay mounted so app views keep their state.
fn window_ids(manager: &DesktopWindowManager) -> Vec<WindowId> {
    manager.windows().iter().map(|window| window.id.clone()).collect()
}

fn window_view_state(manager: &DesktopWindowManager, window_id: &WindowId) -> Option<WindowViewState> {
    let window = manager.window(window_id)?;
    Some(WindowViewState {
        title: window.title.clone(),
        frame: manager.frame(window_id)?,
        is_active: window.is_active,
        is_maximized: window.is_maximized,
        is_minimized: window.is_minimized,
        transition: window.transition,
    })
}

fn window_list_entry(
    manager: &DesktopWindowManager,
    window_id: &WindowId,
) -> Option<WindowListEntryState> {
    manager.window(window_id).map(|window| WindowListEntryState {
        title: window.title.clone(),
        is_active: window.is_active,
        is_minimized: window.is_minimized,
    })
}

fn frame_style(frame: WindowFrame) -> String {
    format!(
        "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
        frame.rect.x, frame.rect.y, frame.rect.w, frame.rect.h, frame.z_index
    )
}

fn window_class(state: &WindowViewState) -> String {
    let mut class = String::from("desktop-window");
    if state.is_active {
        class.push_str(" active");
    }
    if state.is_maximized {
        class.push_str(" maximized");
    }
    if state.is_minimized {
        class.push_str(" minimized");
    }
    if let Some(transition) = state.transition {
        class.push(' ');
        class.push_str(transition.as_str());
    }
    class
}

fn window_list_entry_class(entry: &WindowListEntryState) -> &'static str {
    match (entry.is_active, entry.is_minimized) {
        (true, _) => "window-list-entry active",
        (false, true) => "window-list-entry minimized",
        (false, false) => "window-list-entry",
    }
}

fn resize_edge_class(edge: ResizeEdge) -> &'static str {
    match edge {
        ResizeEdge::North => "edge-n",
        ResizeEdge::South => "edge-s",
        ResizeEdge::East => "edge-e",
        ResizeEdge::West => "edge-w",
        ResizeEdge::NorthEast => "edge-ne",
        ResizeEdge::NorthWest => "edge-nw",
        ResizeEdge::SouthEast => "edge-se",
        ResizeEdge::SouthWest => "edge-sw",
    }
}

fn stop_pointer_event(ev: &web_sys::PointerEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

/// Primary button for mice, primary contact for touch and pen.
fn is_primary_pointer(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

fn end_active_pointer_interaction(runtime: DesktopRuntimeContext) {
    let interaction = runtime
        .manager
        .with_untracked(|wm| wm.interaction().cloned());
    match interaction {
        Some(Interaction::Drag(_)) => runtime.dispatch_action(WindowAction::EndDrag),
        Some(Interaction::Resize(_)) => runtime.dispatch_action(WindowAction::EndResize),
        None => {}
    }
}

#[component]
/// Renders the window layer and window list, routing pointer and viewport events to the manager.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let manager = runtime.manager;

    runtime.dispatch_action(WindowAction::SetViewport {
        viewport: host::desktop_viewport(),
    });
    let resize_listener = window_event_listener(ev::resize, move |_| {
        runtime.dispatch_action(WindowAction::SetViewport {
            viewport: host::desktop_viewport(),
        });
    });
    on_cleanup(move || resize_listener.remove());

    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        let pointer = pointer_from_pointer_event(&ev);
        let dragging = manager.with_untracked(|wm| {
            wm.interaction()
                .map(|interaction| matches!(interaction, Interaction::Drag(_)))
        });
        match dragging {
            Some(true) => runtime.dispatch_action(WindowAction::UpdateDrag { pointer }),
            Some(false) => runtime.dispatch_action(WindowAction::UpdateResize { pointer }),
            None => {}
        }
    };
    let on_pointer_up = move |_: web_sys::PointerEvent| end_active_pointer_interaction(runtime);
    let on_pointer_cancel =
        move |_: web_sys::PointerEvent| runtime.dispatch_action(WindowAction::CancelInteraction);

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            tabindex="-1"
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_up
            on:pointercancel=on_pointer_cancel
        >
            <div class="desktop-window-layer">
                <For
                    each=move || manager.with(window_ids)
                    key=|window_id| window_id.clone()
                    let:window_id
                >
                    <DesktopWindow window_id=window_id />
                </For>
            </div>
            <WindowList />
        </div>
    }
}

#[component]
fn WindowList() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let manager = runtime.manager;
    let launchers = runtime.registry.with_value(|registry| registry.launchers());

    view! {
        <nav class="window-list" aria-label="Open windows">
            <div class="window-list-launchers" role="group" aria-label="Launch app">
                {launchers
                    .into_iter()
                    .map(|(app_id, title)| {
                        let launch = move |_: web_sys::MouseEvent| {
                            let now_ms = manager.with_untracked(|wm| wm.now_ms());
                            let request = runtime.registry.with_value(|registry| {
                                open_request_for_app(
                                    registry.as_ref(),
                                    &app_id,
                                    now_ms,
                                    serde_json::Value::Null,
                                )
                            });
                            runtime.dispatch_action(WindowAction::Open(request));
                        };
                        view! {
                            <button type="button" class="window-list-launcher" on:click=launch>
                                {title}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            <For
                each=move || manager.with(window_ids)
                key=|window_id| window_id.clone()
                let:window_id
            >
                <WindowListEntry window_id=window_id />
            </For>
        </nav>
    }
}

#[component]
fn WindowListEntry(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let manager = runtime.manager;

    let entry_id = window_id.clone();
    let entry = Signal::derive(move || manager.with(|wm| window_list_entry(wm, &entry_id)));
    let toggle = move |_: web_sys::MouseEvent| {
        runtime.dispatch_action(WindowAction::ToggleFromTaskbar {
            window_id: window_id.clone(),
        });
    };

    view! {
        <button
            type="button"
            class=move || entry.get().map(|e| window_list_entry_class(&e)).unwrap_or("window-list-entry")
            aria-pressed=move || entry.get().map(|e| e.is_active).unwrap_or(false).to_string()
            on:click=toggle
        >
            {move || entry.get().map(|e| e.title).unwrap_or_default()}
        </button>
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use pretty_assertions::assert_eq;
    use window_manager::{
        reduce_window_manager, ManualClock, OpenWindowRequest, Rect, WindowManagerConfig,
    };

    use super::*;
    use crate::apps::AppContent;

    fn manager() -> DesktopWindowManager {
        let mut wm = DesktopWindowManager::with_clock(
            WindowManagerConfig::default(),
            Rc::new(ManualClock::new(0)),
        );
        for raw in ["notepad-1", "calc-2"] {
            wm.open(OpenWindowRequest::new(raw, raw, AppContent::new("notepad")));
        }
        wm
    }

    #[test]
    fn minimized_windows_stay_mounted_but_hidden() {
        let mut wm = manager();
        let notepad = WindowId::new("notepad-1");
        wm.minimize(&notepad);

        assert_eq!(window_ids(&wm), vec![notepad.clone(), WindowId::new("calc-2")]);
        let state = window_view_state(&wm, &notepad).expect("open");
        assert_eq!(window_class(&state), "desktop-window minimized minimizing");
        let entry = window_list_entry(&wm, &notepad).expect("listed");
        assert_eq!(window_list_entry_class(&entry), "window-list-entry minimized");
    }

    #[test]
    fn view_state_reflects_flags_and_frame() {
        let mut wm = manager();
        let calc = WindowId::new("calc-2");
        wm.maximize(&calc);

        let state = window_view_state(&wm, &calc).expect("open");
        assert_eq!(window_class(&state), "desktop-window active maximized opening");
        assert_eq!(
            frame_style(state.frame),
            "left:0px;top:0px;width:1280px;height:752px;z-index:2;"
        );
    }

    #[test]
    fn dragged_window_is_styled_above_everything() {
        let mut wm = manager();
        let notepad = WindowId::new("notepad-1");
        wm.begin_drag(&notepad, PointerPosition::new(0, 0));
        wm.update_drag(PointerPosition::new(10, 5));

        let state = window_view_state(&wm, &notepad).expect("open");
        assert_eq!(
            state.frame,
            WindowFrame {
                rect: Rect { x: 110, y: 105, w: 640, h: 480 },
                z_index: 999,
            }
        );
        assert_eq!(window_view_state(&wm, &WindowId::new("gone")), None);
    }

    #[test]
    fn pressing_the_active_window_still_raises_it() {
        let mut wm = manager();
        let calc = WindowId::new("calc-2");
        let before = window_view_state(&wm, &calc).expect("open");
        assert!(before.is_active);

        let effects = reduce_window_manager(
            &mut wm,
            WindowAction::Focus {
                window_id: calc.clone(),
            },
        );
        let after = window_view_state(&wm, &calc).expect("open");
        assert_eq!(effects, Vec::new());
        assert_eq!(after.frame.z_index, before.frame.z_index + 1);
    }

    #[test]
    fn every_edge_gets_a_distinct_handle_class() {
        let mut classes: Vec<_> = RESIZE_EDGES.iter().map(|edge| resize_edge_class(*edge)).collect();
        classes.sort_unstable();
        classes.dedup();
        assert_eq!(classes.len(), RESIZE_EDGES.len());
    }
}
