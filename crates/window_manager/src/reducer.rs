//! Reducer actions and side-effect intents for hosts that drive the manager with events.

use crate::{
    manager::WindowManager,
    model::{OpenWindowRequest, PointerPosition, Position, ResizeEdge, Size, Viewport, WindowId},
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_window_manager`].
pub enum WindowAction<C> {
    /// Open a window, or focus it when the id is already open.
    Open(OpenWindowRequest<C>),
    /// Start closing a window.
    Close {
        /// Window to close.
        window_id: WindowId,
    },
    /// Focus and raise a window.
    Focus {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Toggle the minimized flag.
    Minimize {
        /// Window to minimize or restore.
        window_id: WindowId,
    },
    /// Toggle the maximized flag.
    Maximize {
        /// Window to maximize or restore.
        window_id: WindowId,
    },
    /// Taskbar click: restore and focus a minimized window, minimize the active one, focus any
    /// other.
    ToggleFromTaskbar {
        /// Window associated with the taskbar entry.
        window_id: WindowId,
    },
    /// Commit a window origin.
    UpdatePosition {
        /// Window to move.
        window_id: WindowId,
        /// New origin.
        position: Position,
    },
    /// Commit a window size.
    UpdateSize {
        /// Window to resize.
        window_id: WindowId,
        /// New size.
        size: Size,
    },
    /// Begin dragging a window by its header.
    BeginDrag {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Update an in-progress drag.
    UpdateDrag {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active drag and commit its position.
    EndDrag,
    /// Begin resizing a window.
    BeginResize {
        /// Window being resized.
        window_id: WindowId,
        /// Edge or corner being dragged.
        edge: ResizeEdge,
        /// Pointer position at resize start.
        pointer: PointerPosition,
    },
    /// Update an in-progress resize.
    UpdateResize {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active resize.
    EndResize,
    /// Drop the active interaction without committing.
    CancelInteraction,
    /// Record a new surface size.
    SetViewport {
        /// Surface reported by the host.
        viewport: Viewport,
    },
    /// Apply every lifecycle timer that is due.
    RunDueTimers,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_window_manager`] for the host to execute.
pub enum RuntimeEffect {
    /// Wake the manager with [`WindowAction::RunDueTimers`] after `delay_ms`.
    ScheduleWake {
        /// Milliseconds until the earliest pending timer is due.
        delay_ms: u64,
    },
    /// Move keyboard focus into the newly focused window.
    FocusWindowInput(WindowId),
    /// A window finished closing and left the collection.
    WindowDestroyed(WindowId),
}

/// Applies `action` to `manager` and collects the resulting side effects.
///
/// Unknown window ids never fail; they simply produce no effects.
pub fn reduce_window_manager<C>(
    manager: &mut WindowManager<C>,
    action: WindowAction<C>,
) -> Vec<RuntimeEffect> {
    let mut effects = Vec::new();
    let due_before = manager.next_timer_due_ms();
    // Every wake re-arms while a timer is still pending, even one that fired early.
    let consumes_wake = matches!(action, WindowAction::RunDueTimers);
    let active_before = manager.active_window_id().cloned();

    match action {
        WindowAction::Open(request) => {
            manager.open(request);
        }
        WindowAction::Close { window_id } => {
            manager.close(&window_id);
        }
        WindowAction::Focus { window_id } => {
            if manager.focus(&window_id) {
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        WindowAction::Minimize { window_id } => {
            manager.minimize(&window_id);
        }
        WindowAction::Maximize { window_id } => {
            manager.maximize(&window_id);
        }
        WindowAction::ToggleFromTaskbar { window_id } => {
            let Some((is_minimized, is_active)) = manager
                .window(&window_id)
                .map(|w| (w.is_minimized, w.is_active))
            else {
                return effects;
            };
            if is_minimized {
                manager.minimize(&window_id);
                manager.focus(&window_id);
            } else if is_active {
                manager.minimize(&window_id);
            } else {
                manager.focus(&window_id);
            }
        }
        WindowAction::UpdatePosition {
            window_id,
            position,
        } => {
            manager.update_position(&window_id, position);
        }
        WindowAction::UpdateSize { window_id, size } => {
            manager.update_size(&window_id, size);
        }
        WindowAction::BeginDrag { window_id, pointer } => {
            manager.begin_drag(&window_id, pointer);
        }
        WindowAction::UpdateDrag { pointer } => {
            manager.update_drag(pointer);
        }
        WindowAction::EndDrag => {
            manager.end_drag();
        }
        WindowAction::BeginResize {
            window_id,
            edge,
            pointer,
        } => {
            manager.begin_resize(&window_id, edge, pointer);
        }
        WindowAction::UpdateResize { pointer } => {
            manager.update_resize(pointer);
        }
        WindowAction::EndResize => {
            manager.end_resize();
        }
        WindowAction::CancelInteraction => {
            manager.cancel_interaction();
        }
        WindowAction::SetViewport { viewport } => {
            manager.set_viewport(viewport);
        }
        WindowAction::RunDueTimers => {
            effects.extend(
                manager
                    .run_due_timers()
                    .into_iter()
                    .map(RuntimeEffect::WindowDestroyed),
            );
        }
    }

    let active_after = manager.active_window_id().cloned();
    if active_after != active_before {
        if let Some(window_id) = active_after {
            if !effects.contains(&RuntimeEffect::FocusWindowInput(window_id.clone())) {
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
    }

    let due_after = manager.next_timer_due_ms();
    if due_after != due_before || consumes_wake {
        if let Some(due_at_ms) = due_after {
            effects.push(RuntimeEffect::ScheduleWake {
                delay_ms: due_at_ms.saturating_sub(manager.now_ms()),
            });
        }
    }

    effects
}
