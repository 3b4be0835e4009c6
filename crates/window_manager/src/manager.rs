//! Authoritative window collection, stacking counter and lifecycle operations.
//!
//! Every operation is total: an id that is not (or no longer) open is ignored. The geometry
//! engine and the animation sequencer only propose values; this module is the only writer of
//! the collection and of the stacking counter.

use std::rc::Rc;

use crate::{
    animation::AnimationSequencer,
    clock::{Clock, SystemClock},
    config::WindowManagerConfig,
    geometry,
    model::{
        DragSession, Interaction, OpenWindowRequest, PointerPosition, Position, Rect, ResizeEdge,
        ResizeSession, Size, Transition, Viewport, WindowFrame, WindowId, WindowRecord,
    },
};

/// Owner of all open windows for one desktop surface.
#[derive(Debug)]
pub struct WindowManager<C> {
    config: WindowManagerConfig,
    clock: Rc<dyn Clock>,
    windows: Vec<WindowRecord<C>>,
    next_z_index: u32,
    viewport: Viewport,
    interaction: Option<Interaction>,
    sequencer: AnimationSequencer,
}

impl<C> Default for WindowManager<C> {
    fn default() -> Self {
        Self::new(WindowManagerConfig::default())
    }
}

impl<C> WindowManager<C> {
    /// Creates an empty manager driven by the wall clock.
    pub fn new(config: WindowManagerConfig) -> Self {
        Self::with_clock(config, Rc::new(SystemClock))
    }

    /// Creates an empty manager driven by `clock`.
    pub fn with_clock(config: WindowManagerConfig, clock: Rc<dyn Clock>) -> Self {
        Self {
            next_z_index: config.initial_z_index,
            viewport: config.default_viewport,
            sequencer: AnimationSequencer::new(config.transition_ms),
            windows: Vec::new(),
            interaction: None,
            clock,
            config,
        }
    }

    /// Opens a window, or focuses the existing one when `request.id` is already open.
    ///
    /// Returns `true` when a new record was created.
    pub fn open(&mut self, request: OpenWindowRequest<C>) -> bool {
        if self.contains(&request.id) {
            tracing::debug!(window = %request.id, "window already open; focusing instead");
            self.focus(&request.id);
            return false;
        }

        let OpenWindowRequest {
            id,
            title,
            content,
            options,
        } = request;

        let open_count = i32::try_from(self.windows.len()).unwrap_or(i32::MAX);
        let cascade = self
            .config
            .cascade_origin
            .saturating_add(self.config.cascade_step.saturating_mul(open_count));
        let (position, size) = geometry::clamp_initial_placement(
            options
                .position
                .unwrap_or_else(|| Position::new(cascade, cascade)),
            options.size.unwrap_or(self.config.default_size),
            self.viewport,
            &self.config,
        );

        let z_index = self.take_z_index();
        for window in &mut self.windows {
            window.is_active = false;
        }
        let transition = self
            .sequencer
            .start(&id, Transition::Opening, self.clock.now_ms())
            .map(|_| Transition::Opening);

        tracing::trace!(window = %id, x = position.x, y = position.y, z_index, "window opened");
        self.windows.push(WindowRecord {
            id,
            title,
            content,
            position,
            size,
            is_maximized: options.is_maximized,
            is_minimized: false,
            z_index,
            is_active: true,
            transition,
        });
        true
    }

    /// Starts the closing transition. The record stays queryable until its timer fires.
    pub fn close(&mut self, id: &WindowId) -> bool {
        let Some(index) = self.index_of(id) else {
            tracing::debug!(window = %id, "close ignored for unknown window");
            return false;
        };
        if self.windows[index].is_closing() {
            return false;
        }

        self.drop_interaction_for(id);
        self.set_transition(index, Transition::Closing);
        true
    }

    /// Activates `id` and raises it to the top of the stack, even when it is already active.
    ///
    /// Minimized and unknown windows are ignored.
    pub fn focus(&mut self, id: &WindowId) -> bool {
        let Some(index) = self.index_of(id) else {
            tracing::debug!(window = %id, "focus ignored for unknown window");
            return false;
        };
        if self.windows[index].is_minimized {
            tracing::debug!(window = %id, "focus ignored for minimized window");
            return false;
        }

        let z_index = self.take_z_index();
        for (idx, window) in self.windows.iter_mut().enumerate() {
            window.is_active = idx == index;
        }
        self.windows[index].z_index = z_index;
        true
    }

    /// Toggles the minimized flag.
    ///
    /// Minimizing clears focus. Restoring focuses the window only when
    /// [`WindowManagerConfig::restore_focuses`] is set.
    pub fn minimize(&mut self, id: &WindowId) -> bool {
        let Some(index) = self.index_of(id) else {
            tracing::debug!(window = %id, "minimize ignored for unknown window");
            return false;
        };

        let window = &mut self.windows[index];
        if window.is_minimized {
            window.is_minimized = false;
            self.set_transition(index, Transition::Reopening);
            if self.config.restore_focuses {
                self.focus(id);
            }
        } else {
            window.is_minimized = true;
            window.is_active = false;
            self.drop_interaction_for(id);
            self.set_transition(index, Transition::Minimizing);
        }
        true
    }

    /// Toggles the maximized flag. Committed geometry, stacking and focus are untouched.
    pub fn maximize(&mut self, id: &WindowId) -> bool {
        let Some(index) = self.index_of(id) else {
            tracing::debug!(window = %id, "maximize ignored for unknown window");
            return false;
        };

        let window = &mut self.windows[index];
        window.is_maximized = !window.is_maximized;
        if window.is_maximized {
            self.drop_interaction_for(id);
        }
        true
    }

    /// Commits a window origin.
    pub fn update_position(&mut self, id: &WindowId, position: Position) -> bool {
        let Some(window) = self.window_mut(id) else {
            tracing::debug!(window = %id, "position update ignored for unknown window");
            return false;
        };
        window.position = position;
        true
    }

    /// Commits a window size, raised to the configured minimum.
    pub fn update_size(&mut self, id: &WindowId, size: Size) -> bool {
        let min = self.config.min_size;
        let Some(window) = self.window_mut(id) else {
            tracing::debug!(window = %id, "size update ignored for unknown window");
            return false;
        };
        window.size = geometry::clamp_size(size, min);
        true
    }

    /// Records the surface reported by the host.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Starts a header drag: focuses the window and elevates it until the drag ends.
    ///
    /// The press focuses the window even when it cannot be dragged, such as when maximized.
    pub fn begin_drag(&mut self, id: &WindowId, pointer: PointerPosition) -> bool {
        self.focus(id);
        let Some(origin_start) = self.interactive_window(id).map(|w| w.position) else {
            return false;
        };

        self.interaction = Some(Interaction::Drag(DragSession {
            window_id: id.clone(),
            pointer_start: pointer,
            origin_start,
            live_position: origin_start,
        }));
        true
    }

    /// Moves the live drag position. Nothing is committed until [`Self::end_drag`].
    pub fn update_drag(&mut self, pointer: PointerPosition) -> bool {
        if !self.interaction_target_alive() {
            return false;
        }
        let Some(Interaction::Drag(session)) = self.interaction.as_mut() else {
            return false;
        };
        session.live_position =
            geometry::drag_position(session.origin_start, session.pointer_start, pointer);
        true
    }

    /// Commits the dragged position verbatim, shrinking the size if the window now overflows the
    /// right margin or the taskbar strip.
    pub fn end_drag(&mut self) -> bool {
        let session = match self.interaction.take() {
            Some(Interaction::Drag(session)) => session,
            other => {
                self.interaction = other;
                return false;
            }
        };
        let Some(size) = self.window(&session.window_id).map(|w| w.size) else {
            tracing::debug!(window = %session.window_id, "drag ended after window was removed");
            return false;
        };

        let position = session.live_position;
        let size = geometry::fit_size_after_drag(position, size, self.viewport, &self.config);
        self.update_position(&session.window_id, position);
        self.update_size(&session.window_id, size);
        true
    }

    /// Starts an edge/corner resize: focuses the window and elevates it until the resize ends.
    pub fn begin_resize(
        &mut self,
        id: &WindowId,
        edge: ResizeEdge,
        pointer: PointerPosition,
    ) -> bool {
        self.focus(id);
        let Some(rect_start) = self.interactive_window(id).map(WindowRecord::rect) else {
            return false;
        };

        self.interaction = Some(Interaction::Resize(ResizeSession {
            window_id: id.clone(),
            edge,
            pointer_start: pointer,
            rect_start,
        }));
        true
    }

    /// Applies one resize tick, committing both origin and size.
    pub fn update_resize(&mut self, pointer: PointerPosition) -> bool {
        if !self.interaction_target_alive() {
            return false;
        }
        let Some(Interaction::Resize(session)) = self.interaction.clone() else {
            return false;
        };

        let dx = pointer.x - session.pointer_start.x;
        let dy = pointer.y - session.pointer_start.y;
        let proposed = geometry::resize_rect(session.rect_start, session.edge, dx, dy);
        let rect = geometry::clamp_resize(
            session.rect_start,
            proposed,
            session.edge,
            self.viewport,
            &self.config,
        );
        self.update_position(&session.window_id, rect.position());
        self.update_size(&session.window_id, rect.size());
        true
    }

    /// Ends the active resize. Its geometry was already committed tick by tick.
    pub fn end_resize(&mut self) -> bool {
        match self.interaction.take() {
            Some(Interaction::Resize(_)) => true,
            other => {
                self.interaction = other;
                false
            }
        }
    }

    /// Abandons the active interaction without committing an uncommitted drag position.
    pub fn cancel_interaction(&mut self) -> bool {
        self.interaction.take().is_some()
    }

    /// Applies every lifecycle timer that is due and returns the ids of removed windows.
    pub fn run_due_timers(&mut self) -> Vec<WindowId> {
        let mut destroyed = Vec::new();
        for task in self.sequencer.take_due(self.clock.now_ms()) {
            let Some(index) = self.index_of(&task.window_id) else {
                tracing::debug!(
                    window = %task.window_id,
                    transition = task.transition.as_str(),
                    "timer fired for a window that is gone"
                );
                continue;
            };

            let window = &mut self.windows[index];
            if window.transition == Some(task.transition) {
                window.transition = None;
            }
            if task.transition == Transition::Closing {
                let removed = self.windows.remove(index);
                self.drop_interaction_for(&removed.id);
                tracing::trace!(window = %removed.id, "window destroyed");
                destroyed.push(removed.id);
            }
        }
        destroyed
    }

    /// All open windows in creation order, minimized and closing ones included.
    pub fn windows(&self) -> &[WindowRecord<C>] {
        &self.windows
    }

    /// Looks up a window.
    pub fn window(&self, id: &WindowId) -> Option<&WindowRecord<C>> {
        self.windows.iter().find(|w| &w.id == id)
    }

    /// Returns `true` when `id` is in the collection.
    pub fn contains(&self, id: &WindowId) -> bool {
        self.index_of(id).is_some()
    }

    /// Number of windows in the collection.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Returns `true` when no window is open.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Identifier of the focused window, if any.
    pub fn active_window_id(&self) -> Option<&WindowId> {
        self.windows.iter().find(|w| w.is_active).map(|w| &w.id)
    }

    /// Non-minimized windows back to front. Windows sharing a saturated z-index keep creation
    /// order.
    pub fn visible_windows(&self) -> Vec<&WindowRecord<C>> {
        let mut visible: Vec<_> = self.windows.iter().filter(|w| !w.is_minimized).collect();
        visible.sort_by_key(|w| w.z_index);
        visible
    }

    /// Geometry and stacking a renderer should use for `id` right now.
    pub fn frame(&self, id: &WindowId) -> Option<WindowFrame> {
        let window = self.window(id)?;
        let session = self
            .interaction
            .as_ref()
            .filter(|interaction| interaction.window_id() == id);

        let rect = if window.is_maximized {
            geometry::maximized_rect(self.viewport, &self.config)
        } else {
            match session {
                Some(Interaction::Drag(drag)) => Rect::from_parts(drag.live_position, window.size),
                _ => window.rect(),
            }
        };
        let z_index = if session.is_some() {
            self.interaction_z_index()
        } else {
            window.z_index
        };
        Some(WindowFrame { rect, z_index })
    }

    /// Transient stacking value for the window under drag or resize, above every committed value.
    pub fn interaction_z_index(&self) -> u32 {
        self.config.interaction_z_index.max(self.next_z_index)
    }

    /// Next value the stacking counter will hand out.
    pub fn next_z_index(&self) -> u32 {
        self.next_z_index
    }

    /// Active pointer interaction, if any.
    pub fn interaction(&self) -> Option<&Interaction> {
        self.interaction.as_ref()
    }

    /// Surface windows are clamped against.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Configuration in effect.
    pub fn config(&self) -> &WindowManagerConfig {
        &self.config
    }

    /// Due time of the earliest pending lifecycle timer.
    pub fn next_timer_due_ms(&self) -> Option<u64> {
        self.sequencer.next_due_ms()
    }

    /// Current reading of the manager's clock.
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    fn index_of(&self, id: &WindowId) -> Option<usize> {
        self.windows.iter().position(|w| &w.id == id)
    }

    fn window_mut(&mut self, id: &WindowId) -> Option<&mut WindowRecord<C>> {
        self.windows.iter_mut().find(|w| &w.id == id)
    }

    fn take_z_index(&mut self) -> u32 {
        let policy = self.config.z_index;
        let z_index = policy.assign(self.next_z_index);
        self.next_z_index = policy.advance(self.next_z_index);
        z_index
    }

    fn set_transition(&mut self, index: usize, transition: Transition) {
        let now_ms = self.clock.now_ms();
        if self
            .sequencer
            .start(&self.windows[index].id, transition, now_ms)
            .is_some()
        {
            self.windows[index].transition = Some(transition);
        }
    }

    fn interactive_window(&self, id: &WindowId) -> Option<&WindowRecord<C>> {
        let window = self.window(id)?;
        if window.is_minimized || window.is_maximized || window.is_closing() {
            tracing::debug!(window = %id, "window cannot be dragged or resized right now");
            return None;
        }
        if self
            .interaction
            .as_ref()
            .is_some_and(|interaction| interaction.window_id() == id)
        {
            return None;
        }
        Some(window)
    }

    fn interaction_target_alive(&mut self) -> bool {
        let Some(target) = self.interaction.as_ref().map(Interaction::window_id) else {
            return false;
        };
        if self.index_of(target).is_some() {
            return true;
        }
        tracing::debug!(window = %target, "interaction target is gone; dropping session");
        self.interaction = None;
        false
    }

    fn drop_interaction_for(&mut self, id: &WindowId) {
        if self
            .interaction
            .as_ref()
            .is_some_and(|interaction| interaction.window_id() == id)
        {
            self.interaction = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{clock::ManualClock, config::ZIndexPolicy};

    fn manager() -> (WindowManager<&'static str>, ManualClock) {
        let clock = ManualClock::new(0);
        let manager =
            WindowManager::with_clock(WindowManagerConfig::default(), Rc::new(clock.clone()));
        (manager, clock)
    }

    fn id(raw: &str) -> WindowId {
        WindowId::new(raw)
    }

    #[test]
    fn open_cascades_and_activates_the_newest_window() {
        let (mut wm, _) = manager();
        assert!(wm.open(OpenWindowRequest::new("a", "A", "alpha")));
        assert!(wm.open(OpenWindowRequest::new("b", "B", "beta")));

        let a = wm.window(&id("a")).unwrap();
        let b = wm.window(&id("b")).unwrap();
        assert_eq!(a.position, Position::new(100, 100));
        assert_eq!(b.position, Position::new(130, 130));
        assert!(!a.is_active);
        assert!(b.is_active);
        assert!(b.z_index > a.z_index);
        assert_eq!(b.transition, Some(Transition::Opening));
    }

    #[test]
    fn opening_clears_after_the_transition_duration() {
        let (mut wm, clock) = manager();
        wm.open(OpenWindowRequest::new("a", "A", "alpha"));

        clock.advance(299);
        assert!(wm.run_due_timers().is_empty());
        assert_eq!(wm.window(&id("a")).unwrap().transition, Some(Transition::Opening));

        clock.advance(1);
        assert!(wm.run_due_timers().is_empty());
        assert_eq!(wm.window(&id("a")).unwrap().transition, None);
    }

    #[test]
    fn closing_twice_does_not_extend_the_timer() {
        let (mut wm, clock) = manager();
        wm.open(OpenWindowRequest::new("a", "A", "alpha"));
        assert!(wm.close(&id("a")));

        clock.advance(200);
        assert!(!wm.close(&id("a")));
        clock.advance(100);
        assert_eq!(wm.run_due_timers(), vec![id("a")]);
        assert!(wm.is_empty());
    }

    #[test]
    fn closing_window_cannot_be_minimized_into_survival() {
        let (mut wm, clock) = manager();
        wm.open(OpenWindowRequest::new("a", "A", "alpha"));
        wm.close(&id("a"));
        wm.minimize(&id("a"));
        assert_eq!(wm.window(&id("a")).unwrap().transition, Some(Transition::Closing));

        clock.advance(300);
        wm.run_due_timers();
        assert!(!wm.contains(&id("a")));
    }

    #[test]
    fn maximize_preserves_committed_geometry() {
        let (mut wm, _) = manager();
        wm.open(OpenWindowRequest::new("a", "A", "alpha"));
        let before = wm.window(&id("a")).unwrap().rect();
        let z_before = wm.window(&id("a")).unwrap().z_index;

        wm.maximize(&id("a"));
        let frame = wm.frame(&id("a")).unwrap();
        assert_eq!(frame.rect, Rect { x: 0, y: 0, w: 1280, h: 752 });
        assert_eq!(wm.window(&id("a")).unwrap().rect(), before);
        assert_eq!(wm.window(&id("a")).unwrap().z_index, z_before);

        wm.maximize(&id("a"));
        assert_eq!(wm.frame(&id("a")).unwrap().rect, before);
    }

    #[test]
    fn update_size_is_clamped_to_the_minimum() {
        let (mut wm, _) = manager();
        wm.open(OpenWindowRequest::new("a", "A", "alpha"));
        wm.update_size(&id("a"), Size::new(10, 800));
        assert_eq!(wm.window(&id("a")).unwrap().size, Size::new(300, 800));
    }

    #[test]
    fn drag_elevates_only_while_in_flight() {
        let (mut wm, _) = manager();
        wm.open(OpenWindowRequest::new("a", "A", "alpha"));
        wm.open(OpenWindowRequest::new("b", "B", "beta"));

        assert!(wm.begin_drag(&id("a"), PointerPosition::new(10, 10)));
        let committed = wm.window(&id("a")).unwrap().z_index;
        assert_eq!(wm.frame(&id("a")).unwrap().z_index, 999);
        assert_eq!(wm.active_window_id(), Some(&id("a")));

        wm.update_drag(PointerPosition::new(60, 30));
        assert_eq!(wm.window(&id("a")).unwrap().position, Position::new(100, 100));
        assert_eq!(wm.frame(&id("a")).unwrap().rect.position(), Position::new(150, 120));

        assert!(wm.end_drag());
        assert_eq!(wm.window(&id("a")).unwrap().position, Position::new(150, 120));
        assert_eq!(wm.frame(&id("a")).unwrap().z_index, committed);
    }

    #[test]
    fn resize_commits_every_tick() {
        let (mut wm, _) = manager();
        wm.open(OpenWindowRequest::new("a", "A", "alpha").with_size(Size::new(400, 400)));

        wm.begin_resize(&id("a"), ResizeEdge::NorthWest, PointerPosition::new(100, 100));
        wm.update_resize(PointerPosition::new(80, 70));
        let window = wm.window(&id("a")).unwrap();
        assert_eq!(window.rect(), Rect { x: 80, y: 70, w: 420, h: 430 });

        wm.update_resize(PointerPosition::new(400, 400));
        let window = wm.window(&id("a")).unwrap();
        assert_eq!(window.rect(), Rect { x: 200, y: 200, w: 300, h: 300 });
        assert!(wm.end_resize());
        assert!(wm.interaction().is_none());
    }

    #[test]
    fn drag_and_resize_exclude_each_other_on_one_window() {
        let (mut wm, _) = manager();
        wm.open(OpenWindowRequest::new("a", "A", "alpha"));

        assert!(wm.begin_drag(&id("a"), PointerPosition::new(0, 0)));
        assert!(!wm.begin_resize(&id("a"), ResizeEdge::East, PointerPosition::new(0, 0)));
        assert!(!wm.end_resize());
        assert!(matches!(wm.interaction(), Some(Interaction::Drag(_))));
    }

    #[test]
    fn header_press_focuses_a_maximized_window_without_dragging() {
        let (mut wm, _) = manager();
        wm.open(OpenWindowRequest::new("a", "A", "alpha").maximized());
        wm.open(OpenWindowRequest::new("b", "B", "beta"));

        assert!(!wm.begin_drag(&id("a"), PointerPosition::new(400, 10)));
        assert_eq!(wm.active_window_id(), Some(&id("a")));
        assert!(wm.window(&id("a")).unwrap().z_index > wm.window(&id("b")).unwrap().z_index);
        assert!(wm.interaction().is_none());

        wm.focus(&id("b"));
        assert!(!wm.begin_resize(&id("a"), ResizeEdge::East, PointerPosition::new(0, 0)));
        assert_eq!(wm.active_window_id(), Some(&id("a")));
    }

    #[test]
    fn unbounded_policy_keeps_elevation_above_the_counter() {
        let clock = ManualClock::new(0);
        let config = WindowManagerConfig {
            z_index: ZIndexPolicy::Unbounded,
            ..WindowManagerConfig::default()
        };
        let mut wm: WindowManager<()> = WindowManager::with_clock(config, Rc::new(clock));
        wm.open(OpenWindowRequest::new("a", "A", ()));
        for _ in 0..1_200 {
            wm.focus(&id("a"));
        }
        assert!(wm.interaction_z_index() > wm.window(&id("a")).unwrap().z_index);
    }
}
