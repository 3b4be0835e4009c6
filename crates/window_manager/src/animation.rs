//! Timer-gated lifecycle transitions.
//!
//! Each window carries at most one transient [`Transition`]. Starting a transition schedules a
//! task due `duration_ms` later; the manager drains due tasks with [`AnimationSequencer::take_due`]
//! and applies their consequences, most importantly removing a window once `Closing` completes.

use crate::model::{Transition, WindowId};

/// Handle identifying one scheduled transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerTicket(u64);

/// A scheduled transition waiting for its timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransition {
    /// Scheduling handle, unique for the sequencer's lifetime.
    pub ticket: TimerTicket,
    /// Window being animated.
    pub window_id: WindowId,
    /// Transition in flight.
    pub transition: Transition,
    /// Time at which the transition completes.
    pub due_at_ms: u64,
}

/// Owner of every pending lifecycle timer.
#[derive(Debug, Clone)]
pub struct AnimationSequencer {
    duration_ms: u64,
    next_ticket: u64,
    pending: Vec<PendingTransition>,
}

impl AnimationSequencer {
    /// Creates a sequencer whose transitions all last `duration_ms`.
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            next_ticket: 1,
            pending: Vec::new(),
        }
    }

    /// Starts `transition` for `window_id`, replacing whatever that window had in flight.
    ///
    /// A pending `Closing` is final: any other transition requested for the same window is
    /// refused and `None` is returned.
    pub fn start(
        &mut self,
        window_id: &WindowId,
        transition: Transition,
        now_ms: u64,
    ) -> Option<TimerTicket> {
        if transition != Transition::Closing && self.current(window_id) == Some(Transition::Closing)
        {
            tracing::warn!(
                window = %window_id,
                requested = transition.as_str(),
                "window is closing; transition refused"
            );
            return None;
        }

        self.cancel_window(window_id);
        let ticket = TimerTicket(self.next_ticket);
        self.next_ticket = self.next_ticket.saturating_add(1);
        let due_at_ms = now_ms.saturating_add(self.duration_ms);
        tracing::trace!(
            window = %window_id,
            transition = transition.as_str(),
            due_at_ms,
            "transition scheduled"
        );
        self.pending.push(PendingTransition {
            ticket,
            window_id: window_id.clone(),
            transition,
            due_at_ms,
        });
        Some(ticket)
    }

    /// Drops the pending transition of `window_id`. Returns whether one was pending.
    pub fn cancel_window(&mut self, window_id: &WindowId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|task| &task.window_id != window_id);
        before != self.pending.len()
    }

    /// Drops a single scheduled task. Returns whether it was still pending.
    pub fn cancel(&mut self, ticket: TimerTicket) -> bool {
        let before = self.pending.len();
        self.pending.retain(|task| task.ticket != ticket);
        before != self.pending.len()
    }

    /// Transition currently in flight for `window_id`.
    pub fn current(&self, window_id: &WindowId) -> Option<Transition> {
        self.pending
            .iter()
            .find(|task| &task.window_id == window_id)
            .map(|task| task.transition)
    }

    /// Earliest due time among pending tasks.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.pending.iter().map(|task| task.due_at_ms).min()
    }

    /// Number of pending tasks.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Removes and returns every task due at `now_ms`, earliest first, ties in scheduling order.
    pub fn take_due(&mut self, now_ms: u64) -> Vec<PendingTransition> {
        let (mut due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|task| task.due_at_ms <= now_ms);
        self.pending = waiting;
        due.sort_by_key(|task| (task.due_at_ms, task.ticket));
        due
    }

    /// Duration applied to every transition.
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }
}
