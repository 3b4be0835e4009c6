//! Authoritative window model for the browser desktop.
//!
//! The crate owns the set of open windows, their stacking order and focus, the drag/resize
//! geometry rules and the timer-gated lifecycle transitions. It has no UI dependency: the
//! desktop shell renders [`WindowManager::visible_windows`] and feeds pointer and timer events
//! back through [`reduce_window_manager`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod animation;
pub mod clock;
pub mod config;
pub mod geometry;
pub mod manager;
pub mod model;
pub mod reducer;

pub use animation::{AnimationSequencer, PendingTransition, TimerTicket};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, WindowManagerConfig, ZIndexPolicy};
pub use manager::WindowManager;
pub use model::*;
pub use reducer::{reduce_window_manager, RuntimeEffect, WindowAction};
