//! Drains reducer-emitted effects from the runtime queue.

use leptos::*;
use window_manager::RuntimeEffect;

use crate::{host, runtime_context::DesktopRuntimeContext};

/// Installs the executor that runs queued effects in order, one batch per queue change.
pub fn install(runtime: DesktopRuntimeContext) {
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        // Effects dispatched while draining land in a fresh batch.
        runtime.effects.set(Vec::new());

        for effect in coalesce_wakes(queued) {
            host::run_runtime_effect(runtime, effect);
        }
    });
}

/// Keeps only the earliest wake of a batch, at the position of the first wake.
///
/// A wake re-runs every due timer and the reducer re-arms the next one, so later wakes in the
/// same batch would only stack redundant browser timeouts.
fn coalesce_wakes(batch: Vec<RuntimeEffect>) -> Vec<RuntimeEffect> {
    let earliest = batch
        .iter()
        .filter_map(|effect| match effect {
            RuntimeEffect::ScheduleWake { delay_ms } => Some(*delay_ms),
            _ => None,
        })
        .min();

    let mut wake_emitted = false;
    batch
        .into_iter()
        .filter_map(|effect| match effect {
            RuntimeEffect::ScheduleWake { .. } if wake_emitted => None,
            RuntimeEffect::ScheduleWake { .. } => {
                wake_emitted = true;
                earliest.map(|delay_ms| RuntimeEffect::ScheduleWake { delay_ms })
            }
            other => Some(other),
        })
        .collect()
}
