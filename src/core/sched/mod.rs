//! Cooperative dispatcher
//!
//! Runs, from normal program context, the cooperative tasks that the tick
//! handler has marked ready.
//!
//! A slot is read when the scan reaches it, so a task deleted earlier in the
//! same pass is skipped. The action is run after its critical section ends:
//! a tick that deletes the slot inside that short window does not stop the
//! action already taken from running once. Bookkeeping afterwards is keyed
//! on the slot epoch and leaves a replacement task alone.

use crate::error::ErrorLatch;
use crate::kernel::Scheduler;
use crate::task::{Action, Task};
use crate::types::{Epoch, TaskId};

/// Take one pending execution from a slot, if any
pub(crate) fn take_ready(task: &Task) -> Option<(&'static dyn Action, Epoch)> {
    match task.action {
        Some(action) if task.kind.is_cooperative() && task.ready > 0 => Some((action, task.epoch)),
        _ => None,
    }
}

/// Account for a finished cooperative execution
pub(crate) fn complete(task: &mut Task, epoch: Epoch) {
    if !task.is_allocation(epoch) {
        return;
    }
    task.ready = task.ready.saturating_sub(1);
    if task.is_one_shot() {
        task.reset();
    }
}

/// One pass over the table
///
/// Runs each ready cooperative task at most once; leftover readiness is
/// consumed by later passes.
///
/// # Returns
/// Number of actions executed
pub fn os_dispatch_ready<const N: usize>(sched: &Scheduler<N>) -> usize {
    let mut executed = 0;

    for id in 0..N as TaskId {
        let pending = sched
            .table
            .with(|table| table.get(id).and_then(take_ready));

        let Some((action, epoch)) = pending else {
            continue;
        };

        action.run();
        executed += 1;

        sched.table.with(|table| {
            if let Some(task) = table.get_mut(id) {
                complete(task, epoch);
            }
        });
    }

    executed
}

/// Report the latched error code
///
/// Only logs when the `report-errors` feature is enabled. The latch is left
/// as is.
pub fn os_report_status(latch: &ErrorLatch) {
    #[cfg(feature = "report-errors")]
    {
        if let Some(err) = latch.get() {
            crate::error!("scheduler error: {}", err);
        }
    }

    #[cfg(not(feature = "report-errors"))]
    let _ = latch;
}
