//! Tick handling
//!
//! Advances every task's countdown once per timer tick, runs preemptive
//! tasks as they fall due and marks cooperative ones ready for the
//! dispatcher.
//!
//! A preemptive action runs synchronously inside the tick, so a slow one
//! delays every later slot in the scan and the next tick. That is the
//! intended contract for this kind of task.

use crate::kernel::Scheduler;
use crate::task::{Action, Task};
use crate::types::{Epoch, ReadyCtr, TaskId};

/// What one tick did to a slot
pub(crate) enum TickStep {
    /// Slot is empty
    Vacant,
    /// Delay decremented, not due yet
    Counting,
    /// Cooperative task due; `ready` was bumped
    Readied,
    /// Preemptive task due; run it outside the table borrow
    Fire {
        action: &'static dyn Action,
        epoch: Epoch,
    },
}

/// Advance a single slot by one tick
pub(crate) fn advance(task: &mut Task) -> TickStep {
    let Some(action) = task.action else {
        return TickStep::Vacant;
    };

    if task.delay > 0 {
        task.delay -= 1;
        return TickStep::Counting;
    }

    let step = if task.kind.is_cooperative() {
        let before = task.ready;
        task.ready = before.saturating_add(1);
        if before == ReadyCtr::MAX - 1 {
            crate::warn!("ready counter saturated");
        }
        TickStep::Readied
    } else {
        TickStep::Fire {
            action,
            epoch: task.epoch,
        }
    };

    // One-shot tasks keep delay 0 and are removed after they run
    if task.period > 0 {
        task.delay = task.period;
    }

    step
}

/// Drop a preemptive one-shot task once its action has returned
///
/// Does nothing if the action already deleted (or replaced) its own slot.
pub(crate) fn retire(task: &mut Task, epoch: Epoch) {
    if task.is_allocation(epoch) && task.is_one_shot() {
        task.reset();
    }
}

/// Tick handler
///
/// Scans the table in index order. Each slot is updated inside its own short
/// critical section and the borrow is dropped before any action runs, so
/// actions are free to add or delete tasks.
pub fn os_tick_handler<const N: usize>(sched: &Scheduler<N>) {
    if !sched.flags.is_running() {
        return;
    }

    let _tick = sched.flags.tick_increment();

    for id in 0..N as TaskId {
        let step = sched
            .table
            .with(|table| table.get_mut(id).map_or(TickStep::Vacant, advance));

        if let TickStep::Fire { action, epoch } = step {
            action.run();
            sched.table.with(|table| {
                if let Some(task) = table.get_mut(id) {
                    retire(task, epoch);
                }
            });
        }
    }
}

/// SysTick interrupt handler
///
/// The exception vector can only name one function, so the tick is routed
/// to the single global [`SCHEDULER`](crate::kernel::SCHEDULER) instance.
#[cfg(target_arch = "arm")]
#[no_mangle]
pub extern "C" fn SysTick() {
    crate::kernel::SCHEDULER.tick();
}
