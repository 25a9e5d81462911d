//! Core type definitions for the scheduler
//!
//! These types provide strong typing for scheduler primitives.

/// Slot index handed back by `add_task`
pub type TaskId = u8;

/// Delay and period counter type
pub type Tick = u16;

/// Pending cooperative execution counter
pub type ReadyCtr = u8;

/// Allocation counter for a slot
pub type Epoch = u16;

/// Global tick counter type
pub type TickCount = u32;

/// Execution discipline of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TaskKind {
    /// Runs inside the tick interrupt the moment it becomes due
    Preemptive = 0,
    /// Marked ready by the tick, run later by `dispatch_tasks`
    Cooperative = 1,
}

impl TaskKind {
    /// Build from the boolean `co_op` flag used by the classic API
    #[inline]
    pub const fn from_co_op(co_op: bool) -> Self {
        if co_op {
            TaskKind::Cooperative
        } else {
            TaskKind::Preemptive
        }
    }

    #[inline]
    pub const fn is_cooperative(self) -> bool {
        matches!(self, TaskKind::Cooperative)
    }
}
