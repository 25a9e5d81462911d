//! Task management module
//!
//! Provides the task action contract and the fixed-capacity task table.

mod table;

pub use table::{Task, TaskTable};

use crate::types::{ReadyCtr, Tick, TaskKind};

/// Work executed when a task becomes due.
///
/// Implemented for every `Fn() + Sync`, so plain `fn` items and
/// non-capturing closures can be registered directly. An action may run in
/// either execution context (tick interrupt for preemptive tasks, main loop
/// for cooperative ones); whatever state it touches must be safe to reach
/// from both.
pub trait Action: Sync {
    fn run(&self);
}

impl<F> Action for F
where
    F: Fn() + Sync,
{
    #[inline]
    fn run(&self) {
        self()
    }
}

/// Read-only copy of one task slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TaskSnapshot {
    pub occupied: bool,
    pub delay: Tick,
    pub period: Tick,
    pub ready: ReadyCtr,
    pub kind: TaskKind,
}
