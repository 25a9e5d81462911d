//! Scheduler façade and global instance
//!
//! This module ties the task table, tick handler and dispatcher together
//! and owns the one scheduler the hardware tick is routed to.

use portable_atomic::{AtomicBool, AtomicU32, Ordering};

use crate::config::{CFG_MAX_TASKS, CFG_TICK_RELOAD};
use crate::core::cs_cell::CsCell;
use crate::critical::is_isr_context;
use crate::error::{ErrorLatch, SchedError, SchedResult};
use crate::port;
use crate::sched;
use crate::task::{Action, TaskSnapshot, TaskTable};
use crate::time;
use crate::types::{Tick, TaskId, TaskKind, TickCount};

// ============ Kernel State Structures ============

/// Atomic scheduler flags
pub struct KernelFlags {
    initialized: AtomicBool,
    running: AtomicBool,
    tick_counter: AtomicU32,
}

impl KernelFlags {
    const fn new() -> Self {
        Self {
            initialized: AtomicBool::new(false),
            running: AtomicBool::new(false),
            tick_counter: AtomicU32::new(0),
        }
    }

    pub(crate) fn reset(&self) {
        self.initialized.store(false, Ordering::SeqCst);
        self.running.store(false, Ordering::SeqCst);
        self.tick_counter.store(0, Ordering::SeqCst);
    }

    /// Check if the tick handler is live
    #[inline(always)]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    #[inline(always)]
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Get current tick count
    #[inline(always)]
    pub fn tick_get(&self) -> TickCount {
        self.tick_counter.load(Ordering::Relaxed)
    }

    /// Increment and return tick count
    #[inline(always)]
    pub(crate) fn tick_increment(&self) -> TickCount {
        self.tick_counter.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
    }

    #[inline(always)]
    pub(crate) fn set_initialized(&self, val: bool) {
        self.initialized.store(val, Ordering::SeqCst);
    }

    #[inline(always)]
    pub(crate) fn set_running(&self, val: bool) {
        self.running.store(val, Ordering::SeqCst);
    }
}

/// Time-triggered task scheduler with `N` task slots
///
/// Normal-context callers (`add_task`, `delete_task`, `dispatch_tasks`) and
/// the tick interrupt share the table; every access goes through a short
/// critical section.
pub struct Scheduler<const N: usize = CFG_MAX_TASKS> {
    pub(crate) table: CsCell<TaskTable<N>>,
    pub(crate) error: ErrorLatch,
    pub(crate) flags: KernelFlags,
}

/// The scheduler instance the `SysTick` vector is bound to
///
/// There is exactly one: the hardware tick can only route to one fixed
/// entry point, which forwards here.
pub static SCHEDULER: Scheduler<CFG_MAX_TASKS> = Scheduler::new();

impl<const N: usize> Scheduler<N> {
    /// Sentinel returned by [`add_task`](Self::add_task) when the table is full
    pub const NO_TASK: TaskId = TaskTable::<N>::NONE;

    pub const fn new() -> Self {
        Self {
            table: CsCell::new(TaskTable::new()),
            error: ErrorLatch::new(),
            flags: KernelFlags::new(),
        }
    }

    // ============ Lifecycle ============

    /// Initialize the scheduler
    ///
    /// Deletes every task, clears the latched error and arms the tick timer.
    /// Interrupts are left disabled until [`start`](Self::start).
    pub fn init(&self) {
        port::os_int_disable();

        self.flags.reset();
        self.table.with(|table| table.clear());
        self.error.clear();

        port::os_cpu_systick_init(CFG_TICK_RELOAD);

        self.flags.set_initialized(true);
        crate::info!("scheduler initialized, {=usize} slots", N);
    }

    /// Start the scheduler
    ///
    /// # Returns
    /// * `Ok(())` - Interrupts enabled, ticks are now delivered
    /// * `Err(SchedError::NotInitialized)` - `init` was never called
    pub fn start(&self) -> SchedResult<()> {
        if !self.flags.is_initialized() {
            return Err(SchedError::NotInitialized);
        }

        self.flags.set_running(true);
        crate::info!("scheduler started");
        port::os_int_enable();
        Ok(())
    }

    // ============ Task API ============

    /// Add a task
    ///
    /// # Arguments
    /// * `action` - Work to run when the task is due
    /// * `delay` - Ticks before the first execution
    /// * `period` - Ticks between repeats; 0 runs the task once
    /// * `kind` - Cooperative (run by `dispatch_tasks`) or preemptive (run in the tick)
    ///
    /// # Returns
    /// The slot id for [`delete_task`](Self::delete_task), or
    /// [`NO_TASK`](Self::NO_TASK) if the table is full (the error is latched too).
    pub fn add_task(
        &self,
        action: &'static dyn Action,
        delay: Tick,
        period: Tick,
        kind: TaskKind,
    ) -> TaskId {
        match self
            .table
            .with(|table| table.allocate(action, delay, period, kind))
        {
            Ok(id) => {
                crate::debug!("task {=u8} added ({})", id, kind);
                id
            }
            Err(err) => {
                crate::warn!("add_task failed: {}", err);
                self.error.set(err);
                Self::NO_TASK
            }
        }
    }

    /// Delete a task
    ///
    /// The slot is reset even if it was already empty.
    ///
    /// # Returns
    /// * `Ok(())` - Task deleted
    /// * `Err(SchedError::CannotDeleteTask)` - No task in that slot (error latched)
    pub fn delete_task(&self, id: TaskId) -> SchedResult<()> {
        let result = self.table.with(|table| table.release(id));
        match result {
            Ok(()) => {
                crate::debug!("task {=u8} deleted", id);
            }
            Err(err) => {
                crate::warn!("delete_task({=u8}) failed: {}", id, err);
                self.error.set(err);
            }
        }
        result
    }

    // ============ Execution ============

    /// Advance all tasks by one tick
    ///
    /// Meant to be called from the timer interrupt only. Does nothing until
    /// the scheduler is started.
    #[inline]
    pub fn tick(&self) {
        time::os_tick_handler(self);
    }

    /// Run every cooperative task that is ready, once each
    ///
    /// # Returns
    /// Number of actions executed
    pub fn dispatch_ready(&self) -> usize {
        sched::os_dispatch_ready(self)
    }

    /// One main-loop iteration
    ///
    /// Runs the ready cooperative tasks, reports the latched error and waits
    /// for the next tick in low-power mode.
    ///
    /// Called from an interrupt handler it does nothing: cooperative tasks
    /// must not run in tick context.
    pub fn dispatch_tasks(&self) {
        if is_isr_context() {
            crate::warn!("dispatch_tasks called from interrupt context");
            return;
        }

        let _executed = self.dispatch_ready();
        sched::os_report_status(&self.error);
        port::os_cpu_idle();
    }

    // ============ Inspection ============

    /// Snapshot of one slot, `None` if `id` is out of range
    pub fn task(&self, id: TaskId) -> Option<TaskSnapshot> {
        self.table.with(|table| table.slot(id))
    }

    /// Number of occupied slots
    pub fn task_count(&self) -> usize {
        self.table.with(|table| table.len())
    }

    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Latched error code, 0 if none
    pub fn error_code(&self) -> u8 {
        self.error.code()
    }

    pub fn last_error(&self) -> Option<SchedError> {
        self.error.get()
    }

    pub fn clear_error(&self) {
        self.error.clear();
    }

    /// Ticks handled since `init`
    pub fn tick_count(&self) -> TickCount {
        self.flags.tick_get()
    }

    pub fn is_initialized(&self) -> bool {
        self.flags.is_initialized()
    }

    pub fn is_running(&self) -> bool {
        self.flags.is_running()
    }
}

impl<const N: usize> Default for Scheduler<N> {
    fn default() -> Self {
        Self::new()
    }
}
