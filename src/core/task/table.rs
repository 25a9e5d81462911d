//! Fixed-capacity task table
//!
//! The table is an arena of `N` slots addressed by index. Allocation is a
//! first-fit scan from index 0, so a released slot is always the next one
//! handed out if every lower slot is busy.

use crate::error::{SchedError, SchedResult};
use crate::types::{Epoch, ReadyCtr, Tick, TaskId, TaskKind};

use super::{Action, TaskSnapshot};

/// One task slot
///
/// An empty slot has no action and `delay = period = ready = 0`.
#[derive(Clone, Copy)]
pub struct Task {
    /// Work to run; `None` marks the slot as free
    pub(crate) action: Option<&'static dyn Action>,
    /// Ticks remaining before the task is next due
    pub(crate) delay: Tick,
    /// Reload value for `delay`; 0 means run once
    pub(crate) period: Tick,
    /// Cooperative executions due but not yet dispatched
    pub(crate) ready: ReadyCtr,
    pub(crate) kind: TaskKind,
    /// Bumped on every allocation, survives release
    pub(crate) epoch: Epoch,
}

impl Task {
    pub const EMPTY: Task = Task {
        action: None,
        delay: 0,
        period: 0,
        ready: 0,
        kind: TaskKind::Preemptive,
        epoch: 0,
    };

    #[inline(always)]
    pub fn is_occupied(&self) -> bool {
        self.action.is_some()
    }

    #[inline(always)]
    pub fn is_one_shot(&self) -> bool {
        self.period == 0
    }

    /// True if the slot still holds the allocation identified by `epoch`
    #[inline(always)]
    pub(crate) fn is_allocation(&self, epoch: Epoch) -> bool {
        self.is_occupied() && self.epoch == epoch
    }

    /// Return the slot to the empty state
    #[inline]
    pub(crate) fn reset(&mut self) {
        self.action = None;
        self.delay = 0;
        self.period = 0;
        self.ready = 0;
        self.kind = TaskKind::Preemptive;
    }

    pub fn snapshot(&self) -> TaskSnapshot {
        TaskSnapshot {
            occupied: self.is_occupied(),
            delay: self.delay,
            period: self.period,
            ready: self.ready,
            kind: self.kind,
        }
    }
}

/// Arena of `N` task slots
pub struct TaskTable<const N: usize> {
    tasks: [Task; N],
}

impl<const N: usize> TaskTable<N> {
    /// Sentinel id returned when no slot could be allocated
    pub const NONE: TaskId = N as TaskId;

    const CAPACITY_CHECK: () = assert!(N < TaskId::MAX as usize, "task table too large for TaskId");

    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::CAPACITY_CHECK;
        Self {
            tasks: [Task::EMPTY; N],
        }
    }

    /// Claim the lowest free slot
    ///
    /// # Returns
    /// * `Ok(id)` - Slot index now holding the task, with `ready = 0`
    /// * `Err(SchedError::TooManyTasks)` - Every slot is occupied; table unchanged
    pub fn allocate(
        &mut self,
        action: &'static dyn Action,
        delay: Tick,
        period: Tick,
        kind: TaskKind,
    ) -> SchedResult<TaskId> {
        let index = self
            .tasks
            .iter()
            .position(|task| !task.is_occupied())
            .ok_or(SchedError::TooManyTasks)?;

        let task = &mut self.tasks[index];
        task.action = Some(action);
        task.delay = delay;
        task.period = period;
        task.kind = kind;
        task.ready = 0;
        task.epoch = task.epoch.wrapping_add(1);

        Ok(index as TaskId)
    }

    /// Free a slot
    ///
    /// The slot is reset to the empty state whether or not it was occupied.
    ///
    /// # Returns
    /// * `Ok(())` - The slot held a task
    /// * `Err(SchedError::CannotDeleteTask)` - The slot was already empty, or `id` is out of range
    pub fn release(&mut self, id: TaskId) -> SchedResult<()> {
        let task = self
            .tasks
            .get_mut(id as usize)
            .ok_or(SchedError::CannotDeleteTask)?;

        let result = if task.is_occupied() {
            Ok(())
        } else {
            Err(SchedError::CannotDeleteTask)
        };
        task.reset();
        result
    }

    /// Reset every slot to empty
    pub fn clear(&mut self) {
        self.tasks.iter_mut().for_each(Task::reset);
    }

    #[inline]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(id as usize)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.get_mut(id as usize)
    }

    pub fn slot(&self, id: TaskId) -> Option<TaskSnapshot> {
        self.get(id).map(Task::snapshot)
    }

    pub fn is_occupied(&self, id: TaskId) -> bool {
        self.get(id).is_some_and(Task::is_occupied)
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.tasks.iter().filter(|task| task.is_occupied()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for TaskTable<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() {}

    #[test]
    fn allocate_fills_lowest_slot_first() {
        let mut table = TaskTable::<3>::new();
        assert_eq!(table.allocate(&noop, 1, 0, TaskKind::Preemptive), Ok(0));
        assert_eq!(table.allocate(&noop, 2, 0, TaskKind::Preemptive), Ok(1));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn allocate_full_table_leaves_it_unchanged() {
        let mut table = TaskTable::<2>::new();
        table.allocate(&noop, 4, 4, TaskKind::Cooperative).unwrap();
        table.allocate(&noop, 5, 0, TaskKind::Preemptive).unwrap();

        let before = [table.slot(0), table.slot(1)];
        assert_eq!(
            table.allocate(&noop, 9, 9, TaskKind::Cooperative),
            Err(SchedError::TooManyTasks)
        );
        assert_eq!([table.slot(0), table.slot(1)], before);
    }

    #[test]
    fn release_empty_slot_reports_failure_and_stays_empty() {
        let mut table = TaskTable::<2>::new();
        assert_eq!(table.release(1), Err(SchedError::CannotDeleteTask));
        let slot = table.slot(1).unwrap();
        assert!(!slot.occupied);
        assert_eq!((slot.delay, slot.period, slot.ready), (0, 0, 0));
    }

    #[test]
    fn release_out_of_range_is_rejected() {
        let mut table = TaskTable::<2>::new();
        assert_eq!(table.release(TaskTable::<2>::NONE), Err(SchedError::CannotDeleteTask));
        assert_eq!(table.release(200), Err(SchedError::CannotDeleteTask));
    }

    #[test]
    fn epoch_changes_on_reallocation() {
        let mut table = TaskTable::<1>::new();
        table.allocate(&noop, 0, 0, TaskKind::Preemptive).unwrap();
        let first = table.get(0).unwrap().epoch;
        table.release(0).unwrap();
        table.allocate(&noop, 0, 0, TaskKind::Preemptive).unwrap();
        let task = table.get(0).unwrap();
        assert!(!task.is_allocation(first));
        assert!(task.is_allocation(task.epoch));
    }

    #[test]
    fn clear_empties_every_slot() {
        let mut table = TaskTable::<4>::new();
        for _ in 0..4 {
            table.allocate(&noop, 3, 3, TaskKind::Cooperative).unwrap();
        }
        table.clear();
        assert!(table.is_empty());
        assert!((0..4).all(|id| !table.is_occupied(id)));
    }
}
