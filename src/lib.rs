//! Time-triggered task scheduler for single-timer microcontrollers
//!
//! A fixed table of tasks driven by one periodic hardware tick:
//! - Preemptive tasks run inside the tick interrupt as soon as they are due
//! - Cooperative tasks are marked ready by the tick and run from the main loop
//! - One-shot (`period = 0`) and periodic tasks
//! - A latched error code for table overflow and bad deletes
//!
//! ```ignore
//! use ttsched::{TaskKind, SCHEDULER};
//!
//! fn blink() { /* toggle a pin */ }
//!
//! SCHEDULER.init();
//! SCHEDULER.add_task(&blink, 0, 500, TaskKind::Preemptive);
//! SCHEDULER.start().ok();
//! loop {
//!     SCHEDULER.dispatch_tasks();
//! }
//! ```

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]

// ============ Critical Section ============

#[cfg(target_arch = "arm")]
mod cs_impl {
    use cortex_m::interrupt;
    use cortex_m::register::primask;
    use critical_section::{set_impl, Impl, RawRestoreState};

    struct SingleCoreCriticalSection;
    set_impl!(SingleCoreCriticalSection);

    unsafe impl Impl for SingleCoreCriticalSection {
        unsafe fn acquire() -> RawRestoreState {
            let was_active = primask::read().is_active();
            interrupt::disable();
            was_active
        }

        unsafe fn release(was_active: RawRestoreState) {
            if was_active {
                unsafe { interrupt::enable() }
            }
        }
    }
}

// ============ Modules ============

pub mod log;
mod lang_items;

pub mod core;
pub mod port;

// ============ Re-exports ============

pub use crate::core::config;
pub use crate::core::config::*;
pub use crate::core::critical;
pub use crate::core::error;
pub use crate::core::error::{SchedError, SchedResult};
pub use crate::core::kernel;
pub use crate::core::kernel::{Scheduler, SCHEDULER};
pub use crate::core::types;
pub use crate::core::types::*;
pub use crate::core::task;
pub use crate::core::task::{Action, TaskSnapshot};
pub use crate::core::sched;
pub use crate::core::time;

#[cfg(feature = "pac")]
pub use stm32_metapac as pac;
