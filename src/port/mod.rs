//! Port layer - CPU-specific implementations
//!
//! This module provides the hardware collaborators of the scheduler: tick
//! timer setup, interrupt masking and the idle wait.

#[cfg(target_arch = "arm")]
pub mod cortex_m4;

#[cfg(target_arch = "arm")]
pub use cortex_m4::*;

// Stub implementations for non-ARM targets (for testing)
#[cfg(not(target_arch = "arm"))]
pub mod stub {
    pub fn os_cpu_systick_init(_cnts: u32) {
        // No timer on the host; tests call `tick()` directly
    }

    pub fn os_int_disable() {}

    pub fn os_int_enable() {}

    pub fn os_cpu_idle() {
        // Return immediately so the test loop keeps going
    }
}

#[cfg(not(target_arch = "arm"))]
pub use stub::*;
