//! Compile-time configuration for the scheduler
//!
//! These constants control the resource limits and tick timing.

/// Number of slots in the global task table
pub const CFG_MAX_TASKS: usize = 10;

/// System tick rate in Hz (1 ms per tick)
pub const CFG_TICK_RATE_HZ: u32 = 1000;

/// Core clock feeding the tick timer
pub const CFG_CPU_CLOCK_HZ: u32 = 16_000_000;

/// Timer reload value for one tick
pub const CFG_TICK_RELOAD: u32 = CFG_CPU_CLOCK_HZ / CFG_TICK_RATE_HZ;
