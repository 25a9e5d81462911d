//! Critical section handling for the scheduler
//!
//! Every normal-context access to the task table goes through here, so a
//! tick interrupt can never observe a half-written slot.

pub use ::critical_section::CriticalSection;

/// Execute a closure with interrupts disabled
///
/// The closure receives the critical section token, which can be used to
/// access [`CsCell`](crate::core::cs_cell::CsCell) protected data. Nesting is
/// allowed: the previous interrupt state is restored on exit, so a preemptive
/// action calling back into the scheduler from the tick does not re-enable
/// interrupts early.
#[inline]
pub fn critical_section<F, R>(f: F) -> R
where
    F: FnOnce(CriticalSection<'_>) -> R,
{
    ::critical_section::with(f)
}

/// Check if currently executing in an ISR context
#[inline]
pub fn is_isr_context() -> bool {
    #[cfg(target_arch = "arm")]
    {
        let ipsr: u32;
        unsafe {
            core::arch::asm!(
                "mrs {}, IPSR",
                out(reg) ipsr,
                options(nomem, nostack, preserves_flags)
            );
        }
        ipsr != 0
    }

    #[cfg(not(target_arch = "arm"))]
    {
        false
    }
}
