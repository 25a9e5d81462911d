//! Cortex-M4 port implementation
//!
//! SysTick drives the scheduler tick; `wfi` is the idle wait.

use cortex_m::peripheral::scb::SystemHandler;
use cortex_m::peripheral::syst::SystClkSource;

/// Initialize SysTick timer for system tick generation
///
/// # Arguments
/// * `cnts` - Reload value
///
/// # Example
/// For 16MHz clock with 1000Hz tick rate: cnts = 16_000_000 / 1000 = 16_000
pub fn os_cpu_systick_init(cnts: u32) {
    let mut p = unsafe { cortex_m::Peripherals::steal() };

    // Single interrupt level: the tick never nests
    unsafe { p.SCB.set_priority(SystemHandler::SysTick, 0xF0) };

    p.SYST.disable_counter();
    p.SYST.set_reload(cnts.saturating_sub(1));
    p.SYST.clear_current();
    p.SYST.set_clock_source(SystClkSource::Core);
    p.SYST.enable_interrupt();
    p.SYST.enable_counter();
}

/// Mask all configurable-priority interrupts (PRIMASK)
#[inline(always)]
pub fn os_int_disable() {
    cortex_m::interrupt::disable();
}

/// Unmask interrupts
#[inline(always)]
pub fn os_int_enable() {
    unsafe { cortex_m::interrupt::enable() };
}

/// Sleep until the next interrupt
#[inline(always)]
pub fn os_cpu_idle() {
    cortex_m::asm::wfi();
}
