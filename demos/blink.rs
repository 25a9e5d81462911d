//! Blink demo - LED toggling from the tick on STM32F401
//!
//! A preemptive task flips the LED every 500 ms inside the SysTick handler.
//! A cooperative heartbeat logs once a second from the main loop, and a
//! one-shot task deletes the heartbeat after ten seconds.

#![no_std]
#![no_main]

use core::sync::atomic::{AtomicBool, AtomicU8, AtomicU32, Ordering};

use cortex_m_rt::entry;
use ttsched::{TaskKind, SCHEDULER};

#[cfg(feature = "pac")]
use stm32_metapac as pac;

// ============ LED Control ============

static LED_ON: AtomicBool = AtomicBool::new(false);

#[cfg(feature = "pac")]
fn led_init() {
    pac::RCC.ahb1enr().modify(|w| w.set_gpioaen(true));
    pac::GPIOA.moder().modify(|w| w.set_moder(5, pac::gpio::vals::Moder::OUTPUT));
    pac::GPIOA.otyper().modify(|w| w.set_ot(5, pac::gpio::vals::Ot::PUSHPULL));
}

#[cfg(feature = "pac")]
fn led_set(on: bool) {
    if on {
        pac::GPIOA.bsrr().write(|w| w.set_bs(5, true));
    } else {
        pac::GPIOA.bsrr().write(|w| w.set_br(5, true));
    }
}

#[cfg(not(feature = "pac"))]
fn led_init() {}
#[cfg(not(feature = "pac"))]
fn led_set(_on: bool) {}

// ============ Tasks ============

/// Preemptive: runs inside SysTick, so keep it short
fn blink_task() {
    let on = !LED_ON.load(Ordering::Relaxed);
    LED_ON.store(on, Ordering::Relaxed);
    led_set(on);
}

static BEATS: AtomicU32 = AtomicU32::new(0);

fn heartbeat_task() {
    let n = BEATS.fetch_add(1, Ordering::Relaxed) + 1;
    ttsched::info!("heartbeat #{=u32}, led {=bool}", n, LED_ON.load(Ordering::Relaxed));
}

static HEARTBEAT_ID: AtomicU8 = AtomicU8::new(0);

fn stop_heartbeat_task() {
    if SCHEDULER.delete_task(HEARTBEAT_ID.load(Ordering::Relaxed)).is_ok() {
        ttsched::info!("heartbeat stopped");
    }
}

// ============ Main ============

#[entry]
fn main() -> ! {
    led_init();

    SCHEDULER.init();

    // A periodic task is due again `period + 1` ticks after each run
    SCHEDULER.add_task(&blink_task, 0, 499, TaskKind::Preemptive);
    let heartbeat = SCHEDULER.add_task(&heartbeat_task, 1000, 999, TaskKind::Cooperative);
    HEARTBEAT_ID.store(heartbeat, Ordering::Relaxed);
    SCHEDULER.add_task(&stop_heartbeat_task, 10_000, 0, TaskKind::Cooperative);

    ttsched::info!("Starting scheduler with {=usize} tasks", SCHEDULER.task_count());
    SCHEDULER.start().expect("scheduler start failed");

    loop {
        SCHEDULER.dispatch_tasks();
    }
}
