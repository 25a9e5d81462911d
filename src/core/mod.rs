//! Core scheduler modules
//!
//! Contains the task table, tick handler, dispatcher and the scheduler façade.

pub mod config;
pub mod critical;
pub mod error;
pub mod kernel;
pub mod types;
pub mod task;
pub mod sched;
pub mod time;
pub mod cs_cell;
