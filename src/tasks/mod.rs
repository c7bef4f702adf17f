//! Background Tasks Module
//!
//! Periodic maintenance for the in-process store backend.

mod cleanup;

pub use cleanup::spawn_sweep_task;
