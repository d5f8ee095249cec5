//! Background Tasks Module
//!
//! The store never schedules work itself. Owners that want periodic expiry
//! purges spawn the task from here.
//!
//! # Tasks
//! - Expiry Sweep: Removes expired objects at a fixed interval

mod sweep;

pub use sweep::spawn_sweep_task;
