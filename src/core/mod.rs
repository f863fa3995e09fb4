//! Core planning logic.
//!
//! This module contains:
//! - Dedup: Collapse repeated fetches by URL into pools
//! - Scheduler: Allocate pool videos to each weekday
//! - Planner: Drive a catalog source over channels and categories

pub mod dedup;
pub mod planner;
pub mod scheduler;

// Re-export commonly used types
pub use dedup::dedupe;
pub use planner::{collect, plan};
pub use scheduler::{allocate, SchedulerError};
