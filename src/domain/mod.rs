//! Domain types for the weekly routine planner.
//!
//! This module contains the core data structures:
//! - Item: A schedulable video and the pools it is drawn from
//! - Schedule: Weekdays, day policy and the finished week

pub mod item;
pub mod schedule;

// Re-export commonly used types
pub use item::{Item, PoolKind, Pools};
pub use schedule::{DayPolicy, Schedule, Shortfall, Weekday};
