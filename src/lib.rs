//! weekly-routine - Weekly workout routine planner
//!
//! Builds a seven-day routine from YouTube videos: candidates are fetched per
//! channel and category, deduplicated by URL, and allocated to each weekday
//! under per-day limits on video count and total minutes.
//!
//! # Architecture
//!
//! - Videos come from two pools: *daily* (one recurring pick per day) and
//!   *include* (shared greedy fill, may repeat across days)
//! - Each non-rest day is allocated independently with an explicit RNG, so
//!   a fixed seed reproduces the same week
//! - Days that cannot reach their minimums are kept and reported as
//!   shortfalls rather than errors
//!
//! # Modules
//!
//! - `adapters`: External catalog integrations (YouTube Data API)
//! - `core`: Dedup, scheduler and planner
//! - `domain`: Data structures (Item, Pools, DayPolicy, Schedule)
//! - `config`: Input file and environment
//! - `render`: Markdown / JSON output
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Fetch, schedule and write weekly_routine.md
//! weekly-routine plan --input input_data.json
//!
//! # Save pools once, then reschedule offline
//! weekly-routine fetch -o pools.json
//! weekly-routine schedule pools.json --seed 7
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod render;

// Re-export main types at crate root for convenience
pub use adapters::{CatalogSource, YouTubeCatalog};
pub use crate::core::{allocate, dedupe, SchedulerError};
pub use domain::{DayPolicy, Item, PoolKind, Pools, Schedule, Shortfall, Weekday};
