//! Week scheduler: allocates videos from the pools to each weekday.
//!
//! Every non-rest day is filled independently, Monday through Sunday:
//!
//! 1. Seed with one random daily video (if it fits the duration cap)
//! 2. Greedy fill from a fresh shuffle of the include pool
//! 3. Top up with random include videos while below the minimums
//! 4. Trim to `max_items`
//!
//! Pools are read-only for the whole pass. Include videos may repeat across
//! days and daily videos are never depleted. A day that cannot reach its
//! minimums is accepted and reported as a [`Shortfall`].

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{DayPolicy, Item, Pools, Schedule, Shortfall, Weekday};

/// Fatal scheduling errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    #[error("No available days for scheduling. Please update the rest days configuration.")]
    NoAvailableDays,
}

/// Build a week schedule from the pools.
///
/// All randomness comes from `rng`, so a seeded generator gives a
/// reproducible schedule.
pub fn allocate<R>(pools: &Pools, policy: &DayPolicy, rng: &mut R) -> Result<Schedule, SchedulerError>
where
    R: Rng + ?Sized,
{
    let available_days = policy.available_days();
    if available_days.is_empty() {
        return Err(SchedulerError::NoAvailableDays);
    }

    info!(days = ?available_days, "Generating weekly schedule");
    debug!(
        daily = pools.daily.len(),
        include = pools.include.len(),
        "Candidate pools"
    );

    let mut schedule = Schedule::new();

    for day in available_days {
        let selection = allocate_day(day, pools, policy, rng);
        let items: Vec<Item> = selection.items.into_iter().cloned().collect();
        let duration: u32 = items.iter().map(|item| item.duration_minutes).sum();

        info!(
            %day,
            videos = items.len(),
            duration,
            "Final schedule for day"
        );

        if items.len() < policy.min_items || duration < policy.min_duration {
            let shortfall = Shortfall {
                day,
                items: items.len(),
                duration,
                min_items: policy.min_items,
                min_duration: policy.min_duration,
            };
            info!(%shortfall, "Day is below its minimum");
            schedule.shortfalls.push(shortfall);
        }

        schedule.days.insert(day, items);
    }

    Ok(schedule)
}

/// Working state for one day, indexed over the include pool snapshot
struct DaySelection<'a> {
    items: Vec<&'a Item>,
    /// Include-pool indices already selected today
    taken: Vec<bool>,
    total: u32,
}

impl<'a> DaySelection<'a> {
    fn new(include_len: usize) -> Self {
        Self {
            items: Vec::new(),
            taken: vec![false; include_len],
            total: 0,
        }
    }

    /// Whether adding `item` keeps the day within `max_duration`
    fn fits(&self, item: &Item, max_duration: u32) -> bool {
        self.total
            .checked_add(item.duration_minutes)
            .is_some_and(|total| total <= max_duration)
    }

    fn push(&mut self, item: &'a Item) {
        self.total += item.duration_minutes;
        self.items.push(item);
    }

    fn push_include(&mut self, index: usize, item: &'a Item) {
        self.taken[index] = true;
        self.push(item);
    }

    fn below_minimum(&self, policy: &DayPolicy) -> bool {
        self.items.len() < policy.min_items || self.total < policy.min_duration
    }

    fn at_capacity(&self, policy: &DayPolicy) -> bool {
        self.items.len() >= policy.max_items || self.total >= policy.max_duration
    }
}

fn allocate_day<'a, R>(
    day: Weekday,
    pools: &'a Pools,
    policy: &DayPolicy,
    rng: &mut R,
) -> DaySelection<'a>
where
    R: Rng + ?Sized,
{
    let max_duration = policy.max_duration;
    let mut selection = DaySelection::new(pools.include.len());

    // Daily video: stays in the pool for the following days
    if let Some(daily) = pools.daily.choose(rng) {
        if daily.duration_minutes <= max_duration {
            info!(
                %day,
                title = %daily.title,
                duration = daily.duration_minutes,
                "Added daily video"
            );
            selection.push(daily);
        } else {
            debug!(%day, title = %daily.title, "Daily video exceeds max duration");
        }
    }

    // Greedy fill over a fresh permutation
    let mut candidates: Vec<usize> = pools
        .include
        .iter()
        .enumerate()
        .filter(|(_, item)| item.duration_minutes <= max_duration)
        .map(|(index, _)| index)
        .collect();
    candidates.shuffle(rng);

    for index in candidates {
        if selection.at_capacity(policy) {
            break;
        }
        let item = &pools.include[index];
        if selection.fits(item, max_duration) {
            info!(
                %day,
                title = %item.title,
                duration = item.duration_minutes,
                "Added weekly video"
            );
            selection.push_include(index, item);
        }
    }

    // Top-up draws from the include pool only
    while selection.below_minimum(policy) && !selection.at_capacity(policy) {
        let valid: Vec<usize> = pools
            .include
            .iter()
            .enumerate()
            .filter(|(index, item)| !selection.taken[*index] && selection.fits(item, max_duration))
            .map(|(index, _)| index)
            .collect();

        let Some(&index) = valid.choose(rng) else {
            info!(%day, "No more valid videos to add without exceeding daily duration");
            break;
        };

        let item = &pools.include[index];
        info!(
            %day,
            title = %item.title,
            duration = item.duration_minutes,
            "Added additional video"
        );
        selection.push_include(index, item);
    }

    if selection.items.len() > policy.max_items {
        selection.items.truncate(policy.max_items);
        selection.total = selection.items.iter().map(|item| item.duration_minutes).sum();
    }

    selection
}
