//! Week Scheduler Integration Tests
//!
//! Tests for allocation invariants, reproducibility and the fatal
//! all-rest-days path.

use std::collections::{BTreeSet, HashSet};

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use weekly_routine::{allocate, DayPolicy, Item, Pools, SchedulerError, Weekday};

fn video(id: &str, duration: u32) -> Item {
    Item::new(
        id,
        format!("Video {}", id),
        format!("https://www.youtube.com/watch?v={}", id),
        duration,
    )
}

fn policy(min_duration: u32, max_duration: u32, min_items: usize, max_items: usize) -> DayPolicy {
    DayPolicy {
        rest_days: BTreeSet::new(),
        min_duration,
        max_duration,
        min_items,
        max_items,
    }
}

#[test]
fn test_same_seed_same_schedule() {
    let pools = Pools::new(
        vec![video("d1", 10), video("d2", 15)],
        (0..10).map(|i| video(&format!("v{}", i), 5 + i * 4)).collect(),
    );
    let policy = policy(30, 60, 2, 4);

    let a = allocate(&pools, &policy, &mut StdRng::seed_from_u64(1234)).unwrap();
    let b = allocate(&pools, &policy, &mut StdRng::seed_from_u64(1234)).unwrap();

    assert_eq!(a, b);
}

#[test]
fn test_schedule_always_has_seven_days() {
    let mut policy = policy(0, 60, 0, 3);
    policy.rest_days = [Weekday::Wednesday, Weekday::Sunday].into_iter().collect();

    let pools = Pools::new(Vec::new(), vec![video("a", 20), video("b", 30)]);
    let schedule = allocate(&pools, &policy, &mut StdRng::seed_from_u64(5)).unwrap();

    assert_eq!(schedule.days.len(), 7);
    assert!(schedule.day(Weekday::Wednesday).is_empty());
    assert!(schedule.day(Weekday::Sunday).is_empty());
    assert!(!schedule.day(Weekday::Monday).is_empty());
}

#[test]
fn test_all_rest_days_produces_no_schedule() {
    let mut policy = policy(30, 60, 1, 3);
    policy.rest_days = Weekday::ALL.into_iter().collect();

    let pools = Pools::new(vec![video("d", 10)], vec![video("a", 20)]);
    let result = allocate(&pools, &policy, &mut StdRng::seed_from_u64(0));

    match result {
        Err(SchedulerError::NoAvailableDays) => {}
        other => panic!("Expected NoAvailableDays, got {:?}", other),
    }
}

#[test]
fn test_daily_video_recurs_every_day() {
    let pools = Pools::new(
        vec![video("daily", 15)],
        vec![video("a", 20), video("b", 25)],
    );
    let schedule = allocate(&pools, &policy(0, 60, 0, 3), &mut StdRng::seed_from_u64(8)).unwrap();

    for day in Weekday::ALL {
        let items = schedule.day(day);
        assert_eq!(items[0].id, "daily", "{} should start with the daily video", day);
    }
}

#[test]
fn test_daily_and_include_scenario() {
    let pools = Pools::new(
        vec![video("d30", 30)],
        vec![video("i20", 20), video("i15", 15), video("i25", 25), video("i50", 50)],
    );
    let policy = policy(30, 60, 2, 4);

    for seed in 0..20 {
        let schedule = allocate(&pools, &policy, &mut StdRng::seed_from_u64(seed)).unwrap();
        assert!(schedule.shortfalls.is_empty());

        for day in Weekday::ALL {
            let items = schedule.day(day);
            let total = schedule.total_duration(day);

            assert_eq!(items[0].id, "d30");
            assert_eq!(items.len(), 2);
            assert!((30..=60).contains(&total), "{} total {} out of band", day, total);
            assert!(items.iter().all(|i| i.id != "i50"));
        }
    }
}

#[test]
fn test_empty_pools_give_empty_days() {
    let schedule = allocate(
        &Pools::default(),
        &policy(30, 60, 2, 4),
        &mut StdRng::seed_from_u64(3),
    )
    .unwrap();

    assert!(schedule.iter().all(|(_, items)| items.is_empty()));
    assert_eq!(schedule.shortfalls.len(), 7);
}

#[test]
fn test_minimums_reached_when_pool_allows() {
    let pools = Pools::new(
        Vec::new(),
        (0..8).map(|i| video(&format!("v{}", i), 10)).collect(),
    );
    let policy = policy(40, 60, 3, 5);

    let schedule = allocate(&pools, &policy, &mut StdRng::seed_from_u64(77)).unwrap();

    assert!(schedule.shortfalls.is_empty());
    for day in Weekday::ALL {
        assert!(schedule.day(day).len() >= 3);
        assert!(schedule.total_duration(day) >= 40);
    }
}

#[test]
fn test_shortfall_reported_not_raised() {
    let pools = Pools::new(Vec::new(), vec![video("a", 10)]);
    let mut policy = policy(30, 60, 2, 3);
    policy.rest_days = [Weekday::Saturday, Weekday::Sunday].into_iter().collect();

    let schedule = allocate(&pools, &policy, &mut StdRng::seed_from_u64(2)).unwrap();

    assert_eq!(schedule.shortfalls.len(), 5);
    let monday = schedule.shortfall(Weekday::Monday).unwrap();
    assert_eq!(monday.items, 1);
    assert_eq!(monday.duration, 10);
    assert!(schedule.shortfall(Weekday::Sunday).is_none());
}

fn arb_case() -> impl Strategy<Value = (Pools, DayPolicy)> {
    (
        prop::collection::vec(0u32..=90, 0..3),
        prop::collection::vec(0u32..=90, 0..12),
        0u32..=150,
        0u32..=150,
        0usize..=6,
        0usize..=6,
        0u8..127,
    )
        .prop_map(|(daily, include, d1, d2, n1, n2, rest_mask)| {
            let pools = Pools::new(
                daily
                    .into_iter()
                    .enumerate()
                    .map(|(i, d)| video(&format!("d{}", i), d))
                    .collect(),
                include
                    .into_iter()
                    .enumerate()
                    .map(|(i, d)| video(&format!("i{}", i), d))
                    .collect(),
            );
            let rest_days = Weekday::ALL
                .into_iter()
                .enumerate()
                .filter(|(i, _)| rest_mask & (1 << i) != 0)
                .map(|(_, day)| day)
                .collect();
            let policy = DayPolicy {
                rest_days,
                min_duration: d1.min(d2),
                max_duration: d1.max(d2),
                min_items: n1.min(n2),
                max_items: n1.max(n2),
            };
            (pools, policy)
        })
}

proptest! {
    #[test]
    fn allocation_respects_limits((pools, policy) in arb_case(), seed in any::<u64>()) {
        let schedule = allocate(&pools, &policy, &mut StdRng::seed_from_u64(seed)).unwrap();

        prop_assert_eq!(schedule.days.len(), 7);

        for day in Weekday::ALL {
            let items = schedule.day(day);
            if policy.is_rest_day(day) {
                prop_assert!(items.is_empty());
                prop_assert!(schedule.shortfall(day).is_none());
                continue;
            }

            let total = schedule.total_duration(day);
            prop_assert!(total <= policy.max_duration);
            prop_assert!(items.len() <= policy.max_items);

            let include_urls: Vec<&str> = items
                .iter()
                .filter(|i| i.id.starts_with('i'))
                .map(|i| i.url.as_str())
                .collect();
            let unique: HashSet<&str> = include_urls.iter().copied().collect();
            prop_assert_eq!(unique.len(), include_urls.len());

            let below = items.len() < policy.min_items || total < policy.min_duration;
            prop_assert_eq!(below, schedule.shortfall(day).is_some());
        }
    }

    #[test]
    fn allocation_is_deterministic((pools, policy) in arb_case(), seed in any::<u64>()) {
        let a = allocate(&pools, &policy, &mut StdRng::seed_from_u64(seed)).unwrap();
        let b = allocate(&pools, &policy, &mut StdRng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(a, b);
    }
}
