//! Weekdays, per-day policy and the finished week schedule.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::item::Item;

/// Day of the week, ordered Monday first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All seven days in scheduling order
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Weekday {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "monday" | "mon" => Ok(Weekday::Monday),
            "tuesday" | "tue" => Ok(Weekday::Tuesday),
            "wednesday" | "wed" => Ok(Weekday::Wednesday),
            "thursday" | "thu" => Ok(Weekday::Thursday),
            "friday" | "fri" => Ok(Weekday::Friday),
            "saturday" | "sat" => Ok(Weekday::Saturday),
            "sunday" | "sun" => Ok(Weekday::Sunday),
            _ => anyhow::bail!("Unknown weekday: {}", s),
        }
    }
}

/// Limits applied to every non-rest day.
///
/// `min_duration <= max_duration` and `min_items <= max_items` are the
/// caller's responsibility; the scheduler does not re-check them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPolicy {
    #[serde(default)]
    pub rest_days: BTreeSet<Weekday>,
    pub min_duration: u32,
    pub max_duration: u32,
    pub min_items: usize,
    pub max_items: usize,
}

impl DayPolicy {
    /// Days that receive an allocation, in scheduling order
    pub fn available_days(&self) -> Vec<Weekday> {
        Weekday::ALL
            .into_iter()
            .filter(|day| !self.rest_days.contains(day))
            .collect()
    }

    pub fn is_rest_day(&self, day: Weekday) -> bool {
        self.rest_days.contains(&day)
    }
}

/// A non-rest day that ended up below its minimum item count or duration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    pub day: Weekday,
    pub items: usize,
    pub duration: u32,
    pub min_items: usize,
    pub min_duration: u32,
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} videos / {} min (target {} videos / {} min)",
            self.day, self.items, self.duration, self.min_items, self.min_duration
        )
    }
}

/// The finished week: one entry for every weekday, rest days empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub days: BTreeMap<Weekday, Vec<Item>>,

    /// Days accepted below their minimums
    #[serde(default)]
    pub shortfalls: Vec<Shortfall>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new()
    }
}

impl Schedule {
    /// Create a schedule with every day empty
    pub fn new() -> Self {
        Self {
            days: Weekday::ALL.into_iter().map(|day| (day, Vec::new())).collect(),
            shortfalls: Vec::new(),
        }
    }

    pub fn day(&self, day: Weekday) -> &[Item] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total minutes scheduled for a day
    pub fn total_duration(&self, day: Weekday) -> u32 {
        self.day(day).iter().map(|item| item.duration_minutes).sum()
    }

    pub fn shortfall(&self, day: Weekday) -> Option<&Shortfall> {
        self.shortfalls.iter().find(|s| s.day == day)
    }

    /// Iterate days in weekday order
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[Item])> {
        self.days.iter().map(|(day, items)| (*day, items.as_slice()))
    }
}
