//! Input file and environment configuration.
//!
//! Input file sources (highest priority first):
//! 1. Explicit `--input` path
//! 2. WEEKLY_ROUTINE_INPUT environment variable
//! 3. `./input_data.json` (or `.yaml` / `.yml`)
//! 4. `<config dir>/weekly-routine/input_data.json`
//!
//! The YouTube API key comes from YOUTUBE_API_KEY; a `.env` file in the
//! working directory is loaded first if present.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{DayPolicy, Weekday};

pub const INPUT_ENV: &str = "WEEKLY_ROUTINE_INPUT";
pub const API_KEY_ENV: &str = "YOUTUBE_API_KEY";

const INPUT_FILE_NAMES: [&str; 3] = ["input_data.json", "input_data.yaml", "input_data.yml"];

/// Raw input file schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputData {
    /// Titles containing any of these (case-insensitive) are dropped
    #[serde(default)]
    pub excluded_keywords: Vec<String>,

    #[serde(default)]
    pub youtube_channels: Vec<Channel>,

    #[serde(default)]
    pub exercise_categories: Vec<ExerciseCategory>,

    /// Weekday name to rest flag
    #[serde(default)]
    pub rest_days: BTreeMap<String, bool>,

    #[serde(default)]
    pub daily_video_schedule: ScheduleSettings,

    #[serde(default)]
    pub additional_settings: AdditionalSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub channel_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub include: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseCategory {
    pub category_name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub include: bool,
    /// Videos from this category go to the daily pool
    #[serde(default)]
    pub daily: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSettings {
    #[serde(default = "default_min_duration")]
    pub min_duration_minutes: u32,
    #[serde(default = "default_max_duration")]
    pub max_duration_minutes: u32,
    #[serde(default = "default_min_videos")]
    pub min_videos_per_day: usize,
    #[serde(default = "default_max_videos")]
    pub max_videos_per_day: usize,
}

fn default_min_duration() -> u32 {
    30
}
fn default_max_duration() -> u32 {
    60
}
fn default_min_videos() -> usize {
    1
}
fn default_max_videos() -> usize {
    3
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            min_duration_minutes: default_min_duration(),
            max_duration_minutes: default_max_duration(),
            min_videos_per_day: default_min_videos(),
            max_videos_per_day: default_max_videos(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdditionalSettings {
    #[serde(default)]
    pub show_thumbnail: bool,
    #[serde(default)]
    pub show_duration: bool,
}

/// Inconsistent schedule limits in the input file
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("min_duration_minutes ({min}) is greater than max_duration_minutes ({max})")]
    DurationRange { min: u32, max: u32 },

    #[error("min_videos_per_day ({min}) is greater than max_videos_per_day ({max})")]
    ItemRange { min: usize, max: usize },
}

impl InputData {
    /// Rest days flagged `true`; unknown day names are ignored with a warning
    pub fn rest_days(&self) -> Vec<Weekday> {
        self.rest_days
            .iter()
            .filter(|(_, rest)| **rest)
            .filter_map(|(name, _)| match name.parse::<Weekday>() {
                Ok(day) => Some(day),
                Err(_) => {
                    warn!(day = %name, "Ignoring unknown rest day");
                    None
                }
            })
            .collect()
    }

    /// Build the scheduler policy, rejecting inverted ranges
    pub fn policy(&self) -> Result<DayPolicy, PolicyError> {
        let s = &self.daily_video_schedule;
        if s.min_duration_minutes > s.max_duration_minutes {
            return Err(PolicyError::DurationRange {
                min: s.min_duration_minutes,
                max: s.max_duration_minutes,
            });
        }
        if s.min_videos_per_day > s.max_videos_per_day {
            return Err(PolicyError::ItemRange {
                min: s.min_videos_per_day,
                max: s.max_videos_per_day,
            });
        }

        Ok(DayPolicy {
            rest_days: self.rest_days().into_iter().collect(),
            min_duration: s.min_duration_minutes,
            max_duration: s.max_duration_minutes,
            min_items: s.min_videos_per_day,
            max_items: s.max_videos_per_day,
        })
    }

    /// Channels flagged for inclusion
    pub fn included_channels(&self) -> impl Iterator<Item = &Channel> {
        self.youtube_channels.iter().filter(|c| c.include)
    }

    /// Categories flagged for inclusion
    pub fn included_categories(&self) -> impl Iterator<Item = &ExerciseCategory> {
        self.exercise_categories.iter().filter(|c| c.include)
    }
}

/// Per-user fallback location for the input file
fn user_input_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("weekly-routine"))
}

/// Find the first existing input file in `dir`
fn find_in_dir(dir: &Path) -> Option<PathBuf> {
    INPUT_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Resolve which input file to use
pub fn find_input_file(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Ok(env_path) = std::env::var(INPUT_ENV) {
        return Ok(PathBuf::from(env_path));
    }

    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    if let Some(path) = find_in_dir(&cwd) {
        return Ok(path);
    }

    if let Some(path) = user_input_dir().and_then(|dir| find_in_dir(&dir)) {
        return Ok(path);
    }

    anyhow::bail!(
        "No input file found. Pass --input, set {}, or create {} in the current directory",
        INPUT_ENV,
        INPUT_FILE_NAMES[0]
    )
}

/// Load and parse an input file (JSON, or YAML by extension)
pub fn load_input_file(path: &Path) -> Result<InputData> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;

    debug!(path = %path.display(), "Loaded input file");

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse input file: {}", path.display())),
        _ => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse input file: {}", path.display())),
    }
}

/// Get the YouTube API key
pub fn api_key() -> Result<String> {
    dotenvy::dotenv().ok();

    std::env::var(API_KEY_ENV)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .with_context(|| format!("YouTube API key is not set ({})", API_KEY_ENV))
}
