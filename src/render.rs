//! Renders a finished schedule as a Markdown routine or JSON.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::config::AdditionalSettings;
use crate::domain::Schedule;

pub const DEFAULT_TITLE: &str = "WEEKLY WORKOUT ROUTINE";

/// Output options for the Markdown routine
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub title: String,
    pub show_thumbnail: bool,
    pub show_duration: bool,
    /// Stamp written under the title
    pub generated_at: Option<DateTime<Utc>>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            show_thumbnail: false,
            show_duration: false,
            generated_at: None,
        }
    }
}

impl From<&AdditionalSettings> for RenderOptions {
    fn from(settings: &AdditionalSettings) -> Self {
        Self {
            show_thumbnail: settings.show_thumbnail,
            show_duration: settings.show_duration,
            ..Default::default()
        }
    }
}

impl RenderOptions {
    pub fn with_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }
}

/// Render the schedule as a Markdown document
pub fn render_markdown(schedule: &Schedule, options: &RenderOptions) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n", options.title));
    if let Some(at) = options.generated_at {
        out.push_str(&format!("\n_Generated {}_\n", at.format("%Y-%m-%d %H:%M UTC")));
    }
    out.push('\n');

    for (day, items) in schedule.iter() {
        out.push_str(&format!("## {}\n", day));

        if items.is_empty() {
            out.push_str("\n*Rest Day*\n\n");
        } else if options.show_duration {
            out.push_str(&format!("\n({} min)\n\n", schedule.total_duration(day)));
        } else {
            out.push('\n');
        }

        if let Some(shortfall) = schedule.shortfall(day) {
            if !items.is_empty() {
                out.push_str(&format!(
                    "> Below target: {} videos / {} min (aim for {} videos / {} min)\n\n",
                    shortfall.items, shortfall.duration, shortfall.min_items, shortfall.min_duration
                ));
            }
        }

        for item in items {
            if options.show_thumbnail && !item.thumbnail_ref.is_empty() {
                out.push_str(&format!("![{}]({})\n\n", item.title, item.thumbnail_ref));
            }
            out.push_str(&format!("**{}**\n", item.title));
            if options.show_duration {
                out.push_str(&format!("<{}> ({} min)\n\n", item.url, item.duration_minutes));
            } else {
                out.push_str(&format!("<{}>\n\n", item.url));
            }
        }

        out.push_str("---\n\n");
    }

    out
}

/// Render the schedule, including shortfalls, as pretty JSON
pub fn render_json(schedule: &Schedule) -> Result<String> {
    serde_json::to_string_pretty(schedule).context("Failed to serialize schedule")
}

/// Write rendered output to disk, creating parent directories
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write output: {}", path.display()))
}
