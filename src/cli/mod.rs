//! Command-line interface for weekly-routine.
//!
//! Provides commands for fetching candidate videos, building a week
//! schedule from them, and inspecting the resolved configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::adapters::{YouTubeCatalog, DEFAULT_MAX_RESULTS};
use crate::config::{self, InputData};
use crate::core::{allocate, plan};
use crate::domain::{Pools, Schedule};
use crate::render::{self, RenderOptions};

/// weekly-routine - Build a weekly workout routine from YouTube videos
#[derive(Parser, Debug)]
#[command(name = "weekly-routine")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch videos, build the schedule and write the routine
    Plan {
        /// Input file (searched for if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file
        #[arg(short, long, default_value = "weekly_routine.md")]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "markdown")]
        format: OutputFormat,

        /// Random seed for a reproducible schedule
        #[arg(long, env = "WEEKLY_ROUTINE_SEED")]
        seed: Option<u64>,

        /// Search results requested per channel and category
        #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
        max_results: u32,

        /// Also save the fetched pools as JSON
        #[arg(long)]
        save_pools: Option<PathBuf>,
    },

    /// Fetch and deduplicate videos into a pools file
    Fetch {
        /// Input file (searched for if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Pools output file
        #[arg(short, long, default_value = "pools.json")]
        output: PathBuf,

        /// Search results requested per channel and category
        #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
        max_results: u32,
    },

    /// Build the schedule from a saved pools file (no network)
    Schedule {
        /// Pools file written by `fetch`
        pools: PathBuf,

        /// Input file for schedule limits and rest days
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (prints to stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "markdown")]
        format: OutputFormat,

        /// Random seed for a reproducible schedule
        #[arg(long, env = "WEEKLY_ROUTINE_SEED")]
        seed: Option<u64>,
    },

    /// Show resolved configuration (debug)
    Config {
        /// Input file (searched for if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

/// Rendered output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Markdown routine document
    Markdown,

    /// Schedule and shortfalls as JSON
    Json,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Plan {
                input,
                output,
                format,
                seed,
                max_results,
                save_pools,
            } => {
                run_plan(input, &output, format, seed, max_results, save_pools).await
            }
            Commands::Fetch {
                input,
                output,
                max_results,
            } => {
                run_fetch(input, &output, max_results).await
            }
            Commands::Schedule {
                pools,
                input,
                output,
                format,
                seed,
            } => {
                run_schedule(&pools, input, output, format, seed)
            }
            Commands::Config { input } => {
                show_config(input)
            }
        }
    }
}

/// Seeded generator if a seed is given, otherwise from OS entropy
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn load_input(explicit: Option<PathBuf>) -> Result<(PathBuf, InputData)> {
    let path = config::find_input_file(explicit.as_deref())?;
    let input = config::load_input_file(&path)?;
    Ok((path, input))
}

async fn fetch_pools(input: &InputData, max_results: u32) -> Result<Pools> {
    let catalog = YouTubeCatalog::new(config::api_key()?);
    Ok(plan(&catalog, input, max_results).await)
}

/// Allocate the week and render it in the requested format
pub fn build_routine(
    pools: &Pools,
    input: &InputData,
    format: OutputFormat,
    seed: Option<u64>,
) -> Result<(Schedule, String)> {
    let policy = input.policy()?;
    let mut rng = make_rng(seed);
    let schedule = allocate(pools, &policy, &mut rng)?;

    let rendered = match format {
        OutputFormat::Markdown => {
            let options =
                RenderOptions::from(&input.additional_settings).with_timestamp(Utc::now());
            render::render_markdown(&schedule, &options)
        }
        OutputFormat::Json => render::render_json(&schedule)?,
    };

    Ok((schedule, rendered))
}

fn print_shortfalls(schedule: &Schedule) {
    if schedule.shortfalls.is_empty() {
        return;
    }
    eprintln!("\nDays below target:");
    for shortfall in &schedule.shortfalls {
        eprintln!("  {}", shortfall);
    }
}

fn write_pools(path: &Path, pools: &Pools) -> Result<()> {
    let json = serde_json::to_string_pretty(pools).context("Failed to serialize pools")?;
    render::write_output(path, &json)
}

fn read_pools(path: &Path) -> Result<Pools> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read pools file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse pools file: {}", path.display()))
}

/// Fetch, schedule and write the routine
async fn run_plan(
    input_path: Option<PathBuf>,
    output: &Path,
    format: OutputFormat,
    seed: Option<u64>,
    max_results: u32,
    save_pools: Option<PathBuf>,
) -> Result<()> {
    let (path, input) = load_input(input_path)?;
    info!(path = %path.display(), "Using input file");

    // Fail on bad limits before spending API quota
    input.policy()?;

    let pools = fetch_pools(&input, max_results).await?;
    if let Some(pools_path) = save_pools {
        write_pools(&pools_path, &pools)?;
        eprintln!("Saved pools to {}", pools_path.display());
    }

    if pools.is_empty() {
        eprintln!("No videos were fetched. Check the channel IDs, keywords and API key.");
        return Ok(());
    }

    let (schedule, rendered) = build_routine(&pools, &input, format, seed)?;
    render::write_output(output, &rendered)?;

    info!(path = %output.display(), "Weekly routine saved");
    eprintln!("Weekly routine saved to {}", output.display());
    print_shortfalls(&schedule);

    Ok(())
}

/// Fetch and save pools only
async fn run_fetch(input_path: Option<PathBuf>, output: &Path, max_results: u32) -> Result<()> {
    let (_, input) = load_input(input_path)?;
    let pools = fetch_pools(&input, max_results).await?;

    write_pools(output, &pools)?;
    eprintln!(
        "Saved {} daily and {} include videos to {}",
        pools.daily.len(),
        pools.include.len(),
        output.display()
    );

    Ok(())
}

/// Schedule from a saved pools file
fn run_schedule(
    pools_path: &Path,
    input_path: Option<PathBuf>,
    output: Option<PathBuf>,
    format: OutputFormat,
    seed: Option<u64>,
) -> Result<()> {
    let (_, input) = load_input(input_path)?;
    let pools = read_pools(pools_path)?;

    let (schedule, rendered) = build_routine(&pools, &input, format, seed)?;

    match output {
        Some(path) => {
            render::write_output(&path, &rendered)?;
            eprintln!("Weekly routine saved to {}", path.display());
        }
        None => println!("{}", rendered),
    }
    print_shortfalls(&schedule);

    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config(input_path: Option<PathBuf>) -> Result<()> {
    let (path, input) = load_input(input_path)?;

    println!("Input file: {}", path.display());
    println!(
        "API key:    {}",
        if config::api_key().is_ok() { "set" } else { "(not set)" }
    );
    println!();

    println!("Channels:");
    for channel in &input.youtube_channels {
        println!(
            "  [{}] {} {}",
            if channel.include { "x" } else { " " },
            channel.channel_id,
            channel.name.as_deref().unwrap_or("")
        );
    }
    println!();

    println!("Categories:");
    for category in &input.exercise_categories {
        println!(
            "  [{}] {:<20} {:<8} {}",
            if category.include { "x" } else { " " },
            category.category_name,
            if category.daily { "daily" } else { "include" },
            category.keywords.join(", ")
        );
    }
    println!();

    if !input.excluded_keywords.is_empty() {
        println!("Excluded keywords: {}", input.excluded_keywords.join(", "));
        println!();
    }

    let policy = input.policy()?;
    println!("Schedule limits:");
    println!("  Duration: {}-{} min", policy.min_duration, policy.max_duration);
    println!("  Videos:   {}-{} per day", policy.min_items, policy.max_items);
    let rest: Vec<String> = policy.rest_days.iter().map(|d| d.to_string()).collect();
    println!(
        "  Rest days: {}",
        if rest.is_empty() { "(none)".to_string() } else { rest.join(", ") }
    );

    Ok(())
}
