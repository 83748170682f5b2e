use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Local;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use timetable_grid::config::{self, GridOverrides};
use timetable_grid::input::{self, ScheduleInput};
use timetable_grid::{conflicts, render, report, GridConfig, Timetable};

#[derive(Parser)]
#[command(name = "timetable-grid")]
#[command(about = "Lay out a built course schedule on a weekly time grid", long_about = None)]
struct Cli {
    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render sections as a weekly timetable
    Render {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long, value_enum, default_value = "markdown")]
        format: Format,
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        #[command(flatten)]
        grid: GridArgs,
    },
    /// Print the time-axis labels for the grid
    Labels {
        #[command(flatten)]
        grid: GridArgs,
    },
    /// Report sections that cannot be placed and overlapping classes
    Check {
        #[command(flatten)]
        source: SourceArgs,
        /// Exit with an error when anything is reported
        #[arg(long)]
        strict: bool,
        #[command(flatten)]
        grid: GridArgs,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Markdown,
    Json,
    Html,
}

#[derive(Args)]
struct SourceArgs {
    /// Schedule-build response (.json) or section sheet (.csv)
    #[arg(long)]
    input: PathBuf,
    /// Only sections for this term
    #[arg(long)]
    term: Option<String>,
    /// Only sections of these courses (repeatable)
    #[arg(long = "course")]
    courses: Vec<String>,
}

#[derive(Args)]
struct GridArgs {
    /// TOML file with a [grid] table
    #[arg(long)]
    config: Option<PathBuf>,
    /// First visible time, e.g. 8:00
    #[arg(long, value_parser = config::parse_window_bound)]
    window_start: Option<u32>,
    /// Last visible time, e.g. 19:00
    #[arg(long, value_parser = config::parse_window_bound)]
    window_end: Option<u32>,
    #[arg(long)]
    slot_minutes: Option<u32>,
    #[arg(long)]
    slot_px: Option<f64>,
    #[arg(long)]
    min_visible_px: Option<f64>,
}

impl GridArgs {
    fn resolve(&self) -> anyhow::Result<GridConfig> {
        let overrides = GridOverrides {
            window_start: self.window_start,
            window_end: self.window_end,
            slot_minutes: self.slot_minutes,
            slot_px: self.slot_px,
            minimum_visible_px: self.min_visible_px,
        };
        config::resolve_grid(self.config.as_deref(), &overrides).context("invalid grid configuration")
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Render {
            source,
            format,
            out,
            grid,
        } => {
            let grid = grid.resolve()?;
            let schedule = load(&source)?;
            let timetable = render(&schedule.sections, &grid);
            log_dropped(&timetable);
            if timetable.is_empty() {
                warn!(sections = schedule.sections.len(), "no sections placed on the grid");
            }

            let term = source.term.as_deref().or(schedule.term.as_deref());
            let output = match format {
                Format::Markdown => {
                    report::build_report(term, Local::now().date_naive(), &timetable, &grid)
                }
                Format::Json => serde_json::to_string_pretty(&timetable)?,
                Format::Html => report::build_html(term, &timetable, &grid),
            };

            match out {
                Some(out) => {
                    std::fs::write(&out, output)
                        .with_context(|| format!("failed to write {}", out.display()))?;
                    println!("Timetable written to {}.", out.display());
                }
                None => print!("{output}"),
            }
        }
        Commands::Labels { grid } => {
            let grid = grid.resolve()?;
            for label in grid.time_axis_labels() {
                println!("{label}");
            }
        }
        Commands::Check {
            source,
            strict,
            grid,
        } => {
            let grid = grid.resolve()?;
            let schedule = load(&source)?;
            let timetable = render(&schedule.sections, &grid);
            let overlaps = conflicts::find_overlaps(&timetable);

            println!(
                "Placed {} blocks from {} sections.",
                timetable.block_count(),
                schedule.sections.len()
            );
            for dropped in &timetable.dropped {
                println!(
                    "- {} {} not shown: {}",
                    dropped.course_code, dropped.section_id, dropped.reason
                );
            }
            for overlap in &overlaps {
                println!("- {overlap}");
            }

            let problems = timetable.dropped.len() + overlaps.len();
            if problems == 0 {
                println!("No problems found.");
            } else if strict {
                anyhow::bail!("{problems} problems found");
            }
        }
    }

    Ok(())
}

fn load(source: &SourceArgs) -> anyhow::Result<ScheduleInput> {
    let schedule = read_schedule(&source.input)?;
    let sections = input::filter_sections(schedule.sections, source.term.as_deref(), &source.courses);
    info!(kept = sections.len(), "filtered sections");
    Ok(ScheduleInput {
        term: schedule.term,
        sections,
    })
}

fn read_schedule(path: &Path) -> anyhow::Result<ScheduleInput> {
    input::load_sections(path).with_context(|| format!("failed to load sections from {}", path.display()))
}

fn log_dropped(timetable: &Timetable) {
    for dropped in &timetable.dropped {
        warn!(
            section = %dropped.section_id,
            course = %dropped.course_code,
            reason = %dropped.reason,
            "section not placed on the grid"
        );
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
