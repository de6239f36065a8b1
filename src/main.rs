//! cutplan - CLI for the material cut-optimization calculators.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use cutplan::parser::{CeilingJob, CutCheckJob, DrywallJob, WallPanelJob};
use cutplan::{
    allocate_room_trim, render_report, run_job, CalcConfig, CeilingPanel, Job, JobReport,
    Measurement, Room, SheetHeight, WallPanelSize,
};

/// Material cut-optimization for drywall, modular ceilings, trim and wall panels.
#[derive(Parser, Debug)]
#[command(name = "cutplan")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Calculator settings as a JSON file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank sheet divisions for a drywall partition
    Drywall {
        /// Wall height in metres
        #[arg(long)]
        height: f64,

        /// Sheet height in metres (1.80 or 2.40)
        #[arg(long, default_value = "2.40", value_parser = parse_sheet)]
        sheet: SheetHeight,

        /// Wall length in metres, to count sheets for the whole wall
        #[arg(long)]
        length: Option<f64>,

        /// Minimum joint distance in metres
        #[arg(long)]
        min_joint: Option<f64>,

        /// Ideal joint offset in metres
        #[arg(long)]
        ideal_offset: Option<f64>,
    },

    /// Estimate ceiling tiles, T-profiles and perimeter trim
    Ceiling {
        /// Tile size (625x625 or 1250x625)
        #[arg(long, default_value = "625x625")]
        panel: CeilingPanel,

        /// Room as WIDTHxLENGTH in metres, repeatable
        #[arg(long = "room", value_parser = parse_room, required = true)]
        rooms: Vec<Room>,
    },

    /// Allocate cantoneira bars for room perimeters
    Trim {
        /// Room as WIDTHxLENGTH in metres, repeatable
        #[arg(long = "room", value_parser = parse_room, required = true)]
        rooms: Vec<Room>,

        /// Stock bar length in metres
        #[arg(long)]
        bar_length: Option<f64>,
    },

    /// Lay out wall panels over a wall
    WallPanel {
        /// Panel size (60x120, 120x240 or 120x300)
        #[arg(long, default_value = "120x240")]
        panel: WallPanelSize,

        /// Wall width in metres
        #[arg(long)]
        width: f64,

        /// Wall height in metres
        #[arg(long)]
        height: f64,
    },

    /// Check piece sizes against a wall panel
    Check {
        /// Panel size (60x120, 120x240 or 120x300)
        #[arg(long, default_value = "120x240")]
        panel: WallPanelSize,

        /// Piece as WIDTHxLENGTH in metres, repeatable
        #[arg(long = "piece", value_parser = parse_measurement, required = true)]
        pieces: Vec<Measurement>,
    },

    /// Run a JSON job file
    Job {
        /// Input job file path
        #[arg(short, long)]
        input: PathBuf,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Validate only, don't calculate
        #[arg(long)]
        validate: bool,
    },
}

fn parse_dimensions(s: &str) -> std::result::Result<(f64, f64), String> {
    let (a, b) = s
        .split_once(|c: char| c == 'x' || c == 'X')
        .ok_or_else(|| format!("expected WIDTHxLENGTH, got '{}'", s))?;
    let width = a
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid width '{}': {}", a, e))?;
    let length = b
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid length '{}': {}", b, e))?;
    Ok((width, length))
}

fn parse_room(s: &str) -> std::result::Result<Room, String> {
    let (width, length) = parse_dimensions(s)?;
    Ok(Room::new(width, length))
}

fn parse_measurement(s: &str) -> std::result::Result<Measurement, String> {
    let (width, length) = parse_dimensions(s)?;
    Ok(Measurement::new(width, length))
}

fn parse_sheet(s: &str) -> std::result::Result<SheetHeight, String> {
    let height = s
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid sheet height '{}': {}", s, e))?;
    SheetHeight::from_meters(height).map_err(|e| e.to_string())
}

fn load_config(path: Option<&Path>) -> Result<CalcConfig> {
    let Some(path) = path else {
        return Ok(CalcConfig::default());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: CalcConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    info!("Loaded settings from {}", path.display());
    Ok(config)
}

fn print_report(report: &JobReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", render_report(report));
    }
    Ok(())
}

fn run_and_print(job: &Job, json: bool) -> Result<()> {
    let report = run_job(job)?;
    print_report(&report, json)?;

    if !report.validation.passed {
        for err in &report.validation.errors {
            error!("{}", err);
        }
        anyhow::bail!("Validation failed");
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Drywall {
            height,
            sheet,
            length,
            min_joint,
            ideal_offset,
        } => {
            if let Some(distance) = min_joint {
                config = config.with_min_joint_distance(distance);
            }
            if let Some(offset) = ideal_offset {
                config = config.with_ideal_offset(offset);
            }
            let job = Job {
                config,
                drywall: vec![DrywallJob {
                    wall_height: height,
                    sheet_height: sheet,
                    wall_length: length,
                }],
                ..Default::default()
            };
            run_and_print(&job, args.json)
        }

        Command::Ceiling { panel, rooms } => {
            let job = Job {
                config,
                ceilings: vec![CeilingJob { panel, rooms }],
                ..Default::default()
            };
            run_and_print(&job, args.json)
        }

        Command::Trim { rooms, bar_length } => {
            if let Some(length) = bar_length {
                config = config.with_trim_bar_length(length);
            }
            config.validate()?;
            let allocation = allocate_room_trim(&rooms, &config)?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&allocation)?);
            } else {
                println!("{}", allocation);
                for (idx, bar) in allocation.bars.iter().enumerate() {
                    let pieces: Vec<String> = bar
                        .segments
                        .iter()
                        .map(|s| {
                            format!(
                                "{:.2}m {} ({}){}",
                                s.length,
                                s.orientation,
                                rooms[s.room].label(s.room),
                                if s.remainder { " remainder" } else { "" }
                            )
                        })
                        .collect();
                    println!(
                        "Bar {:>2}: {} | offcut {:.2}m",
                        idx + 1,
                        pieces.join(" + "),
                        bar.offcut()
                    );
                }
            }
            Ok(())
        }

        Command::WallPanel {
            panel,
            width,
            height,
        } => {
            let job = Job {
                config,
                wall_panels: vec![WallPanelJob {
                    panel,
                    width,
                    height,
                }],
                ..Default::default()
            };
            run_and_print(&job, args.json)
        }

        Command::Check { panel, pieces } => {
            let job = Job {
                config,
                cut_checks: vec![CutCheckJob { panel, pieces }],
                ..Default::default()
            };
            let report = run_job(&job)?;
            print_report(&report, args.json)?;

            let failed = report.cut_checks.iter().any(|c| !c.validation.passed);
            if failed || !report.validation.passed {
                anyhow::bail!("Some pieces do not fit the panel");
            }
            Ok(())
        }

        Command::Job {
            input,
            output,
            validate,
        } => {
            info!("Processing: {}", input.display());

            let mut job = cutplan::parse_job_file(&input)
                .with_context(|| format!("Failed to parse {}", input.display()))?;
            if args.config.is_some() {
                warn!("--config overrides the settings in {}", input.display());
                job.config = config;
            }

            // Validate-only mode
            if validate {
                cutplan::validation::quick_validate(&job).context("Validation failed")?;
                info!("Validation passed");
                return Ok(());
            }

            let Some(output_path) = output else {
                return run_and_print(&job, args.json);
            };

            let report = run_job(&job)?;
            let content = if args.json {
                serde_json::to_string_pretty(&report)?
            } else {
                render_report(&report)
            };
            std::fs::write(&output_path, &content)
                .with_context(|| format!("Failed to write {}", output_path.display()))?;
            info!("Generated: {}", output_path.display());

            if !report.validation.passed {
                anyhow::bail!("Validation failed");
            }
            Ok(())
        }
    }
}
