mod logger;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{ArgAction, Parser, Subcommand};
use print_surface::*;
use std::path::{Path, PathBuf};

use crate::logger::CliLogger;

#[derive(Parser)]
#[command(name = "psurf", about = "Print surface geometry tools", version)]
struct Cli {
    /// Engine options JSON (defaults apply when omitted)
    #[arg(long, global = true)]
    options: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute and validate the bleed rectangle of a print area
    Bleed {
        /// Print area as X,Y,W,H in canvas units
        #[arg(long, value_parser = parse_rect)]
        print: Rect,

        /// Same bleed on every side
        #[arg(long, conflicts_with = "separate")]
        uniform: Option<f64>,

        /// Per-side bleed as TOP,RIGHT,BOTTOM,LEFT
        #[arg(long, value_parser = parse_margins)]
        separate: Option<Margins>,
    },

    /// Validate a saved surface record
    Check {
        /// Surface record JSON
        record: PathBuf,
    },

    /// Show where the bleed area lands on the background image
    Map {
        /// Surface record JSON
        record: PathBuf,

        /// Horizontal center override, percent
        #[arg(long)]
        center_x: Option<f64>,

        /// Vertical center override, percent
        #[arg(long)]
        center_y: Option<f64>,

        /// Scale override
        #[arg(long)]
        scale: Option<f64>,

        /// Write the updated mapping back to the record
        #[arg(long)]
        save: bool,
    },

    /// Write a starter surface record
    Init {
        /// Output record JSON
        record: PathBuf,

        /// Print area as X,Y,W,H (defaults to a centered area)
        #[arg(long, value_parser = parse_rect)]
        print: Option<Rect>,

        /// Enable the default bleed
        #[arg(long)]
        bleed: bool,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn parse_numbers<const N: usize>(s: &str) -> Result<[f64; N], String> {
    let values = s
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| format!("'{}': {}", part.trim(), e))
        })
        .collect::<Result<Vec<_>, _>>()?;
    values
        .try_into()
        .map_err(|v: Vec<f64>| format!("expected {} comma-separated numbers, got {}", N, v.len()))
}

fn parse_rect(s: &str) -> Result<Rect, String> {
    let [x, y, width, height] = parse_numbers::<4>(s)?;
    Ok(Rect::new(x, y, width, height))
}

fn parse_margins(s: &str) -> Result<Margins, String> {
    let [top, right, bottom, left] = parse_numbers::<4>(s)?;
    Ok(Margins {
        top,
        right,
        bottom,
        left,
    })
}

fn format_rect(rect: &Rect) -> String {
    format!(
        "x={} y={} w={} h={}",
        rect.x, rect.y, rect.width, rect.height
    )
}

fn print_report(title: &str, report: &ValidationReport) {
    if report.is_valid() {
        println!("  {}: ok", title);
    } else {
        println!("  {}:", title);
        for message in report.messages() {
            println!("    - {}", message);
        }
    }
}

/// Bounds check of the bleed area on the background; `None` when the mapping is off
fn mapping_bounds(editor: &SurfaceEditor, mapping: &BackgroundMapping) -> Option<ValidationReport> {
    mapping.enabled.then(|| {
        validate_mapping_bounds(
            mapping,
            Some(&editor.print_area()),
            editor.bleed_area(),
            editor.options().display_size,
        )
    })
}

async fn load_options(path: Option<&Path>) -> Result<SurfaceOptions> {
    let options = match path {
        Some(path) => SurfaceOptions::load(path)
            .await
            .with_context(|| format!("loading options from {}", path.display()))?,
        None => SurfaceOptions::default(),
    };
    options.validate()?;
    Ok(options)
}

async fn load_record(path: &Path) -> Result<SurfaceRecord> {
    SurfaceRecord::load(path)
        .await
        .with_context(|| format!("loading surface record from {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = CliLogger::from_verbosity(cli.verbose).init() {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let options = load_options(cli.options.as_deref()).await?;

    match cli.command {
        Commands::Bleed {
            print,
            uniform,
            separate,
        } => {
            let bleed_area = match (uniform, separate) {
                (Some(value), _) => Some(BleedArea::uniform(value)),
                (None, Some(margins)) => Some(BleedArea::separate(margins)),
                (None, None) => None,
            };

            let bounds = calculate_bleed_bounds(&print, bleed_area.as_ref());
            println!("Print area:  {}", format_rect(&print));
            println!("Bleed area:  {}", format_rect(&bounds));

            let mut report = validate_print_area(&print, options.canvas_size);
            report.merge(validate_bleed_area(
                bleed_area.as_ref(),
                &print,
                options.canvas_size,
                options.max_bleed,
            ));
            print_report("Validation", &report);

            if !report.is_valid() {
                bail!("bleed area is invalid ({} error(s))", report.errors.len());
            }
        }

        Commands::Check { record } => {
            let surface = load_record(&record).await?;
            let report = surface.validate(&options);

            println!("Surface {}:", record.display());
            print_report("Print area", &report.print_area);
            print_report("Bleed", &report.bleed);
            match &report.mapping {
                Some(mapping) => print_report("Background mapping", mapping),
                None => println!("  Background mapping: disabled"),
            }
            if let Some(image) = &report.background_image {
                print_report("Background image", image);
            }

            if !report.is_valid() {
                bail!(
                    "surface is invalid ({} error(s))",
                    report.combined().errors.len()
                );
            }
        }

        Commands::Map {
            record,
            center_x,
            center_y,
            scale,
            save,
        } => {
            let surface = load_record(&record).await?;
            let mut editor = SurfaceEditor::from_record(surface, options)?;

            let mapping = editor
                .update_mapping(MappingPatch {
                    center_x,
                    center_y,
                    scale,
                    ..Default::default()
                })
                .clone();
            println!(
                "Mapping: center=({}, {}) scale={} version={}",
                mapping.center_x, mapping.center_y, mapping.scale, mapping.version
            );

            let frame = editor.frame();
            println!("Bleed area:       {}", format_rect(&frame.bleed_bounds));
            if let Some(rect) = frame.background_rect {
                println!("On background:    {}", format_rect(&rect));
            }

            let in_bounds = match mapping_bounds(&editor, &mapping) {
                Some(report) => {
                    print_report("Bounds", &report);
                    report.is_valid()
                }
                None => {
                    println!("  Bounds: mapping disabled");
                    true
                }
            };

            if save {
                let updated = editor.prepare_save(Utc::now())?;
                updated.save(&record).await?;
                println!("Saved → {}", record.display());
            } else if !in_bounds {
                bail!("mapping leaves the background image");
            }
        }

        Commands::Init {
            record,
            print,
            bleed,
            force,
        } => {
            if !force && tokio::fs::try_exists(&record).await? {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    record.display()
                );
            }

            let canvas = options.canvas_size;
            let print_area = print.unwrap_or_else(|| {
                Rect::new(canvas / 8.0, canvas / 8.0, canvas * 0.75, canvas * 0.75)
            });
            let mut editor = SurfaceEditor::new(options, print_area)?;
            editor.set_print_area(print_area);
            if bleed {
                editor.enable_bleed();
            }

            let surface = editor.to_record();
            surface.save(&record).await?;
            println!(
                "Created {} with print area {}",
                record.display(),
                format_rect(&surface.print_area)
            );
        }
    }

    Ok(())
}
