mod analysis;
mod config;
mod loader;
mod models;
mod pipeline;
mod scraper;
mod storage;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::analysis::Analysis;
use crate::config::AppConfig;
use crate::loader::discover_html_files;
use crate::pipeline::Pipeline;
use crate::storage::{export_csv, RecordStore};
use crate::utils::{fmt_amount, fmt_pct};

#[derive(Parser)]
#[command(name = "sold-stats", about = "Sold-listing statistics from saved search pages", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Parse saved results pages and store the listings
    Parse {
        /// Pages to parse
        files: Vec<PathBuf>,

        /// Also parse every .html file in this directory
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Record file (default: storage.output_path)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Append to the record file instead of replacing it
        #[arg(long)]
        append: bool,
    },

    /// Print statistics for stored listings
    Stats {
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Drop listings whose total price is below this
        #[arg(long)]
        min: Option<f64>,

        /// Drop listings whose total price is above this
        #[arg(long)]
        max: Option<f64>,

        #[arg(long, value_enum, default_value_t = Grouping::Weekday)]
        by: Grouping,
    },

    /// Export stored listings as CSV
    ExportCsv {
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(short, long)]
        out: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Grouping {
    Weekday,
    Day,
    All,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "sold_stats=info,warn",
        1 => "sold_stats=debug,info",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::new(filter))
        .init();

    let mut config = AppConfig::load()?;

    match cli.command {
        Command::Parse {
            mut files,
            dir,
            out,
            append,
        } => {
            let _t = utils::Timer::start("Parse documents");
            if let Some(dir) = dir {
                let found = discover_html_files(&dir)?;
                info!("Found {} pages in {:?}", found.len(), dir);
                files.extend(found);
            }
            if files.is_empty() {
                println!("No pages given. Pass files or --dir.");
                return Ok(());
            }
            if let Some(out) = out {
                config.storage.output_path = out;
            }
            if append {
                config.storage.overwrite = false;
            }

            let stats = Pipeline::new(config).run(&files).await?;
            info!(
                "Done: {} documents, {} skipped, {} records",
                stats.documents, stats.skipped, stats.records
            );
        }

        Command::Stats {
            input,
            min,
            max,
            by,
        } => {
            let path = input.unwrap_or(config.storage.output_path);
            let mut analysis = Analysis::new(RecordStore::new(&path).load()?);

            if let Some(min) = min.or(config.analysis.min_total) {
                info!("Dropped {} listings below {}", analysis.drop_below(min), min);
            }
            if let Some(max) = max.or(config.analysis.max_total) {
                info!("Dropped {} listings above {}", analysis.drop_above(max), max);
            }

            if analysis.is_empty() {
                println!("No listings in {:?}. Run `sold-stats parse` first.", path);
                return Ok(());
            }

            match by {
                Grouping::All => print_summary("All listings", &analysis),
                Grouping::Weekday => print_weekdays(&analysis),
                Grouping::Day => {
                    for (date, day) in analysis.by_day() {
                        print_summary(&format!("{} ({})", date.format("%d/%m/%Y"), date.format("%a")), &day);
                    }
                }
            }
        }

        Command::ExportCsv { input, out } => {
            let path = input.unwrap_or(config.storage.output_path);
            let records = RecordStore::new(&path).load()?;
            export_csv(&out, &records)?;
            println!("{} listings exported to {:?}", records.len(), out);
        }
    }

    Ok(())
}

fn print_summary(label: &str, analysis: &Analysis) {
    let sold = analysis.records().iter().filter(|r| r.sold).count();
    println!("─── {} ───", label);
    println!("  Listings      : {} ({} sold)", analysis.len(), sold);
    println!(
        "  Ø price       : {}",
        analysis.average_price().map(fmt_amount).unwrap_or("—".into())
    );
    println!(
        "  Ø shipping    : {}",
        analysis.average_shipping().map(fmt_amount).unwrap_or("—".into())
    );
    println!(
        "  Ø total price : {}",
        analysis.average_total().map(fmt_amount).unwrap_or("—".into())
    );
}

fn print_weekdays(analysis: &Analysis) {
    println!("─────────────────────────────────────────────────────");
    println!("  Day  Listings  Ø total       vs. Ø listings  vs. Ø price");
    println!("─────────────────────────────────────────────────────");
    for row in analysis.weekday_report() {
        println!(
            "  {:<4} {:>8}  {:>12}  {:>14}  {:>11}",
            row.weekday.to_string(),
            row.count,
            row.average_total.map(fmt_amount).unwrap_or("—".into()),
            fmt_pct(row.count_deviation_pct),
            fmt_pct(row.price_deviation_pct),
        );
    }
    println!("─────────────────────────────────────────────────────");
    println!(
        "  All  {:>8}  {:>12}",
        analysis.len(),
        analysis.average_total().map(fmt_amount).unwrap_or("—".into())
    );
}
