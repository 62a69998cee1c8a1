use anyhow::{Context, Result};
use clap::Parser;
use color_filter::pipeline::{apply_filter, FilterRequest, DEFAULT_OUTPUT};
use log::LevelFilter;
use std::io::Write;
use std::path::PathBuf;

/// Apply a color filter to an image and save the result as PNG.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Image to read
    input: PathBuf,

    /// Filter to apply
    #[arg(value_parser = ["grayscale", "sepia", "warmer", "cooler"])]
    filter: String,

    /// Where to write the filtered image (always PNG)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Open the result in the default image viewer
    #[arg(short, long)]
    show: bool,

    /// Spread the pixel pass across all cores
    #[arg(short, long)]
    parallel: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    let request = FilterRequest::new(&args.input, args.filter)
        .with_output(args.output)
        .with_show(args.show)
        .with_parallel(args.parallel);

    apply_filter(&request)
        .with_context(|| format!("failed to filter {}", args.input.display()))?;
    Ok(())
}
