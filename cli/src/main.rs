//! pdfhtml CLI - layout-preserving PDF to HTML conversion

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfhtml::{ConversionReport, ConvertOptions, HtmlConverter, PageSelection};

#[derive(Parser)]
#[command(name = "pdfhtml")]
#[command(version)]
#[command(about = "Convert a PDF into a single layout-faithful HTML file", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output directory for output.html and extracted images
    #[arg(value_name = "OUTPUT_DIR", default_value = pdfhtml::options::DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long)]
    pages: Option<String>,

    /// Ascent ratio for fonts that declare none
    #[arg(long, value_name = "RATIO")]
    ascender: Option<f32>,

    /// CSS family for text whose font could not be embedded
    #[arg(long, value_name = "FAMILY")]
    fallback_font: Option<String>,

    /// Place images with no known position at the page origin, at pixel size
    #[arg(long)]
    pixel_fallback: bool,

    /// Print the conversion report as JSON
    #[arg(long)]
    json: bool,

    /// Only print errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = cmd_convert(&cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn build_options(cli: &Cli) -> Result<ConvertOptions, Box<dyn std::error::Error>> {
    let page_selection = if let Some(p) = cli.pages.as_deref() {
        PageSelection::parse(p).map_err(|e| format!("Invalid page range: {}", e))?
    } else {
        PageSelection::All
    };

    let mut options = ConvertOptions::new()
        .with_output_dir(&cli.output)
        .with_pages(page_selection)
        .with_pixel_size_fallback(cli.pixel_fallback);

    if let Some(ratio) = cli.ascender {
        if !(ratio.is_finite() && ratio > 0.0) {
            return Err(format!("Invalid ascender ratio: {}", ratio).into());
        }
        options = options.with_default_ascender(ratio);
    }
    if let Some(family) = cli.fallback_font.as_deref() {
        options = options.with_fallback_font(family);
    }

    Ok(options)
}

fn cmd_convert(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = build_options(cli)?;
    let converter = HtmlConverter::new(options);

    let pb = if cli.quiet || cli.json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    pb.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Converting {}...", cli.input.display()));

    let result = converter.convert_file(&cli.input);
    pb.finish_and_clear();
    let report = result?;

    if cli.json {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    if !cli.quiet {
        print_summary(&cli.input, &report);
    }

    Ok(())
}

fn print_summary(input: &Path, report: &ConversionReport) {
    println!(
        "{} {} to {}",
        "Successfully converted".green().bold(),
        input.display(),
        report.html_path.display()
    );
    println!("  {} {} pages", "├─".dimmed(), report.page_count);
    println!("  {} {} fonts embedded", "├─".dimmed(), report.fonts_embedded);
    println!("  {} {} images written", "├─".dimmed(), report.images_written.len());

    if report.warnings.is_empty() {
        println!("  {} no warnings", "└─".dimmed());
        return;
    }
    println!(
        "  {} {}",
        "└─".dimmed(),
        format!("{} warnings", report.warnings.len()).yellow()
    );
    for warning in &report.warnings {
        println!("     {}", warning.to_string().yellow());
    }
}
