//! Batch command - extract fields from every PDF in a folder into one table.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info};

use invex_core::{list_invoices, write_table, BatchProcessor, OutputFormat, TextExtractor};

use super::config::load_config;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Folder containing the invoice PDFs (default from config)
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Result table path (default from config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Table format (default: inferred from the output extension)
    #[arg(short, long, value_enum)]
    format: Option<TableFormat>,

    /// Tesseract language set, e.g. "eng+chi_sim+dan"
    #[arg(short, long)]
    languages: Option<String>,

    /// Skip files that fail instead of aborting the run
    #[arg(long)]
    continue_on_error: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum TableFormat {
    /// Excel workbook
    Xlsx,
    /// Comma-separated values
    Csv,
    /// JSON array of records
    Json,
}

impl From<TableFormat> for OutputFormat {
    fn from(format: TableFormat) -> Self {
        match format {
            TableFormat::Xlsx => OutputFormat::Xlsx,
            TableFormat::Csv => OutputFormat::Csv,
            TableFormat::Json => OutputFormat::Json,
        }
    }
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(input_dir) = args.input_dir {
        config.batch.input_dir = input_dir;
    }
    if let Some(output) = args.output {
        config.batch.output_path = output;
    }
    if let Some(languages) = args.languages {
        config.ocr.languages = languages;
    }
    config.batch.continue_on_error |= args.continue_on_error;

    let output_path = config.batch.output_path.clone();
    let format = args
        .format
        .map(OutputFormat::from)
        .unwrap_or_else(|| OutputFormat::from_path(&output_path));

    let files = list_invoices(&config.batch.input_dir)?;
    println!(
        "{} Found {} PDF files in {}",
        style("ℹ").blue(),
        files.len(),
        config.batch.input_dir.display()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let extractor = TextExtractor::from_config(&config);
    let processor =
        BatchProcessor::new(&extractor).with_continue_on_error(config.batch.continue_on_error);

    let result = processor.run(&files, |name| {
        pb.suspend(|| println!("Processing: {}", name));
        pb.set_message(name.to_string());
        pb.inc(1);
    });

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            pb.abandon();
            error!("Batch aborted: {}", e);
            anyhow::bail!("Extraction failed, no output written: {}", e);
        }
    };
    pb.finish_and_clear();

    write_table(&report.table, &output_path, format)?;
    info!("Batch finished in {:?}", start.elapsed());

    println!(
        "{} Extraction completed. {} rows saved to {}",
        style("✓").green(),
        report.table.len(),
        output_path.display()
    );

    if !report.failures.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for failure in &report.failures {
            println!("  - {}: {}", failure.file_name, failure.error);
        }
    }

    Ok(())
}
