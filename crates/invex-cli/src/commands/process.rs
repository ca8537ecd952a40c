//! Process command - extract fields from a single invoice PDF.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{debug, info};

use invex_core::{ExtractedText, FieldParser, FieldRecord, TextExtractor, TextSource};

use super::config::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: ReportFormat,

    /// Tesseract language set, e.g. "eng+chi_sim+dan"
    #[arg(short, long)]
    languages: Option<String>,

    /// Also print the extracted text
    #[arg(long)]
    show_text: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ReportFormat {
    /// Plain text summary
    Text,
    /// JSON output
    Json,
}

/// JSON shape of a single-document result.
#[derive(Serialize)]
struct ProcessReport<'a> {
    #[serde(flatten)]
    record: &'a FieldRecord,
    source: TextSource,
    page_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(languages) = args.languages {
        config.ocr.languages = languages;
    }

    if !args.input.is_file() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let extracted = TextExtractor::from_config(&config).extract(&args.input)?;
    let fields = FieldParser::new().parse(&extracted.text);

    let file_name = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let record = FieldRecord::new(fields, file_name);

    match args.format {
        ReportFormat::Json => {
            let report = ProcessReport {
                record: &record,
                source: extracted.source,
                page_count: extracted.page_count,
                text: args.show_text.then_some(extracted.text.as_str()),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        ReportFormat::Text => {
            print!("{}", format_text(&record, &extracted));
            if args.show_text {
                println!();
                println!("{}", style("Extracted text:").bold());
                println!("{}", extracted.text.trim_end());
            }
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_text(record: &FieldRecord, extracted: &ExtractedText) -> String {
    let route = match extracted.source {
        TextSource::Embedded => "embedded text",
        TextSource::Ocr => "OCR",
    };

    let mut output = String::new();
    output.push_str(&format!("File:           {}\n", record.source_file));
    output.push_str(&format!("Invoice Number: {}\n", or_dash(&record.invoice_number)));
    output.push_str(&format!("Date:           {}\n", or_dash(&record.date)));
    output.push_str(&format!("Total Amount:   {}\n", or_dash(&record.total_amount)));
    output.push_str(&format!(
        "Text source:    {} ({} pages)\n",
        route, extracted.page_count
    ));
    output
}

fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}
