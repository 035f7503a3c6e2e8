use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};

use paymatch_core::{AccountTotals, Money};
use paymatch_import::{load_file, Reconciler, TableExtractor};
use paymatch_ocr::{Extractor, OcrBackend, StatementPipeline};

mod config;
mod report;

use config::{AppConfig, OcrConfig};

#[derive(Parser)]
#[command(name = "paymatch")]
#[command(about = "Reconcile scanned statement payments against a processor export")]
#[command(version)]
struct Cli {
    /// TOML config file (column names, OCR paths, matching thresholds).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare an OCR'd statement text dump against a CSV export
    Compare {
        /// Statement text as produced by the OCR pass
        statement: PathBuf,
        /// Processor export as headed CSV
        export: PathBuf,
        /// Emit the outcome list as JSON instead of the text report
        #[arg(long)]
        json: bool,
    },
    /// OCR statement page images and print per-account totals
    Scan {
        /// Page image files, in page order
        #[arg(required = true)]
        pages: Vec<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    match cli.command {
        Commands::Compare { statement, export, json } => {
            run_compare(&config, &statement, &export, json)
        }
        Commands::Scan { pages } => run_scan(&config, &pages),
    }
}

fn run_compare(
    config: &AppConfig,
    statement_path: &Path,
    export_path: &Path,
    json: bool,
) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(statement_path)
        .with_context(|| format!("failed to read statement {}", statement_path.display()))?;
    let extraction = Extractor::extract(&text);
    for warning in &extraction.warnings {
        tracing::warn!("{warning}");
    }
    let statement_totals = AccountTotals::from_occurrences(extraction.occurrences);
    tracing::info!(
        "extracted {} unique accounts from the statement",
        statement_totals.len()
    );

    let table = load_file(export_path)
        .with_context(|| format!("failed to read export {}", export_path.display()))?;
    let extractor = TableExtractor::new(
        config.table.account_column.clone(),
        config.table.amount_column.clone(),
    );
    let table_extraction = extractor.extract(&table)?;
    for rejection in &table_extraction.rejections {
        tracing::warn!("{rejection}");
    }
    let counts = table_extraction.rejection_counts();
    if !table_extraction.rejections.is_empty() {
        tracing::warn!(
            "skipped rows: invalid amount {}, non-text account {}, no account number {}",
            counts.invalid_amount,
            counts.non_text_account,
            counts.no_account_pattern
        );
    }
    let export_totals = AccountTotals::from_occurrences(table_extraction.occurrences);
    tracing::info!(
        "extracted {} unique accounts from the export",
        export_totals.len()
    );

    let reconciler = Reconciler::new(
        config.reconcile.fuzzy_threshold,
        config.reconcile.amount_tolerance_cents,
    );
    let outcomes = reconciler.reconcile(&statement_totals, &export_totals);

    if json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        for line in report::render_lines(&outcomes) {
            println!("{line}");
        }
    }
    Ok(())
}

fn run_scan(config: &AppConfig, pages: &[PathBuf]) -> anyhow::Result<()> {
    let pipeline = StatementPipeline::new(build_recognizer(&config.ocr));

    let mut page_bytes = Vec::with_capacity(pages.len());
    for path in pages {
        page_bytes.push(
            std::fs::read(path)
                .with_context(|| format!("failed to read page {}", path.display()))?,
        );
    }

    tracing::info!("running OCR over {} page(s)", page_bytes.len());
    let extraction = pipeline.process_pages(&page_bytes).map_err(|e| {
        if e.engine_unavailable() {
            anyhow!("OCR engine unavailable — install Tesseract and build with the `tesseract` feature")
        } else {
            anyhow!(e)
        }
    })?;
    for warning in &extraction.warnings {
        tracing::warn!("{warning}");
    }

    let totals = AccountTotals::from_occurrences(extraction.occurrences);
    for (account, cents) in totals.iter() {
        println!(
            "{account}  {}  ({} payment(s))",
            Money::from_cents(cents),
            totals.count(account).unwrap_or(0)
        );
    }
    Ok(())
}

#[cfg(feature = "tesseract")]
fn build_recognizer(ocr: &OcrConfig) -> impl OcrBackend {
    paymatch_ocr::recognizer::tesseract_backend::TesseractRecognizer::new(
        ocr.data_path.clone(),
        &ocr.lang,
    )
}

#[cfg(not(feature = "tesseract"))]
fn build_recognizer(_ocr: &OcrConfig) -> impl OcrBackend {
    paymatch_ocr::UnavailableRecognizer
}
