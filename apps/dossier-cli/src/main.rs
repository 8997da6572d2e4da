//! Case file completeness auditor
//!
//! Reads the pages of a scanned administrative case file and reports which
//! legally required documents are present, on which pages, and which are
//! missing.
//!
//! Page text comes from one of three sources:
//!
//! - a PDF with a text layer (native extraction)
//! - a JSON list of page records produced elsewhere
//! - a directory of page images, OCR'd with the `tesseract` binary

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use clap::{Parser, ValueEnum};
use completeness_engine::{
    parse_ranges, CatalogConfig, CompletenessEngine, DocumentCatalog, PipelineConfig, ProcessType,
};
use tracing::{debug, info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod input;
mod ocr;
mod render;

use input::PageInput;
use ocr::TesseractOcr;

/// Output format of the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

/// Command-line arguments for the case file auditor
#[derive(Parser, Debug)]
#[command(name = "dossier-cli")]
#[command(about = "Check a scanned case file for missing required documents")]
struct Args {
    /// PDF case file with a text layer
    input: Option<PathBuf>,

    /// JSON array of page records instead of a PDF
    #[arg(long, conflicts_with_all = ["input", "images"])]
    pages_json: Option<PathBuf>,

    /// Directory of page images (one file per page, in file name order)
    #[arg(long, conflicts_with = "input")]
    images: Option<PathBuf>,

    /// Catalog file overriding the built-in catalog of --process
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Process type whose built-in catalog is used
    #[arg(long, default_value = "accident")]
    process: String,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Restrict the audit to these pages, e.g. "1-3,7"
    #[arg(long)]
    pages: Option<String>,

    /// Pages processed concurrently (image input)
    #[arg(long)]
    workers: Option<usize>,

    /// Fraction of near-white pixels above which a page image is blank
    #[arg(long, default_value = "0.95")]
    blank_threshold: f64,

    /// OCR language hint (image input)
    #[arg(long, default_value = "por+eng")]
    language: String,

    /// Per-page OCR timeout in milliseconds (image input)
    #[arg(long, default_value = "60000")]
    ocr_timeout_ms: u64,

    /// Print the selected catalog as JSON and exit
    #[arg(long)]
    export_catalog: bool,

    /// Exit with status 2 when a required document is missing
    #[arg(long)]
    fail_on_missing: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn pipeline_config(&self) -> PipelineConfig {
        let mut config = PipelineConfig {
            blank_threshold: self.blank_threshold,
            ocr_timeout_ms: self.ocr_timeout_ms,
            language: self.language.clone(),
            ..PipelineConfig::default()
        };
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        config
    }

    fn page_input(&self) -> anyhow::Result<PageInput> {
        match (&self.input, &self.pages_json, &self.images) {
            (Some(path), None, None) => Ok(PageInput::Pdf(path.clone())),
            (None, Some(path), None) => Ok(PageInput::Json(path.clone())),
            (None, None, Some(dir)) => Ok(PageInput::Images(dir.clone())),
            (None, None, None) => bail!("no input: pass a PDF, --pages-json or --images"),
            _ => bail!("pass only one of a PDF, --pages-json or --images"),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr so the report on stdout stays parseable
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let complete = run(&args).await?;
    if args.fail_on_missing && !complete {
        std::process::exit(2);
    }
    Ok(())
}

/// Run the audit; returns whether every required document was found
async fn run(args: &Args) -> anyhow::Result<bool> {
    let (catalog, process_label) = load_catalog(args)?;
    debug!("Catalog has {} required documents", catalog.len());

    if args.export_catalog {
        let config = catalog.to_config(process_label);
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(true);
    }

    let engine = CompletenessEngine::new(catalog);
    let source = args.page_input()?;
    let ocr = Arc::new(TesseractOcr);
    let selected = match &args.pages {
        Some(ranges) => Some(parse_ranges(ranges).context("Invalid --pages")?),
        None => None,
    };
    let loaded = input::load(
        &source,
        &engine,
        ocr,
        args.pipeline_config(),
        selected.as_deref(),
    )
    .await
    .with_context(|| format!("Failed to read pages from {}", source))?;
    if selected.is_some() {
        info!("Restricted audit to {} pages", loaded.pages.len());
    }

    let report = engine.check_pages(&loaded.pages);

    match args.format {
        OutputFormat::Json => {
            let envelope = render::JsonReport::new(&loaded, process_label.as_deref(), &report);
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        OutputFormat::Text => {
            print!(
                "{}",
                render::summary(&report, engine.catalog(), &loaded.label, process_label.as_deref())
            );
        }
    }

    Ok(report.is_complete())
}

fn load_catalog(args: &Args) -> anyhow::Result<(DocumentCatalog, Option<String>)> {
    if let Some(path) = &args.catalog {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        let config: CatalogConfig = serde_json::from_str(&json)
            .with_context(|| format!("Malformed catalog {}", path.display()))?;
        let process = config.process.clone();
        let catalog = DocumentCatalog::from_config(config)
            .with_context(|| format!("Invalid catalog {}", path.display()))?;
        return Ok((catalog, process));
    }

    let process = ProcessType::parse_code(&args.process)
        .ok_or_else(|| anyhow!("Unknown process type: {}", args.process))?;
    let catalog = process.catalog().context("Built-in catalog is invalid")?;
    Ok((catalog, Some(process.as_str().to_string())))
}
