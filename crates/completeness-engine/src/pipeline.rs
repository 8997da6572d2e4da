//! Parallel page processing
//!
//! Pages are independent: blank detection, OCR and matching run per page on
//! a bounded pool of blocking workers. Workers hand back their page record
//! and matched names; a single reducer merges them once every page is done,
//! so report order never depends on completion order.
//!
//! OCR failures and timeouts only cost the affected page its text. A failed
//! rasterization aborts the run before any page is matched.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Duration;

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use shared_types::{CompletenessReport, PageRecord};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::blank::{BlankPageFilter, DEFAULT_LUMINANCE_CUTOFF, DEFAULT_WHITE_FRACTION};
use crate::catalog::DocumentCatalog;
use crate::error::{AuditError, OcrError, RasterError};
use crate::matcher::{match_page, merge_page_matches};

/// Turns document bytes into one rendered image per page
pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, document: &[u8]) -> Result<Vec<DynamicImage>, RasterError>;
}

/// Recognizes text on a rendered page
pub trait OcrEngine: Send + Sync {
    /// `language` is an engine hint such as `por+eng`
    fn recognize(&self, page: &DynamicImage, language: &str) -> Result<String, OcrError>;
}

/// Tuning knobs for a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Maximum pages processed at once
    pub workers: usize,
    pub blank_threshold: f64,
    pub luminance_cutoff: u8,
    pub ocr_timeout_ms: u64,
    pub language: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            blank_threshold: DEFAULT_WHITE_FRACTION,
            luminance_cutoff: DEFAULT_LUMINANCE_CUTOFF,
            ocr_timeout_ms: 60_000,
            language: "por+eng".to_string(),
        }
    }
}

impl PipelineConfig {
    pub fn blank_filter(&self) -> BlankPageFilter {
        BlankPageFilter::new(self.blank_threshold, self.luminance_cutoff)
    }
}

/// What is known about a page before processing
pub enum PageSource {
    /// Natively extracted text. Empty text marks the page blank.
    Text(String),
    /// Rendered page needing blank detection and OCR
    Image(DynamicImage),
    /// Extracted text, with the rendered page as fallback when it is empty
    TextWithImage(String, DynamicImage),
}

/// Pages and aggregated matches of one run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Sorted by page number
    pub pages: Vec<PageRecord>,
    pub matches: BTreeMap<String, Vec<u32>>,
}

struct PageOutcome {
    record: PageRecord,
    matches: BTreeSet<String>,
}

enum Recognized {
    Blank,
    Text(String),
}

pub struct PagePipeline {
    ocr: Arc<dyn OcrEngine>,
    catalog: Arc<DocumentCatalog>,
    config: PipelineConfig,
}

impl PagePipeline {
    pub fn new(ocr: Arc<dyn OcrEngine>, catalog: Arc<DocumentCatalog>, config: PipelineConfig) -> Self {
        Self {
            ocr,
            catalog,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process every page and merge the per-page matches
    ///
    /// Page numbers follow input order, starting at 1.
    pub async fn run(&self, sources: Vec<PageSource>) -> Result<PipelineOutput, AuditError> {
        self.run_numbered(
            sources
                .into_iter()
                .enumerate()
                .map(|(index, source)| (index as u32 + 1, source))
                .collect(),
        )
        .await
    }

    /// Like [`PagePipeline::run`], for a subset of pages that keep their
    /// own page numbers
    ///
    /// At most `workers` OCR calls are live at once. A call that outlives
    /// its timeout keeps its worker slot until it actually returns.
    pub async fn run_numbered(
        &self,
        sources: Vec<(u32, PageSource)>,
    ) -> Result<PipelineOutput, AuditError> {
        let semaphore = Arc::new(Semaphore::new(self.config.workers.max(1)));
        let mut tasks = JoinSet::new();

        for (page_number, source) in sources {
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| AuditError::Worker(e.to_string()))?;

            let ocr = Arc::clone(&self.ocr);
            let catalog = Arc::clone(&self.catalog);
            let config = self.config.clone();

            tasks.spawn(async move {
                let record = extract_page(page_number, source, ocr, &config, permit).await;
                let matches = match_page(&record, &catalog);
                PageOutcome { record, matches }
            });
        }

        let mut outcomes = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            outcomes.push(joined.map_err(|e| AuditError::Worker(e.to_string()))?);
        }

        outcomes.sort_by_key(|outcome| outcome.record.page_number);
        let matches = merge_page_matches(
            outcomes
                .iter()
                .map(|outcome| (outcome.record.page_number, outcome.matches.clone())),
        );
        let pages = outcomes.into_iter().map(|outcome| outcome.record).collect();

        Ok(PipelineOutput { pages, matches })
    }

    /// Rasterize a document, process its pages and build the report
    pub async fn audit(
        &self,
        rasterizer: &dyn Rasterizer,
        document: &[u8],
    ) -> Result<CompletenessReport, AuditError> {
        let images = rasterizer.rasterize(document)?;
        info!("Rasterized {} pages", images.len());

        let output = self
            .run(images.into_iter().map(PageSource::Image).collect())
            .await?;

        Ok(crate::build_report(&output.pages, &output.matches, &self.catalog))
    }
}

/// Produce the page record; never fails
async fn extract_page(
    page_number: u32,
    source: PageSource,
    ocr: Arc<dyn OcrEngine>,
    config: &PipelineConfig,
    permit: OwnedSemaphorePermit,
) -> PageRecord {
    let image = match source {
        PageSource::Text(text) => return PageRecord::from_extracted_text(page_number, text),
        PageSource::TextWithImage(text, image) => {
            if !text.trim().is_empty() {
                return PageRecord::new(page_number, text);
            }
            image
        }
        PageSource::Image(image) => image,
    };

    let filter = config.blank_filter();
    let language = config.language.clone();
    let task = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        if filter.is_blank(&image) {
            return Ok(Recognized::Blank);
        }
        ocr.recognize(&image, &language).map(Recognized::Text)
    });

    let timeout_ms = config.ocr_timeout_ms;
    match tokio::time::timeout(Duration::from_millis(timeout_ms), task).await {
        Ok(Ok(Ok(Recognized::Blank))) => {
            debug!("Page {} is blank, skipping OCR", page_number);
            PageRecord::blank(page_number)
        }
        Ok(Ok(Ok(Recognized::Text(text)))) => PageRecord::new(page_number, text),
        Ok(Ok(Err(e))) => {
            warn!("OCR failed on page {}: {}", page_number, e);
            PageRecord::new(page_number, "")
        }
        Ok(Err(join_error)) => {
            warn!("OCR worker for page {} panicked: {}", page_number, join_error);
            PageRecord::new(page_number, "")
        }
        Err(_elapsed) => {
            warn!(
                "OCR on page {}: {}",
                page_number,
                OcrError::Timeout(timeout_ms)
            );
            PageRecord::new(page_number, "")
        }
    }
}
