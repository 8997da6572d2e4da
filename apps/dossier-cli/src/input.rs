//! Page sources

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use completeness_engine::{CompletenessEngine, OcrEngine, PageSource, PipelineConfig};
use shared_types::PageRecord;
use tracing::info;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "tif", "tiff"];

/// Where the page text comes from
#[derive(Debug, Clone)]
pub enum PageInput {
    Pdf(PathBuf),
    Json(PathBuf),
    Images(PathBuf),
}

impl fmt::Display for PageInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageInput::Pdf(path) | PageInput::Json(path) | PageInput::Images(path) => {
                write!(f, "{}", path.display())
            }
        }
    }
}

/// Pages of one case file, ready for analysis
#[derive(Debug, Clone)]
pub struct LoadedPages {
    /// File or directory name shown in reports
    pub label: String,
    /// SHA-256 of the input file; `None` for image directories
    pub sha256: Option<String>,
    pub pages: Vec<PageRecord>,
}

/// Read the pages of `source`, keeping only `selected` page numbers when given
///
/// Image pages outside the selection are never decoded nor OCR'd.
pub async fn load(
    source: &PageInput,
    engine: &CompletenessEngine,
    ocr: Arc<dyn OcrEngine>,
    config: PipelineConfig,
    selected: Option<&[u32]>,
) -> anyhow::Result<LoadedPages> {
    match source {
        PageInput::Pdf(path) => {
            let bytes = read(path)?;
            let pages = shared_pdf::extract_pages(&bytes)?;
            info!("Extracted text of {} pages from {}", pages.len(), path.display());
            Ok(LoadedPages {
                label: label(path),
                sha256: Some(shared_pdf::hash_document(&bytes)),
                pages: restrict(pages, selected),
            })
        }
        PageInput::Json(path) => {
            let bytes = read(path)?;
            let pages = parse_page_records(&bytes)?;
            Ok(LoadedPages {
                label: label(path),
                sha256: Some(shared_pdf::hash_document(&bytes)),
                pages: restrict(pages, selected),
            })
        }
        PageInput::Images(dir) => {
            let files = numbered_image_files(image_files(dir)?, selected);
            info!("Processing {} page images from {}", files.len(), dir.display());

            let mut sources = Vec::with_capacity(files.len());
            for (page_number, file) in &files {
                let image = image::open(file)
                    .with_context(|| format!("Failed to decode {}", file.display()))?;
                sources.push((*page_number, PageSource::Image(image)));
            }

            let output = engine.pipeline(ocr, config).run_numbered(sources).await?;
            Ok(LoadedPages {
                label: label(dir),
                sha256: None,
                pages: output.pages,
            })
        }
    }
}

fn restrict(pages: Vec<PageRecord>, selected: Option<&[u32]>) -> Vec<PageRecord> {
    match selected {
        Some(selected) => select_pages(pages, selected),
        None => pages,
    }
}

fn read(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Decode a JSON array of page records
pub fn parse_page_records(bytes: &[u8]) -> anyhow::Result<Vec<PageRecord>> {
    serde_json::from_slice(bytes).context("Expected a JSON array of page records")
}

/// Page images in a directory, sorted by file name
pub fn image_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?
    {
        let path = entry?.path();
        let is_image = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
            .unwrap_or(false);
        if path.is_file() && is_image {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Pair each image with its 1-based page number, then drop unselected pages
pub fn numbered_image_files(
    files: Vec<PathBuf>,
    selected: Option<&[u32]>,
) -> Vec<(u32, PathBuf)> {
    let selected: Option<BTreeSet<u32>> = selected.map(|pages| pages.iter().copied().collect());
    files
        .into_iter()
        .enumerate()
        .map(|(index, file)| (index as u32 + 1, file))
        .filter(|(page_number, _)| {
            selected
                .as_ref()
                .map_or(true, |selected| selected.contains(page_number))
        })
        .collect()
}

/// Keep only the pages whose numbers are listed
pub fn select_pages(pages: Vec<PageRecord>, selected: &[u32]) -> Vec<PageRecord> {
    let selected: BTreeSet<u32> = selected.iter().copied().collect();
    pages
        .into_iter()
        .filter(|page| selected.contains(&page.page_number))
        .collect()
}
