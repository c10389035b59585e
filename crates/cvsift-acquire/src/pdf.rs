//! PDF résumés: text layer first, rasterize-and-OCR when it is blank.

use std::ffi::OsStr;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use cvsift_core::{Error, Result};

use crate::ocr::OcrEngine;
use crate::process::run_capture;
use crate::registry::TextHandler;

const PAGE_PREFIX: &str = "page";

pub struct PdfHandler {
    ocr: Arc<OcrEngine>,
    rasterizer: PathBuf,
    dpi: u32,
}

impl PdfHandler {
    pub fn new(ocr: Arc<OcrEngine>, rasterizer: impl Into<PathBuf>, dpi: u32) -> Self {
        Self {
            ocr,
            rasterizer: rasterizer.into(),
            dpi,
        }
    }

    /// Render every page to PNG and OCR them in page order.
    fn ocr_pages(&self, path: &Path) -> Result<String> {
        let workdir = tempfile::tempdir()?;
        let prefix = workdir.path().join(PAGE_PREFIX);
        let dpi = self.dpi.to_string();
        let args: [&OsStr; 5] = [
            OsStr::new("-r"),
            OsStr::new(&dpi),
            OsStr::new("-png"),
            path.as_os_str(),
            prefix.as_os_str(),
        ];
        run_capture(&self.rasterizer, args)?;

        let pages = rendered_pages(workdir.path())?;
        info!("OCR fallback for {} ({} pages)", path.display(), pages.len());

        let mut text = String::new();
        for page in &pages {
            let page_text = self.ocr.recognize_file(page)?;
            text.push_str(&page_text);
            if !page_text.ends_with('\n') {
                text.push('\n');
            }
        }
        Ok(text)
    }
}

/// Pull the text layer. The parser may panic on malformed input; that is an error here.
pub fn text_layer(bytes: &[u8]) -> Result<String> {
    match catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(Error::Acquisition(format!("PDF text layer: {}", e))),
        Err(_) => Err(Error::Acquisition("PDF parser panicked".into())),
    }
}

/// PNGs written by the rasterizer (`page-1.png`, `page-01.png`, ...) sorted by page number.
fn rendered_pages(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pages: Vec<(u32, PathBuf)> = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if let Some(number) = page_number(&path) {
            pages.push((number, path));
        }
    }
    pages.sort_by_key(|(n, _)| *n);
    Ok(pages.into_iter().map(|(_, p)| p).collect())
}

fn page_number(path: &Path) -> Option<u32> {
    if path.extension()?.to_str()? != "png" {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    stem.strip_prefix(PAGE_PREFIX)?
        .trim_start_matches('-')
        .parse()
        .ok()
}

impl TextHandler for PdfHandler {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn extensions(&self) -> &[&'static str] {
        &["pdf"]
    }

    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)?;
        match text_layer(&bytes) {
            Ok(text) if !text.trim().is_empty() => {
                debug!("Text layer of {}: {} chars", path.display(), text.len());
                return Ok(text);
            }
            Ok(_) => debug!("{} has no text layer", path.display()),
            Err(e) => warn!("{}: {}", path.display(), e),
        }
        self.ocr_pages(path)
    }
}
