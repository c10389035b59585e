//! Turns résumé files into plain text.
//!
//! Each format is a [`TextHandler`] registered by extension. The [`Acquirer`]
//! front door never fails: unsupported, missing or unreadable documents yield
//! an empty string and a warning in the log.

pub mod docx;
pub mod ocr;
pub mod pdf;
pub mod plain;
pub mod process;
pub mod registry;
pub mod scan;

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use cvsift_core::{EngineConfig, Error, Result};

pub use docx::{DocxHandler, LegacyDocHandler};
pub use ocr::OcrEngine;
pub use pdf::PdfHandler;
pub use plain::PlainTextHandler;
pub use registry::{HandlerRegistry, TextHandler};
pub use scan::ImageHandler;

/// Extension dispatch plus best-effort error absorption.
pub struct Acquirer {
    registry: HandlerRegistry,
}

impl Acquirer {
    /// Register the built-in handlers using the configured external tools.
    pub fn new(config: &EngineConfig) -> Self {
        let ocr = Arc::new(OcrEngine::new(config.ocr.clone()));

        let mut registry = HandlerRegistry::new();
        registry.register(PlainTextHandler);
        registry.register(DocxHandler);
        registry.register(LegacyDocHandler::new(config.antiword_cmd.clone()));
        registry.register(PdfHandler::new(
            ocr.clone(),
            config.pdftoppm_cmd.clone(),
            config.pdf_render_dpi,
        ));
        registry.register(ImageHandler::new(ocr));

        info!("Acquirer ready for: {}", registry.extensions().join(", "));
        Self { registry }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Extract text, surfacing the failure reason.
    pub fn try_acquire_text(&self, path: &Path) -> Result<String> {
        let handler = self.registry.get_for_path(path).ok_or_else(|| {
            Error::UnsupportedFormat(
                path.extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            )
        })?;

        if std::fs::metadata(path)?.len() == 0 {
            debug!("{} is empty", path.display());
            return Ok(String::new());
        }

        let text = handler.extract(path)?;
        debug!("{} extracted {} chars from {}", handler.name(), text.len(), path.display());
        Ok(text)
    }

    /// Extract text, or an empty string on any failure.
    pub fn acquire_text(&self, path: &Path) -> String {
        match self.try_acquire_text(path) {
            Ok(text) => text,
            Err(e) => {
                warn!("Text acquisition failed for {}: {}", path.display(), e);
                String::new()
            }
        }
    }
}
