//! Scanned résumés delivered as images.

use std::path::Path;
use std::sync::Arc;

use cvsift_core::Result;

use crate::ocr::OcrEngine;
use crate::registry::TextHandler;

pub struct ImageHandler {
    ocr: Arc<OcrEngine>,
}

impl ImageHandler {
    pub fn new(ocr: Arc<OcrEngine>) -> Self {
        Self { ocr }
    }
}

impl TextHandler for ImageHandler {
    fn name(&self) -> &'static str {
        "image-ocr"
    }

    fn extensions(&self) -> &[&'static str] {
        &["jpg", "jpeg", "png", "bmp", "tiff", "tif"]
    }

    fn extract(&self, path: &Path) -> Result<String> {
        self.ocr.recognize_file(path)
    }
}
