//! OCR for scanned résumés: grayscale, auto-contrast, then tesseract.

use std::path::Path;

use image::{DynamicImage, GrayImage, ImageFormat};
use tracing::debug;

use cvsift_core::{Error, OcrSettings, Result};

use crate::process::run_capture;

/// Wraps the tesseract command line with the configured engine/segmentation modes.
pub struct OcrEngine {
    settings: OcrSettings,
}

impl OcrEngine {
    pub fn new(settings: OcrSettings) -> Self {
        Self { settings }
    }

    /// Decode an image file, preprocess it and run OCR.
    pub fn recognize_file(&self, path: &Path) -> Result<String> {
        let img = image::open(path)
            .map_err(|e| Error::Ocr(format!("Cannot decode {}: {}", path.display(), e)))?;
        self.recognize_image(img)
    }

    /// Preprocess an in-memory image and run OCR on it.
    pub fn recognize_image(&self, img: DynamicImage) -> Result<String> {
        let gray = preprocess(img);
        debug!("OCR input {}x{}", gray.width(), gray.height());

        let scratch = tempfile::Builder::new()
            .prefix("cvsift-ocr-")
            .suffix(".png")
            .tempfile()?;
        gray.save_with_format(scratch.path(), ImageFormat::Png)
            .map_err(|e| Error::Ocr(format!("Cannot write OCR input: {}", e)))?;

        self.run_tesseract(scratch.path())
    }

    fn run_tesseract(&self, image_path: &Path) -> Result<String> {
        let mut args: Vec<String> = vec![
            image_path.to_string_lossy().into_owned(),
            "stdout".into(),
            "--oem".into(),
            self.settings.engine_mode.to_string(),
            "--psm".into(),
            self.settings.page_segmentation_mode.to_string(),
        ];
        if let Some(lang) = &self.settings.language {
            args.push("-l".into());
            args.push(lang.clone());
        }

        run_capture(&self.settings.tesseract_cmd, &args).map_err(|e| Error::Ocr(e.to_string()))
    }
}

/// Convert to 8-bit grayscale and stretch contrast.
pub fn preprocess(img: DynamicImage) -> GrayImage {
    let mut gray = img.to_luma8();
    autocontrast(&mut gray);
    gray
}

/// Linearly map the darkest pixel to 0 and the brightest to 255.
///
/// Uniform images are left untouched.
pub fn autocontrast(img: &mut GrayImage) {
    let (mut lo, mut hi) = (u8::MAX, u8::MIN);
    for p in img.pixels() {
        lo = lo.min(p.0[0]);
        hi = hi.max(p.0[0]);
    }
    if hi <= lo {
        return;
    }

    let scale = 255.0 / f32::from(hi - lo);
    let offset = -f32::from(lo) * scale;
    let mut lut = [0u8; 256];
    for (v, slot) in lut.iter_mut().enumerate() {
        *slot = (v as f32 * scale + offset).clamp(0.0, 255.0) as u8;
    }
    for p in img.pixels_mut() {
        p.0[0] = lut[p.0[0] as usize];
    }
}
