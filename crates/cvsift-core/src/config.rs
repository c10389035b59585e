//! Engine configuration: external tool paths, model directories, thresholds.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::lexicon::Lexicon;

pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.85;
pub const DEFAULT_OCR_ENGINE_MODE: u8 = 3;
/// Tesseract page segmentation mode 6: a single uniform block of text.
pub const DEFAULT_OCR_PAGE_SEGMENTATION_MODE: u8 = 6;
pub const DEFAULT_PDF_RENDER_DPI: u32 = 300;

#[cfg(windows)]
const WINDOWS_TESSERACT_PATH: &str = r"C:\Program Files\Tesseract-OCR\tesseract.exe";

/// Settings passed to the OCR engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrSettings {
    #[serde(default = "default_tesseract_cmd")]
    pub tesseract_cmd: PathBuf,
    #[serde(default = "default_engine_mode")]
    pub engine_mode: u8,
    #[serde(default = "default_page_segmentation_mode")]
    pub page_segmentation_mode: u8,
    /// Tesseract language pack(s), e.g. `eng+deu`. Tesseract's own default when unset.
    #[serde(default)]
    pub language: Option<String>,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            tesseract_cmd: default_tesseract_cmd(),
            engine_mode: DEFAULT_OCR_ENGINE_MODE,
            page_segmentation_mode: DEFAULT_OCR_PAGE_SEGMENTATION_MODE,
            language: None,
        }
    }
}

/// Top-level engine configuration (persisted as JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub ocr: OcrSettings,
    /// Rasterizer used to turn scanned PDF pages into images.
    #[serde(default = "default_pdftoppm_cmd")]
    pub pdftoppm_cmd: PathBuf,
    #[serde(default = "default_pdf_render_dpi")]
    pub pdf_render_dpi: u32,
    /// Converter for legacy binary `.doc` files.
    #[serde(default = "default_antiword_cmd")]
    pub antiword_cmd: PathBuf,
    /// Directory holding `model.onnx` + `tokenizer.json` of a sentence-embedding model.
    #[serde(default)]
    pub embedding_model_dir: Option<PathBuf>,
    /// Directory holding a token-classification NER model.
    #[serde(default)]
    pub ner_model_dir: Option<PathBuf>,
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,
    /// Optional lexicon JSON file; built-in lists are used when unset.
    #[serde(default)]
    pub lexicon_path: Option<PathBuf>,
}

fn default_tesseract_cmd() -> PathBuf {
    #[cfg(windows)]
    {
        let installed = PathBuf::from(WINDOWS_TESSERACT_PATH);
        if installed.exists() {
            return installed;
        }
    }
    PathBuf::from("tesseract")
}
fn default_engine_mode() -> u8 {
    DEFAULT_OCR_ENGINE_MODE
}
fn default_page_segmentation_mode() -> u8 {
    DEFAULT_OCR_PAGE_SEGMENTATION_MODE
}
fn default_pdftoppm_cmd() -> PathBuf {
    PathBuf::from("pdftoppm")
}
fn default_pdf_render_dpi() -> u32 {
    DEFAULT_PDF_RENDER_DPI
}
fn default_antiword_cmd() -> PathBuf {
    PathBuf::from("antiword")
}
fn default_similarity_threshold() -> f32 {
    DEFAULT_SIMILARITY_THRESHOLD
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ocr: OcrSettings::default(),
            pdftoppm_cmd: default_pdftoppm_cmd(),
            pdf_render_dpi: DEFAULT_PDF_RENDER_DPI,
            antiword_cmd: default_antiword_cmd(),
            embedding_model_dir: None,
            ner_model_dir: None,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            lexicon_path: None,
        }
    }
}

impl EngineConfig {
    /// Load config from file, falling back to defaults, then apply env overrides.
    pub fn load(config_path: Option<&Path>) -> Self {
        let mut config: EngineConfig = match config_path {
            Some(path) => match std::fs::read_to_string(path) {
                Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
                    warn!("Ignoring invalid config {}: {}", path.display(), e);
                    EngineConfig::default()
                }),
                Err(e) => {
                    warn!("Config {} not readable: {}. Using defaults.", path.display(), e);
                    EngineConfig::default()
                }
            },
            None => EngineConfig::default(),
        };

        config.apply_env();
        config
    }

    fn apply_env(&mut self) {
        if let Ok(cmd) = std::env::var("TESSERACT_CMD") {
            self.ocr.tesseract_cmd = PathBuf::from(cmd);
        }
        if let Ok(cmd) = std::env::var("PDFTOPPM_CMD") {
            self.pdftoppm_cmd = PathBuf::from(cmd);
        }
        if let Ok(cmd) = std::env::var("ANTIWORD_CMD") {
            self.antiword_cmd = PathBuf::from(cmd);
        }
        if let Ok(dir) = std::env::var("CVSIFT_EMBEDDING_MODEL_DIR") {
            self.embedding_model_dir = Some(PathBuf::from(dir));
        }
        if let Ok(dir) = std::env::var("CVSIFT_NER_MODEL_DIR") {
            self.ner_model_dir = Some(PathBuf::from(dir));
        }
        if let Ok(path) = std::env::var("CVSIFT_LEXICON") {
            self.lexicon_path = Some(PathBuf::from(path));
        }
    }

    /// Resolve the lexicon: the configured file if it loads, else built-in defaults.
    pub fn lexicon(&self) -> Lexicon {
        match &self.lexicon_path {
            Some(path) => Lexicon::load(path).unwrap_or_else(|e| {
                warn!("Lexicon {} unusable: {}. Using built-in lists.", path.display(), e);
                Lexicon::default()
            }),
            None => {
                info!("Using built-in lexicon");
                Lexicon::default()
            }
        }
    }
}
