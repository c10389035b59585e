//! cvsift Core — candidate profile model, lexicon, engine configuration, errors.

pub mod config;
pub mod error;
pub mod lexicon;
pub mod profile;

pub use config::{EngineConfig, OcrSettings};
pub use error::{Error, Result};
pub use lexicon::Lexicon;
pub use profile::{CandidateProfile, UNKNOWN_LANGUAGE, UNKNOWN_LOCATION, UNKNOWN_NAME};
