//! cvsift Extract — résumé field extractors and the profile engine.
//!
//! Each extractor is usable on its own; [`Engine`] wires them to text
//! acquisition and the model backends and assembles a `CandidateProfile`.

pub mod contact;
pub mod engine;
pub mod entities;
pub mod experience;
pub mod language;
pub mod skills;

pub use contact::{extract_email, extract_phone};
pub use engine::Engine;
pub use entities::{extract_name_and_location, is_title_case};
pub use experience::{Experience, ExperienceExtractor};
pub use language::detect_language;
pub use skills::SkillMatcher;
