//! Profile assembly: file → text → every extractor → `CandidateProfile`.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use cvsift_acquire::Acquirer;
use cvsift_core::{CandidateProfile, EngineConfig, Lexicon, Result};
use cvsift_infer::{create_embedder, create_recognizer, EmbedderBackend, EntityRecognizer};

use crate::contact::{extract_email, extract_phone};
use crate::entities::extract_name_and_location;
use crate::experience::{Experience, ExperienceExtractor};
use crate::language::detect_language;
use crate::skills::SkillMatcher;

/// Owns the read-only resources shared by every extraction.
pub struct Engine {
    acquirer: Acquirer,
    recognizer: Arc<dyn EntityRecognizer>,
    skills: SkillMatcher,
    experience: ExperienceExtractor,
}

impl Engine {
    /// Build from configuration, loading models and the lexicon once.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let lexicon = config.lexicon();
        let embedder = create_embedder(config.embedding_model_dir.as_deref());
        let recognizer = create_recognizer(config.ner_model_dir.as_deref(), &lexicon);
        Self::with_components(
            Acquirer::new(config),
            recognizer,
            embedder,
            &lexicon,
            config.similarity_threshold,
        )
    }

    pub fn with_components(
        acquirer: Acquirer,
        recognizer: Arc<dyn EntityRecognizer>,
        embedder: Arc<dyn EmbedderBackend>,
        lexicon: &Lexicon,
        similarity_threshold: f32,
    ) -> Result<Self> {
        let skills = SkillMatcher::new(embedder, &lexicon.skills, similarity_threshold);
        let experience = ExperienceExtractor::new(lexicon)?;
        info!(
            "Engine ready: {} recognizer, {} skills, threshold {}",
            recognizer.name(),
            lexicon.skills.len(),
            skills.threshold()
        );
        Ok(Self {
            acquirer,
            recognizer,
            skills,
            experience,
        })
    }

    /// Best-effort text of a document; empty on any failure.
    pub fn acquire_text(&self, path: &Path) -> String {
        self.acquirer.acquire_text(path)
    }

    pub fn extract_profile(&self, path: &Path) -> CandidateProfile {
        let text = self.acquire_text(path);
        let profile = self.extract_profile_from_text(&text);
        if !text.trim().is_empty() && !(profile.has_name() && profile.has_location()) {
            debug!(
                "{}: name found={}, location found={}",
                path.display(),
                profile.has_name(),
                profile.has_location()
            );
        }
        info!(
            "{}: name={}, location={}, {} skills, {} jobs, {} companies, language={}",
            path.display(),
            profile.name,
            profile.location,
            profile.skills.len(),
            profile.jobs.len(),
            profile.companies.len(),
            profile.language
        );
        profile
    }

    pub fn extract_profile_from_text(&self, text: &str) -> CandidateProfile {
        if text.trim().is_empty() {
            debug!("No text, returning the empty profile");
            return CandidateProfile::empty();
        }

        let (name, location) = self.extract_name_and_location(text);
        let Experience { jobs, companies } = self.extract_experience(text);
        let mut profile = CandidateProfile::empty();
        if let Some(name) = name {
            profile.name = name;
        }
        if let Some(location) = location {
            profile.location = location;
        }
        profile.email = extract_email(text);
        profile.phone = extract_phone(text);
        profile.skills = self.match_skills(text);
        profile.jobs = jobs;
        profile.companies = companies;
        profile.language = detect_language(text);
        profile
    }

    pub fn extract_name_and_location(&self, text: &str) -> (Option<String>, Option<String>) {
        extract_name_and_location(self.recognizer.as_ref(), text)
    }

    pub fn match_skills(&self, text: &str) -> std::collections::BTreeSet<String> {
        self.skills.match_skills(text)
    }

    pub fn extract_experience(&self, text: &str) -> Experience {
        self.experience.extract(self.recognizer.as_ref(), text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Engine {
        let mut config = EngineConfig::default();
        config.embedding_model_dir = None;
        config.ner_model_dir = None;
        config.lexicon_path = None;
        Engine::new(&config).unwrap()
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Engine>();
    }

    #[test]
    fn test_whitespace_text_is_empty_profile() {
        let profile = engine().extract_profile_from_text(" \n\t ");
        assert!(profile.is_empty());
        assert_eq!(profile, CandidateProfile::empty());
    }

    #[test]
    fn test_defaults_when_nothing_found() {
        let profile = engine().extract_profile_from_text("skills: cooking\nsince 2019");
        assert_eq!(profile.name, "Unknown");
        assert_eq!(profile.location, "Unknown");
        assert_eq!(profile.email, None);
        assert_eq!(profile.phone, None);
        assert!(profile.companies.is_empty());
    }

    #[test]
    fn test_missing_file_is_empty_profile() {
        let profile = engine().extract_profile(Path::new("/nonexistent/cv.pdf"));
        assert!(profile.is_empty());
    }
}
