//! Vocabulary skills found by word-vector similarity.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use ndarray::Array1;
use tracing::debug;

use cvsift_infer::{cosine_similarity, tokenize, EmbedderBackend};

/// Matches résumé tokens against a fixed skill vocabulary.
///
/// A token records a skill when its vector's cosine similarity to the skill
/// phrase vector exceeds the threshold. Multi-word skills are phrase means and
/// so rarely clear the threshold against a single token.
pub struct SkillMatcher {
    embedder: Arc<dyn EmbedderBackend>,
    skills: Vec<(String, Array1<f32>)>,
    threshold: f32,
}

impl SkillMatcher {
    pub fn new(embedder: Arc<dyn EmbedderBackend>, vocabulary: &[String], threshold: f32) -> Self {
        let skills = vocabulary
            .iter()
            .filter_map(|skill| match embedder.embed_phrase(skill) {
                Some(vector) => Some((skill.clone(), vector)),
                None => {
                    debug!("No vector for skill '{}', skipping", skill);
                    None
                }
            })
            .collect();
        Self {
            embedder,
            skills,
            threshold,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Vocabulary skills present in `text`.
    pub fn match_skills(&self, text: &str) -> BTreeSet<String> {
        let lower = text.to_lowercase();
        let mut seen = HashSet::new();
        let mut found = BTreeSet::new();

        for token in tokenize(&lower) {
            if !seen.insert(token.text) {
                continue;
            }
            let Some(result) = self.embedder.embed(token.text) else {
                continue;
            };
            for (skill, vector) in &self.skills {
                if found.contains(skill) {
                    continue;
                }
                if cosine_similarity(&result.embedding, vector) > self.threshold {
                    found.insert(skill.clone());
                }
            }
        }

        debug!("{} distinct tokens, {} skills", seen.len(), found.len());
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvsift_core::config::DEFAULT_SIMILARITY_THRESHOLD;
    use cvsift_core::Lexicon;
    use cvsift_infer::SubwordEmbedder;

    fn matcher() -> SkillMatcher {
        SkillMatcher::new(
            Arc::new(SubwordEmbedder::default()),
            &Lexicon::default().skills,
            DEFAULT_SIMILARITY_THRESHOLD,
        )
    }

    #[test]
    fn test_python_found_once() {
        let skills = matcher().match_skills("Python developer. PYTHON, python and Python again");
        assert!(skills.contains("python"));
        assert_eq!(skills.iter().filter(|s| *s == "python").count(), 1);
    }

    #[test]
    fn test_punctuated_skills() {
        let skills = matcher().match_skills("Stack: Node.js, C++, Docker; Kubernetes");
        for expected in ["node.js", "c++", "docker", "kubernetes"] {
            assert!(skills.contains(expected), "missing {expected}: {skills:?}");
        }
    }

    #[test]
    fn test_only_vocabulary_members() {
        let vocabulary = Lexicon::default().skills;
        let skills = matcher().match_skills("Java, SQL, React, cooking and gardening");
        assert!(skills.iter().all(|s| vocabulary.contains(s)));
        assert!(skills.contains("java"));
        assert!(!skills.contains("javascript"));
    }

    #[test]
    fn test_hyphenated_compounds() {
        let m = matcher();
        assert!(m.match_skills("Python-based tooling").contains("python"));
        let skills = m.match_skills("Docker-Compose, React-Native");
        assert!(skills.contains("docker") && skills.contains("react"), "{skills:?}");
    }

    #[test]
    fn test_empty_text() {
        assert!(matcher().match_skills("").is_empty());
    }

    #[test]
    fn test_custom_vocabulary() {
        let matcher = SkillMatcher::new(
            Arc::new(SubwordEmbedder::default()),
            &["rust".to_string()],
            0.85,
        );
        assert_eq!(
            matcher.match_skills("Rust and Python").into_iter().collect::<Vec<_>>(),
            vec!["rust".to_string()]
        );
    }
}
