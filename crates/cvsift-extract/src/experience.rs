//! Job titles and employer names.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use cvsift_core::{Error, Lexicon, Result};
use cvsift_infer::{EntityLabel, EntityRecognizer};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

const MIN_COMPANY_CHARS: usize = 3;
const MAX_COMPANY_CHARS: usize = 60;
const MIN_JOB_CHARS: usize = 3;

/// Jobs are lower-cased; companies keep the recognizer's spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Experience {
    pub jobs: BTreeSet<String>,
    pub companies: BTreeSet<String>,
}

/// Regex job titles plus NER organizations, both passed through keyword blacklists.
pub struct ExperienceExtractor {
    job_title: Option<Regex>,
    org_keyword_blacklist: Vec<String>,
    company_blacklist: Vec<String>,
    job_blacklist: Vec<String>,
}

impl ExperienceExtractor {
    pub fn new(lexicon: &Lexicon) -> Result<Self> {
        let job_title = job_title_pattern(lexicon)
            .map(|pattern| {
                Regex::new(&pattern)
                    .map_err(|e| Error::Config(format!("Invalid job title pattern: {}", e)))
            })
            .transpose()?;

        Ok(Self {
            job_title,
            org_keyword_blacklist: lexicon.org_keyword_blacklist.clone(),
            company_blacklist: lexicon.company_blacklist.clone(),
            job_blacklist: lexicon.job_blacklist.clone(),
        })
    }

    pub fn extract(&self, recognizer: &dyn EntityRecognizer, text: &str) -> Experience {
        let clean = normalize_whitespace(text);
        let mut experience = Experience::default();

        for entity in recognizer.recognize(&clean) {
            if entity.label != EntityLabel::Org {
                continue;
            }
            let org = entity.text.trim();
            let len = org.chars().count();
            if !(MIN_COMPANY_CHARS..=MAX_COMPANY_CHARS).contains(&len) {
                continue;
            }
            if contains_any(&org.to_lowercase(), &self.org_keyword_blacklist) {
                debug!("Dropping organization '{}'", org);
                continue;
            }
            experience.companies.insert(org.to_string());
        }

        if let Some(job_title) = &self.job_title {
            for m in job_title.find_iter(&clean) {
                let title = normalize_whitespace(m.as_str()).to_lowercase();
                if title.chars().count() >= MIN_JOB_CHARS {
                    experience.jobs.insert(title);
                }
            }
        }

        experience
            .jobs
            .retain(|job| !contains_any(job, &self.job_blacklist));
        experience
            .companies
            .retain(|company| !contains_any(&company.to_lowercase(), &self.company_blacklist));

        debug!(
            "{} jobs, {} companies",
            experience.jobs.len(),
            experience.companies.len()
        );
        experience
    }
}

/// `level? domain? role`, case-insensitive, alternatives in lexicon order.
fn job_title_pattern(lexicon: &Lexicon) -> Option<String> {
    if lexicon.job_roles.is_empty() {
        return None;
    }
    let mut pattern = String::from(r"(?i)\b");
    for optional in [&lexicon.job_levels, &lexicon.job_domains] {
        if !optional.is_empty() {
            pattern.push_str(&format!(r"(?:{})?\s*", alternation(optional)));
        }
    }
    pattern.push_str(&format!(r"(?:{})\b", alternation(&lexicon.job_roles)));
    Some(pattern)
}

fn alternation(words: &[String]) -> String {
    words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|")
}

/// Line breaks become spaces and whitespace runs collapse to one space.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| haystack.contains(n.as_str()))
}
