//! Controlled vocabulary and keyword lists used by the extractors.
//!
//! Every list is a flat array of lower-case strings. A lexicon file only needs
//! the lists it overrides; missing lists keep their built-in defaults.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;

pub const DEFAULT_SKILLS: &[&str] = &[
    "python", "java", "sql", "machine learning", "react", "angular", "node.js", "docker",
    "kubernetes", "javascript", "django", "c++", "html", "css", "creativity", "leadership",
    "critical thinking", "productivity",
];

/// Substrings that disqualify a recognized organization before it becomes a company.
pub const DEFAULT_ORG_KEYWORD_BLACKLIST: &[&str] = &[
    "university", "college", "baccalaureate", "certification", "portfolio", "project", "skill",
    "language", "interest", "team", "website", "student", "education", "training", "course",
    "workshop", "conference", "session", "study", "degree", "research", "department", "program",
];

pub const DEFAULT_COMPANY_BLACKLIST: &[&str] = &[
    "education", "project", "portfolio", "skill", "language", "team", "interest",
    "certification", "training",
];

pub const DEFAULT_JOB_BLACKLIST: &[&str] = &[
    "student", "experience", "education", "language", "skill", "project", "interest",
];

pub const DEFAULT_JOB_LEVELS: &[&str] = &[
    "senior", "junior", "lead", "principal", "chief", "head of", "director of",
    "vice president", "vp", "associate", "assistant",
];

pub const DEFAULT_JOB_DOMAINS: &[&str] = &[
    "software", "web", "mobile", "frontend", "front-end", "front end", "backend", "back-end",
    "back end", "full-stack", "full stack", "fullstack", "data", "machine learning", "ml", "ai",
    "artificial intelligence", "devops", "cloud", "qa", "test", "security", "site reliability",
    "sre", "product", "project", "business", "technical", "solution", "ui", "ux", "graphic",
    "interaction", "visual", "database", "system", "network", "it",
];

pub const DEFAULT_JOB_ROLES: &[&str] = &[
    "engineer", "developer", "programmer", "architect", "designer", "analyst", "manager",
    "specialist", "consultant", "intern", "trainee", "administrator", "master", "scientist",
];

/// Trailing words that mark a capitalized run as an organization name.
pub const DEFAULT_ORG_SUFFIXES: &[&str] = &[
    "inc", "inc.", "corp", "corp.", "corporation", "co", "co.", "llc", "ltd", "ltd.", "limited",
    "gmbh", "ag", "sa", "s.a.", "plc", "bv", "group", "holding", "holdings", "technologies",
    "technology", "solutions", "systems", "labs", "software", "consulting", "partners", "bank",
    "university", "college", "institute", "academy", "school", "foundation", "agency",
];

/// Résumé section headings and boilerplate that never form a person's name.
pub const DEFAULT_HEADING_WORDS: &[&str] = &[
    "curriculum", "vitae", "resume", "résumé", "cv", "profile", "summary", "objective",
    "contact", "experience", "work", "professional", "employment", "history", "education",
    "skills", "languages", "projects", "certifications", "references", "interests", "hobbies",
    "personal", "information", "details", "achievements", "awards", "publications",
];

/// Gazetteer backing the rule-based location recognizer.
pub const DEFAULT_LOCATIONS: &[&str] = &[
    // Countries
    "afghanistan", "albania", "algeria", "argentina", "armenia", "australia", "austria",
    "azerbaijan", "bangladesh", "belarus", "belgium", "bolivia", "bosnia", "brazil", "bulgaria",
    "cambodia", "cameroon", "canada", "chile", "china", "colombia", "croatia", "cuba", "cyprus",
    "czechia", "czech republic", "denmark", "ecuador", "egypt", "estonia", "ethiopia",
    "finland", "france", "georgia", "germany", "ghana", "greece", "hungary", "iceland", "india",
    "indonesia", "iran", "iraq", "ireland", "israel", "italy", "japan", "jordan", "kazakhstan",
    "kenya", "kosovo", "kuwait", "latvia", "lebanon", "lithuania", "luxembourg", "malaysia",
    "malta", "mexico", "moldova", "montenegro", "morocco", "nepal", "netherlands",
    "new zealand", "nigeria", "north macedonia", "norway", "pakistan", "peru", "philippines",
    "poland", "portugal", "qatar", "romania", "russia", "saudi arabia", "serbia", "singapore",
    "slovakia", "slovenia", "south africa", "south korea", "korea", "spain", "sri lanka",
    "sweden", "switzerland", "syria", "taiwan", "thailand", "tunisia", "turkey", "ukraine",
    "united arab emirates", "uae", "united kingdom", "uk", "united states", "usa", "us",
    "uruguay", "uzbekistan", "venezuela", "vietnam",
    // Cities
    "amsterdam", "athens", "atlanta", "austin", "bangalore", "bangkok", "barcelona", "beijing",
    "beirut", "belgrade", "berlin", "bern", "bogota", "boston", "bratislava", "brussels",
    "bucharest", "budapest", "buenos aires", "cairo", "cape town", "casablanca", "chicago",
    "cologne", "copenhagen", "dallas", "delhi", "new delhi", "denver", "dubai", "dublin",
    "dusseldorf", "düsseldorf", "edinburgh", "frankfurt", "geneva", "hamburg", "helsinki",
    "hong kong", "houston", "istanbul", "jakarta", "johannesburg", "karachi", "kyiv", "kiev",
    "lagos", "lahore", "leipzig", "lisbon", "ljubljana", "london", "los angeles", "lyon",
    "madrid", "manchester", "manila", "marseille", "melbourne", "miami", "milan", "montreal",
    "moscow", "mumbai", "munich", "münchen", "nairobi", "new york", "oslo", "paris", "porto",
    "prague", "riga", "rio de janeiro", "rome", "rotterdam", "san francisco", "santiago",
    "sao paulo", "são paulo", "seattle", "seoul", "shanghai", "sofia", "stockholm",
    "stuttgart", "sydney", "tallinn", "tel aviv", "tokyo", "toronto", "tunis", "vancouver",
    "vienna", "vilnius", "warsaw", "washington", "zagreb", "zurich", "zürich",
];

/// Controlled vocabulary and keyword lists for one engine instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lexicon {
    #[serde(default = "default_skills")]
    pub skills: Vec<String>,
    #[serde(default = "default_org_keyword_blacklist")]
    pub org_keyword_blacklist: Vec<String>,
    #[serde(default = "default_company_blacklist")]
    pub company_blacklist: Vec<String>,
    #[serde(default = "default_job_blacklist")]
    pub job_blacklist: Vec<String>,
    #[serde(default = "default_job_levels")]
    pub job_levels: Vec<String>,
    #[serde(default = "default_job_domains")]
    pub job_domains: Vec<String>,
    #[serde(default = "default_job_roles")]
    pub job_roles: Vec<String>,
    #[serde(default = "default_org_suffixes")]
    pub org_suffixes: Vec<String>,
    #[serde(default = "default_heading_words")]
    pub heading_words: Vec<String>,
    #[serde(default = "default_locations")]
    pub locations: Vec<String>,
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn default_skills() -> Vec<String> {
    owned(DEFAULT_SKILLS)
}
fn default_org_keyword_blacklist() -> Vec<String> {
    owned(DEFAULT_ORG_KEYWORD_BLACKLIST)
}
fn default_company_blacklist() -> Vec<String> {
    owned(DEFAULT_COMPANY_BLACKLIST)
}
fn default_job_blacklist() -> Vec<String> {
    owned(DEFAULT_JOB_BLACKLIST)
}
fn default_job_levels() -> Vec<String> {
    owned(DEFAULT_JOB_LEVELS)
}
fn default_job_domains() -> Vec<String> {
    owned(DEFAULT_JOB_DOMAINS)
}
fn default_job_roles() -> Vec<String> {
    owned(DEFAULT_JOB_ROLES)
}
fn default_org_suffixes() -> Vec<String> {
    owned(DEFAULT_ORG_SUFFIXES)
}
fn default_heading_words() -> Vec<String> {
    owned(DEFAULT_HEADING_WORDS)
}
fn default_locations() -> Vec<String> {
    owned(DEFAULT_LOCATIONS)
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            skills: default_skills(),
            org_keyword_blacklist: default_org_keyword_blacklist(),
            company_blacklist: default_company_blacklist(),
            job_blacklist: default_job_blacklist(),
            job_levels: default_job_levels(),
            job_domains: default_job_domains(),
            job_roles: default_job_roles(),
            org_suffixes: default_org_suffixes(),
            heading_words: default_heading_words(),
            locations: default_locations(),
        }
        .normalized()
    }
}

impl Lexicon {
    /// Load a lexicon from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let lexicon: Lexicon = serde_json::from_str(&content)?;
        let lexicon = lexicon.normalized();
        info!(
            "Loaded lexicon from {} ({} skills, {} locations)",
            path.display(),
            lexicon.skills.len(),
            lexicon.locations.len()
        );
        Ok(lexicon)
    }

    /// Trim, lower-case and deduplicate every list, keeping first occurrences.
    pub fn normalized(mut self) -> Self {
        for list in [
            &mut self.skills,
            &mut self.org_keyword_blacklist,
            &mut self.company_blacklist,
            &mut self.job_blacklist,
            &mut self.job_levels,
            &mut self.job_domains,
            &mut self.job_roles,
            &mut self.org_suffixes,
            &mut self.heading_words,
            &mut self.locations,
        ] {
            normalize_list(list);
        }
        self
    }
}

fn normalize_list(list: &mut Vec<String>) {
    let mut seen = HashSet::new();
    let normalized: Vec<String> = list
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty() && seen.insert(s.clone()))
        .collect();
    *list = normalized;
}
