//! Deterministic rule-based entity recognizer.
//!
//! Used when no NER model is installed. Works on runs of capitalized tokens
//! that sit on the same line with only spaces between them:
//! - a run ending in an organization suffix (`Corp`, `GmbH`, `University`) is ORG
//! - a run found in the location gazetteer is GPE
//! - a run right after `at`/`for`/`joined` is ORG unless it holds a heading, role or skill word
//! - a run after `based in`, `lives in`, ... is GPE
//! - a 2–3 word run of name-shaped words with no lexicon word in it is PERSON

use std::collections::HashSet;

use cvsift_core::Lexicon;

use crate::ner::{Entity, EntityLabel, EntityRecognizer};
use crate::tokenize::{tokenize, words, Token};

const ORG_CONTEXT: &[&str] = &["at", "for", "joined", "@"];
const RESIDENCE_VERBS: &[&str] = &[
    "based", "located", "lives", "living", "live", "residing", "reside", "resides",
];

pub struct RuleRecognizer {
    locations: HashSet<String>,
    org_suffixes: HashSet<String>,
    /// Words that rule a run out as an organization after a context word.
    role_words: HashSet<String>,
    /// Words that rule a run out as a person name.
    non_name_words: HashSet<String>,
}

impl RuleRecognizer {
    pub fn new(lexicon: &Lexicon) -> Self {
        let role_words: HashSet<String> = split_words(
            lexicon
                .heading_words
                .iter()
                .chain(&lexicon.job_roles)
                .chain(&lexicon.job_levels)
                .chain(&lexicon.skills),
        );
        let mut non_name_words = split_words(lexicon.org_suffixes.iter().chain(&lexicon.job_domains));
        non_name_words.extend(role_words.iter().cloned());

        Self {
            locations: lexicon.locations.iter().cloned().collect(),
            org_suffixes: lexicon.org_suffixes.iter().cloned().collect(),
            role_words,
            non_name_words,
        }
    }

    fn classify(&self, text: &str, tokens: &[Token<'_>], first: usize, last: usize) -> Option<EntityLabel> {
        let run = &tokens[first..=last];
        let lower: Vec<String> = run.iter().map(|t| t.text.to_lowercase()).collect();
        let joined = lower.join(" ");

        if run.len() >= 2 && self.org_suffixes.contains(&lower[lower.len() - 1]) {
            return Some(EntityLabel::Org);
        }

        if self.locations.contains(&joined) || lower.iter().all(|w| self.locations.contains(w)) {
            return Some(EntityLabel::Gpe);
        }

        let prev = preceding_word(text, tokens, first, 1);
        let prev2 = preceding_word(text, tokens, first, 2);
        let has_role = lower.iter().any(|w| self.role_words.contains(w));
        let has_non_name = lower.iter().any(|w| self.non_name_words.contains(w));

        if let Some(p) = prev.as_deref() {
            if ORG_CONTEXT.contains(&p) && !has_role {
                return Some(EntityLabel::Org);
            }
            if p == "in" && prev2.as_deref().is_some_and(|w| RESIDENCE_VERBS.contains(&w)) {
                return Some(EntityLabel::Gpe);
            }
        }

        if (2..=3).contains(&word_count(text, run))
            && !has_non_name
            && run.iter().all(|t| is_name_shaped(t.text))
        {
            return Some(EntityLabel::Person);
        }

        None
    }
}

impl EntityRecognizer for RuleRecognizer {
    fn recognize(&self, text: &str) -> Vec<Entity> {
        let tokens = tokenize(text);
        let mut entities = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            if !starts_upper(tokens[i].text) {
                i += 1;
                continue;
            }
            let mut j = i;
            while j + 1 < tokens.len()
                && starts_upper(tokens[j + 1].text)
                && inline_gap(text, tokens[j].end, tokens[j + 1].start)
            {
                j += 1;
            }

            if let Some(label) = self.classify(text, &tokens, i, j) {
                let (start, end) = (tokens[i].start, tokens[j].end);
                entities.push(Entity {
                    label,
                    text: text[start..end].to_string(),
                    start,
                    end,
                });
            }
            i = j + 1;
        }

        entities
    }

    fn name(&self) -> &'static str {
        "rules"
    }
}

fn starts_upper(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

/// Lower-cased words of each entry, with the entry itself for entries like `s.a.`.
fn split_words<'a>(entries: impl Iterator<Item = &'a String>) -> HashSet<String> {
    let mut out = HashSet::new();
    for entry in entries {
        out.insert(entry.to_lowercase());
        out.extend(words(entry).into_iter().map(str::to_lowercase));
    }
    out
}

/// True when two tokens are separated only by spaces or tabs, or by one inner hyphen.
fn inline_gap(text: &str, end: usize, next_start: usize) -> bool {
    let gap = &text[end..next_start];
    gap == "-" || (!gap.is_empty() && gap.chars().all(|c| c == ' ' || c == '\t'))
}

/// Whitespace-separated words in a run; `Jean-Luc` counts once.
fn word_count(text: &str, run: &[Token<'_>]) -> usize {
    1 + run.windows(2).filter(|pair| &text[pair[0].end..pair[1].start] != "-").count()
}

/// Lower-cased word `distance` tokens before `index`, if on the same line.
fn preceding_word(text: &str, tokens: &[Token<'_>], index: usize, distance: usize) -> Option<String> {
    if index < distance {
        return None;
    }
    for k in (index - distance)..index {
        if !inline_gap(text, tokens[k].end, tokens[k + 1].start) {
            return None;
        }
    }
    Some(tokens[index - distance].text.to_lowercase())
}

/// `Jane`, `O'Neil`, `Jean-Luc` or an initial like `J`.
fn is_name_shaped(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_uppercase() {
        return false;
    }
    let rest: Vec<char> = chars.collect();
    if rest.is_empty() {
        return true;
    }
    rest.iter().any(|c| c.is_lowercase())
        && rest
            .iter()
            .all(|c| c.is_alphabetic() || matches!(c, '-' | '\'' | '’' | '.'))
}
