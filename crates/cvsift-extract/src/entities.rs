//! Candidate name and location from named entities.

use cvsift_infer::{EntityLabel, EntityRecognizer};

/// Person entities longer than this are unlikely to be a candidate's name.
const MAX_NAME_WORDS: usize = 3;

/// Line boundaries, including carriage returns and form feeds from page breaks.
const LINE_BREAKS: &[char] = &[
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// First short PERSON entity and first GPE entity.
///
/// Without a PERSON entity, the first Title Case line stands in for the name.
/// Location has no fallback.
pub fn extract_name_and_location(
    recognizer: &dyn EntityRecognizer,
    text: &str,
) -> (Option<String>, Option<String>) {
    let mut name = None;
    let mut location = None;

    for entity in recognizer.recognize(text) {
        match entity.label {
            EntityLabel::Person
                if name.is_none() && entity.text.split_whitespace().count() <= MAX_NAME_WORDS =>
            {
                name = Some(entity.text);
            }
            EntityLabel::Gpe if location.is_none() => location = Some(entity.text),
            _ => {}
        }
        if name.is_some() && location.is_some() {
            break;
        }
    }

    if name.is_none() {
        name = text
            .split(LINE_BREAKS)
            .map(str::trim)
            .find(|line| !line.is_empty() && is_title_case(line))
            .map(str::to_string);
    }

    (name, location)
}

/// Every cased run starts with exactly one uppercase letter, and at least one
/// cased character exists. `"Jane Smith"` and `"Curriculum Vitae 2024"` qualify,
/// `"JANE SMITH"` and `"Jane smith"` do not.
pub fn is_title_case(s: &str) -> bool {
    let mut cased = false;
    let mut previous_cased = false;
    for c in s.chars() {
        if c.is_uppercase() {
            if previous_cased {
                return false;
            }
            previous_cased = true;
            cased = true;
        } else if c.is_lowercase() {
            if !previous_cased {
                return false;
            }
            previous_cased = true;
            cased = true;
        } else {
            previous_cased = false;
        }
    }
    cased
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvsift_core::Lexicon;
    use cvsift_infer::{Entity, RuleRecognizer};

    struct Fixed(Vec<(EntityLabel, &'static str)>);

    impl EntityRecognizer for Fixed {
        fn recognize(&self, _text: &str) -> Vec<Entity> {
            self.0
                .iter()
                .map(|(label, text)| Entity {
                    label: *label,
                    text: text.to_string(),
                    start: 0,
                    end: text.len(),
                })
                .collect()
        }
        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    #[test]
    fn test_name_and_location_from_rules() {
        let rules = RuleRecognizer::new(&Lexicon::default());
        let (name, location) = extract_name_and_location(&rules, "John Doe lives in Berlin");
        assert_eq!(name.as_deref(), Some("John Doe"));
        assert_eq!(location.as_deref(), Some("Berlin"));
    }

    #[test]
    fn test_skill_phrases_do_not_become_the_name() {
        let rules = RuleRecognizer::new(&Lexicon::default());
        let text = "CURRICULUM VITAE\nJANE SMITH\nsoftware engineer\nskills: Machine Learning, Cloud Computing";
        let (name, location) = extract_name_and_location(&rules, text);
        assert_eq!(name, None);
        assert_eq!(location, None);
    }

    #[test]
    fn test_long_person_is_skipped() {
        let ner = Fixed(vec![
            (EntityLabel::Person, "Maria Anna Lucia Rossi"),
            (EntityLabel::Person, "Maria Rossi"),
            (EntityLabel::Gpe, "Rome"),
            (EntityLabel::Gpe, "Milan"),
        ]);
        let (name, location) = extract_name_and_location(&ner, "");
        assert_eq!(name.as_deref(), Some("Maria Rossi"));
        assert_eq!(location.as_deref(), Some("Rome"));
    }

    #[test]
    fn test_title_case_fallback() {
        let ner = Fixed(vec![(EntityLabel::Org, "Acme")]);
        let text = "\n  curriculum vitae\n  Jane Smith  \nJANE";
        let (name, location) = extract_name_and_location(&ner, text);
        assert_eq!(name.as_deref(), Some("Jane Smith"));
        assert_eq!(location, None);
    }

    #[test]
    fn test_title_case_fallback_splits_on_carriage_returns_and_page_breaks() {
        let ner = Fixed(vec![]);
        let (name, _) = extract_name_and_location(&ner, "JANE SMITH\rjane@x.com\rDeveloper");
        assert_eq!(name.as_deref(), Some("Developer"));

        let (name, _) = extract_name_and_location(&ner, "page one\x0cJane Smith\u{2028}more");
        assert_eq!(name.as_deref(), Some("Jane Smith"));
    }

    #[test]
    fn test_nothing_found() {
        let ner = Fixed(vec![]);
        let (name, location) = extract_name_and_location(&ner, "skills: python\n2020 - 2024");
        assert_eq!(name, None);
        assert_eq!(location, None);
    }

    #[test]
    fn test_is_title_case() {
        assert!(is_title_case("Jane Smith"));
        assert!(is_title_case("Jean-Luc O'Neil"));
        assert!(is_title_case("Curriculum Vitae 2024"));
        assert!(!is_title_case("JANE SMITH"));
        assert!(!is_title_case("Jane smith"));
        assert!(!is_title_case("McDonald"));
        assert!(!is_title_case("2024"));
        assert!(!is_title_case(""));
    }
}
