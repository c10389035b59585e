//! Email and phone number extraction.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\+?\d[\d\s().-]{7,}").unwrap());

/// Shortest phone candidate kept after trimming.
pub const MIN_PHONE_LEN: usize = 8;

/// First email address in the text, lower-cased.
pub fn extract_email(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    EMAIL_RE.find(&lower).map(|m| m.as_str().trim().to_string())
}

/// First phone-number-like sequence, verbatim apart from trailing whitespace.
pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_RE
        .find_iter(text)
        .map(|m| m.as_str().trim_end())
        .find(|candidate| candidate.chars().count() >= MIN_PHONE_LEN)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_lowercased() {
        assert_eq!(
            extract_email("contact: JOHN@EXAMPLE.com").as_deref(),
            Some("john@example.com")
        );
    }

    #[test]
    fn test_first_email_wins() {
        let text = "a.b@one.org or c@two.net";
        assert_eq!(extract_email(text).as_deref(), Some("a.b@one.org"));
    }

    #[test]
    fn test_no_email() {
        assert_eq!(extract_email("no contact here @ all"), None);
        assert_eq!(extract_email(""), None);
    }

    #[test]
    fn test_phone_keeps_country_code() {
        let phone = extract_phone("call +49 123 456 789 now").unwrap();
        assert!(phone.contains("+49"));
        assert_eq!(phone, "+49 123 456 789");
    }

    #[test]
    fn test_phone_stops_at_letters_and_trims_newline() {
        let phone = extract_phone("+1 555 0100\nBerlin, Germany").unwrap();
        assert_eq!(phone, "+1 555 0100");
    }

    #[test]
    fn test_short_candidate_is_skipped() {
        // "2019 -   " trims to 6 chars; the real number follows.
        let text = "since 2019 -   \nphone: +30 1234567";
        assert_eq!(extract_phone(text).as_deref(), Some("+30 1234567"));
    }

    #[test]
    fn test_no_phone() {
        assert_eq!(extract_phone("born 1990"), None);
    }
}
