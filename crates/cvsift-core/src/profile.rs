//! The candidate profile assembled from one résumé.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Name used when no person could be identified.
pub const UNKNOWN_NAME: &str = "Unknown";
/// Location used when no geo-political entity was found.
pub const UNKNOWN_LOCATION: &str = "Unknown";
/// Language code used when identification failed.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Normalized candidate information extracted from a single document.
///
/// Built once per document and never mutated afterwards. Sets are ordered so
/// that two extractions of the same file compare and serialize identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: String,
    /// Members of the controlled skill vocabulary found in the text.
    pub skills: BTreeSet<String>,
    /// Lower-cased job titles.
    pub jobs: BTreeSet<String>,
    /// Organization names, 3 to 60 characters long.
    pub companies: BTreeSet<String>,
    /// ISO-639-1 code, or [`UNKNOWN_LANGUAGE`].
    pub language: String,
}

impl CandidateProfile {
    /// The terminal "nothing extractable" profile: every field at its sentinel.
    pub fn empty() -> Self {
        Self {
            name: UNKNOWN_NAME.to_string(),
            email: None,
            phone: None,
            location: UNKNOWN_LOCATION.to_string(),
            skills: BTreeSet::new(),
            jobs: BTreeSet::new(),
            companies: BTreeSet::new(),
            language: UNKNOWN_LANGUAGE.to_string(),
        }
    }

    /// True when every field still holds its sentinel value.
    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }

    pub fn has_name(&self) -> bool {
        self.name != UNKNOWN_NAME
    }

    pub fn has_location(&self) -> bool {
        self.location != UNKNOWN_LOCATION
    }
}

impl Default for CandidateProfile {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_profile_sentinels() {
        let profile = CandidateProfile::empty();
        assert_eq!(profile.name, "Unknown");
        assert_eq!(profile.location, "Unknown");
        assert_eq!(profile.language, "unknown");
        assert!(profile.email.is_none());
        assert!(profile.phone.is_none());
        assert!(profile.skills.is_empty() && profile.jobs.is_empty() && profile.companies.is_empty());
        assert!(profile.is_empty());
        assert!(!profile.has_name());
        assert!(!profile.has_location());
    }

    #[test]
    fn test_serialized_field_names() {
        let mut profile = CandidateProfile::empty();
        profile.skills.insert("python".into());
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["name"], "Unknown");
        assert!(json["email"].is_null());
        assert_eq!(json["skills"], serde_json::json!(["python"]));
        assert!(json["companies"].is_array());
        assert!(!profile.is_empty());

        profile.location = "Berlin".into();
        assert!(profile.has_location());
        assert!(!profile.has_name());
    }
}
