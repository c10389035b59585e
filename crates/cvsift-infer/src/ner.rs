//! Named-entity recognition interface.

use serde::Serialize;

/// Entity categories the extractors care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityLabel {
    Person,
    Org,
    /// Geo-political entity: country, city, region.
    Gpe,
    Misc,
}

impl EntityLabel {
    /// Map a model label (with or without a `B-`/`I-` prefix) to a category.
    pub fn from_model_label(label: &str) -> Option<Self> {
        let bare = label
            .strip_prefix("B-")
            .or_else(|| label.strip_prefix("I-"))
            .unwrap_or(label);
        match bare.to_ascii_uppercase().as_str() {
            "PER" | "PERSON" => Some(Self::Person),
            "ORG" | "ORGANIZATION" => Some(Self::Org),
            "LOC" | "GPE" | "LOCATION" => Some(Self::Gpe),
            "MISC" => Some(Self::Misc),
            _ => None,
        }
    }
}

/// A recognized span; `start`/`end` are byte offsets into the analysed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    pub label: EntityLabel,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Trait for NER backends. Entities come back in document order.
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Vec<Entity>;

    /// Human-readable backend name for logs.
    fn name(&self) -> &'static str;
}
