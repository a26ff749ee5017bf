use serde::{Deserialize, Serialize};

use super::types::{SourceId, SourceName};

/// Descriptive attributes attached to a candidate.
///
/// Zero values (0 dimensions, empty strings) mean "unknown".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateAttributes {
    pub width: u32,
    pub height: u32,
    pub alt: String,
    pub caption: String,
    /// Byte size of the backing file
    pub filesize: u64,
}

impl CandidateAttributes {
    /// Returns true when both dimensions are known.
    pub fn has_dimensions(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Candidate as yielded by a producer, before enrichment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCandidate {
    /// Primary value (URL, text, directive)
    pub value: String,

    /// Backing item used for attribute lookups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<SourceId>,

    /// Attributes the producer already knows (e.g., an `alt` read from markup).
    /// Enrichment lookups take precedence over hints.
    #[serde(default)]
    pub hints: CandidateAttributes,
}

impl RawCandidate {
    /// Create a raw candidate carrying only a value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            source_id: None,
            hints: CandidateAttributes::default(),
        }
    }

    /// Attach a backing item id.
    pub fn with_source_id(mut self, source_id: SourceId) -> Self {
        self.source_id = Some(source_id);
        self
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.hints.alt = alt.into();
        self
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.hints.width = width;
        self.hints.height = height;
        self
    }
}

/// Enriched candidate as surfaced to callers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Primary value (required, non-empty once validated)
    pub value: String,

    /// Backing item the attributes were looked up from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<SourceId>,

    /// Enriched attributes
    pub attributes: CandidateAttributes,

    /// Name of the source descriptor (or "override") that produced this candidate
    pub source: SourceName,
}

impl Candidate {
    /// Returns true when the primary value is non-empty.
    ///
    /// A value made only of whitespace counts as empty.
    pub fn is_valid(&self) -> bool {
        !self.value.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    #[test]
    fn test_raw_candidate_builder() {
        let raw = RawCandidate::new("https://example.com/a.jpg")
            .with_source_id(12)
            .with_alt("A")
            .with_dimensions(1200, 630);

        assert_eq!(raw.source_id, Some(12));
        assert_eq!(raw.hints.alt, "A");
        assert!(raw.hints.has_dimensions());
    }

    #[test]
    fn test_candidate_validity() {
        let mut candidate = Candidate {
            value: String::new(),
            source_id: None,
            attributes: CandidateAttributes::default(),
            source: Cow::Borrowed("test"),
        };
        assert!(!candidate.is_valid());

        candidate.value = " \t\n ".to_string();
        assert!(!candidate.is_valid());

        candidate.value = "Title".to_string();
        assert!(candidate.is_valid());
    }

    #[test]
    fn test_candidate_serialization() {
        let candidate = Candidate {
            value: "https://example.com/a.jpg".to_string(),
            source_id: None,
            attributes: CandidateAttributes {
                width: 10,
                ..CandidateAttributes::default()
            },
            source: Cow::Borrowed("featured"),
        };

        let json = serde_json::to_value(&candidate).unwrap();
        assert_eq!(json["value"], "https://example.com/a.jpg");
        assert_eq!(json["attributes"]["width"], 10);
        assert!(json.get("sourceId").is_none());
    }
}
