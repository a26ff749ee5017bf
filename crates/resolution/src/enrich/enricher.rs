//! Candidate enrichment.
//!
//! Turns raw candidates into described candidates by looking up attributes
//! for their backing item. Misses never abort a candidate: the attribute
//! keeps the producer's hint, or its zero value.

use std::sync::Arc;

use log::debug;

use crate::collaborators::{AttributeLookup, NoAttributes};
use crate::errors::ResolutionError;
use crate::models::{Candidate, CandidateAttributes, RawCandidate, SourceId, SourceName};

/// Enriches raw candidates through an [`AttributeLookup`].
#[derive(Clone)]
pub struct Enricher {
    lookup: Arc<dyn AttributeLookup>,
}

impl Enricher {
    pub fn new(lookup: Arc<dyn AttributeLookup>) -> Self {
        Self { lookup }
    }

    /// Enrich a raw candidate produced by `source`.
    pub fn enrich(&self, source: &SourceName, raw: RawCandidate) -> Candidate {
        let RawCandidate {
            value,
            source_id,
            hints,
        } = raw;

        let attributes = match source_id {
            Some(id) => self.lookup_attributes(id, hints),
            None => hints,
        };

        Candidate {
            value,
            source_id,
            attributes,
            source: source.clone(),
        }
    }

    fn lookup_attributes(&self, id: SourceId, hints: CandidateAttributes) -> CandidateAttributes {
        let (width, height) = self
            .lookup
            .dimensions(id)
            .or_else(|| miss(id, "dimensions"))
            .unwrap_or((hints.width, hints.height));

        let alt = self
            .lookup
            .alt_text(id)
            .or_else(|| miss(id, "alt"))
            .unwrap_or(hints.alt);

        let caption = self
            .lookup
            .caption(id)
            .or_else(|| miss(id, "caption"))
            .unwrap_or(hints.caption);

        let filesize = self
            .lookup
            .filesize(id)
            .or_else(|| miss(id, "filesize"))
            .unwrap_or(hints.filesize);

        CandidateAttributes {
            width,
            height,
            alt,
            caption,
            filesize,
        }
    }
}

impl Default for Enricher {
    fn default() -> Self {
        Self::new(Arc::new(NoAttributes))
    }
}

fn miss<T>(source_id: SourceId, attribute: &'static str) -> Option<T> {
    let error = ResolutionError::EnrichmentMiss {
        source_id,
        attribute,
    };
    debug!("{}, using default", error);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Library {
        dimensions: HashMap<SourceId, (u32, u32)>,
        alt: HashMap<SourceId, String>,
    }

    impl AttributeLookup for Library {
        fn dimensions(&self, source_id: SourceId) -> Option<(u32, u32)> {
            self.dimensions.get(&source_id).copied()
        }

        fn alt_text(&self, source_id: SourceId) -> Option<String> {
            self.alt.get(&source_id).cloned()
        }

        fn caption(&self, _source_id: SourceId) -> Option<String> {
            None
        }

        fn filesize(&self, _source_id: SourceId) -> Option<u64> {
            None
        }
    }

    fn source() -> SourceName {
        Cow::Borrowed("featured")
    }

    #[test]
    fn test_literal_value_gets_zero_defaults() {
        let enricher = Enricher::default();
        let candidate = enricher.enrich(&source(), RawCandidate::new("https://example.com/x.png"));

        assert_eq!(candidate.attributes, CandidateAttributes::default());
        assert_eq!(candidate.source, "featured");
    }

    #[test]
    fn test_literal_value_keeps_hints() {
        let enricher = Enricher::default();
        let raw = RawCandidate::new("https://example.com/x.png").with_alt("from markup");
        let candidate = enricher.enrich(&source(), raw);

        assert_eq!(candidate.attributes.alt, "from markup");
        assert_eq!(candidate.attributes.width, 0);
    }

    #[test]
    fn test_lookup_fills_attributes() {
        let mut library = Library::default();
        library.dimensions.insert(7, (1200, 630));
        library.alt.insert(7, "A lighthouse".to_string());

        let enricher = Enricher::new(Arc::new(library));
        let raw = RawCandidate::new("https://example.com/l.jpg").with_source_id(7);
        let candidate = enricher.enrich(&source(), raw);

        assert_eq!(candidate.attributes.width, 1200);
        assert_eq!(candidate.attributes.height, 630);
        assert_eq!(candidate.attributes.alt, "A lighthouse");
        assert_eq!(candidate.attributes.caption, "");
        assert_eq!(candidate.attributes.filesize, 0);
    }

    #[test]
    fn test_miss_defaults_only_that_attribute() {
        let mut library = Library::default();
        library.alt.insert(3, "Known alt".to_string());

        let enricher = Enricher::new(Arc::new(library));
        let raw = RawCandidate::new("https://example.com/m.jpg")
            .with_source_id(3)
            .with_dimensions(640, 480);
        let candidate = enricher.enrich(&source(), raw);

        assert_eq!(candidate.attributes.alt, "Known alt");
        assert_eq!((candidate.attributes.width, candidate.attributes.height), (640, 480));
    }

    #[test]
    fn test_unknown_source_id_never_fails() {
        let enricher = Enricher::default();
        let raw = RawCandidate::new("https://example.com/u.jpg").with_source_id(999);
        let candidate = enricher.enrich(&source(), raw);

        assert_eq!(candidate.source_id, Some(999));
        assert_eq!(candidate.attributes, CandidateAttributes::default());
    }
}
