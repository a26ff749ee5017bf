//! In-memory content repository.

use std::collections::HashMap;
use std::sync::RwLock;

use log::warn;
use metafield_resolution::{AttributeLookup, SourceId};

use super::{Attachment, ContentItem, ContentRepositoryTrait, Term, TypeArchive, User};
use crate::errors::{Error, Result};

#[derive(Default)]
struct Store {
    items: HashMap<u64, ContentItem>,
    terms: HashMap<(String, u64), Term>,
    archives: HashMap<String, TypeArchive>,
    users: HashMap<u64, User>,
    attachments: HashMap<u64, Attachment>,
}

/// Content repository held in memory.
///
/// Also serves as the attribute lookup for image candidates, keyed by
/// attachment id.
#[derive(Default)]
pub struct MemoryContentRepository {
    store: RwLock<Store>,
}

impl MemoryContentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_item(&self, item: ContentItem) -> Result<()> {
        self.write(|store| {
            store.items.insert(item.id, item);
        })
    }

    pub fn insert_term(&self, term: Term) -> Result<()> {
        self.write(|store| {
            store.terms.insert((term.taxonomy.clone(), term.id), term);
        })
    }

    pub fn insert_type_archive(&self, archive: TypeArchive) -> Result<()> {
        self.write(|store| {
            store.archives.insert(archive.post_type.clone(), archive);
        })
    }

    pub fn insert_user(&self, user: User) -> Result<()> {
        self.write(|store| {
            store.users.insert(user.id, user);
        })
    }

    pub fn insert_attachment(&self, attachment: Attachment) -> Result<()> {
        self.write(|store| {
            store.attachments.insert(attachment.id, attachment);
        })
    }

    fn write<F: FnOnce(&mut Store)>(&self, f: F) -> Result<()> {
        let mut store = self
            .store
            .write()
            .map_err(|_| Error::Repository("content store lock poisoned".to_string()))?;
        f(&mut store);
        Ok(())
    }

    fn read<T, F: FnOnce(&Store) -> T>(&self, f: F) -> Result<T> {
        let store = self
            .store
            .read()
            .map_err(|_| Error::Repository("content store lock poisoned".to_string()))?;
        Ok(f(&store))
    }

    /// Attachment lookup for enrichment; repository failures count as misses.
    fn lookup_attachment(&self, id: SourceId) -> Option<Attachment> {
        match self.attachment(id) {
            Ok(attachment) => attachment,
            Err(e) => {
                warn!("Attachment {} lookup failed: {}", id, e);
                None
            }
        }
    }
}

impl ContentRepositoryTrait for MemoryContentRepository {
    fn content_item(&self, id: u64) -> Result<Option<ContentItem>> {
        self.read(|store| store.items.get(&id).cloned())
    }

    fn term(&self, taxonomy: &str, id: u64) -> Result<Option<Term>> {
        self.read(|store| store.terms.get(&(taxonomy.to_string(), id)).cloned())
    }

    fn type_archive(&self, post_type: &str) -> Result<Option<TypeArchive>> {
        self.read(|store| store.archives.get(post_type).cloned())
    }

    fn user(&self, id: u64) -> Result<Option<User>> {
        self.read(|store| store.users.get(&id).cloned())
    }

    fn attachment(&self, id: u64) -> Result<Option<Attachment>> {
        self.read(|store| store.attachments.get(&id).cloned())
    }
}

impl AttributeLookup for MemoryContentRepository {
    fn dimensions(&self, source_id: SourceId) -> Option<(u32, u32)> {
        self.lookup_attachment(source_id)
            .filter(|a| a.width > 0 && a.height > 0)
            .map(|a| (a.width, a.height))
    }

    fn alt_text(&self, source_id: SourceId) -> Option<String> {
        self.lookup_attachment(source_id)
            .map(|a| a.alt)
            .filter(|alt| !alt.is_empty())
    }

    fn caption(&self, source_id: SourceId) -> Option<String> {
        self.lookup_attachment(source_id)
            .map(|a| a.caption)
            .filter(|caption| !caption.is_empty())
    }

    fn filesize(&self, source_id: SourceId) -> Option<u64> {
        self.lookup_attachment(source_id)
            .map(|a| a.filesize)
            .filter(|size| *size > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repository() -> MemoryContentRepository {
        let repo = MemoryContentRepository::new();
        repo.insert_attachment(Attachment {
            id: 5,
            url: "https://example.com/a.jpg".to_string(),
            width: 1200,
            height: 630,
            alt: "A cat".to_string(),
            caption: String::new(),
            filesize: 2048,
        })
        .unwrap();
        repo.insert_term(Term {
            id: 2,
            taxonomy: "genre".to_string(),
            name: "Jazz".to_string(),
            description: String::new(),
        })
        .unwrap();
        repo
    }

    #[test]
    fn test_terms_are_keyed_by_taxonomy() {
        let repo = repository();

        assert_eq!(repo.term("genre", 2).unwrap().unwrap().name, "Jazz");
        assert!(repo.term("category", 2).unwrap().is_none());
    }

    #[test]
    fn test_attribute_lookup() {
        let repo = repository();

        assert_eq!(repo.dimensions(5), Some((1200, 630)));
        assert_eq!(repo.alt_text(5).as_deref(), Some("A cat"));
        assert_eq!(repo.filesize(5), Some(2048));
        // Empty values count as misses so producer hints survive enrichment.
        assert_eq!(repo.caption(5), None);
        assert_eq!(repo.dimensions(99), None);
    }
}
