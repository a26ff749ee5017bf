//! Repository traits for site content.

use crate::content::{Attachment, ContentItem, Term, TypeArchive, User};
use crate::errors::Result;

/// Read access to the content sources resolve against.
///
/// Unknown ids return `Ok(None)`; `Err` means the repository itself failed.
pub trait ContentRepositoryTrait: Send + Sync {
    fn content_item(&self, id: u64) -> Result<Option<ContentItem>>;

    fn term(&self, taxonomy: &str, id: u64) -> Result<Option<Term>>;

    fn type_archive(&self, post_type: &str) -> Result<Option<TypeArchive>>;

    fn user(&self, id: u64) -> Result<Option<User>>;

    fn attachment(&self, id: u64) -> Result<Option<Attachment>>;
}
