use std::borrow::Cow;

/// Resolution profile tag (e.g., "social", "structured-data", "embed").
pub type Profile = Cow<'static, str>;

/// Stable source descriptor name, part of chain identity and cache keys.
pub type SourceName = Cow<'static, str>;

/// Identifier of the backing item a candidate was derived from (e.g., an attachment).
pub type SourceId = u64;
