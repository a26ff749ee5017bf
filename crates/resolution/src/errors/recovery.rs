use serde::Serialize;

/// Classification for recovery policy.
///
/// Used to determine how the engine responds to an error raised while
/// resolving a field.
///
/// # Behavior Summary
///
/// | Class | Crosses the pipeline? | Effect |
/// |-------|----------------------|--------|
/// | `Fatal` | Yes | Resolution aborts, caller sees the error |
/// | `SkipProducer` | No | Producer treated as drained, chain continues |
/// | `DefaultAttribute` | No | Attribute keeps its zero value |
/// | `SkipCandidate` | No | Candidate dropped, producer keeps going |
///
/// Inside a chain walk nothing crosses the walker: a producer that raises a
/// `Fatal` error is logged and treated like `SkipProducer`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryClass {
    /// Caller contract violation. Never recovered inside the engine.
    Fatal,

    /// A producer failed. Whatever it yielded before the failure stays
    /// accepted; the walker advances to the next source descriptor.
    SkipProducer,

    /// An enrichment lookup missed. Only that attribute is defaulted.
    DefaultAttribute,

    /// A candidate failed validation and is never surfaced.
    SkipCandidate,
}
