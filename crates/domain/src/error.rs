//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`GreenhubError`] via `#[from]`. Adapters wrap their failures in the
//! `Persistence` variant so the application layer can decide whether to
//! propagate or swallow them.

/// Top-level error for the greenhub workspace.
#[derive(Debug, thiserror::Error)]
pub enum GreenhubError {
    /// A value failed domain validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A referenced greenhouse or log entry does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// An action was attempted from the wrong timer state.
    #[error(transparent)]
    InvalidState(#[from] InvalidStateError),

    /// The durable store failed to read or write.
    #[error("persistence error")]
    Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A value outside the domain's accepted range.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The requested watering length is not one of the configured choices.
    #[error("unsupported watering duration: {minutes} minutes")]
    UnsupportedDuration { minutes: u32 },

    /// A greenhouse label was empty.
    #[error("greenhouse label must not be empty")]
    EmptyLabel,

    /// `current_time` and `target_time` must be set and cleared together.
    #[error("countdown fields are inconsistent")]
    InconsistentCountdown,
}

/// A lookup by key failed. Unknown greenhouse keys are a programmer error:
/// the key set is fixed at startup and never changes.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found: {key}")]
pub struct NotFoundError {
    /// What kind of thing was looked up (e.g. `"Greenhouse"`).
    pub entity: &'static str,
    /// The key that missed.
    pub key: String,
}

/// An action was attempted while the greenhouse was in the wrong state,
/// e.g. starting a timer on a greenhouse that is already running.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("cannot {action} greenhouse {key}: {reason}")]
pub struct InvalidStateError {
    /// The attempted action (`"start"`, `"cancel"`, `"acknowledge"`).
    pub action: &'static str,
    /// The greenhouse the action targeted.
    pub key: String,
    /// Why the transition is not allowed from the current state.
    pub reason: &'static str,
}
