//! Errors.
use thiserror::Error;

/// Errors raised while converting specs and values or selecting a wrapper.
///
/// None of these conditions is recovered internally. They signal a
/// misconfiguration to be fixed by the caller, not a transient fault.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A spec, space or value shape not among the recognized variants.
    #[error("Spec type {0} not supported")]
    UnsupportedSpec(String),

    /// An explicit wrapper selector not known to the dispatcher.
    #[error("Unknown wrapper kind: {0}")]
    UnknownWrapper(String),

    /// A value that does not reconcile with the canonical batch layout.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// An explicit selector naming a different backend family than the
    /// handle declares.
    #[error("Wrapper kind {kind} cannot drive a {backend} backend")]
    IncompatibleBackend {
        /// The requested selector.
        kind: String,
        /// Family declared by the backend handle.
        backend: String,
    },
}
