//! Error taxonomy for configuration building and import.
//!
//! Neither error is fatal: callers re-supply corrected input and try again.
//! Targets that simply have nothing to render are not errors at all, see
//! [`EncodedArtifact::Empty`](crate::service::EncodedArtifact::Empty).

use thiserror::Error;

/// A required form field is missing, so generation does not proceed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("server name is required")]
    MissingServerName,

    #[error("{0} is required")]
    MissingField(&'static str),
}

/// An external configuration document could not be turned into a form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("unrecognized configuration: {0}")]
    Unparseable(String),
}

impl ImportError {
    pub(crate) fn unparseable(reason: impl Into<String>) -> Self {
        ImportError::Unparseable(reason.into())
    }
}
