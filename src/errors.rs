use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Field-keyed validation messages produced by the form validator.
///
/// Keys are form field identifiers (`categoryId`, `name`, `images`) or
/// row-scoped identifiers (`size-0`, `price-2`, ...). An empty map means the
/// draft is submit-eligible.
pub type FieldErrors = BTreeMap<String, String>;

/// Errors raised while attaching an image file to a draft.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FileError {
    #[error("Image exceeds the {max_mb} MB size limit")]
    TooLarge { max_mb: u64 },

    #[error("'{0}' is not an image file")]
    NotAnImage(String),
}

/// Unified error type for the admin core.
///
/// `Validation` and `File` never leave the editing components.
/// `Application`, `Connectivity` and `Construction` terminate a submission
/// attempt and surface a single human-readable message; the draft stays
/// intact so the operator can retry. `Load` blocks the list view until a
/// manual refresh.
#[derive(Debug, Clone, Error)]
pub enum AdminError {
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(FieldErrors),

    #[error(transparent)]
    File(#[from] FileError),

    /// The server answered but reported an unsuccessful outcome. The message
    /// is server-supplied and surfaced verbatim.
    #[error("{0}")]
    Application(String),

    /// The request went out but no response came back. The original cause is
    /// logged where the failure is classified, not carried here.
    #[error("Could not reach the server. Check your connection and try again.")]
    Connectivity,

    /// The request could not be built or dispatched at all.
    #[error("Request could not be sent: {0}")]
    Construction(String),

    #[error("Failed to load data: {0}")]
    Load(String),
}

impl AdminError {
    /// Message suitable for direct display to the operator.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// True when retrying the same action without edits can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AdminError::Application(_)
                | AdminError::Connectivity
                | AdminError::Construction(_)
                | AdminError::Load(_)
        )
    }
}
