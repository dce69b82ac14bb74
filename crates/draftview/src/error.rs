//! Error types for view generation.

use draftview_ir::ElementId;
use thiserror::Error;

/// Errors reported by a host document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    /// Referenced object does not exist.
    #[error("{kind} {id} not found")]
    NotFound {
        /// Kind of object ("view", "sheet", ...).
        kind: &'static str,
        /// Its identifier.
        id: u64,
    },

    /// A view name or sheet number is already taken.
    #[error("name already in use: {0}")]
    DuplicateName(String),

    /// Named resource (view type, template) is not available.
    #[error("unknown {kind}: {name}")]
    UnknownResource {
        /// Kind of resource.
        kind: &'static str,
        /// Requested name.
        name: String,
    },

    /// A mutation was attempted outside a transaction.
    #[error("no transaction is active")]
    NoTransaction,

    /// A transaction was started while another one was active.
    #[error("a transaction is already active")]
    TransactionActive,

    /// The host refused to commit.
    #[error("commit failed: {0}")]
    CommitFailed(String),
}

/// Per-element failures. The element is skipped; the batch continues.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DraftError {
    /// The element has no usable bounding box.
    #[error("element {0} has no usable geometry")]
    MissingGeometry(ElementId),

    /// The element is not in the document.
    #[error("element {0} not found")]
    UnknownElement(ElementId),

    /// A section or elevation already exists at the element's location.
    #[error("element {element}: a view already exists {distance:.3} away")]
    ExistingViewNearby {
        /// Element that was skipped.
        element: ElementId,
        /// Distance to the existing view's crop center.
        distance: f64,
    },

    /// Host call failed.
    #[error(transparent)]
    Host(#[from] HostError),
}

/// Invalid batch options.
#[derive(Error, Debug)]
pub enum OptionsError {
    /// Tolerance must be positive and finite.
    #[error("tolerance must be a positive number of meters, got {0}")]
    InvalidTolerance(f64),

    /// Offset must be non-negative and finite.
    #[error("offset must be a non-negative number of millimeters, got {0}")]
    InvalidOffset(f64),

    /// Search half length must be positive and finite.
    #[error("search half length must be a positive number of meters, got {0}")]
    InvalidSearchLength(f64),

    /// Unit scale must be positive and finite.
    #[error("units per meter must be positive, got {0}")]
    InvalidUnits(f64),

    /// Options file could not be parsed.
    #[error("invalid options file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures that abort a whole batch.
#[derive(Error, Debug)]
pub enum BatchError {
    /// Options were rejected before any element was processed.
    #[error(transparent)]
    InvalidOptions(#[from] OptionsError),

    /// The document offers no section view type to create views from.
    #[error("no section view type available")]
    NoSectionViewType,

    /// The batch transaction could not be started or committed; nothing was
    /// saved.
    #[error("transaction failed: {0}")]
    TransactionFailure(String),
}

/// Result type for per-element operations.
pub type Result<T> = std::result::Result<T, DraftError>;
