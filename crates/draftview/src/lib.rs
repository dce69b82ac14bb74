#![warn(missing_docs)]

//! Batch generation of section and elevation views.
//!
//! Drives the geometric core in [`draftview_drafting`] against a host
//! document: selects elements, classifies them, skips locations that already
//! have a view, frames each element with its surroundings and creates the
//! view, optionally on a new sheet. All mutations of one batch share a single
//! transaction.
//!
//! # Example
//!
//! ```
//! use std::sync::atomic::AtomicBool;
//! use draftview::{run_batch, select, BatchOptions, CategoryFilter, MemoryDocument};
//! use draftview_ir::SceneDocument;
//!
//! let mut doc = MemoryDocument::new(SceneDocument::new());
//! let elements = select(&doc, &CategoryFilter::from_groups(&["Walls"]), None);
//! let result = run_batch(&mut doc, &elements, &BatchOptions::default(), &AtomicBool::new(false));
//! // An empty scene offers no section view type to create views from.
//! assert!(result.is_err());
//! ```

pub mod batch;
pub mod error;
pub mod host;
pub mod memory;
pub mod naming;
pub mod options;
pub mod report;
pub mod selection;

pub use batch::{gather_geometry, inspect, run_batch, view_direction, Inspection};
pub use error::{BatchError, DraftError, HostError, OptionsError, Result};
pub use host::{
    Document, ElementInfo, GeometryQuery, TransactionScope, ViewFactory, ViewRegistry,
};
pub use memory::MemoryDocument;
pub use options::{BatchOptions, NamingScheme, FEET_PER_METER};
pub use report::{BatchReport, ReportRow, SkippedElement};
pub use selection::{select, CategoryFilter, CATEGORY_GROUPS, LOADABLE_FAMILIES};
