//! # Dealflow Core
//!
//! Domain logic for the dealflow business-operations dashboard.
//!
//! The centre of the crate is the deal pipeline: a kanban [`Board`] of
//! stages whose deals are reordered by drag-and-drop gestures through
//! [`reorder`] and [`DragController`]. Around it sit the list screens
//! (leads, clients, invoices, payments, candidates, documents), which are
//! filtered by [`filter_records`] against an explicit [`ViewState`], and
//! document uploads, which are checked by [`validate_upload`]. All data
//! comes from an injected [`DataProvider`].

pub mod controller;
pub mod domain;
pub mod error;
pub mod provider;

// Re-export commonly used types
pub use controller::{DragController, DragState, DropResult};
pub use domain::{
    board::{reorder, Board, BoardConfig, BoardSeed, Location, MoveOutcome, NoopReason, StageId},
    deal::{Deal, DealId},
    documents::{validate_upload, UploadPolicy},
    filter::{filter_records, paginate, StatusFilter, ViewState},
    money::Money,
    records::RecordSet,
};
pub use error::{DealflowError, Result};
pub use provider::DataProvider;
