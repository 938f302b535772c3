pub mod board;
pub mod deal;
pub mod documents;
pub mod filter;
pub mod money;
pub mod records;

pub use board::{
    reorder, Board, BoardConfig, BoardSeed, Column, Lane, Location, MoveOutcome, NoopReason,
    StageId, StageSeed, StageSummary,
};
pub use deal::{Deal, DealId};
pub use documents::{validate_upload, UploadPolicy};
pub use filter::{
    filter_projects, filter_records, paginate, Page, Searchable, StatusFilter, ViewState,
};
pub use money::Money;
pub use records::RecordSet;
