//! Drag-and-drop adapter for the deal pipeline
//!
//! The UI reports gestures as [`DropResult`]s; [`DragController`] turns them
//! into board moves and tracks the short-lived drag state in between.

use serde::{Deserialize, Serialize};

use crate::{
    domain::{Board, DealId, Location, MoveOutcome, NoopReason},
    error::Result,
    provider::DataProvider,
};

/// End of a drag gesture as reported by the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropResult {
    pub draggable_id: DealId,
    pub source: Location,
    /// `None` when dropped outside every stage
    pub destination: Option<Location>,
}

/// Transient interaction state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { source: Location, deal: DealId },
}

/// Owns the board for one pipeline view and applies gestures to it
#[derive(Debug, Clone)]
pub struct DragController {
    board: Board,
    state: DragState,
}

impl DragController {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            state: DragState::Idle,
        }
    }

    /// Builds a controller over the board supplied by `provider`
    pub async fn load(provider: &dyn DataProvider) -> Result<Self> {
        Ok(Self::new(provider.load_board().await?))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Consumes the controller, returning the board
    pub fn into_board(self) -> Board {
        self.board
    }

    /// Starts a gesture on the deal at `source`
    ///
    /// Returns the dragged deal id, or `None` if nothing sits there.
    pub fn drag_start(&mut self, source: Location) -> Option<DealId> {
        let deal = self.board.deal_at(&source)?.id.clone();
        tracing::trace!(%source, %deal, "Drag started");
        self.state = DragState::Dragging {
            source,
            deal: deal.clone(),
        };
        Some(deal)
    }

    /// Abandons the current gesture without touching the board
    pub fn drag_cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Finishes a gesture and applies it to the board
    ///
    /// If the dragged deal is no longer at the reported source (the board
    /// changed between render and drop), nothing moves.
    pub fn drag_end(&mut self, result: DropResult) -> MoveOutcome {
        self.state = DragState::Idle;

        if let Some(destination) = &result.destination {
            let at_source = self.board.deal_at(&result.source).map(|deal| &deal.id);
            if at_source != Some(&result.draggable_id) {
                tracing::warn!(
                    deal = %result.draggable_id,
                    source = %result.source,
                    %destination,
                    "Dragged deal is not at the reported source, ignoring drop"
                );
                return MoveOutcome::Unchanged(NoopReason::StaleSource);
            }
        }

        self.board
            .apply_move(&result.source, result.destination.as_ref())
    }
}
