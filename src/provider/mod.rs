use crate::{
    domain::{Board, BoardConfig, BoardSeed, RecordSet},
    error::Result,
};
use async_trait::async_trait;

#[cfg(feature = "file-provider")]
pub mod file_provider;
pub mod static_provider;

/// Source of the data the dashboard renders
///
/// Screens never own their sample content; they ask a provider for it so
/// the board and list logic can run against any data set.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Loads the column layout of the deal pipeline
    async fn load_board_config(&self) -> Result<BoardConfig>;

    /// Loads the deals the pipeline starts with
    async fn load_board_seed(&self) -> Result<BoardSeed>;

    /// Loads the rows of every list screen
    async fn load_records(&self) -> Result<RecordSet>;

    /// Builds the pipeline board from configuration and seed
    async fn load_board(&self) -> Result<Board> {
        let config = self.load_board_config().await?;
        let seed = self.load_board_seed().await?;
        Board::from_seed(config, seed)
    }
}
