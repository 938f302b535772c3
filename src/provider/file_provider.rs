use crate::{
    domain::{BoardConfig, BoardSeed, RecordSet},
    error::{DealflowError, Result},
    provider::DataProvider,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Reads dashboard data from a directory of JSON and TOML files
///
/// Layout under the project root:
///
/// ```text
/// .dealflow/
///   config.toml    board name and columns (optional)
///   board.json     deals per stage
///   records.json   list screen rows (optional)
/// ```
///
/// The provider only reads; nothing is written back.
pub struct FileProvider {
    root_path: PathBuf,
}

impl FileProvider {
    const DATA_DIR: &'static str = ".dealflow";
    const CONFIG_FILE: &'static str = "config.toml";
    const BOARD_FILE: &'static str = "board.json";
    const RECORDS_FILE: &'static str = "records.json";

    /// Creates a provider for the given project root
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::DATA_DIR),
        }
    }

    /// Creates a provider reading directly from `data_dir`
    pub fn from_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_path: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.root_path
    }

    fn config_file(&self) -> PathBuf {
        self.root_path.join(Self::CONFIG_FILE)
    }

    fn board_file(&self) -> PathBuf {
        self.root_path.join(Self::BOARD_FILE)
    }

    fn records_file(&self) -> PathBuf {
        self.root_path.join(Self::RECORDS_FILE)
    }

    /// Whether a board seed is present
    pub async fn is_initialized(&self) -> bool {
        fs::try_exists(self.board_file()).await.unwrap_or(false)
    }

    async fn read_optional(path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl DataProvider for FileProvider {
    async fn load_board_config(&self) -> Result<BoardConfig> {
        let path = self.config_file();
        match Self::read_optional(&path).await? {
            Some(contents) => {
                tracing::debug!(path = %path.display(), "Loading board config");
                BoardConfig::from_toml(&contents)
            }
            None => {
                tracing::debug!(path = %path.display(), "No board config, using defaults");
                Ok(BoardConfig::default())
            }
        }
    }

    async fn load_board_seed(&self) -> Result<BoardSeed> {
        let path = self.board_file();
        let contents = Self::read_optional(&path)
            .await?
            .ok_or(DealflowError::BoardNotInitialized)?;

        let seed: BoardSeed = serde_json::from_str(&contents)?;
        tracing::debug!(path = %path.display(), stages = seed.stages.len(), "Loaded board seed");
        Ok(seed)
    }

    async fn load_records(&self) -> Result<RecordSet> {
        let path = self.records_file();
        match Self::read_optional(&path).await? {
            Some(contents) => Ok(serde_json::from_str(&contents)?),
            None => Ok(RecordSet::default()),
        }
    }
}
