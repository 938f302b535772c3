use crate::{
    domain::{BoardConfig, BoardSeed, RecordSet},
    error::Result,
    provider::DataProvider,
};
use async_trait::async_trait;

const SAMPLE_BOARD: &str = include_str!("../../data/sample_board.json");
const SAMPLE_RECORDS: &str = include_str!("../../data/sample_records.json");

/// In-memory provider handing out fixed data
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    config: BoardConfig,
    seed: BoardSeed,
    records: RecordSet,
}

impl StaticProvider {
    pub fn new(config: BoardConfig, seed: BoardSeed, records: RecordSet) -> Self {
        Self {
            config,
            seed,
            records,
        }
    }

    /// Provider with the default columns, the given deals and no list rows
    pub fn with_seed(seed: BoardSeed) -> Self {
        Self::new(BoardConfig::default(), seed, RecordSet::default())
    }

    /// Provider loaded with the bundled demo data set
    pub fn sample() -> Result<Self> {
        Ok(Self::new(
            BoardConfig::default(),
            serde_json::from_str(SAMPLE_BOARD)?,
            serde_json::from_str(SAMPLE_RECORDS)?,
        ))
    }
}

#[async_trait]
impl DataProvider for StaticProvider {
    async fn load_board_config(&self) -> Result<BoardConfig> {
        Ok(self.config.clone())
    }

    async fn load_board_seed(&self) -> Result<BoardSeed> {
        Ok(self.seed.clone())
    }

    async fn load_records(&self) -> Result<RecordSet> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        filter::{filter_records, ViewState},
        Money, StageId,
    };

    #[tokio::test]
    async fn test_sample_board_loads() {
        let provider = StaticProvider::sample().unwrap();
        let board = provider.load_board().await.unwrap();

        assert_eq!(board.deal_count(), 6);
        assert!(board.check_invariant().is_ok());

        let lead: StageId = "lead".parse().unwrap();
        let ids: Vec<&str> = board
            .lane(&lead)
            .unwrap()
            .deals
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(ids, vec!["deal-1", "deal-2"]);

        let summaries = board.summaries();
        assert_eq!(summaries[0].total_value, Money::from_cents(3_650_000));
    }

    #[tokio::test]
    async fn test_sample_records_load() {
        let provider = StaticProvider::sample().unwrap();
        let records = provider.load_records().await.unwrap();

        assert_eq!(records.leads.len(), 5);
        assert_eq!(records.invoices.len(), 5);
        assert_eq!(records.bdm_payments.len(), 4);
        assert_eq!(records.roles.len(), 5);

        let overdue = filter_records(
            &records.invoices,
            &ViewState::new().with_status("overdue".parse().unwrap()),
        );
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].client, "Wayne Enterprises");
    }

    #[tokio::test]
    async fn test_injected_seed() {
        let provider = StaticProvider::with_seed(BoardSeed::default());
        let board = provider.load_board().await.unwrap();

        assert_eq!(board.deal_count(), 0);
        assert_eq!(board.lanes().len(), 5);
        assert!(provider.load_records().await.unwrap().leads.is_empty());
    }
}
