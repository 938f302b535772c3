use crate::domain::deal::{Deal, DealId};
use crate::domain::money::Money;
use crate::error::{DealflowError, Result};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt, str::FromStr};

/// Identifier of a pipeline stage (e.g., lead, closed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StageId(String);

impl StageId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for StageId {
    type Err = DealflowError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        if normalized.is_empty() || normalized.chars().any(char::is_whitespace) {
            return Err(DealflowError::InvalidStageId(s.to_string()));
        }
        Ok(Self(normalized))
    }
}

impl TryFrom<String> for StageId {
    type Error = DealflowError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StageId> for String {
    fn from(id: StageId) -> Self {
        id.0
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Configuration for a pipeline column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: StageId,
    pub title: String,
}

impl Column {
    pub fn new(id: StageId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// Board configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub name: String,
    pub columns: Vec<Column>,
}

impl BoardConfig {
    /// Parses a board configuration from TOML
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations that define the same stage twice
    ///
    /// Stage ids are normalised on parse, so `Lead` and `lead` collide.
    pub fn validate(&self) -> Result<()> {
        ensure_unique_stages(self.columns.iter())
    }
}

fn ensure_unique_stages<'a>(columns: impl Iterator<Item = &'a Column>) -> Result<()> {
    let mut seen = HashSet::new();
    for column in columns {
        if !seen.insert(&column.id) {
            return Err(DealflowError::DuplicateStage(column.id.to_string()));
        }
    }
    Ok(())
}

impl Default for BoardConfig {
    fn default() -> Self {
        let column = |id: &str, title: &str| Column::new(StageId(id.to_string()), title);
        Self {
            name: "Deals Pipeline".to_string(),
            columns: vec![
                column("lead", "Leads"),
                column("qualified", "Qualified"),
                column("proposal", "Proposal"),
                column("negotiation", "Negotiation"),
                column("closed", "Closed"),
            ],
        }
    }
}

/// Deals of one stage as delivered by a data provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSeed {
    pub stage: StageId,
    #[serde(default)]
    pub deals: Vec<Deal>,
}

/// Initial board content
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSeed {
    #[serde(default)]
    pub stages: Vec<StageSeed>,
}

/// A position on the board
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub stage: StageId,
    pub index: usize,
}

impl Location {
    pub fn new(stage: StageId, index: usize) -> Self {
        Self { stage, index }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.stage, self.index)
    }
}

/// Why a move left the board untouched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoopReason {
    /// Dropped outside any stage
    Cancelled,
    /// Dropped where it was picked up
    SamePosition,
    UnknownStage(StageId),
    IndexOutOfRange,
    /// The dragged deal is no longer where the gesture started
    StaleSource,
}

/// Result of applying a move to the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Deal changed position within its stage
    Reordered {
        deal: DealId,
        stage: StageId,
        from: usize,
        to: usize,
    },
    /// Deal changed stage
    Moved {
        deal: DealId,
        from: Location,
        to: Location,
    },
    Unchanged(NoopReason),
}

impl MoveOutcome {
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged(_))
    }
}

/// One column of the board with its ordered deals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lane {
    pub column: Column,
    pub deals: Vec<Deal>,
}

impl Lane {
    pub fn id(&self) -> &StageId {
        &self.column.id
    }

    pub fn title(&self) -> &str {
        &self.column.title
    }

    pub fn len(&self) -> usize {
        self.deals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deals.is_empty()
    }
}

/// Per-stage totals shown in the column header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSummary {
    pub stage: StageId,
    pub title: String,
    pub deal_count: usize,
    pub total_value: Money,
}

/// Kanban pipeline state
///
/// Every deal id appears in exactly one lane at exactly one position.
/// Deserialized boards are checked against that rule before use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardSnapshot")]
pub struct Board {
    pub name: String,
    lanes: Vec<Lane>,
}

/// Unchecked serialized form of a [`Board`]
#[derive(Deserialize)]
struct BoardSnapshot {
    name: String,
    lanes: Vec<Lane>,
}

impl TryFrom<BoardSnapshot> for Board {
    type Error = DealflowError;

    fn try_from(snapshot: BoardSnapshot) -> Result<Self> {
        ensure_unique_stages(snapshot.lanes.iter().map(|lane| &lane.column))?;

        let board = Self {
            name: snapshot.name,
            lanes: snapshot.lanes,
        };
        board.check_invariant()?;
        Ok(board)
    }
}

impl Board {
    /// Creates an empty board with one lane per configured column
    pub fn new(config: BoardConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::empty(config))
    }

    fn empty(config: BoardConfig) -> Self {
        Self {
            name: config.name,
            lanes: config
                .columns
                .into_iter()
                .map(|column| Lane {
                    column,
                    deals: Vec::new(),
                })
                .collect(),
        }
    }

    /// Builds a board from configuration and seed data
    pub fn from_seed(config: BoardConfig, seed: BoardSeed) -> Result<Self> {
        let mut board = Self::new(config)?;

        for stage_seed in seed.stages {
            for deal in stage_seed.deals {
                board.add_deal(&stage_seed.stage, deal)?;
            }
        }

        tracing::debug!(
            board = %board.name,
            stages = board.lanes.len(),
            deals = board.deal_count(),
            "Board initialized from seed"
        );
        Ok(board)
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn lane(&self, stage: &StageId) -> Option<&Lane> {
        self.lanes.iter().find(|lane| lane.id() == stage)
    }

    fn lane_position(&self, stage: &StageId) -> Option<usize> {
        self.lanes.iter().position(|lane| lane.id() == stage)
    }

    /// Total number of deals across all stages
    pub fn deal_count(&self) -> usize {
        self.lanes.iter().map(Lane::len).sum()
    }

    pub fn deal_at(&self, location: &Location) -> Option<&Deal> {
        self.lane(&location.stage)
            .and_then(|lane| lane.deals.get(location.index))
    }

    /// Finds where a deal currently sits
    pub fn locate(&self, id: &DealId) -> Option<Location> {
        self.lanes.iter().find_map(|lane| {
            lane.deals
                .iter()
                .position(|deal| &deal.id == id)
                .map(|index| Location::new(lane.id().clone(), index))
        })
    }

    /// Appends a new deal to the end of a stage
    pub fn add_deal(&mut self, stage: &StageId, deal: Deal) -> Result<Location> {
        if self.locate(&deal.id).is_some() {
            return Err(DealflowError::DuplicateDeal(deal.id.to_string()));
        }

        let lane = self
            .lanes
            .iter_mut()
            .find(|lane| lane.id() == stage)
            .ok_or_else(|| DealflowError::StageNotFound(stage.to_string()))?;

        lane.deals.push(deal);
        Ok(Location::new(stage.clone(), lane.deals.len() - 1))
    }

    /// Verifies that no deal id appears twice
    pub fn check_invariant(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for deal in self.lanes.iter().flat_map(|lane| lane.deals.iter()) {
            if !seen.insert(&deal.id) {
                return Err(DealflowError::DuplicateDeal(deal.id.to_string()));
            }
        }
        Ok(())
    }

    /// Moves the deal at `source` to `destination`
    ///
    /// A missing destination, a drop onto the source, an unknown stage and
    /// an out-of-range index all leave the board as it was.
    pub fn apply_move(
        &mut self,
        source: &Location,
        destination: Option<&Location>,
    ) -> MoveOutcome {
        let outcome = self.apply_move_inner(source, destination);

        match &outcome {
            MoveOutcome::Unchanged(NoopReason::UnknownStage(stage)) => {
                tracing::warn!(%source, %stage, "Ignoring move involving unknown stage");
            }
            MoveOutcome::Unchanged(NoopReason::IndexOutOfRange) => {
                tracing::warn!(
                    %source,
                    destination = ?destination.map(ToString::to_string),
                    "Ignoring move with out-of-range index"
                );
            }
            MoveOutcome::Unchanged(reason) => {
                tracing::trace!(%source, ?reason, "Move left board unchanged");
            }
            change => {
                tracing::debug!(?change, "Deal moved");
            }
        }

        outcome
    }

    fn apply_move_inner(
        &mut self,
        source: &Location,
        destination: Option<&Location>,
    ) -> MoveOutcome {
        let Some(destination) = destination else {
            return MoveOutcome::Unchanged(NoopReason::Cancelled);
        };
        if source == destination {
            return MoveOutcome::Unchanged(NoopReason::SamePosition);
        }

        let Some(from_lane) = self.lane_position(&source.stage) else {
            return MoveOutcome::Unchanged(NoopReason::UnknownStage(source.stage.clone()));
        };
        let Some(to_lane) = self.lane_position(&destination.stage) else {
            return MoveOutcome::Unchanged(NoopReason::UnknownStage(destination.stage.clone()));
        };

        if source.index >= self.lanes[from_lane].len() {
            return MoveOutcome::Unchanged(NoopReason::IndexOutOfRange);
        }
        // Insertion happens after removal, so within one lane the last
        // valid slot is len - 1.
        let insert_limit = if from_lane == to_lane {
            self.lanes[to_lane].len() - 1
        } else {
            self.lanes[to_lane].len()
        };
        if destination.index > insert_limit {
            return MoveOutcome::Unchanged(NoopReason::IndexOutOfRange);
        }

        let deal = self.lanes[from_lane].deals.remove(source.index);
        let deal_id = deal.id.clone();
        self.lanes[to_lane].deals.insert(destination.index, deal);

        if from_lane == to_lane {
            MoveOutcome::Reordered {
                deal: deal_id,
                stage: source.stage.clone(),
                from: source.index,
                to: destination.index,
            }
        } else {
            MoveOutcome::Moved {
                deal: deal_id,
                from: source.clone(),
                to: destination.clone(),
            }
        }
    }

    /// Per-stage deal counts and pipeline value
    ///
    /// Deals whose value does not parse are counted but contribute nothing
    /// to the total. A total that would overflow saturates.
    pub fn summaries(&self) -> Vec<StageSummary> {
        self.lanes
            .iter()
            .map(|lane| {
                let total_value = lane
                    .deals
                    .iter()
                    .filter_map(|deal| match deal.amount() {
                        Ok(amount) => Some(amount),
                        Err(err) => {
                            tracing::warn!(
                                deal = %deal.id,
                                %err,
                                "Skipping unparseable deal value"
                            );
                            None
                        }
                    })
                    .fold(Money::ZERO, |total, amount| {
                        total.checked_add(amount).unwrap_or_else(|| {
                            tracing::warn!(stage = %lane.id(), "Stage total overflowed");
                            total + amount
                        })
                    });

                StageSummary {
                    stage: lane.id().clone(),
                    title: lane.title().to_string(),
                    deal_count: lane.len(),
                    total_value,
                }
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty(BoardConfig::default())
    }
}

/// Computes the board that results from a drag-and-drop gesture
///
/// The input board is never modified. See [`Board::apply_move`] for the
/// no-op rules.
pub fn reorder(board: &Board, source: &Location, destination: Option<&Location>) -> Board {
    let mut next = board.clone();
    next.apply_move(source, destination);
    next
}
