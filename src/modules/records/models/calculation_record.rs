use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// What kind of computation a record snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationKind {
    /// A single forward or inverse solve under one duty regime
    SingleQuote,
    /// A DDU/DDP comparison
    RegimeComparison,
}

impl std::fmt::Display for CalculationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalculationKind::SingleQuote => write!(f, "single_quote"),
            CalculationKind::RegimeComparison => write!(f, "regime_comparison"),
        }
    }
}

impl std::str::FromStr for CalculationKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "single_quote" => Ok(CalculationKind::SingleQuote),
            "regime_comparison" => Ok(CalculationKind::RegimeComparison),
            _ => Err(format!("Invalid calculation kind: {}", s)),
        }
    }
}

impl TryFrom<String> for CalculationKind {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

/// One completed computation, frozen for later reporting.
///
/// Records are append-only: created once per completed computation, never
/// updated, read-only thereafter.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CalculationRecord {
    /// Unique record ID (UUID)
    #[serde(skip_deserializing)]
    pub id: Option<String>,

    #[sqlx(try_from = "String")]
    pub kind: CalculationKind,

    /// Snapshot of the inputs as submitted
    pub request: serde_json::Value,

    /// The PriceQuote or DualRegimeResult produced
    pub result: serde_json::Value,

    /// When the computation completed
    #[serde(skip_deserializing)]
    pub created_at: Option<DateTime<Utc>>,
}

impl CalculationRecord {
    pub fn new(
        kind: CalculationKind,
        request: serde_json::Value,
        result: serde_json::Value,
    ) -> Self {
        Self {
            id: Some(Uuid::new_v4().to_string()),
            kind,
            request,
            result,
            created_at: Some(Utc::now()),
        }
    }
}
