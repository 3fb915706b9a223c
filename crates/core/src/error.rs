use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type DashboardResult<T> = Result<T, DashboardError>;

#[derive(Error, Debug)]
pub enum DashboardError {
    /// The external analytics endpoint has no base URL or token.
    #[error("External analytics endpoint not configured: {0}")]
    NotConfigured(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Snapshot load cancelled")]
    Cancelled,

    #[error("Snapshot invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DashboardError {
    /// True for the informational "not set up" condition that callers answer
    /// by falling back to generated data.
    pub fn is_not_configured(&self) -> bool {
        matches!(self, Self::NotConfigured(_))
    }
}

/// Category of a failed exchange with the external analytics endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorKind {
    Network,
    Auth,
    Status,
    Schema,
}

impl std::fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Network => "network",
            Self::Auth => "auth",
            Self::Status => "status",
            Self::Schema => "schema",
        };
        f.write_str(s)
    }
}

/// Structured external-call failure: a kind plus a human-readable detail.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[error("External fetch failed ({kind}): {detail}")]
pub struct FetchError {
    pub kind: FetchErrorKind,
    pub detail: String,
}

impl FetchError {
    pub fn new(kind: FetchErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn network(detail: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Network, detail)
    }

    pub fn auth(detail: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Auth, detail)
    }

    pub fn status(detail: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Status, detail)
    }

    pub fn schema(detail: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Schema, detail)
    }
}

/// A snapshot that breaks one of the data-model relationships.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    #[error("KPI '{label}' has {len} sparkline samples, expected {expected}")]
    SparklineLength {
        label: String,
        len: usize,
        expected: usize,
    },

    #[error("revenue series has {actual} points, expected {expected}")]
    RevenueLength { actual: usize, expected: usize },

    #[error("revenue point {date} is not the day after its predecessor")]
    RevenueGap { date: NaiveDate },

    #[error("revenue point {date} has a negative component")]
    NegativeRevenue { date: NaiveDate },

    #[error("revenue point {date} total does not equal the sum of its components")]
    RevenueTotal { date: NaiveDate },

    #[error("reporting window {start}..={end} does not match the revenue series")]
    WindowMismatch { start: NaiveDate, end: NaiveDate },

    #[error("funnel has no steps")]
    EmptyFunnel,

    #[error("funnel step '{step}' has more visitors than the step before it")]
    FunnelNotMonotonic { step: String },

    #[error("funnel step '{step}' carries rates that differ from its visitor counts")]
    FunnelRates { step: String },

    #[error("row '{row}' conversion rate does not match conversions / sessions")]
    ConversionRate { row: String },

    #[error("email campaign '{campaign}' has a rate outside 0..=100")]
    EmailRate { campaign: String },

    #[error("email campaign '{campaign}' has negative revenue")]
    EmailRevenue { campaign: String },

    #[error("campaign '{campaign}' has non-positive spend")]
    NonPositiveSpend { campaign: String },

    #[error("campaign '{campaign}' ROI does not match spend and revenue")]
    Roi { campaign: String },

    #[error("campaign '{campaign}' ends before it starts")]
    CampaignDates { campaign: String },
}
