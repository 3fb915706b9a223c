//! Dashboard reporting: synthetic dataset generation and the derived metrics
//! every panel renders: ROI bands, funnel drop-off, sorted traffic tables,
//! email performance and display formatting.

pub mod campaign_roi;
pub mod dashboard;
pub mod email;
pub mod format;
pub mod funnel;
pub mod generator;
pub mod kpi;
pub mod revenue;
pub mod traffic;

pub use campaign_roi::{CampaignRoiSummary, RoiBand};
pub use dashboard::{CampaignDashboard, DashboardOverview};
pub use email::EmailSummary;
pub use funnel::FunnelAnalyzer;
pub use generator::DatasetGenerator;
pub use traffic::{SortDirection, SortField, SortState};
