pub mod config;
pub mod error;
pub mod rates;
pub mod types;
pub mod validate;

pub use config::{AppConfig, EclipseConfig, LoaderConfig};
pub use error::{DashboardError, DashboardResult, FetchError, FetchErrorKind, InvariantViolation};
pub use types::DashboardSnapshot;
