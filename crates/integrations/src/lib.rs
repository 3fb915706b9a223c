//! Data-source integrations: the Eclipse analytics endpoint client, snapshot
//! sources with generated fallback, and the session loader.

pub mod eclipse;
pub mod session;
pub mod source;

pub use eclipse::{EclipseClient, EclipseRequest, EclipseResponse};
pub use session::{load_snapshot, DashboardSession, LoadState};
pub use source::{select_source, DataOrigin, EclipseSource, GeneratedSource, SnapshotSource};
