//! Dashboard overview: every panel's view-model derived from one snapshot.
//!
//! Nothing here is cached; build a fresh overview whenever the sort state
//! changes or a new snapshot lands.

use crate::campaign_roi::CampaignRoiSummary;
use crate::email::EmailSummary;
use crate::funnel::{FunnelAnalyzer, FunnelResult};
use crate::kpi::KpiCard;
use crate::revenue::RevenueSummary;
use crate::traffic::{self, SortState};
use chrono::{DateTime, Utc};
use dashboard_core::types::{DashboardSnapshot, ReportingWindow, StateData, TrafficSource};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficTables {
    pub sort: SortState,
    pub channels: Vec<TrafficSource>,
    pub states: Vec<StateData>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardOverview {
    pub snapshot_id: Uuid,
    pub window: ReportingWindow,
    pub kpis: Vec<KpiCard>,
    pub revenue: RevenueSummary,
    pub funnel: FunnelResult,
    pub traffic: TrafficTables,
    pub email: EmailSummary,
    pub campaigns: CampaignRoiSummary,
    pub generated_at: DateTime<Utc>,
}

pub struct CampaignDashboard;

impl CampaignDashboard {
    pub fn overview(snapshot: &DashboardSnapshot, sort: SortState) -> DashboardOverview {
        DashboardOverview {
            snapshot_id: snapshot.id,
            window: snapshot.window,
            kpis: snapshot.kpis.iter().map(KpiCard::from_metric).collect(),
            revenue: RevenueSummary::from_points(&snapshot.revenue_data),
            funnel: FunnelAnalyzer::analyze(&snapshot.funnel_steps),
            traffic: TrafficTables {
                sort,
                channels: traffic::sort_rows(&snapshot.traffic_sources, sort),
                states: traffic::sort_rows(&snapshot.top_states, sort),
            },
            email: EmailSummary::from_campaigns(&snapshot.email_campaigns),
            campaigns: CampaignRoiSummary::from_campaigns(&snapshot.campaigns),
            generated_at: snapshot.generated_at,
        }
    }
}
