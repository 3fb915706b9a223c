//! Campaign ROI: spend/revenue totals, spend-weighted ROI and severity bands.

use crate::format;
use dashboard_core::rates;
use dashboard_core::types::{Campaign, CampaignStatus};
use serde::{Deserialize, Serialize};

/// Four-tier ROI severity with inclusive lower bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoiBand {
    Low,
    Medium,
    High,
    Highest,
}

impl RoiBand {
    pub fn for_roi(roi: i64) -> Self {
        if roi >= 300 {
            Self::Highest
        } else if roi >= 200 {
            Self::High
        } else if roi >= 100 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn text_class(self) -> &'static str {
        match self {
            Self::Highest => "text-emerald-600",
            Self::High => "text-emerald-500",
            Self::Medium => "text-amber-600",
            Self::Low => "text-red-600",
        }
    }

    pub fn bar_color(self) -> &'static str {
        match self {
            Self::Highest => "#10b981",
            Self::High => "#34d399",
            Self::Medium => "#f59e0b",
            Self::Low => "#ef4444",
        }
    }
}

/// Fraction of the bar to fill for `roi` relative to the best row.
pub fn bar_fill(roi: i64, max_roi: i64) -> f64 {
    if max_roi <= 0 {
        return 0.0;
    }
    (roi as f64 / max_roi as f64).clamp(0.0, 1.0)
}

pub fn status_label(status: CampaignStatus) -> &'static str {
    match status {
        CampaignStatus::Active => "Active",
        CampaignStatus::Paused => "Paused",
        CampaignStatus::Completed => "Done",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignRoiRow {
    pub id: String,
    pub name: String,
    pub channel: String,
    pub status: &'static str,
    pub roi: i64,
    pub band: RoiBand,
    pub bar_fill: f64,
    /// `$3,200 → $14,800`
    pub spend_to_revenue: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignRoiSummary {
    pub total_spend: f64,
    pub total_revenue: f64,
    /// Spend-weighted: `round((Σrevenue - Σspend) / Σspend * 100)`.
    pub average_roi: i64,
    pub max_roi: i64,
    pub rows: Vec<CampaignRoiRow>,
}

impl CampaignRoiSummary {
    pub fn from_campaigns(campaigns: &[Campaign]) -> Self {
        let total_spend: f64 = campaigns.iter().map(|c| c.spend).sum();
        let total_revenue: f64 = campaigns.iter().map(|c| c.revenue).sum();
        let max_roi = campaigns.iter().map(|c| c.roi).max().unwrap_or(0);

        let rows = campaigns
            .iter()
            .map(|c| CampaignRoiRow {
                id: c.id.clone(),
                name: c.name.clone(),
                channel: c.channel.to_string(),
                status: status_label(c.status),
                roi: c.roi,
                band: RoiBand::for_roi(c.roi),
                bar_fill: bar_fill(c.roi, max_roi),
                spend_to_revenue: format!(
                    "{} → {}",
                    format::format_currency(c.spend),
                    format::format_currency(c.revenue)
                ),
            })
            .collect();

        Self {
            total_spend,
            total_revenue,
            average_roi: rates::roi_percent(total_spend, total_revenue),
            max_roi,
            rows,
        }
    }
}
