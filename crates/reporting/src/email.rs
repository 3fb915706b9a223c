//! Email campaign performance. Only sent campaigns contribute to averages and
//! sums; scheduled and drafted ones are left out of the denominator entirely.

use crate::format;
use dashboard_core::types::{EmailCampaign, EmailStatus};
use serde::Serialize;

/// How a sent campaign's open rate compares with typical engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenRateBand {
    Strong,
    Typical,
    Weak,
}

impl OpenRateBand {
    pub fn for_rate(open_rate: f64) -> Self {
        if open_rate >= 40.0 {
            Self::Strong
        } else if open_rate >= 25.0 {
            Self::Typical
        } else {
            Self::Weak
        }
    }

    pub fn text_class(self) -> &'static str {
        match self {
            Self::Strong => "text-emerald-600 font-medium",
            Self::Typical => "text-foreground",
            Self::Weak => "text-amber-600",
        }
    }
}

pub fn status_label(status: EmailStatus) -> &'static str {
    match status {
        EmailStatus::Sent => "Sent",
        EmailStatus::Scheduled => "Scheduled",
        EmailStatus::Draft => "Draft",
    }
}

/// Formatted engagement figures, present only for sent campaigns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailEngagement {
    pub open_rate: String,
    pub open_rate_band: OpenRateBand,
    pub click_rate: String,
    pub conversions: String,
    pub revenue: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailRow {
    pub id: String,
    pub name: String,
    pub status: &'static str,
    /// `Feb 15`
    pub date: String,
    pub recipients: String,
    /// `None` renders as a placeholder dash.
    pub engagement: Option<EmailEngagement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailSummary {
    pub sent_count: usize,
    /// Mean open rate over sent campaigns; zero when none are sent.
    pub average_open_rate: f64,
    pub total_revenue: f64,
    pub rows: Vec<EmailRow>,
}

pub fn average_open_rate(campaigns: &[EmailCampaign]) -> f64 {
    let sent: Vec<f64> = campaigns
        .iter()
        .filter(|c| c.is_sent())
        .map(|c| c.open_rate)
        .collect();
    if sent.is_empty() {
        0.0
    } else {
        sent.iter().sum::<f64>() / sent.len() as f64
    }
}

pub fn sent_revenue(campaigns: &[EmailCampaign]) -> f64 {
    campaigns.iter().filter(|c| c.is_sent()).map(|c| c.revenue).sum()
}

impl EmailSummary {
    pub fn from_campaigns(campaigns: &[EmailCampaign]) -> Self {
        let rows = campaigns
            .iter()
            .map(|c| EmailRow {
                id: c.id.clone(),
                name: c.name.clone(),
                status: status_label(c.status),
                date: c.sent_date.format("%b %-d").to_string(),
                recipients: format::format_number(c.recipients),
                engagement: c.is_sent().then(|| EmailEngagement {
                    open_rate: format::format_percentage(c.open_rate),
                    open_rate_band: OpenRateBand::for_rate(c.open_rate),
                    click_rate: format::format_percentage(c.click_rate),
                    conversions: format::format_number(c.conversions),
                    revenue: format::format_currency(c.revenue),
                }),
            })
            .collect();

        Self {
            sent_count: campaigns.iter().filter(|c| c.is_sent()).count(),
            average_open_rate: average_open_rate(campaigns),
            total_revenue: sent_revenue(campaigns),
            rows,
        }
    }
}
