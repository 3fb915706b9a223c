use crate::rates;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Days covered by one snapshot, and the length of every KPI sparkline.
pub const WINDOW_DAYS: usize = 30;

// ─── KPIs ───────────────────────────────────────────────────────────────────

/// Headline metric card with its trailing daily history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiMetric {
    pub label: String,
    pub value: f64,
    pub formatted_value: String,
    /// Percentage change against the previous period.
    pub change: f64,
    pub sparkline_data: Vec<u64>,
    pub icon: KpiIcon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KpiIcon {
    DollarSign,
    Funnel,
    Mail,
    TrendingUp,
    #[serde(other)]
    Other,
}

/// Glyph the card renderer draws for an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Glyph {
    DollarSign,
    Filter,
    Mail,
    TrendingUp,
}

impl KpiIcon {
    pub fn glyph(self) -> Glyph {
        match self {
            Self::DollarSign => Glyph::DollarSign,
            Self::Funnel => Glyph::Filter,
            Self::Mail => Glyph::Mail,
            Self::TrendingUp | Self::Other => Glyph::TrendingUp,
        }
    }
}

// ─── Revenue ────────────────────────────────────────────────────────────────

/// One day of revenue split by product line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueDataPoint {
    pub date: NaiveDate,
    pub esa_letter: f64,
    pub psd_letter: f64,
    pub dog_training: f64,
    pub total: f64,
}

impl RevenueDataPoint {
    pub fn new(date: NaiveDate, esa_letter: f64, psd_letter: f64, dog_training: f64) -> Self {
        Self {
            date,
            esa_letter,
            psd_letter,
            dog_training,
            total: esa_letter + psd_letter + dog_training,
        }
    }

    pub fn components(&self) -> [f64; 3] {
        [self.esa_letter, self.psd_letter, self.dog_training]
    }
}

// ─── Funnel ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelStep {
    pub name: String,
    pub visitors: u64,
    /// Share of the previous step's visitors lost at this step.
    pub dropoff_rate: f64,
    /// Share of the first step's visitors that reached this step.
    pub conversion_rate: f64,
}

impl FunnelStep {
    /// Build an ordered funnel from authored `(name, visitors)` stages. Both
    /// rates are derived here and nowhere else.
    pub fn build_funnel<S: Into<String>>(stages: impl IntoIterator<Item = (S, u64)>) -> Vec<Self> {
        let mut steps: Vec<Self> = Vec::new();
        for (name, visitors) in stages {
            let (dropoff_rate, conversion_rate) = match (steps.first(), steps.last()) {
                (Some(first), Some(prev)) => (
                    rates::dropoff_rate(prev.visitors, visitors),
                    rates::percent_of(visitors, first.visitors),
                ),
                _ => (0.0, 100.0),
            };
            steps.push(Self {
                name: name.into(),
                visitors,
                dropoff_rate,
                conversion_rate,
            });
        }
        steps
    }
}

// ─── Traffic ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    #[serde(rename = "Organic Search")]
    OrganicSearch,
    #[serde(rename = "Paid Search")]
    PaidSearch,
    Email,
    Direct,
    Social,
    Referral,
}

impl Channel {
    pub fn label(self) -> &'static str {
        match self {
            Self::OrganicSearch => "Organic Search",
            Self::PaidSearch => "Paid Search",
            Self::Email => "Email",
            Self::Direct => "Direct",
            Self::Social => "Social",
            Self::Referral => "Referral",
        }
    }

    /// Badge style for the channel pill.
    pub fn badge_class(self) -> &'static str {
        match self {
            Self::OrganicSearch => "bg-emerald-100 text-emerald-700",
            Self::PaidSearch => "bg-blue-100 text-blue-700",
            Self::Email => "bg-amber-100 text-amber-700",
            Self::Direct => "bg-slate-100 text-slate-700",
            Self::Social => "bg-purple-100 text-purple-700",
            Self::Referral => "bg-green-100 text-green-700",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Acquisition channel row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficSource {
    pub id: String,
    pub channel: Channel,
    pub sessions: u64,
    pub conversions: u64,
    pub conversion_rate: f64,
    pub revenue: f64,
    pub mom_change: f64,
}

impl TrafficSource {
    pub fn new(
        id: impl Into<String>,
        channel: Channel,
        sessions: u64,
        conversions: u64,
        revenue: f64,
        mom_change: f64,
    ) -> Self {
        Self {
            id: id.into(),
            channel,
            sessions,
            conversions,
            conversion_rate: rates::percent_of(conversions, sessions),
            revenue,
            mom_change,
        }
    }
}

/// Geographic breakdown row, keyed by region name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateData {
    pub state: String,
    pub sessions: u64,
    pub conversions: u64,
    pub conversion_rate: f64,
    pub revenue: f64,
}

impl StateData {
    pub fn new(state: impl Into<String>, sessions: u64, conversions: u64, revenue: f64) -> Self {
        Self {
            state: state.into(),
            sessions,
            conversions,
            conversion_rate: rates::percent_of(conversions, sessions),
            revenue,
        }
    }
}

// ─── Email ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailStatus {
    Sent,
    Scheduled,
    Draft,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailCampaign {
    pub id: String,
    pub name: String,
    pub sent_date: NaiveDate,
    pub recipients: u64,
    pub open_rate: f64,
    pub click_rate: f64,
    pub conversions: u64,
    pub revenue: f64,
    pub status: EmailStatus,
}

impl EmailCampaign {
    /// Only sent campaigns carry meaningful engagement figures.
    pub fn is_sent(&self) -> bool {
        self.status == EmailStatus::Sent
    }
}

// ─── Ad campaigns ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Active,
    Paused,
    Completed,
}

/// Paid campaign with spend, attributed revenue and ROI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub channel: Channel,
    pub spend: f64,
    pub revenue: f64,
    pub roi: i64,
    pub status: CampaignStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Campaign {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        channel: Channel,
        spend: f64,
        revenue: f64,
        status: CampaignStatus,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            channel,
            spend,
            revenue,
            roi: rates::roi_percent(spend, revenue),
            status,
            start_date,
            end_date,
        }
    }
}

// ─── Snapshot ───────────────────────────────────────────────────────────────

/// Inclusive calendar range a snapshot reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Every dashboard collection for one reporting window, produced as a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub window: ReportingWindow,
    pub kpis: Vec<KpiMetric>,
    pub revenue_data: Vec<RevenueDataPoint>,
    pub funnel_steps: Vec<FunnelStep>,
    pub traffic_sources: Vec<TrafficSource>,
    pub top_states: Vec<StateData>,
    pub email_campaigns: Vec<EmailCampaign>,
    pub campaigns: Vec<Campaign>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_funnel_derives_rates() {
        let steps = FunnelStep::build_funnel([
            ("Landing Page", 186_000),
            ("Screening Start", 42_000),
            ("Screening Complete", 28_500),
            ("Payment", 24_200),
            ("Letter Issued", 23_100),
        ]);
        assert_eq!(steps[0].dropoff_rate, 0.0);
        assert_eq!(steps[0].conversion_rate, 100.0);
        let dropoffs: Vec<f64> = steps.iter().skip(1).map(|s| s.dropoff_rate).collect();
        assert_eq!(dropoffs, vec![77.4, 32.1, 15.1, 4.5]);
        let conversions: Vec<f64> = steps.iter().skip(1).map(|s| s.conversion_rate).collect();
        assert_eq!(conversions, vec![22.6, 15.3, 13.0, 12.4]);
    }

    #[test]
    fn test_campaign_roi_is_derived() {
        let day = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let c = Campaign::new(
            "camp-001",
            "Branded",
            Channel::PaidSearch,
            3_200.0,
            14_800.0,
            CampaignStatus::Active,
            day,
            day,
        );
        assert_eq!(c.roi, 363);
    }

    #[test]
    fn test_revenue_total_is_sum() {
        let day = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let p = RevenueDataPoint::new(day, 900.0, 250.0, 120.0);
        assert_eq!(p.total, 1_270.0);
    }

    #[test]
    fn test_icon_serde_and_glyph() {
        let icon: KpiIcon = serde_json::from_str("\"dollar-sign\"").unwrap();
        assert_eq!(icon, KpiIcon::DollarSign);
        assert_eq!(serde_json::to_string(&KpiIcon::TrendingUp).unwrap(), "\"trending-up\"");

        let unknown: KpiIcon = serde_json::from_str("\"rocket\"").unwrap();
        assert_eq!(unknown, KpiIcon::Other);
        assert_eq!(unknown.glyph(), Glyph::TrendingUp);
        assert_eq!(KpiIcon::Funnel.glyph(), Glyph::Filter);
    }

    #[test]
    fn test_channel_serializes_as_label() {
        let json = serde_json::to_string(&Channel::OrganicSearch).unwrap();
        assert_eq!(json, "\"Organic Search\"");
        assert_eq!(Channel::PaidSearch.to_string(), "Paid Search");
    }
}
