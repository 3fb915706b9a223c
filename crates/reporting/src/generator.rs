//! Synthetic dashboard dataset: a plausible, internally consistent 30-day
//! snapshot built from a random source and a reference time.

use crate::format;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use dashboard_core::types::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Authored funnel stages, widest first.
const FUNNEL_STAGES: [(&str, u64); 5] = [
    ("Landing Page", 186_000),
    ("Screening Start", 42_000),
    ("Screening Complete", 28_500),
    ("Payment", 24_200),
    ("Letter Issued", 23_100),
];

/// (id, channel, sessions, conversions, revenue, mom change)
const TRAFFIC_SOURCES: [(&str, Channel, u64, u64, f64, f64); 6] = [
    ("src-001", Channel::OrganicSearch, 68_400, 8_920, 18_240.0, 14.3),
    ("src-002", Channel::PaidSearch, 42_100, 4_630, 9_480.0, 6.2),
    ("src-003", Channel::Email, 31_200, 5_460, 7_840.0, 22.8),
    ("src-004", Channel::Direct, 24_600, 3_440, 4_120.0, 3.1),
    ("src-005", Channel::Social, 14_200, 1_280, 1_840.0, -4.7),
    ("src-006", Channel::Referral, 7_500, 1_370, 2_780.0, 31.4),
];

/// (state, sessions, conversions, revenue)
const TOP_STATES: [(&str, u64, u64, f64); 10] = [
    ("California", 28_400, 3_690, 7_540.0),
    ("Texas", 19_200, 2_500, 5_110.0),
    ("Florida", 16_800, 2_350, 4_810.0),
    ("New York", 14_600, 1_750, 3_580.0),
    ("Illinois", 9_400, 1_220, 2_500.0),
    ("Pennsylvania", 8_200, 1_060, 2_170.0),
    ("Ohio", 7_600, 990, 2_020.0),
    ("Georgia", 6_800, 920, 1_880.0),
    ("North Carolina", 6_200, 810, 1_660.0),
    ("Michigan", 5_800, 720, 1_470.0),
];

struct EmailRow {
    id: &'static str,
    name: &'static str,
    /// Days relative to the end of the window; positive means upcoming.
    day_offset: i64,
    recipients: u64,
    open_rate: f64,
    click_rate: f64,
    conversions: u64,
    revenue: f64,
    status: EmailStatus,
}

const EMAIL_CAMPAIGNS: [EmailRow; 6] = [
    EmailRow { id: "email-001", name: "Welcome Series", day_offset: -3, recipients: 4_200, open_rate: 62.4, click_rate: 18.3, conversions: 312, revenue: 8_420.0, status: EmailStatus::Sent },
    EmailRow { id: "email-002", name: "Abandoned Screening", day_offset: -4, recipients: 2_800, open_rate: 48.6, click_rate: 22.1, conversions: 186, revenue: 5_240.0, status: EmailStatus::Sent },
    EmailRow { id: "email-003", name: "Seasonal Wellness", day_offset: -8, recipients: 18_400, open_rate: 34.2, click_rate: 8.4, conversions: 420, revenue: 6_180.0, status: EmailStatus::Sent },
    EmailRow { id: "email-004", name: "Re-engagement", day_offset: -10, recipients: 6_200, open_rate: 28.8, click_rate: 6.2, conversions: 94, revenue: 2_860.0, status: EmailStatus::Sent },
    EmailRow { id: "email-005", name: "Referral Program", day_offset: 2, recipients: 12_000, open_rate: 0.0, click_rate: 0.0, conversions: 0, revenue: 0.0, status: EmailStatus::Scheduled },
    EmailRow { id: "email-006", name: "Monthly Newsletter", day_offset: -17, recipients: 28_450, open_rate: 31.6, click_rate: 5.8, conversions: 248, revenue: 4_120.0, status: EmailStatus::Sent },
];

/// (id, name, channel, spend, revenue, start offset, end offset); offsets in
/// days relative to the end of the window.
const AD_CAMPAIGNS: [(&str, &str, Channel, f64, f64, i64, i64); 6] = [
    ("camp-001", "Google Ads — Branded", Channel::PaidSearch, 3_200.0, 14_800.0, -48, 41),
    ("camp-002", "Facebook — Awareness", Channel::Social, 2_400.0, 6_200.0, -34, 25),
    ("camp-003", "Instagram Stories", Channel::Social, 1_800.0, 4_100.0, -17, 71),
    ("camp-004", "Google Ads — Non-Brand", Channel::PaidSearch, 4_600.0, 9_400.0, -48, 41),
    ("camp-005", "Email Automation", Channel::Email, 480.0, 8_420.0, -48, 316),
    ("camp-006", "Referral Program", Channel::Referral, 1_200.0, 5_800.0, -48, 132),
];

/// Builds complete [`DashboardSnapshot`]s. Values are random; lengths, ranges
/// and relationships between fields are fixed.
#[derive(Debug, Clone)]
pub struct DatasetGenerator {
    /// Revenue multiplier applied on Saturdays and Sundays.
    pub weekend_factor: f64,
    /// Revenue growth per day across the window.
    pub daily_growth: f64,
}

impl DatasetGenerator {
    pub fn new() -> Self {
        Self {
            weekend_factor: 0.65,
            daily_growth: 0.005,
        }
    }

    /// Generate a snapshot whose window ends on the UTC date of `now`.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R, now: DateTime<Utc>) -> DashboardSnapshot {
        let today = now.date_naive();
        let revenue_data = self.revenue_series(rng, today);
        let funnel_steps = FunnelStep::build_funnel(FUNNEL_STAGES);
        let kpis = kpi_metrics(rng, &funnel_steps);

        let snapshot = DashboardSnapshot {
            id: uuid::Builder::from_random_bytes(rng.gen()).into_uuid(),
            generated_at: now,
            window: ReportingWindow {
                start: revenue_data.first().map_or(today, |p| p.date),
                end: today,
            },
            kpis,
            revenue_data,
            funnel_steps,
            traffic_sources: traffic_sources(),
            top_states: top_states(),
            email_campaigns: email_campaigns(today),
            campaigns: ad_campaigns(today),
        };
        debug!(snapshot_id = %snapshot.id, end = %today, "Generated dashboard snapshot");
        snapshot
    }

    /// Reproducible snapshot for a fixed seed and reference time.
    pub fn generate_seeded(&self, seed: u64, now: DateTime<Utc>) -> DashboardSnapshot {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate(&mut rng, now)
    }

    pub fn generate_now(&self) -> DashboardSnapshot {
        self.generate(&mut rand::thread_rng(), Utc::now())
    }

    /// One point per day for the window ending on `today`, oldest first.
    pub fn revenue_series<R: Rng + ?Sized>(&self, rng: &mut R, today: NaiveDate) -> Vec<RevenueDataPoint> {
        (0..WINDOW_DAYS)
            .map(|k| {
                let date = today - Duration::days((WINDOW_DAYS - 1 - k) as i64);
                let weekend = if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                    self.weekend_factor
                } else {
                    1.0
                };
                let scale = weekend * (1.0 + k as f64 * self.daily_growth);
                let mut draw = |low: f64, width: f64| ((low + rng.gen::<f64>() * width) * scale).round();
                let esa_letter = draw(850.0, 250.0);
                let psd_letter = draw(240.0, 80.0);
                let dog_training = draw(100.0, 50.0);
                RevenueDataPoint::new(date, esa_letter, psd_letter, dog_training)
            })
            .collect()
    }
}

impl Default for DatasetGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Random-walk history of [`WINDOW_DAYS`] samples around `base`, drifting by
/// `trend` per step with uniform noise of width `variance`.
pub fn sparkline<R: Rng + ?Sized>(rng: &mut R, base: f64, variance: f64, trend: f64) -> Vec<u64> {
    let mut current = base - trend * (WINDOW_DAYS / 2) as f64;
    (0..WINDOW_DAYS)
        .map(|_| {
            current += trend + (rng.gen::<f64>() - 0.5) * variance;
            current.round().max(0.0) as u64
        })
        .collect()
}

fn kpi_metrics<R: Rng + ?Sized>(rng: &mut R, funnel: &[FunnelStep]) -> Vec<KpiMetric> {
    let monthly_revenue = 42_300.0;
    let funnel_conversion = funnel.last().map_or(0.0, |s| s.conversion_rate);
    let subscribers = 28_450u64;
    let sessions = funnel.first().map_or(0, |s| s.visitors);

    vec![
        KpiMetric {
            label: "Monthly Revenue".into(),
            value: monthly_revenue,
            formatted_value: format::format_compact_currency(monthly_revenue),
            change: 18.2,
            sparkline_data: sparkline(rng, 1_200.0, 200.0, 18.0),
            icon: KpiIcon::DollarSign,
        },
        KpiMetric {
            label: "Funnel Conversion".into(),
            value: funnel_conversion,
            formatted_value: format::format_percentage(funnel_conversion),
            change: 2.1,
            sparkline_data: sparkline(rng, 10.0, 1.5, 0.08),
            icon: KpiIcon::Funnel,
        },
        KpiMetric {
            label: "Email Subscribers".into(),
            value: subscribers as f64,
            formatted_value: format::format_number(subscribers),
            change: 8.6,
            sparkline_data: sparkline(rng, 26_000.0, 300.0, 80.0),
            icon: KpiIcon::Mail,
        },
        KpiMetric {
            label: "Organic Sessions".into(),
            value: sessions as f64,
            formatted_value: format::format_compact_number(sessions as f64),
            change: 14.3,
            sparkline_data: sparkline(rng, 5_400.0, 600.0, 80.0),
            icon: KpiIcon::TrendingUp,
        },
    ]
}

fn traffic_sources() -> Vec<TrafficSource> {
    TRAFFIC_SOURCES
        .iter()
        .map(|&(id, channel, sessions, conversions, revenue, mom)| {
            TrafficSource::new(id, channel, sessions, conversions, revenue, mom)
        })
        .collect()
}

fn top_states() -> Vec<StateData> {
    TOP_STATES
        .iter()
        .map(|&(state, sessions, conversions, revenue)| StateData::new(state, sessions, conversions, revenue))
        .collect()
}

fn email_campaigns(today: NaiveDate) -> Vec<EmailCampaign> {
    EMAIL_CAMPAIGNS
        .iter()
        .map(|row| EmailCampaign {
            id: row.id.into(),
            name: row.name.into(),
            sent_date: today + Duration::days(row.day_offset),
            recipients: row.recipients,
            open_rate: row.open_rate,
            click_rate: row.click_rate,
            conversions: row.conversions,
            revenue: row.revenue,
            status: row.status,
        })
        .collect()
}

fn ad_campaigns(today: NaiveDate) -> Vec<Campaign> {
    AD_CAMPAIGNS
        .iter()
        .map(|&(id, name, channel, spend, revenue, start, end)| {
            Campaign::new(
                id,
                name,
                channel,
                spend,
                revenue,
                CampaignStatus::Active,
                today + Duration::days(start),
                today + Duration::days(end),
            )
        })
        .collect()
}
