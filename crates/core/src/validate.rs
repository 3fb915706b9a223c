//! Data-model invariants checked over a whole snapshot.

use crate::error::InvariantViolation;
use crate::rates;
use crate::types::*;

impl DashboardSnapshot {
    /// Check every relationship the snapshot must hold, returning the first
    /// violation found.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        validate_kpis(&self.kpis)?;
        validate_revenue(&self.revenue_data)?;
        validate_window(&self.window, &self.revenue_data)?;
        validate_funnel(&self.funnel_steps)?;
        for source in &self.traffic_sources {
            check_conversion_rate(&source.id, source.sessions, source.conversions, source.conversion_rate)?;
        }
        for state in &self.top_states {
            check_conversion_rate(&state.state, state.sessions, state.conversions, state.conversion_rate)?;
        }
        validate_email_campaigns(&self.email_campaigns)?;
        validate_campaigns(&self.campaigns)
    }
}

pub fn validate_kpis(kpis: &[KpiMetric]) -> Result<(), InvariantViolation> {
    match kpis.iter().find(|k| k.sparkline_data.len() != WINDOW_DAYS) {
        Some(kpi) => Err(InvariantViolation::SparklineLength {
            label: kpi.label.clone(),
            len: kpi.sparkline_data.len(),
            expected: WINDOW_DAYS,
        }),
        None => Ok(()),
    }
}

pub fn validate_revenue(points: &[RevenueDataPoint]) -> Result<(), InvariantViolation> {
    if points.len() != WINDOW_DAYS {
        return Err(InvariantViolation::RevenueLength {
            actual: points.len(),
            expected: WINDOW_DAYS,
        });
    }
    for point in points {
        if point.components().iter().any(|c| *c < 0.0) {
            return Err(InvariantViolation::NegativeRevenue { date: point.date });
        }
        if !rates::amounts_match(point.total, point.components().iter().sum::<f64>()) {
            return Err(InvariantViolation::RevenueTotal { date: point.date });
        }
    }
    for pair in points.windows(2) {
        if pair[0].date.succ_opt() != Some(pair[1].date) {
            return Err(InvariantViolation::RevenueGap { date: pair[1].date });
        }
    }
    Ok(())
}

/// The window must span exactly the revenue series.
pub fn validate_window(window: &ReportingWindow, points: &[RevenueDataPoint]) -> Result<(), InvariantViolation> {
    let spans = match (points.first(), points.last()) {
        (Some(first), Some(last)) => window.start == first.date && window.end == last.date,
        _ => window.start <= window.end,
    };
    if spans {
        Ok(())
    } else {
        Err(InvariantViolation::WindowMismatch {
            start: window.start,
            end: window.end,
        })
    }
}

pub fn validate_funnel(steps: &[FunnelStep]) -> Result<(), InvariantViolation> {
    let first = steps.first().ok_or(InvariantViolation::EmptyFunnel)?;
    if !rates::rates_match(first.dropoff_rate, 0.0) || !rates::rates_match(first.conversion_rate, 100.0) {
        return Err(InvariantViolation::FunnelRates {
            step: first.name.clone(),
        });
    }
    for pair in steps.windows(2) {
        let (prev, step) = (&pair[0], &pair[1]);
        if step.visitors > prev.visitors {
            return Err(InvariantViolation::FunnelNotMonotonic {
                step: step.name.clone(),
            });
        }
        let dropoff = rates::dropoff_rate(prev.visitors, step.visitors);
        let conversion = rates::percent_of(step.visitors, first.visitors);
        if !rates::rates_match(step.dropoff_rate, dropoff)
            || !rates::rates_match(step.conversion_rate, conversion)
        {
            return Err(InvariantViolation::FunnelRates {
                step: step.name.clone(),
            });
        }
    }
    Ok(())
}

fn check_conversion_rate(
    row: &str,
    sessions: u64,
    conversions: u64,
    stored: f64,
) -> Result<(), InvariantViolation> {
    // Stored rates are one-decimal values; allow the rounding step.
    let exact = if sessions == 0 {
        0.0
    } else {
        conversions as f64 / sessions as f64 * 100.0
    };
    if (stored - exact).abs() > 0.05 + rates::RATE_EPSILON {
        return Err(InvariantViolation::ConversionRate { row: row.to_string() });
    }
    Ok(())
}

pub fn validate_email_campaigns(campaigns: &[EmailCampaign]) -> Result<(), InvariantViolation> {
    let in_range = |rate: f64| (0.0..=100.0).contains(&rate);
    for campaign in campaigns {
        if !in_range(campaign.open_rate) || !in_range(campaign.click_rate) {
            return Err(InvariantViolation::EmailRate {
                campaign: campaign.id.clone(),
            });
        }
        if campaign.revenue.is_nan() || campaign.revenue < 0.0 {
            return Err(InvariantViolation::EmailRevenue {
                campaign: campaign.id.clone(),
            });
        }
    }
    Ok(())
}

pub fn validate_campaigns(campaigns: &[Campaign]) -> Result<(), InvariantViolation> {
    for campaign in campaigns {
        if campaign.spend <= 0.0 {
            return Err(InvariantViolation::NonPositiveSpend {
                campaign: campaign.id.clone(),
            });
        }
        if campaign.roi != rates::roi_percent(campaign.spend, campaign.revenue) {
            return Err(InvariantViolation::Roi {
                campaign: campaign.id.clone(),
            });
        }
        if campaign.end_date < campaign.start_date {
            return Err(InvariantViolation::CampaignDates {
                campaign: campaign.id.clone(),
            });
        }
    }
    Ok(())
}
