//! Funnel analysis: per-step bars and drop-off between consecutive stages.
//!
//! Rates come from the steps themselves; this module only adds the absolute
//! counts and layout figures that go with them.

use crate::format;
use dashboard_core::types::FunnelStep;
use serde::Serialize;

/// Narrowest bar drawn, as a percentage of the first step's width.
pub const MIN_BAR_WIDTH_PCT: f64 = 8.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelStepResult {
    pub step_name: String,
    pub visitors: u64,
    pub width_pct: f64,
    /// Visitors lost since the previous step; `None` for the first step.
    pub dropped_off: Option<u64>,
    pub dropoff_rate: f64,
    pub conversion_rate: f64,
    /// `-13,500 dropped (32.1%)`
    pub dropoff_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelResult {
    pub steps: Vec<FunnelStepResult>,
    pub overall_conversion_rate: f64,
    pub converted: u64,
    pub lost: u64,
}

pub struct FunnelAnalyzer;

impl FunnelAnalyzer {
    pub fn analyze(steps: &[FunnelStep]) -> FunnelResult {
        let top = steps.first().map_or(0, |s| s.visitors);
        let results = steps
            .iter()
            .enumerate()
            .map(|(i, step)| {
                let dropped_off = i
                    .checked_sub(1)
                    .map(|prev| steps[prev].visitors.saturating_sub(step.visitors));
                FunnelStepResult {
                    step_name: step.name.clone(),
                    visitors: step.visitors,
                    width_pct: bar_width(step.visitors, top),
                    dropped_off,
                    dropoff_rate: step.dropoff_rate,
                    conversion_rate: step.conversion_rate,
                    dropoff_label: dropped_off.map(|d| {
                        format!(
                            "-{} dropped ({})",
                            format::format_number(d),
                            format::format_percentage(step.dropoff_rate)
                        )
                    }),
                }
            })
            .collect();

        let converted = steps.last().map_or(0, |s| s.visitors);
        FunnelResult {
            steps: results,
            overall_conversion_rate: steps.last().map_or(0.0, |s| s.conversion_rate),
            converted,
            lost: top.saturating_sub(converted),
        }
    }
}

fn bar_width(visitors: u64, top: u64) -> f64 {
    let pct = if top == 0 {
        0.0
    } else {
        visitors as f64 / top as f64 * 100.0
    };
    pct.max(MIN_BAR_WIDTH_PCT)
}
