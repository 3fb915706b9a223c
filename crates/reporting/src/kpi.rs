//! KPI card view-models.

use crate::format;
use dashboard_core::types::{Glyph, KpiMetric};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiCard {
    pub label: String,
    pub formatted_value: String,
    /// `+18.2%`
    pub change_label: String,
    pub positive: bool,
    pub glyph: Glyph,
    pub sparkline: Vec<u64>,
}

impl KpiCard {
    pub fn from_metric(metric: &KpiMetric) -> Self {
        let positive = metric.change > 0.0;
        let change_label = if positive {
            format::format_signed_percentage(metric.change)
        } else {
            format::format_percentage(metric.change)
        };
        Self {
            label: metric.label.clone(),
            formatted_value: metric.formatted_value.clone(),
            change_label,
            positive,
            glyph: metric.icon.glyph(),
            sparkline: metric.sparkline_data.clone(),
        }
    }

    /// Stroke colour for the sparkline and change badge.
    pub fn trend_color(&self) -> &'static str {
        if self.positive {
            "#10b981"
        } else {
            "#ef4444"
        }
    }
}
