//! Revenue-by-product totals for the stacked daily chart.

use crate::format;
use dashboard_core::types::RevenueDataPoint;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductTotals {
    pub esa_letter: f64,
    pub psd_letter: f64,
    pub dog_training: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueSummary {
    pub total: f64,
    pub formatted_total: String,
    pub by_product: ProductTotals,
    pub daily_average: f64,
    pub days: usize,
}

impl RevenueSummary {
    pub fn from_points(points: &[RevenueDataPoint]) -> Self {
        let by_product = ProductTotals {
            esa_letter: points.iter().map(|p| p.esa_letter).sum(),
            psd_letter: points.iter().map(|p| p.psd_letter).sum(),
            dog_training: points.iter().map(|p| p.dog_training).sum(),
        };
        let total: f64 = points.iter().map(|p| p.total).sum();
        let daily_average = if points.is_empty() {
            0.0
        } else {
            total / points.len() as f64
        };
        Self {
            total,
            formatted_total: format::format_currency(total),
            by_product,
            daily_average,
            days: points.len(),
        }
    }
}

/// X-axis label for a point: `Feb 18`.
pub fn date_label(point: &RevenueDataPoint) -> String {
    point.date.format("%b %-d").to_string()
}

/// Tooltip heading for a point: `Feb 18, 2026`.
pub fn tooltip_label(point: &RevenueDataPoint) -> String {
    point.date.format("%b %-d, %Y").to_string()
}
