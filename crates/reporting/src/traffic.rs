//! Traffic and geographic tables: single-column sorting over channel and
//! state rows.

use dashboard_core::types::{StateData, TrafficSource};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Sessions,
    Conversions,
    ConversionRate,
    Revenue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Active sort column and direction. Starts on sessions, descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: SortField::Sessions,
            direction: SortDirection::Descending,
        }
    }
}

impl SortState {
    /// State after a header click: the active field flips direction, any
    /// other field becomes active in descending order.
    pub fn toggle(self, field: SortField) -> Self {
        if field == self.field {
            Self {
                field,
                direction: self.direction.reversed(),
            }
        } else {
            Self {
                field,
                direction: SortDirection::Descending,
            }
        }
    }
}

/// A table row exposing the sortable numeric columns.
pub trait TrafficRow {
    fn sort_value(&self, field: SortField) -> f64;
}

impl TrafficRow for TrafficSource {
    fn sort_value(&self, field: SortField) -> f64 {
        match field {
            SortField::Sessions => self.sessions as f64,
            SortField::Conversions => self.conversions as f64,
            SortField::ConversionRate => self.conversion_rate,
            SortField::Revenue => self.revenue,
        }
    }
}

impl TrafficRow for StateData {
    fn sort_value(&self, field: SortField) -> f64 {
        match field {
            SortField::Sessions => self.sessions as f64,
            SortField::Conversions => self.conversions as f64,
            SortField::ConversionRate => self.conversion_rate,
            SortField::Revenue => self.revenue,
        }
    }
}

/// Sorted copy of `rows`. Stable: rows with equal values keep their
/// original relative order in either direction.
pub fn sort_rows<T: TrafficRow + Clone>(rows: &[T], state: SortState) -> Vec<T> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| {
        let ord = a
            .sort_value(state.field)
            .total_cmp(&b.sort_value(state.field));
        match state.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    sorted
}

/// Colour class for a month-over-month change figure.
pub fn mom_change_class(change: f64) -> &'static str {
    if change >= 0.0 {
        "text-emerald-600"
    } else {
        "text-red-500"
    }
}
