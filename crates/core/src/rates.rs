//! Rate arithmetic shared by entity constructors and snapshot validation.

/// Round to one decimal place, half away from zero.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `part / whole * 100` to one decimal place; zero when `whole` is zero.
pub fn percent_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round1(part as f64 / whole as f64 * 100.0)
}

/// Percentage of `previous` lost on the way to `current`.
pub fn dropoff_rate(previous: u64, current: u64) -> f64 {
    percent_of(previous.saturating_sub(current), previous)
}

/// `round((revenue - spend) / spend * 100)`; zero when spend is not positive.
pub fn roi_percent(spend: f64, revenue: f64) -> i64 {
    if spend <= 0.0 {
        return 0;
    }
    ((revenue - spend) / spend * 100.0).round() as i64
}

/// Tolerance used when comparing stored one-decimal rates.
pub const RATE_EPSILON: f64 = 1e-9;

/// Half a cent.
pub const MONEY_EPSILON: f64 = 0.005;

pub fn amounts_match(stored: f64, derived: f64) -> bool {
    (stored - derived).abs() <= MONEY_EPSILON
}

pub fn rates_match(stored: f64, derived: f64) -> bool {
    (stored - derived).abs() < RATE_EPSILON
}
