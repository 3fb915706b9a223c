//! Display formatting for dashboard figures.

/// Whole-dollar amount with thousands separators: `$48,720`, `-$1,200`.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}${}", sign, group_thousands(rounded.abs() as u64))
}

/// Integer count with thousands separators: `28,450`.
pub fn format_number(value: u64) -> String {
    group_thousands(value)
}

/// One-decimal percentage: `43.5%`.
pub fn format_percentage(value: f64) -> String {
    format!("{}%", one_decimal(value))
}

/// One-decimal percentage with an explicit sign for non-negative values.
pub fn format_signed_percentage(value: f64) -> String {
    let text = one_decimal(value);
    if text.starts_with('-') {
        format!("{}%", text)
    } else {
        format!("+{}%", text)
    }
}

/// Abbreviated count: `186K`, `1.2M`, `950`. A value that rounds up to a
/// thousand of one unit is shown in the next: `999,950` is `1M`.
pub fn format_compact_number(value: f64) -> String {
    const UNITS: [(f64, &str); 3] = [(1_000_000.0, "M"), (1_000.0, "K"), (1.0, "")];
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };
    let mut unit = UNITS
        .iter()
        .position(|(divisor, _)| abs >= *divisor)
        .unwrap_or(UNITS.len() - 1);
    loop {
        let (divisor, suffix) = UNITS[unit];
        let scaled = if suffix.is_empty() {
            abs.round()
        } else {
            (abs / divisor * 10.0).round() / 10.0
        };
        if scaled >= 1_000.0 && unit > 0 {
            unit -= 1;
            continue;
        }
        return format!("{}{}{}", sign, trim_decimal(scaled), suffix);
    }
}

/// Abbreviated dollars: `$42.3K`.
pub fn format_compact_currency(amount: f64) -> String {
    let compact = format_compact_number(amount);
    match compact.strip_prefix('-') {
        Some(rest) => format!("-${}", rest),
        None => format!("${}", compact),
    }
}

/// Chart axis tick in thousands of dollars: `$12K`.
pub fn format_axis_thousands(amount: f64) -> String {
    format!("${:.0}K", amount / 1_000.0)
}

/// `{:.1}` without a negative zero.
fn one_decimal(value: f64) -> String {
    let text = format!("{:.1}", value);
    if text == "-0.0" {
        "0.0".to_string()
    } else {
        text
    }
}

fn trim_decimal(value: f64) -> String {
    let s = format!("{:.1}", value);
    match s.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => s,
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
