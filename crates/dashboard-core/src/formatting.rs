//! Number formatting shared by the terminal views and the SVG export.

/// Format a transaction count with thousands separators.
///
/// ```
/// use dashboard_core::formatting::format_count;
///
/// assert_eq!(format_count(3_292_679), "3,292,679");
/// assert_eq!(format_count(0), "0");
/// ```
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Axis tick formatter: truncate to an integer, then group thousands.
///
/// ```
/// use dashboard_core::formatting::format_axis_value;
///
/// assert_eq!(format_axis_value(250_000.0), "250,000");
/// assert_eq!(format_axis_value(1_999.9), "1,999");
/// ```
pub fn format_axis_value(value: f64) -> String {
    let truncated = value.trunc();
    if truncated < 0.0 {
        format!("-{}", format_count(truncated.abs() as u64))
    } else {
        format_count(truncated as u64)
    }
}

/// Share of `part` in `whole` as a percentage with one decimal, e.g. `"68.6%"`.
///
/// An empty `whole` yields `"0.0%"`.
pub fn format_share(part: u64, whole: u64) -> String {
    if whole == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", part as f64 * 100.0 / whole as f64)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
