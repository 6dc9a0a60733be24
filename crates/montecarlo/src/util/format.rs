//! Number formatting for terminal and Markdown output

/// Insert thousands separators into a string of ASCII digits
fn group_thousands(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a value with thousands separators and two decimals (`-1,234.50`)
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = format!("{:.2}", value.abs());
    let (whole, frac) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
    // -0.001 rounds to 0.00 and should not keep its sign
    let sign = if value < 0.0 && rounded != "0.00" { "-" } else { "" };
    format!("{sign}{}.{frac}", group_thousands(whole))
}

/// Format a quantile level given as a fraction (`0.05` -> `p5`)
pub fn format_percentile_label(level: f64) -> String {
    format!("p{}", (level * 100.0).round() as u32)
}

/// Format a byte count in compact form (e.g., 2.1 MB, 450 KB, 50 B)
pub fn format_bytes(bytes: usize) -> String {
    let value = bytes as f64;
    if value >= 1_000_000.0 {
        format!("{:.1} MB", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.0} KB", value / 1_000.0)
    } else {
        format!("{bytes} B")
    }
}
