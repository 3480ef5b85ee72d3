//! Display formatting for unit amounts and counts.

/// Group the integer digits of `value` with commas and keep `decimals`
/// fractional digits.
///
/// A value that rounds to zero carries no sign.
///
/// ```
/// use recap_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5, 1), "1,234.5");
/// assert_eq!(format_number(-25000.0, 0), "-25,000");
/// assert_eq!(format_number(-0.001, 2), "0.00");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let fixed = format!("{:.*}", decimals as usize, value.abs());
    let (int_digits, frac_digits) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = group_thousands(int_digits);
    if let Some(f) = frac_digits {
        out.push('.');
        out.push_str(f);
    }

    let is_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
    if value.is_sign_negative() && !is_zero {
        out.insert(0, '-');
    }
    out
}

/// Format a unit amount with an explicit sign and a `u` suffix, e.g. `+2.50u`.
///
/// ```
/// use recap_core::formatting::format_units;
///
/// assert_eq!(format_units(2.5), "+2.50u");
/// assert_eq!(format_units(-1.0), "-1.00u");
/// assert_eq!(format_units(0.0), "0.00u");
/// ```
pub fn format_units(value: f64) -> String {
    let body = format_number(value, 2);
    if body.starts_with('-') || body.chars().all(|c| c == '0' || c == '.') {
        format!("{}u", body)
    } else {
        format!("+{}u", body)
    }
}

/// Format an optional cell value; missing values render as `-`.
pub fn format_optional(value: Option<f64>) -> String {
    match value {
        Some(v) => format_number(v, 2),
        None => "-".to_string(),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let lead = digits.len() % 3;
    for (i, ch) in digits.char_indices() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
