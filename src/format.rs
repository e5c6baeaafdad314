//! Display formatting for currency amounts and solved rates

/// Format an HKD amount with no decimals: `HK$1,365,000`.
///
/// Rounds half away from zero and groups thousands.
pub fn format_hkd(value: f64) -> String {
    let rounded = value.abs().round() as u64;
    let grouped = group_thousands(rounded);
    if value.is_sign_negative() && rounded != 0 {
        format!("-HK${}", grouped)
    } else {
        format!("HK${}", grouped)
    }
}

/// Render a solved rate at two decimals: `6.77%`.
///
/// `None` (a solver failure) renders as `N/A` so it can never be read as an
/// actual zero return.
pub fn format_percent(rate: Option<f64>) -> String {
    match rate {
        Some(value) => format_percent_value(value),
        None => "N/A".to_string(),
    }
}

/// Two-decimal percent rendering for a known-good rate.
pub fn format_percent_value(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, digit) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*digit as char);
    }

    out
}
