use crate::model::ValueFormat;

/// Formats a value for ticks, legends, tooltips and metric cards.
pub fn format_value(value: f64, format: ValueFormat) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    match format {
        ValueFormat::Number => format_number(value),
        ValueFormat::Currency => format_currency(value),
        ValueFormat::Percent => format!("{:.1}%", value),
    }
}

fn format_number(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        group_thousands(value, 0)
    } else {
        group_thousands(value, 2)
    }
}

fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();
    if magnitude >= 1_000_000_000.0 {
        format!("{sign}${:.1}B", magnitude / 1_000_000_000.0)
    } else if magnitude >= 1_000_000.0 {
        format!("{sign}${:.1}M", magnitude / 1_000_000.0)
    } else if magnitude >= 1_000.0 {
        format!("{sign}${:.1}K", magnitude / 1_000.0)
    } else {
        format!("{sign}${}", group_thousands(magnitude, 0))
    }
}

fn group_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (index, ch) in int_part.chars().enumerate() {
        if index > 0 && (int_part.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}
