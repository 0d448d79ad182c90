const CURRENCY_SYMBOL: &str = "₹";
const MAX_FRACTION_DIGITS: usize = 3;

pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return format!("{CURRENCY_SYMBOL}—");
    }

    let rounded = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (whole, fraction) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && (whole != "0" || !fraction.is_empty()) {
        "-"
    } else {
        ""
    };
    if fraction.is_empty() {
        format!("{sign}{CURRENCY_SYMBOL}{grouped}")
    } else {
        format!("{sign}{CURRENCY_SYMBOL}{grouped}.{fraction}")
    }
}

pub fn format_rate(percent: f64) -> String {
    format!("{percent}%")
}

pub fn format_years(years: u32) -> String {
    format!("{years} Yr")
}
