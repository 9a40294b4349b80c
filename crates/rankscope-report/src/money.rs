/// Rounds a modeled amount to whole currency units.
///
/// Non-finite inputs become `0`; out-of-range values saturate.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn whole_units(amount: f64) -> i64 {
    if amount.is_finite() {
        amount.round() as i64
    } else {
        0
    }
}

/// Formats whole currency units as `$1,234,567`.
pub(crate) fn format_currency(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}
