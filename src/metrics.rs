//! Derived figures: lenient number parsing, Indonesian number formatting,
//! achievement and growth percentages.
//!
//! Every function here is total. Text that does not start with a number is
//! treated as zero (or as the undefined percentage), never as an error.

use std::fmt;

/// Parse the leading decimal literal of `text` (after leading whitespace),
/// ignoring whatever follows it. `"150000abc"` is 150000, `"abc"` is `None`.
pub fn parse_amount(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let mut e = end + 1;
        while e < bytes.len() && bytes[e].is_ascii_digit() {
            e += 1;
        }
        let frac = e - (end + 1);
        if digits + frac > 0 {
            digits += frac;
            end = e;
        }
    }
    if digits == 0 {
        return None;
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut e = end + 1;
        if e < bytes.len() && (bytes[e] == b'+' || bytes[e] == b'-') {
            e += 1;
        }
        let exp_start = e;
        while e < bytes.len() && bytes[e].is_ascii_digit() {
            e += 1;
        }
        if e > exp_start {
            end = e;
        }
    }
    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse the leading integer of `text`, truncating any fraction (`"12.7"` is 12).
/// Digit runs past the `i64` range saturate.
pub fn parse_count(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    match s[..end].parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) if bytes[0] == b'-' => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

/// Amount or zero.
pub fn amount_or_zero(text: &str) -> f64 {
    parse_amount(text).unwrap_or(0.0)
}

/// Count or zero.
pub fn count_or_zero(text: &str) -> i64 {
    parse_count(text).unwrap_or(0)
}

/// Sum of amounts, unparseable entries counting as zero.
pub fn sum_amounts<'a, I>(values: I) -> f64
where
    I: IntoIterator<Item = &'a str>,
{
    values.into_iter().map(amount_or_zero).sum()
}

/// Integer-rounded value grouped with `.` every three digits: `1.234.568`.
pub fn group_number(value: f64) -> String {
    let rounded = value.round();
    if rounded == 0.0 || !rounded.is_finite() {
        return "0".to_string();
    }
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

pub fn format_number(text: &str) -> String {
    match parse_amount(text) {
        Some(v) => group_number(v),
        None => "0".to_string(),
    }
}

pub fn currency_value(value: f64) -> String {
    format!("Rp {}", group_number(value))
}

pub fn format_currency(text: &str) -> String {
    format!("Rp {}", format_number(text))
}

// =============================================================================
// Percentages
// =============================================================================

/// A one-decimal percentage, or the undefined case (unparseable input or a
/// zero denominator). Undefined renders as `0`, defined values always carry
/// one decimal (`25.0`, `-10.0`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percent(Option<f64>);

impl Percent {
    pub const UNDEFINED: Percent = Percent(None);

    fn of(value: f64) -> Self {
        Percent(Some((value * 10.0).round() / 10.0))
    }

    /// Numeric value, 0 when undefined.
    pub fn value(self) -> f64 {
        self.0.unwrap_or(0.0)
    }

    pub fn is_defined(self) -> bool {
        self.0.is_some()
    }

    pub fn reached(self) -> bool {
        self.value() >= 100.0
    }

    /// Fill ratio for a progress bar, in `[0, 1]`.
    pub fn fill(self) -> f64 {
        (self.value() / 100.0).clamp(0.0, 1.0)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{:.1}", v),
            None => f.write_str("0"),
        }
    }
}

/// `a` as a percentage of `b`.
pub fn percent_of(a: &str, b: &str) -> Percent {
    percent_of_values(parse_amount(a), parse_amount(b))
}

pub fn percent_of_values(a: Option<f64>, b: Option<f64>) -> Percent {
    match (a, b) {
        (Some(a), Some(b)) if b != 0.0 => Percent::of(a / b * 100.0),
        _ => Percent::UNDEFINED,
    }
}

/// Period-over-period change of `curr` relative to `prev`.
pub fn growth_percent(curr: &str, prev: &str) -> Percent {
    match (parse_amount(curr), parse_amount(prev)) {
        (Some(c), Some(p)) if p != 0.0 => Percent::of((c - p) / p * 100.0),
        _ => Percent::UNDEFINED,
    }
}

/// `+50.0% vs bulan lalu`; the sign is omitted only for negative growth.
pub fn growth_label(growth: Percent) -> String {
    let text = growth.to_string();
    if text.starts_with('-') {
        format!("{}% vs bulan lalu", text)
    } else {
        format!("+{}% vs bulan lalu", text)
    }
}
