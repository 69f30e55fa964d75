//! Result rendering: shared formatting plus the HTML fragment builders.

pub mod html;

use fin_core::calculations::common::round_half_up;
use rust_decimal::Decimal;

/// Formats a monetary amount with two decimals and thousands separators.
pub fn format_money(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let plain = format!("{rounded:.2}");

    let (sign, digits) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    format!("{sign}{}.{frac_part}", group_thousands(int_part))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && i % 3 == offset % 3 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a month count as "N months" / "N years" / "N years M months".
pub fn format_month_span(months: u32) -> String {
    let years = months / 12;
    let rem = months % 12;

    let plural = |n: u32, word: &str| {
        if n == 1 {
            format!("{n} {word}")
        } else {
            format!("{n} {word}s")
        }
    };

    if years == 0 {
        plural(months, "month")
    } else if rem == 0 {
        plural(years, "year")
    } else {
        format!("{} {}", plural(years, "year"), plural(rem, "month"))
    }
}
