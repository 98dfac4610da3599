//! Derived values shown on cards and lists.

use crate::validation::parse_time;

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// `1250` → `$12.50`; negative amounts keep the sign ahead of the symbol.
pub fn format_price(cents: i64, currency_symbol: &str) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{currency_symbol}{}.{:02}", abs / 100, abs % 100)
}

pub fn day_name(day_of_week: i32) -> Option<&'static str> {
    usize::try_from(day_of_week)
        .ok()
        .and_then(|d| DAY_NAMES.get(d))
        .copied()
}

/// `"16:00", "17:30"` → `4:00 PM – 5:30 PM`. Unparsable times are shown as
/// entered.
pub fn time_range(start: &str, end: &str) -> String {
    format!("{} – {}", twelve_hour(start), twelve_hour(end))
}

fn twelve_hour(value: &str) -> String {
    parse_time(value)
        .map(|t| t.format("%-I:%M %p").to_string())
        .unwrap_or_else(|| value.to_string())
}

pub fn full_name(first: &str, last: &str) -> String {
    match (first.trim(), last.trim()) {
        ("", last) => last.to_string(),
        (first, "") => first.to_string(),
        (first, last) => format!("{first} {last}"),
    }
}

pub fn hours_label(hours: i32) -> String {
    if hours == 1 {
        "1 hour".to_string()
    } else {
        format!("{hours} hours")
    }
}
