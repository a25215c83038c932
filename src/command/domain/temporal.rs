//! Normalisation of loosely written dates and times.

use chrono::{NaiveDate, NaiveTime, TimeDelta};

/// Resolves a date written as an ISO date or a relative word.
///
/// Accepts `YYYY-MM-DD`, `today`, `tomorrow`, `yesterday`, `next week` and
/// `next month`, ignoring case and surrounding brackets. Format placeholders
/// such as `YYYY-MM-DD` and anything else unparseable yield `None`.
#[must_use]
pub fn normalize_date(raw: &str, today: NaiveDate) -> Option<NaiveDate> {
    let cleaned = raw.trim().trim_matches(['[', ']']).trim().to_ascii_lowercase();
    match cleaned.as_str() {
        "today" => Some(today),
        "tomorrow" => today.checked_add_signed(TimeDelta::days(1)),
        "yesterday" => today.checked_sub_signed(TimeDelta::days(1)),
        "next week" => today.checked_add_signed(TimeDelta::days(7)),
        "next month" => today.checked_add_signed(TimeDelta::days(30)),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d").ok(),
    }
}

/// Resolves a time written as `HH:MM`, a clock time or a time-of-day word.
#[must_use]
pub fn normalize_time(raw: &str) -> Option<NaiveTime> {
    let cleaned = raw.trim().trim_matches(['[', ']']).trim().to_ascii_lowercase();
    time_of_day_word(&cleaned).or_else(|| parse_clock_time(&cleaned))
}

/// Parses `15:30`, `3:30pm`, `3pm` and `3 pm` style clock times.
#[must_use]
pub fn parse_clock_time(raw: &str) -> Option<NaiveTime> {
    let cleaned = raw.trim().to_ascii_lowercase();
    let (body, meridiem) = cleaned
        .strip_suffix("am")
        .map(|rest| (rest, Some(false)))
        .or_else(|| cleaned.strip_suffix("pm").map(|rest| (rest, Some(true))))
        .unwrap_or((cleaned.as_str(), None));
    let digits = body.trim_end();

    let (hour_text, minute_text) = digits.split_once(':').unwrap_or((digits, "0"));
    let hour: u32 = hour_text.parse().ok()?;
    let minute: u32 = minute_text.parse().ok()?;
    let hour24 = match (meridiem, hour) {
        (None, _) => hour,
        (Some(_), 0 | 13..) => return None,
        (Some(false), 12) => 0,
        (Some(true), 12) | (Some(false), _) => hour,
        (Some(true), _) => hour + 12,
    };
    NaiveTime::from_hms_opt(hour24, minute, 0)
}

fn time_of_day_word(word: &str) -> Option<NaiveTime> {
    let hour = match word {
        "morning" => 9,
        "noon" | "midday" => 12,
        "afternoon" => 14,
        "evening" => 18,
        "night" | "tonight" => 20,
        "midnight" => 0,
        _ => return None,
    };
    NaiveTime::from_hms_opt(hour, 0, 0)
}
