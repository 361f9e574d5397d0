//! Natural-language date extraction.
//!
//! Scans free task text for a date and/or time of day and turns it into a
//! concrete deadline. This is deliberately a small keyword scanner, not a
//! grammar: `tomorrow`, `tonight`, weekday names, `next <weekday>`,
//! `in N days`, ISO dates and clock times (`5pm`, `17:30`). Anything it
//! does not recognize is simply ignored.
//!
//! All results are anchored at the injected `now` so callers and tests get
//! deterministic behavior.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveTime, Weekday};

/// Default time of day applied when the text names a day but no clock time.
const DEFAULT_HOUR: u32 = 12;

/// Extract a deadline from free text, anchored at `now`.
///
/// Returns `None` when no date or time is recognized. When only a clock
/// time is found, it resolves to the next occurrence of that time (today if
/// still ahead, otherwise tomorrow).
pub fn extract(text: &str, now: DateTime<Local>) -> Option<DateTime<Local>> {
    let today = now.date_naive();
    let mut date: Option<NaiveDate> = None;
    let mut time: Option<NaiveTime> = None;
    let mut evening = false;

    let words: Vec<String> = text
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| ",.!?;".contains(c)).to_lowercase())
        .collect();

    let mut i = 0;
    while i < words.len() {
        let word = words[i].as_str();
        let next = words.get(i + 1).map(String::as_str);

        match word {
            "today" => date = date.or(Some(today)),
            "tonight" => {
                date = date.or(Some(today));
                evening = true;
            }
            "tomorrow" => date = date.or(Some(today + Duration::days(1))),
            "next" => {
                if let Some(n) = next {
                    if n == "week" {
                        date = date.or(Some(today + Duration::days(7)));
                        i += 1;
                    } else if let Some(target) = parse_weekday(n) {
                        date = date.or(Some(next_weekday(today, target)));
                        i += 1;
                    }
                }
            }
            "in" => {
                if let (Some(amount), Some(unit)) = (
                    next.and_then(|n| n.parse::<i64>().ok()),
                    words.get(i + 2).map(String::as_str),
                ) {
                    let days = match unit {
                        "day" | "days" => Some(amount),
                        "week" | "weeks" => amount.checked_mul(7),
                        _ => None,
                    };
                    // Magnitudes past the calendar's range are no match,
                    // not a fault.
                    if let Some(target) = days
                        .and_then(Duration::try_days)
                        .and_then(|d| today.checked_add_signed(d))
                    {
                        date = date.or(Some(target));
                        i += 2;
                    }
                }
            }
            _ => {
                if let Some(target) = parse_weekday(word) {
                    date = date.or(Some(next_weekday(today, target)));
                } else if let Ok(iso) = NaiveDate::parse_from_str(word, "%Y-%m-%d") {
                    date = date.or(Some(iso));
                } else if let Some(t) = parse_time(word) {
                    time = time.or(Some(t));
                }
            }
        }
        i += 1;
    }

    if date.is_none() && time.is_none() {
        return None;
    }

    let time = time.unwrap_or_else(|| {
        let hour = if evening { 20 } else { DEFAULT_HOUR };
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default()
    });
    let date = date.unwrap_or_else(|| {
        // Time only: next occurrence of that clock time.
        if time > now.time() {
            today
        } else {
            today + Duration::days(1)
        }
    });

    date.and_time(time).and_local_timezone(Local).earliest()
}

/// Parse `5pm`, `5:30pm`, `11am` or 24h `17:30`.
fn parse_time(s: &str) -> Option<NaiveTime> {
    let parse_12h = |s: &str, is_pm: bool| -> Option<NaiveTime> {
        let (h, m) = if let Some((h_str, m_str)) = s.split_once(':') {
            (h_str.parse::<u32>().ok()?, m_str.parse::<u32>().ok()?)
        } else {
            (s.parse::<u32>().ok()?, 0)
        };
        if !(1..=12).contains(&h) || m > 59 {
            return None;
        }
        let h_24 = match (h, is_pm) {
            (12, true) => 12,
            (12, false) => 0,
            (h, true) => h + 12,
            (h, false) => h,
        };
        NaiveTime::from_hms_opt(h_24, m, 0)
    };

    if let Some(stripped) = s.strip_suffix("pm") {
        return parse_12h(stripped, true);
    }
    if let Some(stripped) = s.strip_suffix("am") {
        return parse_12h(stripped, false);
    }
    if let Some((h_str, m_str)) = s.split_once(':') {
        let h = h_str.parse::<u32>().ok()?;
        let m = m_str.parse::<u32>().ok()?;
        return NaiveTime::from_hms_opt(h, m, 0);
    }
    None
}

fn parse_weekday(s: &str) -> Option<Weekday> {
    match s {
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tuesday" => Some(Weekday::Tue),
        "wed" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        "sun" | "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// First occurrence of `target` strictly after `from`.
fn next_weekday(from: NaiveDate, target: Weekday) -> NaiveDate {
    let mut d = from + Duration::days(1);
    while d.weekday() != target {
        d += Duration::days(1);
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn anchor() -> DateTime<Local> {
        // A Monday at 10:00 local time.
        Local.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap()
    }

    #[test]
    fn plain_text_has_no_date() {
        assert!(extract("Buy milk", anchor()).is_none());
        assert!(extract("", anchor()).is_none());
    }

    #[test]
    fn tomorrow_at_5pm() {
        let got = extract("Buy milk tomorrow at 5pm", anchor()).unwrap();
        assert_eq!(got.date_naive(), NaiveDate::from_ymd_opt(2026, 3, 3).unwrap());
        assert_eq!(got.time(), NaiveTime::from_hms_opt(17, 0, 0).unwrap());
    }

    #[test]
    fn tomorrow_defaults_to_noon() {
        let got = extract("call dentist tomorrow", anchor()).unwrap();
        assert_eq!(got.date_naive(), NaiveDate::from_ymd_opt(2026, 3, 3).unwrap());
        assert_eq!(got.time(), NaiveTime::from_hms_opt(12, 0, 0).unwrap());
    }

    #[test]
    fn tonight_defaults_to_evening() {
        let got = extract("laundry tonight", anchor()).unwrap();
        assert_eq!(got.date_naive(), NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        assert_eq!(got.time(), NaiveTime::from_hms_opt(20, 0, 0).unwrap());
    }

    #[test]
    fn weekday_is_strictly_in_the_future() {
        // Anchor is a Monday; "monday" must mean next week's Monday.
        let got = extract("review monday", anchor()).unwrap();
        assert_eq!(got.date_naive(), NaiveDate::from_ymd_opt(2026, 3, 9).unwrap());
        let fri = extract("deploy friday", anchor()).unwrap();
        assert_eq!(fri.date_naive(), NaiveDate::from_ymd_opt(2026, 3, 6).unwrap());
    }

    #[test]
    fn next_weekday_and_next_week() {
        let got = extract("sync next friday", anchor()).unwrap();
        assert_eq!(got.date_naive(), NaiveDate::from_ymd_opt(2026, 3, 6).unwrap());
        let week = extract("plan next week", anchor()).unwrap();
        assert_eq!(week.date_naive(), NaiveDate::from_ymd_opt(2026, 3, 9).unwrap());
    }

    #[test]
    fn in_n_days() {
        let got = extract("renew passport in 3 days", anchor()).unwrap();
        assert_eq!(got.date_naive(), NaiveDate::from_ymd_opt(2026, 3, 5).unwrap());
        let weeks = extract("dentist in 2 weeks", anchor()).unwrap();
        assert_eq!(weeks.date_naive(), NaiveDate::from_ymd_opt(2026, 3, 16).unwrap());
    }

    #[test]
    fn iso_date() {
        let got = extract("taxes 2026-04-15", anchor()).unwrap();
        assert_eq!(got.date_naive(), NaiveDate::from_ymd_opt(2026, 4, 15).unwrap());
    }

    #[test]
    fn bare_time_rolls_forward() {
        // 10:00 anchor: 5pm is still ahead today.
        let ahead = extract("standup at 5pm", anchor()).unwrap();
        assert_eq!(ahead.date_naive(), NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        // 9am already passed; next occurrence is tomorrow.
        let behind = extract("standup at 9am", anchor()).unwrap();
        assert_eq!(behind.date_naive(), NaiveDate::from_ymd_opt(2026, 3, 3).unwrap());
        assert_eq!(behind.time(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn twenty_four_hour_clock() {
        let got = extract("release tomorrow 17:30", anchor()).unwrap();
        assert_eq!(got.time(), NaiveTime::from_hms_opt(17, 30, 0).unwrap());
    }

    #[test]
    fn twelve_am_and_pm_edges() {
        assert_eq!(
            parse_time("12am").unwrap(),
            NaiveTime::from_hms_opt(0, 0, 0).unwrap()
        );
        assert_eq!(
            parse_time("12pm").unwrap(),
            NaiveTime::from_hms_opt(12, 0, 0).unwrap()
        );
        assert!(parse_time("13pm").is_none());
        assert!(parse_time("5:75pm").is_none());
    }

    #[test]
    fn absurd_magnitudes_yield_no_match() {
        // Past the calendar's range: not a deadline, and never a panic.
        assert!(extract("water plants in 999999999 days", anchor()).is_none());
        assert!(extract("ping me in 9223372036854775807 weeks", anchor()).is_none());
        assert!(extract("archive in 106751991200 days", anchor()).is_none());
    }

    #[test]
    fn trailing_punctuation_is_ignored() {
        let got = extract("pay rent tomorrow!", anchor()).unwrap();
        assert_eq!(got.date_naive(), NaiveDate::from_ymd_opt(2026, 3, 3).unwrap());
    }

    #[test]
    fn first_recognized_day_wins() {
        let got = extract("today or tomorrow", anchor()).unwrap();
        assert_eq!(got.date_naive(), NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
    }
}
