//! Natural-language date phrase resolution
//!
//! Turns Korean relative-date expressions ("저번주", "6월 첫째주", "어제")
//! into absolute calendar-date ranges. Weeks run Sunday through Saturday
//! everywhere in this module. The resolver is pure over the reference date;
//! callers derive that date from the injected clock.

use chrono::{Datelike, Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// Inclusive calendar-date range used as a hard store filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    fn week_from(start: NaiveDate) -> Self {
        Self {
            start,
            end: start + Duration::days(6),
        }
    }
}

/// Resolver output: an optional hard date filter plus the canonical
/// temporal tokens recognized in the text
#[derive(Debug, Clone, Default)]
pub struct ResolvedDate {
    pub span: Option<DateSpan>,
    pub keywords: Vec<String>,
}

static MONTH_WEEK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{1,2})월\s*(첫째주|둘째주|셋째주|넷째주|1주|2주|3주|4주)")
        .expect("month-week pattern is valid")
});

static MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})월").expect("month pattern is valid"));

/// Resolve temporal phrases in `text` relative to `today`
///
/// Phrases are mutually exclusive; the first recognized one wins. The
/// month-plus-ordinal-week form is checked before the bare month form so
/// that "6월 첫째주" yields the week window rather than the whole month.
pub fn resolve(text: &str, today: NaiveDate) -> ResolvedDate {
    let lower = text.to_lowercase();
    let days_from_sunday = today.weekday().num_days_from_sunday() as i64;

    if lower.contains("저번주") || lower.contains("지난주") {
        let start = today - Duration::days(7 + days_from_sunday);
        return ResolvedDate {
            span: Some(DateSpan::week_from(start)),
            keywords: vec!["저번주".to_string(), "지난주".to_string()],
        };
    }

    if lower.contains("이번주") {
        let start = today - Duration::days(days_from_sunday);
        return ResolvedDate {
            span: Some(DateSpan::week_from(start)),
            keywords: vec!["이번주".to_string()],
        };
    }

    if let Some(caps) = MONTH_WEEK_RE.captures(&lower) {
        let month: u32 = caps[1].parse().unwrap_or(0);
        let week_word = &caps[2];
        if let Some(first) = NaiveDate::from_ymd_opt(today.year(), month, 1) {
            let index = ordinal_week_index(week_word);
            // Window k starts at the Sunday-aligned boundary on/before the
            // 1st, so the first window may begin in the previous month.
            let offset = first.weekday().num_days_from_sunday() as i64;
            let start = first + Duration::days(index * 7 - offset);
            return ResolvedDate {
                span: Some(DateSpan::week_from(start)),
                keywords: vec![format!("{}월", month), week_word.to_string()],
            };
        }
        return ResolvedDate::default();
    }

    if let Some(caps) = MONTH_RE.captures(&lower) {
        let month: u32 = caps[1].parse().unwrap_or(0);
        if let Some(start) = NaiveDate::from_ymd_opt(today.year(), month, 1) {
            return ResolvedDate {
                span: Some(DateSpan {
                    start,
                    end: last_day_of_month(today.year(), month),
                }),
                keywords: vec![format!("{}월", month)],
            };
        }
        // Month number out of range: unrecognized rather than flagged
        return ResolvedDate::default();
    }

    if lower.contains("어제") {
        let day = today - Duration::days(1);
        return ResolvedDate {
            span: Some(DateSpan::single(day)),
            keywords: vec!["어제".to_string()],
        };
    }

    if lower.contains("오늘") {
        return ResolvedDate {
            span: Some(DateSpan::single(today)),
            keywords: vec!["오늘".to_string()],
        };
    }

    if lower.contains("내일") {
        let day = today + Duration::days(1);
        return ResolvedDate {
            span: Some(DateSpan::single(day)),
            keywords: vec!["내일".to_string()],
        };
    }

    ResolvedDate::default()
}

/// Map an ordinal week word to a zero-based window index
fn ordinal_week_index(word: &str) -> i64 {
    if word.contains("첫째") || word.contains('1') {
        0
    } else if word.contains("둘째") || word.contains('2') {
        1
    } else if word.contains("셋째") || word.contains('3') {
        2
    } else {
        3
    }
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    first_of_next
        .and_then(|d| d.pred_opt())
        .expect("month end exists for valid month")
}
