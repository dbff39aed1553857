//! Month-granularity dates and the labels built from them.

use crate::utils::error::{CvError, Result};
use chrono::{Datelike, Local, Month, NaiveDate};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})$").unwrap());

/// A calendar month, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    year: i32,
    month: Month,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let month = u8::try_from(month).ok().and_then(|m| Month::try_from(m).ok())?;
        Some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: Month::try_from(date.month() as u8).unwrap_or(Month::January),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month.number_from_month()
    }

    /// Whole months from `self` to `other`; negative when `other` is earlier.
    pub fn months_until(&self, other: &YearMonth) -> i64 {
        i64::from(other.year - self.year) * 12 + i64::from(other.month()) - i64::from(self.month())
    }

    /// `Jan 2020`
    pub fn short_label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month(), 1)
            .map(|first| first.format("%b %Y").to_string())
            .unwrap_or_default()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month())
    }
}

impl FromStr for YearMonth {
    type Err = CvError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CvError::InvalidDate {
            value: s.to_string(),
        };
        let caps = DATE_PATTERN.captures(s).ok_or_else(invalid)?;
        let year: i32 = caps[1].parse().map_err(|_| invalid())?;
        let month: u32 = caps[2].parse().map_err(|_| invalid())?;
        YearMonth::new(year, month).ok_or_else(invalid)
    }
}

/// End of a date span: an explicit month or the moving "present".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanEnd {
    Month(YearMonth),
    Present,
}

impl From<YearMonth> for SpanEnd {
    fn from(month: YearMonth) -> Self {
        SpanEnd::Month(month)
    }
}

impl FromStr for SpanEnd {
    type Err = CvError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("present") {
            Ok(SpanEnd::Present)
        } else {
            s.parse().map(SpanEnd::Month)
        }
    }
}

impl fmt::Display for SpanEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpanEnd::Month(month) => month.fmt(f),
            SpanEnd::Present => f.write_str("present"),
        }
    }
}

fn count(value: i64, unit: &str) -> String {
    format!("{} {}{}", value, unit, if value == 1 { "" } else { "s" })
}

/// Formats date ranges and elapsed durations relative to a fixed "today".
///
/// The clock is read once, when the formatter is built with [`DurationFormatter::now`],
/// so every label produced by one formatter agrees on what "present" means.
#[derive(Debug, Clone, Copy)]
pub struct DurationFormatter {
    today: NaiveDate,
}

impl DurationFormatter {
    pub fn now() -> Self {
        Self::at(Local::now().date_naive())
    }

    pub fn at(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn current_year(&self) -> i32 {
        self.today.year()
    }

    pub fn resolve(&self, end: SpanEnd) -> YearMonth {
        match end {
            SpanEnd::Month(month) => month,
            SpanEnd::Present => YearMonth::from_date(self.today),
        }
    }

    /// `Jan 2020–Jun 2021`
    pub fn format_range(&self, start: YearMonth, end: SpanEnd) -> String {
        let end_label = match end {
            SpanEnd::Month(month) => month.short_label(),
            SpanEnd::Present => "Present".to_string(),
        };
        format!("{}\u{2013}{}", start.short_label(), end_label)
    }

    /// `2 years, 6 months`. A span that ends before it starts is logged and
    /// rendered as an empty string so one bad date does not break the page.
    pub fn format_duration(&self, start: YearMonth, end: SpanEnd) -> String {
        let total = start.months_until(&self.resolve(end));
        if total < 0 {
            tracing::warn!(
                start = %start,
                end = %end,
                months = total,
                "End date precedes start date, duration omitted"
            );
            return String::new();
        }

        let (years, months) = (total / 12, total % 12);
        let parts: Vec<String> = [(years, "year"), (months, "month")]
            .into_iter()
            .filter(|(value, _)| *value > 0)
            .map(|(value, unit)| count(value, unit))
            .collect();

        if parts.is_empty() {
            "0 months".to_string()
        } else {
            parts.join(", ")
        }
    }

    pub fn format_range_str(&self, start: &str, end: &str) -> Result<String> {
        Ok(self.format_range(start.parse()?, end.parse()?))
    }

    pub fn format_duration_str(&self, start: &str, end: &str) -> Result<String> {
        Ok(self.format_duration(start.parse()?, end.parse()?))
    }

    /// Years of experience since `since`, e.g. `12 years`.
    pub fn professional_years(&self, since: i32) -> String {
        let years = i64::from(self.current_year() - since);
        if years <= 0 {
            "less than a year".to_string()
        } else {
            count(years, "year")
        }
    }
}

impl Default for DurationFormatter {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    fn formatter() -> DurationFormatter {
        DurationFormatter::at(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    #[test]
    fn test_parse_year_month() {
        let date = ym("2021-06");
        assert_eq!(date.year(), 2021);
        assert_eq!(date.month(), 6);
        assert_eq!(date.to_string(), "2021-06");

        assert!("2021-13".parse::<YearMonth>().is_err());
        assert!("2021-00".parse::<YearMonth>().is_err());
        assert!("2021-6".parse::<YearMonth>().is_err());
        assert!("2021-06-01".parse::<YearMonth>().is_err());
        assert!("21-06".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_short_label_uses_abbreviated_month() {
        assert_eq!(ym("2021-09").short_label(), "Sep 2021");
        assert_eq!(ym("1999-12").short_label(), "Dec 1999");
        assert_eq!(YearMonth::from_date(NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()).short_label(), "May 2024");
    }

    #[test]
    fn test_parse_span_end() {
        assert_eq!("present".parse::<SpanEnd>().unwrap(), SpanEnd::Present);
        assert_eq!("Present".parse::<SpanEnd>().unwrap(), SpanEnd::Present);
        assert_eq!(
            "2020-02".parse::<SpanEnd>().unwrap(),
            SpanEnd::Month(ym("2020-02"))
        );
        assert!("soon".parse::<SpanEnd>().is_err());
    }

    #[test]
    fn test_format_duration_examples() {
        let f = formatter();
        assert_eq!(f.format_duration(ym("2020-01"), ym("2020-01").into()), "0 months");
        assert_eq!(f.format_duration(ym("2020-01"), ym("2021-01").into()), "1 year");
        assert_eq!(
            f.format_duration(ym("2020-01"), ym("2022-07").into()),
            "2 years, 6 months"
        );
        assert_eq!(f.format_duration(ym("2020-01"), ym("2020-02").into()), "1 month");
        assert_eq!(f.format_duration(ym("2020-01"), ym("2020-04").into()), "3 months");
        assert_eq!(
            f.format_duration(ym("2019-12"), ym("2021-01").into()),
            "1 year, 1 month"
        );
    }

    #[test]
    fn test_format_duration_until_present() {
        let f = formatter();
        assert_eq!(f.format_duration(ym("2024-04"), SpanEnd::Present), "2 years, 6 months");
        assert_eq!(f.format_duration(ym("2026-10"), SpanEnd::Present), "0 months");
    }

    #[test]
    fn test_inverted_span_returns_empty() {
        let f = formatter();
        assert_eq!(f.format_duration(ym("2022-01"), ym("2021-12").into()), "");
        assert_eq!(f.format_duration(ym("2030-01"), SpanEnd::Present), "");
    }

    #[test]
    fn test_format_range() {
        let f = formatter();
        assert_eq!(
            f.format_range(ym("2020-01"), ym("2021-06").into()),
            "Jan 2020\u{2013}Jun 2021"
        );
        assert_eq!(f.format_range(ym("2023-09"), SpanEnd::Present), "Sep 2023\u{2013}Present");
    }

    #[test]
    fn test_string_variants() {
        let f = formatter();
        assert_eq!(f.format_duration_str("2020-01", "2022-07").unwrap(), "2 years, 6 months");
        assert_eq!(f.format_range_str("2020-01", "2021-06").unwrap(), "Jan 2020\u{2013}Jun 2021");
        assert!(matches!(
            f.format_duration_str("2020/01", "2022-07"),
            Err(CvError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_professional_years() {
        let f = formatter();
        assert_eq!(f.professional_years(2000), "26 years");
        assert_eq!(f.professional_years(2025), "1 year");
        assert_eq!(f.professional_years(2026), "less than a year");
    }
}
