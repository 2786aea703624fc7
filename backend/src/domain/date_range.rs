//! Calendar arithmetic for period reports.
//!
//! Pure functions mapping a calendar date to the inclusive bounds of the
//! week, month or year containing it. Weeks start on Monday regardless of
//! locale.

use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate};

/// Fixed textual date format accepted by the API.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Failures raised while resolving a date range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateRangeError {
    /// The input text is not a `YYYY-MM-DD` date.
    #[error("invalid date format: {value}")]
    InvalidFormat { value: String },
    /// The range would extend past the representable calendar.
    #[error("date range around {date} is out of range")]
    OutOfRange { date: NaiveDate },
}

/// Parse a `YYYY-MM-DD` date.
///
/// # Examples
/// ```
/// use calendar_backend::domain::date_range::parse_date;
///
/// let date = parse_date("2024-08-15").expect("valid date");
/// assert_eq!(date.to_string(), "2024-08-15");
/// assert!(parse_date("not-a-date").is_err());
/// ```
pub fn parse_date(value: &str) -> Result<NaiveDate, DateRangeError> {
    let invalid = || DateRangeError::InvalidFormat {
        value: value.to_owned(),
    };
    if !has_date_shape(value) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}

/// Four-digit year followed by `-`, with only digits and dashes throughout.
fn has_date_shape(value: &str) -> bool {
    let Some((year, _)) = value.split_once('-') else {
        return false;
    };
    year.len() == 4 && value.bytes().all(|byte| byte.is_ascii_digit() || byte == b'-')
}

/// Inclusive `[start, end]` span of calendar days.
///
/// ## Invariants
/// - `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Range covering exactly one day.
    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// Monday through Sunday of the week containing `date`.
    ///
    /// # Examples
    /// ```
    /// use calendar_backend::domain::date_range::{DateRange, parse_date};
    ///
    /// let range = DateRange::week_of(parse_date("2024-08-15").unwrap()).unwrap();
    /// assert_eq!(range.to_string(), "2024-08-12 - 2024-08-18");
    /// ```
    pub fn week_of(date: NaiveDate) -> Result<Self, DateRangeError> {
        let offset = u64::from(date.weekday().num_days_from_monday());
        let start = date
            .checked_sub_days(Days::new(offset))
            .ok_or(DateRangeError::OutOfRange { date })?;
        let end = start
            .checked_add_days(Days::new(6))
            .ok_or(DateRangeError::OutOfRange { date })?;
        Ok(Self { start, end })
    }

    /// First through last day of the month containing `date`.
    pub fn month_of(date: NaiveDate) -> Result<Self, DateRangeError> {
        let start = date.with_day(1).ok_or(DateRangeError::OutOfRange { date })?;
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next_month| next_month.pred_opt())
            .ok_or(DateRangeError::OutOfRange { date })?;
        Ok(Self { start, end })
    }

    /// January 1 through December 31 of the year containing `date`.
    pub fn year_of(date: NaiveDate) -> Result<Self, DateRangeError> {
        let year = date.year();
        let start =
            NaiveDate::from_ymd_opt(year, 1, 1).ok_or(DateRangeError::OutOfRange { date })?;
        let end =
            NaiveDate::from_ymd_opt(year, 12, 31).ok_or(DateRangeError::OutOfRange { date })?;
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the range, counting both endpoints.
    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every day from `start` to `end`, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// Multi-day period served by the grouped report endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Week,
    Month,
    Year,
}

impl Period {
    /// Key naming the period in report envelopes.
    pub fn label(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Inclusive range of this period containing `date`.
    pub fn range_for(self, date: NaiveDate) -> Result<DateRange, DateRangeError> {
        match self {
            Self::Week => DateRange::week_of(date),
            Self::Month => DateRange::month_of(date),
            Self::Year => DateRange::year_of(date),
        }
    }

    /// Parse `value` and resolve the period containing it.
    pub fn resolve(self, value: &str) -> Result<DateRange, DateRangeError> {
        self.range_for(parse_date(value)?)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(value: &str) -> NaiveDate {
        parse_date(value).expect("test date")
    }

    #[rstest]
    #[case("2024-08-15", "2024-08-12", "2024-08-18")]
    #[case("2024-08-12", "2024-08-12", "2024-08-18")]
    #[case("2024-08-18", "2024-08-12", "2024-08-18")]
    #[case("2024-12-31", "2024-12-30", "2025-01-05")]
    #[case("2023-01-01", "2022-12-26", "2023-01-01")]
    fn week_runs_monday_to_sunday(#[case] input: &str, #[case] start: &str, #[case] end: &str) {
        let range = DateRange::week_of(date(input)).expect("week range");

        assert_eq!(range.start(), date(start));
        assert_eq!(range.end(), date(end));
        assert_eq!(range.start().weekday(), chrono::Weekday::Mon);
        assert!(range.contains(date(input)));
    }

    #[rstest]
    #[case("2024-08-15", "2024-08-01", "2024-08-31")]
    #[case("2024-02-15", "2024-02-01", "2024-02-29")]
    #[case("2023-02-15", "2023-02-01", "2023-02-28")]
    #[case("2000-02-10", "2000-02-01", "2000-02-29")]
    #[case("1900-02-10", "1900-02-01", "1900-02-28")]
    #[case("2024-04-30", "2024-04-01", "2024-04-30")]
    #[case("2024-12-25", "2024-12-01", "2024-12-31")]
    fn month_spans_first_to_last_day(#[case] input: &str, #[case] start: &str, #[case] end: &str) {
        let range = DateRange::month_of(date(input)).expect("month range");

        assert_eq!((range.start(), range.end()), (date(start), date(end)));
    }

    #[rstest]
    #[case("2024-08-15")]
    #[case("2023-01-01")]
    #[case("2023-12-31")]
    fn year_spans_january_to_december(#[case] input: &str) {
        let given = date(input);
        let range = DateRange::year_of(given).expect("year range");

        assert_eq!(range.start(), NaiveDate::from_ymd_opt(given.year(), 1, 1).expect("jan 1"));
        assert_eq!(range.end(), NaiveDate::from_ymd_opt(given.year(), 12, 31).expect("dec 31"));
    }

    #[rstest]
    #[case("not-a-date")]
    #[case("")]
    #[case("2024/08/15")]
    #[case("2024-13-01")]
    #[case("2023-02-29")]
    #[case("15-08-2024")]
    #[case(" 2024-08-15")]
    #[case("+2024-08-15")]
    #[case("02024-08-15")]
    #[case("2024-08-15 ")]
    #[case("2024- 8-15")]
    fn rejects_malformed_text(#[case] input: &str) {
        let err = parse_date(input).expect_err("malformed date");
        assert_eq!(
            err,
            DateRangeError::InvalidFormat {
                value: input.to_owned()
            }
        );
    }

    #[rstest]
    #[case(Period::Week, 7)]
    #[case(Period::Month, 29)]
    #[case(Period::Year, 366)]
    fn days_cover_range_without_gaps(#[case] period: Period, #[case] expected: i64) {
        let range = period.resolve("2024-02-15").expect("range");
        let days: Vec<NaiveDate> = range.days().collect();

        assert_eq!(range.day_count(), expected);
        assert_eq!(days.len() as i64, expected);
        assert_eq!(days.first().copied(), Some(range.start()));
        assert_eq!(days.last().copied(), Some(range.end()));
        assert!(days.windows(2).all(|pair| pair[0].succ_opt() == Some(pair[1])));
    }

    #[rstest]
    #[case("2024-8-5", "2024-08-05")]
    #[case("2024-08-5", "2024-08-05")]
    fn accepts_unpadded_month_and_day(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(parse_date(input).expect("unpadded date").to_string(), expected);
    }

    #[rstest]
    fn single_day_range_has_one_day() {
        let range = DateRange::single(date("2024-08-15"));
        assert_eq!(range.day_count(), 1);
        assert_eq!(range.days().collect::<Vec<_>>(), vec![date("2024-08-15")]);
    }

    #[rstest]
    fn display_joins_bounds() {
        let range = Period::Month.resolve("2024-08-15").expect("range");
        assert_eq!(range.to_string(), "2024-08-01 - 2024-08-31");
        assert_eq!(Period::Month.to_string(), "month");
    }

    #[rstest]
    fn week_at_calendar_minimum_is_out_of_range() {
        let err = DateRange::week_of(NaiveDate::MIN).expect_err("cannot step before MIN");
        assert!(matches!(err, DateRangeError::OutOfRange { .. }));
    }
}
