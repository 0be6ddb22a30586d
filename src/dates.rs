use chrono::{Datelike, Days, Local, NaiveDate};
use std::fmt;

/// Offset between Gregorian and Minguo (ROC) years
pub const MINGUO_OFFSET: i32 = 1911;

/// Calendar system a [`CalendarDate`] is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Calendar {
    Gregorian,
    /// Taiwanese calendar, year = Gregorian year - 1911
    Minguo,
}

/// A (year, month, day) triple tagged with its calendar.
///
/// Month and day are not range-checked: this is a format carrier, not a
/// calendar validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub calendar: Calendar,
}

impl CalendarDate {
    pub fn gregorian(year: i32, month: u32, day: u32) -> Self {
        Self {
            year,
            month,
            day,
            calendar: Calendar::Gregorian,
        }
    }

    pub fn minguo(year: i32, month: u32, day: u32) -> Self {
        Self {
            year,
            month,
            day,
            calendar: Calendar::Minguo,
        }
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self::gregorian(date.year(), date.month(), date.day())
    }

    pub fn to_minguo(self) -> Self {
        match self.calendar {
            Calendar::Minguo => self,
            Calendar::Gregorian => Self::minguo(self.year - MINGUO_OFFSET, self.month, self.day),
        }
    }

    pub fn to_gregorian(self) -> Self {
        match self.calendar {
            Calendar::Gregorian => self,
            Calendar::Minguo => Self::gregorian(self.year + MINGUO_OFFSET, self.month, self.day),
        }
    }

    /// Returns the real calendar day, if month and day are in range
    pub fn to_naive(self) -> Option<NaiveDate> {
        let g = self.to_gregorian();
        NaiveDate::from_ymd_opt(g.year, g.month, g.day)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.calendar {
            Calendar::Minguo => write!(f, "{}/{:02}/{:02}", self.year, self.month, self.day),
            Calendar::Gregorian => write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day),
        }
    }
}

/// A date as it will be typed into the search form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormDate {
    /// Converted from a Gregorian date or computed as a default
    Converted(CalendarDate),
    /// Passed through unchanged (already Minguo, or unparseable)
    Verbatim(String),
}

impl fmt::Display for FormDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormDate::Converted(date) => write!(f, "{date}"),
            FormDate::Verbatim(text) => f.write_str(text),
        }
    }
}

/// Normalizes a single configured date into the form's Minguo format.
///
/// Input containing a hyphen is read as Gregorian `YYYY-MM-DD` and converted,
/// e.g. `2025-03-07` becomes `114/03/07`. Anything else, including hyphenated
/// input that fails to parse, is returned verbatim.
pub fn normalize(input: &str) -> FormDate {
    if !input.contains('-') {
        return FormDate::Verbatim(input.to_string());
    }

    match parse_gregorian(input) {
        Some(date) => FormDate::Converted(date.to_minguo()),
        None => {
            ::log::debug!("Could not parse `{}` as YYYY-MM-DD, passing through", input);
            FormDate::Verbatim(input.to_string())
        }
    }
}

fn parse_gregorian(input: &str) -> Option<CalendarDate> {
    let mut parts = input.trim().split('-');
    let year = parts.next()?.trim().parse::<i32>().ok()?;
    let month = parts.next()?.trim().parse::<u32>().ok()?;
    let day = parts.next()?.trim().parse::<u32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(CalendarDate::gregorian(year, month, day))
}

/// The start and end dates submitted with the search form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: FormDate,
    pub end: FormDate,
}

impl DateRange {
    /// Resolves configured dates against today's local date
    pub fn resolve(start: Option<&str>, end: Option<&str>, default_span_days: u32) -> Self {
        Self::resolve_on(start, end, default_span_days, Local::now().date_naive())
    }

    /// Resolves configured dates, defaulting a missing or blank start to
    /// `today` and a missing or blank end to `today + default_span_days`.
    pub fn resolve_on(
        start: Option<&str>,
        end: Option<&str>,
        default_span_days: u32,
        today: NaiveDate,
    ) -> Self {
        let span_end = today
            .checked_add_days(Days::new(u64::from(default_span_days)))
            .unwrap_or(NaiveDate::MAX);

        Self {
            start: resolve_side(start, today),
            end: resolve_side(end, span_end),
        }
    }
}

fn resolve_side(input: Option<&str>, fallback: NaiveDate) -> FormDate {
    match input.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => normalize(value),
        None => FormDate::Converted(CalendarDate::from_naive(fallback).to_minguo()),
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~ {}", self.start, self.end)
    }
}
