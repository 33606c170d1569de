//! Shared utility functions for GMS crates.

/// Date utility functions
pub mod dates {
    use chrono::{DateTime, Datelike, Months, NaiveDate};

    /// Month (1-based) in which a hydrological year begins.
    pub const HYDROLOGICAL_YEAR_START_MONTH: u32 = 6;

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
    }

    /// Parse the loosely formatted dates returned by the well history API.
    ///
    /// Accepts plain "YYYY-MM-DD", RFC 3339 timestamps ("2021-06-01T00:00:00.000Z")
    /// and "YYYY-MM-DD HH:MM:SS". Only the calendar date is kept.
    pub fn parse_api_date(s: &str) -> anyhow::Result<NaiveDate> {
        let trimmed = s.trim();
        if let Ok(date) = parse_date(trimmed) {
            return Ok(date);
        }
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(timestamp.date_naive());
        }
        match trimmed.get(..10) {
            Some(prefix) => parse_date(prefix),
            None => anyhow::bail!("unrecognised date: {trimmed}"),
        }
    }

    /// Get the hydrological year for a given date.
    /// Hydrological year runs Jun 1 to May 31.
    /// e.g., Jun 1 2022 -> hydrological year 2022, May 31 2023 -> hydrological year 2022
    pub fn hydrological_year_for_date(date: &NaiveDate) -> i32 {
        let month = date.month();
        let year = date.year();
        if month >= HYDROLOGICAL_YEAR_START_MONTH {
            year
        } else {
            year - 1
        }
    }

    /// Label a hydrological year the way reports show it, e.g. "2022-2023".
    pub fn hydrological_year_label(year: i32) -> String {
        format!("{}-{}", year, year + 1)
    }

    /// Shift a date forward by whole calendar months, clamping to the month end
    /// (Jan 31 + 1 month = Feb 28/29).
    pub fn add_months(date: &NaiveDate, months: u32) -> Option<NaiveDate> {
        date.checked_add_months(Months::new(months))
    }

    /// English month name for a 1-based month number.
    pub fn month_name(month: u32) -> &'static str {
        match month {
            1 => "January",
            2 => "February",
            3 => "March",
            4 => "April",
            5 => "May",
            6 => "June",
            7 => "July",
            8 => "August",
            9 => "September",
            10 => "October",
            11 => "November",
            12 => "December",
            _ => "",
        }
    }

}
