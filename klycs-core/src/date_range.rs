//! Date window for selecting events.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::constants::DEFAULT_WINDOW_DAYS;

/// Date window for selecting events.
/// None values mean unbounded in that direction.
#[derive(Debug, Clone)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl Default for DateRange {
    /// Default window: ±DEFAULT_WINDOW_DAYS from now
    fn default() -> Self {
        let now = Utc::now();
        DateRange {
            from: Some(now - Duration::days(DEFAULT_WINDOW_DAYS)),
            to: Some(now + Duration::days(DEFAULT_WINDOW_DAYS)),
        }
    }
}

impl DateRange {
    /// Parse CLI date arguments into a DateRange.
    /// - `from`: "start" for unbounded, or YYYY-MM-DD
    /// - `to`: YYYY-MM-DD, defaults to +DEFAULT_WINDOW_DAYS if not specified
    pub fn from_args(from: Option<&str>, to: Option<&str>) -> Result<Self, String> {
        let now = Utc::now();

        let from_dt = match from {
            Some("start") => None, // Unbounded past
            Some(s) => Some(parse_date_start(s)?),
            None => Some(now - Duration::days(DEFAULT_WINDOW_DAYS)),
        };

        let to_dt = match to {
            Some(s) => Some(parse_date_end(s)?),
            None => Some(now + Duration::days(DEFAULT_WINDOW_DAYS)),
        };

        Ok(DateRange {
            from: from_dt,
            to: to_dt,
        })
    }

    /// Whether an instant falls inside the window.
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| t >= from) && self.to.is_none_or(|to| t <= to)
    }

    /// First calendar day of the window (Unix epoch when unbounded).
    pub fn start_date(&self) -> NaiveDate {
        self.from
            .map(|f| f.date_naive())
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(1970, 1, 1).unwrap())
    }

    /// Last calendar day of the window (far future when unbounded).
    pub fn end_date(&self) -> NaiveDate {
        self.to
            .map(|t| t.date_naive())
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(2100, 1, 1).unwrap())
    }
}

/// Parse YYYY-MM-DD as start of day in UTC
fn parse_date_start(s: &str) -> Result<DateTime<Utc>, String> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))?;
    Ok(date.and_hms_opt(0, 0, 0).unwrap().and_utc())
}

/// Parse YYYY-MM-DD as end of day in UTC
fn parse_date_end(s: &str) -> Result<DateTime<Utc>, String> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))?;
    Ok(date.and_hms_opt(23, 59, 59).unwrap().and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn from_args_parses_explicit_bounds() {
        let range = DateRange::from_args(Some("2024-01-01"), Some("2024-01-31")).unwrap();
        assert_eq!(
            range.from,
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            range.to,
            Some(Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap())
        );
    }

    #[test]
    fn from_args_start_means_unbounded_past() {
        let range = DateRange::from_args(Some("start"), Some("2024-01-31")).unwrap();
        assert!(range.from.is_none());
        assert_eq!(range.start_date(), NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
    }

    #[test]
    fn from_args_rejects_bad_dates() {
        assert!(DateRange::from_args(Some("tomorrow"), None).is_err());
        assert!(DateRange::from_args(None, Some("31/01/2024")).is_err());
    }

    #[test]
    fn contains_is_inclusive() {
        let range = DateRange::from_args(Some("2024-01-01"), Some("2024-01-31")).unwrap();
        assert!(range.contains(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
        assert!(range.contains(Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()));
        assert!(range.contains(Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap()));
        assert!(!range.contains(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()));
    }
}
