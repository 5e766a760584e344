//! Recent dates rendered for native and library date controls.

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, Timelike};
use rand::Rng;

/// Dates are never generated before this day.
pub fn date_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 12, 16)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MIN)
}

/// Look-back window from "now".
pub const LOOKBACK_DAYS: i64 = 2 * 365;

/// One random instant with its three renderings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecentDate(NaiveDateTime);

impl RecentDate {
    /// Uniform instant in `[max(now - 2 years, epoch), now]`, local time.
    pub fn random() -> Self {
        Self::random_at(Local::now().naive_local())
    }

    pub fn random_at(now: NaiveDateTime) -> Self {
        let lower = std::cmp::max(now - Duration::days(LOOKBACK_DAYS), date_epoch());
        Self::random_between(lower, now)
    }

    pub fn random_between(lower: NaiveDateTime, upper: NaiveDateTime) -> Self {
        if upper <= lower {
            return Self(upper);
        }
        let span = (upper - lower).num_seconds();
        let offset = rand::thread_rng().gen_range(0..=span);
        Self(lower + Duration::seconds(offset))
    }

    pub fn instant(&self) -> NaiveDateTime {
        self.0
    }

    /// `YYYY-MM-DD`
    pub fn iso_date(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.0.year(), self.0.month(), self.0.day())
    }

    /// `YYYY-MM-DDTHH:MM`
    pub fn iso_date_time_local(&self) -> String {
        format!("{}T{:02}:{:02}", self.iso_date(), self.0.hour(), self.0.minute())
    }

    /// `DD.MM.YYYY`
    pub fn display(&self) -> String {
        format!("{:02}.{:02}.{:04}", self.0.day(), self.0.month(), self.0.year())
    }
}

pub fn generate_date_only() -> String {
    RecentDate::random().iso_date()
}

pub fn generate_date_time_local() -> String {
    RecentDate::random().iso_date_time_local()
}

pub fn generate_date_display() -> String {
    RecentDate::random().display()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn renderings_share_one_instant() {
        let date = RecentDate(at(2024, 3, 7, 9, 5));
        assert_eq!(date.iso_date(), "2024-03-07");
        assert_eq!(date.iso_date_time_local(), "2024-03-07T09:05");
        assert_eq!(date.display(), "07.03.2024");
    }

    #[test]
    fn epoch_bounds_window_shortly_after_it() {
        let now = at(2024, 1, 10, 12, 0);
        for _ in 0..500 {
            let date = RecentDate::random_at(now).instant();
            assert!(date >= date_epoch() && date <= now);
        }
    }

    #[test]
    fn two_year_window_applies_long_after_epoch() {
        let now = at(2030, 6, 1, 0, 0);
        let lower = now - Duration::days(LOOKBACK_DAYS);
        for _ in 0..500 {
            let date = RecentDate::random_at(now).instant();
            assert!(date >= lower && date <= now);
        }
    }

    #[test]
    fn empty_window_returns_upper_bound() {
        let now = at(2024, 5, 5, 5, 5);
        assert_eq!(RecentDate::random_between(now, now).instant(), now);
    }
}
