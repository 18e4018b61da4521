use bon::Builder;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;

/// Where the calendar dates and times of day are taken from.
#[derive(Copy, Clone, Debug, Default)]
pub enum Zone {
    /// System time zone.
    #[default]
    Local,

    Named(Tz),
}

impl Zone {
    pub fn naive(self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            Self::Local => instant.with_timezone(&Local).naive_local(),
            Self::Named(tz) => instant.with_timezone(&tz).naive_local(),
        }
    }
}

impl From<Option<Tz>> for Zone {
    fn from(tz: Option<Tz>) -> Self {
        tz.map_or(Self::Local, Self::Named)
    }
}

/// Date and time labelling.
#[derive(Clone, Debug, Builder)]
#[must_use]
pub struct Locale {
    #[builder(default)]
    pub zone: Zone,

    #[builder(into, default = Locale::DEFAULT_DATE_FORMAT.to_owned())]
    pub date_format: String,

    #[builder(into, default = Locale::DEFAULT_TIME_FORMAT.to_owned())]
    pub time_format: String,
}

impl Default for Locale {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Locale {
    pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";
    pub const DEFAULT_TIME_FORMAT: &str = "%H:%M";

    pub fn naive(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        self.zone.naive(instant)
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(&self.date_format).to_string()
    }

    pub fn format_time(&self, time: NaiveTime) -> String {
        time.format(&self.time_format).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_zone() {
        let locale = Locale::builder().zone(Zone::Named(chrono_tz::Europe::London)).build();
        let instant = "2024-07-01T23:30:00Z".parse().unwrap();
        let naive = locale.naive(instant);
        assert_eq!(locale.format_date(naive.date()), "02/07/2024");
        assert_eq!(locale.format_time(naive.time()), "00:30");
    }

    #[test]
    fn test_default_formats() {
        let locale = Locale::default();
        assert_eq!(locale.date_format, Locale::DEFAULT_DATE_FORMAT);
        assert_eq!(locale.time_format, Locale::DEFAULT_TIME_FORMAT);
    }

    #[test]
    fn test_custom_date_format() {
        let locale = Locale::builder().date_format("%Y-%m-%d").build();
        let date = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        assert_eq!(locale.format_date(date), "2025-02-01");
    }
}
