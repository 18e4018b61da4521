use chrono_tz::Tz;
use clap::Parser;

use crate::core::locale::Locale;

#[derive(Parser)]
pub struct LocaleArgs {
    /// IANA time zone for dates and times, the system one when omitted.
    #[clap(long, env = "TIME_ZONE", value_parser = parse_time_zone)]
    time_zone: Option<Tz>,

    /// Date heading format, `strftime`-style.
    #[clap(long, env = "DATE_FORMAT", default_value = Locale::DEFAULT_DATE_FORMAT)]
    date_format: String,
}

impl LocaleArgs {
    pub fn locale(&self) -> Locale {
        Locale::builder().zone(self.time_zone.into()).date_format(&self.date_format).build()
    }
}

fn parse_time_zone(name: &str) -> Result<Tz, String> {
    name.parse().map_err(|error| format!("`{name}`: {error}"))
}
