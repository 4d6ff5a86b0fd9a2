use chrono::{DateTime, Local, TimeZone};

/// Wall-clock instant reduced to the two fields the image window is keyed on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentMoment {
    /// Zero-padded month and day, e.g. "0315"
    pub month_day: String,
    /// Zero-padded 24-hour clock hour, e.g. "09"
    pub hour: String,
}

impl CurrentMoment {
    pub fn new(month_day: impl Into<String>, hour: impl Into<String>) -> Self {
        Self {
            month_day: month_day.into(),
            hour: hour.into(),
        }
    }

    /// Pure function reducing any zoned timestamp to a moment in that zone
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            month_day: datetime.format("%m%d").to_string(),
            hour: datetime.format("%H").to_string(),
        }
    }

    /// Read the local clock. The only place the process consults "now".
    pub fn now_local() -> Self {
        Self::from_datetime(&Local::now())
    }
}
