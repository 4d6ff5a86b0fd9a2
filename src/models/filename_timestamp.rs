use super::CurrentMoment;

/// Timestamp fields read positionally from a snapshot basename (`MMDD_HHmm...`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameTimestamp {
    pub date_part: String,
    pub time_part: String,
}

impl FilenameTimestamp {
    /// Extract the date part (chars 0-3) and time part (chars 5-8), 0-based.
    /// Char 4 is the separator and is never inspected. Short names yield
    /// short or empty parts rather than an error.
    pub fn parse(basename: &str) -> Self {
        Self {
            date_part: basename.chars().take(4).collect(),
            time_part: basename.chars().skip(5).take(4).collect(),
        }
    }

    /// First two characters of the time part
    pub fn hour(&self) -> String {
        self.time_part.chars().take(2).collect()
    }

    /// Exact string comparison against the moment, not numeric
    pub fn is_within(&self, moment: &CurrentMoment) -> bool {
        self.date_part == moment.month_day && self.hour() == moment.hour
    }
}

/// Strip a trailing `.webp` (or any given extension) from a file name
pub fn strip_extension<'a>(file_name: &'a str, extension: &str) -> &'a str {
    file_name
        .strip_suffix(extension)
        .and_then(|rest| rest.strip_suffix('.'))
        .unwrap_or(file_name)
}
