//! Time formatter for COS request signing.
use chrono::{DateTime, Utc};

/// wrap of `chrono::Utc`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct UtcTime(DateTime<Utc>);

impl UtcTime {
    #[inline]
    pub fn new(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }

    /// Returns current utc time
    #[inline]
    pub fn now() -> Self {
        Self::new(Utc::now())
    }

    /// Seconds since the unix epoch.
    #[inline]
    pub fn timestamp(&self) -> i64 {
        self.0.timestamp()
    }

    /// format date to ISO8601, like`20230910T082643Z`
    ///
    /// Used in V4 signatures.
    #[inline]
    pub fn aws_format_time(&self) -> String {
        self.0.format("%Y%m%dT%H%M%SZ").to_string()
    }

    /// format date to aws date.
    ///
    /// Used in V4 signatures
    #[inline]
    pub fn aws_format_date(&self) -> String {
        self.0.format("%Y%m%d").to_string()
    }
}

impl From<DateTime<Utc>> for UtcTime {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::new(datetime)
    }
}

impl Default for UtcTime {
    /// default: current utc time.
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::UtcTime;

    #[test]
    fn test_format() {
        let t: UtcTime = Utc.with_ymd_and_hms(2023, 9, 10, 8, 26, 43).unwrap().into();
        assert_eq!(t.aws_format_time(), "20230910T082643Z");
        assert_eq!(t.aws_format_date(), "20230910");
        assert_eq!(t.timestamp(), 1694334403);
    }
}
