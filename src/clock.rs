use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Source of wall-clock time for the tracker
pub trait Clock {
    fn now(&self) -> DateTime<Local>;

    /// Calendar date of `now()`
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// The real system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Whole seconds between two instants, truncated toward zero (never negative)
pub fn elapsed_seconds(from: DateTime<Local>, to: DateTime<Local>) -> i64 {
    to.signed_duration_since(from).num_seconds().max(0)
}

/// Format seconds as "Xh Ym Zs" (omits 0 values, drops seconds past the hour)
pub fn format_seconds(secs: i64) -> String {
    if secs <= 0 {
        return "0s".to_string();
    }

    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if seconds > 0 && hours == 0 {
        parts.push(format!("{}s", seconds));
    }

    if parts.is_empty() {
        "0s".to_string()
    } else {
        parts.join(" ")
    }
}

/// Parse a stored timestamp.
///
/// RFC 3339 is what we write; offset-less ISO timestamps (older data files)
/// are read as local time.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Local));
    }

    let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()?;
    Local.from_local_datetime(&naive).earliest()
}

/// Serde adapter for timestamps that tolerates the legacy offset-less format
pub mod serde_timestamp {
    use chrono::{DateTime, Local};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Local>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&dt.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Local>, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_timestamp(&text)
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", text)))
    }

    pub mod option {
        use chrono::{DateTime, Local};
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            dt: &Option<DateTime<Local>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match dt {
                Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Local>>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(text) if text.is_empty() => Ok(None),
                Some(text) => crate::clock::parse_timestamp(&text)
                    .map(Some)
                    .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", text))),
            }
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::Clock;
    use chrono::{DateTime, Duration, Local, TimeZone};
    use std::cell::Cell;

    /// Clock that only moves when told to
    #[derive(Debug)]
    pub struct ManualClock {
        now: Cell<DateTime<Local>>,
    }

    impl ManualClock {
        pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
            let now = Local
                .with_ymd_and_hms(year, month, day, hour, minute, 0)
                .earliest()
                .expect("valid local time");
            Self { now: Cell::new(now) }
        }

        pub fn advance(&self, seconds: i64) {
            self.now.set(self.now.get() + Duration::seconds(seconds));
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Local> {
            self.now.get()
        }
    }

    impl Clock for &ManualClock {
        fn now(&self) -> DateTime<Local> {
            self.now.get()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Duration, Timelike};

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0), "0s");
        assert_eq!(format_seconds(-5), "0s");
        assert_eq!(format_seconds(45), "45s");
        assert_eq!(format_seconds(60), "1m");
        assert_eq!(format_seconds(125), "2m 5s");
        assert_eq!(format_seconds(3600), "1h");
        // Seconds are dropped once we pass the hour
        assert_eq!(format_seconds(3905), "1h 5m");
        assert_eq!(format_seconds(7230), "2h");
    }

    #[test]
    fn test_elapsed_seconds_truncates() {
        let start = Local::now();
        let end = start + Duration::milliseconds(2999);
        assert_eq!(elapsed_seconds(start, end), 2);
        assert_eq!(elapsed_seconds(end, start), 0);
    }

    #[test]
    fn test_parse_timestamp_rfc3339() {
        let now = Local::now();
        let parsed = parse_timestamp(&now.to_rfc3339()).unwrap();
        assert_eq!(parsed, now);
    }

    #[test]
    fn test_parse_timestamp_legacy_iso() {
        let parsed = parse_timestamp("2024-03-05T09:15:30.123456").unwrap();
        assert_eq!(parsed.date_naive().day(), 5);
        assert_eq!(parsed.hour(), 9);
        assert_eq!(parsed.minute(), 15);
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_manual_clock_advances() {
        let clock = testing::ManualClock::at(2024, 3, 5, 9, 0);
        let before = clock.now();
        clock.advance(90);
        assert_eq!(elapsed_seconds(before, clock.now()), 90);
        assert_eq!(clock.today().day(), 5);
    }
}
