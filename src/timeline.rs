//! Time index construction for a single profiled day.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Sampling granularity of the time index.
///
/// The profile is sampled either once per hour or every 15 minutes,
/// matching the two chart resolutions the dashboard offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingInterval {
    /// One sample per hour.
    Hourly,
    /// One sample every 15 minutes.
    QuarterHour,
}

impl SamplingInterval {
    /// Minutes between consecutive samples.
    pub fn minutes(self) -> u32 {
        match self {
            Self::Hourly => 60,
            Self::QuarterHour => 15,
        }
    }

    /// Number of samples per hour.
    pub fn samples_per_hour(self) -> usize {
        match self {
            Self::Hourly => 1,
            Self::QuarterHour => 4,
        }
    }

    /// Config-facing name (`"hourly"` or `"quarter_hour"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::QuarterHour => "quarter_hour",
        }
    }

    /// Parses a config-facing name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "hourly" => Some(Self::Hourly),
            "quarter_hour" => Some(Self::QuarterHour),
            _ => None,
        }
    }
}

/// Error constructing a time index from an hour range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeRangeError {
    /// `start_hour > end_hour` selects nothing.
    EmptyRange {
        /// Requested start hour.
        start_hour: u8,
        /// Requested end hour.
        end_hour: u8,
    },
    /// Hour outside `0..=23`.
    HourOutOfRange {
        /// The offending hour value.
        hour: u8,
    },
}

impl fmt::Display for TimeRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRange {
                start_hour,
                end_hour,
            } => write!(
                f,
                "time range error: start hour {start_hour} is after end hour {end_hour} \
                 (the selection is empty)"
            ),
            Self::HourOutOfRange { hour } => {
                write!(f, "time range error: hour {hour} is outside 0..=23")
            }
        }
    }
}

impl std::error::Error for TimeRangeError {}

/// Strictly increasing, fixed-interval sequence of timestamps for one day.
///
/// Spans `date start_hour:00` through `date end_hour:00` **inclusive**, so a
/// full hourly day (0–23) has 24 points and a quarter-hour day has 93.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use loadprofile::timeline::{SamplingInterval, TimeIndex};
///
/// let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
/// let index = TimeIndex::build(date, 0, 23, SamplingInterval::Hourly).unwrap();
/// assert_eq!(index.len(), 24);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeIndex {
    timestamps: Vec<NaiveDateTime>,
    interval: SamplingInterval,
}

impl TimeIndex {
    /// Builds the index for `date` from `start_hour` to `end_hour` inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`TimeRangeError::HourOutOfRange`] if either hour exceeds 23,
    /// or [`TimeRangeError::EmptyRange`] if `start_hour > end_hour`. Both are
    /// rejected before any timestamps are produced.
    pub fn build(
        date: NaiveDate,
        start_hour: u8,
        end_hour: u8,
        interval: SamplingInterval,
    ) -> Result<Self, TimeRangeError> {
        for hour in [start_hour, end_hour] {
            if hour > 23 {
                return Err(TimeRangeError::HourOutOfRange { hour });
            }
        }
        if start_hour > end_hour {
            return Err(TimeRangeError::EmptyRange {
                start_hour,
                end_hour,
            });
        }

        let span_hours = usize::from(end_hour - start_hour);
        let count = span_hours * interval.samples_per_hour() + 1;
        let step = Duration::minutes(i64::from(interval.minutes()));

        // and_hms_opt cannot fail here: hours are validated above.
        let start = date
            .and_hms_opt(u32::from(start_hour), 0, 0)
            .unwrap_or_default();

        let mut timestamps = Vec::with_capacity(count);
        let mut ts = start;
        for _ in 0..count {
            timestamps.push(ts);
            ts = ts + step;
        }

        Ok(Self {
            timestamps,
            interval,
        })
    }

    /// Number of samples in the index.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether the index holds no samples.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// All timestamps in order.
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// Timestamp at position `i`, if in bounds.
    pub fn get(&self, i: usize) -> Option<NaiveDateTime> {
        self.timestamps.get(i).copied()
    }

    /// Sampling interval of this index.
    pub fn interval(&self) -> SamplingInterval {
        self.interval
    }
}
