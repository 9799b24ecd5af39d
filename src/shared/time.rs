use std::{
    fmt::Display,
    ops::{Add, AddAssign},
};

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

pub const MIN: Time = Time(0);
pub const MAX: Time = Time(u32::MAX);

/// A clock instant stored as seconds since midnight of the service day.
///
/// Values past `24:00:00` are valid and describe service running after
/// midnight, the same way GTFS feeds do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(u32);

impl From<u32> for Time {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<NaiveTime> for Time {
    fn from(value: NaiveTime) -> Self {
        Self(value.num_seconds_from_midnight())
    }
}

impl Add<Duration> for Time {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign<Duration> for Time {
    fn add_assign(&mut self, rhs: Duration) {
        self.0 = self.0.saturating_add(rhs.0)
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hms_string())
    }
}

impl Serialize for Time {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hms_string())
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Time::from_hms(&raw).ok_or_else(|| de::Error::custom(format!("invalid time: {raw}")))
    }
}

impl Time {
    pub const fn from_seconds(secs: u32) -> Self {
        Self(secs)
    }

    /// Saturates at [`MAX`] for out of range input.
    pub const fn from_hm(hours: u32, minutes: u32) -> Self {
        Self(
            hours
                .saturating_mul(60 * 60)
                .saturating_add(minutes.saturating_mul(60)),
        )
    }

    pub const fn as_seconds(&self) -> u32 {
        self.0
    }

    /// Time elapsed since `earlier`, or `None` if `earlier` is later than `self`.
    pub const fn checked_since(&self, earlier: Time) -> Option<Duration> {
        match self.0.checked_sub(earlier.0) {
            Some(secs) => Some(Duration(secs)),
            None => None,
        }
    }

    pub fn to_hms_string(&self) -> String {
        let h = self.0 / 3600;
        let m = (self.0 % 3600) / 60;
        let s = self.0 % 60;
        format!("{:02}:{:02}:{:02}", h, m, s)
    }

    pub fn from_hms(time: &str) -> Option<Self> {
        const HOUR_TO_SEC: u32 = 60 * 60;
        const MINUTE_TO_SEC: u32 = 60;
        let mut split = time.split(':');
        let hours: u32 = split.next()?.parse().ok()?;
        let hours = hours.checked_mul(HOUR_TO_SEC)?;
        let minutes: u32 = split.next()?.parse().ok()?;
        let minutes = minutes.checked_mul(MINUTE_TO_SEC)?;
        let seconds: u32 = split.next()?.parse().ok()?;
        if split.next().is_some() {
            return None;
        }
        let seconds = hours.checked_add(minutes)?.checked_add(seconds)?;
        Some(Self(seconds))
    }
}

/// A non-negative span of whole seconds.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Duration(u32);

impl From<u32> for Duration {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Duration {
    pub const ZERO: Duration = Duration(0);

    pub const fn from_seconds(secs: u32) -> Self {
        Self(secs)
    }

    pub const fn from_minutes(minutes: u32) -> Self {
        Self(minutes.saturating_mul(60))
    }

    pub const fn from_hours(hours: u32) -> Self {
        Self(hours.saturating_mul(60 * 60))
    }

    pub const fn as_seconds(&self) -> u32 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn saturating_mul(self, rhs: u32) -> Self {
        Self(self.0.saturating_mul(rhs))
    }
}

impl Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s", self.0)
    }
}

impl Add for Duration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}
