use std::{
    cmp,
    fmt::Display,
    ops::Add,
};

use serde::{Deserialize, Serialize};

/// Ratio between travelled network distance and great-circle distance.
pub(crate) const CIRCUITY_FACTOR: f64 = 1.3;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Distance(f64);

impl PartialEq for Distance {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl Add for Distance {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Distance {
    pub const fn from_meters(distance: f64) -> Self {
        Self(distance)
    }

    pub const fn from_kilometers(distance: f64) -> Self {
        Self(distance * 1000.0)
    }

    pub const fn as_meters(&self) -> f64 {
        self.0
    }

    pub const fn as_kilometers(&self) -> f64 {
        self.0 / 1000.0
    }

    /// Length truncated to whole metres.
    pub fn whole_meters(&self) -> u64 {
        self.0.max(0.0) as u64
    }
}

/// Average vehicle speed, stored in metres per second.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Speed(f64);

impl PartialEq for Speed {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl PartialOrd for Speed {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl Speed {
    pub const fn from_meters_per_second(speed: f64) -> Self {
        Self(speed)
    }

    pub const fn from_kilometers_per_hour(speed: f64) -> Self {
        Self(speed / 3.6)
    }

    pub const fn as_meters_per_second(&self) -> f64 {
        self.0
    }

    /// Speed truncated to whole metres per second. Negative and NaN speeds become zero.
    pub fn whole_meters_per_second(&self) -> u64 {
        if self.0.is_nan() { 0 } else { self.0.max(0.0) as u64 }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}, {}", self.latitude, self.longitude))
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl Coordinate {
    pub fn euclidean_distance(&self, coord: &Self) -> Distance {
        const R: f64 = 6371.0;
        let dist_lat = f64::to_radians(coord.latitude - self.latitude);
        let dist_lon = f64::to_radians(coord.longitude - self.longitude);
        let a = f64::powi(f64::sin(dist_lat / 2.0), 2)
            + f64::cos(f64::to_radians(self.latitude))
                * f64::cos(f64::to_radians(coord.latitude))
                * f64::sin(dist_lon / 2.0)
                * f64::sin(dist_lon / 2.0);
        let c = 2.0 * f64::atan2(f64::sqrt(a), f64::sqrt(1.0 - a));
        Distance::from_kilometers(R * c)
    }

    /// Estimated distance a vehicle covers between two points on a street network.
    pub fn network_distance(&self, coord: &Self) -> Distance {
        Distance::from_meters(self.euclidean_distance(coord).as_meters() * CIRCUITY_FACTOR)
    }
}
