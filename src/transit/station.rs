use std::sync::Arc;

use crate::{
    shared::{
        geo::Coordinate,
        time::{self, Duration, Time},
    },
    transit,
};

const REGULAR_PROBABILITY: f64 = 1.0;
const EQUALLY_LIKELY_PROBABILITY: f64 = 0.5;

/// A time-of-day window during which vehicles wait a given time at a station.
///
/// A probability below one marks a hail-and-ride stop: vehicles only halt
/// when somebody is waiting, so the expected dwell is scaled down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dwell {
    from: Time,
    to: Time,
    dwell_time: Duration,
    probability: f64,
}

impl Dwell {
    pub fn new(
        from: Time,
        to: Time,
        dwell_time: Duration,
        probability: f64,
    ) -> Result<Self, transit::Error> {
        if from >= to {
            return Err(transit::Error::InvalidDwell("window must end after it starts"));
        }
        if dwell_time.is_zero() {
            return Err(transit::Error::InvalidDwell("dwell time must be positive"));
        }
        // `to > from` is checked above
        let window = to.checked_since(from).unwrap_or_default();
        if dwell_time > window {
            return Err(transit::Error::InvalidDwell(
                "dwell time can not exceed its window",
            ));
        }
        if !(0.0..=1.0).contains(&probability) {
            return Err(transit::Error::InvalidDwell("probability must be within [0, 1]"));
        }
        Ok(Self {
            from,
            to,
            dwell_time,
            probability,
        })
    }

    pub fn regular(from: Time, to: Time, dwell_time: Duration) -> Result<Self, transit::Error> {
        Self::new(from, to, dwell_time, REGULAR_PROBABILITY)
    }

    pub fn all_day_regular(dwell_time: Duration) -> Result<Self, transit::Error> {
        Self::regular(time::MIN, time::MAX, dwell_time)
    }

    pub fn hail(
        from: Time,
        to: Time,
        dwell_time: Duration,
        probability: f64,
    ) -> Result<Self, transit::Error> {
        Self::new(from, to, dwell_time, probability)
    }

    pub fn all_day_hail(dwell_time: Duration, probability: f64) -> Result<Self, transit::Error> {
        Self::hail(time::MIN, time::MAX, dwell_time, probability)
    }

    pub fn equally_likely(
        from: Time,
        to: Time,
        dwell_time: Duration,
    ) -> Result<Self, transit::Error> {
        Self::new(from, to, dwell_time, EQUALLY_LIKELY_PROBABILITY)
    }

    pub fn all_day_equally_likely(dwell_time: Duration) -> Result<Self, transit::Error> {
        Self::equally_likely(time::MIN, time::MAX, dwell_time)
    }

    pub fn from(&self) -> Time {
        self.from
    }

    pub fn to(&self) -> Time {
        self.to
    }

    pub fn dwell_time(&self) -> Duration {
        self.dwell_time
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn is_hail(&self) -> bool {
        self.probability < REGULAR_PROBABILITY
    }

    pub fn is_regular(&self) -> bool {
        self.probability == REGULAR_PROBABILITY
    }

    /// Whether `time` lies inside `[from, to]`, both ends included.
    pub fn applies(&self, time: Time) -> bool {
        self.from <= time && time <= self.to
    }

    /// Whether the two windows share more than a single boundary instant.
    pub fn overlaps(&self, other: &Dwell) -> bool {
        self.from < other.to && other.from < self.to
    }
}

/// A place on the network where vehicles stop.
#[derive(Debug, Clone, Default)]
pub struct Station {
    /// Unique external identifier.
    pub id: Arc<str>,
    /// Display name, also used as the default trip headsign.
    pub name: Arc<str>,
    pub coordinate: Coordinate,
    /// Fixed dwell applied by [`crate::generator::FixedDwellTimeResolver`].
    pub dwell: Duration,
    /// Time-dependent dwell policy, sorted by window start.
    dwells: Box<[Dwell]>,
}

impl PartialEq for Station {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Station {}

impl Station {
    pub fn new(id: impl Into<Arc<str>>, name: impl Into<Arc<str>>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn at(mut self, coordinate: Coordinate) -> Self {
        self.coordinate = coordinate;
        self
    }

    pub fn with_dwell(mut self, dwell: Duration) -> Self {
        self.dwell = dwell;
        self
    }

    /// Attaches a time-dependent dwell policy. Windows may touch but not overlap.
    pub fn with_dwells(mut self, mut dwells: Vec<Dwell>) -> Result<Self, transit::Error> {
        dwells.sort_by_key(|dwell| dwell.from);
        if dwells.windows(2).any(|pair| pair[0].overlaps(&pair[1])) {
            return Err(transit::Error::OverlappingDwells(self.id.to_string()));
        }
        self.dwells = dwells.into();
        Ok(self)
    }

    pub fn dwells(&self) -> &[Dwell] {
        &self.dwells
    }
}
