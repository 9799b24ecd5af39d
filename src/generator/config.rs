use serde::{Deserialize, Serialize};

use crate::{
    generator::Error,
    shared::{
        geo::Speed,
        time::{Duration, Time},
    },
    transit::Direction,
};

pub const DEFAULT_AVERAGE_SPEED: Speed = Speed::from_kilometers_per_hour(36.0);
pub const DEFAULT_MAX_TIME_POINTS: usize = 10_000;

/// Half-open span `[start, end)` during which vehicles are dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceWindow {
    pub start: Time,
    pub end: Time,
}

impl ServiceWindow {
    pub fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.end <= self.start {
            return Err(Error::InvalidConstraint(
                "service window must end after it starts",
            ));
        }
        Ok(())
    }

    /// Number of dispatch instants `start + k * headway` that fall before `end`.
    pub fn dispatch_count(&self, headway: Duration) -> usize {
        match self.end.checked_since(self.start) {
            Some(span) if !headway.is_zero() => {
                span.as_seconds().div_ceil(headway.as_seconds()) as usize
            }
            _ => 0,
        }
    }
}

/// Service pattern requested for a line.
///
/// Without an outbound window the line is operated as a loop on its inbound route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitConstraints {
    pub inbound: ServiceWindow,
    #[serde(default)]
    pub outbound: Option<ServiceWindow>,
    pub headway: Duration,
    #[serde(default)]
    pub min_layover: Duration,
}

impl TransitConstraints {
    pub fn loop_service(inbound: ServiceWindow, headway: Duration, min_layover: Duration) -> Self {
        Self {
            inbound,
            outbound: None,
            headway,
            min_layover,
        }
    }

    pub fn bidirectional(
        inbound: ServiceWindow,
        outbound: ServiceWindow,
        headway: Duration,
        min_layover: Duration,
    ) -> Self {
        Self {
            inbound,
            outbound: Some(outbound),
            headway,
            min_layover,
        }
    }

    pub fn is_bidirectional(&self) -> bool {
        self.outbound.is_some()
    }

    pub fn window(&self, direction: Direction) -> Option<ServiceWindow> {
        match direction {
            Direction::Inbound => Some(self.inbound),
            Direction::Outbound => self.outbound,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.headway.is_zero() {
            return Err(Error::InvalidConstraint("headway must be positive"));
        }
        self.inbound.validate()?;
        if let Some(outbound) = &self.outbound {
            outbound.validate()?;
        }
        Ok(())
    }

    /// Total number of time points the windows discretize into.
    pub fn time_point_count(&self) -> usize {
        self.inbound.dispatch_count(self.headway)
            + self
                .outbound
                .map_or(0, |outbound| outbound.dispatch_count(self.headway))
    }
}

/// What a stop factory does when no dwell policy matches an arrival.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingDwell {
    /// Abort generation with [`Error::UnresolvedDwell`].
    #[default]
    Fail,
    /// Depart at the arrival instant.
    Zero,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub average_speed: Speed,
    /// Upper bound on discretized time points, rejects runaway windows up front.
    pub max_time_points: usize,
    pub missing_dwell: MissingDwell,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            average_speed: DEFAULT_AVERAGE_SPEED,
            max_time_points: DEFAULT_MAX_TIME_POINTS,
            missing_dwell: MissingDwell::default(),
        }
    }
}

impl Config {
    pub fn with_average_speed(mut self, average_speed: Speed) -> Self {
        self.average_speed = average_speed;
        self
    }

    pub fn with_missing_dwell(mut self, missing_dwell: MissingDwell) -> Self {
        self.missing_dwell = missing_dwell;
        self
    }

    pub fn with_max_time_points(mut self, max_time_points: usize) -> Self {
        self.max_time_points = max_time_points;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: (u32, u32), end: (u32, u32)) -> ServiceWindow {
        ServiceWindow::new(Time::from_hm(start.0, start.1), Time::from_hm(end.0, end.1))
    }

    #[test]
    fn dispatch_count_excludes_end() {
        let two_hours = window((6, 0), (8, 0));
        assert_eq!(two_hours.dispatch_count(Duration::from_minutes(10)), 12);
        assert_eq!(two_hours.dispatch_count(Duration::from_minutes(7)), 18);
        assert_eq!(two_hours.dispatch_count(Duration::ZERO), 0);
    }

    #[test]
    fn zero_headway_is_invalid() {
        let constraints =
            TransitConstraints::loop_service(window((6, 0), (8, 0)), Duration::ZERO, Duration::ZERO);
        assert!(matches!(
            constraints.validate(),
            Err(Error::InvalidConstraint(_))
        ));
    }

    #[test]
    fn inverted_outbound_window_is_invalid() {
        let constraints = TransitConstraints::bidirectional(
            window((6, 0), (8, 0)),
            window((8, 0), (6, 0)),
            Duration::from_minutes(10),
            Duration::ZERO,
        );
        assert!(constraints.validate().is_err());
    }

    #[test]
    fn bidirectional_counts_both_windows() {
        let constraints = TransitConstraints::bidirectional(
            window((6, 0), (8, 0)),
            window((6, 30), (7, 30)),
            Duration::from_minutes(10),
            Duration::from_minutes(1),
        );
        assert!(constraints.is_bidirectional());
        assert_eq!(constraints.time_point_count(), 12 + 6);
        assert_eq!(
            constraints.window(Direction::Outbound),
            Some(window((6, 30), (7, 30)))
        );
    }

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.average_speed.whole_meters_per_second(), 10);
        assert_eq!(config.missing_dwell, MissingDwell::Fail);
    }
}
