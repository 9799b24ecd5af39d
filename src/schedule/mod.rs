//! Value types handed back to callers once generation completes.

mod availability;
mod trip;

pub use availability::*;
pub use trip::*;

use std::sync::Arc;

use thiserror::Error;

use crate::{
    shared::time::Time,
    transit::{Direction, Line},
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("A trip needs at least one stop")]
    EmptyTrip,
    #[error("Departure precedes arrival at station {0}")]
    DepartureBeforeArrival(String),
    #[error("Stop times must not decrease along a trip")]
    NonMonotonicStops,
    #[error("At least one weekday must be set")]
    NoWeekdays,
    #[error("Availability is missing its {0} date")]
    MissingDate(&'static str),
    #[error("Availability ends before it starts")]
    EndBeforeStart,
    #[error("Line {line} has no {direction} route")]
    NoRouteForDirection { line: String, direction: Direction },
}

/// The complete set of trips of a line for a given availability.
#[derive(Debug, Clone)]
pub struct Schedule {
    id: Arc<str>,
    description: Option<Arc<str>>,
    availability: Availability,
    line: Arc<Line>,
    inbound: Vec<Trip>,
    outbound: Vec<Trip>,
}

impl Schedule {
    pub fn new(
        description: Option<&str>,
        availability: Availability,
        line: Arc<Line>,
        inbound: Vec<Trip>,
        outbound: Vec<Trip>,
    ) -> Self {
        Self {
            id: line.id.clone(),
            description: description.map(Into::into),
            availability,
            line,
            inbound,
            outbound,
        }
    }

    /// Replaces the default identifier (the line id), e.g. with one assigned by storage.
    pub fn with_id(mut self, id: impl Into<Arc<str>>) -> Self {
        self.id = id.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn availability(&self) -> &Availability {
        &self.availability
    }

    pub fn line(&self) -> &Arc<Line> {
        &self.line
    }

    pub fn inbound_trips(&self) -> &[Trip] {
        &self.inbound
    }

    /// Always empty for loop lines.
    pub fn outbound_trips(&self) -> &[Trip] {
        &self.outbound
    }

    /// Inbound trips followed by outbound trips.
    pub fn trips(&self) -> impl Iterator<Item = &Trip> {
        self.inbound.iter().chain(self.outbound.iter())
    }

    pub fn trip_count(&self) -> usize {
        self.inbound.len() + self.outbound.len()
    }

    /// Number of distinct vehicles operating the schedule.
    pub fn vehicle_count(&self) -> usize {
        let mut vehicles: Vec<u32> = self.trips().filter_map(Trip::vehicle_id).collect();
        vehicles.sort_unstable();
        vehicles.dedup();
        vehicles.len()
    }

    /// Adds a trip to the bucket of its direction.
    pub fn add_trip(&mut self, trip: Trip) -> Result<(), Error> {
        if self.line.route(trip.direction()).is_none() {
            return Err(Error::NoRouteForDirection {
                line: self.line.id.to_string(),
                direction: trip.direction(),
            });
        }
        match trip.direction() {
            Direction::Inbound => self.inbound.push(trip),
            Direction::Outbound => self.outbound.push(trip),
        }
        Ok(())
    }

    /// Removes the first trip equal to `trip`, returning whether one was found.
    pub fn remove_trip(&mut self, trip: &Trip) -> bool {
        let bucket = match trip.direction() {
            Direction::Inbound => &mut self.inbound,
            Direction::Outbound => &mut self.outbound,
        };
        match bucket.iter().position(|value| value == trip) {
            Some(index) => {
                bucket.remove(index);
                true
            }
            None => false,
        }
    }

    /// Sorted departures of every trip calling at `station_id`.
    ///
    /// A trip's final stop is not a departure, so trips terminating at the
    /// station are left out.
    pub fn departures_from(&self, station_id: &str) -> Vec<Time> {
        let mut departures: Vec<Time> = self
            .trips()
            .flat_map(|trip| {
                let stops = trip.stops();
                &stops[..stops.len() - 1]
            })
            .filter(|stop| stop.station().id.as_ref() == station_id)
            .map(Stop::departure)
            .collect();
        departures.sort_unstable();
        departures
    }
}
