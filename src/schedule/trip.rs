use std::sync::Arc;

use crate::{
    schedule,
    shared::time::{Duration, Time},
    transit::{Direction, Station},
};

/// A timed call of a vehicle at a station.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    station: Arc<Station>,
    arrival: Time,
    departure: Time,
}

impl Stop {
    pub fn new(station: Arc<Station>, arrival: Time, departure: Time) -> Result<Self, schedule::Error> {
        if departure < arrival {
            return Err(schedule::Error::DepartureBeforeArrival(station.id.to_string()));
        }
        Ok(Self {
            station,
            arrival,
            departure,
        })
    }

    pub fn station(&self) -> &Arc<Station> {
        &self.station
    }

    pub fn arrival(&self) -> Time {
        self.arrival
    }

    pub fn departure(&self) -> Time {
        self.departure
    }

    pub fn dwell(&self) -> Duration {
        self.departure.checked_since(self.arrival).unwrap_or_default()
    }
}

/// One run of a vehicle along a route.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    direction: Direction,
    vehicle_id: Option<u32>,
    headsign: Arc<str>,
    stops: Box<[Stop]>,
}

impl Trip {
    /// Builds a trip from its ordered stops.
    ///
    /// A missing or blank headsign falls back to the name of the last station.
    pub fn new(
        direction: Direction,
        vehicle_id: Option<u32>,
        headsign: Option<&str>,
        stops: Vec<Stop>,
    ) -> Result<Self, schedule::Error> {
        let last = stops.last().ok_or(schedule::Error::EmptyTrip)?;
        let monotonic = stops
            .windows(2)
            .all(|pair| pair[0].departure <= pair[1].arrival);
        if !monotonic {
            return Err(schedule::Error::NonMonotonicStops);
        }
        let headsign: Arc<str> = match headsign.map(str::trim) {
            Some(headsign) if !headsign.is_empty() => headsign.into(),
            _ => last.station.name.clone(),
        };
        Ok(Self {
            direction,
            vehicle_id,
            headsign,
            stops: stops.into(),
        })
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn vehicle_id(&self) -> Option<u32> {
        self.vehicle_id
    }

    pub fn headsign(&self) -> &str {
        &self.headsign
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Departure from the first stop.
    pub fn departure_time(&self) -> Time {
        self.stops[0].departure
    }

    pub fn start_time(&self) -> Time {
        self.stops[0].arrival
    }

    /// Latest arrival over all stops, which is when the vehicle frees up.
    pub fn arrival_time(&self) -> Time {
        self.stops
            .iter()
            .map(|stop| stop.arrival)
            .max()
            .unwrap_or_default()
    }
}
