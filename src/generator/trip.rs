use crate::{
    generator::{DwellTimeResolver, Error, StopFactory},
    schedule::Trip,
    shared::{
        geo::{Distance, Speed},
        time::{Duration, Time},
    },
    transit::{Direction, Route},
};

/// Projects a departure time along a route into a fully timed [`Trip`].
#[derive(Debug, Clone)]
pub struct TripFactory<R> {
    stop_factory: StopFactory<R>,
    /// Average speed in whole metres per second, never zero.
    speed: u64,
}

impl<R: DwellTimeResolver> TripFactory<R> {
    pub fn new(stop_factory: StopFactory<R>, average_speed: Speed) -> Result<Self, Error> {
        let speed = average_speed.whole_meters_per_second();
        if speed == 0 {
            return Err(Error::NonPositiveSpeed);
        }
        Ok(Self {
            stop_factory,
            speed,
        })
    }

    /// Time to cover `length`, truncated to whole seconds.
    pub fn travel_time(&self, length: Distance) -> Duration {
        let seconds = length.whole_meters() / self.speed;
        Duration::from_seconds(u32::try_from(seconds).unwrap_or(u32::MAX))
    }

    pub fn create(
        &self,
        start: Time,
        vehicle_id: Option<u32>,
        headsign: Option<&str>,
        direction: Direction,
        route: &Route,
    ) -> Result<Trip, Error> {
        let mut stops = Vec::with_capacity(route.segments().len() + 1);
        let head = self.stop_factory.create(start, route.head())?;
        let mut last_departure = head.departure();
        stops.push(head);

        for segment in route {
            let arrival = last_departure + self.travel_time(segment.length());
            let stop = self.stop_factory.create(arrival, &segment.end)?;
            last_departure = stop.departure();
            stops.push(stop);
        }

        Ok(Trip::new(direction, vehicle_id, headsign, stops)?)
    }
}
