//! Timetable generation.
//!
//! Service windows are discretized into dispatch instants spaced by the
//! headway. The earliest free instant seeds a vehicle block, and the vehicle
//! keeps taking the earliest instant it can reach (opposite direction on
//! bidirectional lines, same direction on loops) once it has rested for the
//! minimum layover. When it can reach none, the next free instant seeds a
//! new vehicle.

mod config;
mod dwell;
mod stop;
mod time_points;
mod trip;

pub use config::*;
pub use dwell::*;
pub use stop::*;
pub use time_points::*;
pub use trip::*;

use std::sync::Arc;

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    schedule::{self, Availability, Schedule},
    shared::time::Time,
    transit::{Direction, Line},
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid transit constraint: {0}")]
    InvalidConstraint(&'static str),
    #[error("Average speed must be at least one meter per second")]
    NonPositiveSpeed,
    #[error("Service windows produce {count} time points, more than the allowed {max}")]
    TooManyTimePoints { count: usize, max: usize },
    #[error("Outbound service requested but line {0} has no outbound route")]
    MissingOutboundRoute(String),
    #[error("No dwell time applies at station {station} at {arrival}")]
    UnresolvedDwell { station: String, arrival: Time },
    #[error(transparent)]
    Schedule(#[from] schedule::Error),
}

/// Input of one generation run in [`ScheduleGenerator::generate_all`].
#[derive(Debug, Clone)]
pub struct Request {
    pub description: Option<String>,
    pub availability: Availability,
    pub line: Arc<Line>,
}

/// Builds complete schedules from a validated set of transit constraints.
///
/// The generator itself is immutable. All bookkeeping of a run lives inside
/// [`ScheduleGenerator::generate`], so one generator can serve many runs at
/// once.
#[derive(Debug, Clone)]
pub struct ScheduleGenerator<R = FixedDwellTimeResolver> {
    constraints: TransitConstraints,
    config: Config,
    trip_factory: TripFactory<R>,
}

impl<R: DwellTimeResolver> ScheduleGenerator<R> {
    pub fn new(constraints: TransitConstraints, config: Config, resolver: R) -> Result<Self, Error> {
        constraints.validate()?;
        let count = constraints.time_point_count();
        if count > config.max_time_points {
            return Err(Error::TooManyTimePoints {
                count,
                max: config.max_time_points,
            });
        }
        let stop_factory = StopFactory::new(resolver, config.missing_dwell);
        let trip_factory = TripFactory::new(stop_factory, config.average_speed)?;
        Ok(Self {
            constraints,
            config,
            trip_factory,
        })
    }

    pub fn constraints(&self) -> &TransitConstraints {
        &self.constraints
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Generates every trip of `line` and assembles them into a [`Schedule`].
    ///
    /// Any failure aborts the whole run, no partial schedule is returned.
    pub fn generate(
        &self,
        description: Option<&str>,
        availability: Availability,
        line: Arc<Line>,
    ) -> Result<Schedule, Error> {
        if self.constraints.is_bidirectional() && line.is_loop() {
            return Err(Error::MissingOutboundRoute(line.id.to_string()));
        }

        let mut time_points = TimePoints::new(&self.constraints)?;
        debug!(
            "Discretized {} time points for line {}",
            time_points.len(),
            line.id
        );

        let mut inbound = Vec::new();
        let mut outbound = Vec::new();
        let mut vehicle_id: u32 = 0;
        while let Some(seed) = time_points.first_unserviced() {
            vehicle_id += 1;
            let mut block_len = 0;
            let mut current = Some(seed);
            while let Some(idx) = current {
                let point = time_points[idx];
                let route = line
                    .route(point.direction)
                    .ok_or_else(|| Error::MissingOutboundRoute(line.id.to_string()))?;
                let trip = self.trip_factory.create(
                    point.time,
                    Some(vehicle_id),
                    None,
                    point.direction,
                    route,
                )?;
                time_points.mark_serviced(idx);
                current = time_points.next_unserviced_after(trip.arrival_time(), point.direction);
                match point.direction {
                    Direction::Inbound => inbound.push(trip),
                    Direction::Outbound => outbound.push(trip),
                }
                block_len += 1;
            }
            debug!("Vehicle {} operates {} trips", vehicle_id, block_len);
        }

        info!(
            "Generated {} inbound and {} outbound trips with {} vehicles for line {}",
            inbound.len(),
            outbound.len(),
            vehicle_id,
            line.id
        );
        Ok(Schedule::new(
            description,
            availability,
            line,
            inbound,
            outbound,
        ))
    }
}

impl<R: DwellTimeResolver + Sync> ScheduleGenerator<R> {
    /// Runs independent generations in parallel. Results keep request order.
    pub fn generate_all(&self, requests: &[Request]) -> Vec<Result<Schedule, Error>> {
        requests
            .par_iter()
            .map(|request| {
                self.generate(
                    request.description.as_deref(),
                    request.availability.clone(),
                    request.line.clone(),
                )
            })
            .collect()
    }
}
