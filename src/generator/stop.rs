use std::sync::Arc;

use tracing::warn;

use crate::{
    generator::{DwellTimeResolver, Error, MissingDwell},
    schedule::Stop,
    shared::time::{Duration, Time},
    transit::Station,
};

/// Turns an arrival at a station into a timed [`Stop`].
#[derive(Debug, Clone)]
pub struct StopFactory<R> {
    resolver: R,
    missing_dwell: MissingDwell,
}

impl<R: DwellTimeResolver> StopFactory<R> {
    pub fn new(resolver: R, missing_dwell: MissingDwell) -> Self {
        Self {
            resolver,
            missing_dwell,
        }
    }

    pub fn create(&self, arrival: Time, station: &Arc<Station>) -> Result<Stop, Error> {
        let dwell = match self.resolver.resolve(arrival, station) {
            Some(dwell) => dwell,
            None => match self.missing_dwell {
                MissingDwell::Fail => {
                    return Err(Error::UnresolvedDwell {
                        station: station.id.to_string(),
                        arrival,
                    });
                }
                MissingDwell::Zero => {
                    warn!(
                        "No dwell applies at station {} at {}, departing on arrival",
                        station.id, arrival
                    );
                    Duration::ZERO
                }
            },
        };
        Ok(Stop::new(station.clone(), arrival, arrival + dwell)?)
    }
}
