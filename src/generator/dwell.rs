use crate::{
    shared::time::{Duration, Time},
    transit::Station,
};

/// Decides how long a vehicle waits at a station it reaches at `arrival`.
///
/// `None` means no dwell policy covers the arrival; what happens next is up
/// to the stop factory's [`crate::generator::MissingDwell`] setting.
pub trait DwellTimeResolver {
    fn resolve(&self, arrival: Time, station: &Station) -> Option<Duration>;
}

impl<F> DwellTimeResolver for F
where
    F: Fn(Time, &Station) -> Option<Duration>,
{
    fn resolve(&self, arrival: Time, station: &Station) -> Option<Duration> {
        self(arrival, station)
    }
}

/// Uses the station's fixed dwell at any time of day.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedDwellTimeResolver;

impl DwellTimeResolver for FixedDwellTimeResolver {
    fn resolve(&self, _arrival: Time, station: &Station) -> Option<Duration> {
        Some(station.dwell)
    }
}

/// Picks the first dwell window covering the arrival and scales its dwell
/// time by the window's probability, rounding up to whole seconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformDwellTimeResolver;

impl DwellTimeResolver for UniformDwellTimeResolver {
    fn resolve(&self, arrival: Time, station: &Station) -> Option<Duration> {
        let dwell = station.dwells().iter().find(|dwell| dwell.applies(arrival))?;
        Some(scale(dwell.dwell_time(), dwell.probability()))
    }
}

fn scale(dwell_time: Duration, probability: f64) -> Duration {
    let seconds = (dwell_time.as_seconds() as f64 * probability).ceil();
    Duration::from_seconds(seconds as u32)
}
