#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use chrono::NaiveDate;
use tabula::prelude::*;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn availability() -> Availability {
    Availability::working_days(date(2026, 10, 19), date(2026, 12, 18)).unwrap()
}

pub fn station(id: &str) -> Arc<Station> {
    Arc::new(Station::new(id, format!("Station {id}")))
}

/// Route through `stations` with every segment `meters` long.
pub fn route(stations: &[Arc<Station>], meters: f64) -> Route {
    let segments = stations
        .windows(2)
        .map(|pair| {
            Segment::new(pair[0].clone(), pair[1].clone(), Distance::from_meters(meters)).unwrap()
        })
        .collect();
    Route::new(segments).unwrap()
}

/// Two-station line with a route in each direction.
pub fn shuttle(id: &str, meters: f64) -> Arc<Line> {
    let a = station("a");
    let b = station("b");
    let line = Line::new(id, "Shuttle", route(&[a.clone(), b.clone()], meters))
        .with_outbound(route(&[b, a], meters));
    Arc::new(line)
}

/// Single route line that returns to where it started.
pub fn circle(id: &str, meters: f64) -> Arc<Line> {
    let a = station("a");
    let b = station("b");
    let c = station("c");
    Arc::new(Line::new(id, "Circle", route(&[a.clone(), b, c, a], meters)))
}

pub fn window(start: Time, duration: Duration) -> ServiceWindow {
    ServiceWindow::new(start, start + duration)
}

/// Trips of each vehicle ordered by start time.
pub fn blocks(schedule: &Schedule) -> HashMap<u32, Vec<&Trip>> {
    let mut blocks: HashMap<u32, Vec<&Trip>> = HashMap::new();
    for trip in schedule.trips() {
        let vehicle = trip.vehicle_id().unwrap();
        blocks.entry(vehicle).or_default().push(trip);
    }
    for trips in blocks.values_mut() {
        trips.sort_by_key(|trip| trip.start_time());
    }
    blocks
}
