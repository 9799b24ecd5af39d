//! Writes a generated [`Schedule`] as a zipped GTFS-style feed.

mod config;
pub mod records;

pub use config::*;
use records::*;

use std::{
    collections::HashSet,
    io::{self, Seek, Write},
};

use chrono::{NaiveDate, Weekday};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use zip::{ZipWriter, write::SimpleFileOptions};

use crate::{
    schedule::{Schedule, Trip},
    transit::Direction,
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Writes every feed file of `schedule` into a zip archive and hands the
/// finished writer back.
pub fn write_zip<W>(schedule: &Schedule, writer: W, config: &self::Config) -> Result<W, self::Error>
where
    W: Write + Seek,
{
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default();

    write_csv(&mut zip, &config.stops_file_name, options, stops(schedule))?;
    write_csv(&mut zip, &config.trips_file_name, options, trips(schedule))?;
    write_csv(
        &mut zip,
        &config.stop_times_file_name,
        options,
        stop_times(schedule),
    )?;
    write_csv(
        &mut zip,
        &config.calendar_file_name,
        options,
        std::iter::once(calendar(schedule)),
    )?;
    write_csv(
        &mut zip,
        &config.calendar_dates_file_name,
        options,
        calendar_dates(schedule),
    )?;

    debug!(
        "Exported schedule {} with {} trips",
        schedule.id(),
        schedule.trip_count()
    );
    Ok(zip.finish()?)
}

/// Identifier of the `n`th trip (1-based) of a direction.
pub fn trip_id(schedule: &Schedule, direction: Direction, n: usize) -> String {
    format!("{}-{}-{}", schedule.id(), direction, n)
}

fn write_csv<W, T, I>(
    zip: &mut ZipWriter<W>,
    file_name: &str,
    options: SimpleFileOptions,
    records: I,
) -> Result<(), self::Error>
where
    W: Write + Seek,
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    zip.start_file(file_name, options)?;
    let mut writer = csv::Writer::from_writer(&mut *zip);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

fn stops(schedule: &Schedule) -> Vec<GtfsStop> {
    let line = schedule.line();
    let mut seen = HashSet::new();
    line.inbound
        .stations()
        .into_iter()
        .chain(line.outbound.iter().flat_map(|route| route.stations()))
        .filter(|station| seen.insert(station.id.clone()))
        .map(|station| GtfsStop {
            stop_id: station.id.to_string(),
            stop_name: station.name.to_string(),
            stop_lat: station.coordinate.latitude,
            stop_lon: station.coordinate.longitude,
        })
        .collect()
}

fn numbered_trips(schedule: &Schedule) -> impl Iterator<Item = (String, &Trip)> {
    let inbound = schedule
        .inbound_trips()
        .iter()
        .enumerate()
        .map(move |(i, trip)| (trip_id(schedule, Direction::Inbound, i + 1), trip));
    let outbound = schedule
        .outbound_trips()
        .iter()
        .enumerate()
        .map(move |(i, trip)| (trip_id(schedule, Direction::Outbound, i + 1), trip));
    inbound.chain(outbound)
}

fn trips(schedule: &Schedule) -> Vec<GtfsTrip> {
    numbered_trips(schedule)
        .map(|(trip_id, trip)| GtfsTrip {
            route_id: schedule.line().id.to_string(),
            service_id: schedule.id().to_string(),
            trip_id,
            trip_headsign: trip.headsign().to_string(),
            direction_id: match trip.direction() {
                Direction::Inbound => 0,
                Direction::Outbound => 1,
            },
            block_id: trip.vehicle_id().map(|id| id.to_string()),
        })
        .collect()
}

fn stop_times(schedule: &Schedule) -> Vec<GtfsStopTime> {
    numbered_trips(schedule)
        .flat_map(|(trip_id, trip)| {
            trip.stops()
                .iter()
                .enumerate()
                .map(move |(i, stop)| GtfsStopTime {
                    trip_id: trip_id.clone(),
                    arrival_time: stop.arrival().to_hms_string(),
                    departure_time: stop.departure().to_hms_string(),
                    stop_id: stop.station().id.to_string(),
                    stop_sequence: i as u32 + 1,
                })
        })
        .collect()
}

fn calendar(schedule: &Schedule) -> GtfsCalendar {
    let availability = schedule.availability();
    let flag = |weekday| u8::from(availability.runs_on(weekday));
    GtfsCalendar {
        service_id: schedule.id().to_string(),
        monday: flag(Weekday::Mon),
        tuesday: flag(Weekday::Tue),
        wednesday: flag(Weekday::Wed),
        thursday: flag(Weekday::Thu),
        friday: flag(Weekday::Fri),
        saturday: flag(Weekday::Sat),
        sunday: flag(Weekday::Sun),
        start_date: gtfs_date(availability.start_date()),
        end_date: gtfs_date(availability.end_date()),
    }
}

fn calendar_dates(schedule: &Schedule) -> Vec<GtfsCalendarDate> {
    schedule
        .availability()
        .exception_dates()
        .map(|date| GtfsCalendarDate {
            service_id: schedule.id().to_string(),
            date: gtfs_date(*date),
            exception_type: 2,
        })
        .collect()
}

fn gtfs_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}
