mod common;

use common::*;
use tabula::{generator::Error, prelude::*, schedule};

fn generated(line: std::sync::Arc<Line>) -> Schedule {
    let start = Time::from_hm(7, 0);
    let constraints = if line.is_bidirectional() {
        TransitConstraints::bidirectional(
            window(start, Duration::from_hours(1)),
            window(start, Duration::from_hours(1)),
            Duration::from_minutes(15),
            Duration::from_minutes(2),
        )
    } else {
        TransitConstraints::loop_service(
            window(start, Duration::from_hours(1)),
            Duration::from_minutes(15),
            Duration::from_minutes(2),
        )
    };
    ScheduleGenerator::new(constraints, Config::default(), FixedDwellTimeResolver)
        .unwrap()
        .generate(Some("morning peak"), availability(), line)
        .unwrap()
}

#[test]
fn id_defaults_to_line() {
    let schedule = generated(shuttle("L7", 1000.0));
    assert_eq!(schedule.id(), "L7");
    assert_eq!(schedule.with_id("peak-7").id(), "peak-7");
}

#[test]
fn departures_from_station() {
    let schedule = generated(shuttle("L1", 1000.0));
    let departures = schedule.departures_from("a");
    // outbound trips terminate at a
    assert_eq!(
        departures,
        vec![
            Time::from_hm(7, 0),
            Time::from_hm(7, 15),
            Time::from_hm(7, 30),
            Time::from_hm(7, 45)
        ]
    );
    assert_eq!(schedule.departures_from("b").len(), 4);
    assert!(schedule.departures_from("nowhere").is_empty());
}

#[test]
fn loop_departures_skip_terminal_stop() {
    // the circle starts and ends at a
    let schedule = generated(circle("C1", 1000.0));
    let departures = schedule.departures_from("a");
    assert_eq!(departures.len(), schedule.trip_count());
    assert_eq!(departures[0], Time::from_hm(7, 0));
    assert_eq!(schedule.departures_from("b").len(), schedule.trip_count());
}

#[test]
fn add_and_remove_trip() {
    let mut schedule = generated(shuttle("L1", 1000.0));
    let trip = schedule.outbound_trips()[0].clone();
    let count = schedule.trip_count();

    assert!(schedule.remove_trip(&trip));
    assert_eq!(schedule.trip_count(), count - 1);
    assert!(!schedule.remove_trip(&trip));

    schedule.add_trip(trip).unwrap();
    assert_eq!(schedule.trip_count(), count);
    assert_eq!(schedule.outbound_trips().len(), 4);
}

#[test]
fn loop_schedule_rejects_outbound_trip() {
    let mut schedule = generated(circle("C1", 1000.0));
    let stops = schedule.inbound_trips()[0].stops().to_vec();
    let trip = Trip::new(Direction::Outbound, None, Some("Extra"), stops).unwrap();
    assert_eq!(
        schedule.add_trip(trip).unwrap_err(),
        schedule::Error::NoRouteForDirection {
            line: "C1".into(),
            direction: Direction::Outbound,
        }
    );
}

#[test]
fn vehicle_count_matches_blocks() {
    let schedule = generated(shuttle("L1", 1000.0));
    assert_eq!(schedule.vehicle_count(), blocks(&schedule).len());
    assert_eq!(schedule.description(), Some("morning peak"));
    assert!(schedule.availability().applies_on(date(2026, 10, 19)));
}

#[test]
fn schedule_errors_surface_through_generator() {
    let error: Error = schedule::Error::EmptyTrip.into();
    assert_eq!(error, Error::Schedule(schedule::Error::EmptyTrip));
}
