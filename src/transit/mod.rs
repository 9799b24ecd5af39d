//! Read-only network description the timetable engine consumes.
//!
//! Stations carry their dwell policy, routes are interconnected chains of
//! segments and a line pairs an inbound route with an optional outbound one.

mod line;
mod route;
mod station;

pub use line::*;
pub use route::*;
pub use station::*;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("A route needs at least one segment")]
    EmptyRoute,
    #[error("Segment {index} does not begin where the previous segment ends")]
    DisconnectedSegments { index: usize },
    #[error("Segment length must be a non-negative number of meters")]
    NegativeLength,
    #[error("Invalid dwell: {0}")]
    InvalidDwell(&'static str),
    #[error("Station {0} has overlapping dwell windows")]
    OverlappingDwells(String),
}
