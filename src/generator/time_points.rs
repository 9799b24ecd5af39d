use std::ops::Index;

use bitvec::prelude::*;

use crate::{
    generator::{Error, TransitConstraints},
    shared::time::{Duration, Time},
    transit::Direction,
};

/// A candidate dispatch instant for one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePoint {
    pub direction: Direction,
    pub time: Time,
}

/// Splits `[start, end)` into instants spaced `headway` apart, starting at `start`.
pub fn discretize(
    start: Time,
    end: Time,
    direction: Direction,
    headway: Duration,
) -> Result<Vec<TimePoint>, Error> {
    if headway.is_zero() {
        return Err(Error::InvalidConstraint("headway must be positive"));
    }
    if end <= start {
        return Err(Error::InvalidConstraint(
            "service window must end after it starts",
        ));
    }
    let mut points = Vec::new();
    let mut time = start;
    while time < end {
        points.push(TimePoint { direction, time });
        time += headway;
    }
    Ok(points)
}

/// Every time point of one generation run plus which ones a vehicle already took.
///
/// Points are kept in ascending time order. Equal times keep generation
/// order, inbound before outbound.
pub struct TimePoints {
    points: Box<[TimePoint]>,
    /// Parallel to `points`, set once a trip departs from the point.
    serviced: BitVec<usize, Lsb0>,
    min_layover: Duration,
    bidirectional: bool,
}

impl TimePoints {
    pub fn new(constraints: &TransitConstraints) -> Result<Self, Error> {
        let inbound = constraints.inbound;
        let mut points = discretize(
            inbound.start,
            inbound.end,
            Direction::Inbound,
            constraints.headway,
        )?;
        if let Some(outbound) = constraints.outbound {
            points.extend(discretize(
                outbound.start,
                outbound.end,
                Direction::Outbound,
                constraints.headway,
            )?);
        }
        // stable, so ties keep generation order
        points.sort_by_key(|point| point.time);

        Ok(Self {
            serviced: bitvec!(usize, Lsb0; 0; points.len()),
            points: points.into(),
            min_layover: constraints.min_layover,
            bidirectional: constraints.is_bidirectional(),
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_bidirectional(&self) -> bool {
        self.bidirectional
    }

    pub fn get(&self, idx: usize) -> Option<&TimePoint> {
        self.points.get(idx)
    }

    pub fn is_serviced(&self, idx: usize) -> bool {
        self.serviced.get(idx).is_some_and(|flag| *flag)
    }

    /// Points no vehicle has taken yet.
    pub fn remaining(&self) -> usize {
        self.serviced.count_zeros()
    }

    /// Earliest point not taken by any vehicle.
    pub fn first_unserviced(&self) -> Option<usize> {
        self.serviced.first_zero()
    }

    /// Earliest free point a vehicle arriving at `time` can take next.
    ///
    /// Bidirectional lines turn the vehicle around into the opposite
    /// direction, loop lines keep it in `from`. The point must be strictly
    /// after `time` and leave at least `min_layover` of rest.
    pub fn next_unserviced_after(&self, time: Time, from: Direction) -> Option<usize> {
        let direction = if self.bidirectional {
            from.opposite()
        } else {
            from
        };
        let start = self.points.partition_point(|point| point.time <= time);
        (start..self.points.len()).find(|&idx| {
            let point = &self.points[idx];
            !self.serviced[idx]
                && point.direction == direction
                && point
                    .time
                    .checked_since(time)
                    .is_some_and(|rest| rest >= self.min_layover)
        })
    }

    /// Marks a point as taken. Marking twice is a no-op.
    pub fn mark_serviced(&mut self, idx: usize) {
        self.serviced.set(idx, true);
    }
}

impl Index<usize> for TimePoints {
    type Output = TimePoint;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::ServiceWindow;

    fn constraints(headway: u32, layover: u32, outbound_offset: Option<u32>) -> TransitConstraints {
        let start = Time::from_hm(6, 0);
        let inbound = ServiceWindow::new(start, Time::from_hm(8, 0));
        let headway = Duration::from_minutes(headway);
        let layover = Duration::from_minutes(layover);
        match outbound_offset {
            Some(offset) => {
                let start = start + Duration::from_minutes(offset);
                let outbound = ServiceWindow::new(start, start + Duration::from_hours(2));
                TransitConstraints::bidirectional(inbound, outbound, headway, layover)
            }
            None => TransitConstraints::loop_service(inbound, headway, layover),
        }
    }

    #[test]
    fn discretize_stops_before_end() {
        let points = discretize(
            Time::from_hm(6, 0),
            Time::from_hm(7, 0),
            Direction::Inbound,
            Duration::from_minutes(20),
        )
        .unwrap();
        let times: Vec<Time> = points.iter().map(|point| point.time).collect();
        assert_eq!(
            times,
            vec![Time::from_hm(6, 0), Time::from_hm(6, 20), Time::from_hm(6, 40)]
        );
    }

    #[test]
    fn discretize_keeps_last_instant_before_end() {
        let points = discretize(
            Time::from_hm(6, 0),
            Time::from_hm(6, 45),
            Direction::Outbound,
            Duration::from_minutes(20),
        )
        .unwrap();
        assert_eq!(points.last().unwrap().time, Time::from_hm(6, 40));
        assert!(points.iter().all(|point| point.direction == Direction::Outbound));
    }

    #[test]
    fn discretize_rejects_bad_input() {
        let start = Time::from_hm(6, 0);
        assert!(discretize(start, Time::from_hm(7, 0), Direction::Inbound, Duration::ZERO).is_err());
        assert!(discretize(start, start, Direction::Inbound, Duration::from_minutes(1)).is_err());
    }

    #[test]
    fn discretize_terminates_near_time_max() {
        let start = Time::from_seconds(u32::MAX - 10);
        let points = discretize(
            start,
            crate::shared::time::MAX,
            Direction::Inbound,
            Duration::from_seconds(4),
        )
        .unwrap();
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn first_unserviced_is_earliest() {
        let mut points = TimePoints::new(&constraints(20, 20, Some(1))).unwrap();
        let first = points.first_unserviced().unwrap();
        assert_eq!(points[first].time, Time::from_hm(6, 0));
        assert_eq!(points[first].direction, Direction::Inbound);

        points.mark_serviced(first);
        let next = points.first_unserviced().unwrap();
        assert_ne!(first, next);
        assert_eq!(points[next].time, Time::from_hm(6, 1));
        assert_eq!(points[next].direction, Direction::Outbound);
    }

    #[test]
    fn get_is_bounds_checked() {
        let points = TimePoints::new(&constraints(20, 0, None)).unwrap();
        assert_eq!(points.len(), 6);
        assert_eq!(points.get(5).map(|point| point.time), Some(Time::from_hm(7, 40)));
        assert!(points.get(6).is_none());
        assert!(!points.is_serviced(6));
    }

    #[test]
    fn ties_prefer_inbound() {
        let points = TimePoints::new(&constraints(20, 0, Some(0))).unwrap();
        assert_eq!(points[0].direction, Direction::Inbound);
        assert_eq!(points[1].direction, Direction::Outbound);
        assert_eq!(points[0].time, points[1].time);
    }

    #[test]
    fn next_point_switches_direction() {
        let points = TimePoints::new(&constraints(20, 2, Some(0))).unwrap();
        let first = points.first_unserviced().unwrap();
        // arrive 3 minutes before the next outbound dispatch, enough for a 2 minute layover
        let arrival = Time::from_hm(6, 17);
        let next = points
            .next_unserviced_after(arrival, points[first].direction)
            .unwrap();
        assert_eq!(points[next].direction, Direction::Outbound);
        assert_eq!(points[next].time, Time::from_hm(6, 20));
    }

    #[test]
    fn next_point_respects_layover() {
        let points = TimePoints::new(&constraints(20, 2, Some(0))).unwrap();
        // only one minute of rest before 06:20, so 06:40 is the next feasible
        let arrival = Time::from_hm(6, 19);
        let next = points
            .next_unserviced_after(arrival, Direction::Inbound)
            .unwrap();
        assert_eq!(points[next].direction, Direction::Outbound);
        assert_eq!(points[next].time, Time::from_hm(6, 40));
    }

    #[test]
    fn layover_boundary_is_inclusive() {
        let points = TimePoints::new(&constraints(20, 2, Some(0))).unwrap();
        let arrival = Time::from_hm(6, 18);
        let next = points
            .next_unserviced_after(arrival, Direction::Inbound)
            .unwrap();
        assert_eq!(points[next].time, Time::from_hm(6, 20));
    }

    #[test]
    fn next_point_is_strictly_after() {
        let points = TimePoints::new(&constraints(20, 0, Some(0))).unwrap();
        let next = points
            .next_unserviced_after(Time::from_hm(6, 20), Direction::Inbound)
            .unwrap();
        assert_eq!(points[next].time, Time::from_hm(6, 40));
    }

    #[test]
    fn loop_line_keeps_direction() {
        let points = TimePoints::new(&constraints(10, 1, None)).unwrap();
        assert!(!points.is_bidirectional());
        let next = points
            .next_unserviced_after(Time::from_hm(6, 5), Direction::Inbound)
            .unwrap();
        assert_eq!(points[next].direction, Direction::Inbound);
        assert_eq!(points[next].time, Time::from_hm(6, 10));
    }

    #[test]
    fn serviced_points_are_skipped() {
        let mut points = TimePoints::new(&constraints(10, 0, None)).unwrap();
        let candidate = points
            .next_unserviced_after(Time::from_hm(6, 5), Direction::Inbound)
            .unwrap();
        points.mark_serviced(candidate);
        points.mark_serviced(candidate);
        assert!(points.is_serviced(candidate));
        let next = points
            .next_unserviced_after(Time::from_hm(6, 5), Direction::Inbound)
            .unwrap();
        assert_eq!(points[next].time, Time::from_hm(6, 20));
        assert_eq!(points.remaining(), points.len() - 1);
    }

    #[test]
    fn no_point_after_window() {
        let points = TimePoints::new(&constraints(10, 0, Some(0))).unwrap();
        assert!(
            points
                .next_unserviced_after(Time::from_hm(8, 0), Direction::Inbound)
                .is_none()
        );
    }
}
