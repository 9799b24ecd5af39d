use std::sync::Arc;

use crate::{
    shared::geo::Distance,
    transit::{self, Station},
};

/// A directed hop between two consecutive stations of a route.
#[derive(Debug, Clone)]
pub struct Segment {
    pub begin: Arc<Station>,
    pub end: Arc<Station>,
    length: Distance,
}

impl Segment {
    pub fn new(
        begin: Arc<Station>,
        end: Arc<Station>,
        length: Distance,
    ) -> Result<Self, transit::Error> {
        if length.as_meters().is_nan() || length.as_meters() < 0.0 {
            return Err(transit::Error::NegativeLength);
        }
        Ok(Self { begin, end, length })
    }

    /// Builds a segment whose length is estimated from the station coordinates.
    pub fn estimated(begin: Arc<Station>, end: Arc<Station>) -> Self {
        let length = begin.coordinate.network_distance(&end.coordinate);
        Self { begin, end, length }
    }

    pub fn length(&self) -> Distance {
        self.length
    }
}

/// An ordered, interconnected chain of segments.
///
/// Every route has at least one segment and `segments[i - 1].end` is always
/// the same station as `segments[i].begin`.
#[derive(Debug, Clone)]
pub struct Route {
    segments: Box<[Segment]>,
}

impl Route {
    pub fn new(segments: Vec<Segment>) -> Result<Self, transit::Error> {
        if segments.is_empty() {
            return Err(transit::Error::EmptyRoute);
        }
        if let Some(index) = (1..segments.len()).find(|&i| segments[i - 1].end != segments[i].begin)
        {
            return Err(transit::Error::DisconnectedSegments { index });
        }
        Ok(Self {
            segments: segments.into(),
        })
    }

    /// Builds a route through `stations` in order, estimating every segment length.
    pub fn through(stations: &[Arc<Station>]) -> Result<Self, transit::Error> {
        let segments = stations
            .windows(2)
            .map(|pair| Segment::estimated(pair[0].clone(), pair[1].clone()))
            .collect();
        Self::new(segments)
    }

    pub fn head(&self) -> &Arc<Station> {
        &self.segments[0].begin
    }

    pub fn tail(&self) -> &Arc<Station> {
        &self.segments[self.segments.len() - 1].end
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Stations in travel order, head first.
    pub fn stations(&self) -> Vec<&Arc<Station>> {
        std::iter::once(self.head())
            .chain(self.segments.iter().map(|segment| &segment.end))
            .collect()
    }

    pub fn contains_station(&self, station_id: &str) -> bool {
        self.head().id.as_ref() == station_id
            || self
                .segments
                .iter()
                .any(|segment| segment.end.id.as_ref() == station_id)
    }

    pub fn length(&self) -> Distance {
        self.segments
            .iter()
            .fold(Distance::default(), |total, segment| total + segment.length)
    }
}

impl<'a> IntoIterator for &'a Route {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
