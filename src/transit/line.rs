use std::{fmt::Display, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::transit::Route;

/// Travel direction of a trip along a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Inbound,
    Outbound,
}

impl Direction {
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Inbound => Direction::Outbound,
            Direction::Outbound => Direction::Inbound,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Inbound => f.write_str("inbound"),
            Direction::Outbound => f.write_str("outbound"),
        }
    }
}

/// A line served by one route (a loop) or by an inbound and outbound pair.
#[derive(Debug, Clone)]
pub struct Line {
    pub id: Arc<str>,
    pub name: Arc<str>,
    pub inbound: Route,
    pub outbound: Option<Route>,
}

impl Line {
    /// Creates a loop line served by a single route.
    pub fn new(id: impl Into<Arc<str>>, name: impl Into<Arc<str>>, inbound: Route) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            inbound,
            outbound: None,
        }
    }

    pub fn with_outbound(mut self, outbound: Route) -> Self {
        self.outbound = Some(outbound);
        self
    }

    pub fn is_bidirectional(&self) -> bool {
        self.outbound.is_some()
    }

    pub fn is_loop(&self) -> bool {
        !self.is_bidirectional()
    }

    pub fn route(&self, direction: Direction) -> Option<&Route> {
        match direction {
            Direction::Inbound => Some(&self.inbound),
            Direction::Outbound => self.outbound.as_ref(),
        }
    }
}
