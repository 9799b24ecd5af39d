pub mod export;
pub mod generator;
pub mod schedule;
pub mod shared;
pub mod transit;

pub mod prelude {
    pub use crate::generator::{
        Config, DwellTimeResolver, FixedDwellTimeResolver, MissingDwell, ScheduleGenerator,
        ServiceWindow, TransitConstraints, UniformDwellTimeResolver,
    };
    pub use crate::schedule::{Availability, Schedule, Stop, Trip};
    pub use crate::shared::{Distance, Duration, Speed, Time};
    pub use crate::transit::{Direction, Dwell, Line, Route, Segment, Station};
}
