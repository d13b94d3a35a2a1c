pub mod config;
pub mod engine;
pub mod summary;
pub mod validation;

pub use config::*;
pub use engine::{
    compute_constructor_standings, compute_driver_standings, event_awards, Award, AwardKind,
    ConstructorStanding, DriverStanding,
};
pub use summary::{
    completed_events, count_distinct_drivers, event_status, total_events, EventStatus, Leader,
    Summary,
};
pub use validation::{validate_championship, validate_standings};
