pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use types::{
    Championship, ChampionshipInfo, Driver, DriverStatus, EventResult, GrandPrix, PointsSystem,
    QualifyingEntry, Team, TeamPrincipal,
};
