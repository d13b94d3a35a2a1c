use serde::{Deserialize, Serialize};

use crate::championship::{Championship, PointsSystem};

/// Number of leading finishers eligible for the fastest-lap bonus
pub const DEFAULT_FASTEST_LAP_CUTOFF: usize = 10;

/// Name the season file uses for a seat that changed hands mid-season
pub const TEAM_CHANGE_PLACEHOLDER: &str = "Cambio de equipo";

/// Standings rules configuration.
///
/// Every field is optional. Anything left out falls back to the season file
/// (for points) or to the built-in defaults.
///
/// Example YAML:
/// ```yaml
/// standings:
///   points:
///     race: [25, 18, 15, 12, 10, 8, 6, 4, 2, 1]
///     fastest_lap: 1
///   fastest_lap_cutoff: 10
///   constructors_count_former: true
///   placeholder_names: ["Cambio de equipo"]
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StandingsConfig {
    /// Override of the season file's points system, table by table
    #[serde(default)]
    pub points: Option<PointsOverride>,

    /// Fastest-lap bonus only applies to drivers finishing inside this many places
    #[serde(default)]
    pub fastest_lap_cutoff: Option<usize>,

    /// Whether results of drivers who left the grid still count for their team
    #[serde(default)]
    pub constructors_count_former: Option<bool>,

    /// Driver names that are seat placeholders, not people (skipped when counting drivers)
    #[serde(default)]
    pub placeholder_names: Option<Vec<String>>,
}

impl Default for StandingsConfig {
    fn default() -> Self {
        Self {
            points: None,
            fastest_lap_cutoff: Some(DEFAULT_FASTEST_LAP_CUTOFF),
            constructors_count_former: Some(true),
            placeholder_names: Some(vec![TEAM_CHANGE_PLACEHOLDER.to_string()]),
        }
    }
}

impl StandingsConfig {
    pub fn placeholder_names(&self) -> Vec<String> {
        self.placeholder_names
            .clone()
            .unwrap_or_else(|| vec![TEAM_CHANGE_PLACEHOLDER.to_string()])
    }
}

/// Partial points system. Missing tables keep the season file's values.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PointsOverride {
    #[serde(default)]
    pub race: Option<Vec<u32>>,
    #[serde(default)]
    pub sprint: Option<Vec<u32>>,
    #[serde(default)]
    pub fastest_lap: Option<u32>,
}

/// Rules the engine applies, resolved from config and the season file.
#[derive(Debug, Clone, PartialEq)]
pub struct StandingsRules {
    pub points: PointsSystem,
    pub fastest_lap_cutoff: usize,
    pub constructors_count_former: bool,
}

impl StandingsRules {
    /// Rules taken straight from the season file, with default cutoff and eligibility
    pub fn for_championship(championship: &Championship) -> Self {
        Self {
            points: championship.points_system.clone(),
            fastest_lap_cutoff: DEFAULT_FASTEST_LAP_CUTOFF,
            constructors_count_former: true,
        }
    }

    /// Apply a config on top of the season file's points system
    pub fn resolve(championship: &Championship, config: &StandingsConfig) -> Self {
        let mut points = championship.points_system.clone();
        if let Some(ref over) = config.points {
            if let Some(ref race) = over.race {
                points.race = race.clone();
            }
            if let Some(ref sprint) = over.sprint {
                points.sprint = sprint.clone();
            }
            if let Some(bonus) = over.fastest_lap {
                points.fastest_lap = bonus;
            }
        }

        Self {
            points,
            fastest_lap_cutoff: config
                .fastest_lap_cutoff
                .unwrap_or(DEFAULT_FASTEST_LAP_CUTOFF),
            constructors_count_former: config.constructors_count_former.unwrap_or(true),
        }
    }
}
