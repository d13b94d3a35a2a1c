use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub color: String, // "#rrggbb", display only
}

/// Seat status of a driver.
///
/// The season file uses the Spanish labels; the English names are accepted too.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum DriverStatus {
    #[serde(rename = "Titular", alias = "Active")]
    Active,
    #[serde(rename = "Reserva", alias = "Reserve")]
    Reserve,
    #[serde(rename = "Expiloto", alias = "Former")]
    Former,
}

impl DriverStatus {
    /// Former drivers have left the grid and are not ranked
    pub fn is_eligible(self) -> bool {
        !matches!(self, DriverStatus::Former)
    }

    pub fn label(self) -> &'static str {
        match self {
            DriverStatus::Active => "Titular",
            DriverStatus::Reserve => "Reserva",
            DriverStatus::Former => "Expiloto",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Driver {
    pub id: u32,
    pub name: String,
    pub team: String, // Team.id
    pub number: u32,
    #[serde(rename = "estado", alias = "status")]
    pub status: DriverStatus,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamPrincipal {
    pub team_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GrandPrix {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub flag: String,
    #[serde(default)]
    pub circuit: String,
    #[serde(default)]
    pub is_sprint: bool,
    #[serde(default)]
    pub is_rain: bool,
}

impl GrandPrix {
    /// Key of this event in the results map
    pub fn result_key(&self) -> String {
        self.id.to_string()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QualifyingEntry {
    pub driver_id: u32,
    pub time: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventResult {
    #[serde(default)]
    pub qualifying: Vec<QualifyingEntry>,
    /// Finishing order, index 0 is the winner
    #[serde(default)]
    pub race: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fastest_lap: Option<u32>,
}

impl EventResult {
    /// 0-based finishing index of a driver, if classified
    pub fn finishing_index(&self, driver_id: u32) -> Option<usize> {
        self.race.iter().position(|&id| id == driver_id)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PointsSystem {
    pub race: Vec<u32>,
    pub sprint: Vec<u32>,
    pub fastest_lap: u32,
}

impl PointsSystem {
    /// Points table for an event: the sprint table for sprint events, else the race table
    pub fn table(&self, is_sprint: bool) -> &[u32] {
        if is_sprint {
            &self.sprint
        } else {
            &self.race
        }
    }

    /// Points awarded at a 0-based finishing position. Positions past the end of the table score zero.
    pub fn points_at(&self, is_sprint: bool, position: usize) -> u32 {
        self.table(is_sprint).get(position).copied().unwrap_or(0)
    }
}

impl Default for PointsSystem {
    fn default() -> Self {
        Self {
            race: vec![25, 18, 15, 12, 10, 8, 6, 4, 2, 1],
            sprint: vec![8, 7, 6, 5, 4, 3, 2, 1],
            fastest_lap: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ChampionshipInfo {
    pub name: String,
    pub season: String,
}

/// A full season: the single input the standings are computed from.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Championship {
    pub championship: ChampionshipInfo,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub drivers: Vec<Driver>,
    #[serde(default)]
    pub grand_prix: Vec<GrandPrix>,
    #[serde(default)]
    pub results: BTreeMap<String, EventResult>,
    #[serde(default)]
    pub points_system: PointsSystem,
    #[serde(default)]
    pub team_principals: Vec<TeamPrincipal>,
}

impl Championship {
    pub fn team(&self, team_id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    pub fn driver(&self, driver_id: u32) -> Option<&Driver> {
        self.drivers.iter().find(|d| d.id == driver_id)
    }

    pub fn grand_prix_for_key(&self, key: &str) -> Option<&GrandPrix> {
        self.grand_prix.iter().find(|gp| gp.result_key() == key)
    }

    pub fn result_for(&self, gp: &GrandPrix) -> Option<&EventResult> {
        self.results.get(&gp.result_key())
    }

    pub fn principal(&self, team_id: &str) -> Option<&TeamPrincipal> {
        self.team_principals.iter().find(|tp| tp.team_id == team_id)
    }

    /// Drivers currently or previously mapped to a team, in dataset order
    pub fn team_drivers<'a>(&'a self, team_id: &'a str) -> impl Iterator<Item = &'a Driver> + 'a {
        self.drivers.iter().filter(move |d| d.team == team_id)
    }
}
