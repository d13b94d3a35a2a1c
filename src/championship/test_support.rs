use super::types::*;
use std::collections::BTreeMap;

pub fn team(id: &str) -> Team {
    Team {
        id: id.to_string(),
        name: format!("Team {}", id),
        color: "#ff0000".to_string(),
    }
}

pub fn driver(id: u32, team: &str, status: DriverStatus) -> Driver {
    Driver {
        id,
        name: format!("Driver {}", id),
        team: team.to_string(),
        number: id + 10,
        status,
    }
}

pub fn grand_prix(id: u32, is_sprint: bool) -> GrandPrix {
    GrandPrix {
        id,
        name: format!("GP {}", id),
        country: "Spain".to_string(),
        flag: "es".to_string(),
        circuit: "Circuit".to_string(),
        is_sprint,
        is_rain: false,
    }
}

pub fn race(order: &[u32], fastest_lap: Option<u32>) -> EventResult {
    EventResult {
        qualifying: order
            .iter()
            .map(|&driver_id| QualifyingEntry {
                driver_id,
                time: "1:30.000".to_string(),
            })
            .collect(),
        race: order.to_vec(),
        fastest_lap,
    }
}

pub fn points() -> PointsSystem {
    PointsSystem {
        race: vec![25, 18, 15, 12, 10, 8, 6, 4, 2, 1],
        sprint: vec![8, 7, 6, 5, 4, 3, 2, 1],
        fastest_lap: 1,
    }
}

/// Two teams, three active drivers, no events yet
pub fn championship() -> Championship {
    Championship {
        championship: ChampionshipInfo {
            name: "Liga Test".to_string(),
            season: "2025".to_string(),
        },
        teams: vec![team("red"), team("blue")],
        drivers: vec![
            driver(1, "red", DriverStatus::Active),
            driver(2, "blue", DriverStatus::Active),
            driver(3, "red", DriverStatus::Reserve),
        ],
        grand_prix: Vec::new(),
        results: BTreeMap::new(),
        points_system: points(),
        team_principals: vec![TeamPrincipal {
            team_id: "red".to_string(),
            name: "Boss Red".to_string(),
        }],
    }
}

/// Add an event with its result
pub fn with_event(
    mut championship: Championship,
    gp: GrandPrix,
    result: EventResult,
) -> Championship {
    championship.results.insert(gp.result_key(), result);
    championship.grand_prix.push(gp);
    championship
}
