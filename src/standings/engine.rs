use serde::Serialize;
use std::collections::{HashMap, HashSet};

use super::config::StandingsRules;
use crate::championship::{Championship, Driver, EventResult, Team};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DriverStanding {
    pub driver: Driver,
    pub team: Option<Team>, // None when the driver's team id is unknown
    pub points: u32,
    pub wins: u32,
    pub podiums: u32,
    pub position: usize, // 1-based
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConstructorStanding {
    pub team: Team,
    pub points: u32,
    pub wins: u32,
    pub position: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwardKind {
    Finish,
    FastestLap,
}

/// Points one driver earned in one event, either for a finishing place or
/// for the fastest lap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Award {
    pub driver_id: u32,
    pub position: usize, // 0-based finishing index
    pub points: u32,
    pub kind: AwardKind,
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    points: u32,
    wins: u32,
    podiums: u32,
}

impl Tally {
    fn add(&mut self, award: &Award) {
        // Totals saturate, oversized points tables must not abort the ranking
        self.points = self.points.saturating_add(award.points);
        if award.kind == AwardKind::Finish {
            if award.position == 0 {
                self.wins = self.wins.saturating_add(1);
            }
            if award.position < 3 {
                self.podiums = self.podiums.saturating_add(1);
            }
        }
    }
}

/// Awards for a single event result.
///
/// The sprint table applies when the result's event is flagged as a sprint;
/// a result with no matching event is scored with the race table. A driver
/// listed twice in the finishing order only scores for the first entry.
pub fn event_awards(
    championship: &Championship,
    rules: &StandingsRules,
    result_key: &str,
    result: &EventResult,
) -> Vec<Award> {
    let is_sprint = championship
        .grand_prix_for_key(result_key)
        .is_some_and(|gp| gp.is_sprint);

    let mut seen = HashSet::new();
    let mut awards: Vec<Award> = result
        .race
        .iter()
        .enumerate()
        .filter(|&(_, driver_id)| seen.insert(*driver_id))
        .map(|(position, &driver_id)| Award {
            driver_id,
            position,
            points: rules.points.points_at(is_sprint, position),
            kind: AwardKind::Finish,
        })
        .collect();

    if let Some(driver_id) = result.fastest_lap {
        if let Some(position) = result.finishing_index(driver_id) {
            if position < rules.fastest_lap_cutoff {
                awards.push(Award {
                    driver_id,
                    position,
                    points: rules.points.fastest_lap,
                    kind: AwardKind::FastestLap,
                });
            }
        }
    }

    awards
}

/// Awards for every result in the season
fn season_awards<'a>(
    championship: &'a Championship,
    rules: &'a StandingsRules,
) -> impl Iterator<Item = Award> + 'a {
    championship
        .results
        .iter()
        .flat_map(move |(key, result)| event_awards(championship, rules, key, result))
}

/// Sort by points descending, then wins descending. The sort is stable, so
/// remaining ties keep dataset order. Positions are assigned 1-based.
fn rank<T>(
    rows: &mut [T],
    key: impl Fn(&T) -> (u32, u32),
    mut set_position: impl FnMut(&mut T, usize),
) {
    rows.sort_by(|a, b| {
        let (points_a, wins_a) = key(a);
        let (points_b, wins_b) = key(b);
        points_b.cmp(&points_a).then(wins_b.cmp(&wins_a))
    });
    for (idx, row) in rows.iter_mut().enumerate() {
        set_position(row, idx + 1);
    }
}

/// Driver championship.
///
/// Only drivers still on the grid (not Former) get a row, and only they
/// accrue points. Eligibility is read from the driver's current status, so a
/// driver who left mid-season loses every point scored before leaving.
pub fn compute_driver_standings(
    championship: &Championship,
    rules: &StandingsRules,
) -> Vec<DriverStanding> {
    let eligible: Vec<&Driver> = championship
        .drivers
        .iter()
        .filter(|d| d.status.is_eligible())
        .collect();

    let mut tallies: HashMap<u32, Tally> =
        eligible.iter().map(|d| (d.id, Tally::default())).collect();

    for award in season_awards(championship, rules) {
        if let Some(tally) = tallies.get_mut(&award.driver_id) {
            tally.add(&award);
        }
    }

    let mut standings: Vec<DriverStanding> = eligible
        .into_iter()
        .map(|driver| {
            let tally = tallies.get(&driver.id).copied().unwrap_or_default();
            DriverStanding {
                driver: driver.clone(),
                team: championship.team(&driver.team).cloned(),
                points: tally.points,
                wins: tally.wins,
                podiums: tally.podiums,
                position: 0,
            }
        })
        .collect();

    rank(
        &mut standings,
        |s| (s.points, s.wins),
        |s, position| s.position = position,
    );
    standings
}

/// Constructor championship.
///
/// Every team gets a row. Points go to the finishing driver's current team.
/// Former drivers' results still count unless `constructors_count_former`
/// is turned off.
pub fn compute_constructor_standings(
    championship: &Championship,
    rules: &StandingsRules,
) -> Vec<ConstructorStanding> {
    let mut tallies: HashMap<&str, Tally> = championship
        .teams
        .iter()
        .map(|t| (t.id.as_str(), Tally::default()))
        .collect();

    for award in season_awards(championship, rules) {
        let Some(driver) = championship.driver(award.driver_id) else {
            continue;
        };
        if !rules.constructors_count_former && !driver.status.is_eligible() {
            continue;
        }
        if let Some(tally) = tallies.get_mut(driver.team.as_str()) {
            tally.add(&award);
        }
    }

    let mut standings: Vec<ConstructorStanding> = championship
        .teams
        .iter()
        .map(|team| {
            let tally = tallies.get(team.id.as_str()).copied().unwrap_or_default();
            ConstructorStanding {
                team: team.clone(),
                points: tally.points,
                wins: tally.wins,
                position: 0,
            }
        })
        .collect();

    rank(
        &mut standings,
        |s| (s.points, s.wins),
        |s, position| s.position = position,
    );
    standings
}
