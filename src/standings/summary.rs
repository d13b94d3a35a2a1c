use serde::Serialize;
use std::collections::HashSet;

use super::engine::{ConstructorStanding, DriverStanding};
use crate::championship::{Championship, Driver, EventResult, GrandPrix};

/// Number of distinct people on the grid.
///
/// Former drivers and seat placeholders are skipped, and a driver listed under
/// two teams (same name, two ids) counts once.
pub fn count_distinct_drivers(drivers: &[Driver], placeholder_names: &[String]) -> usize {
    drivers
        .iter()
        .filter(|d| !placeholder_names.iter().any(|p| p == &d.name))
        .filter(|d| d.status.is_eligible())
        .map(|d| d.name.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Events with a result entry, whatever its contents
pub fn completed_events(championship: &Championship) -> usize {
    championship.results.len()
}

pub fn total_events(championship: &Championship) -> usize {
    championship.grand_prix.len()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventStatus {
    Pending,
    QualifyingOnly,
    Complete,
}

impl EventStatus {
    pub fn of(result: Option<&EventResult>) -> Self {
        match result {
            Some(r) if !r.qualifying.is_empty() && !r.race.is_empty() => EventStatus::Complete,
            Some(r) if !r.qualifying.is_empty() => EventStatus::QualifyingOnly,
            _ => EventStatus::Pending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EventStatus::Pending => "PENDING",
            EventStatus::QualifyingOnly => "QUALIFYING",
            EventStatus::Complete => "COMPLETE",
        }
    }
}

/// Status of one calendar entry
pub fn event_status(championship: &Championship, gp: &GrandPrix) -> EventStatus {
    EventStatus::of(championship.result_for(gp))
}

#[derive(Debug, Clone, Serialize)]
pub struct Leader {
    pub name: String,
    pub points: u32,
    pub color: Option<String>,
}

/// Headline numbers for the season overview
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub championship: String,
    pub season: String,
    pub leader: Option<Leader>,
    pub leading_team: Option<Leader>,
    pub drivers: usize,
    pub completed_events: usize,
    pub total_events: usize,
}

impl Summary {
    pub fn build(
        championship: &Championship,
        drivers: &[DriverStanding],
        constructors: &[ConstructorStanding],
        placeholder_names: &[String],
    ) -> Self {
        Self {
            championship: championship.championship.name.clone(),
            season: championship.championship.season.clone(),
            leader: drivers.first().map(|s| Leader {
                name: s.driver.name.clone(),
                points: s.points,
                color: s.team.as_ref().map(|t| t.color.clone()),
            }),
            leading_team: constructors.first().map(|s| Leader {
                name: s.team.name.clone(),
                points: s.points,
                color: Some(s.team.color.clone()),
            }),
            drivers: count_distinct_drivers(&championship.drivers, placeholder_names),
            completed_events: completed_events(championship),
            total_events: total_events(championship),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::championship::test_support::{championship, driver, grand_prix, race, with_event};
    use crate::championship::{DriverStatus, QualifyingEntry};
    use crate::standings::{compute_constructor_standings, compute_driver_standings, StandingsRules};

    fn placeholders() -> Vec<String> {
        vec!["Cambio de equipo".to_string()]
    }

    #[test]
    fn test_count_skips_former_and_placeholders() {
        let mut drivers = championship().drivers;
        drivers.push(driver(4, "blue", DriverStatus::Former));
        let mut placeholder = driver(5, "blue", DriverStatus::Active);
        placeholder.name = "Cambio de equipo".to_string();
        drivers.push(placeholder);

        assert_eq!(count_distinct_drivers(&drivers, &placeholders()), 3);
    }

    #[test]
    fn test_count_dedups_by_name() {
        let mut drivers = championship().drivers;
        let mut moved = driver(6, "blue", DriverStatus::Active);
        moved.name = drivers[0].name.clone();
        drivers.push(moved);

        assert_eq!(count_distinct_drivers(&drivers, &placeholders()), 3);
    }

    #[test]
    fn test_event_status() {
        assert_eq!(EventStatus::of(None), EventStatus::Pending);
        assert_eq!(
            EventStatus::of(Some(&EventResult::default())),
            EventStatus::Pending
        );

        let qualifying_only = EventResult {
            qualifying: vec![QualifyingEntry {
                driver_id: 1,
                time: "1:31.200".to_string(),
            }],
            race: vec![],
            fastest_lap: None,
        };
        assert_eq!(
            EventStatus::of(Some(&qualifying_only)),
            EventStatus::QualifyingOnly
        );
        assert_eq!(
            EventStatus::of(Some(&race(&[1, 2], None))),
            EventStatus::Complete
        );
    }

    #[test]
    fn test_summary_build() {
        let mut c = with_event(championship(), grand_prix(1, false), race(&[2, 1], None));
        c.grand_prix.push(grand_prix(2, true));
        let rules = StandingsRules::for_championship(&c);
        let drivers = compute_driver_standings(&c, &rules);
        let constructors = compute_constructor_standings(&c, &rules);

        let summary = Summary::build(&c, &drivers, &constructors, &placeholders());
        assert_eq!(summary.championship, "Liga Test");
        assert_eq!(summary.leader.as_ref().unwrap().name, "Driver 2");
        assert_eq!(summary.leader.as_ref().unwrap().points, 25);
        assert_eq!(summary.leading_team.as_ref().unwrap().name, "Team blue");
        assert_eq!(summary.drivers, 3);
        assert_eq!(summary.completed_events, 1);
        assert_eq!(summary.total_events, 2);
    }

    #[test]
    fn test_summary_of_empty_season() {
        let mut c = championship();
        c.drivers.clear();
        c.teams.clear();
        let summary = Summary::build(&c, &[], &[], &placeholders());
        assert!(summary.leader.is_none());
        assert!(summary.leading_team.is_none());
        assert_eq!(summary.completed_events, 0);
    }
}
