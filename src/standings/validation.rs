use std::collections::HashSet;

use super::config::StandingsConfig;
use crate::championship::Championship;

/// Check a season file for referential gaps and broken invariants.
/// Returns every problem found, not just the first.
///
/// None of these stop the standings from being computed; the engine skips
/// whatever it cannot resolve.
pub fn validate_championship(championship: &Championship) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let mut team_ids = HashSet::new();
    for team in &championship.teams {
        if !team_ids.insert(team.id.as_str()) {
            errors.push(format!("teams: duplicate id '{}'", team.id));
        }
    }

    let mut driver_ids = HashSet::new();
    for driver in &championship.drivers {
        if !driver_ids.insert(driver.id) {
            errors.push(format!("drivers: duplicate id {}", driver.id));
        }
        if !team_ids.contains(driver.team.as_str()) {
            errors.push(format!(
                "drivers[{}] '{}': unknown team '{}'",
                driver.id, driver.name, driver.team
            ));
        }
    }

    let mut event_ids = HashSet::new();
    for gp in &championship.grand_prix {
        if !event_ids.insert(gp.id) {
            errors.push(format!("grandPrix: duplicate id {}", gp.id));
        }
    }

    for (key, result) in &championship.results {
        if championship.grand_prix_for_key(key).is_none() {
            errors.push(format!("results['{}']: no grand prix with this id", key));
        }

        let mut seen = HashSet::new();
        for (i, driver_id) in result.race.iter().enumerate() {
            if !driver_ids.contains(driver_id) {
                errors.push(format!(
                    "results['{}'].race[{}]: unknown driver {}",
                    key, i, driver_id
                ));
            }
            if !seen.insert(*driver_id) {
                errors.push(format!(
                    "results['{}'].race[{}]: driver {} already classified",
                    key, i, driver_id
                ));
            }
        }

        for (i, entry) in result.qualifying.iter().enumerate() {
            if !driver_ids.contains(&entry.driver_id) {
                errors.push(format!(
                    "results['{}'].qualifying[{}]: unknown driver {}",
                    key, i, entry.driver_id
                ));
            }
        }

        if let Some(driver_id) = result.fastest_lap {
            if !driver_ids.contains(&driver_id) {
                errors.push(format!(
                    "results['{}'].fastestLap: unknown driver {}",
                    key, driver_id
                ));
            } else if result.finishing_index(driver_id).is_none() {
                errors.push(format!(
                    "results['{}'].fastestLap: driver {} is not in the race order",
                    key, driver_id
                ));
            }
        }
    }

    for (i, principal) in championship.team_principals.iter().enumerate() {
        if !team_ids.contains(principal.team_id.as_str()) {
            errors.push(format!(
                "teamPrincipals[{}]: unknown team '{}'",
                i, principal.team_id
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate standings rules from the config file at startup.
pub fn validate_standings(config: &StandingsConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref points) = config.points {
        if let Some(ref race) = points.race {
            if race.is_empty() {
                errors.push("standings.points.race: must not be empty".to_string());
            }
        }
        if let Some(ref sprint) = points.sprint {
            if sprint.is_empty() {
                errors.push("standings.points.sprint: must not be empty".to_string());
            }
        }
    }

    if let Some(cutoff) = config.fastest_lap_cutoff {
        if cutoff == 0 {
            errors.push("standings.fastest_lap_cutoff: must be at least 1".to_string());
        }
    }

    if let Some(ref names) = config.placeholder_names {
        for (i, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                errors.push(format!("standings.placeholder_names[{}]: must not be blank", i));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::championship::test_support::{championship, driver, grand_prix, race, with_event};
    use crate::championship::{DriverStatus, TeamPrincipal};
    use crate::standings::PointsOverride;

    #[test]
    fn test_valid_championship() {
        let c = with_event(championship(), grand_prix(1, false), race(&[1, 2, 3], Some(2)));
        assert!(validate_championship(&c).is_ok());
    }

    #[test]
    fn test_unknown_team_reported() {
        let mut c = championship();
        c.drivers.push(driver(5, "green", DriverStatus::Active));
        let errors = validate_championship(&c).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("unknown team 'green'"));
    }

    #[test]
    fn test_result_problems_all_reported() {
        let mut c = with_event(championship(), grand_prix(1, false), race(&[1, 42, 1], Some(3)));
        c.results.insert("7".to_string(), race(&[2], None));
        c.team_principals.push(TeamPrincipal {
            team_id: "green".to_string(),
            name: "Nobody".to_string(),
        });

        let errors = validate_championship(&c).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("race[1]: unknown driver 42")));
        assert!(errors.iter().any(|e| e.contains("qualifying[1]: unknown driver 42")));
        assert!(errors.iter().any(|e| e.contains("race[2]: driver 1 already classified")));
        assert!(errors.iter().any(|e| e.contains("fastestLap: driver 3 is not in the race order")));
        assert!(errors.iter().any(|e| e.contains("results['7']: no grand prix")));
        assert!(errors.iter().any(|e| e.contains("teamPrincipals[1]")));
    }

    #[test]
    fn test_duplicate_ids_reported() {
        let mut c = championship();
        c.drivers.push(driver(1, "red", DriverStatus::Reserve));
        c.grand_prix.push(grand_prix(1, false));
        c.grand_prix.push(grand_prix(1, true));
        let errors = validate_championship(&c).unwrap_err();
        assert!(errors.iter().any(|e| e == "drivers: duplicate id 1"));
        assert!(errors.iter().any(|e| e == "grandPrix: duplicate id 1"));
    }

    #[test]
    fn test_default_standings_config_is_valid() {
        assert!(validate_standings(&StandingsConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_standings_config() {
        let config = StandingsConfig {
            points: Some(PointsOverride {
                race: Some(vec![]),
                sprint: None,
                fastest_lap: None,
            }),
            fastest_lap_cutoff: Some(0),
            constructors_count_former: None,
            placeholder_names: Some(vec!["  ".to_string()]),
        };
        let errors = validate_standings(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("standings.points.race"));
        assert!(errors[1].contains("fastest_lap_cutoff"));
        assert!(errors[2].contains("placeholder_names[0]"));
    }
}
