use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::championship::{Championship, GrandPrix};
use crate::standings::{
    event_awards, event_status, AwardKind, ConstructorStanding, DriverStanding, EventStatus,
    StandingsRules, Summary,
};

/// Rows shown by the compact tables
pub const COMPACT_ROWS: usize = 5;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Parse a "#rrggbb" team color
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Team accent bar, colored when possible. Unknown teams get a grey bar.
fn accent(color: Option<&str>, use_colors: bool) -> String {
    if !use_colors {
        return "|".to_string();
    }
    let (r, g, b) = color.and_then(parse_hex_color).unwrap_or((0x66, 0x66, 0x66));
    "▌".truecolor(r, g, b).to_string()
}

/// Truncate to `max_width` characters, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Pad to a fixed number of characters (format width counts chars)
fn pad(text: &str, width: usize) -> String {
    format!("{:<width$}", truncate_name(text, width), width = width)
}

/// Width of the name column: longest name, squeezed to fit the terminal
fn name_width<'a>(names: impl Iterator<Item = &'a str>, fixed_width: usize) -> usize {
    let longest = names.map(|n| n.chars().count()).max().unwrap_or(0).max(4);
    match get_terminal_width() {
        Some(term) if term > fixed_width + 10 => longest.min(term - fixed_width),
        Some(_) => longest.min(20),
        None => longest,
    }
}

fn position_cell(position: usize, use_colors: bool) -> String {
    let text = format!("{:>3}", position);
    if !use_colors {
        return text;
    }
    match position {
        1 => text.bold().yellow().to_string(),
        2 => text.bold().white().to_string(),
        3 => text.bold().truecolor(0xd9, 0x77, 0x06).to_string(),
        _ => text.dimmed().to_string(),
    }
}

/// Driver championship table.
///
/// Compact mode shows only the top rows with position, driver and points.
pub fn format_driver_table(standings: &[DriverStanding], compact: bool, use_colors: bool) -> String {
    if standings.is_empty() {
        return "No drivers in the championship.".to_string();
    }

    let rows = if compact {
        &standings[..standings.len().min(COMPACT_ROWS)]
    } else {
        standings
    };

    let team_names: Vec<&str> = rows
        .iter()
        .map(|s| s.team.as_ref().map_or("-", |t| t.name.as_str()))
        .collect();

    // pos(3) + bar(2) + number(4) + points(6) + separators
    let fixed = if compact { 18 } else { 18 + 40 };
    let width = name_width(rows.iter().map(|s| s.driver.name.as_str()), fixed);
    let team_width = team_names.iter().map(|n| n.chars().count()).max().unwrap_or(4).clamp(4, 24);

    let mut lines = Vec::with_capacity(rows.len() + 1);
    let header = if compact {
        format!("{:>3}  {}  {:>5}", "POS", pad("DRIVER", width + 6), "PTS")
    } else {
        format!(
            "{:>3}  {}  {}  {:<8}  {:>4}  {:>7}  {:>5}",
            "POS",
            pad("DRIVER", width + 6),
            pad("TEAM", team_width),
            "STATUS",
            "WINS",
            "PODIUMS",
            "PTS"
        )
    };
    lines.push(if use_colors {
        header.bold().to_string()
    } else {
        header
    });

    for (standing, team_name) in rows.iter().zip(team_names) {
        let color = standing.team.as_ref().map(|t| t.color.as_str());
        let driver_cell = format!(
            "{} {:>3} {}",
            accent(color, use_colors),
            standing.driver.number,
            pad(&standing.driver.name, width)
        );
        let points = format!("{:>5}", standing.points);
        let points = if use_colors {
            points.bold().to_string()
        } else {
            points
        };

        if compact {
            lines.push(format!(
                "{}  {}  {}",
                position_cell(standing.position, use_colors),
                driver_cell,
                points
            ));
        } else {
            lines.push(format!(
                "{}  {}  {}  {:<8}  {:>4}  {:>7}  {}",
                position_cell(standing.position, use_colors),
                driver_cell,
                pad(team_name, team_width),
                standing.driver.status.label(),
                standing.wins,
                standing.podiums,
                points
            ));
        }
    }

    lines.join("\n")
}

/// Constructor championship table.
///
/// With `expand`, each team is followed by its principal and its drivers.
pub fn format_constructor_table(
    standings: &[ConstructorStanding],
    championship: &Championship,
    compact: bool,
    expand: bool,
    use_colors: bool,
) -> String {
    if standings.is_empty() {
        return "No teams in the championship.".to_string();
    }

    let rows = if compact {
        &standings[..standings.len().min(COMPACT_ROWS)]
    } else {
        standings
    };
    let width = name_width(rows.iter().map(|s| s.team.name.as_str()), 24);

    let mut lines = Vec::new();
    let header = if compact {
        format!("{:>3}  {}  {:>5}", "POS", pad("TEAM", width + 2), "PTS")
    } else {
        format!("{:>3}  {}  {:>4}  {:>5}", "POS", pad("TEAM", width + 2), "WINS", "PTS")
    };
    lines.push(if use_colors {
        header.bold().to_string()
    } else {
        header
    });

    for standing in rows {
        let team_cell = format!(
            "{} {}",
            accent(Some(&standing.team.color), use_colors),
            pad(&standing.team.name, width)
        );
        let points = format!("{:>5}", standing.points);
        let points = if use_colors {
            points.bold().to_string()
        } else {
            points
        };

        if compact {
            lines.push(format!(
                "{}  {}  {}",
                position_cell(standing.position, use_colors),
                team_cell,
                points
            ));
        } else {
            lines.push(format!(
                "{}  {}  {:>4}  {}",
                position_cell(standing.position, use_colors),
                team_cell,
                standing.wins,
                points
            ));
        }

        if expand {
            lines.extend(format_team_details(championship, &standing.team.id, use_colors));
        }
    }

    lines.join("\n")
}

/// Principal and drivers of one team, indented under its row
pub fn format_team_details(championship: &Championship, team_id: &str, use_colors: bool) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(principal) = championship.principal(team_id) {
        let line = format!("       Principal: {}", principal.name);
        lines.push(if use_colors {
            line.dimmed().to_string()
        } else {
            line
        });
    }

    let drivers: Vec<_> = championship.team_drivers(team_id).collect();
    if drivers.is_empty() {
        lines.push("       No drivers".to_string());
    }
    for driver in drivers {
        let line = format!(
            "       #{:<3} {}  ({})",
            driver.number,
            driver.name,
            driver.status.label()
        );
        lines.push(if use_colors && !driver.status.is_eligible() {
            line.dimmed().to_string()
        } else {
            line
        });
    }

    lines
}

fn status_tag(status: EventStatus, use_colors: bool) -> String {
    let label = status.label();
    if !use_colors {
        return label.to_string();
    }
    match status {
        EventStatus::Complete => label.green().to_string(),
        EventStatus::QualifyingOnly => label.yellow().to_string(),
        EventStatus::Pending => label.dimmed().to_string(),
    }
}

/// One line per calendar round
pub fn format_calendar(championship: &Championship, use_colors: bool) -> String {
    if championship.grand_prix.is_empty() {
        return "No events on the calendar.".to_string();
    }

    let width = name_width(championship.grand_prix.iter().map(|gp| gp.name.as_str()), 50);
    let circuit_width = championship
        .grand_prix
        .iter()
        .map(|gp| gp.circuit.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(1, 30);

    championship
        .grand_prix
        .iter()
        .map(|gp| {
            let mut tags = Vec::new();
            if gp.is_sprint {
                tags.push(if use_colors {
                    "SPRINT".magenta().to_string()
                } else {
                    "SPRINT".to_string()
                });
            }
            if gp.is_rain {
                tags.push(if use_colors {
                    "RAIN".blue().to_string()
                } else {
                    "RAIN".to_string()
                });
            }
            tags.push(status_tag(event_status(championship, gp), use_colors));

            let name = pad(&gp.name, width);
            format!(
                "{:>3}. {}  {}  {}",
                gp.id,
                if use_colors {
                    name.bold().to_string()
                } else {
                    name
                },
                pad(&gp.circuit, circuit_width),
                tags.join(" ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Qualifying and race classification of one round, with points earned
pub fn format_race_card(
    championship: &Championship,
    rules: &StandingsRules,
    gp: &GrandPrix,
    use_colors: bool,
) -> String {
    let mut lines = Vec::new();
    let title = format!("{} ({}, {})", gp.name, gp.circuit, gp.country);
    lines.push(if use_colors {
        title.bold().to_string()
    } else {
        title
    });

    let result = match championship.result_for(gp) {
        Some(result) if !result.qualifying.is_empty() => result,
        _ => {
            lines.push("No results yet.".to_string());
            return lines.join("\n");
        }
    };

    let driver_label = |driver_id: u32| -> (String, Option<String>) {
        match championship.driver(driver_id) {
            Some(driver) => {
                let team = championship.team(&driver.team);
                let label = match team {
                    Some(team) => format!("{} ({})", driver.name, team.name),
                    None => driver.name.clone(),
                };
                (label, team.map(|t| t.color.clone()))
            }
            None => (format!("Unknown driver {}", driver_id), None),
        }
    };

    lines.push(String::new());
    lines.push("Qualifying".to_string());
    for (idx, entry) in result.qualifying.iter().enumerate() {
        let (label, color) = driver_label(entry.driver_id);
        lines.push(format!(
            "  P{:<3}{} {}  {}",
            idx + 1,
            accent(color.as_deref(), use_colors),
            label,
            entry.time
        ));
    }

    lines.push(String::new());
    let heading = if gp.is_sprint { "Sprint" } else { "Race" };
    lines.push(heading.to_string());
    if result.race.is_empty() {
        lines.push("  Not run yet.".to_string());
        return lines.join("\n");
    }

    let awards = event_awards(championship, rules, &gp.result_key(), result);
    for (idx, &driver_id) in result.race.iter().enumerate() {
        let (label, color) = driver_label(driver_id);
        let finish_points: u32 = awards
            .iter()
            .filter(|a| a.driver_id == driver_id && a.position == idx && a.kind == AwardKind::Finish)
            .map(|a| a.points)
            .sum();
        let fastest = awards
            .iter()
            .any(|a| a.driver_id == driver_id && a.position == idx && a.kind == AwardKind::FastestLap);

        let mut line = format!(
            "  P{:<3}{} {}",
            idx + 1,
            accent(color.as_deref(), use_colors),
            label
        );
        if finish_points > 0 {
            line.push_str(&format!("  +{}", finish_points));
        }
        if fastest {
            let marker = format!("  fastest lap +{}", rules.points.fastest_lap);
            line.push_str(&if use_colors {
                marker.magenta().to_string()
            } else {
                marker
            });
        }
        lines.push(line);
    }

    if let Some(driver_id) = result.fastest_lap {
        if !awards.iter().any(|a| a.kind == AwardKind::FastestLap) {
            let (label, _) = driver_label(driver_id);
            lines.push(format!("  Fastest lap: {} (no bonus)", label));
        }
    }

    lines.join("\n")
}

/// Season overview: headline numbers
pub fn format_summary(summary: &Summary, use_colors: bool) -> String {
    let title = format!("{}, season {}", summary.championship, summary.season);
    let mut lines = vec![if use_colors {
        title.bold().to_string()
    } else {
        title
    }];

    let leader_line = |label: &str, leader: &Option<crate::standings::Leader>| match leader {
        Some(l) => format!(
            "{:<13}{} {} ({} pts)",
            label,
            accent(l.color.as_deref(), use_colors),
            l.name,
            l.points
        ),
        None => format!("{:<13}-", label),
    };

    lines.push(leader_line("Leader:", &summary.leader));
    lines.push(leader_line("Leading team:", &summary.leading_team));
    lines.push(format!("{:<13}{}", "Drivers:", summary.drivers));
    lines.push(format!(
        "{:<13}{}/{}",
        "Races:", summary.completed_events, summary.total_events
    ));

    lines.join("\n")
}

/// Driver standings as tab-separated values for scripting
/// Columns: position, number, driver, team, status, wins, podiums, points (no headers, no colors)
pub fn format_drivers_tsv(standings: &[DriverStanding]) -> String {
    standings
        .iter()
        .map(|s| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                s.position,
                s.driver.number,
                s.driver.name,
                s.team.as_ref().map_or("", |t| t.name.as_str()),
                s.driver.status.label(),
                s.wins,
                s.podiums,
                s.points
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Constructor standings as tab-separated values
/// Columns: position, team, wins, points
pub fn format_constructors_tsv(standings: &[ConstructorStanding]) -> String {
    standings
        .iter()
        .map(|s| format!("{}\t{}\t{}\t{}", s.position, s.team.name, s.wins, s.points))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::championship::test_support::{championship, grand_prix, race, with_event};
    use crate::standings::{compute_constructor_standings, compute_driver_standings};

    fn season() -> Championship {
        let c = with_event(championship(), grand_prix(1, false), race(&[2, 1, 3], Some(1)));
        let mut c = with_event(c, grand_prix(2, true), race(&[], None));
        c.grand_prix.push(grand_prix(3, false));
        c
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#dc0000"), Some((0xdc, 0, 0)));
        assert_eq!(parse_hex_color("dc0000"), None);
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Short", 20), "Short");
        assert_eq!(truncate_name("Fernando Alonso Díaz", 10), "Fernand...");
        assert_eq!(truncate_name("Ñandú", 2), "Ña");
    }

    #[test]
    fn test_driver_table_plain() {
        let c = season();
        let standings = compute_driver_standings(&c, &StandingsRules::for_championship(&c));
        let table = format_driver_table(&standings, false, false);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("PODIUMS"));
        assert!(lines[1].starts_with("  1"));
        assert!(lines[1].contains("Driver 2"));
        assert!(lines[1].contains("Team blue"));
        assert!(lines[1].trim_end().ends_with("25"));
        assert!(lines[2].contains("Driver 1"));
        assert!(lines[2].trim_end().ends_with("19"));
    }

    #[test]
    fn test_driver_table_compact_limits_rows() {
        let mut c = season();
        for id in 10..20 {
            c.drivers.push(crate::championship::test_support::driver(
                id,
                "red",
                crate::championship::DriverStatus::Active,
            ));
        }
        let standings = compute_driver_standings(&c, &StandingsRules::for_championship(&c));
        let table = format_driver_table(&standings, true, false);
        assert_eq!(table.lines().count(), 1 + COMPACT_ROWS);
        assert!(!table.contains("STATUS"));
    }

    #[test]
    fn test_empty_tables() {
        assert_eq!(format_driver_table(&[], false, false), "No drivers in the championship.");
        assert_eq!(
            format_constructor_table(&[], &season(), false, false, false),
            "No teams in the championship."
        );
    }

    #[test]
    fn test_constructor_table_expanded() {
        let c = season();
        let standings = compute_constructor_standings(&c, &StandingsRules::for_championship(&c));
        let table = format_constructor_table(&standings, &c, false, true, false);

        assert!(table.contains("Principal: Boss Red"));
        assert!(table.contains("#11  Driver 1  (Titular)"));
        assert!(table.contains("#13  Driver 3  (Reserva)"));
        let red = table.find("Team red").unwrap();
        let blue = table.find("Team blue").unwrap();
        assert!(red < blue); // red 18 + 15 + 1 = 34 beats blue 25
    }

    #[test]
    fn test_calendar() {
        let calendar = format_calendar(&season(), false);
        let lines: Vec<&str> = calendar.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("GP 1") && lines[0].ends_with("COMPLETE"));
        assert!(lines[1].contains("SPRINT"));
        assert!(lines[1].ends_with("PENDING"));
        assert!(lines[2].ends_with("PENDING"));
    }

    #[test]
    fn test_race_card_points_and_fastest_lap() {
        let c = season();
        let rules = StandingsRules::for_championship(&c);
        let card = format_race_card(&c, &rules, &c.grand_prix[0], false);

        assert!(card.contains("Qualifying"));
        assert!(card.contains("P1  | Driver 2 (Team blue)  +25"));
        assert!(card.contains("P2  | Driver 1 (Team red)  +18  fastest lap +1"));
        assert!(card.contains("P3  | Driver 3 (Team red)  +15"));
    }

    #[test]
    fn test_race_card_without_results() {
        let c = season();
        let rules = StandingsRules::for_championship(&c);
        let card = format_race_card(&c, &rules, &c.grand_prix[2], false);
        assert!(card.ends_with("No results yet."));
    }

    #[test]
    fn test_summary() {
        let c = season();
        let rules = StandingsRules::for_championship(&c);
        let drivers = compute_driver_standings(&c, &rules);
        let constructors = compute_constructor_standings(&c, &rules);
        let summary = Summary::build(&c, &drivers, &constructors, &[]);
        let text = format_summary(&summary, false);

        assert!(text.starts_with("Liga Test, season 2025"));
        assert!(text.contains("Leader:      | Driver 2 (25 pts)"));
        assert!(text.contains("Leading team:| Team red (34 pts)"));
        assert!(text.contains("Races:       2/3"));
    }

    #[test]
    fn test_tsv() {
        let c = season();
        let rules = StandingsRules::for_championship(&c);
        let drivers = format_drivers_tsv(&compute_driver_standings(&c, &rules));
        assert_eq!(
            drivers.lines().next().unwrap(),
            "1\t12\tDriver 2\tTeam blue\tTitular\t1\t1\t25"
        );
        let constructors = format_constructors_tsv(&compute_constructor_standings(&c, &rules));
        assert_eq!(constructors.lines().next().unwrap(), "1\tTeam red\t0\t34");
    }
}
