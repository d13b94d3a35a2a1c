use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table, TableState, Tabs};

use crate::output::{format_race_card, format_team_details};
use crate::standings::{event_status, EventStatus};
use crate::tui::app::{App, InputMode, View};

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 6 || area.width < 30 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Tabs(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1), // Title bar
        Constraint::Length(1), // Tab bar
        Constraint::Fill(1),   // Standings / calendar
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app);
    match app.current_view {
        View::Drivers => render_drivers(frame, chunks[2], app),
        View::Constructors => render_constructors(frame, chunks[2], app),
        View::Calendar => render_calendar(frame, chunks[2], app),
    }
    render_status_bar(frame, chunks[3], app);

    if app.input_mode == InputMode::Help {
        render_help_popup(frame, app);
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let left = format!("{} {}", app.summary.championship, app.summary.season);
    let right = format!(
        "Races {}/{}",
        app.summary.completed_events, app.summary.total_events
    );
    let padding_len = (area.width as usize)
        .saturating_sub(left.chars().count() + right.chars().count());

    let title = Line::from(vec![
        Span::styled(left, Style::default().fg(theme.title_color).bold()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right, Style::default().fg(theme.muted)),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<String> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| format!("{} {}", i + 1, view.title()))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.current_view.index())
        .style(app.theme.tab_inactive_style)
        .highlight_style(app.theme.tab_active_style)
        .divider(" | ");

    frame.render_widget(tabs, area);
}

fn row_style(app: &App, idx: usize) -> Style {
    // Odd rows get a subtle background
    if idx % 2 == 1 {
        Style::default().bg(app.theme.row_alt_bg)
    } else {
        Style::default()
    }
}

fn position_cell(app: &App, position: usize) -> Cell<'static> {
    Cell::from(format!("{}.", position))
        .style(Style::default().fg(app.theme.position_color(position)))
}

fn render_empty(frame: &mut Frame, area: Rect, msg: &'static str) {
    let empty_msg = Paragraph::new(msg)
        .alignment(Alignment::Center)
        .block(Block::default());
    frame.render_widget(empty_msg, area);
}

fn render_drivers(frame: &mut Frame, area: Rect, app: &App) {
    if app.drivers.is_empty() {
        render_empty(frame, area, "No drivers in this season");
        return;
    }

    let rows: Vec<Row> = app
        .drivers
        .iter()
        .enumerate()
        .map(|(idx, standing)| {
            let team_color = app
                .theme
                .team_color(standing.team.as_ref().map(|t| t.color.as_str()));
            let team_name = standing
                .team
                .as_ref()
                .map(|t| t.name.clone())
                .unwrap_or_else(|| standing.driver.team.clone());

            Row::new(vec![
                position_cell(app, standing.position),
                Cell::from(Line::from(vec![
                    Span::styled("▌ ", Style::default().fg(team_color)),
                    Span::raw(standing.driver.name.clone()),
                ])),
                Cell::from(team_name).style(Style::default().fg(app.theme.muted)),
                Cell::from(standing.wins.to_string()),
                Cell::from(standing.podiums.to_string()),
                Cell::from(standing.points.to_string()).style(Style::default().bold()),
            ])
            .style(row_style(app, idx))
        })
        .collect();

    let widths = [
        Constraint::Length(4),  // Position: "99."
        Constraint::Fill(2),    // Driver
        Constraint::Fill(1),    // Team
        Constraint::Length(5),  // Wins
        Constraint::Length(8),  // Podiums
        Constraint::Length(6),  // Points
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["#", "Driver", "Team", "Wins", "Podiums", "Pts"])
                .style(app.theme.header_style)
                .bottom_margin(1),
        )
        .row_highlight_style(app.theme.row_selected);

    let mut state = TableState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_constructors(frame: &mut Frame, area: Rect, app: &App) {
    if app.constructors.is_empty() {
        render_empty(frame, area, "No teams in this season");
        return;
    }

    let championship = app.championship();
    let mut rows: Vec<Row> = Vec::new();
    let mut selected_row = 0;

    for (idx, standing) in app.constructors.iter().enumerate() {
        if idx == app.selected {
            selected_row = rows.len();
        }
        let team_color = app.theme.team_color(Some(&standing.team.color));
        rows.push(
            Row::new(vec![
                position_cell(app, standing.position),
                Cell::from(Line::from(vec![
                    Span::styled("▌ ", Style::default().fg(team_color)),
                    Span::raw(standing.team.name.clone()),
                ])),
                Cell::from(standing.wins.to_string()),
                Cell::from(standing.points.to_string()).style(Style::default().bold()),
            ])
            .style(row_style(app, idx)),
        );

        if app.expanded_team.as_deref() == Some(standing.team.id.as_str()) {
            for line in format_team_details(championship, &standing.team.id, false) {
                rows.push(Row::new(vec![
                    Cell::from(""),
                    Cell::from(line.trim().to_string())
                        .style(Style::default().fg(app.theme.detail_color)),
                    Cell::from(""),
                    Cell::from(""),
                ]));
            }
        }
    }

    let widths = [
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(5),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["#", "Team", "Wins", "Pts"])
                .style(app.theme.header_style)
                .bottom_margin(1),
        )
        .row_highlight_style(app.theme.row_selected);

    let mut state = TableState::default().with_selected(Some(selected_row));
    frame.render_stateful_widget(table, area, &mut state);
}

fn status_color(app: &App, status: EventStatus) -> Color {
    match status {
        EventStatus::Complete => app.theme.complete_tag,
        EventStatus::QualifyingOnly => app.theme.flash_color,
        EventStatus::Pending => app.theme.pending_tag,
    }
}

fn render_calendar(frame: &mut Frame, area: Rect, app: &App) {
    let championship = app.championship();
    if championship.grand_prix.is_empty() {
        render_empty(frame, area, "No events on the calendar");
        return;
    }

    let expanded = app
        .expanded_event
        .and_then(|id| championship.grand_prix.iter().find(|gp| gp.id == id));

    // Split the body when a race card is open
    let (table_area, card_area) = match expanded {
        Some(_) => {
            let halves =
                Layout::vertical([Constraint::Percentage(45), Constraint::Fill(1)]).split(area);
            (halves[0], Some(halves[1]))
        }
        None => (area, None),
    };

    let rows: Vec<Row> = championship
        .grand_prix
        .iter()
        .enumerate()
        .map(|(idx, gp)| {
            let status = event_status(championship, gp);
            let mut tags = Vec::new();
            if gp.is_sprint {
                tags.push(Span::styled("SPRINT ", Style::default().fg(app.theme.sprint_tag)));
            }
            if gp.is_rain {
                tags.push(Span::styled("RAIN", Style::default().fg(app.theme.rain_tag)));
            }

            Row::new(vec![
                Cell::from(format!("{}.", gp.id)).style(Style::default().fg(app.theme.index_color)),
                Cell::from(gp.name.clone()),
                Cell::from(gp.circuit.clone()).style(Style::default().fg(app.theme.muted)),
                Cell::from(Line::from(tags)),
                Cell::from(status.label()).style(Style::default().fg(status_color(app, status))),
            ])
            .style(row_style(app, idx))
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Fill(2),
        Constraint::Fill(1),
        Constraint::Length(12),
        Constraint::Length(11),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["#", "Grand Prix", "Circuit", "", "Status"])
                .style(app.theme.header_style)
                .bottom_margin(1),
        )
        .row_highlight_style(app.theme.row_selected);

    let mut state = TableState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(table, table_area, &mut state);

    if let (Some(gp), Some(card_area)) = (expanded, card_area) {
        let card = format_race_card(championship, &app.rules, gp, false);
        let lines: Vec<Line> = card.lines().map(|l| Line::from(l.to_string())).collect();
        let block = Block::bordered()
            .border_style(Style::default().fg(app.theme.popup_border))
            .title(Span::styled(format!(" Round {} ", gp.id), app.theme.popup_title));
        frame.render_widget(Paragraph::new(lines).block(block), card_area);
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let text = if let Some((ref msg, _)) = app.flash_message {
        Line::from(Span::styled(msg.clone(), Style::default().fg(theme.flash_color)))
    } else {
        let mut hints = vec![("j", "/", "k", ":nav "), ("Tab", "", "", ":view ")];
        if app.current_view != View::Drivers {
            hints.push(("Enter", "", "", ":expand "));
        }
        hints.push(("?", "", "", ":help "));
        hints.push(("q", "", "", ":quit"));

        let mut spans = vec![
            Span::styled(
                format!("{} drivers", app.summary.drivers),
                Style::default().fg(theme.muted),
            ),
            Span::raw(" "),
            Span::styled(
                format!("loaded {}", app.loaded.loaded_at.format("%H:%M")),
                Style::default().fg(theme.muted),
            ),
            Span::raw("  "),
        ];

        for (i, (key1, sep, key2, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key1, Style::default().fg(theme.status_key_color)));
            if !sep.is_empty() {
                spans.push(Span::raw(*sep));
                spans.push(Span::styled(*key2, Style::default().fg(theme.status_key_color)));
            }
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(46, 12, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .border_style(Style::default().fg(app.theme.popup_border))
        .title(Span::styled(" Keyboard Shortcuts ", app.theme.popup_title));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let key_style = Style::default().fg(app.theme.status_key_color).bold();
    let entries = [
        ("j / Down      ", "Move down"),
        ("k / Up        ", "Move up"),
        ("Tab           ", "Next view"),
        ("1 / 2 / 3     ", "Drivers / Constructors / Calendar"),
        ("Enter         ", "Expand team or race"),
        ("?             ", "Show/hide this help"),
        ("q / Ctrl-c    ", "Quit"),
    ];
    let mut help_lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| Line::from(vec![Span::styled(*key, key_style), Span::raw(*desc)]))
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(app.theme.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::championship::test_support::{championship, grand_prix, race, with_event};
    use crate::loader::{DataSource, LoadedChampionship};
    use crate::standings::StandingsRules;
    use crate::tui::theme::ThemeColors;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn app() -> App {
        let c = with_event(championship(), grand_prix(1, true), race(&[2, 1], Some(2)));
        let rules = StandingsRules::for_championship(&c);
        let loaded = LoadedChampionship {
            championship: c,
            source: DataSource::parse("season.json"),
            loaded_at: chrono::Utc::now(),
        };
        App::new(loaded, rules, &[], ThemeColors::dark())
    }

    fn render(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_centered_rect_clamps() {
        let area = Rect::new(0, 0, 20, 10);
        let rect = centered_rect_fixed(40, 4, area);
        assert_eq!(rect.width, 20);
        assert_eq!(rect.y, 3);
    }

    #[test]
    fn test_draw_drivers_view() {
        let screen = render(&app(), 80, 20);
        assert!(screen.contains("Liga Test 2025"));
        assert!(screen.contains("Races 1/1"));
        assert!(screen.contains("Driver 2"));
    }

    #[test]
    fn test_draw_expanded_team() {
        let mut app = app();
        app.select_view(View::Constructors);
        app.toggle_expand();
        let screen = render(&app, 80, 20);
        assert!(screen.contains("Team red") || screen.contains("Team blue"));
        assert!(screen.contains("#"));
    }

    #[test]
    fn test_draw_expanded_race_card() {
        let mut app = app();
        app.select_view(View::Calendar);
        app.toggle_expand();
        let screen = render(&app, 90, 30);
        assert!(screen.contains("Round 1"));
        assert!(screen.contains("Sprint"));
    }

    #[test]
    fn test_draw_tiny_terminal() {
        let screen = render(&app(), 20, 4);
        assert!(screen.contains("Terminal"));
    }
}
