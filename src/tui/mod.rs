pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, Theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Hold warnings so they don't corrupt the display
    crate::diagnostics::hold();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();
    let mut events = EventHandler::new(250);

    let outcome = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &app)) {
            break Err(e.into());
        }

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => app.update_flash(),
        }

        if app.should_quit {
            break Ok(());
        }
    };

    ratatui::restore();

    for msg in crate::diagnostics::release() {
        eprintln!("{}", msg);
    }

    outcome
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        app::InputMode::Normal => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.should_quit = true
            }

            KeyCode::Char('j') | KeyCode::Down => app.next_row(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_row(),

            KeyCode::Enter | KeyCode::Char(' ') => {
                if app.current_view == app::View::Drivers {
                    app.show_flash("Nothing to expand here".to_string());
                } else {
                    app.toggle_expand();
                }
            }

            KeyCode::Tab => app.toggle_view(),
            KeyCode::Char('1') => app.select_view(app::View::Drivers),
            KeyCode::Char('2') => app.select_view(app::View::Constructors),
            KeyCode::Char('3') => app.select_view(app::View::Calendar),

            KeyCode::Char('?') => app.show_help(),
            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::championship::test_support::{championship, grand_prix, race, with_event};
    use crate::loader::{DataSource, LoadedChampionship};
    use crate::standings::StandingsRules;

    fn app() -> App {
        let c = with_event(championship(), grand_prix(1, false), race(&[1, 2], None));
        let rules = StandingsRules::for_championship(&c);
        let loaded = LoadedChampionship {
            championship: c,
            source: DataSource::parse("season.json"),
            loaded_at: chrono::Utc::now(),
        };
        App::new(loaded, rules, &[], ThemeColors::dark())
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_keys_switch_views_and_expand() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.current_view, app::View::Constructors);
        press(&mut app, KeyCode::Enter);
        assert!(app.expanded_team.is_some());
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.current_view, app::View::Calendar);
    }

    #[test]
    fn test_enter_on_drivers_flashes() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert!(app.flash_message.is_some());
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.input_mode, app::InputMode::Help);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.input_mode, app::InputMode::Normal);
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
