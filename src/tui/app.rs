use std::time::Instant;

use crate::championship::{Championship, GrandPrix};
use crate::loader::LoadedChampionship;
use crate::standings::{
    compute_constructor_standings, compute_driver_standings, ConstructorStanding, DriverStanding,
    StandingsRules, Summary,
};
use crate::tui::theme::ThemeColors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Drivers,
    Constructors,
    Calendar,
}

impl View {
    pub const ALL: [View; 3] = [View::Drivers, View::Constructors, View::Calendar];

    pub fn title(self) -> &'static str {
        match self {
            View::Drivers => "Drivers",
            View::Constructors => "Constructors",
            View::Calendar => "Calendar",
        }
    }

    pub fn index(self) -> usize {
        match self {
            View::Drivers => 0,
            View::Constructors => 1,
            View::Calendar => 2,
        }
    }

    fn next(self) -> Self {
        View::ALL[(self.index() + 1) % View::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Help,
}

/// View state for one TUI session. The season and its standings are computed
/// once on start; expansion and selection are throwaway UI state.
pub struct App {
    pub loaded: LoadedChampionship,
    pub rules: StandingsRules,
    pub drivers: Vec<DriverStanding>,
    pub constructors: Vec<ConstructorStanding>,
    pub summary: Summary,
    pub current_view: View,
    pub selected: usize,
    pub expanded_team: Option<String>,
    pub expanded_event: Option<u32>,
    pub input_mode: InputMode,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub theme: ThemeColors,
}

impl App {
    pub fn new(
        loaded: LoadedChampionship,
        rules: StandingsRules,
        placeholder_names: &[String],
        theme: ThemeColors,
    ) -> Self {
        let drivers = compute_driver_standings(&loaded.championship, &rules);
        let constructors = compute_constructor_standings(&loaded.championship, &rules);
        let summary = Summary::build(
            &loaded.championship,
            &drivers,
            &constructors,
            placeholder_names,
        );

        Self {
            loaded,
            rules,
            drivers,
            constructors,
            summary,
            current_view: View::Drivers,
            selected: 0,
            expanded_team: None,
            expanded_event: None,
            input_mode: InputMode::Normal,
            flash_message: None,
            should_quit: false,
            theme,
        }
    }

    pub fn championship(&self) -> &Championship {
        &self.loaded.championship
    }

    /// Number of selectable rows in the current view
    pub fn row_count(&self) -> usize {
        match self.current_view {
            View::Drivers => self.drivers.len(),
            View::Constructors => self.constructors.len(),
            View::Calendar => self.championship().grand_prix.len(),
        }
    }

    pub fn next_row(&mut self) {
        let count = self.row_count();
        if count == 0 {
            return;
        }
        self.selected = if self.selected >= count - 1 {
            0
        } else {
            self.selected + 1
        };
    }

    pub fn previous_row(&mut self) {
        let count = self.row_count();
        if count == 0 {
            return;
        }
        self.selected = if self.selected == 0 {
            count - 1
        } else {
            self.selected - 1
        };
    }

    pub fn toggle_view(&mut self) {
        self.current_view = self.current_view.next();
        self.selected = 0;
    }

    pub fn select_view(&mut self, view: View) {
        if self.current_view != view {
            self.current_view = view;
            self.selected = 0;
        }
    }

    pub fn selected_event(&self) -> Option<&GrandPrix> {
        match self.current_view {
            View::Calendar => self.championship().grand_prix.get(self.selected),
            _ => None,
        }
    }

    /// Expand or collapse the selected team or event. At most one of each is open.
    pub fn toggle_expand(&mut self) {
        match self.current_view {
            View::Drivers => {}
            View::Constructors => {
                if let Some(team_id) = self.constructors.get(self.selected).map(|s| s.team.id.clone()) {
                    self.expanded_team = if self.expanded_team.as_deref() == Some(team_id.as_str()) {
                        None
                    } else {
                        Some(team_id)
                    };
                }
            }
            View::Calendar => {
                if let Some(id) = self.selected_event().map(|gp| gp.id) {
                    self.expanded_event = if self.expanded_event == Some(id) {
                        None
                    } else {
                        Some(id)
                    };
                }
            }
        }
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }
}
