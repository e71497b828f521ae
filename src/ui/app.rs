use crate::api::Category;
use crate::controller::{Intent, QueryState};
use crate::ui::card::Card;
use crate::ui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const SPINNER_FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

/// What the event loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Dispatch(Intent),
    ThemeChanged,
    Quit,
}

/// TUI-local state plus the latest snapshot of the query controller.
pub struct App {
    pub query: QueryState,
    pub cards: Vec<Card>,
    pub selected_index: usize,
    pub editing: bool,
    pub should_quit: bool,
    pub show_info: bool,
    pub theme: Theme,
    pub tick: usize,
}

impl App {
    pub fn new(query: QueryState, theme: Theme) -> Self {
        let cards = query.results.iter().map(Card::from_record).collect();
        Self {
            query,
            cards,
            selected_index: 0,
            editing: false,
            should_quit: false,
            show_info: false,
            theme,
            tick: 0,
        }
    }

    /// Take a new controller snapshot.
    pub fn sync(&mut self, state: QueryState) {
        let category_changed = state.category != self.query.category;
        let finished_loading = self.query.is_loading() && !state.is_loading();

        if state.results != self.query.results {
            self.cards = state.results.iter().map(Card::from_record).collect();
        }
        if category_changed || finished_loading || self.selected_index >= self.cards.len() {
            self.selected_index = 0;
        }

        self.query = state;
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.tick % SPINNER_FRAMES.len()]
    }

    pub fn toggle_info(&mut self) {
        self.show_info = !self.show_info;
    }

    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next().clone();
    }

    /// Cards the results pane should show right now.
    pub fn visible_cards(&self) -> &[Card] {
        if self.query.visible_results().is_empty() {
            &[]
        } else {
            &self.cards
        }
    }

    pub fn selected_card(&self) -> Option<&Card> {
        self.visible_cards().get(self.selected_index)
    }

    pub fn next(&mut self) {
        let count = self.visible_cards().len();
        if count > 0 {
            self.selected_index = (self.selected_index + 1) % count;
        }
    }

    pub fn previous(&mut self) {
        let count = self.visible_cards().len();
        if count > 0 {
            if self.selected_index > 0 {
                self.selected_index -= 1;
            } else {
                self.selected_index = count - 1;
            }
        }
    }

    pub fn enter_edit_mode(&mut self) {
        self.editing = true;
    }

    pub fn exit_edit_mode(&mut self) {
        self.editing = false;
    }

    /// Map a key press to an [`Action`], updating local state along the way.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if self.show_info {
            if matches!(key.code, KeyCode::Char('i') | KeyCode::Esc) {
                self.toggle_info();
            }
            return None;
        }

        if self.editing {
            return self.handle_edit_key(key);
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                Some(Action::Quit)
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                Some(Action::Quit)
            }
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.enter_edit_mode();
                None
            }
            KeyCode::Char('i') => {
                self.toggle_info();
                None
            }
            KeyCode::Char('t') => {
                self.cycle_theme();
                Some(Action::ThemeChanged)
            }
            KeyCode::Enter => Some(Action::Dispatch(Intent::SubmitSearch)),
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => Some(Action::Dispatch(
                Intent::SelectCategory(self.query.category.next()),
            )),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => Some(Action::Dispatch(
                Intent::SelectCategory(self.query.category.previous()),
            )),
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                Category::ALL
                    .get(index)
                    .map(|category| Action::Dispatch(Intent::SelectCategory(*category)))
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.next();
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.previous();
                None
            }
            _ => None,
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                self.exit_edit_mode();
                None
            }
            KeyCode::Enter => {
                self.exit_edit_mode();
                Some(Action::Dispatch(Intent::SubmitSearch))
            }
            KeyCode::Backspace => {
                let mut text = self.query.search_query.clone();
                text.pop()?;
                Some(Action::Dispatch(Intent::ChangeQueryText(text)))
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Dispatch(Intent::ChangeQueryText(String::new())))
            }
            KeyCode::Char(c) => {
                let mut text = self.query.search_query.clone();
                text.push(c);
                Some(Action::Dispatch(Intent::ChangeQueryText(text)))
            }
            _ => None,
        }
    }
}
