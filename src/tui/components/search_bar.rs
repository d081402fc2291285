use crate::api::OptionKind;
use crate::store::Store;
use crate::tui::{styles::Theme, Frame};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// What a key press did to the search input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// The keyword changed
    Changed(String),
    /// Editing finished
    Done,
}

/// Single-line keyword input with autocomplete from the store's option lists
#[derive(Debug, Clone)]
pub struct SearchBar {
    kind: OptionKind,
    placeholder: &'static str,
    input: String,
    editing: bool,
    suggestion: Option<String>,
}

impl SearchBar {
    pub fn new(kind: OptionKind, placeholder: &'static str) -> Self {
        Self {
            kind,
            placeholder,
            input: String::new(),
            editing: false,
            suggestion: None,
        }
    }

    pub fn value(&self) -> &str {
        &self.input
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn start_editing(&mut self, store: &Store) {
        self.editing = true;
        self.refresh_suggestion(store);
    }

    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    /// Handle a key while editing
    pub fn handle_key_event(&mut self, key: KeyEvent, store: &Store) -> Option<SearchEvent> {
        if !self.editing {
            return None;
        }

        let event = match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                self.editing = false;
                self.suggestion = None;
                return Some(SearchEvent::Done);
            }
            KeyCode::Tab => {
                let suggestion = self.suggestion.take()?;
                self.input = suggestion;
                SearchEvent::Changed(self.input.clone())
            }
            KeyCode::Backspace => {
                self.input.pop()?;
                SearchEvent::Changed(self.input.clone())
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if self.input.is_empty() {
                    return None;
                }
                self.input.clear();
                SearchEvent::Changed(String::new())
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.push(c);
                SearchEvent::Changed(self.input.clone())
            }
            _ => return None,
        };

        self.refresh_suggestion(store);
        Some(event)
    }

    /// Best completion for the current input, ignoring an exact match
    fn refresh_suggestion(&mut self, store: &Store) {
        self.suggestion = store
            .suggestions(self.kind, &self.input, 1)
            .into_iter()
            .next()
            .filter(|s| !s.eq_ignore_ascii_case(self.input.trim()))
            .map(str::to_string);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut spans = vec![Span::styled("/ ", theme.dim_style())];

        if self.input.is_empty() && !self.editing {
            spans.push(Span::styled(self.placeholder, theme.placeholder_style()));
        } else {
            spans.push(Span::styled(self.input.clone(), theme.text_style()));
            if self.editing {
                spans.push(Span::styled("_", theme.text_style()));
            }
        }

        if let Some(suggestion) = &self.suggestion {
            spans.push(Span::styled(format!("  Tab: {}", suggestion), theme.placeholder_style()));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Search")
            .border_style(theme.border_style(self.editing));

        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }
}
