use crate::tui::{styles::Theme, Frame};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Row, Table, TableState},
};

/// Contents of one table render
pub struct TableView {
    pub title: String,
    pub headers: &'static [&'static str],
    pub widths: Vec<Constraint>,
    pub rows: Vec<Row<'static>>,
    pub focused: bool,
}

/// Row selection over the records of the current page
#[derive(Debug, Clone, Default)]
pub struct RecordTable {
    state: TableState,
}

impl RecordTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected row, kept inside `0..len`
    pub fn selected(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.state.selected().unwrap_or(0).min(len - 1))
    }

    pub fn reset(&mut self) {
        self.state.select(None);
    }

    /// Move the selection with the arrow keys or `j`/`k`.
    /// Returns false when the key is not a selection key.
    pub fn handle_key_event(&mut self, key: KeyEvent, len: usize) -> bool {
        let Some(current) = self.selected(len) else {
            return matches!(key.code, KeyCode::Up | KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('k'));
        };

        let next = match key.code {
            KeyCode::Down | KeyCode::Char('j') => (current + 1).min(len - 1),
            KeyCode::Up | KeyCode::Char('k') => current.saturating_sub(1),
            _ => return false,
        };
        self.state.select(Some(next));
        true
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme, view: TableView) {
        let selected = self.selected(view.rows.len());
        self.state.select(selected);

        let header = Row::new(view.headers.iter().copied()).style(theme.header_style());
        let block = Block::default()
            .borders(Borders::ALL)
            .title(view.title)
            .border_style(theme.border_style(view.focused));

        let table = Table::new(view.rows, view.widths)
            .header(header)
            .block(block)
            .style(theme.text_style())
            .highlight_style(theme.selection_style())
            .highlight_symbol("> ");

        frame.render_stateful_widget(table, area, &mut self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut table = RecordTable::new();
        assert_eq!(table.selected(0), None);
        assert_eq!(table.selected(3), Some(0));

        assert!(table.handle_key_event(key(KeyCode::Up), 3));
        assert_eq!(table.selected(3), Some(0));

        for _ in 0..5 {
            table.handle_key_event(key(KeyCode::Char('j')), 3);
        }
        assert_eq!(table.selected(3), Some(2));

        // A shorter page pulls the selection back in
        assert_eq!(table.selected(2), Some(1));

        table.reset();
        assert_eq!(table.selected(3), Some(0));
    }

    #[test]
    fn test_other_keys_are_not_consumed() {
        let mut table = RecordTable::new();
        assert!(!table.handle_key_event(key(KeyCode::Left), 3));
        assert!(!table.handle_key_event(key(KeyCode::Enter), 3));
    }
}
