//! Navigation menu.
//!
//! Section headers link to the last location visited inside the section,
//! so returning to "Manage" or "Jobs" lands where the operator left off.

use crate::navigation::Route;
use crate::store::Store;
use crate::tui::{styles::Theme, Frame};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

/// One line of the menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: &'static str,
    /// Location opened when the entry is chosen
    pub target: String,
    /// Locations under this prefix highlight the entry
    pub section: &'static str,
    pub indent: bool,
}

const MANAGE_SECTION: &str = "/manage";
const JOBS_SECTION: &str = "/jobs";

/// Children of the "Manage" section, in display order
const MANAGE_CHILDREN: [(&str, &str); 3] = [
    ("Users", Route::USERS),
    ("Centers", Route::CENTERS),
    ("Permissions", Route::PERMISSIONS),
];

#[derive(Debug, Clone, Default)]
pub struct SideMenu {
    state: ListState,
}

impl SideMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries visible to the active role
    pub fn entries(store: &Store) -> Vec<MenuEntry> {
        let allowed = |path: &str| {
            Route::parse(path)
                .required_permission()
                .map_or(true, |code| store.can(code))
        };

        let mut entries = vec![MenuEntry {
            label: "Dashboard",
            target: Route::DASHBOARD.to_string(),
            section: Route::DASHBOARD,
            indent: false,
        }];

        let children: Vec<_> = MANAGE_CHILDREN
            .iter()
            .filter(|&&(_, path)| allowed(path))
            .collect();
        if let Some(&&(_, first)) = children.first() {
            let target = store.menu_target(MANAGE_SECTION, first);
            entries.push(MenuEntry {
                label: "Manage",
                target: if allowed(target) { target } else { first }.to_string(),
                section: MANAGE_SECTION,
                indent: false,
            });
            entries.extend(children.iter().map(|&&(label, path)| MenuEntry {
                label,
                target: path.to_string(),
                section: path,
                indent: true,
            }));
        }

        if allowed(Route::JOBS) {
            entries.push(MenuEntry {
                label: "Jobs",
                target: store.menu_target(JOBS_SECTION, Route::JOBS).to_string(),
                section: JOBS_SECTION,
                indent: false,
            });
        }

        entries
    }

    /// Move the selection or choose an entry. Returns the target on Enter.
    pub fn handle_key_event(&mut self, key: KeyEvent, store: &Store) -> Option<String> {
        let entries = Self::entries(store);
        if entries.is_empty() {
            return None;
        }
        let current = self.state.selected().unwrap_or(0).min(entries.len() - 1);

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.select(Some((current + 1).min(entries.len() - 1)));
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.select(Some(current.saturating_sub(1)));
                None
            }
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
                entries.into_iter().nth(current).map(|entry| entry.target)
            }
            _ => None,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme, store: &Store, focused: bool) {
        let entries = Self::entries(store);
        let current = store.current_path();

        let items: Vec<ListItem> = entries
            .iter()
            .map(|entry| {
                let active = current == entry.section
                    || current
                        .strip_prefix(entry.section)
                        .map_or(false, |rest| rest.starts_with('/') || rest.starts_with('?'));
                let style = if active { theme.header_style() } else { theme.text_style() };
                let prefix = if entry.indent { "  " } else { "" };
                ListItem::new(Line::from(Span::styled(format!("{}{}", prefix, entry.label), style)))
            })
            .collect();

        if self.state.selected().is_none() && !entries.is_empty() {
            self.state.select(Some(0));
        }

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Menu")
                    .border_style(theme.border_style(focused)),
            )
            .highlight_style(theme.selection_style());

        frame.render_stateful_widget(list, area, &mut self.state);
    }
}
