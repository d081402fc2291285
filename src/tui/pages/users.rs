use super::{Page, PageContext, PageId, PageOutcome};
use crate::api::{ApiResult, OptionKind, Role, User};
use crate::config::Config;
use crate::navigation::Route;
use crate::store::{self, Store};
use crate::tui::components::{PaginationControl, PaginationStyle, RecordTable, SearchBar, SearchEvent, TableView};
use crate::tui::{styles::Theme, Frame};
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Cell, Row},
};

const HEADERS: &[&str] = &["ID", "Name", "Email", "Role", "Center", "Active"];

/// Server-paged list of user accounts
pub struct UsersPage {
    title: String,
    search: SearchBar,
    table: RecordTable,
    pagination: PaginationControl,
}

impl UsersPage {
    pub fn new(config: &Config) -> Self {
        Self {
            title: "Users".to_string(),
            search: SearchBar::new(OptionKind::Users, "Search by id, name or email"),
            table: RecordTable::new(),
            pagination: PaginationControl::new(&config.page_sizes).with_style(PaginationStyle::Full),
        }
    }

    /// Next value of the role filter: all, then each role in turn
    fn next_role_filter(current: Option<&str>) -> Option<Role> {
        match current.and_then(|role| role.parse::<Role>().ok()) {
            None => Some(Role::Admin),
            Some(Role::Admin) => Some(Role::Operator),
            Some(Role::Operator) => Some(Role::Viewer),
            Some(Role::Viewer) => None,
        }
    }

    /// Next value of the active filter: all, active only, inactive only
    fn next_active_filter(current: Option<&str>) -> Option<&'static str> {
        match current {
            None => Some("true"),
            Some("true") => Some("false"),
            Some(_) => None,
        }
    }

    fn row(user: &User, store: &Store) -> Row<'static> {
        let center = user
            .center_id
            .as_deref()
            .map(|id| store.centers().name_of(id).unwrap_or(id).to_string())
            .unwrap_or_else(|| "-".to_string());

        Row::new(vec![
            Cell::from(user.id.clone()),
            Cell::from(user.name.clone()),
            Cell::from(user.email.clone()),
            Cell::from(user.role.to_string()),
            Cell::from(center),
            Cell::from(if user.active { "yes" } else { "no" }),
        ])
    }
}

#[async_trait]
impl Page for UsersPage {
    fn id(&self) -> PageId {
        "users"
    }

    fn title(&self) -> &str {
        &self.title
    }

    async fn on_enter(&mut self, _route: &Route, ctx: &mut PageContext<'_>) -> ApiResult<()> {
        store::fetch_users(ctx.store, ctx.api).await
    }

    async fn handle_key_event(&mut self, event: KeyEvent, ctx: &mut PageContext<'_>) -> ApiResult<PageOutcome> {
        if self.search.is_editing() {
            if let Some(SearchEvent::Changed(keyword)) = self.search.handle_key_event(event, ctx.store) {
                let mut query = ctx.store.users().query.clone();
                if query.set_keyword(&keyword) {
                    self.table.reset();
                    store::query_users(ctx.store, ctx.api, query).await?;
                }
            }
            return Ok(PageOutcome::Handled);
        }

        let descriptor = &ctx.store.users().page.pagination;
        if let Some(request) = self.pagination.handle_key_event(event, descriptor) {
            self.table.reset();
            store::request_users_page(ctx.store, ctx.api, request).await?;
            return Ok(PageOutcome::Handled);
        }

        if self.table.handle_key_event(event, ctx.store.user_rows().len()) {
            return Ok(PageOutcome::Handled);
        }

        let mut query = ctx.store.users().query.clone();
        let changed = match event.code {
            KeyCode::Char('/') => {
                self.search.start_editing(ctx.store);
                return Ok(PageOutcome::Handled);
            }
            KeyCode::Char('f') => {
                let role = Self::next_role_filter(query.search.filters.get("role").map(String::as_str));
                query.set_filter("role", role.as_ref().map(Role::as_str))
            }
            KeyCode::Char('a') => {
                let active = Self::next_active_filter(query.search.filters.get("active").map(String::as_str));
                query.set_filter("active", active)
            }
            _ => return Ok(PageOutcome::Ignored),
        };

        if changed {
            self.table.reset();
            store::query_users(ctx.store, ctx.api, query).await?;
        }
        Ok(PageOutcome::Handled)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme, store: &Store) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(4), Constraint::Length(1)])
            .split(area);

        self.search.render(frame, chunks[0], theme);

        let filters = &store.users().query.search.filters;
        let mut title = self.title.clone();
        if let Some(role) = filters.get("role") {
            title.push_str(&format!(" | role: {}", role));
        }
        match filters.get("active").map(String::as_str) {
            Some("true") => title.push_str(" | active only"),
            Some(_) => title.push_str(" | inactive only"),
            None => {}
        }

        let rows = store.user_rows().iter().map(|user| Self::row(user, store)).collect();
        self.table.render(
            frame,
            chunks[1],
            theme,
            TableView {
                title,
                headers: HEADERS,
                widths: vec![
                    Constraint::Length(7),
                    Constraint::Percentage(22),
                    Constraint::Percentage(30),
                    Constraint::Length(9),
                    Constraint::Percentage(20),
                    Constraint::Length(6),
                ],
                rows,
                focused: !self.search.is_editing(),
            },
        );

        self.pagination.render(frame, chunks[2], &store.users().page.pagination, theme);
    }

    fn is_editing(&self) -> bool {
        self.search.is_editing()
    }

    fn help_text(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("/", "Search users"),
            ("f", "Cycle role filter"),
            ("a", "Cycle active filter"),
            ("←/→", "Previous/next page"),
            ("+/-", "Change page size"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_filter_cycle() {
        assert_eq!(UsersPage::next_role_filter(None), Some(Role::Admin));
        assert_eq!(UsersPage::next_role_filter(Some("admin")), Some(Role::Operator));
        assert_eq!(UsersPage::next_role_filter(Some("operator")), Some(Role::Viewer));
        assert_eq!(UsersPage::next_role_filter(Some("viewer")), None);
    }

    #[test]
    fn test_active_filter_cycle() {
        assert_eq!(UsersPage::next_active_filter(None), Some("true"));
        assert_eq!(UsersPage::next_active_filter(Some("true")), Some("false"));
        assert_eq!(UsersPage::next_active_filter(Some("false")), None);
    }
}
