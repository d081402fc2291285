use super::{Page, PageContext, PageId, PageOutcome};
use crate::api::{ApiResult, Permission, Role};
use crate::navigation::Route;
use crate::store::{Action, Store};
use crate::tui::components::{RecordTable, TableView};
use crate::tui::{styles::Theme, Frame};
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Cell, Row},
};

const HEADERS: &[&str] = &["Code", "Description", "Roles"];

/// Permissions granted to the active role, with every role holding each one
pub struct PermissionsPage {
    title: String,
    table: RecordTable,
}

impl PermissionsPage {
    pub fn new() -> Self {
        Self {
            title: "Permissions".to_string(),
            table: RecordTable::new(),
        }
    }

    fn row(permission: &Permission, role: Option<Role>, theme: &Theme) -> Row<'static> {
        let roles = permission
            .roles
            .iter()
            .map(|r| {
                let style = if Some(*r) == role { theme.header_style() } else { theme.dim_style() };
                Span::styled(format!("{} ", r), style)
            })
            .collect::<Vec<_>>();

        Row::new(vec![
            Cell::from(permission.code.clone()),
            Cell::from(permission.description.clone()),
            Cell::from(Line::from(roles)),
        ])
    }
}

#[async_trait]
impl Page for PermissionsPage {
    fn id(&self) -> PageId {
        "permissions"
    }

    fn title(&self) -> &str {
        &self.title
    }

    async fn on_enter(&mut self, _route: &Route, ctx: &mut PageContext<'_>) -> ApiResult<()> {
        let role = ctx.store.permissions().role.unwrap_or(ctx.config.role);
        let permissions = ctx.api.permissions(role).await?;
        ctx.store.dispatch(Action::PermissionsLoaded { role, permissions });
        Ok(())
    }

    async fn handle_key_event(&mut self, event: KeyEvent, ctx: &mut PageContext<'_>) -> ApiResult<PageOutcome> {
        if self
            .table
            .handle_key_event(event, ctx.store.permissions().permissions.len())
        {
            return Ok(PageOutcome::Handled);
        }

        match event.code {
            KeyCode::Char('r') => {
                self.on_enter(&Route::Permissions, ctx).await?;
                Ok(PageOutcome::Handled)
            }
            _ => Ok(PageOutcome::Ignored),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme, store: &Store) {
        let role = store
            .permissions()
            .role
            .map_or_else(|| "unknown".to_string(), |role| role.to_string());
        let rows = store
            .permissions()
            .permissions
            .iter()
            .map(|permission| Self::row(permission, store.permissions().role, theme))
            .collect();

        self.table.render(
            frame,
            area,
            theme,
            TableView {
                title: format!("{} (role: {})", self.title, role),
                headers: HEADERS,
                widths: vec![
                    Constraint::Length(20),
                    Constraint::Percentage(50),
                    Constraint::Percentage(30),
                ],
                rows,
                focused: true,
            },
        );
    }

    fn help_text(&self) -> Vec<(&'static str, &'static str)> {
        vec![("r", "Reload permissions")]
    }
}

impl Default for PermissionsPage {
    fn default() -> Self {
        Self::new()
    }
}
