use super::{Page, PageContext, PageId, PageOutcome};
use crate::api::{ApiResult, Center, OptionKind};
use crate::pagination::PageMove;
use crate::config::Config;
use crate::navigation::Route;
use crate::store::{self, Action, Store};
use crate::tui::components::{PaginationControl, RecordTable, SearchBar, SearchEvent, TableView};
use crate::tui::{styles::Theme, Frame};
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Cell, Row},
};

const HEADERS: &[&str] = &["ID", "Name", "Location", "Capacity", "Contact"];

/// Centers list. The whole collection is loaded once and paged locally.
pub struct CentersPage {
    title: String,
    /// Path reported in the pagination descriptor
    path: String,
    search: SearchBar,
    table: RecordTable,
    pagination: PaginationControl,
}

impl CentersPage {
    pub fn new(config: &Config) -> Self {
        Self {
            title: "Centers".to_string(),
            path: format!("{}/centers", config.api_base_path),
            search: SearchBar::new(OptionKind::Centers, "Search by id, name or location"),
            table: RecordTable::new(),
            pagination: PaginationControl::new(&config.page_sizes),
        }
    }

    /// Paging keys map straight onto the local paginator
    fn page_move(code: KeyCode) -> Option<PageMove> {
        match code {
            KeyCode::Left | KeyCode::Char('h') => Some(PageMove::Prev),
            KeyCode::Right | KeyCode::Char('l') => Some(PageMove::Next),
            KeyCode::Home => Some(PageMove::First),
            KeyCode::End => Some(PageMove::Last),
            _ => None,
        }
    }

    fn row(center: &Center) -> Row<'static> {
        Row::new(vec![
            Cell::from(center.id.clone()),
            Cell::from(center.name.clone()),
            Cell::from(center.location.clone()),
            Cell::from(center.capacity.map_or_else(|| "-".to_string(), |c| c.to_string())),
            Cell::from(center.contact.clone().unwrap_or_else(|| "-".to_string())),
        ])
    }
}

#[async_trait]
impl Page for CentersPage {
    fn id(&self) -> PageId {
        "centers"
    }

    fn title(&self) -> &str {
        &self.title
    }

    async fn on_enter(&mut self, _route: &Route, ctx: &mut PageContext<'_>) -> ApiResult<()> {
        if !ctx.store.centers().loaded {
            store::fetch_centers(ctx.store, ctx.api).await?;
        }
        Ok(())
    }

    async fn handle_key_event(&mut self, event: KeyEvent, ctx: &mut PageContext<'_>) -> ApiResult<PageOutcome> {
        if self.search.is_editing() {
            if let Some(SearchEvent::Changed(keyword)) = self.search.handle_key_event(event, ctx.store) {
                if ctx.store.dispatch(Action::CentersKeywordChanged(keyword)) {
                    self.table.reset();
                }
            }
            return Ok(PageOutcome::Handled);
        }

        if let Some(step) = Self::page_move(event.code) {
            if ctx.store.dispatch(Action::CentersPageMoved(step)) {
                self.table.reset();
            }
            return Ok(PageOutcome::Handled);
        }

        let descriptor = ctx.store.centers_pagination(&self.path);
        if let Some(request) = self.pagination.handle_key_event(event, &descriptor) {
            if ctx.store.dispatch(Action::CentersPageRequested(request)) {
                self.table.reset();
            }
            return Ok(PageOutcome::Handled);
        }

        if self.table.handle_key_event(event, ctx.store.center_rows().len()) {
            return Ok(PageOutcome::Handled);
        }

        match event.code {
            KeyCode::Char('/') => {
                self.search.start_editing(ctx.store);
                Ok(PageOutcome::Handled)
            }
            KeyCode::Char('r') => {
                self.table.reset();
                store::fetch_centers(ctx.store, ctx.api).await?;
                Ok(PageOutcome::Handled)
            }
            _ => Ok(PageOutcome::Ignored),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme, store: &Store) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(4), Constraint::Length(1)])
            .split(area);

        self.search.render(frame, chunks[0], theme);

        let descriptor = store.centers_pagination(&self.path);
        let rows = store.center_rows().iter().map(Self::row).collect();
        self.table.render(
            frame,
            chunks[1],
            theme,
            TableView {
                title: format!("{} ({} of {})", self.title, descriptor.total, store.centers().all.len()),
                headers: HEADERS,
                widths: vec![
                    Constraint::Length(6),
                    Constraint::Percentage(30),
                    Constraint::Percentage(20),
                    Constraint::Length(9),
                    Constraint::Percentage(30),
                ],
                rows,
                focused: !self.search.is_editing(),
            },
        );

        self.pagination.render(frame, chunks[2], &descriptor, theme);
    }

    fn is_editing(&self) -> bool {
        self.search.is_editing()
    }

    fn help_text(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("/", "Search centers"),
            ("r", "Reload centers"),
            ("←/→", "Previous/next page"),
            ("Home/End", "First/last page"),
        ]
    }
}
