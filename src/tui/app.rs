use crate::api::{ApiResult, DataSource};
use crate::config::Config;
use crate::navigation::{Route, Router};
use crate::store::{self, Action, Store};
use crate::tui::{
    components::SideMenu,
    events::Event,
    keys::KeyMap,
    pages::{all_pages, PageContext, PageManager, PageOutcome},
    styles::Theme,
    Frame,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEventKind};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How long a status message stays in the status bar
const STATUS_DURATION_MS: u64 = 5_000;

/// Which pane receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Menu,
    Page,
}

/// Main application state and controller
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,

    /// Current application dimensions
    pub size: Rect,

    /// Key mappings for the application
    pub key_map: KeyMap,

    /// Page manager for handling different screens
    pub page_manager: PageManager,

    /// Current theme for styling
    pub theme: Theme,

    /// Application state
    pub store: Store,

    api: Arc<dyn DataSource>,
    config: Config,
    router: Router,
    side_menu: SideMenu,
    focus: Focus,
    show_help: bool,

    /// Ticks left before the status message is cleared
    status_ticks: u64,
}

impl App {
    /// Create the application, load the initial data and open the start page
    pub async fn new(config: Config, api: Arc<dyn DataSource>) -> Result<Self> {
        let mut store = Store::new(config.per_page, &config.tracked_sections);
        store::bootstrap(&mut store, api.as_ref(), config.role).await?;

        let mut page_manager = PageManager::new();
        for page in all_pages(&config) {
            page_manager.register_page(page);
        }

        let start = match Self::permission_for(&store, &config.start_path) {
            Ok(()) => config.start_path.clone(),
            Err(code) => {
                warn!(start = %config.start_path, permission = code, "Start page not allowed, opening dashboard");
                Route::DASHBOARD.to_string()
            }
        };

        let mut app = Self {
            should_quit: false,
            size: Rect::default(),
            key_map: KeyMap::default(),
            page_manager,
            theme: Theme::default(),
            store,
            router: Router::new(&start),
            side_menu: SideMenu::new(),
            focus: Focus::Page,
            show_help: false,
            status_ticks: 0,
            api,
            config,
        };

        info!(location = %start, role = %app.config.role, "Console ready");
        app.enter_current().await;
        Ok(app)
    }

    /// The permission a location needs, when the active role lacks it
    fn permission_for(store: &Store, path: &str) -> std::result::Result<(), &'static str> {
        match Route::parse(path).required_permission() {
            Some(code) if !store.can(code) => Err(code),
            _ => Ok(()),
        }
    }

    /// Current location
    pub fn location(&self) -> &str {
        self.router.location()
    }

    /// Open a location if the active role may see it
    pub async fn navigate(&mut self, path: &str) {
        if let Err(code) = Self::permission_for(&self.store, path) {
            warn!(path, permission = code, "Navigation denied");
            self.set_status(format!("Access denied: {} requires '{}'", path, code));
            return;
        }

        if self.router.navigate(path) {
            self.enter_current().await;
        }
    }

    /// Return to the previous location
    pub async fn go_back(&mut self) {
        if self.router.back().is_some() {
            self.enter_current().await;
        }
    }

    /// Record the router's location in the store and activate its page
    async fn enter_current(&mut self) {
        let route = self.router.route();
        let location = self.router.location().to_string();
        debug!(location = %location, page = route.page_id(), "Entering page");

        if matches!(route, Route::NotFound(_)) {
            self.page_manager.activate(route.page_id());
            return;
        }

        self.store.dispatch(Action::Navigated(location));
        if !self.page_manager.activate(route.page_id()) {
            return;
        }

        let mut ctx = PageContext {
            store: &mut self.store,
            api: self.api.as_ref(),
            config: &self.config,
        };
        let result = match self.page_manager.current_page_mut() {
            Some(page) => page.on_enter(&route, &mut ctx).await,
            None => Ok(()),
        };
        self.report(result);
    }

    fn set_status(&mut self, message: String) {
        self.store.dispatch(Action::StatusSet(message));
        self.status_ticks = (STATUS_DURATION_MS / self.config.tick_rate_ms.max(1)).max(1);
    }

    /// Surface a data-source failure in the status bar
    fn report(&mut self, result: ApiResult<()>) {
        if let Err(e) = result {
            warn!("Request failed: {}", e);
            self.set_status(e.to_string());
        }
    }

    /// Handle incoming events. Returns true when the application should exit.
    pub async fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Key(key_event) => self.handle_key_event(key_event).await,

            Event::Mouse(mouse_event) => {
                if self.config.mouse_enabled && self.focus == Focus::Page {
                    let code = match mouse_event.kind {
                        MouseEventKind::ScrollDown => Some(KeyCode::Down),
                        MouseEventKind::ScrollUp => Some(KeyCode::Up),
                        _ => None,
                    };
                    if let Some(code) = code {
                        self.forward_to_page(KeyEvent::new(code, KeyModifiers::NONE)).await;
                    }
                }
            }

            Event::Resize(width, height) => {
                self.size = Rect::new(0, 0, width, height);
            }

            Event::Tick => {
                if self.status_ticks > 0 {
                    self.status_ticks -= 1;
                    if self.status_ticks == 0 {
                        self.store.dispatch(Action::StatusCleared);
                    }
                }
            }
        }

        Ok(self.should_quit)
    }

    async fn handle_key_event(&mut self, key_event: KeyEvent) {
        if self.key_map.should_quit(&key_event) {
            self.should_quit = true;
            return;
        }

        if self.key_map.should_show_help(&key_event) {
            self.show_help = !self.show_help;
            return;
        }

        if self.show_help {
            // Any other key closes the overlay
            self.show_help = false;
            return;
        }

        let editing = self.focus == Focus::Page
            && self.page_manager.current_page().map_or(false, |page| page.is_editing());
        if editing {
            self.forward_to_page(key_event).await;
            return;
        }

        if self.key_map.should_switch_focus(&key_event) {
            self.focus = match self.focus {
                Focus::Menu => Focus::Page,
                Focus::Page => Focus::Menu,
            };
            return;
        }

        if self.key_map.should_go_back(&key_event) {
            self.go_back().await;
            return;
        }

        match self.focus {
            Focus::Menu => {
                if let Some(target) = self.side_menu.handle_key_event(key_event, &self.store) {
                    self.focus = Focus::Page;
                    self.navigate(&target).await;
                }
            }
            Focus::Page => self.forward_to_page(key_event).await,
        }
    }

    async fn forward_to_page(&mut self, key_event: KeyEvent) {
        let mut ctx = PageContext {
            store: &mut self.store,
            api: self.api.as_ref(),
            config: &self.config,
        };
        let outcome = match self.page_manager.current_page_mut() {
            Some(page) => page.handle_key_event(key_event, &mut ctx).await,
            None => Ok(PageOutcome::Ignored),
        };

        match outcome {
            Ok(PageOutcome::Navigate(path)) => self.navigate(&path).await,
            Ok(PageOutcome::Handled | PageOutcome::Ignored) => {}
            Err(e) => self.report(Err(e)),
        }
    }

    /// Render the application UI
    pub fn render(&mut self, frame: &mut Frame) {
        self.size = frame.size();

        // Create main layout
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Main content
                Constraint::Length(1), // Status bar
            ])
            .split(frame.size());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(20), Constraint::Min(20)])
            .split(rows[0]);

        self.side_menu
            .render(frame, columns[0], &self.theme, &self.store, self.focus == Focus::Menu);

        // Render current page
        if let Some(current_page) = self.page_manager.current_page_mut() {
            current_page.render(frame, columns[1], &self.theme, &self.store);
        } else {
            // Render empty state
            let empty_block = Block::default()
                .borders(Borders::ALL)
                .title("Not found")
                .style(self.theme.base_style());

            let empty_text = Paragraph::new(format!("Nothing lives at {}", self.router.location()))
                .block(empty_block)
                .style(self.theme.placeholder_style());

            frame.render_widget(empty_text, columns[1]);
        }

        // Render status bar
        self.render_status_bar(frame, rows[1]);

        // Render help overlay if enabled
        if self.show_help {
            self.render_help_overlay(frame);
        }
    }

    /// Render the status bar
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let paragraph = match self.store.status() {
            Some(message) => Paragraph::new(message.to_string()).style(self.theme.error_style()),
            None => Paragraph::new(format!(
                "{} | role: {} | Tab: menu/page | Ctrl+G: help | Ctrl+C: quit",
                self.router.location(),
                self.config.role
            ))
            .style(self.theme.status_bar_style()),
        };

        frame.render_widget(paragraph, area);
    }

    /// Render help overlay
    fn render_help_overlay(&self, frame: &mut Frame) {
        let help_area = centered_rect(60, 50, frame.size());

        let mut bindings = self.key_map.bindings();
        if let Some(page) = self.page_manager.current_page() {
            bindings.extend(page.help_text());
        }

        let lines: Vec<Line> = bindings
            .into_iter()
            .map(|(key, description)| {
                Line::from(vec![
                    Span::styled(format!("{:<14}", key), self.theme.header_style()),
                    Span::styled(description, self.theme.text_style()),
                ])
            })
            .collect();

        let title = match self.page_manager.current_page() {
            Some(page) => format!("Help: {}", page.title()),
            None => "Help".to_string(),
        };
        let help_block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(self.theme.help_style());

        frame.render_widget(Clear, help_area);
        frame.render_widget(Paragraph::new(lines).block(help_block), help_area);
    }
}

/// Create a centered rectangle with given percentage of the screen
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
