use super::{Page, PageContext, PageId, PageOutcome};
use crate::api::{ApiResult, JobStats, JobStatus};
use crate::navigation::Route;
use crate::store::{self, Store};
use crate::tui::{styles::Theme, Frame};
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const STATS_PERMISSION: &str = "dashboard.stats";
const BAR_WIDTH: usize = 30;

/// Landing page: job counts and recently visited locations
pub struct DashboardPage {
    title: String,
}

impl DashboardPage {
    pub fn new() -> Self {
        Self {
            title: "Dashboard".to_string(),
        }
    }

    fn stats_lines(stats: &JobStats, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(vec![
                Span::styled("Total jobs  ", theme.dim_style()),
                Span::styled(stats.total.to_string(), theme.text_style()),
                Span::styled("   active  ", theme.dim_style()),
                Span::styled(stats.active().to_string(), theme.text_style()),
            ]),
            Line::default(),
        ];

        for status in JobStatus::ALL {
            let count = stats.count(status);
            let bar = if stats.total == 0 { 0 } else { count * BAR_WIDTH / stats.total };
            lines.push(Line::from(vec![
                Span::styled(format!("{:<10} ", status.as_str()), theme.text_style()),
                Span::styled(format!("{:>4} ", count), theme.text_style()),
                Span::styled("█".repeat(bar), theme.job_status_style(status)),
            ]));
        }
        lines
    }

    fn recent_lines(store: &Store, theme: &Theme) -> Vec<Line<'static>> {
        let memory = store.navigation_memory();
        if memory.is_empty() {
            return vec![Line::from(Span::styled("Nothing visited yet", theme.placeholder_style()))];
        }
        memory
            .entries()
            .map(|(section, path)| {
                Line::from(vec![
                    Span::styled(format!("{:<10} ", section), theme.dim_style()),
                    Span::styled(path.to_string(), theme.text_style()),
                ])
            })
            .collect()
    }
}

#[async_trait]
impl Page for DashboardPage {
    fn id(&self) -> PageId {
        "dashboard"
    }

    fn title(&self) -> &str {
        &self.title
    }

    async fn on_enter(&mut self, _route: &Route, ctx: &mut PageContext<'_>) -> ApiResult<()> {
        if ctx.store.can(STATS_PERMISSION) {
            store::fetch_job_stats(ctx.store, ctx.api).await?;
        }
        Ok(())
    }

    async fn handle_key_event(&mut self, event: KeyEvent, ctx: &mut PageContext<'_>) -> ApiResult<PageOutcome> {
        match event.code {
            KeyCode::Char('r') if ctx.store.can(STATS_PERMISSION) => {
                store::fetch_job_stats(ctx.store, ctx.api).await?;
                Ok(PageOutcome::Handled)
            }
            KeyCode::Char('j') => Ok(PageOutcome::Navigate(Route::JOBS.to_string())),
            _ => Ok(PageOutcome::Ignored),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme, store: &Store) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(10), Constraint::Min(3)])
            .split(area);

        let role = store
            .permissions()
            .role
            .map_or_else(|| "unknown".to_string(), |role| role.to_string());

        let stats = match store.job_stats() {
            Some(stats) if store.can(STATS_PERMISSION) => Self::stats_lines(stats, theme),
            Some(_) => vec![Line::from(Span::styled(
                "Statistics are not available to this role",
                theme.placeholder_style(),
            ))],
            None => vec![Line::from(Span::styled("Loading statistics...", theme.placeholder_style()))],
        };

        frame.render_widget(
            Paragraph::new(stats).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Jobs overview (role: {})", role))
                    .border_style(theme.border_style(false)),
            ),
            chunks[0],
        );

        frame.render_widget(
            Paragraph::new(Self::recent_lines(store, theme)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Last visited")
                    .border_style(theme.border_style(false)),
            ),
            chunks[1],
        );
    }

    fn help_text(&self) -> Vec<(&'static str, &'static str)> {
        vec![("r", "Refresh statistics"), ("j", "Open jobs")]
    }
}

impl Default for DashboardPage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_bars_scale_with_counts() {
        let stats = JobStats {
            total: 10,
            by_status: [(JobStatus::Succeeded, 10)].into_iter().collect(),
        };
        let lines = DashboardPage::stats_lines(&stats, &Theme::default());
        // Header, spacer, then one line per status
        assert_eq!(lines.len(), 2 + JobStatus::ALL.len());

        let succeeded = lines
            .iter()
            .find(|line| line.spans[0].content.starts_with("succeeded"))
            .unwrap();
        assert_eq!(succeeded.spans[2].content.chars().count(), BAR_WIDTH);
    }
}
