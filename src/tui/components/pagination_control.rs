//! Pagination control for list pages.
//!
//! The control owns no page state. It renders a [`PaginationDescriptor`] and
//! turns navigation keys into the [`PageRequest`] that the owning page should
//! apply, so server-side and client-side lists share the same widget.

use crate::pagination::{PageRequest, PaginationDescriptor};
use crate::tui::{styles::Theme, Frame};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Pagination display styles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationStyle {
    /// Compact: "Page 1 of 10"
    Compact,
    /// Full: "Page 1 of 10 (1-20 of 200 items)"
    Full,
    /// Numbers: "< 1 2 [3] 4 5 >"
    Numbers,
}

#[derive(Debug, Clone)]
pub struct PaginationControl {
    style: PaginationStyle,

    /// Page sizes cycled with `+` and `-`
    page_sizes: Vec<usize>,

    /// Maximum number of page numbers to show
    max_page_numbers: usize,
}

impl PaginationControl {
    pub fn new(page_sizes: &[usize]) -> Self {
        Self {
            style: PaginationStyle::Numbers,
            page_sizes: page_sizes.iter().copied().filter(|&size| size > 0).collect(),
            max_page_numbers: 7,
        }
    }

    pub fn with_style(mut self, style: PaginationStyle) -> Self {
        self.style = style;
        self
    }

    pub fn style(&self) -> PaginationStyle {
        self.style
    }

    /// Map a key to the request it asks for. `None` when the key is not a
    /// pagination key or the move is not possible from `descriptor`.
    pub fn handle_key_event(&self, key: KeyEvent, descriptor: &PaginationDescriptor) -> Option<PageRequest> {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => descriptor.prev_request(),
            KeyCode::Right | KeyCode::Char('l') => descriptor.next_request(),
            KeyCode::Home if descriptor.current_page != 1 => Some(descriptor.first_request()),
            KeyCode::End if descriptor.current_page != descriptor.last_page => {
                Some(descriptor.last_request())
            }
            KeyCode::Char('+') => self
                .cycle_page_size(descriptor.per_page, true)
                .map(PageRequest::first),
            KeyCode::Char('-') => self
                .cycle_page_size(descriptor.per_page, false)
                .map(PageRequest::first),
            _ => None,
        }
    }

    /// Next (or previous) configured page size after `current`, wrapping around
    fn cycle_page_size(&self, current: usize, forward: bool) -> Option<usize> {
        if self.page_sizes.is_empty() {
            return None;
        }
        let len = self.page_sizes.len();
        let next = match self.page_sizes.iter().position(|&size| size == current) {
            Some(i) if forward => self.page_sizes[(i + 1) % len],
            Some(i) => self.page_sizes[(i + len - 1) % len],
            // Not one of the configured sizes: jump to the nearest one in that direction
            None if forward => self
                .page_sizes
                .iter()
                .copied()
                .find(|&size| size > current)
                .unwrap_or(self.page_sizes[0]),
            None => self
                .page_sizes
                .iter()
                .rev()
                .copied()
                .find(|&size| size < current)
                .unwrap_or(self.page_sizes[len - 1]),
        };
        (next != current).then_some(next)
    }

    /// Build the pagination line for a descriptor
    pub fn line(&self, descriptor: &PaginationDescriptor, theme: &Theme) -> Line<'static> {
        match self.style {
            PaginationStyle::Compact => Line::from(Span::styled(
                format!("Page {} of {}", descriptor.current_page, descriptor.last_page),
                theme.text_style(),
            )),
            PaginationStyle::Full => self.render_full_style(descriptor, theme),
            PaginationStyle::Numbers => self.render_numbers_style(descriptor, theme),
        }
    }

    /// Render full pagination style
    fn render_full_style(&self, descriptor: &PaginationDescriptor, theme: &Theme) -> Line<'static> {
        Line::from(vec![
            Span::styled(
                format!("Page {} of {}", descriptor.current_page, descriptor.last_page),
                theme.text_style(),
            ),
            Span::styled(
                format!(
                    " ({}-{} of {} items, {} per page)",
                    descriptor.from, descriptor.to, descriptor.total, descriptor.per_page
                ),
                theme.dim_style(),
            ),
        ])
    }

    /// Render numbers pagination style
    fn render_numbers_style(&self, descriptor: &PaginationDescriptor, theme: &Theme) -> Line<'static> {
        let mut spans = Vec::new();

        let arrow_style = |enabled: bool| {
            if enabled {
                theme.header_style()
            } else {
                theme.disabled_style()
            }
        };

        spans.push(Span::styled("< ", arrow_style(descriptor.has_prev())));

        for page in self.visible_pages(descriptor) {
            if page == descriptor.current_page {
                spans.push(Span::styled(format!("[{}]", page), theme.current_page_style()));
                spans.push(Span::raw(" "));
            } else {
                spans.push(Span::styled(format!("{} ", page), theme.text_style()));
            }
        }

        spans.push(Span::styled(">", arrow_style(descriptor.has_next())));
        spans.push(Span::styled(format!("  {}", descriptor.summary()), theme.dim_style()));

        Line::from(spans)
    }

    /// Page numbers shown around the current page, 1-based
    pub fn visible_pages(&self, descriptor: &PaginationDescriptor) -> std::ops::RangeInclusive<usize> {
        let window = self.max_page_numbers.max(1);
        let last = descriptor.last_page.max(1);
        let start = descriptor
            .current_page
            .saturating_sub(window / 2)
            .max(1)
            .min(last.saturating_sub(window - 1).max(1));
        let end = (start + window - 1).min(last);
        start..=end
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, descriptor: &PaginationDescriptor, theme: &Theme) {
        let paragraph = Paragraph::new(self.line(descriptor, theme))
            .alignment(Alignment::Center)
            .style(theme.base_style());
        frame.render_widget(paragraph, area);
    }
}
