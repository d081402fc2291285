//! Text utilities for terminal output

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// String manipulation utilities
pub mod string {
    use super::*;

    /// Truncate text to a display width, ending with an ellipsis when cut
    pub fn truncate(text: &str, max_width: usize) -> String {
        if text.width() <= max_width {
            return text.to_string();
        }
        if max_width == 0 {
            return String::new();
        }

        let mut result = String::new();
        let mut width = 0;
        for ch in text.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if width + ch_width > max_width - 1 {
                break;
            }
            result.push(ch);
            width += ch_width;
        }
        result.push('…');
        result
    }

    /// Pad text with spaces up to a display width
    pub fn pad(text: &str, width: usize) -> String {
        let current = text.width();
        if current >= width {
            text.to_string()
        } else {
            format!("{}{}", text, " ".repeat(width - current))
        }
    }
}

/// Formatting utilities
pub mod format {
    use super::*;
    use std::time::Duration;

    /// Human readable duration, rounded to whole seconds
    pub fn format_elapsed(duration: Duration) -> String {
        humantime::format_duration(Duration::from_secs(duration.as_secs())).to_string()
    }

    /// Format a table with aligned columns; cells wider than `max_cell_width` are truncated
    pub fn format_table(headers: &[&str], rows: &[Vec<String>], max_cell_width: usize) -> String {
        if headers.is_empty() {
            return String::new();
        }

        let rows: Vec<Vec<String>> = rows
            .iter()
            .map(|row| row.iter().map(|cell| string::truncate(cell, max_cell_width)).collect())
            .collect();

        // Calculate column widths
        let mut widths = headers.iter().map(|h| h.width()).collect::<Vec<_>>();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.width());
                }
            }
        }

        let mut result = String::new();

        let header_row = headers
            .iter()
            .enumerate()
            .map(|(i, header)| string::pad(header, widths[i]))
            .collect::<Vec<_>>()
            .join(" | ");
        result.push_str(header_row.trim_end());
        result.push('\n');

        let separator = widths
            .iter()
            .map(|&width| "-".repeat(width))
            .collect::<Vec<_>>()
            .join("-+-");
        result.push_str(&separator);
        result.push('\n');

        for row in &rows {
            let formatted_row = row
                .iter()
                .enumerate()
                .map(|(i, cell)| string::pad(cell, widths.get(i).copied().unwrap_or(0)))
                .collect::<Vec<_>>()
                .join(" | ");
            result.push_str(formatted_row.trim_end());
            result.push('\n');
        }

        result
    }
}
