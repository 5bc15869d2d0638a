use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use emojipick::widget::PickerContent;
use emojipick::{EntryId, QueryResult};

use crate::app::GRID_COLUMNS;
use crate::ui::theme;

/// Emoji cells grouped under category headers. While a search is active the
/// headers collapse into a single result list.
pub struct PickerGrid<'a> {
    pub content: &'a PickerContent,
    pub result: Option<&'a QueryResult>,
    pub selected: Option<EntryId>,
    pub colors: &'a [Color],
}

impl PickerGrid<'_> {
    fn header(label: &str) -> Line<'static> {
        Line::from(Span::styled(
            label.to_string(),
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ))
    }

    fn cell(&self, id: EntryId) -> Span<'static> {
        let glyph = self
            .content
            .catalog()
            .get(id)
            .and_then(|r| r.glyph())
            .unwrap_or_else(|| "?".to_string());
        let style = if self.selected == Some(id) {
            let color = self.colors.get(id.0).copied().unwrap_or(theme::ACCENT);
            Style::default().bg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Span::styled(format!("{glyph} "), style)
    }

    fn push_rows(
        &self,
        ids: &[EntryId],
        lines: &mut Vec<Line<'static>>,
        selected_line: &mut Option<usize>,
    ) {
        for row in ids.chunks(GRID_COLUMNS) {
            if self.selected.is_some_and(|s| row.contains(&s)) {
                *selected_line = Some(lines.len());
            }
            lines.push(Line::from(
                row.iter().map(|id| self.cell(*id)).collect::<Vec<_>>(),
            ));
        }
    }

    /// All lines plus the index of the line holding the selection.
    fn lines(&self) -> (Vec<Line<'static>>, Option<usize>) {
        let mut lines = Vec::new();
        let mut selected_line = None;

        match self.result {
            Some(result) if !result.is_reset() => {
                if result.has_no_results() {
                    lines.push(Line::from(Span::styled(
                        "No emoji found",
                        Style::default().fg(theme::DIM),
                    )));
                } else {
                    lines.push(Self::header("Search results"));
                    let ids: Vec<EntryId> = result.matches().collect();
                    self.push_rows(&ids, &mut lines, &mut selected_line);
                }
            }
            _ => {
                for category in self.content.catalog().categories() {
                    lines.push(Self::header(category.label()));
                    let ids: Vec<EntryId> = category.ids().collect();
                    self.push_rows(&ids, &mut lines, &mut selected_line);
                }
            }
        }
        (lines, selected_line)
    }
}

impl Widget for PickerGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let (lines, selected_line) = self.lines();
        let height = area.height as usize;
        let offset = match selected_line {
            Some(line) if line >= height => line + 1 - height,
            _ => 0,
        };
        Paragraph::new(lines)
            .scroll((offset.min(u16::MAX as usize) as u16, 0))
            .render(area, buf);
    }
}
