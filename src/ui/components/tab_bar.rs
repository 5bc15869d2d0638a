use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::ui::theme;

pub struct Tab {
    pub label: String,
    pub icon: String,
    pub active: bool,
}

/// One icon per category; the tab owning the selection is highlighted.
pub struct TabBar {
    pub tabs: Vec<Tab>,
}

impl Widget for TabBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let spans: Vec<Span> = self
            .tabs
            .into_iter()
            .flat_map(|tab| {
                let style = if tab.active {
                    Style::default()
                        .bg(theme::SELECTED_BG)
                        .fg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme::DIM)
                };
                let text = if tab.active {
                    format!(" {} {} ", tab.icon, tab.label)
                } else {
                    format!(" {} ", tab.icon)
                };
                [Span::styled(text, style), Span::raw(" ")]
            })
            .collect();
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
