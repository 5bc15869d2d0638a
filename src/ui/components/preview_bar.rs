use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use emojipick::widget::Preview;

use crate::ui::theme;

pub struct PreviewBar<'a> {
    pub preview: Option<&'a Preview>,
    pub status: Option<&'a str>,
    pub hint: &'a str,
}

impl Widget for PreviewBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().border_style(Style::default().fg(theme::BORDER));
        let inner = block.inner(area);
        block.render(area, buf);

        let line = if let Some(status) = self.status {
            Line::from(Span::styled(status.to_string(), Style::default().fg(theme::DIM)))
        } else if let Some(preview) = self.preview {
            Line::from(vec![
                Span::raw(format!(
                    "{} ",
                    preview.glyph.as_deref().unwrap_or("?")
                )),
                Span::styled(
                    preview.short_name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(preview.aliases.clone(), Style::default().fg(theme::ACCENT)),
                Span::styled(
                    format!("  {}", preview.name.to_lowercase()),
                    Style::default().fg(theme::DIM),
                ),
            ])
        } else {
            Line::from(Span::styled(self.hint.to_string(), Style::default().fg(theme::DIM)))
        };
        Paragraph::new(line).render(inner, buf);
    }
}
