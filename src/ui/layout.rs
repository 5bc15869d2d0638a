use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub field: Rect,
    pub main: Rect,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(3),
            ])
            .split(area);

        Self {
            field: vertical[0],
            main: vertical[1],
            footer: vertical[2],
        }
    }
}

/// Regions inside the bordered picker popup.
pub struct PopupLayout {
    pub tabs: Rect,
    pub search: Rect,
    pub grid: Rect,
}

impl PopupLayout {
    pub fn new(inner: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
            ])
            .split(inner);

        Self {
            tabs: vertical[0],
            search: vertical[1],
            grid: vertical[2],
        }
    }
}
