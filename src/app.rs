use std::time::Instant;

use anyhow::Result;
use ratatui::style::Color;

use emojipick::catalog::RawEmojiRecord;
use emojipick::config::Config;
use emojipick::debounce::Debounced;
use emojipick::insert::{PlainTextField, TextTarget};
use emojipick::widget::{FieldKind, PickerContent, PickerId, PickerWidget, Preview};
use emojipick::EntryId;

use crate::ui::line_input::{InputResult, LineInput};
use crate::ui::theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Field,
    Picker,
}

/// Emoji cells per grid row.
pub const GRID_COLUMNS: usize = 10;

pub struct App {
    pub config: Config,
    pub widget: PickerWidget,
    pub picker: PickerId,
    pub field: LineInput,
    pub search: LineInput,
    pub focus: Focus,
    pub selected: Option<EntryId>,
    pub preview: Option<Preview>,
    pub cell_colors: Vec<Color>,
    pub status: Option<String>,
    pub should_quit: bool,
    search_timer: Debounced<String>,
    preview_timer: Debounced<EntryId>,
    preview_exit: Debounced<()>,
}

impl App {
    pub fn new(config: Config, records: Vec<RawEmojiRecord>) -> Self {
        let mut widget = PickerWidget::from_config(&config, records);
        let picker = widget.attach(FieldKind::PlainText);
        Self {
            search_timer: Debounced::new(config.search_debounce_ms),
            preview_timer: Debounced::new(config.preview_delay_ms),
            preview_exit: Debounced::new(config.preview_exit_ms),
            config,
            widget,
            picker,
            field: LineInput::new(""),
            search: LineInput::new(""),
            focus: Focus::Field,
            selected: None,
            preview: None,
            cell_colors: Vec::new(),
            status: None,
            should_quit: false,
        }
    }

    pub fn content(&self) -> Option<&PickerContent> {
        if self.widget.is_initialized() {
            self.widget.init().ok()
        } else {
            None
        }
    }

    pub fn toggle_picker(&mut self, now: Instant) -> Result<()> {
        let open = self.widget.open(self.picker)?;
        if !open {
            self.focus = Focus::Field;
            return Ok(());
        }
        self.focus = Focus::Picker;
        self.search.clear();
        self.search_timer.cancel();
        self.status = None;
        self.widget.search("")?;
        if self.cell_colors.is_empty() {
            let total = self.widget.init()?.catalog().len();
            self.cell_colors = theme::cell_colors(&self.config.picker_colors, total);
        }
        if self.selected.is_none_or(|id| !self.is_visible(id)) {
            let first = self.visible_entries().first().copied();
            self.select(first, now);
        }
        Ok(())
    }

    fn is_visible(&self, id: EntryId) -> bool {
        self.widget.result().is_some_and(|r| r.is_matched(id))
    }

    /// Entries currently shown, in grid order.
    pub fn visible_entries(&self) -> Vec<EntryId> {
        self.widget
            .result()
            .map(|r| r.matches().collect())
            .unwrap_or_default()
    }

    pub fn handle_field_key(&mut self, key: crossterm::event::KeyEvent) -> InputResult {
        self.field.handle(key)
    }

    pub fn handle_search_key(
        &mut self,
        key: crossterm::event::KeyEvent,
        now: Instant,
    ) -> InputResult {
        let result = self.search.handle(key);
        if result == InputResult::Edited {
            self.search_timer
                .schedule(self.search.value().to_string(), now);
        }
        result
    }

    /// Fire any timers whose quiet period has elapsed.
    pub fn tick(&mut self, now: Instant) -> Result<()> {
        if let Some(q) = self.search_timer.take_ready(now) {
            let result = self.widget.search(&q)?;
            if result.has_no_results() {
                self.status = Some(format!("No emoji found for \"{q}\""));
            } else {
                self.status = None;
            }
            if self.selected.is_none_or(|id| !self.is_visible(id)) {
                let first = self.visible_entries().first().copied();
                self.select(first, now);
            }
        }

        if let Some(id) = self.preview_timer.take_ready(now) {
            self.preview = self.widget.preview(id).ok();
        }
        if self.preview_exit.take_ready(now).is_some() {
            self.preview = None;
        }
        Ok(())
    }

    fn select(&mut self, id: Option<EntryId>, now: Instant) {
        self.selected = id;
        match id {
            Some(id) => {
                self.preview_exit.cancel();
                self.preview_timer.schedule(id, now);
            }
            None => {
                self.preview_timer.cancel();
                self.preview_exit.schedule((), now);
            }
        }
    }

    /// Move the cursor by `delta` cells through the visible entries.
    pub fn move_selection(&mut self, delta: isize, now: Instant) {
        let visible = self.visible_entries();
        if visible.is_empty() {
            return;
        }
        let current = self
            .selected
            .and_then(|id| visible.iter().position(|v| *v == id))
            .unwrap_or(0);
        let next = current
            .saturating_add_signed(delta)
            .min(visible.len() - 1);
        self.select(Some(visible[next]), now);
    }

    /// Jump to the first visible entry of the next or previous category.
    pub fn jump_category(&mut self, forward: bool, now: Instant) -> Result<()> {
        let content = self.widget.init()?;
        let categories = content.catalog().categories();
        let current = self
            .selected
            .and_then(|id| categories.iter().position(|c| c.contains(id)))
            .unwrap_or(0);

        let order: Vec<usize> = if forward {
            (current + 1..categories.len()).collect()
        } else {
            (0..current).rev().collect()
        };
        let target = order.into_iter().find_map(|i| {
            categories[i]
                .ids()
                .find(|id| self.widget.result().is_some_and(|r| r.is_matched(*id)))
        });
        if let Some(id) = target {
            self.select(Some(id), now);
        }
        Ok(())
    }

    /// Insert the selected emoji into the message field and close the picker.
    pub fn choose(&mut self) -> Result<()> {
        let Some(id) = self.selected else {
            return Ok(());
        };
        let cursor = self.field.cursor();
        let mut target = PlainTextField::with_selection(self.field.value(), cursor, cursor);
        self.widget.select(id, &mut target)?;
        self.field = LineInput::with_cursor(target.text(), target.caret());
        self.focus = Focus::Field;
        Ok(())
    }

    /// The message field as it would be displayed, with shorthand painted.
    pub fn rendered_field(&self) -> String {
        self.widget
            .render_to_string(self.field.value())
            .unwrap_or_else(|_| self.field.value().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use emojipick::dataset;

    fn app() -> App {
        App::new(Config::default(), dataset::bundled().unwrap())
    }

    fn type_search(app: &mut App, text: &str, now: Instant) {
        for c in text.chars() {
            app.handle_search_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE), now);
        }
    }

    fn after_quiet(app: &App, now: Instant) -> Instant {
        now + Duration::from_millis(app.config.search_debounce_ms + 1)
    }

    #[test]
    fn toggle_moves_focus_and_selects_first_entry() {
        let mut app = app();
        let now = Instant::now();
        app.toggle_picker(now).unwrap();
        assert_eq!(app.focus, Focus::Picker);
        assert_eq!(app.selected, Some(EntryId(0)));
        assert!(!app.cell_colors.is_empty());

        app.toggle_picker(now).unwrap();
        assert_eq!(app.focus, Focus::Field);
        assert!(!app.widget.is_open(app.picker));
    }

    #[test]
    fn search_runs_after_quiet_period() {
        let mut app = app();
        let now = Instant::now();
        app.toggle_picker(now).unwrap();
        type_search(&mut app, "piz", now);

        app.tick(now).unwrap();
        assert!(app.widget.result().unwrap().is_reset());

        app.tick(after_quiet(&app, now)).unwrap();
        let result = app.widget.result().unwrap();
        assert_eq!(result.query(), "piz");
        assert_eq!(result.match_count(), 1);
        assert!(app.status.is_none());
    }

    #[test]
    fn empty_search_sets_status() {
        let mut app = app();
        let now = Instant::now();
        app.toggle_picker(now).unwrap();
        type_search(&mut app, "zzzzzznotreal", now);
        app.tick(after_quiet(&app, now)).unwrap();

        assert!(app.status.as_deref().unwrap().contains("No emoji found"));
        assert_eq!(app.selected, None);
    }

    #[test]
    fn choose_replaces_partial_shorthand() {
        let mut app = app();
        let now = Instant::now();
        app.field = LineInput::new("hi :piz");
        app.toggle_picker(now).unwrap();
        type_search(&mut app, "piz", now);
        app.tick(after_quiet(&app, now)).unwrap();

        app.choose().unwrap();
        assert_eq!(app.field.value(), "hi :pizza: ");
        assert_eq!(app.focus, Focus::Field);
        assert_eq!(app.rendered_field(), "hi \u{1F355} ");
    }

    #[test]
    fn reopening_clears_previous_search() {
        let mut app = app();
        let now = Instant::now();
        app.toggle_picker(now).unwrap();
        type_search(&mut app, "piz", now);
        app.tick(after_quiet(&app, now)).unwrap();
        app.toggle_picker(now).unwrap();

        app.toggle_picker(now).unwrap();
        assert!(app.search.value().is_empty());
        assert!(app.widget.result().unwrap().is_reset());
    }

    #[test]
    fn page_down_jumps_to_next_category() {
        let mut app = app();
        let now = Instant::now();
        app.toggle_picker(now).unwrap();
        app.jump_category(true, now).unwrap();

        let content = app.content().unwrap();
        let nature = content.catalog().category("Nature").unwrap();
        assert_eq!(app.selected, nature.ids().next());
    }
}
