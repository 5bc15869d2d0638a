mod app;
mod event;
mod ui;

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tracing_subscriber::EnvFilter;

use emojipick::config::Config;
use emojipick::widget::PickerContent;
use emojipick::{PickerWidget, Provider, dataset};

use app::{App, Focus, GRID_COLUMNS};
use event::{AppEvent, EventHandler};
use ui::components::picker_grid::PickerGrid;
use ui::components::preview_bar::PreviewBar;
use ui::components::tab_bar::{Tab, TabBar};
use ui::layout::{AppLayout, PopupLayout};
use ui::line_input::{InputResult, LineInput};
use ui::theme;

#[derive(Parser)]
#[command(name = "emojipick", version, about = "Searchable emoji picker")]
struct Cli {
    #[arg(
        short,
        long,
        help = "Image provider (twitter, apple, google, emojione, facebook, messenger)"
    )]
    provider: Option<String>,

    #[arg(short, long, help = "Emoji dataset JSON file (defaults to the bundled set)")]
    data: Option<PathBuf>,

    #[arg(short, long, help = "Print the entries matching a search and exit")]
    query: Option<String>,

    #[arg(short, long, help = "Print text with shorthand converted to emoji and exit")]
    render: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let interactive = cli.query.is_none() && cli.render.is_none();
    init_logging(interactive);

    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("ignoring unreadable config: {e:#}");
        Config::default()
    });
    if let Some(provider) = cli.provider {
        let provider: Provider = provider.parse()?;
        config.provider = provider.as_str().to_string();
    }

    let records = match &cli.data {
        Some(path) => dataset::from_path(path)
            .with_context(|| format!("failed to load dataset {}", path.display()))?,
        None => dataset::bundled()?,
    };

    if let Some(q) = &cli.query {
        let mut widget = PickerWidget::from_config(&config, records);
        return print_matches(&mut widget, q);
    }
    if let Some(text) = &cli.render {
        let widget = PickerWidget::from_config(&config, records);
        println!("{}", widget.render_to_string(text)?);
        return Ok(());
    }

    let mut app = App::new(config, records);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(25));
    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    if !app.field.value().is_empty() {
        println!("{}", app.rendered_field());
    }
    Ok(())
}

/// Interactive mode logs to a file so output does not tear the UI.
fn init_logging(interactive: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if !interactive {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
        return;
    }

    let Some(dir) = dirs::data_dir().map(|d| d.join("emojipick")) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    if let Ok(file) = File::create(dir.join("emojipick.log")) {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }
}

fn print_matches(widget: &mut PickerWidget, q: &str) -> Result<()> {
    let result = widget.search(q)?.clone();
    let catalog = widget.init()?.catalog();
    for id in result.matches() {
        let Some(record) = catalog.get(id) else {
            continue;
        };
        let category = catalog.category_of(id).map(|c| c.label()).unwrap_or("");
        println!(
            "{} {}  {} [{}]",
            record.glyph().unwrap_or_else(|| "?".to_string()),
            record.aliases(),
            record.name.to_lowercase(),
            category
        );
    }
    eprintln!("{} of {} entries match", result.match_count(), result.total());
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key, Instant::now())?,
            AppEvent::Tick | AppEvent::Resize => {}
        }
        app.tick(Instant::now())?;

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent, now: Instant) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return Ok(());
    }

    match app.focus {
        Focus::Field => handle_field_key(app, key, now),
        Focus::Picker => handle_picker_key(app, key, now),
    }
}

fn handle_field_key(app: &mut App, key: KeyEvent, now: Instant) -> Result<()> {
    if key.code == KeyCode::Tab {
        return app.toggle_picker(now);
    }
    if app.handle_field_key(key) == InputResult::Cancel {
        app.should_quit = true;
    }
    Ok(())
}

fn handle_picker_key(app: &mut App, key: KeyEvent, now: Instant) -> Result<()> {
    let row = GRID_COLUMNS as isize;
    match key.code {
        KeyCode::Tab | KeyCode::Esc => app.toggle_picker(now)?,
        KeyCode::Enter => app.choose()?,
        KeyCode::Left => app.move_selection(-1, now),
        KeyCode::Right => app.move_selection(1, now),
        KeyCode::Up => app.move_selection(-row, now),
        KeyCode::Down => app.move_selection(row, now),
        KeyCode::PageDown => app.jump_category(true, now)?,
        KeyCode::PageUp => app.jump_category(false, now)?,
        _ => {
            app.handle_search_key(key, now);
        }
    }
    Ok(())
}

fn input_line<'a>(prefix: &'a str, input: &'a LineInput, focused: bool) -> Line<'a> {
    let (before, cursor, after) = input.render_parts();
    let cursor_style = if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    let cursor_text = cursor.map(String::from).unwrap_or_else(|| " ".to_string());
    Line::from(vec![
        Span::styled(prefix, Style::default().fg(theme::DIM)),
        Span::raw(before),
        Span::styled(cursor_text, cursor_style),
        Span::raw(after),
    ])
}

fn tab_bar(app: &App, content: &PickerContent) -> TabBar {
    let catalog = content.catalog();
    let active = app.selected.and_then(|id| catalog.category_of(id));
    let tabs = catalog
        .categories()
        .iter()
        .map(|category| {
            let icon = app
                .widget
                .tab_icon(category.label())
                .ok()
                .flatten()
                .and_then(|id| catalog.get(id))
                .and_then(|r| r.glyph())
                .unwrap_or_else(|| category.label().chars().take(1).collect());
            Tab {
                label: category.label().to_string(),
                icon,
                active: active.is_some_and(|a| a.label() == category.label()),
            }
        })
        .collect();
    TabBar { tabs }
}

fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    let border = |focused: bool| {
        Style::default().fg(if focused { theme::ACCENT } else { theme::BORDER })
    };

    let field_block = Block::bordered()
        .title(" Message ")
        .border_style(border(app.focus == Focus::Field));
    frame.render_widget(
        Paragraph::new(input_line("", &app.field, app.focus == Focus::Field)).block(field_block),
        layout.field,
    );

    let picker_open = app.widget.is_open(app.picker);
    match app.content() {
        Some(content) if picker_open => {
            let block = Block::bordered()
                .title(" Emoji ")
                .border_style(border(true));
            let inner = block.inner(layout.main);
            frame.render_widget(block, layout.main);

            let popup = PopupLayout::new(inner);
            frame.render_widget(tab_bar(app, content), popup.tabs);
            frame.render_widget(
                Paragraph::new(input_line("Search: ", &app.search, true)),
                popup.search,
            );
            frame.render_widget(
                PickerGrid {
                    content,
                    result: app.widget.result(),
                    selected: app.selected,
                    colors: &app.cell_colors,
                },
                popup.grid,
            );
        }
        _ => {
            let block = Block::bordered()
                .title(" Rendered ")
                .border_style(border(false));
            frame.render_widget(
                Paragraph::new(app.rendered_field()).block(block),
                layout.main,
            );
        }
    }

    let hint = match app.focus {
        Focus::Field => "Tab open emoji picker | Esc quit",
        Focus::Picker => {
            "type to search | arrows move | PgUp/PgDn category | Enter insert | Esc close"
        }
    };
    frame.render_widget(
        PreviewBar {
            preview: if picker_open { app.preview.as_ref() } else { None },
            status: if picker_open { app.status.as_deref() } else { None },
            hint,
        },
        layout.footer,
    );
}
