pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, Theme, ThemeColors};

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Buffer stderr while TUI is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    let mut events = EventHandler::new(250);

    let result = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &app)) {
            break Err(e.into());
        }

        match events.next().await {
            Some(Event::Key(key)) => handle_key_event(&mut app, key),
            Some(Event::Tick) => app.tick(Instant::now()),
            Some(Event::Resize) => {}
            None => break Err(anyhow::anyhow!("Terminal input closed")),
        }

        if app.should_quit {
            break Ok(());
        }
    };

    app.flush();

    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    result
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
        app::InputMode::Normal => match app.screen {
            app::Screen::Form => handle_form_key(app, key),
            app::Screen::Result => handle_result_key(app, key),
        },
    }
}

fn handle_form_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        // Navigation
        KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') => app.next_field(),
        KeyCode::Up | KeyCode::BackTab | KeyCode::Char('k') => app.previous_field(),

        // Editing
        KeyCode::Char(c) if App::accepts_char(c) => app.input_char(c),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Delete => app.clear_field(),

        KeyCode::Enter => app.calculate(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('?') => app.show_help(),

        _ => {}
    }
}

fn handle_result_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('b') | KeyCode::Esc => app.back_to_form(),
        KeyCode::Char('e') => app.export_report(),
        KeyCode::Char('o') => app.open_last_export(),
        KeyCode::Char('r') => app.restart(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('?') => app.show_help(),
        _ => {}
    }
}
