pub mod action;
pub mod state;
pub mod view;

use crate::client::ApiClient;
use crate::config::Config;
use crate::model::Filter;
use crate::tui::action::{Action, AppEvent};
use crate::tui::state::{AppState, FetchRequest, InputMode};
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{env, io, time::Duration};
use tokio::sync::mpsc;

/// Every page change and the manual reload go through here: one fetch
/// action per issued request, tagged with its sequence number.
async fn send_fetch(tx: &mpsc::Sender<Action>, req: FetchRequest, filter: &Filter) {
    let _ = tx
        .send(Action::FetchPage {
            seq: req.seq,
            page: req.page,
            filter: filter.clone(),
        })
        .await;
}

pub async fn run() -> Result<()> {
    // Panic Hook: the alternate screen eats panic output, keep it in a file.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        use std::io::Write;
        if let Ok(mut file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("taskpager_panic.log")
        {
            let _ = writeln!(file, "PANIC: {:?}", info);
        }
        default_hook(info);
    }));

    // Config file, with an optional base URL override from the CLI.
    let mut config = Config::load().unwrap_or_default();
    let args: Vec<String> = env::args().collect();
    if args.len() > 1 {
        config.base_url = args[1].clone();
    }
    let page_size = config.effective_page_size();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app_state = AppState::new();
    let (action_tx, mut action_rx) = mpsc::channel(10);
    let (event_tx, mut event_rx) = mpsc::channel(10);

    // SPAWN FETCH ACTOR
    let actor_config = config.clone();
    tokio::spawn(async move {
        let client = match ApiClient::new(&actor_config.base_url, actor_config.allow_insecure_certs)
        {
            Ok(c) => c,
            Err(e) => {
                let _ = event_tx.send(AppEvent::Error(e)).await;
                return;
            }
        };

        let _ = event_tx
            .send(AppEvent::Status(format!(
                "Fetching from {}...",
                actor_config.base_url
            )))
            .await;

        while let Some(action) = action_rx.recv().await {
            match action {
                Action::Quit => break,
                Action::FetchPage { seq, page, filter } => {
                    match client.fetch_page(page, page_size, &filter).await {
                        Ok(tasks) => {
                            let _ = event_tx.send(AppEvent::PageLoaded { seq, page, tasks }).await;
                        }
                        Err(message) => {
                            let _ = event_tx.send(AppEvent::FetchFailed { seq, message }).await;
                        }
                    }
                }
            }
        }
    });

    // Initial load: page 1.
    let req = app_state.initial_fetch();
    send_fetch(&action_tx, req, &app_state.filter).await;

    // UI Loop
    loop {
        terminal.draw(|f| view::draw(f, &mut app_state))?;

        if let Ok(app_event) = event_rx.try_recv() {
            match app_event {
                AppEvent::PageLoaded { seq, page, tasks } => {
                    // apply_loaded drops stale responses on its own.
                    let _ = app_state.apply_loaded(seq, page, tasks);
                }
                AppEvent::FetchFailed { seq, message } => {
                    let _ = app_state.apply_error(seq, &message);
                }
                AppEvent::Error(msg) => {
                    app_state.message = format!("Error: {}", msg);
                    app_state.loading = false;
                }
                AppEvent::Status(msg) => {
                    app_state.message = msg;
                }
            }
        }

        // Process User Input
        if crossterm::event::poll(Duration::from_millis(50))? {
            let terminal_event = event::read()?;

            match terminal_event {
                Event::Mouse(mouse_event) => match mouse_event.kind {
                    MouseEventKind::ScrollDown => app_state.next(),
                    MouseEventKind::ScrollUp => app_state.previous(),
                    _ => {}
                },

                Event::Key(key) => match app_state.mode {
                    InputMode::Searching => match key.code {
                        KeyCode::Enter | KeyCode::Esc => {
                            if key.code == KeyCode::Esc {
                                app_state.reset_input();
                            }
                            app_state.mode = InputMode::Normal;
                            app_state.recalculate_view();
                        }
                        KeyCode::Char(c) => {
                            app_state.enter_char(c);
                            app_state.recalculate_view();
                        }
                        KeyCode::Backspace => {
                            app_state.delete_char();
                            app_state.recalculate_view();
                        }
                        KeyCode::Left => app_state.move_cursor_left(),
                        KeyCode::Right => app_state.move_cursor_right(),
                        _ => {}
                    },

                    InputMode::PriorityFilter => match key.code {
                        KeyCode::Enter => {
                            let value = app_state.input_buffer.clone();
                            app_state.filter.set_priority(&value);
                            app_state.reset_input();
                            app_state.mode = InputMode::Normal;
                            app_state.message = format!("Filter: {}", app_state.filter.label());
                            let req = app_state.reset_to_first_page();
                            send_fetch(&action_tx, req, &app_state.filter).await;
                        }
                        KeyCode::Esc => {
                            app_state.reset_input();
                            app_state.mode = InputMode::Normal;
                        }
                        KeyCode::Char(c) => app_state.enter_char(c),
                        KeyCode::Backspace => app_state.delete_char(),
                        KeyCode::Left => app_state.move_cursor_left(),
                        KeyCode::Right => app_state.move_cursor_right(),
                        _ => {}
                    },

                    InputMode::Normal => match key.code {
                        KeyCode::Char('q') => {
                            let _ = action_tx.send(Action::Quit).await;
                            break;
                        }

                        // Pagination
                        KeyCode::Char('n') | KeyCode::Right | KeyCode::Char('l') => {
                            let req = app_state.next_page();
                            send_fetch(&action_tx, req, &app_state.filter).await;
                        }
                        KeyCode::Char('p') | KeyCode::Left | KeyCode::Char('h') => {
                            if let Some(req) = app_state.prev_page() {
                                send_fetch(&action_tx, req, &app_state.filter).await;
                            }
                        }
                        KeyCode::Char('r') => {
                            let req = app_state.refresh();
                            send_fetch(&action_tx, req, &app_state.filter).await;
                        }

                        // Selection
                        KeyCode::Down | KeyCode::Char('j') => app_state.next(),
                        KeyCode::Up | KeyCode::Char('k') => app_state.previous(),
                        KeyCode::PageDown => app_state.jump_forward(10),
                        KeyCode::PageUp => app_state.jump_backward(10),

                        // Search / filters
                        KeyCode::Char('/') => {
                            app_state.mode = InputMode::Searching;
                            app_state.reset_input();
                        }
                        KeyCode::Char('c') => {
                            app_state.filter.cycle_completed();
                            app_state.message = format!("Filter: {}", app_state.filter.label());
                            let req = app_state.reset_to_first_page();
                            send_fetch(&action_tx, req, &app_state.filter).await;
                        }
                        KeyCode::Char('f') => {
                            app_state.mode = InputMode::PriorityFilter;
                            app_state.reset_input();
                            app_state.message =
                                "Enter a priority value (empty clears the filter)".to_string();
                        }
                        _ => {}
                    },
                },
                _ => {}
            }
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
