use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    app::{App, Focus, Mode},
    clients::brand_client::BrandClient,
    console::{self, Action},
    events::spawner::{Event, EventSpawner},
    models::Attachment,
    ui::{self, terminal::Tui},
    utils::clipboard::copy_to_clipboard,
};

/// Drive the console: draw, wait for the next event, apply it. Returns when
/// the user quits or the event source stops.
pub async fn handle_events(
    mut event_spawner: EventSpawner,
    app_arc: Arc<Mutex<App>>,
    client: Arc<BrandClient>,
    terminal: &mut Tui,
) -> std::io::Result<()> {
    let mut tick = 0usize;
    loop {
        {
            let app = app_arc.lock().await;
            if app.should_quit {
                break;
            }
            terminal.draw(|f| ui::console::draw(f, &app, tick))?;
        }

        match event_spawner.next().await {
            Event::Input(key) => {
                let mut app = app_arc.lock().await;
                on_key(&mut app, key, &app_arc, &client).await;
            }
            Event::Tick => tick = tick.wrapping_add(1),
            Event::Stop => break,
        }
    }
    Ok(())
}

async fn on_key(app: &mut App, key: KeyEvent, app_arc: &Arc<Mutex<App>>, client: &Arc<BrandClient>) {
    // A blocking alert swallows the next key
    if app.alert.take().is_some() {
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => app.should_quit = true,
        KeyCode::Char('e') if ctrl => submit(app, Action::ExtractContext, app_arc, client),
        KeyCode::Char('u') if ctrl => submit(app, Action::UploadBrandAssets, app_arc, client),
        KeyCode::Char('x') if ctrl => app.remove_file(),
        KeyCode::Char('b') if ctrl => app.toggle_context_panel(),
        KeyCode::Char('y') if ctrl => on_copy(app),
        KeyCode::Left if ctrl => app.prev_mode(),
        KeyCode::Right if ctrl => app.next_mode(),
        KeyCode::F(n @ 1..=4) => app.set_mode(Mode::all()[usize::from(n) - 1]),
        KeyCode::Tab => app.next_focus(),
        KeyCode::BackTab => app.prev_focus(),
        KeyCode::PageUp => app.scroll_up(),
        KeyCode::PageDown => app.scroll_down(),
        KeyCode::Esc => app.dismiss_banner(),
        KeyCode::Enter => on_enter(app, app_arc, client).await,
        KeyCode::Left | KeyCode::Right => {
            if let Focus::Selector(field) = app.focus {
                app.cycle_selector(field, key.code == KeyCode::Right);
            }
        }
        KeyCode::Backspace => on_backspace(app),
        KeyCode::Char(c) if !ctrl => on_character(app, c),
        _ => {}
    }
}

async fn on_enter(app: &mut App, app_arc: &Arc<Mutex<App>>, client: &Arc<BrandClient>) {
    match app.focus {
        Focus::File => on_attach(app).await,
        Focus::Selector(field) => app.cycle_selector(field, true),
        Focus::Prompt | Focus::Context => submit(app, Action::for_mode(app.mode), app_arc, client),
    }
}

async fn on_attach(app: &mut App) {
    let raw = app.file_input.trim().to_string();
    if raw.is_empty() {
        app.remove_file();
        return;
    }
    let path = PathBuf::from(&raw);
    match Attachment::read(&path).await {
        Ok(file) => {
            tracing::info!(name = %file.name, size = file.bytes.len(), "file attached");
            app.attach(file);
            app.focus = Focus::Prompt;
        }
        Err(e) => {
            tracing::warn!(path = %raw, error = %e, "file read failed");
            app.alert = Some(format!("Could not read {}: {}", raw, e));
        }
    }
}

/// Capture the submission under the lock, then run it on its own task
fn submit(app: &mut App, action: Action, app_arc: &Arc<Mutex<App>>, client: &Arc<BrandClient>) {
    match app.begin(action) {
        Ok(submission) => {
            let app_arc = app_arc.clone();
            let client = client.clone();
            tokio::spawn(async move {
                let outcome = console::execute(&client, submission).await;
                app_arc.lock().await.finish(outcome);
            });
        }
        Err(reason) => app.add_banner(reason),
    }
}

fn on_copy(app: &mut App) {
    let Some(text) = app.result_text() else {
        app.add_banner("Nothing to copy yet.");
        return;
    };
    match copy_to_clipboard(&text) {
        Ok(()) => app.add_banner("Result copied to clipboard."),
        Err(e) => app.add_banner(format!("Clipboard unavailable: {}", e)),
    }
}

fn on_backspace(app: &mut App) {
    match app.focus {
        Focus::Prompt => {
            app.prompt.pop();
        }
        Focus::File => {
            app.file_input.pop();
            app.selected_file = None;
        }
        Focus::Context => app.context.pop_char(),
        Focus::Selector(_) => {}
    }
}

fn on_character(app: &mut App, c: char) {
    match app.focus {
        Focus::Prompt => app.prompt.push(c),
        Focus::File => {
            app.file_input.push(c);
            app.selected_file = None;
        }
        Focus::Context => app.context.push_char(c),
        Focus::Selector(_) => {}
    }
}
