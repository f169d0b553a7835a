use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::dispatch::{self, Trigger};
use crate::session;

use super::App;
use super::forms::{self, Focus};

const FRAME_INTERVAL: Duration = Duration::from_millis(50);

pub(super) async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.poll_monitor();
        app.drain_completions();

        terminal
            .draw(|f| super::render::draw(f, app))
            .context("draw")?;
        if app.quit {
            return Ok(());
        }

        // Never block the runtime: background commands and the monitor share
        // this thread.
        while event::poll(Duration::ZERO).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => handle_key(app, k),
                _ => {}
            }
        }
        tokio::time::sleep(FRAME_INTERVAL).await;
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if session::lock(&app.session).pending_notice().is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            session::lock(&app.session).dismiss_notice();
        }
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
            app.quit = true;
        }
        KeyCode::Char(_) | KeyCode::Enter
            if ctrl || key.modifiers.contains(KeyModifiers::ALT) =>
        {
            if let Some(trigger) = shortcut_for(&key) {
                app.fire(trigger);
            }
        }

        KeyCode::Esc => {
            if app.focus == Focus::CommandLine && !app.command.buf.is_empty() {
                app.command.clear();
            } else {
                app.quit = true;
            }
        }

        KeyCode::Tab => app.set_focus(app.focus.next()),
        KeyCode::BackTab => app.set_focus(app.focus.prev()),

        KeyCode::Enter => submit(app, key.modifiers.contains(KeyModifiers::SHIFT)),

        KeyCode::Up => match app.focus {
            Focus::CommandLine => app.command.history_up(),
            Focus::MemoryMap => app.memory_selected = app.memory_selected.saturating_sub(1),
            _ => app.set_focus(app.focus.prev()),
        },
        KeyCode::Down => match app.focus {
            Focus::CommandLine => app.command.history_down(),
            Focus::MemoryMap => {
                let n = session::lock(&app.session).views().memory.rows().len();
                app.memory_selected = (app.memory_selected + 1).min(n.saturating_sub(1));
            }
            _ => app.set_focus(app.focus.next()),
        },

        KeyCode::Left | KeyCode::Right => {
            let forward = key.code == KeyCode::Right;
            match app.focus {
                Focus::MemoryMap if forward => {
                    let n = session::lock(&app.session).views().memory.rows().len();
                    app.memory_selected = (app.memory_selected + 1).min(n.saturating_sub(1));
                }
                Focus::MemoryMap => app.memory_selected = app.memory_selected.saturating_sub(1),
                Focus::CommandLine if forward => app.command.move_right(),
                Focus::CommandLine => app.command.move_left(),
                focus => {
                    if let (Some(choices), Some(field)) = (focus.choices(), forms::field(focus)) {
                        let value = forms::value_mut(&mut app.form, field);
                        *value = forms::cycle_choice(value, choices, forward);
                        app.reload_field();
                    } else if forward {
                        app.field_input.move_right();
                    } else {
                        app.field_input.move_left();
                    }
                }
            }
        }

        KeyCode::Backspace => edit(app, |input| input.backspace()),
        KeyCode::Delete => edit(app, |input| input.delete()),
        KeyCode::Char(c) => edit(app, |input| input.insert_char(c)),

        _ => {}
    }
}

/// Ctrl/Alt chords bound in the shortcut table. With keyboard enhancement
/// enabled, Ctrl-M arrives as Ctrl+Enter rather than as `m`.
fn shortcut_for(key: &KeyEvent) -> Option<Trigger> {
    if !key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => dispatch::shortcut(c),
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::CONTROL) => {
            dispatch::shortcut('m')
        }
        _ => None,
    }
}

/// Apply an edit to whichever editor the focus owns.
fn edit(app: &mut App, f: impl FnOnce(&mut super::Input)) {
    match app.focus {
        Focus::CommandLine => f(&mut app.command),
        focus if focus.is_text_field() => {
            f(&mut app.field_input);
            app.commit_field();
        }
        _ => {}
    }
}

fn submit(app: &mut App, shift: bool) {
    match app.focus {
        Focus::CommandLine => {
            let line = app.command.buf.trim().to_string();
            if line.is_empty() {
                return;
            }
            app.command.push_history(&line);
            app.command.clear();
            app.commit_field();
            match dispatch::parse_command(&line, &mut app.form) {
                Ok(trigger) => {
                    app.reload_field();
                    app.fire(trigger);
                }
                Err(msg) => app.last_result = Some(msg),
            }
        }
        Focus::MemoryMap => {
            let selected = {
                let s = session::lock(&app.session);
                s.views()
                    .memory
                    .rows()
                    .get(app.memory_selected)
                    .and_then(|cell| cell.on_select)
            };
            if let Some(trigger @ Trigger::Deallocate(_)) = selected {
                app.fire(trigger);
            }
        }
        focus => {
            if let Some(trigger) = focus.submit(shift) {
                app.fire(trigger);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/tui_shell/app/event_loop_tests.rs"]
mod tests;
