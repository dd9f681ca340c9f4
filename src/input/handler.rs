use crate::app::AppState;
use crate::coordinator::SelectionPhase;
use crate::domain::{FormField, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::Instant;

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::TaskMenu => handle_task_menu_mode(app, key),
        UiMode::CreatingTask => handle_create_form_mode(app, key),
        UiMode::EditingToken => handle_token_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up => app.move_up(),
        KeyCode::Down => app.move_down(),
        KeyCode::Left => app.move_left(),
        KeyCode::Right => app.move_right(),

        KeyCode::Enter => app.open_task_menu(),
        KeyCode::Char('a') => app.start_create_task(),
        KeyCode::Char('v') => app.toggle_view(),
        KeyCode::Char('r') => app.request_refresh(Instant::now()),
        KeyCode::Char('t') => app.start_edit_token(),
        KeyCode::Esc => app.clear_status(),

        KeyCode::Char('q') => return Ok(true),
        _ => {}
    }
    Ok(false)
}

/// Handle keys while a card's action menu is open
fn handle_task_menu_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    let Some(phase) = app.selection.as_ref().map(|selection| selection.phase) else {
        app.close_task_menu();
        return Ok(false);
    };

    match phase {
        SelectionPhase::Menu => match key.code {
            KeyCode::Char('c') => app.complete_selected(),
            KeyCode::Char('m') => app.mark_missed_selected(),
            KeyCode::Char('d') => app.request_delete(),
            KeyCode::Char(c @ '1'..='9') => {
                let option = c as usize - '1' as usize;
                app.snooze_selected_option(option);
            }
            KeyCode::Esc => app.close_task_menu(),
            _ => {}
        },
        SelectionPhase::ConfirmDelete => match key.code {
            KeyCode::Char('y') | KeyCode::Enter => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Esc => app.cancel_delete(),
            _ => {}
        },
        // Wait for the worker
        SelectionPhase::InFlight(_) => {}
    }
    Ok(false)
}

/// Handle keys in the create-task form
fn handle_create_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    let field = app.create_form.as_ref().map(|form| form.field);

    match key.code {
        KeyCode::Esc => app.cancel_create_task(),
        KeyCode::Enter => app.submit_create_form(),
        KeyCode::Tab => app.form_next_field(),
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Left if field == Some(FormField::Assignee) => app.form_cycle_assignee(false),
        KeyCode::Right if field == Some(FormField::Assignee) => app.form_cycle_assignee(true),
        KeyCode::Char(' ') if field == Some(FormField::Assignee) => app.form_cycle_assignee(true),
        KeyCode::Char(c) => app.form_add_char(c),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the API token form
fn handle_token_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => app.cancel_edit_token(),
        KeyCode::Enter => app.submit_token(),
        KeyCode::Backspace => app.token_backspace(),
        KeyCode::Char(c) => app.token_add_char(c),
        _ => {}
    }
    Ok(false)
}
