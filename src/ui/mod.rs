pub mod board_pane;
pub mod header;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod styles;

use crate::app::AppState;
use crate::domain::UiMode;
use board_pane::render_board_pane;
use header::render_header;
use input_form::{render_create_form, render_token_form};
use keybindings::render_keybindings;
use layout::create_layout;
use modal::render_task_menu;
use ratatui::Frame;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_header(f, app, layout.header_area);
    render_board_pane(f, app, layout.board_area);
    render_keybindings(f, app.ui_mode, layout.keybindings_area);

    match app.ui_mode {
        UiMode::Normal => {}
        UiMode::TaskMenu => render_task_menu(f, app, size),
        UiMode::CreatingTask => render_create_form(f, app, size),
        UiMode::EditingToken => render_token_form(f, app, size),
    }
}
