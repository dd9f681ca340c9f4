use crate::domain::UiMode;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

/// Hint text for the current input mode
pub fn hints_for(mode: UiMode) -> &'static str {
    match mode {
        UiMode::Normal => {
            " ←/→/↑/↓ move   Enter actions   a add   v view   r refresh   t token   q quit"
        }
        UiMode::TaskMenu => " c complete   m missed   1-3 snooze   d delete   Esc close",
        UiMode::CreatingTask => " Tab next field   ←/→ assignee   Enter create   Esc cancel",
        UiMode::EditingToken => " Enter save   Esc cancel",
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, mode: UiMode, area: Rect) {
    let paragraph = Paragraph::new(Line::raw(hints_for(mode))).style(hint_style());
    f.render_widget(paragraph, area);
}
