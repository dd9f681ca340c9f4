use crate::app::AppState;
use crate::domain::clock_label;
use crate::ui::styles::{done_style, error_style, loading_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the top bar: title, clock, view mode, loading and status
pub fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let mut spans = vec![
        Span::styled(" 🧹 Chore Board ", title_style()),
        Span::raw(format!(" {} ", clock_label(app.now, &app.tz))),
        Span::raw(format!(" │ {} ", app.view_mode.label())),
    ];

    if !app.is_connected() {
        spans.push(Span::styled(" │ offline ", error_style()));
    } else if app.is_loading() {
        spans.push(Span::styled(" │ ⟳ Loading… ", loading_style()));
    }

    if let Some(status) = &app.status {
        let style = if status.is_error { error_style() } else { done_style() };
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(status.text.clone(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
