use crate::app::AppState;
use crate::coordinator::SelectionPhase;
use crate::domain::views::NO_DUE_LABEL;
use crate::domain::{classify, format_due};
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, loading_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the action menu for the selected card
pub fn render_task_menu(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(selection) = &app.selection else {
        return;
    };
    let task = &selection.task;

    let modal_area = create_modal_area(area);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let due = task
        .resolved_due(&app.tz)
        .map(|due| format_due(due, app.now, &app.tz))
        .unwrap_or_else(|| NO_DUE_LABEL.to_string());

    let mut lines = vec![
        Line::raw(""),
        Line::raw(format!("  {} {}", classify(&task.content), task.content)),
        Line::raw(format!("  Due: {}", due)),
        Line::raw(""),
    ];

    match selection.phase {
        SelectionPhase::Menu => {
            lines.push(Line::from(vec![
                Span::styled("  [c]", modal_title_style()),
                Span::raw(" Complete  "),
                Span::styled("[m]", modal_title_style()),
                Span::raw(" Missed  "),
                Span::styled("[d]", modal_title_style()),
                Span::raw(" Delete"),
            ]));

            let mut snooze = vec![Span::raw("  Snooze: ")];
            for (index, hours) in app.settings.snooze_hours.iter().enumerate().take(9) {
                snooze.push(Span::styled(format!("[{}]", index + 1), modal_title_style()));
                snooze.push(Span::raw(format!(" +{}h  ", hours)));
            }
            lines.push(Line::from(snooze));
            lines.push(Line::raw(""));
            lines.push(Line::from(vec![
                Span::styled("  [Esc]", modal_title_style()),
                Span::raw(" Close"),
            ]));
        }
        SelectionPhase::ConfirmDelete => {
            lines.push(Line::styled("  Delete this task? This cannot be undone.", error_style()));
            lines.push(Line::raw(""));
            lines.push(Line::from(vec![
                Span::styled("  [y]", modal_title_style()),
                Span::raw(" Delete  "),
                Span::styled("[n]", modal_title_style()),
                Span::raw(" Keep"),
            ]));
        }
        SelectionPhase::InFlight(kind) => {
            lines.push(Line::styled(format!("  {}", kind.progress()), loading_style()));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Task ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
