use crate::app::AppState;
use crate::domain::FormField;
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn field_line<'a>(value: &'a str, editing: bool) -> Line<'a> {
    Line::from(vec![
        Span::raw("> "),
        Span::styled(value, modal_title_style()),
        if editing {
            Span::styled("█", modal_title_style()) // Cursor
        } else {
            Span::raw("")
        },
    ])
}

fn field_label(label: &str, editing: bool) -> Line<'static> {
    if editing {
        Line::raw(format!("{}: (editing)", label))
    } else {
        Line::raw(format!("{}:", label))
    }
}

/// Render the form for creating a task
pub fn render_create_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.create_form else {
        return;
    };

    let modal_area = create_modal_area(area);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let mut lines = Vec::new();

    lines.push(field_label("Name", form.field == FormField::Name));
    lines.push(field_line(&form.name, form.field == FormField::Name));
    lines.push(Line::raw(""));

    let assignee = app
        .form_assignee()
        .map(|person| person.name().to_string())
        .unwrap_or_default();
    lines.push(field_label("Assign to", form.field == FormField::Assignee));
    lines.push(Line::from(vec![
        Span::raw("< "),
        Span::styled(assignee, modal_title_style()),
        Span::raw(" >"),
    ]));
    lines.push(Line::raw(""));

    lines.push(field_label("Schedule (e.g. \"every day at 7pm\")", form.field == FormField::Schedule));
    lines.push(field_line(&form.schedule, form.field == FormField::Schedule));
    lines.push(Line::raw(""));

    if let Some(error) = &form.error {
        lines.push(Line::styled(error.clone(), error_style()));
    }
    lines.push(Line::raw("Tab to switch fields  ·  Enter to create  ·  Esc to cancel"));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" New Task ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

/// Render the API token form. The token is shown masked.
pub fn render_token_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(input) = &app.token_input else {
        return;
    };

    let modal_area = create_modal_area(area);
    f.render_widget(Clear, modal_area);

    let masked = "•".repeat(input.chars().count());
    let lines = vec![
        Line::raw(""),
        Line::raw("Todoist API token:"),
        field_line(&masked, true),
        Line::raw(""),
        Line::raw("Saved to settings.json. Enter to save  ·  Esc to cancel"),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" API Token ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
