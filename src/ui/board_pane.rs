use crate::app::AppState;
use crate::domain::{CardView, LaneView, NO_TASKS_PLACEHOLDER};
use crate::ui::layout::{cards_per_lane, lane_areas, scroll_offset, CARD_WIDTH};
use crate::ui::styles::{
    border_style, default_style, due_style, overdue_style, placeholder_style, selected_style,
    title_style,
};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render one lane per roster member
pub fn render_board_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let areas = lane_areas(area, app.board.lanes.len());

    for (index, (lane, lane_area)) in app.board.lanes.iter().zip(areas).enumerate() {
        let cursor = (app.cursor.lane == index).then_some(app.cursor.card);
        render_lane(f, lane, cursor, lane_area);
    }
}

fn render_lane(f: &mut Frame, lane: &LaneView, cursor: Option<usize>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(format!(" {} ", lane.person), title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if lane.cards.is_empty() {
        let style = if cursor.is_some() { selected_style() } else { placeholder_style() };
        let placeholder = Paragraph::new(Line::styled(NO_TASKS_PLACEHOLDER, style)).alignment(Alignment::Center);
        f.render_widget(placeholder, inner);
        return;
    }

    let visible = cards_per_lane(inner.width);
    let offset = scroll_offset(cursor.unwrap_or(0), visible);

    for (slot, (index, card)) in lane.cards.iter().enumerate().skip(offset).take(visible).enumerate() {
        let x = inner.x + slot as u16 * CARD_WIDTH;
        let width = CARD_WIDTH.min(inner.right().saturating_sub(x));
        if width == 0 {
            break;
        }
        let card_area = Rect::new(x, inner.y, width, inner.height);
        render_card(f, card, cursor == Some(index), card_area);
    }
}

fn render_card(f: &mut Frame, card: &CardView, highlighted: bool, area: Rect) {
    let border = if highlighted {
        selected_style()
    } else if card.overdue {
        overdue_style()
    } else {
        border_style()
    };
    let due = if card.overdue { overdue_style() } else { due_style() };
    let text = if highlighted { selected_style() } else { default_style() };

    let lines = vec![
        Line::from(vec![
            Span::raw(format!("{} ", card.emoji)),
            Span::styled(card.title.clone(), text),
        ]),
        Line::styled(card.due_label.clone(), due),
    ];

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).border_style(border));
    f.render_widget(paragraph, area);
}
