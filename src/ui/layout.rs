use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of one card column inside a lane
pub const CARD_WIDTH: u16 = 28;

/// Main layout structure
pub struct MainLayout {
    pub header_area: Rect,
    pub board_area: Rect,
    pub keybindings_area: Rect,
}

/// Create the main layout
/// - Top bar: title, clock, view and status (1 row)
/// - Main area: the board, one row per person
/// - Bottom bar: keybindings (1 row)
pub fn create_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Board
            Constraint::Length(1), // Keybindings bar
        ])
        .split(area);

    MainLayout {
        header_area: chunks[0],
        board_area: chunks[1],
        keybindings_area: chunks[2],
    }
}

/// Split the board into `count` equal lane rows
pub fn lane_areas(board_area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let count = count as u32;
    let constraints: Vec<Constraint> = (0..count).map(|_| Constraint::Ratio(1, count)).collect();

    Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(board_area)
        .to_vec()
}

/// How many cards fit side by side in a lane of this width
pub fn cards_per_lane(lane_width: u16) -> usize {
    usize::from((lane_width / CARD_WIDTH).max(1))
}

/// First card to draw so that `cursor` stays in view
pub fn scroll_offset(cursor: usize, visible: usize) -> usize {
    if visible == 0 || cursor < visible {
        0
    } else {
        cursor + 1 - visible
    }
}

/// Create centered modal area
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(14),
            Constraint::Percentage(25),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}
