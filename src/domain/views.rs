use super::due_format::{format_due, local_date};
use super::emoji::classify;
use super::enums::ViewMode;
use super::task::{Person, Task};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// One board row: a person and their tasks, soonest first
#[derive(Debug, Clone, PartialEq)]
pub struct Lane {
    pub person: Person,
    pub tasks: Vec<Task>,
}

/// Filtered working set bucketed by person, in roster order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Board {
    pub lanes: Vec<Lane>,
}

impl Board {
    pub fn tasks_for(&self, person: &Person) -> &[Task] {
        self.lanes
            .iter()
            .find(|lane| &lane.person == person)
            .map(|lane| lane.tasks.as_slice())
            .unwrap_or(&[])
    }

    pub fn task_count(&self) -> usize {
        self.lanes.iter().map(|lane| lane.tasks.len()).sum()
    }
}

/// Whether a task belongs on the board under `mode`
pub fn is_visible(task: &Task, mode: ViewMode, now: DateTime<Utc>, tz: &Tz) -> bool {
    match mode {
        ViewMode::All => true,
        ViewMode::TodayOverdue => match task.resolved_due(tz) {
            Some(due) => due < now || local_date(due, tz) == local_date(now, tz),
            None => false,
        },
    }
}

/// Filter, bucket and sort the working set.
///
/// Every roster member gets a lane even when empty. Tasks assigned to no
/// roster member are dropped. Within a lane tasks are ordered by resolved
/// due time with undated tasks last; the sort is stable so undated tasks keep
/// the order the service returned them in.
pub fn select(
    tasks: &[Task],
    mode: ViewMode,
    now: DateTime<Utc>,
    roster: &[Person],
    tz: &Tz,
) -> Board {
    let mut lanes: Vec<Lane> = roster
        .iter()
        .map(|person| Lane {
            person: person.clone(),
            tasks: Vec::new(),
        })
        .collect();

    for task in tasks.iter().filter(|task| is_visible(task, mode, now, tz)) {
        if let Some(idx) = task.assignee_index(roster) {
            lanes[idx].tasks.push(task.clone());
        }
    }

    for lane in &mut lanes {
        lane.tasks.sort_by_key(|task| {
            let due = task.resolved_due(tz);
            (due.is_none(), due)
        });
    }

    Board { lanes }
}

/// Everything the renderer needs to draw one card
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub task_id: String,
    pub emoji: &'static str,
    pub title: String,
    pub due_label: String,
    pub overdue: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaneView {
    pub person: Person,
    pub cards: Vec<CardView>,
}

/// Presentation model of the board, shared by the TUI and the `list` command
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoardView {
    pub lanes: Vec<LaneView>,
}

impl BoardView {
    pub fn build(board: &Board, now: DateTime<Utc>, tz: &Tz) -> Self {
        let lanes = board
            .lanes
            .iter()
            .map(|lane| LaneView {
                person: lane.person.clone(),
                cards: lane.tasks.iter().map(|task| card_view(task, now, tz)).collect(),
            })
            .collect();

        Self { lanes }
    }

    pub fn card(&self, lane: usize, card: usize) -> Option<&CardView> {
        self.lanes.get(lane)?.cards.get(card)
    }

    pub fn lane_len(&self, lane: usize) -> usize {
        self.lanes.get(lane).map(|l| l.cards.len()).unwrap_or(0)
    }

    /// Plain-text rendering for non-interactive output
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for lane in &self.lanes {
            out.push_str(lane.person.name());
            out.push('\n');
            if lane.cards.is_empty() {
                out.push_str(&format!("  {}\n", NO_TASKS_PLACEHOLDER));
            }
            for card in &lane.cards {
                let marker = if card.overdue { "!" } else { " " };
                out.push_str(&format!(
                    " {}{} {}  ({})\n",
                    marker, card.emoji, card.title, card.due_label
                ));
            }
        }
        out
    }
}

/// Shown in a lane with nothing to do
pub const NO_TASKS_PLACEHOLDER: &str = "— No tasks —";

/// Shown in place of a due label on undated tasks
pub const NO_DUE_LABEL: &str = "No due date";

fn card_view(task: &Task, now: DateTime<Utc>, tz: &Tz) -> CardView {
    let due_label = match task.resolved_due(tz) {
        Some(due) => format_due(due, now, tz),
        None => NO_DUE_LABEL.to_string(),
    };

    CardView {
        task_id: task.id.clone(),
        emoji: classify(&task.content),
        title: task.content.clone(),
        due_label,
        overdue: task.is_overdue(now, tz),
    }
}
