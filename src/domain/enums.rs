use serde::{Deserialize, Serialize};

/// Which tasks the board shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Tasks due today or already overdue
    #[default]
    TodayOverdue,
    /// Every open task, dated or not
    All,
}

impl ViewMode {
    pub fn toggle(self) -> Self {
        match self {
            Self::TodayOverdue => Self::All,
            Self::All => Self::TodayOverdue,
        }
    }

    /// Label for the header bar
    pub fn label(&self) -> &'static str {
        match self {
            Self::TodayOverdue => "Today/Overdue",
            Self::All => "All Tasks",
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    TaskMenu, // Action menu for the selected card
    CreatingTask,
    EditingToken,
}

/// Fields of the create-task form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Assignee,
    Schedule,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Assignee,
            Self::Assignee => Self::Schedule,
            Self::Schedule => Self::Name,
        }
    }
}
