//! Task mutations: what each user action does remotely, and the selection
//! state machine that guards them.
//!
//! A selected task moves `Menu -> InFlight(kind) -> (cleared)`; delete goes
//! through `ConfirmDelete` first. Remote effects are described by a
//! [`Mutation`] and executed off the UI thread by the remote worker.

use crate::domain::{audit, Due, Person, Task};
use crate::remote::{ensure_label, NewTask, RemoteError, RemoteResult, TodoService};
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use thiserror::Error;
use tracing::{info, warn};

/// The kinds of action a user can take on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Complete,
    MarkMissed,
    Snooze,
    Delete,
    Create,
}

impl MutationKind {
    /// Progress text while the action is in flight
    pub fn progress(&self) -> &'static str {
        match self {
            Self::Complete => "Completing…",
            Self::MarkMissed => "Marking missed…",
            Self::Snooze => "Snoozing…",
            Self::Delete => "Deleting…",
            Self::Create => "Creating…",
        }
    }

    /// Action name for failure messages
    pub fn label(&self) -> &'static str {
        match self {
            Self::Complete => "Complete",
            Self::MarkMissed => "Mark missed",
            Self::Snooze => "Snooze",
            Self::Delete => "Delete",
            Self::Create => "Create",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            Self::Complete => "Completed",
            Self::MarkMissed => "Marked missed",
            Self::Snooze => "Snoozed",
            Self::Delete => "Deleted",
            Self::Create => "Created",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    /// Action menu open, waiting for a choice
    Menu,
    /// Delete chosen, waiting for the user to confirm
    ConfirmDelete,
    /// An action was dispatched and has not finished
    InFlight(MutationKind),
}

/// The task whose action menu is open
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub task: Task,
    pub phase: SelectionPhase,
}

impl Selection {
    pub fn new(task: Task) -> Self {
        Self {
            task,
            phase: SelectionPhase::Menu,
        }
    }

    /// Move into flight for `kind`. Returns false when the phase does not
    /// allow it: only one action per selection, and delete only once confirmed.
    pub fn begin(&mut self, kind: MutationKind) -> bool {
        let allowed = match (self.phase, kind) {
            (SelectionPhase::Menu, MutationKind::Delete) => false,
            (SelectionPhase::Menu, _) => true,
            (SelectionPhase::ConfirmDelete, MutationKind::Delete) => true,
            _ => false,
        };
        if allowed {
            self.phase = SelectionPhase::InFlight(kind);
        }
        allowed
    }

    pub fn request_delete(&mut self) -> bool {
        if self.phase == SelectionPhase::Menu {
            self.phase = SelectionPhase::ConfirmDelete;
            true
        } else {
            false
        }
    }

    pub fn cancel_delete(&mut self) {
        if self.phase == SelectionPhase::ConfirmDelete {
            self.phase = SelectionPhase::Menu;
        }
    }

    pub fn in_flight(&self) -> Option<MutationKind> {
        match self.phase {
            SelectionPhase::InFlight(kind) => Some(kind),
            _ => None,
        }
    }
}

/// Input rejected before any remote call is made
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a task name.")]
    EmptyName,
    #[error("Snooze must be at least one hour.")]
    ZeroSnooze,
    #[error("Snooze of {0}h is out of range.")]
    SnoozeOutOfRange(u32),
}

/// A validated create-task form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskRequest {
    pub name: String,
    pub assignee: Person,
    pub schedule: Option<String>,
}

impl NewTaskRequest {
    pub fn new(name: &str, assignee: Person, schedule: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let schedule = schedule.trim();
        Ok(Self {
            name: name.to_string(),
            assignee,
            schedule: (!schedule.is_empty()).then(|| schedule.to_string()),
        })
    }
}

/// Remote effect of one user action
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Complete { task_id: String },
    MarkMissed { task_id: String },
    Snooze { task_id: String, hours: u32, new_due: DateTime<Utc> },
    Delete { task_id: String },
    Create(NewTaskRequest),
}

/// New due time for a snooze: the task's current due (or `now` when it has
/// none) pushed back by `hours`
pub fn snoozed_due(task: &Task, hours: u32, now: DateTime<Utc>, tz: &Tz) -> Result<DateTime<Utc>, ValidationError> {
    if hours == 0 {
        return Err(ValidationError::ZeroSnooze);
    }
    let base = task.resolved_due(tz).unwrap_or(now);
    base.checked_add_signed(Duration::hours(i64::from(hours)))
        .ok_or(ValidationError::SnoozeOutOfRange(hours))
}

/// Patch a task in place after a snooze so a second snooze stacks on the
/// value just written rather than the one last fetched
pub fn apply_snooze_locally(task: &mut Task, new_due: DateTime<Utc>, tz: &Tz) {
    task.due = Some(Due::at(new_due, tz));
}

impl Mutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            Self::Complete { .. } => MutationKind::Complete,
            Self::MarkMissed { .. } => MutationKind::MarkMissed,
            Self::Snooze { .. } => MutationKind::Snooze,
            Self::Delete { .. } => MutationKind::Delete,
            Self::Create(_) => MutationKind::Create,
        }
    }

    /// Perform the remote effect. The primary call's failure is returned;
    /// audit comments are best-effort.
    pub fn apply(
        &self,
        service: &dyn TodoService,
        project_id: Option<&str>,
        tz: &Tz,
        now: DateTime<Utc>,
    ) -> RemoteResult<()> {
        match self {
            Self::Complete { task_id } => {
                service.close_task(task_id)?;
                append_audit(service, task_id, &audit::completed(now, tz));
            }
            Self::MarkMissed { task_id } => {
                service.close_task(task_id)?;
                append_audit(service, task_id, &audit::missed(now, tz));
            }
            Self::Snooze { task_id, hours, new_due } => {
                service.update_due(task_id, *new_due)?;
                append_audit(service, task_id, &audit::snoozed(*hours, *new_due, tz));
            }
            Self::Delete { task_id } => {
                service.delete_task(task_id)?;
                // Usually fails: the task is already gone
                append_audit(service, task_id, &audit::deleted(now, tz));
            }
            Self::Create(request) => {
                let Some(project_id) = project_id else {
                    info!("no board project resolved, skipping task creation");
                    return Err(RemoteError::NoProject);
                };
                let label = ensure_label(service, request.assignee.name())?;
                let created = service.create_task(&NewTask {
                    content: request.name.clone(),
                    project_id: project_id.to_string(),
                    labels: vec![label],
                    due_string: request.schedule.clone(),
                })?;
                info!(task_id = %created.id, content = %created.content, "created task");
            }
        }
        Ok(())
    }
}

fn append_audit(service: &dyn TodoService, task_id: &str, content: &str) {
    if let Err(err) = service.add_comment(task_id, content) {
        warn!(task_id, error = %err, "could not append audit comment");
    }
}
