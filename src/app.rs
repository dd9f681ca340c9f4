use crate::coordinator::{
    apply_snooze_locally, snoozed_due, Mutation, MutationKind, NewTaskRequest, Selection, SelectionPhase,
};
use crate::domain::{select, BoardView, FormField, Person, Task, UiMode, ViewMode};
use crate::persistence::Settings;
use crate::remote::{Command, Outcome, WorkerHandle};
use crate::ticker::PollTimer;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::time::Instant;
use tracing::{debug, info};

/// Shown when an action is attempted without a service connection
const NO_TOKEN_HINT: &str = "No API token set. Press t to add one.";

/// Grid position of the highlighted card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub lane: usize,
    pub card: usize,
}

/// Create-task form state
#[derive(Debug, Clone, PartialEq)]
pub struct CreateForm {
    pub name: String,
    pub assignee: usize, // Index into the roster
    pub schedule: String,
    pub field: FormField,
    pub error: Option<String>,
}

impl CreateForm {
    fn new() -> Self {
        Self {
            name: String::new(),
            assignee: 0,
            schedule: String::new(),
            field: FormField::Name,
            error: None,
        }
    }
}

/// One-line message in the header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Main application state
pub struct AppState {
    pub settings: Settings,
    pub tz: Tz,
    /// Working set as last fetched, plus local snooze patches
    pub tasks: Vec<Task>,
    pub view_mode: ViewMode,
    pub board: BoardView,
    pub cursor: Cursor,
    pub selection: Option<Selection>,
    pub ui_mode: UiMode,
    pub create_form: Option<CreateForm>,
    pub token_input: Option<String>,
    pub status: Option<StatusMessage>,
    /// Commands sent to the worker whose refresh hasn't come back yet
    pub loading: usize,
    pub now: DateTime<Utc>,
    poll_timer: PollTimer,
    remote: Option<WorkerHandle>,
    pending_token: Option<String>,
}

impl AppState {
    pub fn new(settings: Settings, tz: Tz, now: DateTime<Utc>, instant: Instant) -> Self {
        let poll_timer = PollTimer::new(settings.poll_interval(), instant);
        let view_mode = settings.default_view;

        Self {
            settings,
            tz,
            tasks: Vec::new(),
            view_mode,
            board: BoardView::default(),
            cursor: Cursor::default(),
            selection: None,
            ui_mode: UiMode::Normal,
            create_form: None,
            token_input: None,
            status: None,
            loading: 0,
            now,
            poll_timer,
            remote: None,
            pending_token: None,
        }
        .with_board()
    }

    fn with_board(mut self) -> Self {
        self.rebuild_board();
        self
    }

    /// Start talking to a worker: resolve the project and load the board
    pub fn attach_remote(&mut self, handle: WorkerHandle) {
        // Outcomes of a replaced worker are lost with it
        self.close_task_menu();
        self.remote = Some(handle);
        self.loading = 0;
        self.dispatch(Command::Connect);
    }

    /// Drop the worker; every fetch and mutation becomes a no-op
    pub fn detach_remote(&mut self) {
        self.close_task_menu();
        self.remote = None;
        self.loading = 0;
        self.tasks.clear();
        self.rebuild_board();
    }

    pub fn is_connected(&self) -> bool {
        self.remote.is_some()
    }

    fn dispatch(&mut self, command: Command) -> bool {
        let Some(remote) = &self.remote else {
            return false;
        };
        debug!(?command, "dispatching to worker");
        if remote.send(command) {
            self.loading += 1;
            true
        } else {
            self.set_status("Lost connection to the worker", true);
            false
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading > 0
    }

    pub fn set_status(&mut self, text: impl Into<String>, is_error: bool) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error,
        });
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Refresh now and restart the poll interval
    pub fn request_refresh(&mut self, instant: Instant) {
        self.poll_timer.reset(instant);
        self.dispatch(Command::Refresh);
    }

    /// Advance the clock, poll when due, and fold in worker results
    pub fn tick(&mut self, now: DateTime<Utc>, instant: Instant) {
        self.now = now;
        if self.poll_timer.fire(instant) && self.loading == 0 {
            self.dispatch(Command::Refresh);
        }
        self.process_outcomes();
        self.rebuild_board();
    }

    pub fn process_outcomes(&mut self) {
        let outcomes = match &self.remote {
            Some(remote) => remote.drain(),
            None => return,
        };
        for outcome in outcomes {
            self.apply_outcome(outcome);
        }
    }

    pub fn apply_outcome(&mut self, outcome: Outcome) {
        if outcome.ends_refresh() {
            self.loading = self.loading.saturating_sub(1);
        }

        match outcome {
            Outcome::Connected { project_id: Some(_) } => {}
            Outcome::Connected { project_id: None } => {
                let text = format!("Project \"{}\" not found", self.settings.project_name);
                self.set_status(text, true);
            }
            Outcome::Refreshed(tasks) => {
                // Whole-list replacement, never a merge
                self.tasks = tasks;
                self.rebuild_board();
            }
            Outcome::RefreshFailed(message) => self.set_status(message, true),
            Outcome::RefreshSkipped => {}
            Outcome::MutationFinished { kind, error } => self.finish_mutation(kind, error),
        }
    }

    fn finish_mutation(&mut self, kind: MutationKind, error: Option<String>) {
        let title = match &self.selection {
            Some(selection) if selection.in_flight() == Some(kind) => {
                let title = selection.task.content.clone();
                self.close_task_menu();
                Some(title)
            }
            _ => None,
        };

        match (error, title) {
            (Some(err), _) => self.set_status(format!("{} failed: {}", kind.label(), err), true),
            (None, Some(title)) => self.set_status(format!("{} \"{}\"", kind.past_tense(), title), false),
            (None, None) => self.set_status(kind.past_tense(), false),
        }
    }

    /// Recompute the visible board from the working set
    pub fn rebuild_board(&mut self) {
        let board = select(&self.tasks, self.view_mode, self.now, &self.settings.roster, &self.tz);
        self.board = BoardView::build(&board, self.now, &self.tz);
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        let lanes = self.board.lanes.len();
        self.cursor.lane = self.cursor.lane.min(lanes.saturating_sub(1));
        let cards = self.board.lane_len(self.cursor.lane);
        self.cursor.card = self.cursor.card.min(cards.saturating_sub(1));
    }

    pub fn toggle_view(&mut self) {
        self.view_mode = self.view_mode.toggle();
        info!(mode = self.view_mode.label(), "view mode changed");
        self.cursor.card = 0;
        self.rebuild_board();
    }

    pub fn move_up(&mut self) {
        self.cursor.lane = self.cursor.lane.saturating_sub(1);
        self.clamp_cursor();
    }

    pub fn move_down(&mut self) {
        self.cursor.lane += 1;
        self.clamp_cursor();
    }

    pub fn move_left(&mut self) {
        self.cursor.card = self.cursor.card.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor.card += 1;
        self.clamp_cursor();
    }

    /// The task under the cursor, if the cursor is on a card
    pub fn highlighted_task(&self) -> Option<&Task> {
        let card = self.board.card(self.cursor.lane, self.cursor.card)?;
        self.tasks.iter().find(|task| task.id == card.task_id)
    }

    /// Open the action menu for the highlighted card
    pub fn open_task_menu(&mut self) {
        if self.selection.is_some() {
            return;
        }
        if let Some(task) = self.highlighted_task().cloned() {
            self.selection = Some(Selection::new(task));
            self.ui_mode = UiMode::TaskMenu;
        }
    }

    pub fn close_task_menu(&mut self) {
        self.selection = None;
        if self.ui_mode == UiMode::TaskMenu {
            self.ui_mode = UiMode::Normal;
        }
    }

    /// Enter flight for `kind` on the selected task, returning its id.
    /// None when nothing is selected, the phase forbids it, or there is
    /// no connection (the menu then just closes).
    fn begin_selected(&mut self, kind: MutationKind) -> Option<String> {
        self.selection.as_ref()?;
        if self.remote.is_none() {
            self.close_task_menu();
            self.set_status(NO_TOKEN_HINT, false);
            return None;
        }

        let selection = self.selection.as_mut()?;
        if !selection.begin(kind) {
            return None;
        }
        Some(selection.task.id.clone())
    }

    pub fn complete_selected(&mut self) {
        if let Some(task_id) = self.begin_selected(MutationKind::Complete) {
            self.dispatch(Command::Mutate(Mutation::Complete { task_id }));
        }
    }

    pub fn mark_missed_selected(&mut self) {
        if let Some(task_id) = self.begin_selected(MutationKind::MarkMissed) {
            self.dispatch(Command::Mutate(Mutation::MarkMissed { task_id }));
        }
    }

    /// Snooze by the n-th configured option
    pub fn snooze_selected_option(&mut self, option: usize) {
        if let Some(hours) = self.settings.snooze_hours.get(option).copied() {
            self.snooze_selected(hours);
        }
    }

    pub fn snooze_selected(&mut self, hours: u32) {
        let Some(selection) = self.selection.as_ref() else {
            return;
        };
        if selection.phase != SelectionPhase::Menu {
            return;
        }

        let task_id = selection.task.id.clone();
        // The working-set copy carries earlier snooze patches
        let base = self
            .tasks
            .iter()
            .find(|task| task.id == task_id)
            .unwrap_or(&selection.task);
        let new_due = match snoozed_due(base, hours, self.now, &self.tz) {
            Ok(due) => due,
            Err(err) => {
                self.set_status(err.to_string(), true);
                return;
            }
        };

        if self.begin_selected(MutationKind::Snooze).is_none() {
            return;
        }

        for task in self.tasks.iter_mut().filter(|task| task.id == task_id) {
            apply_snooze_locally(task, new_due, &self.tz);
        }
        if let Some(selection) = self.selection.as_mut() {
            apply_snooze_locally(&mut selection.task, new_due, &self.tz);
        }
        self.rebuild_board();

        self.dispatch(Command::Mutate(Mutation::Snooze {
            task_id,
            hours,
            new_due,
        }));
    }

    pub fn request_delete(&mut self) {
        if let Some(selection) = self.selection.as_mut() {
            selection.request_delete();
        }
    }

    pub fn cancel_delete(&mut self) {
        if let Some(selection) = self.selection.as_mut() {
            selection.cancel_delete();
        }
    }

    /// Delete the selected task; only acts after `request_delete`
    pub fn confirm_delete(&mut self) {
        let confirmed = self
            .selection
            .as_ref()
            .is_some_and(|selection| selection.phase == SelectionPhase::ConfirmDelete);
        if !confirmed {
            return;
        }
        if let Some(task_id) = self.begin_selected(MutationKind::Delete) {
            self.dispatch(Command::Mutate(Mutation::Delete { task_id }));
        }
    }

    /// Start adding a new task (opens the create form)
    pub fn start_create_task(&mut self) {
        self.create_form = Some(CreateForm::new());
        self.ui_mode = UiMode::CreatingTask;
    }

    pub fn cancel_create_task(&mut self) {
        self.create_form = None;
        self.ui_mode = UiMode::Normal;
    }

    pub fn form_next_field(&mut self) {
        if let Some(form) = &mut self.create_form {
            form.field = form.field.next();
        }
    }

    /// Add character to the focused text field
    pub fn form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.create_form {
            match form.field {
                FormField::Name => form.name.push(c),
                FormField::Schedule => form.schedule.push(c),
                FormField::Assignee => {}
            }
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(form) = &mut self.create_form {
            match form.field {
                FormField::Name => {
                    form.name.pop();
                }
                FormField::Schedule => {
                    form.schedule.pop();
                }
                FormField::Assignee => {}
            }
        }
    }

    /// Step the assignee through the roster
    pub fn form_cycle_assignee(&mut self, forward: bool) {
        let count = self.settings.roster.len();
        if let Some(form) = &mut self.create_form {
            if count == 0 {
                return;
            }
            form.assignee = if forward {
                (form.assignee + 1) % count
            } else {
                (form.assignee + count - 1) % count
            };
        }
    }

    pub fn form_assignee(&self) -> Option<&Person> {
        let form = self.create_form.as_ref()?;
        self.settings.roster.get(form.assignee)
    }

    /// Validate and send the create form. An empty name keeps the form open
    /// with an error and sends nothing.
    pub fn submit_create_form(&mut self) {
        let Some(assignee) = self.form_assignee().cloned() else {
            return;
        };
        let Some(form) = self.create_form.as_mut() else {
            return;
        };

        let request = match NewTaskRequest::new(&form.name, assignee, &form.schedule) {
            Ok(request) => request,
            Err(err) => {
                form.error = Some(err.to_string());
                return;
            }
        };

        if self.remote.is_none() {
            self.set_status(NO_TOKEN_HINT, false);
        } else {
            info!(name = %request.name, assignee = %request.assignee, "creating task");
            self.dispatch(Command::Mutate(Mutation::Create(request)));
        }
        self.cancel_create_task();
    }

    /// Open the token form, prefilled with the stored token
    pub fn start_edit_token(&mut self) {
        self.token_input = Some(self.settings.api_token.clone());
        self.ui_mode = UiMode::EditingToken;
    }

    pub fn token_add_char(&mut self, c: char) {
        if let Some(input) = &mut self.token_input {
            input.push(c);
        }
    }

    pub fn token_backspace(&mut self) {
        if let Some(input) = &mut self.token_input {
            input.pop();
        }
    }

    pub fn cancel_edit_token(&mut self) {
        self.token_input = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Accept the token form; the main loop saves it and reconnects
    pub fn submit_token(&mut self) {
        if let Some(input) = self.token_input.take() {
            self.pending_token = Some(input.trim().to_string());
        }
        self.ui_mode = UiMode::Normal;
    }

    pub fn take_pending_token(&mut self) -> Option<String> {
        self.pending_token.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Due;
    use chrono::{Duration, TimeZone};
    use chrono_tz::America::New_York;
    use pretty_assertions::assert_eq;
    use std::sync::mpsc::{self, Receiver, Sender};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 20, 13, 0, 0).unwrap()
    }

    fn due_in(hours: i64) -> Option<Due> {
        Some(Due::at(now() + Duration::hours(hours), &New_York))
    }

    struct Harness {
        app: AppState,
        commands: Receiver<Command>,
        outcomes: Sender<Outcome>,
    }

    impl Harness {
        /// App connected to channels with no thread, loaded with `tasks`
        fn new(tasks: Vec<Task>) -> Self {
            let (command_tx, command_rx) = mpsc::channel();
            let (outcome_tx, outcome_rx) = mpsc::channel();
            let mut app = AppState::new(Settings::default(), New_York, now(), Instant::now());
            app.attach_remote(WorkerHandle::detached(command_tx, outcome_rx));

            assert_eq!(command_rx.try_recv().unwrap(), Command::Connect);
            app.apply_outcome(Outcome::Connected { project_id: Some("p1".to_string()) });
            app.apply_outcome(Outcome::Refreshed(tasks));

            Self {
                app,
                commands: command_rx,
                outcomes: outcome_tx,
            }
        }

        fn sent(&self) -> Vec<Command> {
            self.commands.try_iter().collect()
        }

        /// Reply as the worker would after a mutation
        fn finish(&mut self, kind: MutationKind, error: Option<&str>) {
            self.outcomes
                .send(Outcome::MutationFinished {
                    kind,
                    error: error.map(str::to_string),
                })
                .unwrap();
            self.app.process_outcomes();
        }
    }

    fn joy_task(id: &str, due: Option<Due>) -> Task {
        Task::sample(id, "Dishes", "Joy", due)
    }

    /// Cursor onto Joy's first card
    fn select_joy(app: &mut AppState) {
        app.cursor = Cursor { lane: 1, card: 0 };
        app.open_task_menu();
    }

    #[test]
    fn test_refresh_replaces_working_set() {
        let mut h = Harness::new(vec![joy_task("a", due_in(-1)), joy_task("b", due_in(1))]);
        assert_eq!(h.app.board.lane_len(1), 2);
        assert!(!h.app.is_loading());

        h.app.apply_outcome(Outcome::Refreshed(vec![joy_task("c", due_in(2))]));
        let ids: Vec<&str> = h.app.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["c"]);
        assert_eq!(h.app.board.card(1, 0).unwrap().task_id, "c");
    }

    #[test]
    fn test_snooze_twice_stacks() {
        let mut h = Harness::new(vec![joy_task("t1", due_in(-1))]);
        let first_due = now() - Duration::hours(1);

        select_joy(&mut h.app);
        h.app.snooze_selected(2);
        h.finish(MutationKind::Snooze, None);
        assert!(h.app.selection.is_none());

        select_joy(&mut h.app);
        h.app.snooze_selected(3);

        let due = h.app.tasks[0].resolved_due(&New_York).unwrap();
        assert_eq!(due, first_due + Duration::hours(5));

        let sent = h.sent();
        assert_eq!(
            sent,
            vec![
                Command::Mutate(Mutation::Snooze {
                    task_id: "t1".to_string(),
                    hours: 2,
                    new_due: first_due + Duration::hours(2),
                }),
                Command::Mutate(Mutation::Snooze {
                    task_id: "t1".to_string(),
                    hours: 3,
                    new_due: first_due + Duration::hours(5),
                }),
            ]
        );
    }

    #[test]
    fn test_snooze_undated_task_starts_from_now() {
        let mut h = Harness::new(vec![joy_task("t1", None)]);
        h.app.toggle_view();

        select_joy(&mut h.app);
        h.app.snooze_selected_option(0);

        assert_eq!(
            h.app.tasks[0].resolved_due(&New_York),
            Some(now() + Duration::hours(1))
        );
    }

    #[test]
    fn test_one_action_per_selection() {
        let mut h = Harness::new(vec![joy_task("t1", due_in(-1))]);
        select_joy(&mut h.app);

        h.app.complete_selected();
        h.app.mark_missed_selected();
        h.app.snooze_selected(1);

        assert_eq!(
            h.sent(),
            vec![Command::Mutate(Mutation::Complete { task_id: "t1".to_string() })]
        );
        assert_eq!(h.app.selection.as_ref().unwrap().in_flight(), Some(MutationKind::Complete));
    }

    #[test]
    fn test_actions_without_selection_are_no_ops() {
        let mut h = Harness::new(vec![joy_task("t1", due_in(-1))]);

        h.app.complete_selected();
        h.app.snooze_selected(1);
        h.app.confirm_delete();

        assert!(h.sent().is_empty());
    }

    #[test]
    fn test_mutation_finish_clears_selection_and_reports() {
        let mut h = Harness::new(vec![joy_task("t1", due_in(-1))]);
        select_joy(&mut h.app);
        h.app.mark_missed_selected();
        assert_eq!(h.app.ui_mode, UiMode::TaskMenu);

        h.finish(MutationKind::MarkMissed, Some("HTTP 500"));

        assert!(h.app.selection.is_none());
        assert_eq!(h.app.ui_mode, UiMode::Normal);
        let status = h.app.status.clone().unwrap();
        assert!(status.is_error);
        assert_eq!(status.text, "Mark missed failed: HTTP 500");
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut h = Harness::new(vec![joy_task("t1", due_in(-1))]);
        select_joy(&mut h.app);

        h.app.request_delete();
        h.app.cancel_delete();
        h.app.confirm_delete();
        assert!(h.sent().is_empty());

        h.app.request_delete();
        h.app.confirm_delete();
        assert_eq!(
            h.sent(),
            vec![Command::Mutate(Mutation::Delete { task_id: "t1".to_string() })]
        );
    }

    #[test]
    fn test_create_with_empty_name_sends_nothing() {
        let mut h = Harness::new(Vec::new());
        h.app.start_create_task();
        h.app.form_add_char(' ');
        h.app.submit_create_form();

        assert!(h.sent().is_empty());
        let form = h.app.create_form.as_ref().unwrap();
        assert_eq!(form.error.as_deref(), Some("Please enter a task name."));
        assert_eq!(h.app.ui_mode, UiMode::CreatingTask);
    }

    #[test]
    fn test_create_sends_request_and_resets_form() {
        let mut h = Harness::new(Vec::new());
        h.app.start_create_task();
        for c in "Feed Rumi".chars() {
            h.app.form_add_char(c);
        }
        h.app.form_next_field();
        h.app.form_cycle_assignee(false);
        h.app.form_next_field();
        for c in "every day".chars() {
            h.app.form_add_char(c);
        }
        h.app.submit_create_form();

        assert_eq!(
            h.sent(),
            vec![Command::Mutate(Mutation::Create(NewTaskRequest {
                name: "Feed Rumi".to_string(),
                assignee: Person::new("Rhea"),
                schedule: Some("every day".to_string()),
            }))]
        );
        assert!(h.app.create_form.is_none());
        assert_eq!(h.app.ui_mode, UiMode::Normal);

        h.app.start_create_task();
        assert_eq!(h.app.create_form.as_ref().unwrap().name, "");
    }

    #[test]
    fn test_loading_counts_outstanding_commands() {
        let mut h = Harness::new(Vec::new());
        h.app.request_refresh(Instant::now());
        assert!(h.app.is_loading());

        h.outcomes.send(Outcome::RefreshFailed("offline".to_string())).unwrap();
        h.app.process_outcomes();
        assert!(!h.app.is_loading());
        assert_eq!(h.app.status.as_ref().unwrap().text, "offline");
    }

    #[test]
    fn test_tick_polls_on_interval() {
        let start = Instant::now();
        let mut h = Harness::new(Vec::new());
        h.app.poll_timer = PollTimer::new(std::time::Duration::from_secs(60), start);

        h.app.tick(now(), start + std::time::Duration::from_secs(30));
        assert!(h.sent().is_empty());

        h.app.tick(now(), start + std::time::Duration::from_secs(60));
        assert_eq!(h.sent(), vec![Command::Refresh]);
    }

    #[test]
    fn test_failed_create_is_not_reported_as_success() {
        let mut h = Harness::new(Vec::new());
        h.finish(MutationKind::Create, Some("no board project found"));

        let status = h.app.status.clone().unwrap();
        assert!(status.is_error);
        assert_eq!(status.text, "Create failed: no board project found");
    }

    #[test]
    fn test_out_of_range_snooze_sends_nothing() {
        let mut h = Harness::new(vec![joy_task("t1", due_in(-1))]);
        h.app.settings.snooze_hours = vec![u32::MAX];

        select_joy(&mut h.app);
        h.app.snooze_selected_option(0);

        assert!(h.sent().is_empty());
        assert!(h.app.status.as_ref().unwrap().is_error);
        assert_eq!(h.app.tasks[0].resolved_due(&New_York), Some(now() - Duration::hours(1)));
        assert_eq!(h.app.selection.as_ref().unwrap().phase, SelectionPhase::Menu);
    }

    #[test]
    fn test_missing_project_is_reported() {
        let mut h = Harness::new(Vec::new());
        h.app.apply_outcome(Outcome::Connected { project_id: None });
        assert_eq!(h.app.status.as_ref().unwrap().text, "Project \"Chores\" not found");
    }

    #[test]
    fn test_without_remote_actions_are_no_ops() {
        let mut app = AppState::new(Settings::default(), New_York, now(), Instant::now());
        app.tasks = vec![joy_task("t1", due_in(-1))];
        app.rebuild_board();

        select_joy(&mut app);
        assert!(app.selection.is_some());
        app.snooze_selected(2);

        assert!(app.selection.is_none());
        assert_eq!(app.tasks[0].resolved_due(&New_York), Some(now() - Duration::hours(1)));
        assert!(!app.is_loading());
    }

    #[test]
    fn test_cursor_navigation_clamps() {
        let mut h = Harness::new(vec![
            joy_task("a", due_in(-2)),
            joy_task("b", due_in(-1)),
            Task::sample("c", "Piano", "Rohan", due_in(-1)),
        ]);

        h.app.move_down();
        h.app.move_right();
        h.app.move_right();
        assert_eq!(h.app.cursor, Cursor { lane: 1, card: 1 });

        h.app.move_down();
        assert_eq!(h.app.cursor, Cursor { lane: 2, card: 0 });

        h.app.move_down();
        h.app.move_down();
        assert_eq!(h.app.cursor.lane, 3);
        assert!(h.app.highlighted_task().is_none());

        h.app.move_up();
        assert_eq!(h.app.highlighted_task().unwrap().id, "c");
    }

    #[test]
    fn test_toggle_view_shows_undated() {
        let mut h = Harness::new(vec![joy_task("undated", None)]);
        assert_eq!(h.app.board.lane_len(1), 0);

        h.app.toggle_view();
        assert_eq!(h.app.view_mode, ViewMode::All);
        assert_eq!(h.app.board.lane_len(1), 1);
    }

    #[test]
    fn test_token_form() {
        let mut h = Harness::new(Vec::new());
        h.app.start_edit_token();
        for c in " new-token ".chars() {
            h.app.token_add_char(c);
        }
        h.app.submit_token();

        assert_eq!(h.app.take_pending_token().as_deref(), Some("new-token"));
        assert_eq!(h.app.take_pending_token(), None);
        assert_eq!(h.app.ui_mode, UiMode::Normal);
    }
}
