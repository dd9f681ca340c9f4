//! Background thread that owns the task service.
//!
//! The UI thread sends [`Command`]s and drains [`Outcome`]s each tick, so it
//! never waits on the network. Commands run one at a time in arrival order.
//! Every command other than `Shutdown` ends with exactly one refresh outcome
//! (`Refreshed`, `RefreshFailed` or `RefreshSkipped`).

use super::{resolve_project, TodoService};
use crate::coordinator::{Mutation, MutationKind};
use crate::domain::Task;
use chrono::Utc;
use chrono_tz::Tz;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Resolve the board project, then refresh
    Connect,
    Refresh,
    /// Run a mutation, then refresh whatever its result
    Mutate(Mutation),
    Shutdown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Connected { project_id: Option<String> },
    /// The complete working set, replacing the previous one
    Refreshed(Vec<Task>),
    RefreshFailed(String),
    /// No project to fetch from
    RefreshSkipped,
    MutationFinished {
        kind: MutationKind,
        error: Option<String>,
    },
}

impl Outcome {
    /// Whether this outcome ends a command
    pub fn ends_refresh(&self) -> bool {
        matches!(
            self,
            Self::Refreshed(_) | Self::RefreshFailed(_) | Self::RefreshSkipped
        )
    }
}

/// Executes commands against a service. Runs on the worker thread, or
/// directly for one-shot use.
pub struct Worker<S> {
    service: S,
    project_name: String,
    project_id: Option<String>,
    /// A project lookup has completed (found or not)
    resolved: bool,
    tz: Tz,
}

impl<S: TodoService> Worker<S> {
    pub fn new(service: S, project_name: &str, tz: Tz) -> Self {
        Self {
            service,
            project_name: project_name.to_string(),
            project_id: None,
            resolved: false,
            tz,
        }
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    pub fn handle(&mut self, command: Command) -> Vec<Outcome> {
        let mut outcomes = Vec::new();
        match command {
            Command::Connect => {
                self.resolved = false;
                match self.connect() {
                    Ok(outcome) => outcomes.push(outcome),
                    Err(message) => {
                        outcomes.push(Outcome::RefreshFailed(message));
                        return outcomes;
                    }
                }
            }
            Command::Refresh => {}
            Command::Mutate(mutation) => {
                let kind = mutation.kind();
                let result = mutation.apply(&self.service, self.project_id(), &self.tz, Utc::now());
                let error = match result {
                    Ok(()) => {
                        info!(?kind, "mutation finished");
                        None
                    }
                    Err(err) => {
                        warn!(?kind, error = %err, "mutation failed");
                        Some(err.to_string())
                    }
                };
                outcomes.push(Outcome::MutationFinished { kind, error });
            }
            Command::Shutdown => return outcomes,
        }

        outcomes.push(self.refresh());
        outcomes
    }

    fn connect(&mut self) -> Result<Outcome, String> {
        match resolve_project(&self.service, &self.project_name) {
            Ok(project_id) => {
                self.project_id = project_id.clone();
                self.resolved = true;
                Ok(Outcome::Connected { project_id })
            }
            Err(err) => {
                error!(error = %err, "could not list projects");
                Err(format!("Could not reach the task service: {}", err))
            }
        }
    }

    fn refresh(&mut self) -> Outcome {
        // A failed lookup is retried on the next refresh
        if !self.resolved {
            if let Err(message) = self.connect() {
                return Outcome::RefreshFailed(message);
            }
        }

        let Some(project_id) = self.project_id.clone() else {
            debug!("refresh skipped, no board project");
            return Outcome::RefreshSkipped;
        };

        match self.service.list_tasks(&project_id) {
            Ok(tasks) => {
                debug!(count = tasks.len(), "fetched tasks");
                Outcome::Refreshed(tasks)
            }
            Err(err) => {
                warn!(error = %err, "refresh failed");
                Outcome::RefreshFailed(format!("Refresh failed: {}", err))
            }
        }
    }
}

/// UI-side end of the worker channels
pub struct WorkerHandle {
    commands: Sender<Command>,
    outcomes: Receiver<Outcome>,
    thread: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    pub fn spawn<S: TodoService + Send + 'static>(worker: Worker<S>) -> Self {
        let (command_tx, command_rx) = mpsc::channel::<Command>();
        let (outcome_tx, outcome_rx) = mpsc::channel::<Outcome>();

        let thread = thread::spawn(move || run_worker(worker, command_rx, outcome_tx));

        Self {
            commands: command_tx,
            outcomes: outcome_rx,
            thread: Some(thread),
        }
    }

    /// A handle with no thread behind it, for driving the channels by hand
    pub fn detached(commands: Sender<Command>, outcomes: Receiver<Outcome>) -> Self {
        Self {
            commands,
            outcomes,
            thread: None,
        }
    }

    /// Queue a command. Returns false once the worker has gone away.
    pub fn send(&self, command: Command) -> bool {
        self.commands.send(command).is_ok()
    }

    /// Everything the worker has produced since the last drain
    pub fn drain(&self) -> Vec<Outcome> {
        let mut outcomes = Vec::new();
        loop {
            match self.outcomes.try_recv() {
                Ok(outcome) => outcomes.push(outcome),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.thread.is_some() {
                        error!("worker channel disconnected");
                    }
                    break;
                }
            }
        }
        outcomes
    }
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        let _ = self.commands.send(Command::Shutdown);
        // Don't join: a hung request must not hold up exit
        self.thread.take();
    }
}

fn run_worker<S: TodoService>(mut worker: Worker<S>, commands: Receiver<Command>, outcomes: Sender<Outcome>) {
    info!("remote worker started");
    while let Ok(command) = commands.recv() {
        if command == Command::Shutdown {
            break;
        }
        for outcome in worker.handle(command) {
            if outcomes.send(outcome).is_err() {
                return;
            }
        }
    }
    info!("remote worker stopped");
}
