mod app;
mod coordinator;
mod domain;
mod input;
mod logging;
mod persistence;
mod remote;
mod ticker;
mod ui;

use anyhow::{anyhow, bail, Result};
use app::AppState;
use chrono::Utc;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{select, BoardView, ViewMode};
use persistence::{
    ensure_board_dir, get_board_dir, init_local_board, load_settings, logs_dir, save_settings,
    settings_file, TOKEN_ENV,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use remote::{Command, Outcome, TodoistClient, Worker, WorkerHandle};
use std::io;
use std::path::Path;
use std::time::Instant;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "choreboard")]
#[command(about = "A terminal household chore board backed by a Todoist project", long_about = None)]
struct Cli {
    /// Log filter such as "debug" or "choreboard=trace" (overrides CHOREBOARD_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .choreboard directory in the current directory
    Init,
    /// Save the Todoist API token to settings.json
    Token {
        /// Personal API token from the Todoist integrations settings
        token: String,
    },
    /// Print the board once and exit
    List {
        /// Show every task, not just today's and overdue ones
        #[arg(short, long)]
        all: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let board_dir = init_local_board()?;
            println!("Initialized choreboard directory: {}", board_dir.display());
            println!();
            println!("Choreboard will now keep its settings and logs in this directory.");
            println!("Run 'choreboard token <TOKEN>' to connect it to Todoist.");
            Ok(())
        }
        Some(Commands::Token { token }) => {
            ensure_board_dir()?;
            let _guard = logging::init_logging(&logs_dir()?, cli.log_level.as_deref());

            let path = settings_file()?;
            let mut settings = load_settings(&path)?;
            settings.api_token = token.trim().to_string();
            save_settings(&path, &settings)?;
            info!(path = %path.display(), "api token saved");
            println!("Saved API token to {}", path.display());
            Ok(())
        }
        Some(Commands::List { all }) => {
            ensure_board_dir()?;
            let _guard = logging::init_logging(&logs_dir()?, cli.log_level.as_deref());
            list_board(all)
        }
        None => {
            ensure_board_dir()?;
            let _guard = logging::init_logging(&logs_dir()?, cli.log_level.as_deref());
            run_tui()
        }
    }
}

/// Fetch once on this thread and print the board as text
fn list_board(all: bool) -> Result<()> {
    let settings = load_settings(settings_file()?)?;
    let tz = settings.timezone()?;
    let token = settings
        .effective_token(std::env::var(TOKEN_ENV).ok())
        .ok_or_else(|| anyhow!("No API token. Run 'choreboard token <TOKEN>' or set {}", TOKEN_ENV))?;

    let client = TodoistClient::new(&settings.api_base_url, &token)?;
    let mut worker = Worker::new(client, &settings.project_name, tz);

    let mut tasks = Vec::new();
    for outcome in worker.handle(Command::Connect) {
        match outcome {
            Outcome::Connected { project_id: None } => {
                bail!("Project \"{}\" not found", settings.project_name)
            }
            Outcome::Refreshed(fetched) => tasks = fetched,
            Outcome::RefreshFailed(message) => bail!("{}", message),
            _ => {}
        }
    }

    let mode = if all { ViewMode::All } else { settings.default_view };
    let now = Utc::now();
    let board = select(&tasks, mode, now, &settings.roster, &tz);

    println!("{} · {} · {} tasks", settings.project_name, mode.label(), board.task_count());
    print!("{}", BoardView::build(&board, now, &tz).to_text());
    Ok(())
}

fn run_tui() -> Result<()> {
    let board_dir = get_board_dir()?;
    eprintln!("Using choreboard directory: {}", board_dir.display());

    let settings_path = settings_file()?;
    let settings = load_settings(&settings_path)?;
    let tz = settings.timezone()?;

    let mut app = AppState::new(settings, tz, Utc::now(), Instant::now());
    connect(&mut app, std::env::var(TOKEN_ENV).ok());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app, &settings_path);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        error!(error = %err, "board exited with an error");
        eprintln!("Error: {}", err);
    }

    Ok(())
}

/// Start a worker for the current token, or run offline without one
fn connect(app: &mut AppState, env_token: Option<String>) {
    let Some(token) = app.settings.effective_token(env_token) else {
        warn!("no api token configured, running offline");
        app.detach_remote();
        app.set_status("No API token set. Press t to add one.", false);
        return;
    };

    match TodoistClient::new(&app.settings.api_base_url, &token) {
        Ok(client) => {
            let worker = Worker::new(client, &app.settings.project_name, app.tz);
            app.attach_remote(WorkerHandle::spawn(worker));
            info!(project = %app.settings.project_name, "worker started");
        }
        Err(err) => {
            error!(error = %err, "could not build http client");
            app.detach_remote();
            app.set_status(format!("Could not connect: {}", err), true);
        }
    }
}

/// Store a token entered in the UI and reconnect with it
fn apply_new_token(app: &mut AppState, settings_path: &Path, token: String) {
    app.settings.api_token = token;
    match save_settings(settings_path, &app.settings) {
        Ok(()) => {
            info!("api token updated from the board");
            app.set_status("API token saved", false);
        }
        Err(err) => {
            error!(error = %err, "could not save settings");
            app.set_status(format!("Could not save settings: {}", err), true);
        }
    }
    // An entered token wins over the environment for the rest of the run
    connect(app, None);
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    settings_path: &Path,
) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        if let Some(token) = app.take_pending_token() {
            apply_new_token(app, settings_path, token);
        }

        // Clock, polling and worker results
        app.tick(Utc::now(), Instant::now());
    }
}
