use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_openai::{Client, config::OpenAIConfig};
use clap::Parser;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::warn;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::{Mutex, mpsc};
use tokio::time::Instant;

use julenissen::ai::SantaAI;
use julenissen::app::{Action, App};
use julenissen::console;
use julenissen::error::AppError;
use julenissen::judge::OpenAiJudge;
use julenissen::logging;
use julenissen::session::{SessionManager, SessionState};
use julenissen::settings::Settings;
use julenissen::store::ListStore;
use julenissen::tools::ToolExecutor;
use julenissen::ui;

#[derive(Parser, Debug)]
#[command(
    name = "julenissen",
    about = "Chat with the digital Santa and his shared naughty-or-nice list"
)]
struct Args {
    /// Run the line-oriented console chat instead of the terminal UI
    #[arg(long)]
    console: bool,

    /// Directory for settings, logs, the list database and session checkpoints
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,

    /// Path to the SQLite database (defaults to <data-dir>/naughty_nice.db)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Resume an existing session thread by id
    #[arg(long)]
    thread: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();
    let settings = Settings::load_or_init(&args.data_dir)?;
    logging::init(&args.data_dir, settings.debug_mode)?;

    // No key is a configuration error we refuse to start without.
    let api_key = settings.api_key().ok_or(AppError::MissingApiKey)?;
    if !Settings::validate_api_key(&api_key).await {
        warn!("OpenAI API key did not validate; continuing anyway");
    }

    let client = Client::with_config(OpenAIConfig::new().with_api_key(api_key));
    let db_path = args
        .db
        .clone()
        .unwrap_or_else(|| args.data_dir.join("naughty_nice.db"));
    let store = ListStore::open(&db_path).await?;
    let sessions = SessionManager::new(&args.data_dir);

    let state = match &args.thread {
        Some(thread_id) => sessions.load_or_new(thread_id),
        None => SessionState::new(),
    };

    let judge = OpenAiJudge::new(client.clone(), settings.model.clone());
    let tools = ToolExecutor::new(store.clone(), judge);
    let mut ai = SantaAI::new(client, settings.model.clone(), tools, state);
    if ai.seed_greeting()? {
        sessions.save(&ai.state)?;
    }

    if args.console {
        return console::run(ai, &store, &sessions).await;
    }

    // Setup terminal
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    panic::set_hook(Box::new(|panic_info| {
        restore_terminal();
        eprintln!("{}", panic_info);
    }));

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let (app, action_receiver) = App::new(ai, store, sessions);
    let app = Arc::new(Mutex::new(app));

    let result = run_app(&mut terminal, app, action_receiver).await;
    restore_terminal();
    result.map_err(AppError::from)
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: Arc<Mutex<App>>,
    mut action_receiver: mpsc::UnboundedReceiver<Action>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();
    let mut events = EventStream::new();

    loop {
        terminal.draw(|f| {
            let mut app = tokio::task::block_in_place(|| app.blocking_lock());
            ui::draw(f, &mut app)
        })?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        tokio::select! {
            _ = tokio::time::sleep(timeout) => {
                let mut app = app.lock().await;
                app.on_tick();
                last_tick = Instant::now();
            }
            maybe_event = events.next() => {
                if let Some(Ok(Event::Key(key))) = maybe_event {
                    if key.kind == KeyEventKind::Press {
                        let mut app = app.lock().await;
                        app.on_key(key);
                    }
                }
            }
            Some(action) = action_receiver.recv() => {
                let mut app = app.lock().await;
                app.handle_action(action);
            }
        }

        if app.lock().await.should_quit {
            return Ok(());
        }
    }
}
