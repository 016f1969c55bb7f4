use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::error;
use tokio::sync::{Mutex, mpsc};

use crate::ai::SantaAI;
use crate::error::AIError;
use crate::judge::OpenAiJudge;
use crate::message::{Message, MessageType};
use crate::session::SessionManager;
use crate::store::{ListStore, NameScore};
use crate::ui::spinner::Spinner;

pub const LEADERBOARD_LIMIT: i64 = 10;

// Outcomes of spawned work, delivered back to the event loop.
pub enum Action {
    SantaResponse(Box<Result<String, AIError>>),
    LeaderboardLoaded(Vec<NameScore>, Vec<NameScore>),
}

pub struct App {
    pub should_quit: bool,

    // --- Chat surface
    pub chat_content: Vec<Message>,
    pub input: String,
    pub scroll_offset: usize, // lines up from the bottom of the transcript
    pub awaiting_response: bool,

    // --- Leaderboard sidebar
    pub nice_top: Vec<NameScore>,
    pub naughty_top: Vec<NameScore>,

    // --- Spinner
    pub spinner: Spinner,
    pub spinner_active: bool,
    last_spinner_update: Instant,

    ai: Arc<Mutex<SantaAI<OpenAiJudge>>>,
    store: ListStore,
    sessions: SessionManager,
    action_sender: mpsc::UnboundedSender<Action>,
}

impl App {
    pub fn new(
        ai: SantaAI<OpenAiJudge>,
        store: ListStore,
        sessions: SessionManager,
    ) -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (action_sender, action_receiver) = mpsc::unbounded_channel();

        let app = Self {
            should_quit: false,
            chat_content: ai.transcript(),
            input: String::new(),
            scroll_offset: 0,
            awaiting_response: false,
            nice_top: Vec::new(),
            naughty_top: Vec::new(),
            spinner: Spinner::new(),
            spinner_active: false,
            last_spinner_update: Instant::now(),
            ai: Arc::new(Mutex::new(ai)),
            store,
            sessions,
            action_sender,
        };
        app.refresh_leaderboards();

        (app, action_receiver)
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Enter => self.submit_input(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Up => self.scroll_offset = self.scroll_offset.saturating_add(1),
            KeyCode::Down => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            KeyCode::PageUp => self.scroll_offset = self.scroll_offset.saturating_add(10),
            KeyCode::PageDown => self.scroll_offset = self.scroll_offset.saturating_sub(10),
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    pub fn on_tick(&mut self) {
        self.update_spinner();
    }

    // One synchronous pass through the conversation loop per user message;
    // the turn runs on a task so the UI keeps drawing.
    fn submit_input(&mut self) {
        let text = self.input.trim().to_string();
        if text.is_empty() || self.awaiting_response {
            return;
        }
        self.input.clear();
        self.scroll_offset = 0;

        self.chat_content
            .push(Message::new(text.clone(), MessageType::User));
        self.awaiting_response = true;
        self.start_spinner();

        let ai = self.ai.clone();
        let sessions = self.sessions.clone();
        let sender = self.action_sender.clone();
        tokio::spawn(async move {
            let mut ai = ai.lock().await;
            let result = ai.send_message(&text).await;
            if result.is_ok() {
                if let Err(e) = sessions.save(&ai.state) {
                    error!("Failed to checkpoint session: {}", e);
                }
            }
            let _ = sender.send(Action::SantaResponse(Box::new(result)));
        });
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::SantaResponse(result) => {
                self.awaiting_response = false;
                self.stop_spinner();
                match *result {
                    Ok(reply) => {
                        self.chat_content.push(Message::new(reply, MessageType::Santa));
                    }
                    Err(e) => {
                        // Write-path failures end up here and are shown, not
                        // hidden: the registration did not happen.
                        error!("Santa turn failed: {}", e);
                        self.chat_content.push(Message::new(
                            format!("Something went wrong: {}", e),
                            MessageType::System,
                        ));
                    }
                }
                self.scroll_offset = 0;
                self.refresh_leaderboards();
            }
            Action::LeaderboardLoaded(nice, naughty) => {
                self.nice_top = nice;
                self.naughty_top = naughty;
            }
        }
    }

    // Leaderboards are reads: failures are logged and leave the sidebar
    // stale rather than interrupting the chat.
    fn refresh_leaderboards(&self) {
        let store = self.store.clone();
        let sender = self.action_sender.clone();
        tokio::spawn(async move {
            let nice = match store.top_nice(LEADERBOARD_LIMIT).await {
                Ok(rows) => rows,
                Err(e) => {
                    error!("Failed to load nice leaderboard: {}", e);
                    return;
                }
            };
            let naughty = match store.top_naughty(LEADERBOARD_LIMIT).await {
                Ok(rows) => rows,
                Err(e) => {
                    error!("Failed to load naughty leaderboard: {}", e);
                    return;
                }
            };
            let _ = sender.send(Action::LeaderboardLoaded(nice, naughty));
        });
    }

    pub fn start_spinner(&mut self) {
        self.spinner_active = true;
        self.last_spinner_update = Instant::now();
    }

    pub fn stop_spinner(&mut self) {
        self.spinner_active = false;
    }

    pub fn update_spinner(&mut self) {
        if self.spinner_active && self.last_spinner_update.elapsed() >= Duration::from_millis(100) {
            self.spinner.next_frame();
            self.last_spinner_update = Instant::now();
        }
    }
}
