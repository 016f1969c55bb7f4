use std::fs::{File, create_dir_all, read_dir, write};
use std::path::{Path, PathBuf};

use async_openai::types::ChatCompletionRequestMessage;
use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

// One conversation's checkpoint: the thread id scoping it and the full
// request-message history (including tool traffic), serializable as-is.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct SessionState {
    pub thread_id: String,
    pub messages: Vec<ChatCompletionRequestMessage>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            thread_id: Uuid::new_v4().to_string(),
            messages: Vec::new(),
        }
    }

    pub fn with_thread_id(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
            messages: Vec::new(),
        }
    }
}

// Checkpoints live as one JSON file per thread under <data-dir>/sessions.
#[derive(Clone, Debug)]
pub struct SessionManager {
    sessions_dir: PathBuf,
}

impl SessionManager {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            sessions_dir: data_dir.join("sessions"),
        }
    }

    pub fn available_sessions(&self) -> Vec<String> {
        let Ok(entries) = read_dir(&self.sessions_dir) else {
            return Vec::new();
        };

        entries
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if path.is_file() && path.extension()? == "json" {
                    path.file_stem()?.to_str().map(String::from)
                } else {
                    None
                }
            })
            .collect()
    }

    pub fn load(&self, thread_id: &str) -> Result<SessionState, AppError> {
        let path = self.session_path(thread_id);
        let file = File::open(path)?;
        let state = serde_json::from_reader(file)?;
        Ok(state)
    }

    // Resuming an unknown thread starts it fresh under that id.
    pub fn load_or_new(&self, thread_id: &str) -> SessionState {
        self.load(thread_id).unwrap_or_else(|_| {
            debug!("No checkpoint for thread {}, starting fresh", thread_id);
            SessionState::with_thread_id(thread_id)
        })
    }

    pub fn save(&self, state: &SessionState) -> Result<(), AppError> {
        create_dir_all(&self.sessions_dir)?;
        let serialized = serde_json::to_string_pretty(state)?;
        write(self.session_path(&state.thread_id), serialized)?;
        Ok(())
    }

    fn session_path(&self, thread_id: &str) -> PathBuf {
        self.sessions_dir.join(format!("{}.json", thread_id))
    }
}
