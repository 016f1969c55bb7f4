use async_openai::error::OpenAIError;
use async_openai::{Client, config::OpenAIConfig};
use log::error;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

// Application settings, kept as pretty JSON under the data directory.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Settings {
    pub openai_api_key: Option<String>, // Optional; OPENAI_API_KEY is the fallback.
    pub model: String,
    pub debug_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            openai_api_key: None,
            model: "gpt-4o".to_string(),
            debug_mode: false,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(data_dir: &Path) -> io::Result<Self> {
        let data = fs::read_to_string(data_dir.join("settings.json"))?;
        let settings = serde_json::from_str(&data)?;
        Ok(settings)
    }

    // A missing file gets defaults written out. A file that exists but does
    // not parse is a configuration error and must not be overwritten; a
    // configured key could be lost that way.
    pub fn load_or_init(data_dir: &Path) -> io::Result<Self> {
        if !data_dir.join("settings.json").exists() {
            let settings = Self::new();
            settings.save(data_dir)?;
            return Ok(settings);
        }
        Self::load(data_dir)
    }

    pub fn save(&self, data_dir: &Path) -> io::Result<()> {
        fs::create_dir_all(data_dir)?;
        let data = serde_json::to_string_pretty(self)?;
        fs::write(data_dir.join("settings.json"), data)?;
        Ok(())
    }

    // The configured key wins; the environment is the fallback. No key at all
    // is a fatal configuration error at startup, handled by the caller.
    pub fn api_key(&self) -> Option<String> {
        self.openai_api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
    }

    // Cheap liveness check against the models endpoint.
    pub async fn validate_api_key(api_key: &str) -> bool {
        let client = Client::with_config(OpenAIConfig::new().with_api_key(api_key));
        match client.models().list().await {
            Ok(_) => true,
            Err(OpenAIError::Reqwest(e)) => {
                error!("API key validation failed, network problem: {}", e);
                false
            }
            Err(e) => {
                error!("API key validation failed: {}", e);
                false
            }
        }
    }
}
