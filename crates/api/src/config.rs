use std::time::Duration;

use musebot_llm::LlmConfig;

/// Path the worker posts lookup results to.
pub const WEBHOOK_PATH: &str = "/webhook/artist-result";

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `4000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Catalogue database URL.
    pub database_url: String,
    /// Apply the embedded schema at startup (default: `false`).
    pub run_migrations: bool,
    /// Publish lookups to the external queue; `false` runs them in-process.
    pub queue_enabled: bool,
    /// Event endpoint of the external queue.
    pub queue_url: String,
    /// Public base URL of this server, used to build the webhook URL.
    pub callback_base_url: String,
    /// Completion API settings. `None` when no API key is configured.
    pub llm: Option<LlmConfig>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `HOST`                 | `0.0.0.0`                        |
    /// | `PORT`                 | `4000`                           |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`          |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                             |
    /// | `DATABASE_URL`         | `sqlite://Chinook.db`            |
    /// | `RUN_MIGRATIONS`       | `false`                          |
    /// | `QUEUE_ENABLED`        | `true`                           |
    /// | `QUEUE_URL`            | `http://localhost:8288/e/local`  |
    /// | `CALLBACK_BASE_URL`    | `http://localhost:4000`          |
    /// | `OPENAI_API_KEY`       | unset (LLM disabled)             |
    /// | `LLM_BASE_URL`         | `https://api.openai.com/v1`      |
    /// | `LLM_MODEL`            | `gpt-3.5-turbo`                  |
    /// | `LLM_TIMEOUT_SECS`     | `30`                             |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "4000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://Chinook.db".into());

        let run_migrations = env_flag("RUN_MIGRATIONS", false);
        let queue_enabled = env_flag("QUEUE_ENABLED", true);

        let queue_url =
            std::env::var("QUEUE_URL").unwrap_or_else(|_| "http://localhost:8288/e/local".into());

        let callback_base_url = std::env::var("CALLBACK_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:4000".into());

        let llm = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(|api_key| {
                let timeout_secs: u64 = std::env::var("LLM_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".into())
                    .parse()
                    .expect("LLM_TIMEOUT_SECS must be a valid u64");
                LlmConfig {
                    base_url: std::env::var("LLM_BASE_URL")
                        .unwrap_or_else(|_| "https://api.openai.com/v1".into()),
                    api_key,
                    model: std::env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".into()),
                    timeout: Duration::from_secs(timeout_secs),
                    temperature: 0.0,
                }
            });

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            run_migrations,
            queue_enabled,
            queue_url,
            callback_base_url,
            llm,
        }
    }

    /// Absolute URL of this server's webhook, handed to the worker.
    pub fn callback_url(&self) -> String {
        format!(
            "{}{WEBHOOK_PATH}",
            self.callback_base_url.trim_end_matches('/')
        )
    }
}

/// Read a boolean env var. Accepts `1/0`, `true/false`, `yes/no`, `on/off`.
fn env_flag(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(value) => parse_flag(&value)
            .unwrap_or_else(|| panic!("{name} must be a boolean, got '{value}'")),
        Err(_) => default,
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
