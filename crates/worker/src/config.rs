/// Worker configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Catalogue database (default: `sqlite://Chinook.db`).
    pub database_url: String,
    /// Webhook used when an event carries no `callback_url`.
    pub callback_url: String,
}

impl WorkerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var        | Default                                        |
    /// |----------------|------------------------------------------------|
    /// | `HOST`         | `0.0.0.0`                                      |
    /// | `WORKER_PORT`  | `8000`                                         |
    /// | `DATABASE_URL` | `sqlite://Chinook.db`                          |
    /// | `CALLBACK_URL` | `http://localhost:4000/webhook/artist-result`  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("WORKER_PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("WORKER_PORT must be a valid u16");

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://Chinook.db".into());

        let callback_url = std::env::var("CALLBACK_URL")
            .unwrap_or_else(|_| "http://localhost:4000/webhook/artist-result".into());

        Self {
            host,
            port,
            database_url,
            callback_url,
        }
    }
}
