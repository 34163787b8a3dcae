//! `musebot-ask`: ask the music assistant from a terminal.
//!
//! Sends the message to `/message`; when the reply starts an artist lookup,
//! polls for the result and prints it.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use musebot_client::ApiClient;
use musebot_core::poller::{self, PollerConfig, DEFAULT_MAX_ATTEMPTS};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "musebot-ask", version, about = "Ask the musebot music assistant")]
struct Args {
    /// Base URL of the musebot API.
    #[arg(long, env = "MUSEBOT_API_URL", default_value = "http://localhost:4000")]
    api_url: String,

    /// Delay between polls while a lookup is pending.
    #[arg(long, default_value_t = 1500)]
    interval_ms: u64,

    /// Polls before giving up on a lookup.
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Look this artist up directly instead of sending a chat message.
    #[arg(long, conflicts_with = "message")]
    artist: Option<String>,

    /// Chat message, e.g. `who is Queen?`.
    #[arg(required_unless_present = "artist")]
    message: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "musebot_client=info,musebot_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let client = ApiClient::new(args.api_url.as_str());
    let config = PollerConfig {
        interval: Duration::from_millis(args.interval_ms),
        max_attempts: args.max_attempts,
        ..PollerConfig::default()
    };

    if let Some(artist) = args.artist {
        println!("Searching for {artist}...");
        let terminal = poller::run(&client, &artist, config).await;
        println!("{}", terminal.user_message(&artist));
        return Ok(());
    }

    let message = args.message.join(" ");
    let reply = client
        .send_message(&message)
        .await
        .with_context(|| format!("could not reach musebot at {}", args.api_url))?;
    println!("{}", reply.response);

    if let Some(lookup) = reply.artist_lookup {
        let terminal = poller::watch(&client, &lookup.artist_name, config).await;
        println!("\n{}", terminal.user_message(&lookup.artist_name));
    }

    Ok(())
}
