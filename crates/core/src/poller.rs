//! Client-side polling of a dispatched artist lookup.
//!
//! [`Poller`] is a pure state machine over a closed set of states; [`run`]
//! drives it against any [`PollSource`] on a fixed interval until a terminal
//! state is reached or the attempt ceiling is hit.
//!
//! ```text
//! Idle -> Searching -> Pending(n) -> Success | NotFound | Error | TimedOut
//! ```

use std::time::Duration;

use async_trait::async_trait;

use crate::artist::ArtistResult;
use crate::lookup::{LookupOutcome, LookupReport};

/// Attempt ceiling before the poller gives up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;

/// Delay between polls while the lookup is pending.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1500);

/// Delay after a transport error before polling again.
pub const DEFAULT_ERROR_BACKOFF: Duration = Duration::from_secs(3);

/// Tunable parameters for the polling loop.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    pub interval: Duration,
    pub error_backoff: Duration,
    pub max_attempts: u32,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            error_backoff: DEFAULT_ERROR_BACKOFF,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

// ---------------------------------------------------------------------------
// States
// ---------------------------------------------------------------------------

/// Where a finished poll ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalState {
    Success(ArtistResult),
    NotFound { message: Option<String> },
    Error { message: String },
    TimedOut { attempts: u32 },
}

impl TerminalState {
    /// Text to show the user for this outcome.
    pub fn user_message(&self, artist_name: &str) -> String {
        match self {
            TerminalState::Success(result) => result.to_chat_text(),
            TerminalState::NotFound { .. } => {
                format!("Sorry, I couldn't find an artist matching '{artist_name}'.")
            }
            TerminalState::Error { message } => {
                format!("Sorry, something went wrong looking up '{artist_name}': {message}")
            }
            TerminalState::TimedOut { .. } => format!(
                "The lookup for '{artist_name}' is taking longer than expected. Please try again."
            ),
        }
    }
}

impl From<LookupOutcome> for TerminalState {
    fn from(outcome: LookupOutcome) -> Self {
        match outcome {
            LookupOutcome::Success(result) => TerminalState::Success(result),
            LookupOutcome::NotFound { message } => TerminalState::NotFound { message },
            LookupOutcome::Error { message } => TerminalState::Error { message },
        }
    }
}

/// Every state the poller can be in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Searching,
    Pending { attempts: u32 },
    Finished(TerminalState),
}

/// What the driver should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Wait(Duration),
    Done(TerminalState),
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

pub struct Poller {
    config: PollerConfig,
    state: PollState,
}

impl Poller {
    pub fn new(config: PollerConfig) -> Self {
        Self {
            config,
            state: PollState::Idle,
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Polls made so far.
    pub fn attempts(&self) -> u32 {
        match self.state {
            PollState::Pending { attempts } => attempts,
            _ => 0,
        }
    }

    /// The search was submitted; wait one interval before the first poll.
    pub fn submit(&mut self) -> Step {
        if let PollState::Finished(terminal) = &self.state {
            return Step::Done(terminal.clone());
        }
        self.state = PollState::Searching;
        Step::Wait(self.config.interval)
    }

    /// The dispatch call itself failed.
    pub fn dispatch_failed(&mut self, message: impl Into<String>) -> Step {
        self.finish(TerminalState::Error {
            message: message.into(),
        })
    }

    /// A poll returned a report.
    pub fn on_report(&mut self, report: LookupReport) -> Step {
        if let PollState::Finished(terminal) = &self.state {
            return Step::Done(terminal.clone());
        }
        match report.into_outcome() {
            Some(outcome) => self.finish(outcome.into()),
            None => self.count_attempt(self.config.interval),
        }
    }

    /// A poll failed in transit. Treated as transient.
    pub fn on_transport_error(&mut self) -> Step {
        if let PollState::Finished(terminal) = &self.state {
            return Step::Done(terminal.clone());
        }
        self.count_attempt(self.config.error_backoff)
    }

    fn count_attempt(&mut self, wait: Duration) -> Step {
        let attempts = self.attempts() + 1;
        if attempts >= self.config.max_attempts {
            return self.finish(TerminalState::TimedOut { attempts });
        }
        self.state = PollState::Pending { attempts };
        Step::Wait(wait)
    }

    fn finish(&mut self, terminal: TerminalState) -> Step {
        self.state = PollState::Finished(terminal.clone());
        Step::Done(terminal)
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Something that can start a lookup and report on it.
#[async_trait]
pub trait PollSource: Send + Sync {
    type Error: std::fmt::Display + Send;

    async fn dispatch(&self, artist_name: &str) -> Result<(), Self::Error>;

    async fn poll(&self, artist_name: &str) -> Result<LookupReport, Self::Error>;
}

/// Dispatch a lookup for `artist_name` and poll until it reaches a terminal
/// state.
pub async fn run<S>(source: &S, artist_name: &str, config: PollerConfig) -> TerminalState
where
    S: PollSource + ?Sized,
{
    let mut poller = Poller::new(config);

    let step = match source.dispatch(artist_name).await {
        Ok(()) => poller.submit(),
        Err(e) => {
            tracing::warn!(artist_name, error = %e, "Dispatch failed");
            poller.dispatch_failed(e.to_string())
        }
    };

    drive(source, artist_name, poller, step).await
}

/// Poll a lookup that was already dispatched elsewhere (e.g. by the chat
/// endpoint) until it reaches a terminal state.
pub async fn watch<S>(source: &S, artist_name: &str, config: PollerConfig) -> TerminalState
where
    S: PollSource + ?Sized,
{
    let mut poller = Poller::new(config);
    let step = poller.submit();
    drive(source, artist_name, poller, step).await
}

async fn drive<S>(source: &S, artist_name: &str, mut poller: Poller, mut step: Step) -> TerminalState
where
    S: PollSource + ?Sized,
{
    loop {
        match step {
            Step::Done(terminal) => return terminal,
            Step::Wait(delay) => tokio::time::sleep(delay).await,
        }

        step = match source.poll(artist_name).await {
            Ok(report) => {
                tracing::debug!(
                    artist_name,
                    attempt = poller.attempts() + 1,
                    status = ?report.status,
                    "Poll response",
                );
                poller.on_report(report)
            }
            Err(e) => {
                tracing::warn!(
                    artist_name,
                    attempt = poller.attempts() + 1,
                    error = %e,
                    "Poll failed, backing off",
                );
                poller.on_transport_error()
            }
        };
    }
}
