//! Email dispatcher implementations
//!
//! The dispatcher is the boundary to the external email sink: it takes a
//! template identifier plus structured payload and answers success or
//! failure. Rendering happens on the sink side.

use async_trait::async_trait;
use shared::models::EmailMessage;
use std::sync::Mutex;
use thiserror::Error;

/// Dispatch failure
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Email sink unreachable: {0}")]
    Transport(String),

    #[error("Email sink rejected message: {0}")]
    Rejected(String),
}

/// Outbound email sink boundary
#[async_trait]
pub trait EmailDispatcher: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), DispatchError>;
}

/// Dispatcher posting to the external `/send-email` HTTP sink
pub struct HttpEmailDispatcher {
    client: reqwest::Client,
    sink_url: String,
}

impl HttpEmailDispatcher {
    pub fn new(sink_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            sink_url: sink_url.into(),
        }
    }
}

#[async_trait]
impl EmailDispatcher for HttpEmailDispatcher {
    async fn send(&self, message: &EmailMessage) -> Result<(), DispatchError> {
        let response = self
            .client
            .post(&self.sink_url)
            .json(message)
            .send()
            .await
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(DispatchError::Rejected(format!("{}: {}", status, body)))
        }
    }
}

/// Recording dispatcher (tests and dry-run environments)
///
/// Stores every message; can be told to fail the first N sends to
/// exercise the retry path.
#[derive(Default)]
pub struct MemoryDispatcher {
    sent: Mutex<Vec<EmailMessage>>,
    fail_next: Mutex<u32>,
}

impl MemoryDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `n` send attempts
    pub fn fail_next(&self, n: u32) {
        *self.fail_next.lock().unwrap() = n;
    }

    /// Messages accepted so far
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailDispatcher for MemoryDispatcher {
    async fn send(&self, message: &EmailMessage) -> Result<(), DispatchError> {
        {
            let mut remaining = self.fail_next.lock().unwrap();
            if *remaining > 0 {
                *remaining -= 1;
                return Err(DispatchError::Transport("simulated failure".into()));
            }
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}
