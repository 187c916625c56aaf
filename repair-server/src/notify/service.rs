//! Notification service
//!
//! mpsc-backed fire-and-forget queue. `Notifier::queue` never blocks and
//! never fails the caller; the worker owns delivery, retry, and the
//! email_log audit record.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::db::repository::EmailLogRepository;
use crate::notify::dispatcher::EmailDispatcher;
use shared::models::{EmailLog, EmailMessage, SendStatus};
use shared::util::now_rfc3339;

/// Base delay before the second delivery attempt; doubles per retry
const RETRY_BASE_DELAY_MS: u64 = 500;

/// Cheap cloneable handle used by the workflow engine and API handlers
#[derive(Clone)]
pub struct Notifier {
    tx: mpsc::Sender<EmailMessage>,
}

impl Notifier {
    /// Queue a notification. Queue overflow drops the message with a
    /// warning — the triggering state change has already committed and
    /// must not be blocked or reverted.
    pub fn queue(&self, message: EmailMessage) {
        if let Err(e) = self.tx.try_send(message) {
            tracing::warn!(target: "notify", error = %e, "Notification queue full, dropping message");
        }
    }
}

/// Notification dispatch service
///
/// 通过 mpsc 通道接收邮件請求，后台异步发送。
pub struct NotifyService {
    tx: mpsc::Sender<EmailMessage>,
}

impl NotifyService {
    /// Create the service; the returned receiver is handed to
    /// [`NotifyService::run_worker`] by the server's background tasks.
    pub fn new(queue_size: usize) -> (Self, mpsc::Receiver<EmailMessage>) {
        let (tx, rx) = mpsc::channel(queue_size);
        (Self { tx }, rx)
    }

    /// Handle for producers
    pub fn notifier(&self) -> Notifier {
        Notifier {
            tx: self.tx.clone(),
        }
    }

    /// Worker loop: deliver with bounded retries, then write the audit
    /// record. Runs until every producer handle is dropped.
    pub async fn run_worker(
        mut rx: mpsc::Receiver<EmailMessage>,
        dispatcher: Arc<dyn EmailDispatcher>,
        logs: EmailLogRepository,
        max_attempts: u32,
    ) {
        while let Some(message) = rx.recv().await {
            let max_attempts = max_attempts.max(1);
            let mut attempts = 0;
            let mut last_error: Option<String> = None;

            while attempts < max_attempts {
                attempts += 1;
                match dispatcher.send(&message).await {
                    Ok(()) => {
                        last_error = None;
                        break;
                    }
                    Err(e) => {
                        tracing::warn!(
                            target: "notify",
                            kind = %message.kind,
                            to = %message.to,
                            attempt = attempts,
                            error = %e,
                            "Notification send failed"
                        );
                        last_error = Some(e.to_string());
                        if attempts < max_attempts {
                            let delay = RETRY_BASE_DELAY_MS * (1 << (attempts - 1));
                            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
                        }
                    }
                }
            }

            let sent_status = if last_error.is_none() {
                SendStatus::Sent
            } else {
                SendStatus::Failed
            };

            let log = EmailLog {
                id: None,
                kind: message.kind,
                to: message.to.clone(),
                sent_status,
                attempts,
                error: last_error,
                created_at: now_rfc3339(),
            };

            if let Err(e) = logs.insert(log).await {
                tracing::warn!(target: "notify", error = %e, "Failed to write email log");
            }
        }

        tracing::debug!(target: "notify", "Notification worker stopped");
    }
}
