//! Notification dispatch
//!
//! The core never waits on email delivery: workflow code queues an
//! [`shared::models::EmailMessage`] and moves on. A background worker
//! owns the outbound call, retries with backoff, and records every
//! outcome in the email_log table. Dispatcher failure never reverts a
//! committed status change.

pub mod dispatcher;
pub mod service;
pub mod templates;

pub use dispatcher::{DispatchError, EmailDispatcher, HttpEmailDispatcher, MemoryDispatcher};
pub use service::{Notifier, NotifyService};
pub use templates::{build_message, Recipient};
