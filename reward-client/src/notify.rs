//! Notification and confirmation seams
//!
//! The admin panels report every outcome as a short-lived toast and ask
//! before destructive actions. Both are traits so the CLI, a GUI shell and
//! the tests can each plug in their own.

use parking_lot::Mutex;
use std::future::Future;

use crate::api::ServerMessage;
use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

/// A transient notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Info,
            message: message.into(),
        }
    }
}

/// Toast sink
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);

    fn success(&self, message: &str) {
        self.notify(Toast::success(message));
    }

    fn error(&self, message: &str) {
        self.notify(Toast::error(message));
    }

    fn info(&self, message: &str) {
        self.notify(Toast::info(message));
    }
}

/// Writes toasts to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Success | ToastKind::Info => {
                tracing::info!(target: "toast", message = %toast.message)
            }
            ToastKind::Error => tracing::warn!(target: "toast", message = %toast.message),
        }
    }
}

/// Keeps every toast in memory
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().clone()
    }

    pub fn last(&self) -> Option<Toast> {
        self.toasts.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.toasts.lock().clear();
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, toast: Toast) {
        self.toasts.lock().push(toast);
    }
}

/// Yes/no prompt shown before destructive actions
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Await a mutation and toast its outcome
///
/// A non-blank server message wins over `success` for the success toast.
pub(crate) async fn report<Fut>(notifier: &dyn Notifier, success: &str, request: Fut) -> ClientResult<()>
where
    Fut: Future<Output = ClientResult<ServerMessage>>,
{
    match request.await {
        Ok(message) => {
            let text = message
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(success);
            notifier.success(text);
            Ok(())
        }
        Err(e) => Err(reject(notifier, e)),
    }
}

/// Toast a failure and hand the error back; a declined prompt stays silent
pub(crate) fn reject(notifier: &dyn Notifier, err: ClientError) -> ClientError {
    match &err {
        ClientError::Cancelled => tracing::debug!("Action cancelled"),
        e if e.is_local() => {
            tracing::debug!(error = %e, "Rejected locally");
            notifier.error(&e.toast_message());
        }
        e => {
            tracing::warn!(error = %e, "Request failed");
            notifier.error(&e.toast_message());
        }
    }
    err
}
