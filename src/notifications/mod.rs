//! Toast notifications raised by step components.
//!
//! Step components report validation problems and successful submissions
//! through the [`Notify`] collaborator. The flow itself never raises toasts;
//! in particular a corrected step location stays silent.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use serde::Serialize;
use uuid::Uuid;

use crate::config::NotificationsConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastLevel {
    pub fn label(self) -> &'static str {
        match self {
            ToastLevel::Info => "info",
            ToastLevel::Success => "success",
            ToastLevel::Warning => "warning",
            ToastLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: Uuid,
    pub level: ToastLevel,
    pub message: String,
    pub created_at: Instant,
}

/// Capability handed to step components for user-facing messages
pub trait Notify {
    fn notify(&mut self, level: ToastLevel, message: String);

    fn info(&mut self, message: &str) {
        self.notify(ToastLevel::Info, message.to_string());
    }

    fn success(&mut self, message: &str) {
        self.notify(ToastLevel::Success, message.to_string());
    }

    fn warning(&mut self, message: &str) {
        self.notify(ToastLevel::Warning, message.to_string());
    }

    fn error(&mut self, message: &str) {
        self.notify(ToastLevel::Error, message.to_string());
    }
}

/// Bounded queue of toasts that expire after a fixed time
#[derive(Debug)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    ttl: Duration,
    max_visible: usize,
    enabled: bool,
}

impl ToastQueue {
    pub fn new(ttl: Duration, max_visible: usize) -> Self {
        Self {
            toasts: VecDeque::new(),
            ttl,
            max_visible: max_visible.max(1),
            enabled: true,
        }
    }

    pub fn from_config(config: &NotificationsConfig) -> Self {
        let mut queue = Self::new(
            Duration::from_secs(config.toast_ttl_secs),
            config.max_visible,
        );
        queue.enabled = config.enabled;
        queue
    }

    /// A queue that accepts toasts but never shows them
    pub fn disabled() -> Self {
        let mut queue = Self::new(Duration::from_secs(1), 1);
        queue.enabled = false;
        queue
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Toasts currently shown, oldest first
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.back()
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
    }

    /// Drop expired toasts
    pub fn prune(&mut self) {
        self.prune_at(Instant::now());
    }

    pub fn prune_at(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.toasts
            .retain(|toast| now.saturating_duration_since(toast.created_at) < ttl);
    }
}

impl Notify for ToastQueue {
    fn notify(&mut self, level: ToastLevel, message: String) {
        match level {
            ToastLevel::Error | ToastLevel::Warning => {
                tracing::warn!(level = level.label(), %message, "toast");
            }
            _ => tracing::info!(level = level.label(), %message, "toast"),
        }
        if !self.enabled {
            return;
        }

        self.toasts.push_back(Toast {
            id: Uuid::new_v4(),
            level,
            message,
            created_at: Instant::now(),
        });
        while self.toasts.len() > self.max_visible {
            self.toasts.pop_front();
        }
    }
}
