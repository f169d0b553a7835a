//! The single owned bundle of mirrored state: store, derived views, activity
//! log and pending user notices.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::activity_log::{ActivityLog, Level};
use crate::projection::Views;
use crate::store::{SliceUpdate, Store};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// A message the user must acknowledge before continuing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Session {
    store: Store,
    views: Views,
    log: ActivityLog,
    notices: VecDeque<Notice>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedSession {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Replace one store slice, then refresh the views that depend on it.
    pub fn apply(&mut self, update: SliceUpdate) {
        let slice = self.store.replace(update);
        self.views.refresh(slice, &self.store);
    }

    pub fn record(&mut self, level: Level, message: impl Into<String>) {
        let message = message.into();
        match level {
            Level::Info => tracing::info!(target: "memsim::activity", "{}", message),
            Level::Warn => tracing::warn!(target: "memsim::activity", "{}", message),
            Level::Error => tracing::error!(target: "memsim::activity", "{}", message),
        }
        self.log.append(level, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.record(Level::Info, message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.record(Level::Warn, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.record(Level::Error, message);
    }

    pub fn notify(&mut self, severity: Severity, message: impl Into<String>) {
        self.notices.push_back(Notice {
            severity,
            message: message.into(),
        });
    }

    pub fn pending_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    /// Acknowledge the oldest pending notice.
    pub fn dismiss_notice(&mut self) -> Option<Notice> {
        self.notices.pop_front()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn views(&self) -> &Views {
        &self.views
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }
}

pub type SharedSession = Arc<Mutex<Session>>;

/// Lock the session, recovering from a poisoned mutex. The lock is never held
/// across an await point.
pub fn lock(session: &SharedSession) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}
