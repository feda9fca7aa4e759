//! Command handlers. Each one works on the loaded store and reports whether
//! the file has to be written back.
pub mod crud;
pub mod help;
pub mod list;

use std::io::Write;
use crate::config::ConfigStore;
use crate::error::SshcError;
use crate::filter::closest_host;

/// What a handler needs while it runs.
pub struct Context<'a> {
    pub store: ConfigStore,
    pub out: &'a mut dyn Write,
}

impl<'a> Context<'a> {
    pub fn new(store: ConfigStore, out: &'a mut dyn Write) -> Self {
        Self { store, out }
    }

    /// Fails with a "did you mean" hint when `host` is not in the store.
    pub fn require_host(&self, host: &str) -> Result<(), SshcError> {
        if self.store.get(host).is_some() {
            return Ok(());
        }
        Err(SshcError::HostNotFound {
            host: host.to_string(),
            suggestion: closest_host(self.store.hosts(), host),
        })
    }
}

/// Result of a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to write back.
    Unchanged,
    /// The store was changed; `message` is printed once it is saved.
    Modified { message: String },
}

impl Outcome {
    pub fn modified(message: impl Into<String>) -> Self {
        Outcome::Modified { message: message.into() }
    }
}
