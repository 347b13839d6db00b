//! Run options

use crate::chain::Mode;

/// Options for one interpreter run.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Config {
    /// Mode the chain starts in. Scripts can still switch with
    /// `stack` / `queue`.
    pub initial_mode: Mode,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_mode(mut self, mode: Mode) -> Self {
        self.initial_mode = mode;
        self
    }
}
