//! Ctrl-C handling
//!
//! SIGINT stops the command in progress instead of ending the session.
//! The handler only raises a flag; streams and the read loop poll it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::Result;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Shared flag raised by Ctrl-C and lowered before each command
#[derive(Debug, Clone, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route SIGINT to this flag for the rest of the process
    pub fn install(&self) -> Result<()> {
        let flag = Arc::clone(&self.0);
        ctrlc::set_handler(move || {
            flag.store(true, Ordering::SeqCst);
        })?;
        Ok(())
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Lower the flag, returning whether it was raised
    pub fn clear(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }

    /// Resolves once the flag is raised
    pub async fn raised(&self) {
        while !self.is_raised() {
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}
