//! Ctrl-C handling
//!
//! While git runs, Ctrl-C belongs to the child and G keeps going. At any
//! other moment it ends G with exit code 0. Reads from piped stdin restart
//! after the signal, so the handler exits itself instead of relying on the
//! read to fail.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag telling the interrupt handler whether a child is running
#[derive(Debug, Clone, Default)]
pub struct ChildActivity(Arc<AtomicBool>);

impl ChildActivity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Mark a child as running until the guard drops
    pub fn enter(&self) -> ActivityGuard<'_> {
        self.0.store(true, Ordering::SeqCst);
        ActivityGuard(&self.0)
    }

    /// Whether an interrupt arriving now should end the shell
    pub fn should_exit_on_interrupt(&self) -> bool {
        !self.is_running()
    }
}

/// Clears the running flag on drop
pub struct ActivityGuard<'a>(&'a AtomicBool);

impl Drop for ActivityGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Install the process-wide Ctrl-C handler
pub fn install_interrupt_handler(activity: ChildActivity) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        if activity.should_exit_on_interrupt() {
            println!();
            std::process::exit(0);
        }
    })
}
