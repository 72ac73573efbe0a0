//! Server lifecycle hooks

use std::fmt;

/// Lifecycle transitions a server goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// The server process announced itself after booting
    Startup,

    /// The server process is going away
    Shutdown,
}

/// Callback run before an event is processed. Returning `false` halts processing.
pub type Hook<T> = Box<dyn Fn(&mut T) -> bool + Send + Sync>;

/// Hooks run before lifecycle events are processed for a record of type `T`
pub struct Lifecycle<T> {
    before: Vec<(LifecycleEvent, Hook<T>)>,
}

impl<T> Lifecycle<T> {
    pub fn new() -> Self {
        Self { before: Vec::new() }
    }

    /// Register a hook to run before `event` is processed
    pub fn before_event<F>(&mut self, event: LifecycleEvent, hook: F) -> &mut Self
    where
        F: Fn(&mut T) -> bool + Send + Sync + 'static,
    {
        self.before.push((event, Box::new(hook)));
        self
    }

    /// Run the hooks registered for `event` in registration order
    ///
    /// Stops at the first hook returning `false` and returns `false`.
    pub fn run_before(&self, event: LifecycleEvent, target: &mut T) -> bool {
        self.before
            .iter()
            .filter(|(registered, _)| *registered == event)
            .all(|(_, hook)| hook(target))
    }

    /// Number of hooks registered for `event`
    pub fn hook_count(&self, event: LifecycleEvent) -> usize {
        self.before.iter().filter(|(registered, _)| *registered == event).count()
    }
}

impl<T> Default for Lifecycle<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Lifecycle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lifecycle")
            .field("hooks", &self.before.len())
            .finish()
    }
}
