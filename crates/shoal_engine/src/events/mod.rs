//! Event system
//! Key principles:
//! - Handler returns bool (true = consumed, stops forwarding)
//! - Handlers are registered explicitly with the system that owns them
//! - Dispatch happens only inside `dispatch`, never while an event is raised,
//!   so a handler can't re-enter the code that emitted the event
//! - Delivered events are kept for `drain_delivered` only while capture is on

/// Event handler trait
/// Returns true if event was consumed (stops forwarding)
/// Returns false to allow forwarding to other handlers
pub trait EventHandler<E> {
    /// Handle an event, return true if consumed
    fn on_event(&mut self, event: &E) -> bool;
}

/// Event system with registration and queuing
/// Follows chain of responsibility pattern
pub struct EventSystem<E> {
    queue: Vec<E>,
    handlers: Vec<Box<dyn EventHandler<E>>>,
    delivered: Vec<E>,
    capture: bool,
}

impl<E> EventSystem<E> {
    /// Create a new empty event system that keeps nothing after dispatch
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            handlers: Vec::new(),
            delivered: Vec::new(),
            capture: false,
        }
    }

    /// Create an event system that keeps every delivered event until drained
    pub fn with_capture() -> Self {
        Self { capture: true, ..Self::new() }
    }

    /// Turn delivered-event capture on or off; turning it off drops anything held
    pub fn set_capture(&mut self, capture: bool) {
        self.capture = capture;
        if !capture {
            self.delivered = Vec::new();
        }
    }

    /// Whether delivered events are being kept
    pub const fn is_capturing(&self) -> bool {
        self.capture
    }

    /// Register a handler; handlers see events in registration order
    pub fn register_handler(&mut self, handler: Box<dyn EventHandler<E>>) {
        self.handlers.push(handler);
    }

    /// Send event for handling at the next dispatch
    pub fn send(&mut self, event: E) {
        self.queue.push(event);
    }

    /// Dispatch all pending events in the order they were sent
    pub fn dispatch(&mut self) {
        let pending = std::mem::take(&mut self.queue);
        for event in pending {
            self.dispatch_event(event);
        }
    }

    /// Dispatch single event to registered handlers
    /// Stops on first handler that returns true (consumed)
    fn dispatch_event(&mut self, event: E) {
        for handler in &mut self.handlers {
            if handler.on_event(&event) {
                break;
            }
        }
        if self.capture {
            self.delivered.push(event);
        }
    }

    /// Take every event delivered since the last call
    pub fn drain_delivered(&mut self) -> Vec<E> {
        std::mem::take(&mut self.delivered)
    }

    /// Number of events waiting for dispatch
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Number of delivered events held for `drain_delivered`
    pub fn delivered_count(&self) -> usize {
        self.delivered.len()
    }

    /// Clear all queued events (useful for state transitions)
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

impl<E> Default for EventSystem<E> {
    fn default() -> Self {
        Self::new()
    }
}
