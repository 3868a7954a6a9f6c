use std::collections::HashMap;

/// Receiver for discrete simulation events.
///
/// Physics code only ever pushes into a sink; mapping events to sound,
/// particles or scoring is the subscriber's business.
pub trait EventSink<E> {
    fn emit(&mut self, event: E);
}

impl<E> EventSink<E> for Vec<E> {
    fn emit(&mut self, event: E) {
        self.push(event);
    }
}

/// Events that can be grouped under a short static name.
pub trait NamedEvent {
    fn name(&self) -> &'static str;
}

/// Sink that only counts events by name. Useful for audio throttling and tests.
#[derive(Debug, Default, Clone)]
pub struct CountingSink {
    counts: HashMap<&'static str, usize>,
}

impl CountingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many events named `name` have been emitted.
    pub fn count(&self, name: &str) -> usize {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Total events of any kind.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl<E: NamedEvent> EventSink<E> for CountingSink {
    fn emit(&mut self, event: E) {
        *self.counts.entry(event.name()).or_insert(0) += 1;
    }
}
