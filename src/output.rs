//! Queued, timestamped output.
//!
//! The engine never performs IO. Messages produced during a dispatch are
//! buffered in an [`OutputQueue`], each line stamped with the schedule
//! time at which it happened, and the whole batch is handed to the host's
//! [`OutputSink`] in a single emission when the dispatch finishes.

use serde::{Deserialize, Serialize};

/// Host-facing output seam. One call per flushed batch.
pub trait OutputSink {
    fn emit(&mut self, text: &str);
}

/// A sink that collects emissions, for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct BufferSink {
    emissions: Vec<String>,
}

impl BufferSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every emission so far, oldest first.
    #[must_use]
    pub fn emissions(&self) -> &[String] {
        &self.emissions
    }

    /// The most recent emission.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.emissions.last().map(String::as_str)
    }
}

impl OutputSink for BufferSink {
    fn emit(&mut self, text: &str) {
        self.emissions.push(text.to_string());
    }
}

/// Adapter for hosts that hand the engine a plain callback.
pub struct FnSink<F: FnMut(&str)>(pub F);

impl<F: FnMut(&str)> OutputSink for FnSink<F> {
    fn emit(&mut self, text: &str) {
        (self.0)(text);
    }
}

/// Buffered output lines awaiting a flush.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputQueue {
    lines: Vec<String>,
}

impl OutputQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a line, stamped with the time it happened at.
    pub fn push(&mut self, time: u64, line: &str) {
        self.lines.push(format!("{time} {line}"));
    }

    /// Number of queued lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Join everything queued with newlines, emit it once, clear the queue.
    ///
    /// An empty queue still emits (an empty block): every dispatch produces
    /// exactly one emission, and the host can rely on that.
    pub fn flush(&mut self, sink: &mut dyn OutputSink) {
        sink.emit(&self.lines.join("\n"));
        self.lines.clear();
    }
}
