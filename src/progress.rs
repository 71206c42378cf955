// Progress reporting for long-running fetches.
// Output is routed through a sink so the terminal, logs, or tests can observe it.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::records::Dataset;

/// A progress event emitted by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// Free-form informational line (rate limit report, cache notices).
    Message(String),
    /// A paginated fetch for `dataset` is starting.
    Started(Dataset),
    /// Page `page` of `dataset` is being requested.
    Page { dataset: Dataset, page: u32 },
    /// `dataset` finished with `records` rows.
    Finished { dataset: Dataset, records: usize },
}

/// Receiver for progress events.
pub trait ProgressSink: Send + fmt::Debug {
    fn emit(&self, event: Progress);
}

/// Forwards progress to `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn emit(&self, event: Progress) {
        match event {
            Progress::Message(text) => tracing::info!("{}", text),
            Progress::Started(dataset) => tracing::info!("Fetching {}", dataset.label()),
            Progress::Page { dataset, page } => {
                tracing::info!(dataset = dataset.file_stem(), page, "fetching page")
            }
            Progress::Finished { dataset, records } => {
                tracing::info!("Fetched {} {}", records, dataset.label())
            }
        }
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSink;

impl ProgressSink for SilentSink {
    fn emit(&self, _event: Progress) {}
}

/// Sink for a client built from configuration alone.
pub fn sink_for(verbose: bool) -> Box<dyn ProgressSink> {
    if verbose {
        Box::new(TracingSink)
    } else {
        Box::new(SilentSink)
    }
}

/// Keeps every event in memory. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<Progress>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<Progress> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Number of page markers recorded for `dataset`.
    pub fn pages(&self, dataset: Dataset) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Progress::Page { dataset: d, .. } if *d == dataset))
            .count()
    }
}

impl ProgressSink for MemorySink {
    fn emit(&self, event: Progress) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_shares_buffer() {
        let sink = MemorySink::new();
        let handle = sink.clone();

        sink.emit(Progress::Started(Dataset::Issues));
        sink.emit(Progress::Page {
            dataset: Dataset::Issues,
            page: 1,
        });
        sink.emit(Progress::Page {
            dataset: Dataset::Stargazers,
            page: 1,
        });

        assert_eq!(handle.events().len(), 3);
        assert_eq!(handle.pages(Dataset::Issues), 1);
        assert_eq!(handle.pages(Dataset::Stargazers), 1);
        assert_eq!(handle.pages(Dataset::CodeFrequency), 0);
    }

    #[test]
    fn test_sink_for_verbosity() {
        assert_eq!(format!("{:?}", sink_for(true)), "TracingSink");
        assert_eq!(format!("{:?}", sink_for(false)), "SilentSink");
    }
}
