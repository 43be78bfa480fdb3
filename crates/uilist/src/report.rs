// Step reporting - the seam to the test report sink
//
// The list consumes the sink exactly once per failed lookup/assertion: it
// opens a step named after the list and the unsatisfied criterion, then
// closes it as FAILED. The sink's internals (report format, screenshot
// attachment) belong to the owning test framework.

use serde::Deserialize;
use tokio::sync::mpsc;

/// Outcome recorded when a step is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Passed,
    Failed,
}

/// Report sink consumed by the list on failed lookups/assertions.
///
/// `start_step`/`stop_step` are paired; the list never nests steps.
pub trait Reporter: Send + Sync {
    fn start_step(&self, name: &str);
    fn stop_step(&self, status: StepStatus);
}

/// Discards every step. The default sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn start_step(&self, _name: &str) {}
    fn stop_step(&self, _status: StepStatus) {}
}

/// Emits steps as tracing events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn start_step(&self, name: &str) {
        tracing::info!(step = name, "step started");
    }

    fn stop_step(&self, status: StepStatus) {
        match status {
            StepStatus::Passed => tracing::info!("step passed"),
            StepStatus::Failed => tracing::error!("step failed"),
        }
    }
}

enum StepEvent {
    Start(String),
    Stop(StepStatus),
}

/// Forwards steps to a wrapped sink on a single background task, so a slow
/// sink does not block the thread driving the browser session.
///
/// Ordering is preserved only under the single-producer discipline the list
/// already follows (one thread per list); concurrent callers would interleave
/// their start/stop pairs.
pub struct BackgroundReporter {
    tx: mpsc::UnboundedSender<StepEvent>,
}

impl BackgroundReporter {
    /// Spawns the forwarding worker on the current tokio runtime.
    pub fn new(sink: std::sync::Arc<dyn Reporter>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                match event {
                    StepEvent::Start(name) => sink.start_step(&name),
                    StepEvent::Stop(status) => sink.stop_step(status),
                }
            }
        });
        Self { tx }
    }
}

impl Reporter for BackgroundReporter {
    fn start_step(&self, name: &str) {
        // A closed worker means the runtime is shutting down; nothing to do.
        let _ = self.tx.send(StepEvent::Start(name.to_string()));
    }

    fn stop_step(&self, status: StepStatus) {
        let _ = self.tx.send(StepEvent::Stop(status));
    }
}

/// Localized phrase templates used to compose step names.
///
/// Placeholders (`{list}`, `{criterion}`) are substituted by [`render`].
/// Override by deserializing a JSON document from the owning framework's
/// configuration:
///
/// ```ignore
/// let phrases: Phrases = serde_json::from_str(&localized_json)?;
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Phrases {
    pub item_lookup: String,
    pub size_assertion: String,
    pub visibility_assertion: String,
    pub text_assertion: String,
}

impl Default for Phrases {
    fn default() -> Self {
        Self {
            item_lookup: "Search item '{criterion}' in list '{list}'".to_string(),
            size_assertion: "Assert list '{list}' size {criterion}".to_string(),
            visibility_assertion: "Assert list '{list}' visibility: {criterion}".to_string(),
            text_assertion: "Assert list '{list}' text: {criterion}".to_string(),
        }
    }
}

/// Substitutes `{key}` placeholders in a phrase template.
///
/// Unknown placeholders are left in place so a mistranslated template stays
/// diagnosable in the report instead of panicking a test run.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in values {
        out = out.replace(&format!("{{{key}}}"), value);
    }
    out
}
