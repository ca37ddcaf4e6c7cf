//! Testing utilities for the folio workspace
//!
//! Shared fixtures: sample records, a scriptable project source, and a
//! container that records what the renderer did to it.

#![allow(missing_docs)]

use async_trait::async_trait;
use folio_app::{FetchError, ProjectSource};
use folio_model::RawProjectRecord;
use folio_render::{Container, ViewNode};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Three records covering each status and both cover kinds
pub fn sample_records() -> Vec<RawProjectRecord> {
    vec![
        RawProjectRecord::new()
            .with_title("Kernel Tracer")
            .with_description("eBPF based syscall tracer")
            .with_status("Complete")
            .with_stars(42)
            .with_tags(["rust", "ebpf"])
            .with_demo("https://example.com/tracer")
            .with_code("https://github.com/example/tracer")
            .with_timeline("2023")
            .with_role("Author"),
        RawProjectRecord::new()
            .with_title("Folio")
            .with_status("In Progress")
            .with_stars(7)
            .with_cover("https://cdn.example.com/folio.png"),
        RawProjectRecord::new().with_title("Scratchpad"),
    ]
}

pub fn titled(titles: &[&str]) -> Vec<RawProjectRecord> {
    titles
        .iter()
        .map(|t| RawProjectRecord::new().with_title(*t))
        .collect()
}

#[derive(Debug, Clone)]
enum Reply {
    Records(Vec<RawProjectRecord>),
    Status(u16),
    Malformed,
}

/// Scriptable [`ProjectSource`]
#[derive(Debug, Clone)]
pub struct FixtureSource {
    name: String,
    reply: Reply,
    delay: Duration,
    fetches: Arc<AtomicUsize>,
}

impl FixtureSource {
    /// Source answering with `records`
    pub fn records(name: &str, records: Vec<RawProjectRecord>) -> Self {
        Self::with_reply(name, Reply::Records(records))
    }

    /// Source answering with an HTTP error status
    pub fn status(name: &str, status: u16) -> Self {
        Self::with_reply(name, Reply::Status(status))
    }

    /// Source answering with something that is not a record list
    pub fn malformed(name: &str) -> Self {
        Self::with_reply(name, Reply::Malformed)
    }

    fn with_reply(name: &str, reply: Reply) -> Self {
        Self {
            name: name.to_string(),
            reply,
            delay: Duration::ZERO,
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Answer only after `delay`
    #[must_use]
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of fetches so far, shared between clones
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn shared(&self) -> Arc<dyn ProjectSource> {
        Arc::new(self.clone())
    }
}

#[async_trait]
impl ProjectSource for FixtureSource {
    async fn fetch(&self) -> Result<Vec<RawProjectRecord>, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.reply {
            Reply::Records(records) => Ok(records.clone()),
            Reply::Status(status) => Err(FetchError::Status {
                url: self.name.clone(),
                status: *status,
            }),
            Reply::Malformed => Err(FetchError::decode(&self.name, "expected a JSON array")),
        }
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

/// Container counting every renderer call
#[derive(Debug, Default)]
pub struct RecordingContainer {
    pub children: Vec<ViewNode>,
    pub clears: usize,
    pub empty_signals: usize,
}

impl RecordingContainer {
    /// `h2` titles of the appended cards, in order
    pub fn titles(&self) -> Vec<String> {
        self.children
            .iter()
            .flat_map(|child| child.find_all("h2"))
            .map(|h2| ViewNode::Element(h2.clone()).text_content())
            .collect()
    }
}

impl Container for RecordingContainer {
    fn clear(&mut self) {
        self.clears += 1;
        self.children.clear();
    }

    fn append(&mut self, child: ViewNode) {
        self.children.push(child);
    }

    fn show_empty_state(&mut self) {
        self.empty_signals += 1;
    }
}
