//! Shared test utilities for chat-history integration tests.
//!
//! Provides MockProvider (SessionProvider), MockDiscovery (StoreDiscovery) and
//! RecordingTelemetry (TelemetrySink).

#![allow(dead_code)]

use async_trait::async_trait;
use chat_history::{
    ChatMessage, MessageRole, QueryFailure, RunTelemetry, SessionProvider, StoreAccessError,
    StoreDiscovery, StorePair, TelemetrySink, TimeWindow,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// What the mock provider does for one workspace store.
#[derive(Clone)]
pub enum Behavior {
    Messages(Vec<ChatMessage>),
    Delayed(Duration, Vec<ChatMessage>),
    Fail(StoreAccessError),
    Hang,
    Panic,
    /// Hangs, and panics when the pending query is dropped
    HangPanickingOnDrop,
}

/// Session provider scripted per workspace store path. Unknown stores return no messages.
#[derive(Default)]
pub struct MockProvider {
    behaviors: HashMap<PathBuf, Behavior>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
}

/// Counts a query as in flight until its future completes or is dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

struct PanicOnDrop;

impl Drop for PanicOnDrop {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            panic!("store reader crashed while closing");
        }
    }
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, store: impl Into<PathBuf>, behavior: Behavior) -> Self {
        self.behaviors.insert(store.into(), behavior);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Queries started and neither finished nor dropped.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionProvider for MockProvider {
    async fn fetch_window(
        &self,
        pair: &StorePair,
        window: TimeWindow,
    ) -> Result<Vec<ChatMessage>, StoreAccessError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _in_flight = InFlight::enter(&self.in_flight);
        let in_window = |messages: &[ChatMessage]| -> Vec<ChatMessage> {
            messages
                .iter()
                .filter(|m| window.contains(m.timestamp_ms))
                .cloned()
                .collect()
        };
        match self.behaviors.get(&pair.workspace_store) {
            None => Ok(Vec::new()),
            Some(Behavior::Messages(messages)) => Ok(in_window(messages)),
            Some(Behavior::Delayed(delay, messages)) => {
                tokio::time::sleep(*delay).await;
                Ok(in_window(messages))
            }
            Some(Behavior::Fail(err)) => Err(err.clone()),
            Some(Behavior::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(Vec::new())
            }
            Some(Behavior::Panic) => panic!("store reader crashed"),
            Some(Behavior::HangPanickingOnDrop) => {
                let _guard = PanicOnDrop;
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(Vec::new())
            }
        }
    }
}

/// Discovery returning a fixed list of stores, or an error.
pub struct MockDiscovery {
    stores: Vec<PathBuf>,
    fail: bool,
}

impl MockDiscovery {
    pub fn with_stores(stores: &[&str]) -> Self {
        Self {
            stores: stores.iter().map(PathBuf::from).collect(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            stores: Vec::new(),
            fail: true,
        }
    }
}

impl StoreDiscovery for MockDiscovery {
    fn discover_candidate_stores(
        &self,
        _workspace_root: &Path,
        _window: TimeWindow,
    ) -> Result<Vec<PathBuf>, anyhow::Error> {
        if self.fail {
            return Err(anyhow::anyhow!("storage root unreadable"));
        }
        Ok(self.stores.clone())
    }
}

/// Telemetry sink that records everything, optionally rejecting every call.
#[derive(Default)]
pub struct RecordingTelemetry {
    pub failures: Mutex<Vec<QueryFailure>>,
    pub runs: Mutex<Vec<RunTelemetry>>,
    reject: bool,
}

impl RecordingTelemetry {
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }
}

impl TelemetrySink for RecordingTelemetry {
    fn record_failure(&self, failure: &QueryFailure) -> Result<(), anyhow::Error> {
        self.failures
            .lock()
            .expect("telemetry lock")
            .push(failure.clone());
        if self.reject {
            return Err(anyhow::anyhow!("sink offline"));
        }
        Ok(())
    }

    fn record_run(&self, run: &RunTelemetry) -> Result<(), anyhow::Error> {
        self.runs.lock().expect("telemetry lock").push(*run);
        if self.reject {
            return Err(anyhow::anyhow!("sink offline"));
        }
        Ok(())
    }
}

/// Telemetry sink whose every call panics.
pub struct PanickingTelemetry;

impl TelemetrySink for PanickingTelemetry {
    fn record_failure(&self, _failure: &QueryFailure) -> Result<(), anyhow::Error> {
        panic!("telemetry backend crashed");
    }

    fn record_run(&self, _run: &RunTelemetry) -> Result<(), anyhow::Error> {
        panic!("telemetry backend crashed");
    }
}

pub fn msg(id: &str, ts: i64, content: &str, store: &str) -> ChatMessage {
    ChatMessage::new(id, ts, MessageRole::User, content, store)
}

pub const GLOBAL: &str = "/data/User/globalStorage/state.vscdb";

pub fn window() -> TimeWindow {
    TimeWindow::new(0, 1_000_000).expect("window")
}
