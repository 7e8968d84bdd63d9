// stub providers shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use solace::Error;
use solace::core::ProviderRequest;
use solace::core::ai::ProviderAdapter;

pub enum Behavior {
    Reply(&'static str),
    Fail,
    /// answer with the newest user message
    Echo,
}

pub struct StubProvider {
    behavior: Behavior,
    calls: AtomicUsize,
    seen: Mutex<Vec<ProviderRequest>>,
}

impl StubProvider {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<ProviderRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProviderAdapter for StubProvider {
    async fn generate(&self, request: &ProviderRequest) -> Result<String, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(request.clone());

        match &self.behavior {
            Behavior::Reply(text) => Ok(text.to_string()),
            Behavior::Fail => Err(Error::Provider("503 Service Unavailable".into())),
            Behavior::Echo => {
                let last = request.turns.last().map(|t| t.text.clone()).unwrap_or_default();
                // shuffle completion order a little
                tokio::time::sleep(Duration::from_millis((last.len() % 7) as u64)).await;
                Ok(last)
            }
        }
    }

    fn name(&self) -> &str {
        "stub"
    }

    fn model(&self) -> &str {
        "stub-1"
    }
}
