//! In-memory scripted transport for tests

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;

use super::{Files, Transport};
use crate::models::Params;

/// A call observed by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: String,
    pub params: Params,
    pub had_files: bool,
}

#[derive(Default)]
struct State {
    queued: HashMap<String, VecDeque<Value>>,
    fixed: HashMap<String, Value>,
    calls: Vec<RecordedCall>,
}

/// Transport that answers from scripted payloads and records every call.
///
/// Queued responses for a method are consumed first; after that the fixed
/// response, if any, is returned on every call. Unscripted methods fail.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<State>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Answer `method` with `response` on every call.
    pub fn respond(&self, method: &str, response: Value) -> &Self {
        self.lock().fixed.insert(method.to_string(), response);
        self
    }

    /// Queue a one-shot response for `method`.
    pub fn enqueue(&self, method: &str, response: Value) -> &Self {
        self.lock()
            .queued
            .entry(method.to_string())
            .or_default()
            .push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.lock().calls.iter().filter(|c| c.method == method).count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn api_call(
        &self,
        method: &str,
        files: Option<&Files>,
        params: &Params,
    ) -> anyhow::Result<Value> {
        let mut state = self.lock();
        state.calls.push(RecordedCall {
            method: method.to_string(),
            params: params.clone(),
            had_files: files.is_some_and(|f| !f.is_empty()),
        });

        if let Some(resp) = state.queued.get_mut(method).and_then(VecDeque::pop_front) {
            return Ok(resp);
        }
        match state.fixed.get(method) {
            Some(resp) => Ok(resp.clone()),
            None => anyhow::bail!("mock transport has no response for {}", method),
        }
    }
}
