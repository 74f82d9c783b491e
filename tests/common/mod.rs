//! Shared fakes for lifecycle and config tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use turn_relay::engine::{EngineError, RelayEngine};

/// Records every call made to a [`FakeEngine`].
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<&'static str>>>,
}

impl CallLog {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| **c == call).count()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

/// Engine that succeeds or fails on demand without touching the network.
pub struct FakeEngine {
    log: CallLog,
    fail_start: bool,
    fail_close: bool,
}

impl FakeEngine {
    pub fn new() -> (Self, CallLog) {
        let log = CallLog::default();
        (
            Self {
                log: log.clone(),
                fail_start: false,
                fail_close: false,
            },
            log,
        )
    }

    pub fn failing_start() -> (Self, CallLog) {
        let (mut engine, log) = Self::new();
        engine.fail_start = true;
        (engine, log)
    }

    pub fn failing_close() -> (Self, CallLog) {
        let (mut engine, log) = Self::new();
        engine.fail_close = true;
        (engine, log)
    }
}

#[async_trait]
impl RelayEngine for FakeEngine {
    async fn start(&mut self) -> Result<(), EngineError> {
        self.log.record("start");
        if self.fail_start {
            return Err(EngineError::Backend("address in use".into()));
        }
        Ok(())
    }

    async fn close(&mut self) -> Result<(), EngineError> {
        self.log.record("close");
        if self.fail_close {
            return Err(EngineError::Backend("socket already closed".into()));
        }
        Ok(())
    }
}

/// Build a variable lookup from fixed pairs.
pub fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}
