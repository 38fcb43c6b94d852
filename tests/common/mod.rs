//! Shared utilities for integration tests.

use std::sync::{Arc, Mutex};

use clogger::{Handler, HandlerError, Record};

/// Handler that keeps every record it receives.
#[derive(Debug, Default)]
pub struct CaptureHandler {
    records: Mutex<Vec<Record>>,
}

impl CaptureHandler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Rendered messages received so far.
    pub fn messages(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.message.clone())
            .collect()
    }

    #[allow(dead_code)]
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }
}

impl Handler for CaptureHandler {
    fn handle(&self, record: &Record) -> Result<(), HandlerError> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// Handler that always fails with a broken pipe.
#[allow(dead_code)]
#[derive(Debug)]
pub struct FailingHandler;

impl Handler for FailingHandler {
    fn handle(&self, _record: &Record) -> Result<(), HandlerError> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "handler pipe closed").into())
    }
}
