//! In-memory stand-ins for the process runner and the bag store

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use bagplayer_rs::backend::{BagSummary, Invocation, LogStore, ProcessRunner, ProcessTag};
use bagplayer_rs::{BagPlayerError, Result};

/// One request made to a [`RecordingRunner`]
#[derive(Debug, Clone, PartialEq)]
pub enum RunnerCall {
    Start(Invocation),
    Stop(ProcessTag),
}

/// Runner that records every request instead of spawning anything
#[derive(Debug, Clone, Default)]
pub struct RecordingRunner {
    calls: Arc<Mutex<Vec<RunnerCall>>>,
    fail_starts: bool,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner whose launches all fail, as if the tools were not installed
    pub fn failing() -> Self {
        Self {
            fail_starts: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<RunnerCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn starts(&self) -> Vec<Invocation> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                RunnerCall::Start(inv) => Some(inv),
                RunnerCall::Stop(_) => None,
            })
            .collect()
    }

    pub fn stops(&self) -> Vec<ProcessTag> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                RunnerCall::Stop(tag) => Some(tag),
                RunnerCall::Start(_) => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl ProcessRunner for RecordingRunner {
    fn start(&self, invocation: &Invocation) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(RunnerCall::Start(invocation.clone()));
        if self.fail_starts {
            return Err(BagPlayerError::Spawn {
                program: invocation.program.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not installed"),
            });
        }
        Ok(())
    }

    fn stop(&self, tag: &ProcessTag) -> Result<()> {
        self.calls.lock().unwrap().push(RunnerCall::Stop(tag.clone()));
        Ok(())
    }
}

/// Bag store serving canned summaries by path
#[derive(Debug, Clone, Default)]
pub struct FakeStore {
    bags: HashMap<PathBuf, BagSummary>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bag(mut self, summary: BagSummary) -> Self {
        self.bags.insert(summary.path.clone(), summary);
        self
    }
}

impl LogStore for FakeStore {
    fn open(&self, path: &Path) -> Result<BagSummary> {
        self.bags.get(path).cloned().ok_or_else(|| {
            BagPlayerError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            ))
        })
    }
}
