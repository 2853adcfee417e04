//! A scripted [`CommandRunner`] for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use cw_core::error::{CwError, Result};
use cw_core::{ProcessResult, WaitPolicy};

use crate::command::CommandDescriptor;
use crate::runner::CommandRunner;

/// Replays queued results in order and records every command it was given.
#[derive(Debug, Default)]
pub struct MockRunner {
    responses: Mutex<VecDeque<Result<ProcessResult>>>,
    calls: Mutex<Vec<(CommandDescriptor, WaitPolicy)>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a process that exits 0 with `stdout`.
    pub fn ok(self, stdout: &str) -> Self {
        self.result(ProcessResult::new(0, stdout, ""))
    }

    pub fn result(self, result: ProcessResult) -> Self {
        self.push(Ok(result));
        self
    }

    pub fn error(self, error: CwError) -> Self {
        self.push(Err(error));
        self
    }

    pub fn push(&self, response: Result<ProcessResult>) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(response);
        }
    }

    pub fn calls(&self) -> Vec<CommandDescriptor> {
        self.calls
            .lock()
            .map(|calls| calls.iter().map(|(c, _)| c.clone()).collect())
            .unwrap_or_default()
    }

    pub fn policies(&self) -> Vec<WaitPolicy> {
        self.calls
            .lock()
            .map(|calls| calls.iter().map(|(_, p)| *p).collect())
            .unwrap_or_default()
    }

    /// Arguments of the most recent call.
    pub fn last_args(&self) -> Vec<String> {
        self.calls()
            .last()
            .map(CommandDescriptor::to_args)
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, command: &CommandDescriptor, policy: WaitPolicy) -> Result<ProcessResult> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((command.clone(), policy));
        }
        self.responses
            .lock()
            .map_err(|_| CwError::Internal("mock runner poisoned".to_string()))?
            .pop_front()
            .unwrap_or_else(|| {
                Err(CwError::Internal(format!(
                    "no scripted response for {}",
                    command.subcommand_display()
                )))
            })
    }
}
