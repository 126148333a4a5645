//! Mock command runner for testing

use async_trait::async_trait;
use gg_mcp::error::{Error, Result};
use gg_mcp::exec::{CommandOutput, CommandRequest, CommandRunner, CommandStatus};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Simple mock command runner for testing
///
/// Features:
/// - Configurable lookup results per program
/// - Configurable outputs per program
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockCommandRunner {
    which_results: Mutex<HashMap<String, PathBuf>>,
    captured_responses: Mutex<HashMap<String, CommandOutput>>,
    interactive_responses: Mutex<HashMap<String, CommandStatus>>,
    // Call tracking
    which_calls: Mutex<Vec<String>>,
    captured_calls: Mutex<Vec<CommandRequest>>,
    interactive_calls: Mutex<Vec<CommandRequest>>,
    // Error injection
    error_on_captured: Mutex<Option<String>>,
    error_on_interactive: Mutex<Option<String>>,
}

impl MockCommandRunner {
    /// Create a new mock with nothing installed and no responses
    pub fn new() -> Self {
        Self {
            which_results: Mutex::new(HashMap::new()),
            captured_responses: Mutex::new(HashMap::new()),
            interactive_responses: Mutex::new(HashMap::new()),
            which_calls: Mutex::new(Vec::new()),
            captured_calls: Mutex::new(Vec::new()),
            interactive_calls: Mutex::new(Vec::new()),
            error_on_captured: Mutex::new(None),
            error_on_interactive: Mutex::new(None),
        }
    }

    // === Configuration methods ===

    /// Make `which` report the program as installed
    pub fn install(&self, program: &str) {
        self.which_results.lock().unwrap().insert(
            program.to_string(),
            PathBuf::from(format!("/usr/bin/{program}")),
        );
    }

    /// Set the response for `run_captured` for a specific program
    pub fn set_captured_response(&self, program: &str, output: CommandOutput) {
        self.captured_responses
            .lock()
            .unwrap()
            .insert(program.to_string(), output);
    }

    /// Make `run_captured` succeed for a program with the given stdout
    pub fn succeed_captured(&self, program: &str, stdout: &str) {
        self.set_captured_response(
            program,
            CommandOutput {
                status: CommandStatus::ok(),
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        );
    }

    /// Make `run_captured` exit non-zero for a program with the given stderr
    pub fn set_captured_failure(&self, program: &str, code: i32, stderr: &str) {
        self.set_captured_response(
            program,
            CommandOutput {
                status: CommandStatus::failed(code),
                stdout: String::new(),
                stderr: stderr.to_string(),
            },
        );
    }

    /// Set the response for `run_interactive` for a specific program
    pub fn set_interactive_response(&self, program: &str, status: CommandStatus) {
        self.interactive_responses
            .lock()
            .unwrap()
            .insert(program.to_string(), status);
    }

    /// Make `run_captured` return an error
    pub fn fail_captured(&self, msg: &str) {
        *self.error_on_captured.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `run_interactive` return an error
    pub fn fail_interactive(&self, msg: &str) {
        *self.error_on_interactive.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification methods ===

    /// Get all programs that `which` was called with
    pub fn get_which_calls(&self) -> Vec<String> {
        self.which_calls.lock().unwrap().clone()
    }

    /// Get all `run_captured` calls
    pub fn get_captured_calls(&self) -> Vec<CommandRequest> {
        self.captured_calls.lock().unwrap().clone()
    }

    /// Get all `run_interactive` calls
    pub fn get_interactive_calls(&self) -> Vec<CommandRequest> {
        self.interactive_calls.lock().unwrap().clone()
    }

    /// Assert that `run_captured` was called for a specific program
    pub fn assert_captured_called(&self, program: &str) {
        let calls = self.get_captured_calls();
        assert!(
            calls.iter().any(|c| c.program == program),
            "Expected run_captured({program}) but got: {calls:?}"
        );
    }

    /// Assert that `run_interactive` was called for a specific program
    pub fn assert_interactive_called(&self, program: &str) {
        let calls = self.get_interactive_calls();
        assert!(
            calls.iter().any(|c| c.program == program),
            "Expected run_interactive({program}) but got: {calls:?}"
        );
    }

    /// Assert that `run_interactive` was NOT called at all
    pub fn assert_interactive_not_called(&self) {
        let calls = self.get_interactive_calls();
        assert!(
            calls.is_empty(),
            "Expected no run_interactive calls but got: {calls:?}"
        );
    }
}

impl Default for MockCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for MockCommandRunner {
    fn which(&self, program: &str) -> Option<PathBuf> {
        self.which_calls.lock().unwrap().push(program.to_string());
        self.which_results.lock().unwrap().get(program).cloned()
    }

    async fn run_interactive(&self, request: &CommandRequest) -> Result<CommandStatus> {
        self.interactive_calls.lock().unwrap().push(request.clone());

        // Check for injected error
        if let Some(msg) = self.error_on_interactive.lock().unwrap().as_ref() {
            return Err(Error::CommandFailed(msg.clone()));
        }

        let responses = self.interactive_responses.lock().unwrap();
        responses.get(&request.program).copied().ok_or_else(|| {
            Error::Internal(format!(
                "run_interactive: no response configured for '{}'",
                request.program
            ))
        })
    }

    async fn run_captured(&self, request: &CommandRequest) -> Result<CommandOutput> {
        self.captured_calls.lock().unwrap().push(request.clone());

        // Check for injected error
        if let Some(msg) = self.error_on_captured.lock().unwrap().as_ref() {
            return Err(Error::CommandFailed(msg.clone()));
        }

        let responses = self.captured_responses.lock().unwrap();
        responses.get(&request.program).cloned().ok_or_else(|| {
            Error::Internal(format!(
                "run_captured: no response configured for '{}'",
                request.program
            ))
        })
    }
}
