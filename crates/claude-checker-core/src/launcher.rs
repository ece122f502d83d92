//! Judge process construction and launch.
//!
//! Isolation is an explicit value, not environment scrubbing: the judge is
//! told on its command line to load no setting sources and to use exactly
//! the (empty) MCP server set it is given, with strict enforcement.

use crate::errors::LaunchError;
use crate::exit_codes;
use serde::Serialize;
use std::collections::BTreeMap;
use std::process::{Command, ExitStatus, Stdio};

/// Program name of the judge.
pub const JUDGE_PROGRAM: &str = "claude";

/// MCP configuration payload handed to the judge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct McpConfig {
    #[serde(rename = "mcpServers")]
    mcp_servers: BTreeMap<String, serde_json::Value>,
}

impl McpConfig {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn to_json(&self) -> Result<String, LaunchError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Everything the judge must not inherit. Only [`Isolation::sealed`] builds
/// one, so there is no advisory or partially isolated variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Isolation {
    setting_sources: Vec<String>,
    mcp_config: McpConfig,
    strict_mcp_config: bool,
}

impl Isolation {
    pub fn sealed() -> Self {
        Self {
            setting_sources: Vec::new(),
            mcp_config: McpConfig::empty(),
            strict_mcp_config: true,
        }
    }

    pub fn setting_sources(&self) -> &[String] {
        &self.setting_sources
    }

    pub fn mcp_config(&self) -> &McpConfig {
        &self.mcp_config
    }

    pub fn is_strict(&self) -> bool {
        self.strict_mcp_config
    }
}

/// A judge process about to be started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgeInvocation {
    program: String,
    initial_prompt: String,
    model: String,
    system_prompt: String,
    isolation: Isolation,
}

impl JudgeInvocation {
    pub fn new(
        initial_prompt: impl Into<String>,
        model: impl Into<String>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            program: JUDGE_PROGRAM.to_string(),
            initial_prompt: initial_prompt.into(),
            model: model.into(),
            system_prompt: system_prompt.into(),
            isolation: Isolation::sealed(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn isolation(&self) -> &Isolation {
        &self.isolation
    }

    /// Argument vector, in the exact order the judge expects.
    pub fn args(&self) -> Result<Vec<String>, LaunchError> {
        let mut args = vec![
            self.initial_prompt.clone(),
            "--model".to_string(),
            self.model.clone(),
            "--setting-sources".to_string(),
            self.isolation.setting_sources.join(","),
        ];
        if self.isolation.strict_mcp_config {
            args.push("--strict-mcp-config".to_string());
        }
        args.push("--mcp-config".to_string());
        args.push(self.isolation.mcp_config.to_json()?);
        args.push("--system-prompt".to_string());
        args.push(self.system_prompt.clone());
        Ok(args)
    }
}

/// How the judge process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JudgeExit {
    Code(i32),
    /// Killed by this signal number (Unix).
    Signal(i32),
}

impl JudgeExit {
    /// Exit code the harness terminates with: the judge's own code, or
    /// `128 + signal` when it was killed.
    pub fn exit_code(self) -> i32 {
        match self {
            JudgeExit::Code(code) => code,
            JudgeExit::Signal(signal) => exit_codes::SIGNAL_BASE + signal,
        }
    }

    pub fn success(self) -> bool {
        self == JudgeExit::Code(exit_codes::SUCCESS)
    }
}

impl From<ExitStatus> for JudgeExit {
    fn from(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return JudgeExit::Code(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return JudgeExit::Signal(signal);
            }
        }
        JudgeExit::Code(exit_codes::INTERNAL_ERROR)
    }
}

/// Starts a judge and blocks until it exits.
pub trait JudgeRunner {
    fn run(&self, invocation: &JudgeInvocation) -> Result<JudgeExit, LaunchError>;
}

/// Runs the judge as a real child process sharing this process's stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessJudgeRunner;

impl JudgeRunner for ProcessJudgeRunner {
    fn run(&self, invocation: &JudgeInvocation) -> Result<JudgeExit, LaunchError> {
        let args = invocation.args()?;
        tracing::debug!(
            program = invocation.program(),
            argc = args.len(),
            system_prompt_bytes = invocation.system_prompt().len(),
            "spawning judge"
        );

        let status = Command::new(invocation.program())
            .args(&args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| LaunchError::Spawn {
                program: invocation.program().to_string(),
                source,
            })?;

        let exit = JudgeExit::from(status);
        tracing::info!(?exit, "judge exited");
        Ok(exit)
    }
}
