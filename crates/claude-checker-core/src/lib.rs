//! Harness for CLAUDE.md behavioral compliance checks.
//!
//! A judge model is started as an isolated child process (no inherited
//! settings, strict empty MCP config) with a system prompt that tells it how
//! to probe each preference. The judge's exit code becomes ours.

pub mod args;
pub mod config;
pub mod errors;
pub mod exit_codes;
pub mod harness;
pub mod launcher;
pub mod preferences;
pub mod prompt;

pub use args::ParsedArgs;
pub use config::{resolve, ResolvedRun, ResolverDefaults, SettingSource, TestConfig};
pub use errors::{CheckError, ConfigurationError, LaunchError};
pub use harness::{prepare, Harness, Outcome, PreparedRun};
pub use launcher::{
    Isolation, JudgeExit, JudgeInvocation, JudgeRunner, McpConfig, ProcessJudgeRunner,
    JUDGE_PROGRAM,
};
pub use preferences::{default_preferences, load_preferences, Preference, PreferenceSource};
pub use prompt::compose;
