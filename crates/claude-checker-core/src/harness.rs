//! Runs one compliance check: resolve, load, compose, launch, propagate.

use crate::args::ParsedArgs;
use crate::config::{resolve, ResolvedRun, ResolverDefaults};
use crate::errors::{CheckError, ConfigurationError, LaunchError};
use crate::launcher::{JudgeExit, JudgeInvocation, JudgeRunner};
use crate::preferences::{load_preferences, Preference};
use crate::prompt::compose;

/// A fully validated run, with the judge invocation ready to start.
#[derive(Debug, Clone)]
pub struct PreparedRun {
    pub resolved: ResolvedRun,
    pub preferences: Vec<Preference>,
    pub invocation: JudgeInvocation,
}

/// What a harness run ended with.
#[derive(Debug)]
pub enum Outcome {
    /// `--help` / `-h` was given; nothing was resolved.
    Help,
    /// `--print-prompt` was given; the judge was not started.
    PromptOnly(PreparedRun),
    Judged { prepared: PreparedRun, exit: JudgeExit },
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Help | Outcome::PromptOnly(_) => crate::exit_codes::SUCCESS,
            Outcome::Judged { exit, .. } => exit.exit_code(),
        }
    }
}

/// Resolve the configuration, load preferences and build the invocation.
/// Performs no launch.
pub fn prepare(
    args: &ParsedArgs,
    defaults: &ResolverDefaults,
) -> Result<PreparedRun, ConfigurationError> {
    let resolved = resolve(args, defaults)?;
    tracing::debug!(
        document = %resolved.config.document_path.display(),
        source = %resolved.config.setting_source,
        model = %resolved.config.model,
        "configuration resolved"
    );

    let preferences = load_preferences(&resolved.preference_source)?;

    let system_prompt = compose(
        &preferences,
        &resolved.config.document_path,
        resolved.config.setting_source,
        resolved.config.tasks_per_preference,
    );
    let invocation = JudgeInvocation::new(
        resolved.initial_prompt.clone(),
        resolved.config.model.clone(),
        system_prompt,
    );

    Ok(PreparedRun {
        resolved,
        preferences,
        invocation,
    })
}

pub struct Harness<R> {
    runner: R,
}

impl<R: JudgeRunner> Harness<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Start the judge for `prepared` and wait for it. No retry.
    pub fn launch(&self, prepared: &PreparedRun) -> Result<JudgeExit, LaunchError> {
        tracing::info!(
            program = prepared.invocation.program(),
            model = prepared.invocation.model(),
            preferences = prepared.preferences.len(),
            "launching isolated judge"
        );
        self.runner.run(&prepared.invocation)
    }

    /// Full pipeline. `on_ready` sees the prepared run right before the
    /// judge is started and is not called on help or configuration errors.
    pub fn run<F>(
        &self,
        args: &ParsedArgs,
        defaults: &ResolverDefaults,
        on_ready: F,
    ) -> Result<Outcome, CheckError>
    where
        F: FnOnce(&PreparedRun),
    {
        if args.wants_help() {
            return Ok(Outcome::Help);
        }

        let prepared = prepare(args, defaults)?;
        if prepared.resolved.print_prompt {
            return Ok(Outcome::PromptOnly(prepared));
        }

        on_ready(&prepared);
        let exit = self.launch(&prepared)?;
        Ok(Outcome::Judged { prepared, exit })
    }
}
