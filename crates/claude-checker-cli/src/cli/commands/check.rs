use crate::cli::args::Cli;
use crate::cli::output;
use clap::CommandFactory;
use claude_checker_core::{
    exit_codes, CheckError, Harness, Outcome, ParsedArgs, ProcessJudgeRunner, ResolverDefaults,
};

/// Run one compliance check and return the process exit code.
pub fn run(cli: Cli) -> anyhow::Result<i32> {
    let args = ParsedArgs::parse(cli.tokens);
    for (flag, value) in args.flags() {
        tracing::debug!(flag, value, "parsed flag");
    }
    if args.wants_help() {
        Cli::command().print_help()?;
        return Ok(exit_codes::SUCCESS);
    }

    let defaults = match ResolverDefaults::detect() {
        Ok(defaults) => defaults,
        Err(e) => {
            output::print_configuration_error(&e);
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };

    let harness = Harness::new(ProcessJudgeRunner);
    match harness.run(&args, &defaults, output::print_banner) {
        Ok(Outcome::PromptOnly(prepared)) => {
            println!("{}", prepared.invocation.system_prompt());
            Ok(exit_codes::SUCCESS)
        }
        Ok(outcome) => Ok(outcome.exit_code()),
        Err(CheckError::Configuration(e)) => {
            output::print_configuration_error(&e);
            Ok(exit_codes::CONFIG_ERROR)
        }
        Err(e @ CheckError::Launch(_)) => {
            eprintln!("error: {e}");
            eprintln!("Is the `claude` CLI installed and on PATH?");
            Ok(e.exit_code())
        }
    }
}
