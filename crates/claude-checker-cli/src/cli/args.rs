use clap::Parser;

const OPTIONS_HELP: &str = "\
Arguments:
  [prompt]                 Initial prompt to start evaluation (default: \"Please execute judgment\")

Options:
  --claude-md <path>       Path to CLAUDE.md (default: ~/.claude/CLAUDE.md)
  --source <user|project>  Setting source to test (default: user)
  --model <model>          Judge model: opus, sonnet, haiku (default: opus)
  --preferences <file>     Custom preferences JSON file
  --tasks <n>              Tasks per preference (default: 3)
  --print-prompt           Print the judge system prompt and exit
  --help, -h               Show this help

Examples:
  claude-checker \"Please execute judgment\"     # Start with custom prompt
  claude-checker --source project              # Test as project-level settings
  claude-checker \"Begin\" --model sonnet        # Use Sonnet (cheaper) as judge
  claude-checker --preferences prefs.json      # Use custom preferences

Set RUST_LOG=debug for harness diagnostics on stderr.";

/// Argv capture. Tokens are interpreted by `claude_checker_core::ParsedArgs`
/// so unknown flags are tolerated instead of rejected.
///
/// clap still treats the first bare `--` as its end-of-options marker and
/// drops it, so `ParsedArgs` never sees that token. Everything after it is
/// passed through unchanged.
#[derive(Parser, Debug)]
#[command(
    name = "claude-checker",
    about = "Test your CLAUDE.md behavioral compliance with an isolated judge",
    override_usage = "claude-checker [prompt] [options]",
    after_help = OPTIONS_HELP,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    #[arg(
        value_name = "TOKENS",
        num_args = 0..,
        allow_hyphen_values = true,
        trailing_var_arg = true,
        hide = true
    )]
    pub tokens: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use claude_checker_core::ParsedArgs;

    #[test]
    fn cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_are_captured_as_tokens() {
        let cli = Cli::try_parse_from([
            "claude-checker",
            "--source",
            "project",
            "--unknown",
            "-h",
            "Begin",
        ])
        .expect("parse should succeed");
        assert_eq!(
            cli.tokens,
            vec!["--source", "project", "--unknown", "-h", "Begin"]
        );

        let args = ParsedArgs::parse(cli.tokens);
        assert_eq!(args.flag("unknown"), Some("-h"));
        assert!(!args.wants_help());
        assert_eq!(args.flag("source"), Some("project"));
        assert_eq!(args.positional(), ["Begin"]);
    }

    #[test]
    fn short_help_after_positional_is_captured() {
        let cli = Cli::try_parse_from([
            "claude-checker",
            "--source",
            "project",
            "Begin",
            "-h",
            "--unknown",
        ])
        .expect("parse should succeed");
        assert_eq!(
            cli.tokens,
            vec!["--source", "project", "Begin", "-h", "--unknown"]
        );

        let args = ParsedArgs::parse(cli.tokens);
        assert!(args.wants_help());
        assert_eq!(args.flag("unknown"), Some("true"));
        assert_eq!(args.positional(), ["Begin"]);
    }

    #[test]
    fn bare_double_dash_is_dropped_before_token_parsing() {
        let cli = Cli::try_parse_from(["claude-checker", "--", "--source", "project"])
            .expect("parse should succeed");
        assert_eq!(cli.tokens, vec!["--source", "project"]);

        let args = ParsedArgs::parse(cli.tokens);
        assert_eq!(args.flag("source"), Some("project"));
        assert_eq!(args.flag(""), None);
    }

    #[test]
    fn empty_argv_is_accepted() {
        let cli = Cli::try_parse_from(["claude-checker"]).expect("parse should succeed");
        assert!(cli.tokens.is_empty());
    }

    #[test]
    fn help_text_lists_every_option() {
        let help = Cli::command().render_help().to_string();
        for flag in [
            "--claude-md",
            "--source",
            "--model",
            "--preferences",
            "--tasks",
            "--print-prompt",
        ] {
            assert!(help.contains(flag), "help is missing {flag}");
        }
    }
}
