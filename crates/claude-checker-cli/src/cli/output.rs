//! Console messages. Everything goes to stderr so the judge owns stdout.

use claude_checker_core::{ConfigurationError, PreparedRun};

const RULE_WIDTH: usize = 55;

pub fn print_banner(prepared: &PreparedRun) {
    let config = &prepared.resolved.config;
    let rule = "━".repeat(RULE_WIDTH);
    eprintln!("claude-checker - CLAUDE.md Behavioral Compliance Tester");
    eprintln!("{rule}");
    eprintln!("CLAUDE.md:      {}", config.document_path.display());
    eprintln!("Setting source: {}", config.setting_source);
    eprintln!("Judge model:    {}", config.model);
    eprintln!(
        "Preferences:    {} ({})",
        prepared.preferences.len(),
        prepared.resolved.preference_source
    );
    eprintln!("Tasks each:     {}", config.tasks_per_preference);
    eprintln!("{rule}");
    eprintln!();
    eprintln!("Spawning ISOLATED judge (no settings, no MCP)...");
    eprintln!();
}

pub fn print_configuration_error(err: &ConfigurationError) {
    eprintln!("error: {err}");
    match err {
        ConfigurationError::DocumentNotFound { .. } => {
            eprintln!();
            eprintln!("Either create it or specify a different path with --claude-md");
        }
        ConfigurationError::InvalidPreferenceSource { .. } => {
            eprintln!();
            eprintln!(
                "Expected JSON like {{\"preferences\": [{{\"name\": \"...\", \"description\": \"...\"}}]}}"
            );
        }
        _ => {}
    }
}
