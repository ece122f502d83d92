//! Binary contract: exit codes, judge argv and isolation flags.
//! A fake `claude` script placed first on PATH records what it was given.
#![cfg(unix)]
#![allow(deprecated)]

use assert_cmd::Command;
use claude_checker_core::{compose, default_preferences, SettingSource};
use predicates::prelude::*;
use std::num::NonZeroU32;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FAKE_JUDGE: &str = r#"#!/bin/sh
: > "$FAKE_JUDGE_ARGV"
for a in "$@"; do
  printf '%s\0' "$a" >> "$FAKE_JUDGE_ARGV"
done
exit "${FAKE_JUDGE_EXIT:-0}"
"#;

struct Sandbox {
    home: TempDir,
    bin: TempDir,
    work: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let sandbox = Self {
            home: TempDir::new().unwrap(),
            bin: TempDir::new().unwrap(),
            work: TempDir::new().unwrap(),
        };
        let judge = sandbox.bin.path().join("claude");
        std::fs::write(&judge, FAKE_JUDGE).unwrap();
        std::fs::set_permissions(&judge, std::fs::Permissions::from_mode(0o755)).unwrap();
        sandbox
    }

    fn with_document(self) -> Self {
        std::fs::create_dir_all(self.home.path().join(".claude")).unwrap();
        std::fs::write(self.document(), "- Always ask before deleting files.\n").unwrap();
        self
    }

    fn document(&self) -> PathBuf {
        self.home.path().join(".claude").join("CLAUDE.md")
    }

    fn argv_file(&self) -> PathBuf {
        self.work.path().join("argv.bin")
    }

    fn cmd(&self, exit: i32) -> Command {
        let path = std::env::var("PATH").unwrap_or_default();
        let mut cmd = Command::cargo_bin("claude-checker").unwrap();
        cmd.current_dir(self.work.path())
            .env("HOME", self.home.path())
            .env("PATH", format!("{}:{}", self.bin.path().display(), path))
            .env("FAKE_JUDGE_ARGV", self.argv_file())
            .env("FAKE_JUDGE_EXIT", exit.to_string())
            .env_remove("RUST_LOG");
        cmd
    }

    fn recorded_argv(&self) -> Option<Vec<String>> {
        read_argv(&self.argv_file())
    }
}

fn read_argv(path: &Path) -> Option<Vec<String>> {
    let raw = std::fs::read(path).ok()?;
    Some(
        raw.split(|b| *b == 0)
            .filter(|s| !s.is_empty())
            .map(|s| String::from_utf8(s.to_vec()).unwrap())
            .collect(),
    )
}

#[test]
fn missing_default_document_exits_1_without_spawning() {
    let sb = Sandbox::new();

    sb.cmd(0)
        .args(["--source", "project", "--tasks", "5"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("CLAUDE.md not found"))
        .stderr(predicate::str::contains(sb.document().display().to_string()));

    assert!(sb.recorded_argv().is_none(), "judge must not be spawned");
}

#[test]
fn judge_gets_isolated_argv_and_exit_code_is_forwarded() {
    let sb = Sandbox::new().with_document();

    sb.cmd(0)
        .args(["Begin", "--model", "sonnet"])
        .assert()
        .code(0)
        .stderr(predicate::str::contains("Spawning ISOLATED judge"));

    let expected_prompt = compose(
        &default_preferences(),
        &sb.document(),
        SettingSource::User,
        NonZeroU32::new(3).unwrap(),
    );
    // The empty `--setting-sources` value is dropped by the NUL split, so
    // compare around it.
    let argv = sb.recorded_argv().expect("judge was not spawned");
    assert_eq!(
        argv,
        vec![
            "Begin".to_string(),
            "--model".into(),
            "sonnet".into(),
            "--setting-sources".into(),
            "--strict-mcp-config".into(),
            "--mcp-config".into(),
            r#"{"mcpServers":{}}"#.into(),
            "--system-prompt".into(),
            expected_prompt,
        ]
    );
    let raw = std::fs::read(sb.argv_file()).unwrap();
    assert!(
        raw.windows(19).any(|w| w == b"--setting-sources\0\0"),
        "--setting-sources must be followed by an empty value"
    );
}

#[test]
fn judge_exit_status_3_is_propagated() {
    let sb = Sandbox::new().with_document();
    sb.cmd(3).assert().code(3);
    assert!(sb.recorded_argv().is_some());
}

#[test]
fn default_prompt_is_used_without_positional() {
    let sb = Sandbox::new().with_document();
    sb.cmd(0).assert().success();
    let argv = sb.recorded_argv().unwrap();
    assert_eq!(argv[0], "Please execute judgment");
    assert_eq!(argv[2], "opus");
}

#[test]
fn relative_claude_md_is_passed_as_absolute_path() {
    let sb = Sandbox::new();
    std::fs::write(sb.work.path().join("RULES.md"), "- Use tabs.\n").unwrap();

    sb.cmd(0)
        .args(["--claude-md", "RULES.md"])
        .assert()
        .success();

    let argv = sb.recorded_argv().unwrap();
    let prompt = argv.last().unwrap();
    let absolute = sb.work.path().join("RULES.md");
    assert!(prompt.contains(&format!("- Path: {}", absolute.display())));
}

#[test]
fn invalid_preferences_file_exits_1_without_spawning() {
    let sb = Sandbox::new().with_document();
    std::fs::write(sb.work.path().join("prefs.json"), r#"{"items": []}"#).unwrap();

    sb.cmd(0)
        .args(["--preferences", "prefs.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid preferences file"));

    assert!(sb.recorded_argv().is_none());
}

#[test]
fn help_exits_0_without_spawning() {
    let sb = Sandbox::new();
    sb.cmd(0)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--claude-md"));
    assert!(sb.recorded_argv().is_none());
}

#[test]
fn print_prompt_writes_composed_prompt_to_stdout() {
    let sb = Sandbox::new().with_document();
    let expected = compose(
        &default_preferences(),
        &sb.document(),
        SettingSource::Project,
        NonZeroU32::new(2).unwrap(),
    );

    sb.cmd(0)
        .args(["--print-prompt", "--source", "project", "--tasks", "2"])
        .assert()
        .success()
        .stdout(format!("{expected}\n"));
    assert!(sb.recorded_argv().is_none());
}

#[test]
fn missing_judge_binary_is_a_launch_failure() {
    let sb = Sandbox::new().with_document();
    std::fs::remove_file(sb.bin.path().join("claude")).unwrap();

    sb.cmd(0)
        .env("PATH", sb.bin.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to start judge 'claude'"));
}
