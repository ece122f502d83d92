//! Exit codes of the `claude-checker` binary.
//! A judge's own exit code is forwarded verbatim and may overlap these.

pub const SUCCESS: i32 = 0;
pub const CONFIG_ERROR: i32 = 1; // Missing CLAUDE.md, bad preferences file, bad flag value
pub const INTERNAL_ERROR: i32 = 2; // Judge could not be started, or unexpected failure

/// Offset added to a terminating signal number, as shells report it.
pub const SIGNAL_BASE: i32 = 128;
