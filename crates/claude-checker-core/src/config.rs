//! Resolves parsed tokens into a validated [`TestConfig`].

use crate::args::ParsedArgs;
use crate::errors::ConfigurationError;
use crate::preferences::PreferenceSource;
use std::fmt;
use std::num::NonZeroU32;
use std::path::{Component, Path, PathBuf};

pub const DEFAULT_INITIAL_PROMPT: &str = "Please execute judgment";
pub const DEFAULT_MODEL: &str = "opus";
pub const DEFAULT_TASKS_PER_PREFERENCE: NonZeroU32 = match NonZeroU32::new(3) {
    Some(n) => n,
    None => unreachable!(),
};

/// Which configuration scope the document under test represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingSource {
    #[default]
    User,
    Project,
}

impl SettingSource {
    pub fn parse(value: &str) -> Result<Self, ConfigurationError> {
        match value.to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "project" => Ok(Self::Project),
            _ => Err(ConfigurationError::UnknownSettingSource {
                value: value.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Project => "project",
        }
    }

    /// Human description of where a document of this scope normally lives.
    pub fn scope_hint(&self) -> &'static str {
        match self {
            Self::User => "user-level instructions, normally ~/.claude/CLAUDE.md",
            Self::Project => "project-level instructions, normally ./.claude/CLAUDE.md",
        }
    }
}

impl fmt::Display for SettingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated run configuration. `document_path` is absolute and pointed at
/// an existing file when this was built by [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestConfig {
    pub document_path: PathBuf,
    pub setting_source: SettingSource,
    pub model: String,
    pub tasks_per_preference: NonZeroU32,
}

/// Everything the front-end decided, ready for the loader and launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRun {
    pub config: TestConfig,
    pub initial_prompt: String,
    pub preference_source: PreferenceSource,
    pub print_prompt: bool,
}

/// Environment-derived defaults injected into [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverDefaults {
    /// Used when no `--claude-md` flag is given.
    pub document_path: PathBuf,
    /// Base for relative paths.
    pub working_dir: PathBuf,
}

impl ResolverDefaults {
    pub fn new(home: impl AsRef<Path>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            document_path: home.as_ref().join(".claude").join("CLAUDE.md"),
            working_dir: working_dir.into(),
        }
    }

    /// Build defaults from the invoking user's home and the process cwd.
    pub fn detect() -> Result<Self, ConfigurationError> {
        let home = dirs::home_dir().ok_or(ConfigurationError::NoHomeDirectory)?;
        let cwd = std::env::current_dir().map_err(ConfigurationError::WorkingDirectory)?;
        Ok(Self::new(home, cwd))
    }
}

/// Turn parsed tokens into a [`ResolvedRun`].
///
/// The document check runs first: a missing document fails the run before
/// any other flag is interpreted.
pub fn resolve(
    args: &ParsedArgs,
    defaults: &ResolverDefaults,
) -> Result<ResolvedRun, ConfigurationError> {
    let raw_path = args
        .flag("claudemd")
        .map(PathBuf::from)
        .unwrap_or_else(|| defaults.document_path.clone());
    let document_path = absolutize(&raw_path, &defaults.working_dir);

    let is_file = std::fs::metadata(&document_path)
        .map(|m| m.is_file())
        .unwrap_or(false);
    if !is_file {
        return Err(ConfigurationError::DocumentNotFound {
            path: document_path,
        });
    }

    let setting_source = match args.flag("source") {
        Some(value) => SettingSource::parse(value)?,
        None => SettingSource::default(),
    };

    let model = args.flag("model").unwrap_or(DEFAULT_MODEL).to_string();

    let tasks_per_preference = match args.flag("tasks") {
        None => DEFAULT_TASKS_PER_PREFERENCE,
        Some(raw) => match raw.trim().parse::<NonZeroU32>() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    value = raw,
                    fallback = DEFAULT_TASKS_PER_PREFERENCE.get(),
                    "--tasks is not a positive integer, using default"
                );
                DEFAULT_TASKS_PER_PREFERENCE
            }
        },
    };

    let preference_source = match args.flag("preferences") {
        Some(path) => PreferenceSource::File(absolutize(Path::new(path), &defaults.working_dir)),
        None => PreferenceSource::Builtin,
    };

    let initial_prompt = args
        .positional()
        .first()
        .filter(|p| !p.is_empty())
        .cloned()
        .unwrap_or_else(|| DEFAULT_INITIAL_PROMPT.to_string());

    Ok(ResolvedRun {
        config: TestConfig {
            document_path,
            setting_source,
            model,
            tasks_per_preference,
        },
        initial_prompt,
        preference_source,
        print_prompt: args.has_flag("printprompt"),
    })
}

/// Join `path` onto `base` when relative and drop `.`/`..` lexically.
/// Symlinks are not followed, so a missing file still gets a stable path.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Popping past the root leaves the root in place.
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
