//! Raw token parsing for the checker front-end.
//!
//! Tokens are split into flags and positionals without knowing which flags
//! exist. Unknown flags are kept and simply never read.

use std::collections::BTreeMap;

/// Value stored for a flag that was given without a value.
pub const FLAG_SET: &str = "true";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    flags: BTreeMap<String, String>,
    positional: Vec<String>,
}

impl ParsedArgs {
    /// Parse a token list (program name excluded).
    ///
    /// - `--some-flag value` stores `value` under `someflag` (every `-` is
    ///   dropped from the key).
    /// - `--flag` followed by another `--` token, an empty token, or nothing
    ///   is a boolean flag.
    /// - `-x` (exactly two characters) is always a boolean flag.
    /// - anything else is positional.
    pub fn parse<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        let mut parsed = ParsedArgs::default();
        let mut i = 0;

        while i < tokens.len() {
            let token = &tokens[i];
            if let Some(name) = token.strip_prefix("--") {
                let key = name.replace('-', "");
                match tokens.get(i + 1) {
                    Some(next) if !next.is_empty() && !next.starts_with("--") => {
                        parsed.flags.insert(key, next.clone());
                        i += 1;
                    }
                    _ => {
                        parsed.flags.insert(key, FLAG_SET.to_string());
                    }
                }
            } else if token.starts_with('-') && token.chars().count() == 2 {
                parsed.flags.insert(token[1..].to_string(), FLAG_SET.to_string());
            } else {
                parsed.positional.push(token.clone());
            }
            i += 1;
        }

        parsed
    }

    pub fn flag(&self, key: &str) -> Option<&str> {
        self.flags.get(key).map(String::as_str)
    }

    /// True when the flag was given at all, with or without a value.
    pub fn has_flag(&self, key: &str) -> bool {
        self.flags.contains_key(key)
    }

    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    pub fn wants_help(&self) -> bool {
        self.has_flag("help") || self.has_flag("h")
    }

    pub fn flags(&self) -> impl Iterator<Item = (&str, &str)> {
        self.flags.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
