//! Argument vector construction for `cwctl`.
//!
//! A [`CommandDescriptor`] always serializes in the same order regardless of
//! the order the builder methods were called in:
//!
//! ```text
//! <executable> <global flags> <sub-command> <options> <positional args>
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

/// Global flag asking cwctl for JSON output.
pub const JSON_FLAG: &str = "--json";
/// Global flag telling cwctl to skip TLS verification.
pub const INSECURE_FLAG: &str = "--insecure";

/// An immutable, fully assembled cwctl invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    executable: PathBuf,
    global_flags: Vec<String>,
    subcommand: Vec<String>,
    options: Vec<(String, Option<String>)>,
    args: Vec<String>,
}

impl CommandDescriptor {
    pub fn builder(executable: impl Into<PathBuf>) -> CommandBuilder {
        CommandBuilder::new(executable)
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn global_flags(&self) -> &[String] {
        &self.global_flags
    }

    pub fn subcommand(&self) -> &[String] {
        &self.subcommand
    }

    /// Value of an option flag, if present with a value.
    pub fn option(&self, flag: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|(name, _)| name == flag)
            .and_then(|(_, value)| value.as_deref())
    }

    pub fn has_option(&self, flag: &str) -> bool {
        self.options.iter().any(|(name, _)| name == flag)
    }

    pub fn positional_args(&self) -> &[String] {
        &self.args
    }

    /// Arguments to pass after the executable, in fixed order.
    pub fn to_args(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(
            self.global_flags.len() + self.subcommand.len() + self.options.len() * 2 + self.args.len(),
        );
        out.extend(self.global_flags.iter().cloned());
        out.extend(self.subcommand.iter().cloned());
        for (flag, value) in &self.options {
            out.push(flag.clone());
            if let Some(value) = value {
                out.push(value.clone());
            }
        }
        out.extend(self.args.iter().cloned());
        out
    }

    /// Sub-command path joined with spaces, e.g. `templates repos list`.
    pub fn subcommand_display(&self) -> String {
        self.subcommand.join(" ")
    }
}

impl fmt::Display for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args = self.to_args();
        write!(
            f,
            "{}",
            cw_core::process::display_command(&self.executable, &args)
        )
    }
}

/// Fluent builder for [`CommandDescriptor`].
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    executable: PathBuf,
    global_flags: Vec<String>,
    subcommand: Vec<String>,
    options: Vec<(String, Option<String>)>,
    args: Vec<String>,
}

impl CommandBuilder {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            global_flags: Vec::new(),
            subcommand: Vec::new(),
            options: Vec::new(),
            args: Vec::new(),
        }
    }

    pub fn global_flag(mut self, flag: impl Into<String>) -> Self {
        self.global_flags.push(flag.into());
        self
    }

    /// Append sub-command tokens, e.g. `["templates", "repos", "list"]`.
    pub fn subcommand<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subcommand.extend(tokens.into_iter().map(Into::into));
        self
    }

    /// Option flag followed by its value.
    pub fn option(mut self, flag: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push((flag.into(), Some(value.into())));
        self
    }

    /// Option flag with a value only when `value` is `Some`.
    pub fn option_if<V: Into<String>>(self, flag: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.option(flag, value),
            None => self,
        }
    }

    /// Valueless option flag, e.g. `--showEnabledOnly`.
    pub fn flag(mut self, flag: impl Into<String>) -> Self {
        self.options.push((flag.into(), None));
        self
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> CommandDescriptor {
        CommandDescriptor {
            executable: self.executable,
            global_flags: self.global_flags,
            subcommand: self.subcommand,
            options: self.options,
            args: self.args,
        }
    }
}
