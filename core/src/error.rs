//! Error types for program declaration, command-line parsing and value
//! conversion.
//!
//! Declaration mistakes ([`DeclarationError`]) and bad invocations
//! ([`ParseError`]) travel through separate types: the first is a bug in the
//! program being built, the second is a user typing the wrong thing.

use std::fmt;

use thiserror::Error;

use crate::usage::UsageScope;

/// Errors raised while declaring options, arguments and commands.
///
/// These describe programming mistakes and are expected to surface during
/// development, typically by propagating them out of `main` with `?`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    /// An option has neither a short nor a long name.
    #[error("option has no short or long name")]
    MissingOptionName,
    /// Short option names cannot be a dash or whitespace.
    #[error("invalid short option name {0:?}")]
    InvalidShortName(char),
    /// Long option names need two or more characters, no leading dash and no
    /// whitespace.
    #[error("invalid long option name {0:?}")]
    InvalidLongName(String),
    /// The name is already used in the same scope or by a global option.
    #[error("duplicate option name {0:?}")]
    DuplicateOption(String),
    /// An argument has an empty name.
    #[error("empty argument name")]
    EmptyArgumentName,
    /// Two arguments of the same scope share a name.
    #[error("duplicate argument name {0:?}")]
    DuplicateArgument(String),
    /// A mandatory argument was declared after an optional one.
    #[error("cannot add non-optional argument after optional argument")]
    MandatoryAfterOptional,
    /// An argument was declared after the trailing argument.
    #[error("cannot add argument after trailing argument")]
    ArgumentAfterTrailing,
    /// A second trailing argument was declared.
    #[error("cannot add multiple trailing arguments")]
    MultipleTrailingArguments,
    /// The command path is empty or whitespace-only.
    #[error("empty command name")]
    EmptyCommandName,
    /// The same command path was registered twice.
    #[error("duplicate command {0:?}")]
    DuplicateCommand(String),
    /// A leaf was registered on a path that is already a group.
    #[error("command {0:?} has subcommands")]
    CommandHasSubcommands(String),
    /// A path goes through an existing leaf command.
    #[error("command {0:?} cannot be used as a group")]
    CommandNotGroup(String),
    /// Flat-mode and command-mode declarations were mixed.
    #[error("cannot have a main function with commands")]
    MainWithCommands,
    /// Top-level arguments were declared on a program with commands.
    #[error("cannot have top-level arguments with commands")]
    ArgumentsWithCommands,
    /// A flat-mode program was run without an entry point.
    #[error("missing main function")]
    MissingMain,
    /// A command-mode program was run before a command was selected.
    #[error("no command selected")]
    NoCommandSelected,
}

/// Errors caused by an invalid command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The option key matches no option of the active scope.
    #[error("unknown option {0:?}")]
    UnknownOption(String),
    /// A valued option was the last token.
    #[error("missing value for option {0:?}")]
    MissingOptionValue(String),
    /// No command token was given to a program with commands.
    #[error("missing command")]
    MissingCommand,
    /// The tokens do not name a known command.
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    /// The tokens name a group instead of a runnable command.
    #[error("missing subcommand(s) for command {0:?}")]
    MissingSubcommand(String),
    /// Fewer tokens than mandatory arguments.
    #[error("missing argument(s)")]
    MissingArguments,
    /// Tokens remain after every argument was bound.
    #[error("too many arguments")]
    TooManyArguments,
    /// Tokens were given to a scope without any argument.
    #[error("unexpected arguments")]
    UnexpectedArguments,
    /// The value of `--debug` is not an integer in `0..=i32::MAX`.
    #[error("invalid debug level {0:?}")]
    InvalidDebugLevel(String),
    /// The program has already consumed a command line.
    #[error("command line already parsed")]
    AlreadyParsed,
}

/// A [`ParseError`] paired with the usage scope to show alongside it.
///
/// The scope is the deepest command resolved before the failure, or the
/// program itself when resolution never started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error}")]
pub struct ParseFailure {
    /// What went wrong.
    pub error: ParseError,
    /// Which usage text to print.
    pub scope: UsageScope,
}

impl ParseFailure {
    pub(crate) fn new(error: ParseError, scope: UsageScope) -> Self {
        Self { error, scope }
    }
}

/// Where a converted value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    Option,
    Argument,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::Option => f.write_str("option"),
            ValueSource::Argument => f.write_str("argument"),
        }
    }
}

/// A raw option or argument value could not be converted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value {value:?} for {origin} {name:?}: {reason}")]
pub struct ValueError {
    pub origin: ValueSource,
    pub name: String,
    pub value: String,
    pub reason: String,
}

/// Convenience alias for declaration results.
pub type Result<T, E = DeclarationError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_messages() {
        assert_eq!(
            ParseError::UnknownOption("x".into()).to_string(),
            "unknown option \"x\""
        );
        assert_eq!(
            ParseError::MissingSubcommand("foo".into()).to_string(),
            "missing subcommand(s) for command \"foo\""
        );
        assert_eq!(ParseError::MissingArguments.to_string(), "missing argument(s)");
    }

    #[test]
    fn test_failure_displays_inner_error() {
        let failure = ParseFailure::new(ParseError::TooManyArguments, UsageScope::NoCommands);
        assert_eq!(failure.to_string(), "too many arguments");
    }

    #[test]
    fn test_value_error_message() {
        let err = ValueError {
            origin: ValueSource::Argument,
            name: "count".into(),
            value: "abc".into(),
            reason: "invalid digit found in string".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value \"abc\" for argument \"count\": invalid digit found in string"
        );
    }
}
