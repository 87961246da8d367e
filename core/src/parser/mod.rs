//! Command-line parsing.
//!
//! Parsing runs as a single pass over the argument list:
//!
//! 1. global options are scanned;
//! 2. in command mode, the leading command tokens are resolved to a leaf,
//!    then options are scanned again over the leaf's options and the global
//!    ones, so global options may appear before or after the command name;
//! 3. the remaining tokens are bound to the positional arguments of the
//!    scope.
//!
//! A `--help` seen by either option scan stops the parse before any argument
//! is bound. Every failure carries the usage scope of the deepest command
//! resolved so far.

mod arguments;
mod command;
mod options;

use tracing::debug;

use crate::error::{ParseError, ParseFailure};
use crate::program::Program;
use crate::types::OptionSet;
use crate::usage::UsageScope;

pub use options::{SEPARATOR, is_long_option, is_option, is_short_option};

use arguments::bind_arguments;
use command::resolve_command;
use options::scan_options;

/// Name of the reserved help command.
pub const HELP_COMMAND: &str = "help";

/// What the caller should do after a successful parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Run the selected entry point.
    Run,
    /// Print the usage text of this scope and exit successfully.
    Help(UsageScope),
}

impl Program {
    /// Parses `args` (without the program name) against the declarations.
    ///
    /// A program can only be parsed once: parse state is stored in the
    /// definitions and is never reset.
    ///
    /// `--` ends option scanning. When it is the first positional token it is
    /// dropped, so `-- -v` binds `-v` as an argument; any later `--` is bound
    /// as a plain value.
    ///
    /// # Examples
    ///
    /// ```
    /// use program_core::{MainResult, Outcome, ParseError, Program, UsageScope};
    ///
    /// fn noop(_: &Program) -> MainResult {
    ///     Ok(())
    /// }
    ///
    /// let mut p = Program::new("tool", "");
    /// p.add_command("foo create", "", noop).unwrap();
    /// p.add_command("foo delete", "", noop).unwrap();
    ///
    /// let failure = p.parse(["foo"]).unwrap_err();
    /// assert_eq!(failure.error, ParseError::MissingSubcommand("foo".into()));
    ///
    /// let mut p = Program::new("tool", "");
    /// p.add_command("bar", "", noop).unwrap();
    /// assert_eq!(p.parse(["--help", "bar"]), Ok(Outcome::Help(UsageScope::Root)));
    /// ```
    pub fn parse<I, S>(&mut self, args: I) -> Result<Outcome, ParseFailure>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let root_scope = self.root_scope();

        if self.parsed {
            return Err(ParseFailure::new(ParseError::AlreadyParsed, root_scope));
        }
        self.parsed = true;

        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        debug!(program = %self.name, args = ?args, "Parsing command line");

        let rest = scan_options(&args, &mut [&mut self.options])
            .map_err(|error| ParseFailure::new(error, root_scope))?;

        if help_requested(&self.options) {
            debug!("Help requested before command");
            return Ok(Outcome::Help(root_scope));
        }

        let scope = match self.commands.as_mut() {
            None => {
                bind_arguments(rest, self.arguments.as_mut_slice())
                    .map_err(|error| ParseFailure::new(error, root_scope))?;
                root_scope
            }
            Some(tree) => {
                let (id, rest) = resolve_command(tree, rest)?;
                self.selected = Some(id);

                let scope = UsageScope::Command(id);
                let fail = |error: ParseError| ParseFailure::new(error, scope);

                let node = tree.node_mut(id);
                let rest = match node.options_mut() {
                    Some(options) => scan_options(rest, &mut [options, &mut self.options]),
                    None => scan_options(rest, &mut [&mut self.options]),
                }
                .map_err(fail)?;

                if help_requested(&self.options) {
                    debug!(command = %node.full_name, "Help requested for command");
                    return Ok(Outcome::Help(scope));
                }

                if let Some(arguments) = node.arguments_mut() {
                    bind_arguments(rest, arguments.as_mut_slice()).map_err(fail)?;
                }

                scope
            }
        };

        self.apply_reserved_options()
            .map_err(|error| ParseFailure::new(error, scope))?;

        if self.command_full_name() == Some(HELP_COMMAND) {
            let target = self
                .help_target()
                .map_err(|error| ParseFailure::new(error, root_scope))?;
            return Ok(Outcome::Help(target));
        }

        Ok(Outcome::Run)
    }

    fn apply_reserved_options(&mut self) -> Result<(), ParseError> {
        self.quiet = self.options.get("quiet").is_some_and(|option| option.is_set);

        if let Some(debug) = self.options.get("debug").filter(|option| option.is_set) {
            let value = debug.effective_value();
            self.debug_level = value
                .parse::<u32>()
                .ok()
                .filter(|&level| level <= i32::MAX as u32)
                .ok_or_else(|| ParseError::InvalidDebugLevel(value.to_string()))?;
        }

        Ok(())
    }
}

fn help_requested(options: &OptionSet) -> bool {
    options.get("help").is_some_and(|option| option.is_set)
}
