//! Program declaration, accessors and the top-level driver.

use std::error::Error;
use std::fmt;
use std::io::{self, Write};
use std::process::ExitCode;

use tracing::debug;

use crate::command::{CommandId, CommandNode, CommandTree, split_command_name};
use crate::error::{DeclarationError, ParseError, ParseFailure, Result};
use crate::parser::Outcome;
use crate::types::{ArgumentDef, ArgumentList, OptionDef, OptionSet};
use crate::usage::UsageScope;

/// Result returned by entry points.
pub type MainResult = std::result::Result<(), Box<dyn Error>>;

/// Entry point of a flat-mode program or of a leaf command.
pub type Main = fn(&Program) -> MainResult;

/// A command-line program: declarations, parse state and entry points.
///
/// A program is either in flat mode (its own arguments and a single entry
/// point set with [`Program::set_main`]) or in command mode (a tree of
/// commands added with [`Program::add_command`]). Every program declares the
/// reserved options `-h/--help`, `-q/--quiet` and `--debug <level>`.
///
/// # Examples
///
/// ```
/// use program_core::{MainResult, Outcome, Program};
///
/// fn hello(p: &Program) -> MainResult {
///     println!("hello {}", p.argument_value("name"));
///     Ok(())
/// }
///
/// let mut p = Program::new("hello", "say hello");
/// p.add_flag(Some('l'), Some("loud"), "shout").unwrap();
/// p.add_argument("name", "who to greet").unwrap();
/// p.set_main(hello).unwrap();
///
/// assert_eq!(p.parse(["-l", "world"]), Ok(Outcome::Run));
/// assert!(p.is_option_set("loud"));
/// assert_eq!(p.argument_value("name"), "world");
/// ```
#[derive(Debug, Clone)]
pub struct Program {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) main: Option<Main>,

    pub(crate) options: OptionSet,
    pub(crate) arguments: ArgumentList,
    pub(crate) commands: Option<CommandTree>,

    pub(crate) selected: Option<CommandId>,
    pub(crate) parsed: bool,

    pub(crate) quiet: bool,
    pub(crate) debug_level: u32,
}

impl Program {
    pub fn new(name: &str, description: &str) -> Self {
        let mut program = Self {
            name: name.to_string(),
            description: description.to_string(),
            main: None,
            options: OptionSet::new(),
            arguments: ArgumentList::new(),
            commands: None,
            selected: None,
            parsed: false,
            quiet: false,
            debug_level: 0,
        };

        program.add_reserved_options();
        program
    }

    fn add_reserved_options(&mut self) {
        let reserved = [
            OptionDef::flag(Some('h'), Some("help")).with_description("print help and exit"),
            OptionDef::flag(Some('q'), Some("quiet"))
                .with_description("do not print status and information messages"),
            OptionDef::with_value(None, Some("debug"), "level")
                .with_default("0")
                .with_description("print debug messages"),
        ];

        for option in reserved {
            // The option set is empty at this point, so no name can clash.
            let _ = self.options.insert(option, None);
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Sets the entry point of a flat-mode program.
    pub fn set_main(&mut self, main: Main) -> Result<()> {
        if self.commands.is_some() {
            return Err(DeclarationError::MainWithCommands);
        }

        self.main = Some(main);
        Ok(())
    }

    /// Declares a global option. Its names must not be used by the program
    /// or by any command.
    pub fn add_option(&mut self, option: OptionDef) -> Result<()> {
        if let Some(tree) = &self.commands {
            let taken = option.keys().into_iter().find(|key| {
                tree.iter()
                    .filter_map(CommandNode::options)
                    .any(|options| options.contains(key))
            });

            if let Some(key) = taken {
                return Err(DeclarationError::DuplicateOption(key));
            }
        }

        self.options.insert(option, None)
    }

    /// Declares a global flag.
    pub fn add_flag(
        &mut self,
        short_name: Option<char>,
        long_name: Option<&str>,
        description: &str,
    ) -> Result<()> {
        self.add_option(OptionDef::flag(short_name, long_name).with_description(description))
    }

    /// Declares a mandatory top-level argument (flat mode only).
    pub fn add_argument(&mut self, name: &str, description: &str) -> Result<()> {
        self.push_argument(ArgumentDef::mandatory(name).with_description(description))
    }

    /// Declares an optional top-level argument (flat mode only).
    pub fn add_optional_argument(&mut self, name: &str, description: &str) -> Result<()> {
        self.push_argument(ArgumentDef::optional(name).with_description(description))
    }

    /// Declares the trailing top-level argument (flat mode only).
    pub fn add_trailing_argument(&mut self, name: &str, description: &str) -> Result<()> {
        self.push_argument(ArgumentDef::trailing(name).with_description(description))
    }

    fn push_argument(&mut self, argument: ArgumentDef) -> Result<()> {
        if self.commands.is_some() {
            return Err(DeclarationError::ArgumentsWithCommands);
        }

        self.arguments.push(argument)
    }

    /// Declares a leaf command by its space-separated path, creating the
    /// intermediate groups. The first command also registers the reserved
    /// `help` command.
    ///
    /// # Examples
    ///
    /// ```
    /// use program_core::{MainResult, Program};
    ///
    /// fn create(_: &Program) -> MainResult {
    ///     Ok(())
    /// }
    ///
    /// let mut p = Program::new("tool", "manage foos");
    /// let mut cmd = p.add_command("foo create", "create a foo", create).unwrap();
    /// cmd.add_flag(Some('n'), Some("dry-run"), "only pretend").unwrap();
    /// cmd.add_argument("name", "the name of the foo").unwrap();
    ///
    /// assert!(p.add_command("foo", "", create).is_err());
    /// ```
    pub fn add_command(
        &mut self,
        path: &str,
        description: &str,
        main: Main,
    ) -> Result<CommandBuilder<'_>> {
        if self.main.is_some() {
            return Err(DeclarationError::MainWithCommands);
        }
        if !self.arguments.is_empty() {
            return Err(DeclarationError::ArgumentsWithCommands);
        }

        let names = split_command_name(path);
        if names.is_empty() {
            return Err(DeclarationError::EmptyCommandName);
        }

        if self.commands.is_none() {
            let mut tree = CommandTree::new();
            let help = tree.insert_leaf(&["help".to_string()], "print help and exit", help_main)?;
            if let Some(arguments) = tree.node_mut(help).arguments_mut() {
                arguments.push(
                    ArgumentDef::trailing("command").with_description("the name of the command"),
                )?;
            }
            self.commands = Some(tree);
        }

        let tree = self.commands.get_or_insert_with(CommandTree::new);
        let id = tree.insert_leaf(&names, description, main)?;
        debug!(command = %tree.node(id).full_name, "Declared command");

        Ok(CommandBuilder { program: self, id })
    }

    /// Returns the command tree of a command-mode program.
    pub fn commands(&self) -> Option<&CommandTree> {
        self.commands.as_ref()
    }

    /// Looks a command up by path, e.g. `["foo", "create"]`.
    pub fn find_command<S: AsRef<str>>(&self, names: &[S]) -> Option<CommandId> {
        self.commands.as_ref()?.find(names)
    }

    /// The selected leaf command after a successful parse.
    pub fn selected_command(&self) -> Option<&CommandNode> {
        let id = self.selected?;
        self.commands.as_ref().map(|tree| tree.node(id))
    }

    /// Local name of the selected command.
    pub fn command_name(&self) -> Option<&str> {
        self.selected_command().map(|node| node.name.as_str())
    }

    /// Full path of the selected command, e.g. `foo create`.
    pub fn command_full_name(&self) -> Option<&str> {
        self.selected_command().map(|node| node.full_name.as_str())
    }

    /// Looks an option up, in the selected command first, then globally.
    pub fn option(&self, name: &str) -> Option<&OptionDef> {
        self.selected_command()
            .and_then(|node| node.options())
            .and_then(|options| options.get(name))
            .or_else(|| self.options.get(name))
    }

    /// Looks an argument up in the active scope.
    pub fn argument(&self, name: &str) -> Option<&ArgumentDef> {
        match self.selected_command() {
            Some(node) => node.arguments().and_then(|arguments| arguments.get(name)),
            None => self.arguments.get(name),
        }
    }

    /// Whether an option appeared on the command line.
    ///
    /// # Panics
    ///
    /// Panics if no option of the active scope is named `name`.
    pub fn is_option_set(&self, name: &str) -> bool {
        self.must_option(name).is_set
    }

    /// Value of an option, or its default when it was not set.
    ///
    /// # Panics
    ///
    /// Panics if no option of the active scope is named `name`.
    pub fn option_value(&self, name: &str) -> &str {
        self.must_option(name).effective_value()
    }

    /// Value of a mandatory or optional argument; empty when unset.
    ///
    /// # Panics
    ///
    /// Panics if no argument of the active scope is named `name`.
    pub fn argument_value(&self, name: &str) -> &str {
        self.must_argument(name).value.as_deref().unwrap_or("")
    }

    /// Value of an optional argument, `None` when it was not given.
    ///
    /// # Panics
    ///
    /// Panics if no argument of the active scope is named `name`.
    pub fn optional_argument_value(&self, name: &str) -> Option<&str> {
        let argument = self.must_argument(name);
        if !argument.is_set {
            return None;
        }

        argument.value.as_deref()
    }

    /// Values absorbed by the trailing argument.
    ///
    /// # Panics
    ///
    /// Panics if no argument of the active scope is named `name`.
    pub fn trailing_argument_values(&self, name: &str) -> &[String] {
        &self.must_argument(name).trailing_values
    }

    fn must_option(&self, name: &str) -> &OptionDef {
        match self.option(name) {
            Some(option) => option,
            None => panic!("unknown option {name:?}"),
        }
    }

    fn must_argument(&self, name: &str) -> &ArgumentDef {
        match self.argument(name) {
            Some(argument) => argument,
            None => panic!("unknown argument {name:?}"),
        }
    }

    /// Whether `--quiet` was given.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Level given with `--debug`, 0 by default.
    pub fn debug_level(&self) -> u32 {
        self.debug_level
    }

    /// Prints a status message unless `--quiet` was given.
    pub fn info(&self, message: impl fmt::Display) {
        if self.quiet {
            return;
        }

        eprintln!("{message}");
    }

    /// Prints a message when `level` does not exceed the `--debug` level.
    pub fn debug(&self, level: u32, message: impl fmt::Display) {
        if level > self.debug_level {
            return;
        }

        eprintln!("{message}");
    }

    /// Prints an error message.
    pub fn error(&self, message: impl fmt::Display) {
        eprintln!("error: {message}");
    }

    /// Calls the entry point of the selected command, or the flat-mode entry
    /// point.
    pub fn run(&self) -> MainResult {
        let main = match (&self.commands, self.selected) {
            (Some(tree), Some(id)) => tree.node(id).main(),
            (Some(_), None) => return Err(DeclarationError::NoCommandSelected.into()),
            (None, _) => self.main,
        };

        let main = main.ok_or(DeclarationError::MissingMain)?;
        main(self)
    }

    /// Parses the process arguments, prints help or errors, and runs the
    /// program. Intended to be returned from `main`.
    pub fn execute(&mut self) -> ExitCode {
        let args: Vec<String> = std::env::args().skip(1).collect();
        self.execute_with(args, &mut io::stderr())
    }

    /// Same as [`Program::execute`] with explicit arguments (without the
    /// program name) and diagnostic output.
    pub fn execute_with<I, S, W>(&mut self, args: I, out: &mut W) -> ExitCode
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        W: Write,
    {
        let parsed = self.parse(args);
        self.finish(parsed, out)
    }

    /// Acts on the result of [`Program::parse`]: prints usage for help,
    /// prints the error and usage for a failure, or runs the entry point.
    ///
    /// Lets callers set things up between parsing and running, e.g. a log
    /// level derived from `--debug`.
    pub fn finish<W: Write>(
        &self,
        parsed: std::result::Result<Outcome, ParseFailure>,
        out: &mut W,
    ) -> ExitCode {
        let (code, text) = match parsed {
            Ok(Outcome::Help(scope)) => (ExitCode::SUCCESS, self.usage(scope)),
            Ok(Outcome::Run) => match self.run() {
                Ok(()) => return ExitCode::SUCCESS,
                Err(err) => (ExitCode::FAILURE, format!("error: {err}\n")),
            },
            Err(failure) => (
                ExitCode::FAILURE,
                format!("error: {}\n{}", failure.error, self.usage(failure.scope)),
            ),
        };

        // Last output before exiting: a failed write has nowhere to be reported.
        out.write_all(text.as_bytes()).ok();
        code
    }

    /// Scope of the whole program: root of the command tree, or the flat
    /// declarations when there are no commands.
    pub fn root_scope(&self) -> UsageScope {
        if self.commands.is_some() {
            UsageScope::Root
        } else {
            UsageScope::NoCommands
        }
    }

    /// Usage scope requested through the `help` command: its `command`
    /// argument names the target, nothing means the whole program.
    pub(crate) fn help_target(&self) -> std::result::Result<UsageScope, ParseError> {
        let names = self.trailing_argument_values("command");
        if names.is_empty() {
            return Ok(self.root_scope());
        }

        self.find_command(names)
            .map(UsageScope::Command)
            .ok_or_else(|| ParseError::UnknownCommand(names.join(" ")))
    }
}

/// Entry point of the reserved `help` command.
fn help_main(program: &Program) -> MainResult {
    let scope = program.help_target()?;
    program.print_usage(scope)?;
    Ok(())
}

/// Declares options and arguments of a leaf command.
///
/// Returned by [`Program::add_command`].
#[derive(Debug)]
pub struct CommandBuilder<'a> {
    program: &'a mut Program,
    id: CommandId,
}

impl CommandBuilder<'_> {
    pub fn id(&self) -> CommandId {
        self.id
    }

    /// Declares a command option. Its names must not be used by the command
    /// or by a global option.
    pub fn add_option(&mut self, option: OptionDef) -> Result<()> {
        let Program {
            options: globals,
            commands,
            ..
        } = &mut *self.program;

        match commands
            .as_mut()
            .and_then(|tree| tree.node_mut(self.id).options_mut())
        {
            Some(options) => options.insert(option, Some(&*globals)),
            None => Err(DeclarationError::NoCommandSelected),
        }
    }

    /// Declares a command flag.
    pub fn add_flag(
        &mut self,
        short_name: Option<char>,
        long_name: Option<&str>,
        description: &str,
    ) -> Result<()> {
        self.add_option(OptionDef::flag(short_name, long_name).with_description(description))
    }

    pub fn add_argument(&mut self, name: &str, description: &str) -> Result<()> {
        self.push_argument(ArgumentDef::mandatory(name).with_description(description))
    }

    pub fn add_optional_argument(&mut self, name: &str, description: &str) -> Result<()> {
        self.push_argument(ArgumentDef::optional(name).with_description(description))
    }

    pub fn add_trailing_argument(&mut self, name: &str, description: &str) -> Result<()> {
        self.push_argument(ArgumentDef::trailing(name).with_description(description))
    }

    fn push_argument(&mut self, argument: ArgumentDef) -> Result<()> {
        match self
            .program
            .commands
            .as_mut()
            .and_then(|tree| tree.node_mut(self.id).arguments_mut())
        {
            Some(arguments) => arguments.push(argument),
            None => Err(DeclarationError::NoCommandSelected),
        }
    }
}
