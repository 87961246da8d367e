//! Declarative command-line programs.
//!
//! A [`Program`] declares options, positional arguments and, optionally, a
//! tree of commands. Parsing a command line fills the declarations in place;
//! the entry point of the selected command then reads values back by name.
//!
//! - Flat mode: arguments and one entry point set with
//!   [`Program::set_main`].
//! - Command mode: commands added with [`Program::add_command`] using
//!   space-separated paths such as `"foo create"`, intermediate groups being
//!   created on the fly. A `help` command is added automatically.
//!
//! Every program declares `-h/--help`, `-q/--quiet` and `--debug <level>`.
//! [`Program::execute`] runs the whole cycle: parse, print usage on `--help`
//! or on a command-line error, call the entry point, and map the result to an
//! exit code.
//!
//! # Example
//!
//! ```
//! use program_core::*;
//!
//! fn create(p: &Program) -> MainResult {
//!     p.info(format!("creating {}", p.argument_value("name")));
//!     Ok(())
//! }
//!
//! let mut p = Program::new("foos", "manage foos");
//! p.add_flag(Some('v'), Some("verbose"), "print more").unwrap();
//!
//! let mut cmd = p.add_command("foo create", "create a foo", create).unwrap();
//! cmd.add_argument("name", "the name of the foo").unwrap();
//!
//! let mut stderr = Vec::new();
//! let code = p.execute_with(["-q", "foo", "create", "bar"], &mut stderr);
//!
//! assert_eq!(code, std::process::ExitCode::SUCCESS);
//! assert_eq!(p.command_full_name(), Some("foo create"));
//! assert!(stderr.is_empty());
//! ```

mod build_id;
mod command;
mod error;
mod parser;
mod program;
mod project;
mod table;
mod types;
mod usage;
mod values;

pub use build_id::{BuildId, BuildIdError, Snapshot};
pub use command::{CommandId, CommandKind, CommandNode, CommandTree, split_command_name};
pub use error::{DeclarationError, ParseError, ParseFailure, Result, ValueError, ValueSource};
pub use parser::{HELP_COMMAND, Outcome, SEPARATOR, is_long_option, is_option, is_short_option};
pub use program::{CommandBuilder, Main, MainResult, Program};
pub use project::{MANIFEST_FILE, ProjectRootError, find_project_root};
pub use table::{Alignment, Column, KeyValueTable, Table};
pub use types::{ArgumentDef, ArgumentKind, ArgumentList, OptionDef, OptionSet};
pub use usage::UsageScope;
