//! Usage text rendering.

use std::fmt::Write as _;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::command::{CommandId, CommandNode};
use crate::program::Program;
use crate::types::{ArgumentDef, OptionDef, OptionSet};

/// Which part of a program a usage text describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UsageScope {
    /// A flat-mode program: its own options and arguments.
    NoCommands,
    /// A command-mode program as a whole: top-level commands and global
    /// options.
    Root,
    /// A group or leaf command.
    Command(CommandId),
}

/// Everything a usage text is made of, collected for one scope.
struct Sections<'a> {
    command: Option<&'a CommandNode>,
    description: &'a str,
    children: Vec<&'a CommandNode>,
    arguments: &'a [ArgumentDef],
    command_options: Option<&'a OptionSet>,
}

impl Program {
    /// Renders the usage text of `scope`.
    ///
    /// The output only depends on the declarations: commands are sorted by
    /// name, options by short name (long name when there is none), and
    /// arguments keep their declaration order.
    ///
    /// # Examples
    ///
    /// ```
    /// use program_core::{MainResult, Program};
    ///
    /// fn noop(_: &Program) -> MainResult {
    ///     Ok(())
    /// }
    ///
    /// let mut p = Program::new("tool", "manage foos");
    /// p.add_command("foo create", "create a foo", noop).unwrap();
    ///
    /// let usage = p.usage(p.root_scope());
    /// assert!(usage.starts_with("Usage: tool [GLOBAL OPTIONS] COMMAND...\n"));
    /// assert!(usage.contains("\nManage foos.\n"));
    /// ```
    pub fn usage(&self, scope: UsageScope) -> String {
        let sections = self.sections(scope);
        let width = self.label_width(&sections);

        let mut buf = String::new();
        self.write_usage_line(&mut buf, &sections);

        if !sections.description.is_empty() {
            let _ = write!(buf, "\n{}\n", sentence(sections.description));
        }

        if !sections.children.is_empty() {
            let label = if sections.command.is_some() {
                "SUBCOMMANDS"
            } else {
                "COMMANDS"
            };

            let _ = write!(buf, "\n{label}\n\n");
            for child in &sections.children {
                write_row(&mut buf, &child.label(), &child.description, width);
            }
        } else if !sections.arguments.is_empty() {
            buf.push_str("\nARGUMENTS\n\n");
            for argument in sections.arguments {
                write_row(&mut buf, &argument.name, &argument.description, width);
            }
        }

        if !self.options.is_empty() {
            let label = match scope {
                UsageScope::NoCommands => "OPTIONS",
                _ => "GLOBAL OPTIONS",
            };
            write_options(&mut buf, label, &self.options, width);
        }

        if let Some(options) = sections.command_options.filter(|options| !options.is_empty()) {
            write_options(&mut buf, "COMMAND OPTIONS", options, width);
        }

        buf
    }

    /// Writes the usage text of `scope` to stderr.
    pub fn print_usage(&self, scope: UsageScope) -> io::Result<()> {
        io::stderr().lock().write_all(self.usage(scope).as_bytes())
    }

    fn sections(&self, scope: UsageScope) -> Sections<'_> {
        let tree = self.commands.as_ref();

        match (scope, tree) {
            (UsageScope::Command(id), Some(tree)) if id != tree.root() => {
                let node = tree.node(id);
                Sections {
                    command: Some(node),
                    description: &node.description,
                    children: tree.children(id),
                    arguments: node.arguments().map(|a| a.as_slice()).unwrap_or(&[]),
                    command_options: node.options(),
                }
            }
            (_, Some(tree)) => Sections {
                command: None,
                description: &self.description,
                children: tree.children(tree.root()),
                arguments: &[],
                command_options: None,
            },
            (_, None) => Sections {
                command: None,
                description: &self.description,
                children: Vec::new(),
                arguments: self.arguments.as_slice(),
                command_options: None,
            },
        }
    }

    fn write_usage_line(&self, buf: &mut String, sections: &Sections<'_>) {
        let _ = write!(buf, "Usage: {}", self.name);

        if self.commands.is_some() {
            buf.push_str(" [GLOBAL OPTIONS]");
        } else {
            buf.push_str(" [OPTIONS]");
        }

        if let Some(node) = sections.command {
            let _ = write!(buf, " {}", node.full_name);
        }

        if !sections.children.is_empty() && sections.arguments.is_empty() {
            if sections.command.is_some() {
                buf.push_str(" SUBCOMMAND...");
            } else {
                buf.push_str(" COMMAND...");
            }
        }

        if sections.command_options.is_some_and(|options| !options.is_empty()) {
            buf.push_str(" [COMMAND OPTIONS]");
        }

        for argument in sections.arguments {
            let _ = write!(buf, " {}", argument.placeholder());
        }

        buf.push('\n');
    }

    /// Width of the first column, shared by every table of the text.
    fn label_width(&self, sections: &Sections<'_>) -> usize {
        let children = sections.children.iter().map(|child| child.label().chars().count());
        let arguments = sections.arguments.iter().map(|argument| argument.name.chars().count());
        let options = self
            .options
            .iter()
            .chain(sections.command_options.into_iter().flat_map(|options| options.iter()))
            .map(|option| option_label(option).chars().count());

        children.chain(arguments).chain(options).max().unwrap_or(0)
    }
}

/// Left column of an option row, e.g. `-o, --output <path>`.
fn option_label(option: &OptionDef) -> String {
    let mut label = match option.short_name {
        Some(short) => format!("-{short}"),
        None => "  ".to_string(),
    };

    if let Some(long) = &option.long_name {
        label.push_str(if option.short_name.is_some() { ", " } else { "  " });
        label.push_str("--");
        label.push_str(long);
    }

    if let Some(value_name) = &option.value_name {
        let _ = write!(label, " <{value_name}>");
    }

    label
}

fn write_options(buf: &mut String, label: &str, options: &OptionSet, width: usize) {
    let _ = write!(buf, "\n{label}\n\n");

    for option in options.sorted() {
        let mut description = option.description.clone();
        if let Some(default) = &option.default_value {
            let _ = write!(description, " (default: {default:?})");
        }

        write_row(buf, &option_label(option), &description, width);
    }
}

fn write_row(buf: &mut String, label: &str, description: &str, width: usize) {
    let row = format!("{label:<width$}  {description}");
    buf.push_str(row.trim_end());
    buf.push('\n');
}

/// Capitalizes the first character and terminates with a period.
pub(crate) fn sentence(s: &str) -> String {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut out: String = first.to_uppercase().chain(chars).collect();
    if !out.ends_with('.') {
        out.push('.');
    }
    out
}
