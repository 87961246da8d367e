//! Command tree.
//!
//! Commands are stored in an arena owned by the program and addressed by
//! [`CommandId`]. Node 0 is the unnamed root, which is always a group and is
//! never selectable. Every other node is either a group (children only) or a
//! leaf (entry point, options and arguments); the two never change into each
//! other once declared.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{DeclarationError, Result};
use crate::program::Main;
use crate::types::{ArgumentList, OptionSet};

/// Index of a node in the command tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CommandId(usize);

/// What a node is: a group of subcommands or a runnable command.
#[derive(Debug, Clone)]
pub enum CommandKind {
    Group {
        /// Children by local name, kept sorted for usage output.
        children: BTreeMap<String, CommandId>,
    },
    Leaf {
        main: Main,
        options: OptionSet,
        arguments: ArgumentList,
    },
}

/// A node of the command tree.
#[derive(Debug, Clone)]
pub struct CommandNode {
    /// Local name, e.g. `create`.
    pub name: String,
    /// Space-joined path from the root, e.g. `foo create`.
    pub full_name: String,
    pub description: String,
    pub kind: CommandKind,
}

impl CommandNode {
    fn group(name: &str, full_name: String) -> Self {
        Self {
            name: name.to_string(),
            full_name,
            description: String::new(),
            kind: CommandKind::Group {
                children: BTreeMap::new(),
            },
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, CommandKind::Group { .. })
    }

    /// Name shown in command tables; groups advertise their subcommands.
    pub fn label(&self) -> String {
        if self.is_group() {
            format!("{} <subcommand>...", self.name)
        } else {
            self.name.clone()
        }
    }

    /// Options declared by this command; empty for groups.
    pub fn options(&self) -> Option<&OptionSet> {
        match &self.kind {
            CommandKind::Leaf { options, .. } => Some(options),
            CommandKind::Group { .. } => None,
        }
    }

    /// Arguments declared by this command; empty for groups.
    pub fn arguments(&self) -> Option<&ArgumentList> {
        match &self.kind {
            CommandKind::Leaf { arguments, .. } => Some(arguments),
            CommandKind::Group { .. } => None,
        }
    }

    pub(crate) fn options_mut(&mut self) -> Option<&mut OptionSet> {
        match &mut self.kind {
            CommandKind::Leaf { options, .. } => Some(options),
            CommandKind::Group { .. } => None,
        }
    }

    pub(crate) fn arguments_mut(&mut self) -> Option<&mut ArgumentList> {
        match &mut self.kind {
            CommandKind::Leaf { arguments, .. } => Some(arguments),
            CommandKind::Group { .. } => None,
        }
    }

    pub(crate) fn main(&self) -> Option<Main> {
        match &self.kind {
            CommandKind::Leaf { main, .. } => Some(*main),
            CommandKind::Group { .. } => None,
        }
    }
}

/// Arena of command nodes rooted at an unnamed group.
#[derive(Debug, Clone)]
pub struct CommandTree {
    nodes: Vec<CommandNode>,
}

impl Default for CommandTree {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![CommandNode::group("", String::new())],
        }
    }

    pub fn root(&self) -> CommandId {
        CommandId(0)
    }

    pub fn node(&self, id: CommandId) -> &CommandNode {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: CommandId) -> &mut CommandNode {
        &mut self.nodes[id.0]
    }

    /// Child of `id` named `name`, if `id` is a group that has one.
    pub fn child(&self, id: CommandId, name: &str) -> Option<CommandId> {
        match &self.node(id).kind {
            CommandKind::Group { children } => children.get(name).copied(),
            CommandKind::Leaf { .. } => None,
        }
    }

    /// Children of `id` sorted by name.
    pub fn children(&self, id: CommandId) -> Vec<&CommandNode> {
        match &self.node(id).kind {
            CommandKind::Group { children } => {
                children.values().map(|&child| self.node(child)).collect()
            }
            CommandKind::Leaf { .. } => Vec::new(),
        }
    }

    /// Every node, root first, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandNode> {
        self.nodes.iter()
    }

    /// Follows `names` from the root. Returns `None` when a name is missing
    /// or when `names` is empty, since the root cannot be selected.
    pub fn find<S: AsRef<str>>(&self, names: &[S]) -> Option<CommandId> {
        let mut id = self.root();
        for name in names {
            id = self.child(id, name.as_ref())?;
        }

        (id != self.root()).then_some(id)
    }

    /// Registers a leaf under `names`, creating intermediate groups.
    pub(crate) fn insert_leaf(
        &mut self,
        names: &[String],
        description: &str,
        main: Main,
    ) -> Result<CommandId> {
        let Some((name, parents)) = names.split_last() else {
            return Err(DeclarationError::EmptyCommandName);
        };

        let mut group = self.root();
        for (i, parent) in parents.iter().enumerate() {
            group = match self.child(group, parent) {
                Some(existing) if self.node(existing).is_group() => existing,
                Some(existing) => {
                    return Err(DeclarationError::CommandNotGroup(
                        self.node(existing).full_name.clone(),
                    ));
                }
                None => self.add_child(group, CommandNode::group(parent, names[..=i].join(" "))),
            };
        }

        if let Some(existing) = self.child(group, name) {
            let existing = self.node(existing);
            return Err(if existing.is_group() {
                DeclarationError::CommandHasSubcommands(existing.full_name.clone())
            } else {
                DeclarationError::DuplicateCommand(existing.full_name.clone())
            });
        }

        let leaf = CommandNode {
            name: name.clone(),
            full_name: names.join(" "),
            description: description.to_string(),
            kind: CommandKind::Leaf {
                main,
                options: OptionSet::new(),
                arguments: ArgumentList::new(),
            },
        };

        Ok(self.add_child(group, leaf))
    }

    fn add_child(&mut self, parent: CommandId, node: CommandNode) -> CommandId {
        let id = CommandId(self.nodes.len());
        let name = node.name.clone();
        self.nodes.push(node);

        if let CommandKind::Group { children } = &mut self.node_mut(parent).kind {
            children.insert(name, id);
        }

        id
    }
}

/// Splits a command path on runs of whitespace.
///
/// # Examples
///
/// ```
/// use program_core::split_command_name;
///
/// assert_eq!(split_command_name("  foo\tbar   baz\t"), vec!["foo", "bar", "baz"]);
/// assert!(split_command_name(" \t ").is_empty());
/// ```
pub fn split_command_name(s: &str) -> Vec<String> {
    s.split_whitespace().map(String::from).collect()
}
