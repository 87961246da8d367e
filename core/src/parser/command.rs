//! Command resolution.

use tracing::debug;

use crate::command::{CommandId, CommandTree};
use crate::error::{ParseError, ParseFailure};
use crate::parser::options::{SEPARATOR, is_option};
use crate::usage::UsageScope;

/// Walks the command tree along the leading command tokens of `args`.
///
/// Descends one level per token while a matching child exists, and stops at
/// the first option, `--`, or token that matches nothing. Succeeds only when
/// the walk ends on a leaf; returns the leaf and the remaining tokens. On
/// failure the usage scope is the deepest node reached.
pub(crate) fn resolve_command<'a>(
    tree: &CommandTree,
    args: &'a [String],
) -> Result<(CommandId, &'a [String]), ParseFailure> {
    let root = tree.root();
    let mut current = root;
    let mut rest = args;
    let mut path: Vec<&str> = Vec::new();
    let mut unmatched = false;

    while let Some((arg, tail)) = rest.split_first() {
        if arg == SEPARATOR || is_option(arg) {
            break;
        }

        path.push(arg);

        match tree.child(current, arg) {
            Some(child) => {
                current = child;
                rest = tail;
            }
            None => {
                unmatched = true;
                break;
            }
        }
    }

    let scope = if current == root {
        UsageScope::Root
    } else {
        UsageScope::Command(current)
    };

    if path.is_empty() {
        return Err(ParseFailure::new(ParseError::MissingCommand, scope));
    }

    let node = tree.node(current);
    if current == root || (node.is_group() && unmatched) {
        return Err(ParseFailure::new(
            ParseError::UnknownCommand(path.join(" ")),
            scope,
        ));
    }

    if node.is_group() {
        return Err(ParseFailure::new(
            ParseError::MissingSubcommand(node.full_name.clone()),
            scope,
        ));
    }

    debug!(command = %node.full_name, remaining = rest.len(), "Resolved command");
    Ok((current, rest))
}
