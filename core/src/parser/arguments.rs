//! Positional argument binding.

use tracing::trace;

use crate::error::ParseError;
use crate::parser::options::SEPARATOR;
use crate::types::{ArgumentDef, ArgumentKind};

/// Binds `args` to `arguments`, which follow the mandatory, optional,
/// trailing ordering.
///
/// A leading `--` only separates options from arguments and is dropped;
/// everything after it is bound literally.
pub(crate) fn bind_arguments(args: &[String], arguments: &mut [ArgumentDef]) -> Result<(), ParseError> {
    let args = match args.split_first() {
        Some((first, rest)) if first == SEPARATOR => rest,
        _ => args,
    };

    if arguments.is_empty() {
        if !args.is_empty() {
            return Err(ParseError::UnexpectedArguments);
        }
        return Ok(());
    }

    let mandatory = arguments
        .iter()
        .take_while(|argument| argument.kind == ArgumentKind::Mandatory)
        .count();

    if args.len() < mandatory {
        return Err(ParseError::MissingArguments);
    }

    let (values, mut args) = args.split_at(mandatory);
    for (argument, value) in arguments.iter_mut().zip(values) {
        trace!(argument = %argument.name, value = %value, "Bound argument");
        argument.bind(value);
    }

    for argument in &mut arguments[mandatory..] {
        if argument.kind == ArgumentKind::Trailing {
            trace!(argument = %argument.name, count = args.len(), "Bound trailing argument");
            argument.bind_trailing(args);
            return Ok(());
        }

        let Some((value, rest)) = args.split_first() else {
            break;
        };

        trace!(argument = %argument.name, value = %value, "Bound argument");
        argument.bind(value);
        args = rest;
    }

    if !args.is_empty() {
        return Err(ParseError::TooManyArguments);
    }

    Ok(())
}
