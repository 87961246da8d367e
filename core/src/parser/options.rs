//! Option scanning.

use tracing::trace;

use crate::error::ParseError;
use crate::types::{OptionDef, OptionSet};

/// Token separating options from literal arguments.
pub const SEPARATOR: &str = "--";

/// `-x`: a dash followed by exactly one non-dash character.
pub fn is_short_option(arg: &str) -> bool {
    let mut chars = arg.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some('-'), Some(c), None) if c != '-'
    )
}

/// `--name`: two dashes followed by at least two more characters.
pub fn is_long_option(arg: &str) -> bool {
    arg.strip_prefix(SEPARATOR)
        .is_some_and(|name| name.chars().count() >= 2)
}

pub fn is_option(arg: &str) -> bool {
    is_short_option(arg) || is_long_option(arg)
}

/// Consumes the longest prefix of `args` made of options and their values.
///
/// Keys are looked up in `scopes` in order, so a command scope placed first
/// takes precedence over the global one. Scanning stops before the first
/// non-option token or `--`; the rest of `args` is returned untouched.
pub(crate) fn scan_options<'a>(
    mut args: &'a [String],
    scopes: &mut [&mut OptionSet],
) -> Result<&'a [String], ParseError> {
    while let Some((arg, rest)) = args.split_first() {
        if arg == SEPARATOR || !is_option(arg) {
            break;
        }

        let key = arg.trim_start_matches('-');
        let Some(option) = lookup(scopes, key) else {
            return Err(ParseError::UnknownOption(key.to_string()));
        };

        option.is_set = true;

        if option.is_flag() {
            trace!(option = key, "Matched flag");
            args = rest;
        } else {
            let Some((value, rest)) = rest.split_first() else {
                return Err(ParseError::MissingOptionValue(key.to_string()));
            };

            trace!(option = key, value = %value, "Matched option");
            option.value = Some(value.clone());
            args = rest;
        }
    }

    Ok(args)
}

fn lookup<'s>(scopes: &'s mut [&mut OptionSet], key: &str) -> Option<&'s mut OptionDef> {
    scopes.iter_mut().find_map(|scope| scope.get_mut(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|token| token.to_string()).collect()
    }

    fn sample_options() -> OptionSet {
        let mut set = OptionSet::new();
        set.insert(OptionDef::flag(Some('v'), Some("verbose")), None)
            .unwrap();
        set.insert(OptionDef::with_value(Some('o'), Some("output"), "path"), None)
            .unwrap();
        set
    }

    #[test]
    fn test_option_shapes() {
        assert!(is_short_option("-x"));
        assert!(!is_short_option("--"));
        assert!(!is_short_option("-xy"));
        assert!(!is_short_option("-"));
        assert!(is_long_option("--xy"));
        assert!(!is_long_option("--"));
        assert!(!is_long_option("--x"));
        assert!(!is_option("foo"));
        assert!(!is_option("-"));
    }

    #[test]
    fn test_short_and_long_names_set_same_option() {
        for tokens in [["-o", "a.txt"], ["--output", "a.txt"]] {
            let mut set = sample_options();
            let input = args(&tokens);
            let rest = scan_options(&input, &mut [&mut set]).unwrap();

            assert!(rest.is_empty());
            let option = set.get("output").unwrap();
            assert!(option.is_set);
            assert_eq!(option.value.as_deref(), Some("a.txt"));
        }
    }

    #[test]
    fn test_flag_consumes_one_token_and_value_two() {
        let mut set = sample_options();
        let input = args(&["-v", "-o", "x", "file", "-v"]);
        let rest = scan_options(&input, &mut [&mut set]).unwrap();

        assert_eq!(rest, &input[3..]);
        assert!(set.get("v").unwrap().is_set);
    }

    #[test]
    fn test_value_may_look_like_an_option() {
        let mut set = sample_options();
        let input = args(&["-o", "-v"]);
        let rest = scan_options(&input, &mut [&mut set]).unwrap();

        assert!(rest.is_empty());
        assert_eq!(set.get("o").unwrap().value.as_deref(), Some("-v"));
        assert!(!set.get("v").unwrap().is_set);
    }

    #[test]
    fn test_missing_value_is_an_error() {
        let mut set = sample_options();
        let input = args(&["-v", "--output"]);
        assert_eq!(
            scan_options(&input, &mut [&mut set]),
            Err(ParseError::MissingOptionValue("output".to_string()))
        );
    }

    #[test]
    fn test_unknown_option_is_an_error() {
        let mut set = sample_options();
        let input = args(&["--colour"]);
        assert_eq!(
            scan_options(&input, &mut [&mut set]),
            Err(ParseError::UnknownOption("colour".to_string()))
        );
    }

    #[test]
    fn test_separator_stops_scanning_and_is_kept() {
        let mut set = sample_options();
        let input = args(&["-v", "--", "-o"]);
        let rest = scan_options(&input, &mut [&mut set]).unwrap();

        assert_eq!(rest, &input[1..]);
        assert!(!set.get("o").unwrap().is_set);
    }

    #[test]
    fn test_first_scope_takes_precedence() {
        let mut globals = sample_options();
        let mut local = OptionSet::new();
        local
            .insert(OptionDef::flag(Some('n'), Some("dry-run")), None)
            .unwrap();

        let input = args(&["-n", "-v"]);
        let rest = scan_options(&input, &mut [&mut local, &mut globals]).unwrap();

        assert!(rest.is_empty());
        assert!(local.get("dry-run").unwrap().is_set);
        assert!(globals.get("verbose").unwrap().is_set);
    }
}
