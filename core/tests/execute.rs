use std::process::ExitCode;

use program_core::{MainResult, OptionDef, Program};

fn noop(_: &Program) -> MainResult {
    Ok(())
}

fn nested_commands() -> Program {
    let mut p = Program::new("nested-commands", "an example program with nested commands");
    p.add_flag(Some('a'), None, "a short flag").unwrap();

    let mut c = p.add_command("foo create", "create a foo", noop).unwrap();
    c.add_flag(Some('n'), Some("dry-run"), "only pretend to create the foo")
        .unwrap();
    c.add_argument("name", "the name of the foo").unwrap();
    c.add_trailing_argument("option", "a creation option").unwrap();

    p.add_command("foo delete", "delete a foo", noop)
        .unwrap()
        .add_argument("name", "the name of the foo")
        .unwrap();

    p.add_command("bar", "bar command", noop)
        .unwrap()
        .add_optional_argument("arg-opt", "the optional argument")
        .unwrap();

    p
}

fn no_command() -> Program {
    let mut p = Program::new("no-command", "an example program without any command");
    p.add_flag(None, Some("flag-a"), "a long flag").unwrap();
    p.add_flag(Some('b'), None, "a short flag").unwrap();
    p.add_option(
        OptionDef::with_value(Some('c'), Some("option-c"), "value")
            .with_default("foo")
            .with_description("an option with both a short and long name"),
    )
    .unwrap();
    p.add_argument("arg-1", "the first argument").unwrap();
    p.add_argument("arg-2", "the second argument").unwrap();
    p.add_optional_argument("arg-opt-1", "the first optional argument")
        .unwrap();
    p.add_trailing_argument("arg-trailing", "all trailing arguments")
        .unwrap();
    p.set_main(noop).unwrap();
    p
}

fn execute(p: &mut Program, args: &[&str]) -> (ExitCode, String) {
    let mut out = Vec::new();
    let code = p.execute_with(args.iter().copied(), &mut out);
    (code, String::from_utf8(out).unwrap())
}

#[test]
fn test_successful_run_prints_nothing() {
    let mut p = nested_commands();
    let (code, out) = execute(&mut p, &["foo", "create", "-n", "x", "o1", "o2"]);

    assert_eq!(code, ExitCode::SUCCESS);
    assert_eq!(out, "");
    assert!(p.is_option_set("dry-run"));
    assert_eq!(p.trailing_argument_values("option"), ["o1", "o2"]);
}

#[test]
fn test_missing_subcommand_prints_group_usage() {
    let mut p = nested_commands();
    let (code, out) = execute(&mut p, &["foo"]);

    assert_eq!(code, ExitCode::FAILURE);
    assert!(out.starts_with(
        "error: missing subcommand(s) for command \"foo\"\nUsage: nested-commands [GLOBAL OPTIONS] foo SUBCOMMAND...\n"
    ));
    assert!(out.contains("\nSUBCOMMANDS\n"));
}

#[test]
fn test_unknown_command_prints_root_usage() {
    let mut p = nested_commands();
    let (code, out) = execute(&mut p, &["baz"]);

    assert_eq!(code, ExitCode::FAILURE);
    assert!(out.starts_with("error: unknown command \"baz\"\nUsage: nested-commands [GLOBAL OPTIONS] COMMAND...\n"));
    assert!(out.contains("\nCOMMANDS\n"));
}

#[test]
fn test_leaf_help_exits_successfully() {
    let mut p = nested_commands();
    let (code, out) = execute(&mut p, &["foo", "create", "--help"]);

    assert_eq!(code, ExitCode::SUCCESS);
    assert!(out.starts_with(
        "Usage: nested-commands [GLOBAL OPTIONS] foo create [COMMAND OPTIONS] <name> [<option>...]\n\nCreate a foo.\n"
    ));
    assert!(out.contains("\nCOMMAND OPTIONS\n\n-n, --dry-run"));
}

#[test]
fn test_help_command() {
    let mut p = nested_commands();
    let (code, out) = execute(&mut p, &["help", "foo", "delete"]);
    assert_eq!(code, ExitCode::SUCCESS);
    assert!(out.starts_with("Usage: nested-commands [GLOBAL OPTIONS] foo delete <name>\n"));

    let mut p = nested_commands();
    let (code, out) = execute(&mut p, &["help", "nope"]);
    assert_eq!(code, ExitCode::FAILURE);
    assert!(out.starts_with("error: unknown command \"nope\"\nUsage: nested-commands [GLOBAL OPTIONS] COMMAND...\n"));
}

#[test]
fn test_help_command_rejects_invalid_debug_level() {
    let mut p = nested_commands();
    let (code, out) = execute(&mut p, &["--debug", "abc", "help"]);

    assert_eq!(code, ExitCode::FAILURE);
    assert!(out.starts_with("error: invalid debug level \"abc\"\nUsage: nested-commands [GLOBAL OPTIONS] help "));
}

#[test]
fn test_flat_program_help_and_errors() {
    let mut p = no_command();
    let (code, out) = execute(&mut p, &["-h"]);
    assert_eq!(code, ExitCode::SUCCESS);
    assert!(out.starts_with(
        "Usage: no-command [OPTIONS] <arg-1> <arg-2> [<arg-opt-1>] [<arg-trailing>...]\n\nAn example program without any command.\n"
    ));
    assert!(out.contains("an option with both a short and long name (default: \"foo\")\n"));

    let mut p = no_command();
    let (code, out) = execute(&mut p, &["x"]);
    assert_eq!(code, ExitCode::FAILURE);
    assert!(out.starts_with("error: missing argument(s)\nUsage: no-command [OPTIONS]"));

    let mut p = no_command();
    let (code, out) = execute(&mut p, &["-c"]);
    assert_eq!(code, ExitCode::FAILURE);
    assert!(out.starts_with("error: missing value for option \"c\"\n"));
}

#[test]
fn test_flat_program_values() {
    let mut p = no_command();
    let (code, _) = execute(&mut p, &["-b", "--option-c", "bar", "1", "2", "3", "4", "5"]);

    assert_eq!(code, ExitCode::SUCCESS);
    assert!(!p.is_option_set("flag-a"));
    assert!(p.is_option_set("b"));
    assert_eq!(p.option_value("option-c"), "bar");
    assert_eq!(p.optional_argument_value("arg-opt-1"), Some("3"));
    assert_eq!(p.trailing_argument_values("arg-trailing"), ["4", "5"]);
}

#[test]
fn test_usage_output_is_deterministic() {
    let mut first = nested_commands();
    let mut second = nested_commands();

    let (_, a) = execute(&mut first, &["--help"]);
    let (_, b) = execute(&mut second, &["--help"]);
    assert_eq!(a, b);
}
