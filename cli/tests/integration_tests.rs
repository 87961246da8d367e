use std::process::{Command, Output};

fn run(bin: &str, args: &[&str]) -> Output {
    Command::new(bin)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|err| panic!("failed to run {bin}: {err}"))
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ---------------------------------------------------------------------------
// no-command
// ---------------------------------------------------------------------------

#[test]
fn no_command_prints_values_table() {
    let output = run(env!("CARGO_BIN_EXE_no-command"), &["-b", "1", "2", "3"]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "flag-a        false\nb             true\noption-c      foo\narg-1         1\narg-2         2\narg-opt-1     3\narg-opt-2\narg-trailing\n"
    );
}

#[test]
fn no_command_debug_messages_follow_level() {
    let bin = env!("CARGO_BIN_EXE_no-command");

    let output = run(bin, &["--debug", "2", "1", "2"]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("running program\n"));

    let output = run(bin, &["--debug", "1", "1", "2"]);
    assert!(!stderr(&output).contains("running program"));
}

#[test]
fn no_command_missing_arguments_fails_with_usage() {
    let output = run(env!("CARGO_BIN_EXE_no-command"), &["1"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).starts_with(
        "error: missing argument(s)\nUsage: no-command [OPTIONS] <arg-1> <arg-2> [<arg-opt-1>] [<arg-opt-2>] [<arg-trailing>...]\n"
    ));
}

#[test]
fn no_command_invalid_debug_level_fails() {
    let output = run(env!("CARGO_BIN_EXE_no-command"), &["--debug", "high", "1", "2"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("error: invalid debug level \"high\"\n"));
}

// ---------------------------------------------------------------------------
// commands
// ---------------------------------------------------------------------------

#[test]
fn commands_runs_selected_command() {
    let output = run(env!("CARGO_BIN_EXE_commands"), &["-c", "baz", "bar", "value"]);

    assert!(output.status.success());
    assert_eq!(stderr(&output), "running command \"bar\"\n");
    assert!(stdout(&output).contains("option-c  baz\n"));
    assert!(stdout(&output).contains("arg-opt   value\n"));
}

#[test]
fn commands_quiet_suppresses_info() {
    let output = run(env!("CARGO_BIN_EXE_commands"), &["-q", "foo", "x", "y"]);

    assert!(output.status.success());
    assert!(stderr(&output).is_empty());
    assert!(stdout(&output).contains("arg-3\n"));
}

#[test]
fn commands_help_exits_zero() {
    let output = run(env!("CARGO_BIN_EXE_commands"), &["--help"]);

    assert!(output.status.success());
    assert!(stdout(&output).is_empty());

    let usage = stderr(&output);
    assert!(usage.starts_with("Usage: commands [GLOBAL OPTIONS] COMMAND...\n\nAn example program with commands.\n"));
    assert!(usage.contains("\nCOMMANDS\n\nbar "));
    assert!(usage.contains("\nGLOBAL OPTIONS\n\n"));
}

#[test]
fn commands_missing_command_fails() {
    let output = run(env!("CARGO_BIN_EXE_commands"), &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("error: missing command\nUsage: commands "));
}

// ---------------------------------------------------------------------------
// nested-commands
// ---------------------------------------------------------------------------

#[test]
fn nested_commands_runs_leaf() {
    let output = run(
        env!("CARGO_BIN_EXE_nested-commands"),
        &["foo", "create", "-n", "x", "o1", "o2"],
    );

    assert!(output.status.success());
    assert_eq!(stderr(&output), "running command \"foo create\"\n");
    assert_eq!(
        stdout(&output),
        "a        false\ndry-run  true\nname     x\noptions  o1 o2\n"
    );
}

#[test]
fn nested_commands_group_without_subcommand_fails() {
    let output = run(env!("CARGO_BIN_EXE_nested-commands"), &["foo"]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.starts_with("error: missing subcommand(s) for command \"foo\"\n"));
    assert!(err.contains("Usage: nested-commands [GLOBAL OPTIONS] foo SUBCOMMAND...\n"));
}

#[test]
fn nested_commands_help_command_shows_leaf_usage() {
    let output = run(env!("CARGO_BIN_EXE_nested-commands"), &["help", "foo", "create"]);

    assert!(output.status.success());
    assert!(stderr(&output).starts_with(
        "Usage: nested-commands [GLOBAL OPTIONS] foo create [COMMAND OPTIONS] <name> [<option>...]\n"
    ));
}

#[test]
fn nested_commands_command_option_before_command_is_unknown() {
    let output = run(env!("CARGO_BIN_EXE_nested-commands"), &["-n", "foo", "create", "x"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("error: unknown option \"n\"\n"));
}
