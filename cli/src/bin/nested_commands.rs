use std::process::ExitCode;

use program_core::{KeyValueTable, MainResult, Program};

fn main() -> ExitCode {
    match program() {
        Ok(mut p) => program_cli::execute(&mut p),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn program() -> program_core::Result<Program> {
    let mut p = Program::new("nested-commands", "an example program with nested commands");

    p.add_flag(Some('a'), None, "a short flag")?;

    let mut c = p.add_command("foo create", "create a foo", cmd_foo_create)?;
    c.add_flag(Some('n'), Some("dry-run"), "only pretend to create the foo")?;
    c.add_argument("name", "the name of the foo")?;
    c.add_trailing_argument("option", "a creation option")?;

    let mut c = p.add_command("foo delete", "delete a foo", cmd_foo_delete)?;
    c.add_argument("name", "the name of the foo")?;

    let mut c = p.add_command("bar", "bar command", cmd_bar)?;
    c.add_optional_argument("arg-opt", "the optional argument")?;

    Ok(p)
}

fn running(p: &Program) {
    p.info(format!(
        "running command {:?}",
        p.command_full_name().unwrap_or_default()
    ));
}

fn cmd_foo_create(p: &Program) -> MainResult {
    running(p);

    let mut t = KeyValueTable::new();
    t.add_row("a", p.is_option_set("a"));
    t.add_row("dry-run", p.is_option_set("dry-run"));
    t.add_row("name", p.argument_value("name"));
    t.add_row("options", p.trailing_argument_values("option").join(" "));
    t.print()?;

    Ok(())
}

fn cmd_foo_delete(p: &Program) -> MainResult {
    running(p);

    let mut t = KeyValueTable::new();
    t.add_row("a", p.is_option_set("a"));
    t.add_row("name", p.argument_value("name"));
    t.print()?;

    Ok(())
}

fn cmd_bar(p: &Program) -> MainResult {
    running(p);

    let mut t = KeyValueTable::new();
    t.add_row("a", p.is_option_set("a"));
    t.add_row("arg-opt", p.optional_argument_value("arg-opt").unwrap_or("-"));
    t.print()?;

    Ok(())
}
